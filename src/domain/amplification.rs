//! StableSwap amplification coefficient.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Fixed-point scale of [`Amplification`]: `A = 1` is stored as `1_000_000`.
pub const AMP_PRECISION: u128 = 1_000_000;

/// Amplification coefficient `A`, scaled by [`AMP_PRECISION`].
///
/// Valid values lie in `[MIN, MAX]`: the lower bound keeps `A · n^n >= 1`
/// for two assets, the upper bound matches the largest deployed curve.
///
/// # Examples
///
/// ```
/// use tandem_amm::domain::Amplification;
///
/// let a = Amplification::from_integer(100);
/// assert_eq!(a.get(), 100_000_000);
/// assert!(a.is_within_bounds());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amplification(u128);

impl Amplification {
    /// Smallest accepted coefficient (`A = 0.25`).
    pub const MIN: Self = Self(AMP_PRECISION / 4);

    /// Largest accepted coefficient (`A = 400`).
    pub const MAX: Self = Self(400 * AMP_PRECISION);

    /// Wraps a raw, already scaled value.
    #[must_use]
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Scales a whole-number coefficient.
    #[must_use]
    pub const fn from_integer(a: u64) -> Self {
        Self(a as u128 * AMP_PRECISION)
    }

    /// Returns the raw scaled value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if `MIN <= self <= MAX`.
    #[must_use]
    pub const fn is_within_bounds(&self) -> bool {
        self.0 >= Self::MIN.0 && self.0 <= Self::MAX.0
    }
}

impl fmt::Display for Amplification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / AMP_PRECISION;
        let frac = self.0 % AMP_PRECISION;
        if frac == 0 {
            write!(f, "A={whole}")
        } else {
            write!(f, "A={whole}.{frac:06}")
        }
    }
}
