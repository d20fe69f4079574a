//! Raw asset quantity with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A quantity of one of the pool's two assets, in base units.
///
/// Addition and subtraction are checked and return `None` instead of
/// wrapping or panicking. Scaled products go through
/// [`CheckedArithmetic::safe_mul_div`](crate::math::CheckedArithmetic::safe_mul_div).
///
/// # Examples
///
/// ```
/// use tandem_amm::domain::Amount;
///
/// let reserve = Amount::new(1_000);
/// assert_eq!(reserve.checked_sub(&Amount::new(90)), Some(Amount::new(910)));
/// assert_eq!(reserve.saturating_sub(&Amount::new(2_000)), Amount::ZERO);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw base-unit quantity.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw base-unit quantity.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Subtraction clamped at zero.
    pub const fn saturating_sub(&self, other: &Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}
