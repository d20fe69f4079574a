//! Basis-point percentages for fees and protocol parameters.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::AmmError;
use crate::math::mul_div;

/// 100% in basis points.
const MAX_BPS: u32 = 10_000;

/// A percentage in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Every fee and ratio parameter of the pool is expressed this way: swap
/// fee, flash-loan fee, maximum flash-loan ratio, reserve factor and the
/// deposit ratio tolerance.
///
/// # Examples
///
/// ```
/// use tandem_amm::domain::{Amount, BasisPoints, Rounding};
///
/// let fee = BasisPoints::new(30);
/// assert_eq!(fee.apply(Amount::new(100), Rounding::Up), Ok(Amount::new(1)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    /// Wraps a raw basis-point value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw basis-point value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value lies in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= MAX_BPS
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `10_000 - self`, or `None` above 100%.
    #[must_use]
    pub const fn complement(&self) -> Option<Self> {
        match MAX_BPS.checked_sub(self.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// `amount · self / 10_000` in the given direction.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if the result does not fit in `u128` (only
    /// possible for values above 100%).
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        mul_div(amount.get(), u128::from(self.0), u128::from(MAX_BPS), rounding)
            .map(Amount::new)
            .ok_or(AmmError::Overflow("basis points apply overflow"))
    }

    /// Inverse of deducting `self` from a gross amount: the smallest gross
    /// amount `g` with `g - ceil(g · self / 10_000) >= net`, i.e.
    /// `ceil(net · 10_000 / (10_000 - self))`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidFee`] if `self` is 100% or more,
    /// [`AmmError::Overflow`] if the gross amount does not fit in `u128`.
    pub fn gross_up(&self, net: Amount) -> crate::error::Result<Amount> {
        let keep = match self.complement() {
            Some(k) if !k.is_zero() => k,
            _ => return Err(AmmError::InvalidFee("fee must be below 100%")),
        };
        mul_div(net.get(), u128::from(MAX_BPS), u128::from(keep.0), Rounding::Up)
            .map(Amount::new)
            .ok_or(AmmError::Overflow("gross-up overflow"))
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
