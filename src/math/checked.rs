//! Checked arithmetic lifted into [`AmmError`].
//!
//! The domain newtypes expose `checked_*` methods returning `Option`;
//! [`CheckedArithmetic`] maps each failure to a specific error variant so
//! handlers can propagate with `?`.
//!
//! ```
//! use tandem_amm::domain::{Amount, Rounding};
//! use tandem_amm::math::CheckedArithmetic;
//!
//! let out = Amount::new(1_000).safe_mul_div(Amount::new(99), Amount::new(1_099), Rounding::Down);
//! assert_eq!(out, Ok(Amount::new(90)));
//! ```

use super::mul_div;
use crate::domain::{Amount, Liquidity, Rounding};
use crate::error::AmmError;

/// Fallible arithmetic for the crate's `u128` newtypes.
///
/// No method panics and none saturates: every failure becomes an `Err`.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if the sum exceeds `u128::MAX`.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// [`AmmError::Underflow`] if `other > self`.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// `self · numerator / denominator` with a 256-bit intermediate.
    ///
    /// # Errors
    ///
    /// [`AmmError::DivisionByZero`] on a zero denominator,
    /// [`AmmError::Overflow`] if the quotient exceeds `u128::MAX`.
    fn safe_mul_div(
        &self,
        numerator: Self,
        denominator: Self,
        rounding: Rounding,
    ) -> Result<Self, AmmError>;
}

fn widened(a: u128, b: u128, c: u128, rounding: Rounding) -> Result<u128, AmmError> {
    if c == 0 {
        return Err(AmmError::DivisionByZero);
    }
    mul_div(a, b, c, rounding).ok_or(AmmError::Overflow("mul_div quotient overflow"))
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }

    fn safe_mul_div(
        &self,
        numerator: Self,
        denominator: Self,
        rounding: Rounding,
    ) -> Result<Self, AmmError> {
        widened(self.get(), numerator.get(), denominator.get(), rounding).map(Amount::new)
    }
}

// ---------------------------------------------------------------------------
// Liquidity
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("share supply overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("share subtraction underflow"))
    }

    fn safe_mul_div(
        &self,
        numerator: Self,
        denominator: Self,
        rounding: Rounding,
    ) -> Result<Self, AmmError> {
        widened(self.get(), numerator.get(), denominator.get(), rounding).map(Liquidity::new)
    }
}
