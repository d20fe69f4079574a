//! Swap request: which side is fixed and the caller's slippage bound.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::AmmError;

/// What drives a swap and how far the price may move against the caller.
///
/// # Invariants
///
/// The fixed amount is always non-zero.
///
/// # Examples
///
/// ```
/// use tandem_amm::domain::{Amount, SwapSpec};
///
/// let spec = SwapSpec::exact_in(Amount::new(100), Amount::new(85));
/// assert!(spec.is_ok());
/// assert!(SwapSpec::exact_out(Amount::ZERO, Amount::new(1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapSpec {
    /// Sell exactly `amount_in`; fail if fewer than `min_amount_out` come back.
    ExactIn {
        /// Gross input, fee included.
        amount_in: Amount,
        /// Smallest acceptable output.
        min_amount_out: Amount,
    },
    /// Buy exactly `amount_out`, supplying at most `max_amount_in`.
    ///
    /// `max_amount_in` is not a notional cap: it is the amount the caller
    /// has actually transferred in. Whatever part of it the pool does not
    /// need is credited to the caller's swap residual, so passing
    /// [`Amount::MAX`] as "no limit" books a residual of that size.
    ExactOut {
        /// Output the caller wants.
        amount_out: Amount,
        /// Input the caller transferred in, and the most the pool may keep.
        max_amount_in: Amount,
    },
}

impl SwapSpec {
    /// Builds an exact-input request.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidQuantity`] if `amount_in` is zero.
    pub const fn exact_in(amount_in: Amount, min_amount_out: Amount) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::InvalidQuantity("swap input must be non-zero"));
        }
        Ok(Self::ExactIn {
            amount_in,
            min_amount_out,
        })
    }

    /// Builds an exact-output request.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidQuantity`] if `amount_out` is zero.
    pub const fn exact_out(amount_out: Amount, max_amount_in: Amount) -> crate::error::Result<Self> {
        if amount_out.is_zero() {
            return Err(AmmError::InvalidQuantity("swap output must be non-zero"));
        }
        Ok(Self::ExactOut {
            amount_out,
            max_amount_in,
        })
    }

    /// The amount the caller transfers into the pool before the swap runs.
    pub const fn supplied(&self) -> Amount {
        match self {
            Self::ExactIn { amount_in, .. } => *amount_in,
            Self::ExactOut { max_amount_in, .. } => *max_amount_in,
        }
    }
}

impl fmt::Display for SwapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactIn {
                amount_in,
                min_amount_out,
            } => write!(f, "ExactIn({amount_in}, min_out={min_amount_out})"),
            Self::ExactOut {
                amount_out,
                max_amount_in,
            } => write!(f, "ExactOut({amount_out}, max_in={max_amount_in})"),
        }
    }
}
