//! Fee parameters of a pool.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, BasisPoints, PricingMode, Rounding};
use crate::error::AmmError;

/// Swap and flash-loan pricing parameters.
///
/// Defaults mirror the production deployment: 25 bp on constant-product
/// swaps, 10 bp on StableSwap swaps, 10 bp on flash loans, loans capped at
/// 10% of a balance, and 17.5% of every swap fee routed to protocol reserves.
///
/// # Validation
///
/// - `swap_fee` must be non-zero and below 100%.
/// - `flash_loan_fee` must be below 100%.
/// - `max_flash_loan_ratio` and `reserve_factor` must not exceed 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Charged on every swap input.
    pub swap_fee: BasisPoints,
    /// Charged on every flash-loan principal.
    pub flash_loan_fee: BasisPoints,
    /// Largest share of a balance a single flash loan may borrow.
    pub max_flash_loan_ratio: BasisPoints,
    /// Share of every swap fee moved out of the pricing balances into protocol
    /// reserves.
    pub reserve_factor: BasisPoints,
}

impl FeeSchedule {
    /// Default constant-product swap fee.
    pub const CONSTANT_PRODUCT_SWAP_FEE: BasisPoints = BasisPoints::new(25);
    /// Default StableSwap swap fee.
    pub const STABLE_SWAP_FEE: BasisPoints = BasisPoints::new(10);
    /// Default flash-loan fee.
    pub const FLASH_LOAN_FEE: BasisPoints = BasisPoints::new(10);
    /// Default flash-loan cap.
    pub const MAX_FLASH_LOAN_RATIO: BasisPoints = BasisPoints::new(1_000);
    /// Default protocol share of fees.
    pub const RESERVE_FACTOR: BasisPoints = BasisPoints::new(1_750);

    /// Deployment defaults for `mode`.
    #[must_use]
    pub const fn for_mode(mode: PricingMode) -> Self {
        let swap_fee = match mode {
            PricingMode::ConstantProduct => Self::CONSTANT_PRODUCT_SWAP_FEE,
            PricingMode::StableSwap => Self::STABLE_SWAP_FEE,
        };
        Self {
            swap_fee,
            flash_loan_fee: Self::FLASH_LOAN_FEE,
            max_flash_loan_ratio: Self::MAX_FLASH_LOAN_RATIO,
            reserve_factor: Self::RESERVE_FACTOR,
        }
    }

    /// Validates every parameter.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidFee`] naming the offending parameter.
    pub fn validate(&self) -> Result<(), AmmError> {
        validate_swap_fee(self.swap_fee)?;
        if self.flash_loan_fee >= BasisPoints::MAX_PERCENT {
            return Err(AmmError::InvalidFee("flash loan fee must be below 100%"));
        }
        if !self.max_flash_loan_ratio.is_valid_percent() {
            return Err(AmmError::InvalidFee("max flash loan ratio above 100%"));
        }
        if !self.reserve_factor.is_valid_percent() {
            return Err(AmmError::InvalidFee("reserve factor above 100%"));
        }
        Ok(())
    }

    /// Splits `fee` into `(lp_share, protocol_share)`; the protocol share
    /// rounds down.
    ///
    /// # Errors
    ///
    /// Propagates [`BasisPoints::apply`] overflow.
    pub fn split(&self, fee: Amount) -> Result<(Amount, Amount), AmmError> {
        let protocol = self.reserve_factor.apply(fee, Rounding::Down)?;
        Ok((fee.saturating_sub(&protocol), protocol))
    }
}

/// Checks a swap fee: non-zero and below 100%.
///
/// # Errors
///
/// [`AmmError::InvalidFee`] otherwise.
pub fn validate_swap_fee(fee: BasisPoints) -> Result<(), AmmError> {
    if fee.is_zero() {
        return Err(AmmError::InvalidFee("swap fee must be non-zero"));
    }
    if fee >= BasisPoints::MAX_PERCENT {
        return Err(AmmError::InvalidFee("swap fee must be below 100%"));
    }
    Ok(())
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::for_mode(PricingMode::ConstantProduct)
    }
}
