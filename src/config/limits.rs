//! Balance bounds checked after every deposit, swap and flash loan.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, PerAsset};
use crate::error::AmmError;

/// Lower bound on each balance and upper bound on their ratio.
///
/// Keeps the curves away from the degenerate corners where a few base
/// units move the price by orders of magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolLimits {
    /// Smallest balance either side may hold.
    pub min_pool_balance: Amount,
    /// `max(r1, r2) / min(r1, r2)` must stay strictly below this.
    pub max_asset_ratio: u128,
}

impl PoolLimits {
    /// Deployment default for `min_pool_balance`.
    pub const MIN_POOL_BALANCE: Amount = Amount::new(1_000);
    /// Deployment default for `max_asset_ratio`.
    pub const MAX_ASSET_RATIO: u128 = 1_000_000_000;

    /// No bounds beyond non-zero balances.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min_pool_balance: Amount::new(1),
            max_asset_ratio: u128::MAX,
        }
    }

    /// Validates the limits themselves.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidConfiguration`] if the minimum balance is zero or
    /// the ratio bound is below 2.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.min_pool_balance.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum pool balance must be non-zero",
            ));
        }
        if self.max_asset_ratio < 2 {
            return Err(AmmError::InvalidConfiguration(
                "max asset ratio must be at least 2",
            ));
        }
        Ok(())
    }

    /// Checks `reserves` against the bounds.
    ///
    /// # Errors
    ///
    /// [`AmmError::AssetRatioOutOfBounds`] if either balance is below the
    /// minimum or their ratio reaches the maximum.
    pub fn check(&self, reserves: &PerAsset<Amount>) -> Result<(), AmmError> {
        let (lo, hi) = if reserves.first <= reserves.second {
            (reserves.first, reserves.second)
        } else {
            (reserves.second, reserves.first)
        };
        if lo < self.min_pool_balance {
            return Err(AmmError::AssetRatioOutOfBounds(
                "balance below pool minimum",
            ));
        }
        // lo >= min_pool_balance >= 1
        if hi.get() / lo.get() >= self.max_asset_ratio {
            return Err(AmmError::AssetRatioOutOfBounds(
                "asset ratio above pool maximum",
            ));
        }
        Ok(())
    }
}

impl Default for PoolLimits {
    fn default() -> Self {
        Self {
            min_pool_balance: Self::MIN_POOL_BALANCE,
            max_asset_ratio: Self::MAX_ASSET_RATIO,
        }
    }
}
