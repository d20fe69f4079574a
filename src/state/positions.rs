//! Share holdings per liquidity provider.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Liquidity};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// `(owner, shares)` for every provider, with the running supply.
///
/// The supply always equals the sum of all holdings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPositions {
    holders: BTreeMap<AccountId, Liquidity>,
    total: Liquidity,
}

impl LiquidityPositions {
    /// Outstanding share supply.
    #[must_use]
    pub const fn total(&self) -> Liquidity {
        self.total
    }

    /// Shares held by `owner`.
    #[must_use]
    pub fn shares_of(&self, owner: &AccountId) -> Liquidity {
        self.holders.get(owner).copied().unwrap_or_default()
    }

    /// Iterates over `(owner, shares)` in account order.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &Liquidity)> {
        self.holders.iter()
    }

    /// Credits freshly minted shares to `owner`.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if the supply would exceed `u128::MAX`.
    pub fn mint(&mut self, owner: AccountId, shares: Liquidity) -> Result<(), AmmError> {
        let total = self.total.safe_add(&shares)?;
        let held = self.shares_of(&owner).safe_add(&shares)?;
        self.holders.insert(owner, held);
        self.total = total;
        Ok(())
    }

    /// Debits burned shares from `owner`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidity`] if `owner` holds fewer than
    /// `shares`.
    pub fn burn(&mut self, owner: &AccountId, shares: Liquidity) -> Result<(), AmmError> {
        let held = self
            .shares_of(owner)
            .checked_sub(&shares)
            .ok_or(AmmError::InsufficientLiquidity)?;
        if held.is_zero() {
            self.holders.remove(owner);
        } else {
            self.holders.insert(*owner, held);
        }
        self.total = self.total.safe_sub(&shares)?;
        Ok(())
    }
}
