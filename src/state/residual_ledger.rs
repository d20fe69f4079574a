//! Amounts supplied to the pool but not absorbed by reserves or shares.
//!
//! Two sources feed the ledger:
//!
//! - **Pool residuals**: the part of a deposit above the current reserve
//!   ratio.
//! - **Swap residuals**: the part of an exact-output swap's supplied input
//!   the curve did not need, and flash-loan over-repayment.
//!
//! Residuals belong to the account whose operation produced them and only
//! that account can redeem them. Redemption returns the whole balance for
//! one asset and resets it to zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount, Asset, PerAsset};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Which operation family produced a residual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResidualKind {
    /// Deposit overpayment.
    Pool,
    /// Swap or flash-loan overpayment.
    Swap,
}

/// Residuals owed to one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwedResiduals {
    /// From deposits.
    pub pool: PerAsset<Amount>,
    /// From swaps and flash loans.
    pub swap: PerAsset<Amount>,
}

impl OwedResiduals {
    fn slot(&mut self, kind: ResidualKind, asset: Asset) -> &mut Amount {
        match kind {
            ResidualKind::Pool => self.pool.get_mut(asset),
            ResidualKind::Swap => self.swap.get_mut(asset),
        }
    }

    fn is_empty(&self) -> bool {
        self.pool.first.is_zero()
            && self.pool.second.is_zero()
            && self.swap.first.is_zero()
            && self.swap.second.is_zero()
    }
}

/// Per-account residual balances plus per-asset totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualLedger {
    owed: BTreeMap<AccountId, OwedResiduals>,
    totals: PerAsset<Amount>,
}

impl ResidualLedger {
    /// Credits `amount` of `asset` to `owner`. Zero amounts are ignored.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if a balance would exceed `u128::MAX`.
    pub fn accrue(
        &mut self,
        owner: AccountId,
        kind: ResidualKind,
        asset: Asset,
        amount: Amount,
    ) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        let total = self.totals.get(asset).safe_add(&amount)?;
        let entry = self.owed.entry(owner).or_default();
        let slot = entry.slot(kind, asset);
        *slot = slot.safe_add(&amount)?;
        *self.totals.get_mut(asset) = total;
        Ok(())
    }

    /// Pays out and clears `owner`'s residual of `asset`.
    ///
    /// Redeeming an empty balance succeeds and returns zero.
    pub fn redeem(&mut self, owner: &AccountId, kind: ResidualKind, asset: Asset) -> Amount {
        let Some(entry) = self.owed.get_mut(owner) else {
            return Amount::ZERO;
        };
        let amount = core::mem::take(entry.slot(kind, asset));
        if entry.is_empty() {
            self.owed.remove(owner);
        }
        // totals are the sum of all slots, so this cannot underflow
        let total = self.totals.get_mut(asset);
        *total = total.saturating_sub(&amount);
        amount
    }

    /// Residual of `asset` owed to `owner` from `kind` operations.
    #[must_use]
    pub fn owed(&self, owner: &AccountId, kind: ResidualKind, asset: Asset) -> Amount {
        self.owed.get(owner).map_or(Amount::ZERO, |o| match kind {
            ResidualKind::Pool => *o.pool.get(asset),
            ResidualKind::Swap => *o.swap.get(asset),
        })
    }

    /// Total outstanding residual of `asset` across all accounts.
    #[must_use]
    pub fn total(&self, asset: Asset) -> Amount {
        *self.totals.get(asset)
    }

    /// Number of accounts with a non-zero residual.
    #[must_use]
    pub fn holders(&self) -> usize {
        self.owed.len()
    }
}
