//! The complete state of one two-asset pool.

use serde::{Deserialize, Serialize};

use super::{CumulativeStats, LiquidityPositions, ResidualLedger};
use crate::config::{FeeSchedule, PoolConfig, PoolLimits};
use crate::curve::{AmplificationSchedule, PricingCurve};
use crate::domain::{AccountId, Amount, Asset, BasisPoints, Liquidity, PerAsset, PricingMode, Timestamp};
use crate::error::AmmError;
use crate::traits::FromConfig;

/// Lifecycle stage of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolPhase {
    /// Created, no liquidity yet.
    Uninitialized,
    /// The first deposit has committed; nothing else has.
    Bootstrapped,
    /// At least one operation after the bootstrap deposit has committed.
    Active,
}

/// A swap-fee change waiting for its activation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSwapFee {
    /// Fee that will replace the current one.
    pub fee: BasisPoints,
    /// Earliest time the change can be applied.
    pub effective_at: Timestamp,
}

/// Balances, shares, residuals and parameters of a pool.
///
/// Values are only ever produced by [`FromConfig`] or by
/// [`execute`](crate::ops::execute), which works on a clone and returns the
/// successor state. A committed operation always bumps [`version`].
///
/// The pricing balances exclude outstanding residuals and protocol fees:
/// those are held by the pool on behalf of their owners but never priced.
///
/// [`version`]: PoolState::version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub(crate) pricing_mode: PricingMode,
    pub(crate) amplification: Option<AmplificationSchedule>,
    pub(crate) reserves: PerAsset<Amount>,
    pub(crate) positions: LiquidityPositions,
    pub(crate) residuals: ResidualLedger,
    pub(crate) protocol_fees: PerAsset<Amount>,
    pub(crate) fees: FeeSchedule,
    pub(crate) pending_swap_fee: Option<PendingSwapFee>,
    pub(crate) limits: PoolLimits,
    pub(crate) param_update_delay: u64,
    pub(crate) stats: CumulativeStats,
    pub(crate) phase: PoolPhase,
    pub(crate) version: u64,
}

impl FromConfig<PoolConfig> for PoolState {
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            pricing_mode: config.pricing_mode(),
            amplification: config.amplification().map(AmplificationSchedule::constant),
            reserves: PerAsset::default(),
            positions: LiquidityPositions::default(),
            residuals: ResidualLedger::default(),
            protocol_fees: PerAsset::default(),
            fees: *config.fees(),
            pending_swap_fee: None,
            limits: *config.limits(),
            param_update_delay: config.param_update_delay(),
            stats: CumulativeStats::default(),
            phase: PoolPhase::Uninitialized,
            version: 0,
        })
    }
}

impl PoolState {
    // ------------------------------------------------------------------
    // Balances
    // ------------------------------------------------------------------

    /// Pricing balance of `asset`.
    #[must_use]
    pub fn reserve(&self, asset: Asset) -> Amount {
        *self.reserves.get(asset)
    }

    /// Pricing balance of the first asset.
    #[must_use]
    pub const fn reserve1(&self) -> Amount {
        self.reserves.first
    }

    /// Pricing balance of the second asset.
    #[must_use]
    pub const fn reserve2(&self) -> Amount {
        self.reserves.second
    }

    /// Both pricing balances.
    #[must_use]
    pub const fn reserves(&self) -> &PerAsset<Amount> {
        &self.reserves
    }

    /// Outstanding residual of the first asset across all accounts.
    #[must_use]
    pub fn residual1(&self) -> Amount {
        self.residuals.total(Asset::First)
    }

    /// Outstanding residual of the second asset across all accounts.
    #[must_use]
    pub fn residual2(&self) -> Amount {
        self.residuals.total(Asset::Second)
    }

    /// Per-account residual balances.
    #[must_use]
    pub const fn residuals(&self) -> &ResidualLedger {
        &self.residuals
    }

    /// Protocol fees accrued and not yet withdrawn.
    #[must_use]
    pub const fn protocol_fees(&self) -> &PerAsset<Amount> {
        &self.protocol_fees
    }

    // ------------------------------------------------------------------
    // Shares
    // ------------------------------------------------------------------

    /// Outstanding share supply.
    #[must_use]
    pub const fn total_shares(&self) -> Liquidity {
        self.positions.total()
    }

    /// Shares held by `owner`.
    #[must_use]
    pub fn shares_of(&self, owner: &AccountId) -> Liquidity {
        self.positions.shares_of(owner)
    }

    /// All liquidity positions.
    #[must_use]
    pub const fn positions(&self) -> &LiquidityPositions {
        &self.positions
    }

    // ------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------

    /// Pricing curve family.
    #[must_use]
    pub const fn pricing_mode(&self) -> PricingMode {
        self.pricing_mode
    }

    /// Amplification schedule; `None` for constant-product pools.
    #[must_use]
    pub const fn amplification(&self) -> Option<&AmplificationSchedule> {
        self.amplification.as_ref()
    }

    /// The curve in effect at `now`.
    ///
    /// # Errors
    ///
    /// Propagates [`PricingCurve::resolve`].
    pub fn curve(&self, now: Timestamp) -> Result<PricingCurve, AmmError> {
        PricingCurve::resolve(self.pricing_mode, self.amplification.as_ref(), now)
    }

    /// Current fee schedule.
    #[must_use]
    pub const fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Swap-fee change waiting to be applied, if any.
    #[must_use]
    pub const fn pending_swap_fee(&self) -> Option<PendingSwapFee> {
        self.pending_swap_fee
    }

    /// Balance bounds enforced after deposits, swaps and flash loans.
    #[must_use]
    pub const fn limits(&self) -> &PoolLimits {
        &self.limits
    }

    /// Minimum lead time for scheduled parameter changes, in seconds.
    #[must_use]
    pub const fn param_update_delay(&self) -> u64 {
        self.param_update_delay
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Cumulative prices, volumes and fees.
    #[must_use]
    pub const fn stats(&self) -> &CumulativeStats {
        &self.stats
    }

    /// Lifecycle stage.
    #[must_use]
    pub const fn phase(&self) -> PoolPhase {
        self.phase
    }

    /// Number of committed operations.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// `true` while no shares are outstanding; the next deposit bootstraps.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.positions.total().is_zero()
    }
}
