//! Pool operations.
//!
//! Every state change goes through [`execute`]: it clones the input state,
//! runs the handler for the requested [`Operation`] on the clone and hands
//! back a [`Transition`] only if every step and post-condition succeeded.
//! The input state is never touched, so a failed operation has no effect.
//!
//! ```text
//! (&PoolState, &Context, Operation)
//!         │ clone
//!         ▼
//!   handler (liquidity / swap / flash_loan / residual / admin)
//!         │ Ok: version += 1, Bootstrapped → Active
//!         ▼
//!   Transition { state, outcome }
//! ```
//!
//! # Examples
//!
//! ```
//! use tandem_amm::prelude::*;
//!
//! let config = PoolConfig::constant_product().with_limits(PoolLimits::unbounded());
//! let Ok(config) = config else { panic!() };
//! let Ok(pool) = PoolState::from_config(&config) else { panic!() };
//!
//! let lp = AccountId::from_bytes([1; 32]);
//! let ctx = Context::new(lp, Timestamp::new(1_000));
//! let deposit = Operation::AddLiquidity {
//!     deposit: PerAsset::new(Amount::new(1_000), Amount::new(1_000)),
//!     ratio_tolerance: BasisPoints::ZERO,
//! };
//! let Ok(t) = execute(&pool, &ctx, deposit) else { panic!() };
//! assert_eq!(t.state.total_shares(), Liquidity::new(1_000));
//! assert_eq!(pool.version(), 0);
//! assert_eq!(t.state.version(), 1);
//! ```

mod admin;
mod flash_loan;
mod liquidity;
mod residual;
mod swap;

#[cfg(test)]
mod proptest_properties;

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::FeeSchedule;
use crate::curve::AmplificationSchedule;
use crate::domain::{AccountId, Amount, Amplification, Asset, BasisPoints, Liquidity, PerAsset, SwapSpec, Timestamp};
use crate::error::AmmError;
use crate::state::{PendingSwapFee, PoolPhase, PoolState, ResidualKind};
use crate::traits::{Authority, DenyAll};

pub use flash_loan::{flash_loan_fees, flash_loan_with};

static DENY_ALL: DenyAll = DenyAll;

/// Who is calling, when, and which administrative rights they hold.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// Account the operation acts for.
    pub caller: AccountId,
    /// Time of the enclosing transaction.
    pub now: Timestamp,
    /// Capability predicate for admin operations.
    pub authority: &'a dyn Authority,
}

impl<'a> Context<'a> {
    /// A context with no administrative rights.
    #[must_use]
    pub fn new(caller: AccountId, now: Timestamp) -> Self {
        Self {
            caller,
            now,
            authority: &DENY_ALL,
        }
    }

    /// Replaces the capability predicate.
    #[must_use]
    pub fn with_authority<'b>(self, authority: &'b dyn Authority) -> Context<'b> {
        Context {
            caller: self.caller,
            now: self.now,
            authority,
        }
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("caller", &self.caller)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

/// Administrative operations. Each requires the matching
/// [`AdminAction`](crate::traits::AdminAction) from the context's authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminOp {
    /// Start a linear amplification ramp from the current value.
    RampAmplification {
        /// Target amplification.
        future: Amplification,
        /// Time the target is reached.
        future_time: Timestamp,
    },
    /// Schedule a swap-fee change after the parameter update delay.
    ScheduleSwapFeeUpdate {
        /// New swap fee.
        fee: BasisPoints,
    },
    /// Replace the flash-loan fee, flash-loan cap and reserve factor.
    UpdateProtocolParams {
        /// New flash-loan fee.
        flash_loan_fee: BasisPoints,
        /// New flash-loan cap.
        max_flash_loan_ratio: BasisPoints,
        /// New protocol share of swap fees.
        reserve_factor: BasisPoints,
    },
    /// Pay out and clear the accrued protocol fees.
    WithdrawProtocolFees,
    /// Lengthen the parameter update delay. The delay never shrinks.
    IncreaseParamUpdateDelay {
        /// New delay in seconds; must exceed the current one.
        secs: u64,
    },
}

/// A request against a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Deposit both assets for shares. Bootstraps an empty pool.
    AddLiquidity {
        /// Amounts supplied by the caller.
        deposit: PerAsset<Amount>,
        /// Largest accepted deviation of the deposit ratio from the pool
        /// ratio. Ignored on bootstrap.
        ratio_tolerance: BasisPoints,
    },
    /// Burn shares for a pro-rata share of both balances.
    Burn {
        /// Shares to burn.
        shares: Liquidity,
    },
    /// Trade one asset for the other.
    Swap {
        /// Asset supplied by the caller.
        asset_in: Asset,
        /// Exact-in or exact-out request with its bound.
        spec: SwapSpec,
    },
    /// Borrow and repay within one atomic group.
    FlashLoan {
        /// Borrowed amounts; zero for an asset not borrowed.
        amounts: PerAsset<Amount>,
        /// Amounts returned to the pool in the same group.
        repayment: PerAsset<Amount>,
    },
    /// Withdraw the caller's deposit residual of one asset.
    RedeemPoolResidual(Asset),
    /// Withdraw the caller's swap and flash-loan residual of one asset.
    RedeemSwapResidual(Asset),
    /// Install a scheduled swap fee whose activation time has passed.
    ApplySwapFeeUpdate,
    /// Administrative operation.
    Admin(AdminOp),
}

impl Operation {
    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddLiquidity { .. } => "add_liquidity",
            Self::Burn { .. } => "burn",
            Self::Swap { .. } => "swap",
            Self::FlashLoan { .. } => "flash_loan",
            Self::RedeemPoolResidual(_) => "redeem_pool_residual",
            Self::RedeemSwapResidual(_) => "redeem_swap_residual",
            Self::ApplySwapFeeUpdate => "apply_swap_fee_update",
            Self::Admin(AdminOp::RampAmplification { .. }) => "ramp_amplification",
            Self::Admin(AdminOp::ScheduleSwapFeeUpdate { .. }) => "schedule_swap_fee_update",
            Self::Admin(AdminOp::UpdateProtocolParams { .. }) => "update_protocol_params",
            Self::Admin(AdminOp::WithdrawProtocolFees) => "withdraw_protocol_fees",
            Self::Admin(AdminOp::IncreaseParamUpdateDelay { .. }) => "increase_param_update_delay",
        }
    }
}

/// What a committed operation did, and what the host must transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Shares minted for a deposit.
    LiquidityAdded {
        /// Shares credited to the caller.
        shares: Liquidity,
        /// Part of the deposit moved into the pricing balances.
        deposited: PerAsset<Amount>,
        /// Part of the deposit credited to the caller's pool residual.
        residual: PerAsset<Amount>,
        /// `true` if this deposit bootstrapped the pool.
        bootstrap: bool,
    },
    /// Shares burned.
    LiquidityRemoved {
        /// Shares debited from the caller.
        shares: Liquidity,
        /// Amounts to pay the caller.
        withdrawn: PerAsset<Amount>,
    },
    /// Swap settled.
    Swapped {
        /// Asset supplied.
        asset_in: Asset,
        /// Input kept by the pool, fee included.
        amount_in: Amount,
        /// Output to pay the caller.
        amount_out: Amount,
        /// Fee left in the pool for liquidity providers.
        lp_fee: Amount,
        /// Fee moved to protocol reserves.
        protocol_fee: Amount,
        /// Supplied input beyond what the swap needed, credited to the
        /// caller's swap residual.
        residual: Amount,
    },
    /// Flash loan settled.
    FlashLoanSettled {
        /// Borrowed amounts.
        borrowed: PerAsset<Amount>,
        /// Fees retained by the pool.
        fees: PerAsset<Amount>,
        /// Over-repayment credited to the caller's swap residual.
        residual: PerAsset<Amount>,
    },
    /// Residual paid out.
    ResidualRedeemed {
        /// Ledger the residual came from.
        kind: ResidualKind,
        /// Asset paid.
        asset: Asset,
        /// Amount to pay the caller; may be zero.
        amount: Amount,
    },
    /// New amplification schedule in force.
    AmplificationRamped(AmplificationSchedule),
    /// Swap-fee change scheduled.
    SwapFeeScheduled(PendingSwapFee),
    /// Scheduled swap fee installed.
    SwapFeeApplied(BasisPoints),
    /// New fee schedule in force.
    ProtocolParamsUpdated(FeeSchedule),
    /// Protocol fees to pay the caller.
    ProtocolFeesWithdrawn(PerAsset<Amount>),
    /// New parameter update delay in seconds.
    ParamUpdateDelayIncreased(u64),
}

/// Successor state plus outcome of a committed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The pool after the operation.
    pub state: PoolState,
    /// What happened.
    pub outcome: Outcome,
}

/// Runs `op` against `state`.
///
/// On success the returned state has its version bumped and, if the pool
/// was freshly bootstrapped, moves to [`PoolPhase::Active`]. On failure
/// nothing is returned but the error.
///
/// # Errors
///
/// Whatever the handler for `op` reports; see [`AmmError`].
pub fn execute(state: &PoolState, ctx: &Context<'_>, op: Operation) -> Result<Transition, AmmError> {
    let mut next = state.clone();
    let result = match op {
        Operation::AddLiquidity {
            deposit,
            ratio_tolerance,
        } => liquidity::add(&mut next, ctx, deposit, ratio_tolerance),
        Operation::Burn { shares } => liquidity::burn(&mut next, ctx, shares),
        Operation::Swap { asset_in, spec } => swap::swap(&mut next, ctx, asset_in, spec),
        Operation::FlashLoan { amounts, repayment } => {
            flash_loan::settle(&mut next, ctx, amounts, repayment)
        }
        Operation::RedeemPoolResidual(asset) => {
            Ok(residual::redeem(&mut next, ctx, ResidualKind::Pool, asset))
        }
        Operation::RedeemSwapResidual(asset) => {
            Ok(residual::redeem(&mut next, ctx, ResidualKind::Swap, asset))
        }
        Operation::ApplySwapFeeUpdate => admin::apply_swap_fee(&mut next, ctx),
        Operation::Admin(admin_op) => admin::run(&mut next, ctx, admin_op),
    };

    match result {
        Ok(outcome) => {
            if state.phase == PoolPhase::Bootstrapped {
                next.phase = PoolPhase::Active;
            }
            next.version = state.version.wrapping_add(1);
            debug!(
                op = op.kind(),
                caller = %ctx.caller,
                version = next.version,
                "operation committed"
            );
            Ok(Transition {
                state: next,
                outcome,
            })
        }
        Err(error) => {
            warn!(op = op.kind(), caller = %ctx.caller, %error, "operation rejected");
            Err(error)
        }
    }
}


#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn failed_operation_leaves_input_untouched() {
        let pool = seeded(&cp_pool(), acct(1), 1_000, 1_000);
        let before = pool.clone();
        let op = Operation::Burn {
            shares: Liquidity::new(5_000),
        };
        assert_eq!(
            execute(&pool, &at(acct(1), 1), op),
            Err(AmmError::InsufficientLiquidity)
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn phase_and_version_progress() {
        let pool = cp_pool();
        assert_eq!(pool.phase(), PoolPhase::Uninitialized);
        let pool = seeded(&pool, acct(1), 1_000, 1_000);
        assert_eq!(pool.phase(), PoolPhase::Bootstrapped);
        assert_eq!(pool.version(), 1);
        let Ok(t) = execute(
            &pool,
            &at(acct(2), 5),
            Operation::RedeemPoolResidual(Asset::First),
        ) else {
            panic!("redeem");
        };
        assert_eq!(t.state.phase(), PoolPhase::Active);
        assert_eq!(t.state.version(), 2);
    }

    #[test]
    fn context_defaults_to_no_admin_rights() {
        let ctx = at(acct(1), 0);
        assert!(!ctx
            .authority
            .permits(&acct(1), crate::traits::AdminAction::RampAmplification));
    }

    #[test]
    fn operation_names() {
        assert_eq!(Operation::ApplySwapFeeUpdate.kind(), "apply_swap_fee_update");
        assert_eq!(
            Operation::Admin(AdminOp::WithdrawProtocolFees).kind(),
            "withdraw_protocol_fees"
        );
        assert_eq!(
            Operation::Admin(AdminOp::IncreaseParamUpdateDelay { secs: 1 }).kind(),
            "increase_param_update_delay"
        );
    }

    #[test]
    fn operation_json_shape() {
        let op = Operation::RedeemSwapResidual(Asset::Second);
        let Ok(json) = serde_json::to_string(&op) else {
            panic!("serialize");
        };
        let Ok(back) = serde_json::from_str::<Operation>(&json) else {
            panic!("deserialize");
        };
        assert_eq!(back, op);
    }
}
