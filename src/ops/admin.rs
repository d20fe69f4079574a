//! Parameter changes and protocol-fee withdrawal.
//!
//! Every [`AdminOp`] is gated by the context's [`Authority`]; the
//! permissionless [`apply_swap_fee`] only installs a change an
//! administrator already scheduled.
//!
//! [`Authority`]: crate::traits::Authority

use tracing::info;

use super::{AdminOp, Context, Outcome};
use crate::config::{validate_swap_fee, FeeSchedule};
use crate::domain::{Amplification, BasisPoints, PricingMode, Timestamp};
use crate::error::AmmError;
use crate::state::{PendingSwapFee, PoolState};
use crate::traits::AdminAction;

pub(super) fn run(state: &mut PoolState, ctx: &Context<'_>, op: AdminOp) -> Result<Outcome, AmmError> {
    let action = match op {
        AdminOp::RampAmplification { .. } => AdminAction::RampAmplification,
        AdminOp::ScheduleSwapFeeUpdate { .. } => AdminAction::ScheduleSwapFee,
        AdminOp::UpdateProtocolParams { .. } => AdminAction::UpdateProtocolParams,
        AdminOp::WithdrawProtocolFees => AdminAction::WithdrawProtocolFees,
        AdminOp::IncreaseParamUpdateDelay { .. } => AdminAction::IncreaseParamUpdateDelay,
    };
    if !ctx.authority.permits(&ctx.caller, action) {
        return Err(AmmError::Unauthorized("caller lacks the admin capability"));
    }

    match op {
        AdminOp::RampAmplification {
            future,
            future_time,
        } => ramp_amplification(state, ctx.now, future, future_time),
        AdminOp::ScheduleSwapFeeUpdate { fee } => schedule_swap_fee(state, ctx.now, fee),
        AdminOp::UpdateProtocolParams {
            flash_loan_fee,
            max_flash_loan_ratio,
            reserve_factor,
        } => {
            let fees = FeeSchedule {
                swap_fee: state.fees.swap_fee,
                flash_loan_fee,
                max_flash_loan_ratio,
                reserve_factor,
            };
            fees.validate()?;
            state.fees = fees;
            info!(
                %flash_loan_fee,
                %max_flash_loan_ratio,
                %reserve_factor,
                "protocol parameters updated"
            );
            Ok(Outcome::ProtocolParamsUpdated(fees))
        }
        AdminOp::WithdrawProtocolFees => {
            let withdrawn = core::mem::take(&mut state.protocol_fees);
            info!(
                amount1 = %withdrawn.first,
                amount2 = %withdrawn.second,
                "protocol fees withdrawn"
            );
            Ok(Outcome::ProtocolFeesWithdrawn(withdrawn))
        }
        AdminOp::IncreaseParamUpdateDelay { secs } => {
            if secs <= state.param_update_delay {
                return Err(AmmError::InvalidConfiguration(
                    "parameter update delay can only increase",
                ));
            }
            info!(from = state.param_update_delay, to = secs, "parameter update delay increased");
            state.param_update_delay = secs;
            Ok(Outcome::ParamUpdateDelayIncreased(secs))
        }
    }
}

/// Ramps the amplification from its current value to `future`.
fn ramp_amplification(
    state: &mut PoolState,
    now: Timestamp,
    future: Amplification,
    future_time: Timestamp,
) -> Result<Outcome, AmmError> {
    if state.pricing_mode != PricingMode::StableSwap {
        return Err(AmmError::InvalidConfiguration(
            "amplification applies to stableswap pools only",
        ));
    }
    let schedule = state.amplification.ok_or(AmmError::InvalidConfiguration(
        "stableswap pool needs an amplification",
    ))?;
    let next = schedule.ramp(future, future_time, now, state.param_update_delay)?;
    state.amplification = Some(next);
    info!(
        from = %next.initial(),
        to = %future,
        until = future_time.get(),
        "amplification ramp scheduled"
    );
    Ok(Outcome::AmplificationRamped(next))
}

fn schedule_swap_fee(
    state: &mut PoolState,
    now: Timestamp,
    fee: BasisPoints,
) -> Result<Outcome, AmmError> {
    validate_swap_fee(fee)?;
    let effective_at = now
        .checked_add_secs(state.param_update_delay)
        .ok_or(AmmError::Overflow("swap fee activation time overflow"))?;
    let pending = PendingSwapFee { fee, effective_at };
    state.pending_swap_fee = Some(pending);
    info!(%fee, effective_at = effective_at.get(), "swap fee update scheduled");
    Ok(Outcome::SwapFeeScheduled(pending))
}

/// Installs the scheduled swap fee once its activation time has passed.
pub(super) fn apply_swap_fee(state: &mut PoolState, ctx: &Context<'_>) -> Result<Outcome, AmmError> {
    let pending = state
        .pending_swap_fee
        .ok_or(AmmError::InvalidConfiguration("no swap fee update scheduled"))?;
    if ctx.now < pending.effective_at {
        return Err(AmmError::InvalidConfiguration(
            "swap fee update not yet effective",
        ));
    }
    state.fees.swap_fee = pending.fee;
    state.pending_swap_fee = None;
    info!(fee = %pending.fee, "swap fee update applied");
    Ok(Outcome::SwapFeeApplied(pending.fee))
}
