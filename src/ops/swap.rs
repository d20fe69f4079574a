//! Exact-in and exact-out swaps.

use tracing::trace;

use super::{Context, Outcome};
use crate::curve::{PricingCurve, SwapQuote};
use crate::domain::{Asset, SwapSpec};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::state::{PoolState, ResidualKind};

/// Prices `spec` on the curve in effect at `ctx.now` and settles it.
///
/// The pool keeps the gross input minus the protocol's share of the fee
/// and releases the quoted output. For exact-out requests `max_amount_in`
/// is what the caller transferred in; whatever the swap did not need is
/// credited to the caller's swap residual in the input asset.
pub(super) fn swap(
    state: &mut PoolState,
    ctx: &Context<'_>,
    asset_in: Asset,
    spec: SwapSpec,
) -> Result<Outcome, AmmError> {
    let (reserve_in, reserve_out) = state.reserves.oriented(asset_in);
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::ZeroReserve);
    }
    let curve = state.curve(ctx.now)?;
    let quote = curve.quote(reserve_in, reserve_out, spec, state.fees.swap_fee)?;
    settle(state, ctx, asset_in, spec, curve, quote)
}

/// Books a priced swap. Every check runs before `state` is touched.
fn settle(
    state: &mut PoolState,
    ctx: &Context<'_>,
    asset_in: Asset,
    spec: SwapSpec,
    curve: PricingCurve,
    quote: SwapQuote,
) -> Result<Outcome, AmmError> {
    let (lp_fee, protocol_fee) = state.fees.split(quote.fee)?;
    let (reserve_in, reserve_out) = state.reserves.oriented(asset_in);

    let mut reserves = state.reserves;
    let retained = quote.amount_in.safe_sub(&protocol_fee)?;
    *reserves.get_mut(asset_in) = reserve_in.safe_add(&retained)?;
    *reserves.get_mut(asset_in.other()) = reserve_out.safe_sub(&quote.amount_out)?;

    if curve.invariant(&reserves)? < curve.invariant(&state.reserves)? {
        return Err(AmmError::InvariantViolation("swap decreased the pool invariant"));
    }
    state.limits.check(&reserves)?;
    let protocol_total = state.protocol_fees.get(asset_in).safe_add(&protocol_fee)?;
    let residual = spec.supplied().safe_sub(&quote.amount_in)?;

    state
        .residuals
        .accrue(ctx.caller, ResidualKind::Swap, asset_in, residual)?;
    state.stats.accrue_prices(&state.reserves, ctx.now);
    state.reserves = reserves;
    *state.protocol_fees.get_mut(asset_in) = protocol_total;
    state
        .stats
        .record_swap(asset_in, quote.amount_in, quote.amount_out, lp_fee, protocol_fee);
    trace!(
        %asset_in,
        amount_in = %quote.amount_in,
        amount_out = %quote.amount_out,
        fee = %quote.fee,
        "swap priced"
    );

    Ok(Outcome::Swapped {
        asset_in,
        amount_in: quote.amount_in,
        amount_out: quote.amount_out,
        lp_fee,
        protocol_fee,
        residual,
    })
}
