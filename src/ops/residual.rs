//! Residual redemption.

use super::{Context, Outcome};
use crate::domain::Asset;
use crate::state::{PoolState, ResidualKind};

/// Pays out the caller's `kind` residual of `asset`. Always succeeds; an
/// empty balance redeems zero.
pub(super) fn redeem(
    state: &mut PoolState,
    ctx: &Context<'_>,
    kind: ResidualKind,
    asset: Asset,
) -> Outcome {
    let amount = state.residuals.redeem(&ctx.caller, kind, asset);
    Outcome::ResidualRedeemed {
        kind,
        asset,
        amount,
    }
}
