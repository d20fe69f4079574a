//! Deposits and burns.

use tracing::trace;

use super::{Context, Outcome};
use crate::domain::{Amount, Asset, BasisPoints, Liquidity, PerAsset, Rounding};
use crate::error::AmmError;
use crate::math::{CheckedArithmetic, U256};
use crate::state::{PoolPhase, PoolState, ResidualKind};

const BPS_DENOMINATOR: u64 = 10_000;

/// Deposits both assets. An empty pool is bootstrapped at the deposit's
/// own ratio; otherwise the deposit is trimmed to the pool ratio and the
/// excess is credited to the caller's pool residual.
pub(super) fn add(
    state: &mut PoolState,
    ctx: &Context<'_>,
    deposit: PerAsset<Amount>,
    ratio_tolerance: BasisPoints,
) -> Result<Outcome, AmmError> {
    if deposit.first.is_zero() || deposit.second.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let curve = state.curve(ctx.now)?;

    if state.is_empty() {
        let shares = curve.bootstrap_shares(&deposit)?;
        if shares.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        credit(state, &deposit)?;
        state.limits.check(&state.reserves)?;
        state.positions.mint(ctx.caller, shares)?;
        if state.phase == PoolPhase::Uninitialized {
            state.phase = PoolPhase::Bootstrapped;
        }
        return Ok(Outcome::LiquidityAdded {
            shares,
            deposited: deposit,
            residual: PerAsset::default(),
            bootstrap: true,
        });
    }

    let reserves = state.reserves;
    if reserves.first.is_zero() || reserves.second.is_zero() {
        return Err(AmmError::ZeroReserve);
    }
    check_ratio(&reserves, &deposit, ratio_tolerance)?;
    let adjusted = trim_to_ratio(&reserves, &deposit)?;
    let residual = PerAsset::new(
        deposit.first.safe_sub(&adjusted.first)?,
        deposit.second.safe_sub(&adjusted.second)?,
    );

    let shares = curve.deposit_shares(&reserves, &adjusted, state.positions.total())?;
    if shares.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    credit(state, &adjusted)?;
    state.limits.check(&state.reserves)?;
    state.positions.mint(ctx.caller, shares)?;
    for asset in Asset::BOTH {
        state
            .residuals
            .accrue(ctx.caller, ResidualKind::Pool, asset, *residual.get(asset))?;
    }
    trace!(%shares, residual1 = %residual.first, residual2 = %residual.second, "deposit trimmed");

    Ok(Outcome::LiquidityAdded {
        shares,
        deposited: adjusted,
        residual,
        bootstrap: false,
    })
}

/// Burns `shares` for a pro-rata share of both balances.
pub(super) fn burn(
    state: &mut PoolState,
    ctx: &Context<'_>,
    shares: Liquidity,
) -> Result<Outcome, AmmError> {
    if shares.is_zero() {
        return Err(AmmError::InvalidQuantity("cannot burn zero shares"));
    }
    let total = state.positions.total();
    if shares > state.positions.shares_of(&ctx.caller) {
        return Err(AmmError::InsufficientLiquidity);
    }

    let withdrawn = if shares == total {
        state.reserves
    } else {
        let (part, whole) = (Amount::new(shares.get()), Amount::new(total.get()));
        let share_of = |reserve: Amount| reserve.safe_mul_div(part, whole, Rounding::Down);
        PerAsset::new(share_of(state.reserves.first)?, share_of(state.reserves.second)?)
    };
    if withdrawn.first.is_zero() || withdrawn.second.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }

    state.positions.burn(&ctx.caller, shares)?;
    for asset in Asset::BOTH {
        let reserve = state.reserves.get_mut(asset);
        *reserve = reserve.safe_sub(withdrawn.get(asset))?;
    }
    Ok(Outcome::LiquidityRemoved { shares, withdrawn })
}

fn credit(state: &mut PoolState, amounts: &PerAsset<Amount>) -> Result<(), AmmError> {
    for asset in Asset::BOTH {
        let reserve = state.reserves.get_mut(asset);
        *reserve = reserve.safe_add(amounts.get(asset))?;
    }
    Ok(())
}

/// Rejects a deposit whose ratio deviates from the pool ratio by more
/// than `tolerance`, measured relative to the pool's price of asset 2.
///
/// `|r1·a2 − r2·a1| · 10_000 ≤ tolerance · r2·a1`
fn check_ratio(
    reserves: &PerAsset<Amount>,
    deposit: &PerAsset<Amount>,
    tolerance: BasisPoints,
) -> Result<(), AmmError> {
    let lhs = U256::from(reserves.first.get()) * U256::from(deposit.second.get());
    let rhs = U256::from(reserves.second.get()) * U256::from(deposit.first.get());
    let overflow = || AmmError::Overflow("deposit ratio overflow");
    let scaled = lhs
        .distance(rhs)
        .checked_mul(U256::from(BPS_DENOMINATOR))
        .ok_or_else(overflow)?;
    let allowed = rhs
        .checked_mul(U256::from(tolerance.get()))
        .ok_or_else(overflow)?;
    if scaled <= allowed {
        return Ok(());
    }
    // rhs is non-zero: every term was checked non-zero by the caller
    let (q, r) = scaled.div_mod(rhs);
    let actual_bps = if r.is_zero() { q } else { q + U256::one() };
    let actual = actual_bps.fit_u128().ok_or_else(overflow)?;
    Err(AmmError::SlippageExceeded {
        limit: Amount::new(u128::from(tolerance.get())),
        actual: Amount::new(actual),
    })
}

/// Reduces the side in excess of the pool ratio to
/// `ceil(other · reserve_this / reserve_other)`.
fn trim_to_ratio(
    reserves: &PerAsset<Amount>,
    deposit: &PerAsset<Amount>,
) -> Result<PerAsset<Amount>, AmmError> {
    let lhs = U256::from(reserves.first.get()) * U256::from(deposit.second.get());
    let rhs = U256::from(reserves.second.get()) * U256::from(deposit.first.get());
    let scaled =
        |other: Amount, r_this: Amount, r_other: Amount| other.safe_mul_div(r_this, r_other, Rounding::Up);
    if lhs > rhs {
        let second = scaled(deposit.first, reserves.second, reserves.first)?;
        Ok(PerAsset::new(deposit.first, second))
    } else if lhs < rhs {
        let first = scaled(deposit.second, reserves.first, reserves.second)?;
        Ok(PerAsset::new(first, deposit.second))
    } else {
        Ok(*deposit)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::super::test_support::*;
    use super::super::{execute, Operation, Outcome};
    use super::*;
    use crate::config::{PoolConfig, PoolLimits};
    use crate::domain::AccountId;
    use crate::traits::FromConfig;

    fn add_op(a: u128, b: u128, tol: u32) -> Operation {
        Operation::AddLiquidity {
            deposit: pair(a, b),
            ratio_tolerance: BasisPoints::new(tol),
        }
    }

    fn burn_op(shares: u128) -> Operation {
        Operation::Burn {
            shares: Liquidity::new(shares),
        }
    }

    // -- bootstrap ----------------------------------------------------------------

    #[test]
    fn constant_product_bootstrap_mints_geometric_mean() {
        let Ok(t) = execute(&cp_pool(), &at(acct(1), 0), add_op(4_000, 1_000, 0)) else {
            panic!("bootstrap");
        };
        assert_eq!(t.state.total_shares(), Liquidity::new(2_000));
        assert_eq!(t.state.shares_of(&acct(1)), Liquidity::new(2_000));
        assert_eq!(t.state.reserves(), &pair(4_000, 1_000));
        let Outcome::LiquidityAdded { bootstrap, .. } = t.outcome else {
            panic!("unexpected outcome");
        };
        assert!(bootstrap);
    }

    #[test]
    fn stable_bootstrap_mints_invariant() {
        let Ok(t) = execute(&stable_pool(100), &at(acct(1), 0), add_op(50_000, 50_000, 0)) else {
            panic!("bootstrap");
        };
        assert_eq!(t.state.total_shares(), Liquidity::new(100_000));
    }

    #[test]
    fn zero_side_rejected() {
        assert_eq!(
            execute(&cp_pool(), &at(acct(1), 0), add_op(1_000, 0, 0)),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn bootstrap_respects_limits() {
        let Ok(pool) = PoolState::from_config(&PoolConfig::constant_product()) else {
            panic!("valid config");
        };
        let Err(AmmError::AssetRatioOutOfBounds(_)) =
            execute(&pool, &at(acct(1), 0), add_op(999, 5_000, 0))
        else {
            panic!("expected AssetRatioOutOfBounds");
        };
    }

    // -- later deposits -----------------------------------------------------------

    #[test]
    fn proportional_deposit_has_no_residual() {
        let pool = seeded(&cp_pool(), acct(1), 1_000, 4_000);
        let Ok(t) = execute(&pool, &at(acct(2), 1), add_op(100, 400, 0)) else {
            panic!("deposit");
        };
        assert_eq!(t.state.shares_of(&acct(2)), Liquidity::new(200));
        assert_eq!(t.state.residual1(), Amount::ZERO);
        assert_eq!(t.state.residual2(), Amount::ZERO);
    }

    #[test]
    fn excess_side_goes_to_pool_residual() {
        let pool = seeded(&cp_pool(), acct(1), 1_000, 4_000);
        let Ok(t) = execute(&pool, &at(acct(2), 1), add_op(100, 500, 10_000)) else {
            panic!("deposit");
        };
        let Outcome::LiquidityAdded {
            deposited,
            residual,
            shares,
            ..
        } = t.outcome
        else {
            panic!("unexpected outcome");
        };
        assert_eq!(deposited, pair(100, 400));
        assert_eq!(residual, pair(0, 100));
        assert_eq!(shares, Liquidity::new(200));
        assert_eq!(t.state.residual2(), amt(100));
        assert_eq!(
            t.state
                .residuals()
                .owed(&acct(2), ResidualKind::Pool, Asset::Second),
            amt(100)
        );
        assert_eq!(t.state.reserves(), &pair(1_100, 4_400));
    }

    #[test]
    fn trimmed_side_rounds_up() {
        let pool = seeded(&cp_pool(), acct(1), 3_000, 1_000);
        // 10 of asset 1 pairs with ceil(10 / 3) = 4 of asset 2
        let Ok(t) = execute(&pool, &at(acct(2), 1), add_op(10, 5, 10_000)) else {
            panic!("deposit");
        };
        let Outcome::LiquidityAdded {
            deposited,
            residual,
            ..
        } = t.outcome
        else {
            panic!("unexpected outcome");
        };
        assert_eq!(deposited, pair(10, 4));
        assert_eq!(residual, pair(0, 1));
    }

    #[test]
    fn ratio_tolerance_enforced() {
        let pool = seeded(&cp_pool(), acct(1), 1_000, 1_000);
        // 2% off the pool ratio
        let Err(AmmError::SlippageExceeded { limit, actual }) =
            execute(&pool, &at(acct(2), 1), add_op(100, 102, 100))
        else {
            panic!("expected SlippageExceeded");
        };
        assert_eq!(limit, amt(100));
        assert_eq!(actual, amt(200));
        assert!(execute(&pool, &at(acct(2), 1), add_op(100, 102, 200)).is_ok());
    }

    #[test]
    fn deposit_too_small_for_a_share() {
        let mut pool = seeded(&cp_pool(), acct(1), 1_000, 1_000);
        // fees have grown the balances a thousandfold over the share supply
        pool.reserves = pair(1_000_000, 1_000_000);
        assert_eq!(
            execute(&pool, &at(acct(2), 1), add_op(999, 999, 0)),
            Err(AmmError::InsufficientLiquidity)
        );
        assert!(execute(&pool, &at(acct(2), 1), add_op(1_000, 1_000, 0)).is_ok());
    }

    // -- burn ---------------------------------------------------------------------

    #[test]
    fn burn_pays_pro_rata() {
        let pool = seeded(&cp_pool(), acct(1), 1_000, 4_000);
        let Ok(t) = execute(&pool, &at(acct(1), 1), burn_op(500)) else {
            panic!("burn");
        };
        let Outcome::LiquidityRemoved { withdrawn, .. } = t.outcome else {
            panic!("unexpected outcome");
        };
        assert_eq!(withdrawn, pair(250, 1_000));
        assert_eq!(t.state.reserves(), &pair(750, 3_000));
        assert_eq!(t.state.total_shares(), Liquidity::new(1_500));
    }

    #[test]
    fn burning_whole_supply_empties_pool() {
        let pool = seeded(&cp_pool(), acct(1), 1_001, 3_997);
        let total = pool.total_shares().get();
        let Ok(t) = execute(&pool, &at(acct(1), 1), burn_op(total)) else {
            panic!("burn");
        };
        let Outcome::LiquidityRemoved { withdrawn, .. } = t.outcome else {
            panic!("unexpected outcome");
        };
        assert_eq!(withdrawn, pair(1_001, 3_997));
        assert!(t.state.is_empty());

        // next deposit bootstraps again at its own ratio
        let Ok(again) = execute(&t.state, &at(acct(2), 2), add_op(500, 2_000, 0)) else {
            panic!("re-bootstrap");
        };
        assert_eq!(again.state.total_shares(), Liquidity::new(1_000));
        assert_eq!(again.state.phase(), PoolPhase::Active);
    }

    #[test]
    fn burn_checks_position_and_dust() {
        let pool = seeded(&cp_pool(), acct(1), 1_000, 1_000);
        assert_eq!(
            execute(&pool, &at(acct(9), 1), burn_op(1)),
            Err(AmmError::InsufficientLiquidity)
        );
        let Err(AmmError::InvalidQuantity(_)) = execute(&pool, &at(acct(1), 1), burn_op(0)) else {
            panic!("expected InvalidQuantity");
        };
        let skewed = seeded(&cp_pool(), acct(1), 1_000_000, 1);
        assert_eq!(
            execute(&skewed, &at(acct(1), 1), burn_op(1)),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn unbounded_limits_allow_small_pools() {
        let Ok(cfg) = PoolConfig::constant_product().with_limits(PoolLimits::unbounded()) else {
            panic!("valid config");
        };
        let Ok(pool) = PoolState::from_config(&cfg) else {
            panic!("valid config");
        };
        let lp = AccountId::from_bytes([4; 32]);
        assert!(execute(&pool, &at(lp, 0), add_op(10, 10, 0)).is_ok());
    }
}
