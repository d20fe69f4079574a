//! Property-based tests for the pool operations.
//!
//! 1. **Constant-product invariant**: `r1 · r2` never decreases across a swap.
//! 2. **StableSwap invariant**: `D` never decreases across an exact-in or
//!    exact-out swap, including when the whole fee goes to the protocol.
//! 3. **Balanced invariant**: `D(x, x, A) == 2x` for any amplification.
//! 4. **Amplification ramp**: endpoints exact, monotone in between.
//! 5. **Liquidity round trip**: burning freshly minted constant-product
//!    shares returns at most what was deposited.
//! 6. **Flash-loan settlement**: committed loans grow every balance by at
//!    least the fee; short repayments are rejected.
//!
//! Only the rejections a strategy can legitimately run into are skipped;
//! anything else fails the case.

use proptest::prelude::*;

use super::test_support::{acct, amt, at, cp_pool, pair, seeded, stable_pool_with_fees};
use super::{execute, Operation, Outcome, Transition};
use crate::curve::{stable_swap, AmplificationSchedule, PricingCurve};
use crate::domain::{Amplification, Asset, BasisPoints, Liquidity, SwapSpec, Timestamp};
use crate::error::AmmError;
use crate::math::U256;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Balances large enough for the default pool limits.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Whole amplification coefficients in [1, 400].
fn amplification_strategy() -> impl Strategy<Value = u64> {
    1u64..=400u64
}

/// Swap size as a fraction of the input balance, in basis points.
fn fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=5_000u128
}

fn asset_strategy() -> impl Strategy<Value = Asset> {
    prop_oneof![Just(Asset::First), Just(Asset::Second)]
}

/// Protocol share of the swap fee: the default or all of it.
fn reserve_factor_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![Just(1_750u32), Just(10_000u32)]
}

fn swap_op(asset_in: Asset, amount: u128) -> Option<Operation> {
    let spec = SwapSpec::exact_in(amt(amount), amt(0)).ok()?;
    Some(Operation::Swap { asset_in, spec })
}

fn buy_op(asset_in: Asset, amount_out: u128) -> Option<Operation> {
    let spec = SwapSpec::exact_out(amt(amount_out), amt(10u128.pow(30))).ok()?;
    Some(Operation::Swap { asset_in, spec })
}

/// Runs `op`, mapping the rejections a small or lopsided request may meet
/// to `None` and every other error to a failed case.
fn run(
    pool: &crate::state::PoolState,
    now: u64,
    op: Operation,
) -> Result<Option<Transition>, TestCaseError> {
    match execute(pool, &at(acct(2), now), op) {
        Ok(t) => Ok(Some(t)),
        Err(AmmError::InvalidQuantity(_) | AmmError::InsufficientLiquidity) => Ok(None),
        Err(e) => Err(TestCaseError::fail(format!("unexpected rejection: {e}"))),
    }
}

// ---------------------------------------------------------------------------
// Property 1-3: Invariants
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_constant_product_never_decreases(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        fraction in fraction_strategy(),
        asset_in in asset_strategy(),
    ) {
        let pool = seeded(&cp_pool(), acct(1), r1, r2);
        let amount = (pool.reserve(asset_in).get() * fraction / 10_000).max(1);
        let Some(op) = swap_op(asset_in, amount) else { return Ok(()); };
        let Some(t) = run(&pool, 1, op)? else { return Ok(()); };

        let k0 = U256::from(r1) * U256::from(r2);
        let k1 = U256::from(t.state.reserve1().get()) * U256::from(t.state.reserve2().get());
        prop_assert!(k1 >= k0, "k decreased: {} -> {}", k0, k1);
    }

    #[test]
    fn prop_stable_swap_d_never_decreases(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        a in amplification_strategy(),
        fraction in fraction_strategy(),
        asset_in in asset_strategy(),
        reserve_factor in reserve_factor_strategy(),
        exact_out in any::<bool>(),
    ) {
        let pool = seeded(&stable_pool_with_fees(a, 4, reserve_factor), acct(1), r1, r2);
        let op = if exact_out {
            let amount = (pool.reserve(asset_in.other()).get() * fraction / 10_000).max(1);
            buy_op(asset_in, amount)
        } else {
            let amount = (pool.reserve(asset_in).get() * fraction / 10_000).max(1);
            swap_op(asset_in, amount)
        };
        let Some(op) = op else { return Ok(()); };
        let Some(t) = run(&pool, 1, op)? else { return Ok(()); };

        let curve = PricingCurve::StableSwap(Amplification::from_integer(a));
        let (Ok(d0), Ok(d1)) = (curve.invariant(pool.reserves()), curve.invariant(t.state.reserves()))
        else {
            return Err(TestCaseError::fail("invariant did not converge"));
        };
        prop_assert!(d1 >= d0, "D decreased: {} -> {}", d0, d1);
    }

    #[test]
    fn prop_balanced_d_is_twice_the_balance(
        x in 1u128..=1_000_000_000_000_000_000u128,
        a in amplification_strategy(),
    ) {
        let d = stable_swap::compute_d(x, x, Amplification::from_integer(a));
        prop_assert_eq!(d, Ok(2 * x));
    }
}

// ---------------------------------------------------------------------------
// Property 4: Amplification ramp
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ramp_endpoints_and_monotonicity(
        from in amplification_strategy(),
        to in amplification_strategy(),
        start in 0u64..=1_000_000u64,
        duration in 1u64..=10_000_000u64,
        t_a in 0u64..=10_000_000u64,
        t_b in 0u64..=10_000_000u64,
    ) {
        let flat = AmplificationSchedule::constant(Amplification::from_integer(from));
        let end = start + duration;
        let Ok(ramp) = flat.ramp(
            Amplification::from_integer(to),
            Timestamp::new(end),
            Timestamp::new(start),
            0,
        ) else {
            return Err(TestCaseError::fail("valid ramp rejected"));
        };

        prop_assert_eq!(ramp.current(Timestamp::new(start)), Amplification::from_integer(from));
        prop_assert_eq!(ramp.current(Timestamp::new(end)), Amplification::from_integer(to));

        let (early, late) = if t_a <= t_b { (t_a, t_b) } else { (t_b, t_a) };
        let a_early = ramp.current(Timestamp::new(start + early)).get();
        let a_late = ramp.current(Timestamp::new(start + late)).get();
        if to >= from {
            prop_assert!(a_early <= a_late);
        } else {
            prop_assert!(a_early >= a_late);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5-6: Liquidity round trip and flash loans
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_add_then_burn_returns_at_most_deposit(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        d1 in reserve_strategy(),
        skew in 0u128..=500u128,
    ) {
        let pool = seeded(&cp_pool(), acct(1), r1, r2);
        // within 5% of the pool ratio, plus integer truncation on a side of >= 10 units
        let d2 = (d1 * r2 / r1 * (10_000 + skew) / 10_000).max(1);
        let add = Operation::AddLiquidity {
            deposit: pair(d1, d2),
            ratio_tolerance: BasisPoints::new(5_000),
        };
        let Some(added) = run(&pool, 1, add)? else { return Ok(()); };
        let Outcome::LiquidityAdded { shares, deposited, .. } = added.outcome else {
            return Err(TestCaseError::fail("unexpected outcome"));
        };

        let burn = Operation::Burn { shares };
        let Some(burned) = run(&added.state, 2, burn)? else { return Ok(()); };
        let Outcome::LiquidityRemoved { withdrawn, .. } = burned.outcome else {
            return Err(TestCaseError::fail("unexpected outcome"));
        };
        prop_assert!(withdrawn.first <= deposited.first);
        prop_assert!(withdrawn.second <= deposited.second);
        prop_assert_eq!(burned.state.shares_of(&acct(2)), Liquidity::ZERO);
    }

    #[test]
    fn prop_flash_loan_grows_balances(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        borrow_bps in 0u128..=1_000u128,
        extra in 0u128..=100u128,
        short in any::<bool>(),
    ) {
        let pool = seeded(&cp_pool(), acct(1), r1, r2);
        let borrowed = pair(r1 * borrow_bps / 10_000, r2 * borrow_bps / 10_000);
        if borrowed.first.is_zero() && borrowed.second.is_zero() {
            return Ok(());
        }
        let Ok(fees) = super::flash_loan_fees(&pool, &borrowed) else {
            return Err(TestCaseError::fail("loan within cap rejected"));
        };
        let owed = |asset: Asset| borrowed.get(asset).get() + fees.get(asset).get();
        let repayment = if short {
            pair(owed(Asset::First).saturating_sub(1), owed(Asset::Second))
        } else {
            pair(owed(Asset::First) + extra, owed(Asset::Second))
        };
        let op = Operation::FlashLoan { amounts: borrowed, repayment };
        let result = execute(&pool, &at(acct(2), 1), op);

        if short && owed(Asset::First) > 0 {
            prop_assert!(result.is_err());
        } else {
            let Ok(t) = result else {
                return Err(TestCaseError::fail("repaid loan rejected"));
            };
            for asset in Asset::BOTH {
                prop_assert!(
                    t.state.reserve(asset).get() >= pool.reserve(asset).get() + fees.get(asset).get()
                );
            }
        }
    }
}
