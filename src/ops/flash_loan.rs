//! Flash loans.
//!
//! A loan and its repayment happen in one atomic group. The host reports
//! the repayment it observed; the pool commits only if every balance ends
//! at least `fee` above where it started. [`flash_loan_with`] runs the
//! borrower as a closure for hosts that simulate the whole group in
//! process.

use tracing::{debug, trace};

use super::{execute, Context, Operation, Outcome, Transition};
use crate::domain::{Amount, Asset, PerAsset, Rounding};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::state::{PoolState, ResidualKind};

/// Fees owed on a loan of `amounts`.
///
/// # Errors
///
/// - [`AmmError::InvalidQuantity`] if nothing is borrowed.
/// - [`AmmError::ZeroReserve`] on an empty pool.
/// - [`AmmError::InsufficientLiquidity`] if an amount exceeds the pool's
///   flash-loan cap for that asset.
pub fn flash_loan_fees(
    state: &PoolState,
    amounts: &PerAsset<Amount>,
) -> Result<PerAsset<Amount>, AmmError> {
    if amounts.first.is_zero() && amounts.second.is_zero() {
        return Err(AmmError::InvalidQuantity("flash loan borrows nothing"));
    }
    let mut fees = PerAsset::<Amount>::default();
    for asset in Asset::BOTH {
        let reserve = state.reserve(asset);
        if reserve.is_zero() {
            return Err(AmmError::ZeroReserve);
        }
        let amount = *amounts.get(asset);
        let cap = state.fees.max_flash_loan_ratio.apply(reserve, Rounding::Down)?;
        if amount > cap {
            return Err(AmmError::InsufficientLiquidity);
        }
        *fees.get_mut(asset) = state.fees.flash_loan_fee.apply(amount, Rounding::Up)?;
    }
    Ok(fees)
}

/// Checks the repayment and books fees and over-repayment.
pub(super) fn settle(
    state: &mut PoolState,
    ctx: &Context<'_>,
    amounts: PerAsset<Amount>,
    repayment: PerAsset<Amount>,
) -> Result<Outcome, AmmError> {
    let fees = flash_loan_fees(state, &amounts)?;
    let mut residual = PerAsset::<Amount>::default();
    for asset in Asset::BOTH {
        let reserve = state.reserve(asset);
        let fee = *fees.get(asset);
        let required = reserve.safe_add(&fee)?;
        // reserve − amount + repayment, without going below zero on the way
        let returned = reserve
            .safe_sub(amounts.get(asset))?
            .safe_add(repayment.get(asset))?;
        if returned < required {
            return Err(AmmError::InvariantViolation("flash loan not repaid with fee"));
        }
        *residual.get_mut(asset) = returned.safe_sub(&required)?;
        *state.reserves.get_mut(asset) = required;
        state.stats.record_flash_fee(asset, fee);
    }
    state.limits.check(&state.reserves)?;
    for asset in Asset::BOTH {
        state
            .residuals
            .accrue(ctx.caller, ResidualKind::Swap, asset, *residual.get(asset))?;
    }
    trace!(
        fee1 = %fees.first,
        fee2 = %fees.second,
        "flash loan repaid"
    );
    Ok(Outcome::FlashLoanSettled {
        borrowed: amounts,
        fees,
        residual,
    })
}

/// Lends `amounts` to `borrower` and settles whatever it returns.
///
/// The borrower receives the borrowed amounts and the fees owed and
/// returns its repayment per asset. Nothing is committed unless that
/// repayment covers principal plus fee.
///
/// # Errors
///
/// Errors from [`flash_loan_fees`] before the borrower runs, and from
/// settlement after it returns.
///
/// # Examples
///
/// ```
/// use tandem_amm::prelude::*;
///
/// let Ok(config) = PoolConfig::constant_product().with_limits(PoolLimits::unbounded()) else {
///     panic!()
/// };
/// let Ok(pool) = PoolState::from_config(&config) else { panic!() };
/// let ctx = Context::new(AccountId::from_bytes([1; 32]), Timestamp::new(0));
/// let seed = Operation::AddLiquidity {
///     deposit: PerAsset::new(Amount::new(100_000), Amount::new(100_000)),
///     ratio_tolerance: BasisPoints::ZERO,
/// };
/// let Ok(t) = execute(&pool, &ctx, seed) else { panic!() };
///
/// let borrowed = PerAsset::new(Amount::new(5_000), Amount::ZERO);
/// let repay_in_full = |loan: PerAsset<Amount>, fees: PerAsset<Amount>| {
///     PerAsset::new(
///         Amount::new(loan.first.get() + fees.first.get()),
///         Amount::ZERO,
///     )
/// };
/// let Ok(after) = flash_loan_with(&t.state, &ctx, borrowed, repay_in_full) else { panic!() };
/// assert_eq!(after.state.reserve1(), Amount::new(100_005));
/// ```
pub fn flash_loan_with<F>(
    state: &PoolState,
    ctx: &Context<'_>,
    amounts: PerAsset<Amount>,
    borrower: F,
) -> Result<Transition, AmmError>
where
    F: FnOnce(PerAsset<Amount>, PerAsset<Amount>) -> PerAsset<Amount>,
{
    let fees = flash_loan_fees(state, &amounts)?;
    let repayment = borrower(amounts, fees);
    debug!(
        borrowed1 = %amounts.first,
        borrowed2 = %amounts.second,
        repaid1 = %repayment.first,
        repaid2 = %repayment.second,
        "borrower returned"
    );
    execute(state, ctx, Operation::FlashLoan { amounts, repayment })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn loan(a: u128, b: u128, r1: u128, r2: u128) -> Operation {
        Operation::FlashLoan {
            amounts: pair(a, b),
            repayment: pair(r1, r2),
        }
    }

    #[test]
    fn exact_repayment_commits_fee() {
        let pool = seeded(&cp_pool(), acct(1), 100_000, 100_000);
        // 10 bp on 10_000 = 10
        let Ok(t) = execute(&pool, &at(acct(2), 5), loan(10_000, 0, 10_010, 0)) else {
            panic!("flash loan");
        };
        assert_eq!(t.state.reserves(), &pair(100_010, 100_000));
        let Outcome::FlashLoanSettled { fees, residual, .. } = t.outcome else {
            panic!("unexpected outcome");
        };
        assert_eq!(fees, pair(10, 0));
        assert_eq!(residual, pair(0, 0));
        assert_eq!(t.state.protocol_fees(), &pair(0, 0));
        assert_eq!(t.state.stats().lp_fees.first, 10);
    }

    #[test]
    fn fee_rounds_up() {
        let pool = seeded(&cp_pool(), acct(1), 100_000, 100_000);
        let Ok(t) = execute(&pool, &at(acct(2), 5), loan(1, 0, 2, 0)) else {
            panic!("flash loan");
        };
        assert_eq!(t.state.reserve1(), amt(100_001));
    }

    #[test]
    fn short_repayment_commits_nothing() {
        let pool = seeded(&cp_pool(), acct(1), 100_000, 100_000);
        let Err(AmmError::InvariantViolation(_)) =
            execute(&pool, &at(acct(2), 5), loan(10_000, 0, 10_009, 0))
        else {
            panic!("expected InvariantViolation");
        };
    }

    #[test]
    fn over_repayment_goes_to_swap_residual() {
        let pool = seeded(&cp_pool(), acct(1), 100_000, 100_000);
        let Ok(t) = execute(&pool, &at(acct(2), 5), loan(10_000, 5_000, 10_015, 5_005)) else {
            panic!("flash loan");
        };
        assert_eq!(t.state.reserves(), &pair(100_010, 100_005));
        assert_eq!(
            t.state
                .residuals()
                .owed(&acct(2), ResidualKind::Swap, Asset::First),
            amt(5)
        );
        assert_eq!(t.state.residual2(), Amount::ZERO);
    }

    #[test]
    fn loan_above_cap_rejected() {
        let pool = seeded(&cp_pool(), acct(1), 100_000, 100_000);
        // default cap is 10% of the balance
        assert_eq!(
            execute(&pool, &at(acct(2), 5), loan(0, 10_001, 0, 20_000)),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn nothing_borrowed_or_empty_pool() {
        let pool = seeded(&cp_pool(), acct(1), 100_000, 100_000);
        let Err(AmmError::InvalidQuantity(_)) = execute(&pool, &at(acct(2), 5), loan(0, 0, 0, 0))
        else {
            panic!("expected InvalidQuantity");
        };
        assert_eq!(
            execute(&cp_pool(), &at(acct(2), 5), loan(1, 0, 2, 0)),
            Err(AmmError::ZeroReserve)
        );
    }

    #[test]
    fn closure_borrower_that_defaults() {
        let pool = seeded(&cp_pool(), acct(1), 100_000, 100_000);
        let result = flash_loan_with(&pool, &at(acct(2), 5), pair(1_000, 0), |loan, _| loan);
        let Err(AmmError::InvariantViolation(_)) = result else {
            panic!("expected InvariantViolation");
        };
    }

    #[test]
    fn closure_sees_fees() {
        let pool = seeded(&cp_pool(), acct(1), 100_000, 100_000);
        let mut seen = PerAsset::<Amount>::default();
        let result = flash_loan_with(&pool, &at(acct(2), 5), pair(2_000, 3_000), |loan, fees| {
            seen = fees;
            PerAsset::new(
                Amount::new(loan.first.get() + fees.first.get()),
                Amount::new(loan.second.get() + fees.second.get()),
            )
        });
        assert!(result.is_ok());
        assert_eq!(seen, pair(2, 3));
    }
}
