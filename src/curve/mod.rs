//! Pricing curves and the amplification schedule.
//!
//! [`PricingCurve`] is resolved once per operation from the pool's
//! [`PricingMode`] and the amplification in effect at the operation's
//! timestamp. It dispatches by `match` to the closed forms in
//! [`constant_product`] or the Newton solvers in [`stable_swap`].
//!
//! | Mode | Invariant | Bootstrap shares | Later shares |
//! |------|-----------|------------------|--------------|
//! | Constant product | `x · y` | `√(a1 · a2)` | `min(aᵢ · L / rᵢ)` |
//! | StableSwap | `D(x, y, A)` | `D(a1, a2, A)` | `L · (D1 − D0) / D0` |

mod amplification;
pub mod constant_product;
pub mod stable_swap;

pub use amplification::AmplificationSchedule;

use crate::domain::{
    Amount, Amplification, BasisPoints, Liquidity, PerAsset, PricingMode, Rounding, SwapSpec,
    Timestamp,
};
use crate::error::AmmError;
use crate::math::{isqrt_product, CheckedArithmetic, U256};

/// Amounts a swap moves, before the protocol's share of the fee is split off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    /// Input the pool keeps, fee included.
    pub amount_in: Amount,
    /// Output released to the trader.
    pub amount_out: Amount,
    /// Part of `amount_in` charged as fee.
    pub fee: Amount,
}

/// A pricing curve with its parameters fixed for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingCurve {
    /// `x · y = k`.
    ConstantProduct,
    /// StableSwap at the given effective amplification.
    StableSwap(Amplification),
}

impl PricingCurve {
    /// Resolves the curve for `mode` at time `now`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidConfiguration`] if a StableSwap pool has no
    /// amplification schedule.
    pub fn resolve(
        mode: PricingMode,
        schedule: Option<&AmplificationSchedule>,
        now: Timestamp,
    ) -> Result<Self, AmmError> {
        match (mode, schedule) {
            (PricingMode::ConstantProduct, _) => Ok(Self::ConstantProduct),
            (PricingMode::StableSwap, Some(s)) => Ok(Self::StableSwap(s.current(now))),
            (PricingMode::StableSwap, None) => Err(AmmError::InvalidConfiguration(
                "stableswap pool needs an amplification",
            )),
        }
    }

    /// Invariant of the given balances: `x · y` or `D`.
    ///
    /// # Errors
    ///
    /// Propagates solver errors for StableSwap.
    pub fn invariant(&self, reserves: &PerAsset<Amount>) -> Result<U256, AmmError> {
        match self {
            Self::ConstantProduct => Ok(constant_product::invariant(reserves.first, reserves.second)),
            Self::StableSwap(amp) => {
                stable_swap::compute_d(reserves.first.get(), reserves.second.get(), *amp)
                    .map(U256::from)
            }
        }
    }

    /// Output released for a fee-free input of `net_in`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidity`] if the curve leaves nothing to
    /// release, plus any solver or overflow error.
    pub fn amount_out(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        net_in: Amount,
    ) -> Result<Amount, AmmError> {
        match self {
            Self::ConstantProduct => constant_product::amount_out(reserve_in, reserve_out, net_in),
            Self::StableSwap(amp) => {
                let d = stable_swap::compute_d(reserve_in.get(), reserve_out.get(), *amp)?;
                let new_in = reserve_in
                    .checked_add(&net_in)
                    .ok_or(AmmError::Overflow("reserve_in + net_in overflow"))?;
                let solved = stable_swap::compute_other_balance(new_in.get(), d, *amp)?;
                let start = solved
                    .checked_add(1)
                    .ok_or(AmmError::Overflow("solved balance overflow"))?;
                let new_out = stable_swap::raise_to_invariant(new_in.get(), start, d, *amp)?;
                reserve_out
                    .get()
                    .checked_sub(new_out)
                    .map(Amount::new)
                    .ok_or(AmmError::InsufficientLiquidity)
            }
        }
    }

    /// Fee-free input required to release exactly `out`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidity`] if `out` would drain the output
    /// side, plus any solver or overflow error.
    pub fn amount_in(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        out: Amount,
    ) -> Result<Amount, AmmError> {
        match self {
            Self::ConstantProduct => constant_product::amount_in(reserve_in, reserve_out, out),
            Self::StableSwap(amp) => {
                if out >= reserve_out {
                    return Err(AmmError::InsufficientLiquidity);
                }
                let d = stable_swap::compute_d(reserve_in.get(), reserve_out.get(), *amp)?;
                let new_out = reserve_out.get() - out.get();
                let solved = stable_swap::compute_other_balance(new_out, d, *amp)?;
                let start = solved
                    .checked_add(1)
                    .ok_or(AmmError::Overflow("solved balance overflow"))?;
                let new_in = stable_swap::raise_to_invariant(new_out, start, d, *amp)?;
                Ok(Amount::new(new_in.saturating_sub(reserve_in.get()).max(1)))
            }
        }
    }

    /// Prices a swap request against the given reserves with `fee` charged
    /// on the input side.
    ///
    /// Exact-in: `fee = ceil(amount_in · fee / 10_000)`, the remainder is
    /// priced on the curve. Exact-out: the curve input is grossed up so that
    /// the same fee rule applied to the result still covers it.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if the input is entirely consumed by
    ///   the fee.
    /// - [`AmmError::InsufficientLiquidity`] if the output rounds to zero or
    ///   would drain the pool.
    /// - [`AmmError::SlippageExceeded`] if the caller's bound is violated.
    pub fn quote(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        spec: SwapSpec,
        fee: BasisPoints,
    ) -> Result<SwapQuote, AmmError> {
        match spec {
            SwapSpec::ExactIn {
                amount_in,
                min_amount_out,
            } => {
                let fee_amount = fee.apply(amount_in, Rounding::Up)?;
                let net = amount_in.saturating_sub(&fee_amount);
                if net.is_zero() {
                    return Err(AmmError::InvalidQuantity("input consumed by fee"));
                }
                let amount_out = self.amount_out(reserve_in, reserve_out, net)?;
                if amount_out.is_zero() {
                    return Err(AmmError::InsufficientLiquidity);
                }
                if amount_out < min_amount_out {
                    return Err(AmmError::SlippageExceeded {
                        limit: min_amount_out,
                        actual: amount_out,
                    });
                }
                Ok(SwapQuote {
                    amount_in,
                    amount_out,
                    fee: fee_amount,
                })
            }
            SwapSpec::ExactOut {
                amount_out,
                max_amount_in,
            } => {
                let required = self.amount_in(reserve_in, reserve_out, amount_out)?;
                let gross = fee.gross_up(required)?;
                if gross > max_amount_in {
                    return Err(AmmError::SlippageExceeded {
                        limit: max_amount_in,
                        actual: gross,
                    });
                }
                Ok(SwapQuote {
                    amount_in: gross,
                    amount_out,
                    fee: Amount::new(gross.get() - required.get()),
                })
            }
        }
    }

    /// Shares minted to the first depositor.
    ///
    /// # Errors
    ///
    /// Propagates solver errors for StableSwap.
    pub fn bootstrap_shares(&self, deposit: &PerAsset<Amount>) -> Result<Liquidity, AmmError> {
        let shares = match self {
            Self::ConstantProduct => isqrt_product(deposit.first.get(), deposit.second.get()),
            Self::StableSwap(amp) => {
                stable_swap::compute_d(deposit.first.get(), deposit.second.get(), *amp)?
            }
        };
        Ok(Liquidity::new(shares))
    }

    /// Shares minted for a ratio-adjusted deposit into a live pool.
    ///
    /// Rounded down in both modes.
    ///
    /// # Errors
    ///
    /// [`AmmError::ZeroReserve`] if a reserve is zero, plus solver and
    /// overflow errors.
    pub fn deposit_shares(
        &self,
        reserves: &PerAsset<Amount>,
        deposit: &PerAsset<Amount>,
        total_shares: Liquidity,
    ) -> Result<Liquidity, AmmError> {
        if reserves.first.is_zero() || reserves.second.is_zero() {
            return Err(AmmError::ZeroReserve);
        }
        let share = |part: u128, whole: u128| {
            total_shares.safe_mul_div(Liquidity::new(part), Liquidity::new(whole), Rounding::Down)
        };
        match self {
            Self::ConstantProduct => {
                let by_first = share(deposit.first.get(), reserves.first.get())?;
                let by_second = share(deposit.second.get(), reserves.second.get())?;
                Ok(by_first.min(by_second))
            }
            Self::StableSwap(amp) => {
                let d0 = stable_swap::compute_d(reserves.first.get(), reserves.second.get(), *amp)?;
                let after = PerAsset::new(
                    reserves
                        .first
                        .checked_add(&deposit.first)
                        .ok_or(AmmError::Overflow("reserve overflow"))?,
                    reserves
                        .second
                        .checked_add(&deposit.second)
                        .ok_or(AmmError::Overflow("reserve overflow"))?,
                );
                let d1 = stable_swap::compute_d(after.first.get(), after.second.get(), *amp)?;
                share(d1.saturating_sub(d0), d0)
            }
        }
    }
}
