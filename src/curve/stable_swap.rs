//! StableSwap invariant solver for two assets.
//!
//! # Invariant (n = 2)
//!
//! ```text
//! A · n^n · (x + y) + D = A · n^n · D + D^(n+1) / (n^n · x · y)
//! ```
//!
//! `A` is carried as a fixed-point [`Amplification`] scaled by
//! [`AMP_PRECISION`], so every `A · n^n` term below is divided back by the
//! precision. All intermediates are [`U256`]; only the converged result is
//! narrowed to `u128`.
//!
//! Both solvers start from an over-estimate and take at most
//! [`MAX_ITERATIONS`] Newton steps, stopping once consecutive iterates
//! differ by at most one base unit. A solved balance can therefore sit a
//! unit or two on the trader's side of the curve; [`raise_to_invariant`]
//! moves it back onto the pool's side.

use tracing::trace;

use crate::domain::{Amplification, AMP_PRECISION};
use crate::error::AmmError;
use crate::math::U256;

/// `n^n` for two assets.
const N_POW_N: u64 = 4;

/// Newton step budget for both solvers.
pub const MAX_ITERATIONS: u32 = 255;

/// Largest difference between consecutive iterates accepted as converged.
const CONVERGENCE_THRESHOLD: u64 = 1;

fn ann(amp: Amplification) -> U256 {
    U256::from(amp.get()) * U256::from(N_POW_N)
}

fn narrow(v: U256, what: &'static str) -> Result<u128, AmmError> {
    v.fit_u128().ok_or(AmmError::Overflow(what))
}

/// Computes the invariant `D` of balances `x`, `y` at amplification `amp`.
///
/// Iterates
///
/// ```text
/// D_P  = D^2 / 2x · D / 2y     (≈ D^3 / 4xy)
/// D'   = (Ann·S/PREC + 2·D_P) · D / ((Ann − PREC)·D/PREC + 3·D_P)
/// ```
///
/// from `D = x + y`. Balanced reserves yield exactly `2x`. The result does
/// not depend on argument order.
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if exactly one balance is zero.
/// - [`AmmError::InvalidConfiguration`] if `amp` is below
///   [`Amplification::MIN`].
/// - [`AmmError::ConvergenceFailure`] if the step budget is exhausted.
/// - [`AmmError::Overflow`] if `D` does not fit in `u128`.
pub fn compute_d(x: u128, y: u128, amp: Amplification) -> Result<u128, AmmError> {
    compute_d_within(x, y, amp, MAX_ITERATIONS)
}

pub(crate) fn compute_d_within(
    x: u128,
    y: u128,
    amp: Amplification,
    budget: u32,
) -> Result<u128, AmmError> {
    // the two truncating divisions below are taken smaller side first
    let (x, y) = if x <= y { (x, y) } else { (y, x) };
    if x == 0 && y == 0 {
        return Ok(0);
    }
    if x == 0 || y == 0 {
        return Err(AmmError::ZeroReserve);
    }

    let prec = U256::from(AMP_PRECISION);
    let ann = ann(amp);
    let ann_minus_prec = ann
        .checked_sub(prec)
        .ok_or(AmmError::InvalidConfiguration("amplification below minimum"))?;

    let s = U256::from(x) + U256::from(y);
    let ann_s = ann * s / prec;
    let two_x = U256::from(x) * U256::from(2u8);
    let two_y = U256::from(y) * U256::from(2u8);

    let mut d = s;
    for i in 0..budget {
        let d_prev = d;
        // D^3 / 4xy in two steps so D^3 itself is never formed
        let d_p = d
            .checked_mul(d)
            .ok_or(AmmError::Overflow("D: D^2 overflow"))?
            / two_x;
        let d_p = d_p
            .checked_mul(d)
            .ok_or(AmmError::Overflow("D: D_P overflow"))?
            / two_y;

        let numerator = d_p
            .checked_mul(U256::from(2u8))
            .and_then(|v| v.checked_add(ann_s))
            .and_then(|v| v.checked_mul(d))
            .ok_or(AmmError::Overflow("D: numerator overflow"))?;
        let denominator = ann_minus_prec
            .checked_mul(d)
            .map(|v| v / prec)
            .and_then(|v| d_p.checked_mul(U256::from(3u8))?.checked_add(v))
            .ok_or(AmmError::Overflow("D: denominator overflow"))?;
        if denominator.is_zero() {
            return Err(AmmError::DivisionByZero);
        }

        d = numerator / denominator;

        if d.distance(d_prev) <= U256::from(CONVERGENCE_THRESHOLD) {
            trace!(iterations = i + 1, "D converged");
            return narrow(d, "D does not fit in u128");
        }
    }

    Err(AmmError::ConvergenceFailure(
        "D did not converge within the step budget",
    ))
}

/// Solves for the balance of the other asset once one side is pinned at
/// `known_balance`, holding the invariant at `d`.
///
/// Iterates `y' = (y² + c) / (2y + b − D)` from `y = D`, where
///
/// ```text
/// b = S + D · PREC / Ann
/// c = D^2 / 2S · D · PREC / 2Ann   (≈ D^3 · PREC / (S · Ann · n^n))
/// ```
///
/// and `S = known_balance`.
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if `known_balance` is zero.
/// - [`AmmError::ConvergenceFailure`] if the step budget is exhausted or
///   the iteration leaves the positive domain.
/// - [`AmmError::Overflow`] if the result does not fit in `u128`.
pub fn compute_other_balance(
    known_balance: u128,
    d: u128,
    amp: Amplification,
) -> Result<u128, AmmError> {
    compute_other_balance_within(known_balance, d, amp, MAX_ITERATIONS)
}

pub(crate) fn compute_other_balance_within(
    known_balance: u128,
    d: u128,
    amp: Amplification,
    budget: u32,
) -> Result<u128, AmmError> {
    if known_balance == 0 {
        return Err(AmmError::ZeroReserve);
    }
    let ann = ann(amp);
    if ann.is_zero() {
        return Err(AmmError::InvalidConfiguration("amplification is zero"));
    }

    let prec = U256::from(AMP_PRECISION);
    let s = U256::from(known_balance);
    let d = U256::from(d);

    let b = s + d * prec / ann;
    let c = d
        .checked_mul(d)
        .ok_or(AmmError::Overflow("y: D^2 overflow"))?
        / (s * U256::from(2u8));
    let c = c
        .checked_mul(d)
        .and_then(|v| v.checked_mul(prec))
        .ok_or(AmmError::Overflow("y: c overflow"))?
        / (ann * U256::from(2u8));

    let mut y = d;
    for i in 0..budget {
        let y_prev = y;
        let numerator = y
            .checked_mul(y)
            .and_then(|v| v.checked_add(c))
            .ok_or(AmmError::Overflow("y: numerator overflow"))?;
        let denominator = (y * U256::from(2u8) + b)
            .checked_sub(d)
            .filter(|v| !v.is_zero())
            .ok_or(AmmError::ConvergenceFailure("y: iteration left the domain"))?;

        y = numerator / denominator;

        if y.distance(y_prev) <= U256::from(CONVERGENCE_THRESHOLD) {
            trace!(iterations = i + 1, "y converged");
            return narrow(y, "y does not fit in u128");
        }
    }

    Err(AmmError::ConvergenceFailure(
        "y did not converge within the step budget",
    ))
}

/// Smallest balance `y >= start` such that `compute_d(known_balance, y)`
/// is at least `d`.
///
/// Swap legs start from the solver's answer plus one unit and call this so
/// the pool's post-trade invariant, evaluated by the same [`compute_d`],
/// never comes out below the pre-trade one. The search gallops upward from
/// `start` and then bisects, so a deficit of `k` units costs about
/// `2 · log2(k)` evaluations of `D`.
///
/// # Errors
///
/// - [`AmmError::Overflow`] if no balance up to `u128::MAX` is enough.
/// - Any [`compute_d`] error.
pub fn raise_to_invariant(
    known_balance: u128,
    start: u128,
    d: u128,
    amp: Amplification,
) -> Result<u128, AmmError> {
    let holds = |y: u128| compute_d(known_balance, y, amp).map(|v| v >= d);
    if holds(start)? {
        return Ok(start);
    }
    let overflow = || AmmError::Overflow("raised balance overflow");

    let mut below = start;
    let mut step: u128 = 1;
    let mut above = loop {
        let candidate = start.checked_add(step).ok_or_else(overflow)?;
        if holds(candidate)? {
            break candidate;
        }
        below = candidate;
        step = step.checked_mul(2).ok_or_else(overflow)?;
    };
    while above - below > 1 {
        let mid = below + (above - below) / 2;
        if holds(mid)? {
            above = mid;
        } else {
            below = mid;
        }
    }
    trace!(raised_by = above - start, "balance raised onto the invariant");
    Ok(above)
}
