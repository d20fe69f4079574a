//! Constant-product (`x · y = k`) closed forms.
//!
//! Every division rounds so that `k` never decreases: the balance the pool
//! keeps is rounded up, the amount it releases is rounded down.

use crate::domain::{Amount, Rounding};
use crate::error::AmmError;
use crate::math::{mul_div, U256};

/// `k = x · y`, widened so it cannot overflow.
#[must_use]
pub fn invariant(x: Amount, y: Amount) -> U256 {
    U256::from(x.get()) * U256::from(y.get())
}

/// Output released for a fee-free input of `net_in`.
///
/// `reserve_out − ceil(reserve_in · reserve_out / (reserve_in + net_in))`
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if either reserve is zero.
/// - [`AmmError::Overflow`] if `reserve_in + net_in` overflows.
pub fn amount_out(
    reserve_in: Amount,
    reserve_out: Amount,
    net_in: Amount,
) -> Result<Amount, AmmError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::ZeroReserve);
    }
    let new_in = reserve_in
        .checked_add(&net_in)
        .ok_or(AmmError::Overflow("reserve_in + net_in overflow"))?;
    let new_out = mul_div(reserve_in.get(), reserve_out.get(), new_in.get(), Rounding::Up)
        .ok_or(AmmError::Overflow("constant product quotient overflow"))?;
    // new_in >= reserve_in, so new_out <= reserve_out
    Ok(Amount::new(reserve_out.get() - new_out))
}

/// Fee-free input the pool must receive to release exactly `out`.
///
/// `ceil(reserve_in · out / (reserve_out − out))`
///
/// # Errors
///
/// - [`AmmError::ZeroReserve`] if either reserve is zero.
/// - [`AmmError::InsufficientLiquidity`] if `out >= reserve_out`.
/// - [`AmmError::Overflow`] if the required input exceeds `u128::MAX`.
pub fn amount_in(
    reserve_in: Amount,
    reserve_out: Amount,
    out: Amount,
) -> Result<Amount, AmmError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::ZeroReserve);
    }
    if out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    let remaining = reserve_out.get() - out.get();
    mul_div(reserve_in.get(), out.get(), remaining, Rounding::Up)
        .map(Amount::new)
        .ok_or(AmmError::Overflow("required input overflow"))
}
