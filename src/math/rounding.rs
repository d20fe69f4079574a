//! Widened `a · b / c` with an explicit rounding direction.
//!
//! # Convention
//!
//! Rounding always favours the pool:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Amount paid out | [`Rounding::Down`] |
//! | Amount paid in | [`Rounding::Up`] |
//! | Fee | [`Rounding::Up`] |
//! | Shares minted | [`Rounding::Down`] |
//!
//! # Examples
//!
//! ```
//! use tandem_amm::domain::Rounding;
//! use tandem_amm::math::mul_div;
//!
//! assert_eq!(mul_div(10, 1, 3, Rounding::Up), Some(4));
//! assert_eq!(mul_div(u128::MAX, 2, 4, Rounding::Down), Some(u128::MAX / 2));
//! ```

use super::wide::U256;
use crate::domain::Rounding;

/// `a · b / c` with a 256-bit intermediate product.
///
/// Returns `None` if `c` is zero or the quotient does not fit in `u128`.
#[must_use]
pub fn mul_div(a: u128, b: u128, c: u128, rounding: Rounding) -> Option<u128> {
    if c == 0 {
        return None;
    }
    let product = U256::from(a) * U256::from(b);
    let divisor = U256::from(c);
    let (mut q, r) = product.div_mod(divisor);
    if rounding.is_up() && !r.is_zero() {
        q = q + U256::one();
    }
    q.fit_u128()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_wide_intermediate() {
        let Some(v) = mul_div(u128::MAX, u128::MAX, u128::MAX, Rounding::Down) else {
            panic!("expected value");
        };
        assert_eq!(v, u128::MAX);
    }

    #[test]
    fn mul_div_rounding() {
        assert_eq!(mul_div(1_000, 1_000, 1_099, Rounding::Down), Some(909));
        assert_eq!(mul_div(1_000, 1_000, 1_099, Rounding::Up), Some(910));
    }

    #[test]
    fn exact_quotient_ignores_direction() {
        assert_eq!(mul_div(10, 1, 5, Rounding::Down), Some(2));
        assert_eq!(mul_div(10, 1, 5, Rounding::Up), Some(2));
    }

    #[test]
    fn max_quotient_rounds_up_without_overflow() {
        assert_eq!(mul_div(u128::MAX, 1, 2, Rounding::Up), Some(u128::MAX / 2 + 1));
        assert_eq!(mul_div(u128::MAX, 1, 1, Rounding::Up), Some(u128::MAX));
    }

    #[test]
    fn mul_div_quotient_overflow() {
        assert_eq!(mul_div(u128::MAX, 2, 1, Rounding::Down), None);
    }

    #[test]
    fn mul_div_zero_divisor() {
        assert_eq!(mul_div(1, 1, 0, Rounding::Up), None);
    }
}
