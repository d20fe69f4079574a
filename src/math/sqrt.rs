//! Integer square root.

use super::wide::U256;

/// Floor square root of `a · b`, evaluated without overflowing.
///
/// The result always fits in `u128` because `a · b < 2^256`.
#[must_use]
pub fn isqrt_product(a: u128, b: u128) -> u128 {
    let n = U256::from(a) * U256::from(b);
    if n.is_zero() {
        return 0;
    }
    // Newton's method from an over-estimate converges monotonically down.
    let mut x = U256::one() << n.bits().div_ceil(2);
    loop {
        let y = (x + n / x) >> 1;
        if y >= x {
            break;
        }
        x = y;
    }
    x.low_u128()
}
