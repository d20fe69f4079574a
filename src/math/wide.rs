//! 256-bit unsigned integer for solver and ratio intermediates.
//!
//! Products of two `u128` balances, and the cubic terms inside the
//! StableSwap solver, do not fit in 128 bits. They are evaluated in
//! [`U256`] and narrowed back once the final quotient is known.

#![allow(clippy::manual_div_ceil, clippy::assign_op_pattern)]

use uint::construct_uint;

construct_uint! {
    /// Little-endian 256-bit unsigned integer (four 64-bit limbs).
    pub struct U256(4);
}

impl U256 {
    /// Narrows to `u128`, returning `None` if any high bit is set.
    #[must_use]
    pub fn fit_u128(self) -> Option<u128> {
        if self.bits() <= 128 {
            Some(self.low_u128())
        } else {
            None
        }
    }

    /// Absolute difference.
    #[must_use]
    pub fn distance(self, other: Self) -> Self {
        if self >= other {
            self - other
        } else {
            other - self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrowing_keeps_u128_range() {
        assert_eq!(U256::from(u128::MAX).fit_u128(), Some(u128::MAX));
        let wide = U256::from(u128::MAX) + U256::one();
        assert_eq!(wide.fit_u128(), None);
    }

    #[test]
    fn product_of_max_balances_fits() {
        let max = U256::from(u128::MAX);
        assert!(max.checked_mul(max).is_some());
    }

    #[test]
    fn distance_is_symmetric() {
        let a = U256::from(10u64);
        let b = U256::from(3u64);
        assert_eq!(a.distance(b), U256::from(7u64));
        assert_eq!(b.distance(a), U256::from(7u64));
    }
}
