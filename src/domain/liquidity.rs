//! Pool share quantities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Liquidity shares: a claim on a pro-rata slice of both pool balances.
///
/// Kept distinct from [`Amount`](super::Amount) so a share count can never
/// be passed where an asset quantity is expected.
///
/// # Examples
///
/// ```
/// use tandem_amm::domain::Liquidity;
///
/// let minted = Liquidity::new(1_000);
/// assert_eq!(minted.checked_sub(&Liquidity::new(400)), Some(Liquidity::new(600)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Liquidity(u128);

impl Liquidity {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw share count.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw share count.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shares", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Liquidity::new(700);
        assert_eq!(a.checked_add(&Liquidity::new(300)), Some(Liquidity::new(1_000)));
        assert_eq!(a.checked_sub(&Liquidity::new(701)), None);
        assert_eq!(Liquidity::new(u128::MAX).checked_add(&Liquidity::new(1)), None);
    }

    #[test]
    fn zero() {
        assert!(Liquidity::ZERO.is_zero());
        assert_eq!(Liquidity::default(), Liquidity::ZERO);
    }

    #[test]
    fn display() {
        assert_eq!(Liquidity::new(42).to_string(), "42 shares");
    }
}
