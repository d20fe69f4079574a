//! Pricing curve selector.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which invariant prices the pool. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// `x · y = k`.
    ConstantProduct,
    /// Curve-style StableSwap with a time-ramped amplification coefficient.
    StableSwap,
}

impl PricingMode {
    /// Returns `true` for [`PricingMode::StableSwap`].
    #[must_use]
    pub const fn is_stable_swap(&self) -> bool {
        matches!(self, Self::StableSwap)
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstantProduct => f.write_str("constant-product"),
            Self::StableSwap => f.write_str("stableswap"),
        }
    }
}
