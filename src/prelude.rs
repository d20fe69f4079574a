//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use tandem_amm::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{
    AccountId, Amount, Amplification, Asset, BasisPoints, Liquidity, PerAsset, PricingMode,
    Rounding, SwapSpec, Timestamp,
};

// Re-export core traits
pub use crate::traits::{AdminAction, Authority, FromConfig, SingleAdmin};

// Re-export math utilities
pub use crate::math::CheckedArithmetic;

// Re-export configuration
pub use crate::config::{FeeSchedule, PoolConfig, PoolLimits};

// Re-export state and operations
pub use crate::ops::{execute, flash_loan_with, AdminOp, Context, Operation, Outcome, Transition};
pub use crate::state::{PoolPhase, PoolState, ResidualKind};

// Re-export error types
pub use crate::error::{AmmError, Result};
