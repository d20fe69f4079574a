//! Unified error types for the tandem AMM engine.
//!
//! Every fallible operation in the crate returns [`AmmError`]. A failed
//! pool operation never leaves a partially updated state behind: handlers
//! work on a copy of the pool and only hand it back on success.

use thiserror::Error;

use crate::domain::Amount;

/// Errors produced by the pricing, liquidity and administration paths.
///
/// Variants carrying a `&'static str` name the computation that failed so
/// log lines stay greppable without allocating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// A deposit, burn, swap or loan cannot be satisfied by the pool's
    /// balances or by the caller's position.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The computed amount violates the caller-supplied bound.
    #[error("slippage exceeded: limit {limit}, actual {actual}")]
    SlippageExceeded {
        /// Bound supplied by the caller.
        limit: Amount,
        /// Amount the pool would have produced or required.
        actual: Amount,
    },

    /// An iterative invariant solver did not settle within its step budget.
    #[error("convergence failure: {0}")]
    ConvergenceFailure(&'static str),

    /// A post-condition on the pool invariant or a flash-loan repayment
    /// did not hold.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// An amplification ramp was requested with an out-of-range target or
    /// deadline.
    #[error("invalid amplification window: {0}")]
    InvalidAmplificationWindow(&'static str),

    /// A balance the pricing formula divides by is zero.
    #[error("zero reserve")]
    ZeroReserve,

    /// The caller is not permitted to perform the administrative action.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    /// A request carried a zero or otherwise unusable quantity.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// A fee expressed in basis points is outside its allowed range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A pool configuration is internally inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// The resulting balances fall below the pool minimum or exceed the
    /// allowed asset ratio.
    #[error("asset ratio out of bounds: {0}")]
    AssetRatioOutOfBounds(&'static str),

    /// Checked arithmetic overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Checked arithmetic underflowed.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;
