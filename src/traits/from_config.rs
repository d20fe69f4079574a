//! Construction from a validated configuration.
//!
//! [`FromConfig`] is the single entry point for building state from a
//! blueprint. Implementations validate the configuration first, so a value
//! obtained through this trait always starts in a consistent state.
//!
//! ```text
//! PoolConfig ──validate──▶ PoolState::from_config ──▶ Uninitialized pool
//! ```

use crate::error::AmmError;

/// Builds `Self` from a configuration of type `C`.
pub trait FromConfig<C> {
    /// Validates `config` and builds the initial value.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidConfiguration`], [`AmmError::InvalidFee`] or a
    /// more specific variant if `config` is inconsistent.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
