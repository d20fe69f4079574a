//! Declarative pool configuration.
//!
//! A [`PoolConfig`] fully describes a pool before its first deposit:
//! pricing mode, initial amplification, [`FeeSchedule`], [`PoolLimits`] and
//! the parameter update delay. Every type validates itself; the pool state
//! is built from a configuration through
//! [`FromConfig`](crate::traits::FromConfig).

mod fees;
mod limits;
mod pool_config;

pub use fees::{validate_swap_fee, FeeSchedule};
pub use limits::PoolLimits;
pub use pool_config::PoolConfig;
