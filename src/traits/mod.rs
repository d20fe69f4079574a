//! Seams between the engine and its host.
//!
//! [`FromConfig`] builds pool state from a blueprint; [`Authority`] is the
//! capability predicate consulted by administrative operations.

mod authority;
mod from_config;

pub use authority::{AdminAction, Authority, DenyAll, SingleAdmin};
pub use from_config::FromConfig;
