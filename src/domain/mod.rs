//! Value types of the pool domain.
//!
//! Quantities ([`Amount`], [`Liquidity`]), percentages ([`BasisPoints`]),
//! the curve parameter ([`Amplification`]), identities ([`AccountId`]),
//! asset selection ([`Asset`], [`PerAsset`]), time ([`Timestamp`]) and swap
//! requests ([`SwapSpec`]). All are small `Copy` newtypes or enums with
//! checked arithmetic and serde support.

mod account_id;
mod amount;
mod amplification;
mod asset;
mod basis_points;
mod liquidity;
mod pricing_mode;
mod rounding;
mod swap_spec;
mod timestamp;

pub use account_id::AccountId;
pub use amount::Amount;
pub use amplification::{Amplification, AMP_PRECISION};
pub use asset::{Asset, PerAsset};
pub use basis_points::BasisPoints;
pub use liquidity::Liquidity;
pub use pricing_mode::PricingMode;
pub use rounding::Rounding;
pub use swap_spec::SwapSpec;
pub use timestamp::Timestamp;
