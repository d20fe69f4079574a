//! Integer arithmetic used by the pricing curves.
//!
//! Everything here is exact integer math: [`CheckedArithmetic`] for
//! overflow-safe newtype operations, [`mul_div`] for scaled division with
//! an explicit rounding direction, [`U256`] for wide
//! intermediates and [`isqrt_product`] for bootstrap share issuance.

mod checked;
mod rounding;
mod sqrt;
mod wide;

pub use checked::CheckedArithmetic;
pub use rounding::mul_div;
pub use sqrt::isqrt_product;
pub use wide::U256;
