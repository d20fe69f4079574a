//! # Tandem AMM
//!
//! Pricing and liquidity engine for a two-asset automated market maker.
//!
//! The crate keeps the state of one pool (two pricing balances, the share
//! supply, residuals owed to callers, protocol fees and cumulative
//! statistics) and computes every transition on it:
//!
//! - **Liquidity**: bootstrap, proportional deposits with residual
//!   accounting, pro-rata burns.
//! - **Swaps**: exact-in and exact-out on a constant-product (`x · y = k`)
//!   or StableSwap curve with a time-ramped amplification.
//! - **Flash loans**: capped, fee-bearing, settled within one atomic group.
//! - **Administration**: amplification ramps, delayed swap-fee changes,
//!   protocol parameters, protocol-fee withdrawal.
//!
//! The engine never moves funds. Each operation returns the successor
//! state and an [`Outcome`](ops::Outcome) listing the amounts the host has
//! to transfer.
//!
//! # Quick Start
//!
//! ```rust
//! use tandem_amm::prelude::*;
//!
//! // 1. Describe the pool and build its empty state
//! let config = PoolConfig::stable_swap(Amplification::from_integer(100)).expect("valid config");
//! let pool = PoolState::from_config(&config).expect("valid pool");
//!
//! // 2. Bootstrap with the first deposit
//! let lp = AccountId::from_bytes([1u8; 32]);
//! let ctx = Context::new(lp, Timestamp::new(1_700_000_000));
//! let deposit = Operation::AddLiquidity {
//!     deposit: PerAsset::new(Amount::new(1_000_000), Amount::new(1_000_000)),
//!     ratio_tolerance: BasisPoints::ZERO,
//! };
//! let pool = execute(&pool, &ctx, deposit).expect("bootstrap").state;
//! assert_eq!(pool.total_shares(), Liquidity::new(2_000_000));
//!
//! // 3. Swap 10 000 units of asset 1 for at least 9 900 of asset 2
//! let trader = AccountId::from_bytes([2u8; 32]);
//! let ctx = Context::new(trader, Timestamp::new(1_700_000_060));
//! let spec = SwapSpec::exact_in(Amount::new(10_000), Amount::new(9_900)).expect("non-zero");
//! let swap = Operation::Swap { asset_in: Asset::First, spec };
//! let transition = execute(&pool, &ctx, swap).expect("swap succeeded");
//!
//! let Outcome::Swapped { amount_out, .. } = transition.outcome else { unreachable!() };
//! assert!(amount_out.get() >= 9_900);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │    Host     │  supplies Context (caller, time, authority) + Operation
//! └──────┬──────┘
//!        │ execute(&state, &ctx, op)
//!        ▼
//! ┌─────────────┐
//! │     ops     │  one handler per operation, works on a clone
//! └──────┬──────┘
//!        │ PricingCurve (enum dispatch)
//!        ▼
//! ┌─────────────┐
//! │    curve    │  constant product, StableSwap solvers, amplification ramp
//! └──────┬──────┘
//!        │ U256 intermediates, explicit rounding
//!        ▼
//! ┌─────────────┐
//! │    math     │  CheckedArithmetic, mul_div, isqrt
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Amplification`](domain::Amplification), [`SwapSpec`](domain::SwapSpec), etc. |
//! | [`curve`] | [`PricingCurve`](curve::PricingCurve), StableSwap solvers and [`AmplificationSchedule`](curve::AmplificationSchedule) |
//! | [`state`] | [`PoolState`](state::PoolState), positions, [`ResidualLedger`](state::ResidualLedger), statistics |
//! | [`ops`] | [`execute`](ops::execute), [`Operation`](ops::Operation), [`Outcome`](ops::Outcome) |
//! | [`config`] | Declarative [`PoolConfig`](config::PoolConfig), fees and limits |
//! | [`traits`] | [`FromConfig`](traits::FromConfig), [`Authority`](traits::Authority) |
//! | [`math`] | Checked arithmetic, rounding division, 256-bit intermediates |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod curve;
pub mod domain;
pub mod error;
pub mod math;
pub mod ops;
pub mod prelude;
pub mod state;
pub mod traits;
