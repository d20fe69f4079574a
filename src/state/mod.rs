//! Pool state and its ledgers.
//!
//! [`PoolState`] owns the pricing balances and parameters and delegates
//! share bookkeeping to [`LiquidityPositions`], overpayments to
//! [`ResidualLedger`] and accumulators to [`CumulativeStats`].

mod pool_state;
mod positions;
mod residual_ledger;
mod stats;

pub use pool_state::{PendingSwapFee, PoolPhase, PoolState};
pub use positions::LiquidityPositions;
pub use residual_ledger::{OwedResiduals, ResidualKind, ResidualLedger};
pub use stats::{CumulativeStats, PRICE_SCALE};
