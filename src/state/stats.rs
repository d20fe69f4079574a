//! Cumulative price, volume and fee accumulators.
//!
//! The accumulators are monotone counters read by off-engine consumers
//! (oracles, analytics). They wrap on overflow; consumers take differences
//! between two readings.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Asset, PerAsset, Timestamp};

/// Scale of cumulative prices: a price of 1.0 held for one second adds
/// `1_000_000_000`.
pub const PRICE_SCALE: u128 = 1_000_000_000;

/// Time-weighted prices plus traded volumes and LP fees, per asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeStats {
    /// Price of each asset in units of the other, scaled by
    /// [`PRICE_SCALE`], integrated over seconds.
    pub price_cumulative: PerAsset<u128>,
    /// Total amount of each asset swapped into the pool.
    pub volume_in: PerAsset<u128>,
    /// Total amount of each asset swapped out of the pool.
    pub volume_out: PerAsset<u128>,
    /// Fees retained for liquidity providers, per asset.
    pub lp_fees: PerAsset<u128>,
    /// Fees routed to protocol reserves, per asset.
    pub protocol_fees: PerAsset<u128>,
    /// Time of the last price accrual.
    pub last_update: Timestamp,
}

impl CumulativeStats {
    /// Integrates prices over the time since the last accrual using the
    /// balances that were in force during that interval.
    ///
    /// A term whose scaled product overflows `u128` is skipped for that
    /// interval.
    pub fn accrue_prices(&mut self, reserves: &PerAsset<Amount>, now: Timestamp) {
        let elapsed = u128::from(now.saturating_since(self.last_update));
        if elapsed > 0 && !reserves.first.is_zero() && !reserves.second.is_zero() {
            for asset in Asset::BOTH {
                let (this, other) = reserves.oriented(asset);
                let term = other
                    .get()
                    .checked_mul(PRICE_SCALE)
                    .map(|scaled| scaled / this.get())
                    .and_then(|price| price.checked_mul(elapsed));
                if let Some(term) = term {
                    let slot = self.price_cumulative.get_mut(asset);
                    *slot = slot.wrapping_add(term);
                }
            }
        }
        if now > self.last_update {
            self.last_update = now;
        }
    }

    /// Records one swap.
    pub fn record_swap(
        &mut self,
        asset_in: Asset,
        amount_in: Amount,
        amount_out: Amount,
        lp_fee: Amount,
        protocol_fee: Amount,
    ) {
        bump(self.volume_in.get_mut(asset_in), amount_in);
        bump(self.volume_out.get_mut(asset_in.other()), amount_out);
        bump(self.lp_fees.get_mut(asset_in), lp_fee);
        bump(self.protocol_fees.get_mut(asset_in), protocol_fee);
    }

    /// Records fees earned by a flash loan of `asset`.
    pub fn record_flash_fee(&mut self, asset: Asset, fee: Amount) {
        bump(self.lp_fees.get_mut(asset), fee);
    }
}

fn bump(slot: &mut u128, by: Amount) {
    *slot = slot.wrapping_add(by.get());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserves(a: u128, b: u128) -> PerAsset<Amount> {
        PerAsset::new(Amount::new(a), Amount::new(b))
    }

    #[test]
    fn prices_integrate_over_elapsed_time() {
        let mut s = CumulativeStats::default();
        s.accrue_prices(&reserves(1_000, 2_000), Timestamp::new(10));
        // asset1 priced at 2.0, asset2 at 0.5, for 10 seconds
        assert_eq!(s.price_cumulative.first, 20 * PRICE_SCALE);
        assert_eq!(s.price_cumulative.second, 5 * PRICE_SCALE);
        assert_eq!(s.last_update, Timestamp::new(10));
    }

    #[test]
    fn same_timestamp_accrues_nothing() {
        let mut s = CumulativeStats::default();
        s.accrue_prices(&reserves(1_000, 2_000), Timestamp::ZERO);
        assert_eq!(s.price_cumulative, PerAsset::default());
    }

    #[test]
    fn empty_pool_only_advances_clock() {
        let mut s = CumulativeStats::default();
        s.accrue_prices(&reserves(0, 0), Timestamp::new(7));
        assert_eq!(s.price_cumulative, PerAsset::default());
        assert_eq!(s.last_update, Timestamp::new(7));
    }

    #[test]
    fn overflowing_term_is_skipped() {
        let mut s = CumulativeStats::default();
        s.accrue_prices(&reserves(1, u128::MAX), Timestamp::new(1));
        assert_eq!(s.price_cumulative.first, 0);
        assert_eq!(s.price_cumulative.second, 0);
    }

    #[test]
    fn swap_volumes_and_fees() {
        let mut s = CumulativeStats::default();
        s.record_swap(
            Asset::First,
            Amount::new(100),
            Amount::new(90),
            Amount::new(1),
            Amount::ZERO,
        );
        assert_eq!(s.volume_in, PerAsset::new(100, 0));
        assert_eq!(s.volume_out, PerAsset::new(0, 90));
        assert_eq!(s.lp_fees, PerAsset::new(1, 0));
    }

    #[test]
    fn counters_wrap() {
        let mut s = CumulativeStats::default();
        s.volume_in.first = u128::MAX;
        s.record_swap(Asset::First, Amount::new(2), Amount::ZERO, Amount::ZERO, Amount::ZERO);
        assert_eq!(s.volume_in.first, 1);
    }
}
