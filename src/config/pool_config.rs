//! Declarative blueprint for a new pool.

use serde::{Deserialize, Serialize};

use super::{FeeSchedule, PoolLimits};
use crate::domain::{Amplification, PricingMode};
use crate::error::AmmError;

/// Everything needed to create an empty pool.
///
/// Reserves are not part of the configuration: a pool starts empty and is
/// bootstrapped by its first deposit.
///
/// # Validation
///
/// - StableSwap pools need an amplification inside
///   [`Amplification::MIN`]..=[`Amplification::MAX`].
/// - Constant-product pools must not carry one.
/// - Fee and limit parameters are validated by their own types.
///
/// # Examples
///
/// ```
/// use tandem_amm::config::PoolConfig;
/// use tandem_amm::domain::Amplification;
///
/// let cfg = PoolConfig::stable_swap(Amplification::from_integer(100));
/// assert!(cfg.is_ok());
/// assert!(PoolConfig::stable_swap(Amplification::new(0)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    pricing_mode: PricingMode,
    amplification: Option<Amplification>,
    fees: FeeSchedule,
    limits: PoolLimits,
    param_update_delay: u64,
}

impl PoolConfig {
    /// Constant-product pool with deployment-default fees and limits.
    #[must_use]
    pub fn constant_product() -> Self {
        Self {
            pricing_mode: PricingMode::ConstantProduct,
            amplification: None,
            fees: FeeSchedule::for_mode(PricingMode::ConstantProduct),
            limits: PoolLimits::default(),
            param_update_delay: 0,
        }
    }

    /// StableSwap pool at a fixed initial amplification.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidConfiguration`] if `amplification` is out of
    /// bounds.
    pub fn stable_swap(amplification: Amplification) -> Result<Self, AmmError> {
        let config = Self {
            pricing_mode: PricingMode::StableSwap,
            amplification: Some(amplification),
            fees: FeeSchedule::for_mode(PricingMode::StableSwap),
            limits: PoolLimits::default(),
            param_update_delay: 0,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the fee schedule.
    ///
    /// # Errors
    ///
    /// Propagates [`FeeSchedule::validate`].
    pub fn with_fees(mut self, fees: FeeSchedule) -> Result<Self, AmmError> {
        fees.validate()?;
        self.fees = fees;
        Ok(self)
    }

    /// Replaces the balance limits.
    ///
    /// # Errors
    ///
    /// Propagates [`PoolLimits::validate`].
    pub fn with_limits(mut self, limits: PoolLimits) -> Result<Self, AmmError> {
        limits.validate()?;
        self.limits = limits;
        Ok(self)
    }

    /// Sets the minimum lead time, in seconds, between scheduling a
    /// parameter change and its taking effect.
    #[must_use]
    pub const fn with_param_update_delay(mut self, secs: u64) -> Self {
        self.param_update_delay = secs;
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] on a missing, superfluous or
    ///   out-of-range amplification.
    /// - Errors from [`FeeSchedule::validate`] and [`PoolLimits::validate`].
    pub fn validate(&self) -> Result<(), AmmError> {
        match (self.pricing_mode, self.amplification) {
            (PricingMode::StableSwap, None) => {
                return Err(AmmError::InvalidConfiguration(
                    "stableswap pool needs an amplification",
                ));
            }
            (PricingMode::StableSwap, Some(a)) if !a.is_within_bounds() => {
                return Err(AmmError::InvalidConfiguration(
                    "amplification out of bounds",
                ));
            }
            (PricingMode::ConstantProduct, Some(_)) => {
                return Err(AmmError::InvalidConfiguration(
                    "constant product pool takes no amplification",
                ));
            }
            _ => {}
        }
        self.fees.validate()?;
        self.limits.validate()
    }

    /// Pricing curve family.
    #[must_use]
    pub const fn pricing_mode(&self) -> PricingMode {
        self.pricing_mode
    }

    /// Initial amplification; `None` for constant-product pools.
    #[must_use]
    pub const fn amplification(&self) -> Option<Amplification> {
        self.amplification
    }

    /// Fee schedule.
    #[must_use]
    pub const fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Balance limits.
    #[must_use]
    pub const fn limits(&self) -> &PoolLimits {
        &self.limits
    }

    /// Parameter update delay in seconds.
    #[must_use]
    pub const fn param_update_delay(&self) -> u64 {
        self.param_update_delay
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::BasisPoints;

    #[test]
    fn constant_product_defaults_validate() {
        let cfg = PoolConfig::constant_product();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.fees().swap_fee, BasisPoints::new(25));
        assert_eq!(cfg.amplification(), None);
    }

    #[test]
    fn stable_swap_bounds() {
        assert!(PoolConfig::stable_swap(Amplification::MAX).is_ok());
        let Err(AmmError::InvalidConfiguration(_)) =
            PoolConfig::stable_swap(Amplification::new(Amplification::MAX.get() + 1))
        else {
            panic!("expected InvalidConfiguration");
        };
    }

    #[test]
    fn with_fees_validates() {
        let bad = FeeSchedule {
            swap_fee: BasisPoints::new(10_000),
            ..FeeSchedule::default()
        };
        let Err(AmmError::InvalidFee(_)) = PoolConfig::constant_product().with_fees(bad) else {
            panic!("expected InvalidFee");
        };
    }

    #[test]
    fn builder_chain() {
        let Ok(cfg) = PoolConfig::constant_product().with_limits(PoolLimits::unbounded()) else {
            panic!("valid limits");
        };
        let cfg = cfg.with_param_update_delay(5);
        assert_eq!(cfg.param_update_delay(), 5);
        assert_eq!(*cfg.limits(), PoolLimits::unbounded());
    }

    #[test]
    fn deserialized_config_is_revalidated() {
        let json = r#"{
            "pricing_mode": "constant_product",
            "amplification": 100000000,
            "fees": {"swap_fee": 30, "flash_loan_fee": 10, "max_flash_loan_ratio": 1000, "reserve_factor": 0},
            "limits": {"min_pool_balance": 1, "max_asset_ratio": 1000},
            "param_update_delay": 0
        }"#;
        let Ok(cfg) = serde_json::from_str::<PoolConfig>(json) else {
            panic!("well-formed json");
        };
        assert!(cfg.validate().is_err());
    }
}
