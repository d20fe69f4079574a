//! Capability predicate for administrative operations.
//!
//! The engine does not know who its administrators are. The host passes an
//! [`Authority`] with every call; admin operations ask it whether the
//! caller may perform the requested [`AdminAction`] and fail with
//! [`AmmError::Unauthorized`](crate::error::AmmError::Unauthorized) when it
//! says no. Non-admin operations never consult it.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::AccountId;

/// Administrative capabilities that can be granted independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdminAction {
    /// Schedule a new amplification ramp.
    RampAmplification,
    /// Schedule a swap-fee change.
    ScheduleSwapFee,
    /// Change flash-loan fee, flash-loan cap or reserve factor.
    UpdateProtocolParams,
    /// Withdraw accumulated protocol fees.
    WithdrawProtocolFees,
    /// Lengthen the delay that gates ramps and fee changes.
    IncreaseParamUpdateDelay,
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RampAmplification => "ramp-amplification",
            Self::ScheduleSwapFee => "schedule-swap-fee",
            Self::UpdateProtocolParams => "update-protocol-params",
            Self::WithdrawProtocolFees => "withdraw-protocol-fees",
            Self::IncreaseParamUpdateDelay => "increase-param-update-delay",
        };
        f.write_str(name)
    }
}

/// Decides whether `caller` may perform `action`.
///
/// Implemented for closures, so ad-hoc policies need no new type:
///
/// ```
/// use tandem_amm::domain::AccountId;
/// use tandem_amm::traits::{AdminAction, Authority};
///
/// let ops = AccountId::from_bytes([9; 32]);
/// let policy = move |who: &AccountId, action: AdminAction| {
///     *who == ops && action != AdminAction::WithdrawProtocolFees
/// };
/// assert!(policy.permits(&ops, AdminAction::RampAmplification));
/// assert!(!policy.permits(&ops, AdminAction::WithdrawProtocolFees));
/// ```
pub trait Authority {
    /// Returns `true` if the action is allowed.
    fn permits(&self, caller: &AccountId, action: AdminAction) -> bool;
}

impl<F> Authority for F
where
    F: Fn(&AccountId, AdminAction) -> bool,
{
    fn permits(&self, caller: &AccountId, action: AdminAction) -> bool {
        self(caller, action)
    }
}

/// Grants nothing. The default for hosts that expose no admin surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl Authority for DenyAll {
    fn permits(&self, _caller: &AccountId, _action: AdminAction) -> bool {
        false
    }
}

/// Grants every action to a single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleAdmin(pub AccountId);

impl Authority for SingleAdmin {
    fn permits(&self, caller: &AccountId, _action: AdminAction) -> bool {
        *caller == self.0
    }
}
