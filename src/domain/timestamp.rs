//! Host-supplied clock reading.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Seconds on the host's monotonic clock.
///
/// The engine never reads a clock itself; every operation receives the
/// current time through its context.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw seconds value.
    #[must_use]
    pub const fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the raw seconds value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// `self + secs`, or `None` on overflow.
    #[must_use]
    pub const fn checked_add_secs(&self, secs: u64) -> Option<Self> {
        match self.0.checked_add(secs) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Seconds elapsed since `earlier`, zero if `earlier` is in the future.
    #[must_use]
    pub const fn saturating_since(&self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}
