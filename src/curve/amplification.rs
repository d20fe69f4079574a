//! Time-ramped amplification coefficient.
//!
//! A StableSwap pool never jumps from one `A` to another: an administrator
//! schedules a target and a deadline, and the effective coefficient moves
//! linearly from the value in force at scheduling time to the target.
//!
//! ```text
//!   A
//!   │            future ────────
//!   │           ╱
//!   │          ╱
//!   │ initial ╱
//!   └────────┴──────┴──────────▶ t
//!        initial_time  future_time
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{Amplification, Timestamp};
use crate::error::AmmError;
use crate::math::U256;

/// Linear amplification ramp between two `(value, time)` points.
///
/// # Examples
///
/// ```
/// use tandem_amm::curve::AmplificationSchedule;
/// use tandem_amm::domain::{Amplification, Timestamp};
///
/// let flat = AmplificationSchedule::constant(Amplification::from_integer(100));
/// let Ok(ramp) = flat.ramp(
///     Amplification::from_integer(200),
///     Timestamp::new(1_100),
///     Timestamp::new(1_000),
///     0,
/// ) else { panic!() };
/// assert_eq!(ramp.current(Timestamp::new(1_050)), Amplification::from_integer(150));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmplificationSchedule {
    initial: Amplification,
    future: Amplification,
    initial_time: Timestamp,
    future_time: Timestamp,
}

impl AmplificationSchedule {
    /// A schedule that holds `amp` forever.
    #[must_use]
    pub const fn constant(amp: Amplification) -> Self {
        Self {
            initial: amp,
            future: amp,
            initial_time: Timestamp::ZERO,
            future_time: Timestamp::ZERO,
        }
    }

    /// Value at the start of the ramp.
    #[must_use]
    pub const fn initial(&self) -> Amplification {
        self.initial
    }

    /// Target value.
    #[must_use]
    pub const fn future(&self) -> Amplification {
        self.future
    }

    /// Start of the ramp.
    #[must_use]
    pub const fn initial_time(&self) -> Timestamp {
        self.initial_time
    }

    /// Deadline at which the target is reached.
    #[must_use]
    pub const fn future_time(&self) -> Timestamp {
        self.future_time
    }

    /// Returns `true` while the effective value is still moving.
    #[must_use]
    pub fn is_ramping(&self, now: Timestamp) -> bool {
        self.initial != self.future && now > self.initial_time && now < self.future_time
    }

    /// Effective coefficient at `now`.
    ///
    /// Before the ramp starts this is `initial`, after the deadline it is
    /// `future`, and in between the linear interpolation truncated toward
    /// `initial`.
    #[must_use]
    pub fn current(&self, now: Timestamp) -> Amplification {
        if now <= self.initial_time {
            return self.initial;
        }
        if now >= self.future_time {
            return self.future;
        }
        // initial_time < now < future_time, so window > 0
        let elapsed = u128::from(now.saturating_since(self.initial_time));
        let window = u128::from(self.future_time.saturating_since(self.initial_time));
        let (lo, hi) = if self.future >= self.initial {
            (self.initial.get(), self.future.get())
        } else {
            (self.future.get(), self.initial.get())
        };
        // elapsed < window, so step < hi - lo and the low word is exact
        let step = (U256::from(hi - lo) * U256::from(elapsed) / U256::from(window)).low_u128();
        if self.future >= self.initial {
            Amplification::new(self.initial.get() + step)
        } else {
            Amplification::new(self.initial.get() - step)
        }
    }

    /// Schedules a new ramp starting from the value in effect at `now`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAmplificationWindow`] if `future` is outside
    /// [`Amplification::MIN`]..=[`Amplification::MAX`], if `future_time` is
    /// not strictly after `now`, or if it is sooner than `now + min_delay`.
    pub fn ramp(
        &self,
        future: Amplification,
        future_time: Timestamp,
        now: Timestamp,
        min_delay: u64,
    ) -> Result<Self, AmmError> {
        if !future.is_within_bounds() {
            return Err(AmmError::InvalidAmplificationWindow(
                "target amplification out of bounds",
            ));
        }
        if future_time <= now {
            return Err(AmmError::InvalidAmplificationWindow(
                "ramp deadline must be in the future",
            ));
        }
        let earliest = now
            .checked_add_secs(min_delay)
            .ok_or(AmmError::InvalidAmplificationWindow("ramp delay overflow"))?;
        if future_time < earliest {
            return Err(AmmError::InvalidAmplificationWindow(
                "ramp deadline sooner than the update delay",
            ));
        }
        Ok(Self {
            initial: self.current(now),
            future,
            initial_time: now,
            future_time,
        })
    }
}
