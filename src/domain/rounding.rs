//! Explicit rounding direction for integer division.

use serde::{Deserialize, Serialize};

/// Rounding direction for every division the engine performs.
///
/// Pool arithmetic always rounds in the pool's favour: amounts paid out
/// round [`Down`](Self::Down), amounts owed to the pool and fees round
/// [`Up`](Self::Up).
///
/// # Examples
///
/// ```
/// use tandem_amm::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(!Rounding::Down.is_up());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Towards positive infinity (ceiling).
    Up,
    /// Towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` for [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
