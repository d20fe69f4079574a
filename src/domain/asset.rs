//! The two sides of the pool.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Selects one of the pool's two assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// Asset 1.
    First,
    /// Asset 2.
    Second,
}

impl Asset {
    /// Both assets in pool order.
    pub const BOTH: [Self; 2] = [Self::First, Self::Second];

    /// The opposite side of the pair.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("asset1"),
            Self::Second => f.write_str("asset2"),
        }
    }
}

/// One value per asset, indexed by [`Asset`].
///
/// # Examples
///
/// ```
/// use tandem_amm::domain::{Amount, Asset, PerAsset};
///
/// let mut reserves = PerAsset::new(Amount::new(1_000), Amount::new(2_000));
/// *reserves.get_mut(Asset::Second) = Amount::new(1_500);
/// assert_eq!(*reserves.get(Asset::Second), Amount::new(1_500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PerAsset<T> {
    /// Value for asset 1.
    pub first: T,
    /// Value for asset 2.
    pub second: T,
}

impl<T> PerAsset<T> {
    /// Builds from the asset-1 and asset-2 values.
    pub const fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    /// Borrows the value for `asset`.
    pub const fn get(&self, asset: Asset) -> &T {
        match asset {
            Asset::First => &self.first,
            Asset::Second => &self.second,
        }
    }

    /// Mutably borrows the value for `asset`.
    pub fn get_mut(&mut self, asset: Asset) -> &mut T {
        match asset {
            Asset::First => &mut self.first,
            Asset::Second => &mut self.second,
        }
    }

    /// Applies `f` to both values.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerAsset<U> {
        PerAsset {
            first: f(self.first),
            second: f(self.second),
        }
    }
}

impl<T: Copy> PerAsset<T> {
    /// Returns `(value for asset, value for the other asset)`.
    pub const fn oriented(&self, asset: Asset) -> (T, T) {
        match asset {
            Asset::First => (self.first, self.second),
            Asset::Second => (self.second, self.first),
        }
    }
}
