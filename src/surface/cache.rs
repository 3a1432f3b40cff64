use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::{debug, trace};

use super::config::HeatmapConfig;
use super::grid::PriceSurface;
use crate::error::PricingError;

/// Decimal places kept when rounding parameters into a cache key.
pub const DEFAULT_KEY_DECIMALS: u32 = 8;

/// Everything a surface depends on, formatted to a fixed number of decimals.
///
/// The point spot and volatility are not part of the key: they only affect the
/// surface through the resolved axis ranges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceKey {
    spot_min: String,
    spot_max: String,
    vol_min: String,
    vol_max: String,
    resolution: usize,
    time_to_maturity: String,
    strike: String,
    interest_rate: String,
}

impl SurfaceKey {
    pub fn from_config(config: &HeatmapConfig, decimals: u32) -> Self {
        let q = |x: f64| format!("{:.*}", decimals as usize, x);
        let (spot_min, spot_max) = config.spot_range();
        let (vol_min, vol_max) = config.vol_range();
        Self {
            spot_min: q(spot_min),
            spot_max: q(spot_max),
            vol_min: q(vol_min),
            vol_max: q(vol_max),
            resolution: config.resolution,
            time_to_maturity: q(config.time_to_maturity),
            strike: q(config.strike),
            interest_rate: q(config.interest_rate),
        }
    }
}

/// Memoizes price surfaces by their rounded inputs.
///
/// Entries are evicted oldest-first once `capacity` is exceeded. A capacity
/// of zero stores nothing.
#[derive(Debug)]
pub struct SurfaceCache {
    capacity: usize,
    decimals: u32,
    entries: HashMap<SurfaceKey, Arc<PriceSurface>>,
    order: VecDeque<SurfaceKey>,
    hits: u64,
    misses: u64,
}

impl Default for SurfaceCache {
    fn default() -> Self {
        Self::new(16)
    }
}

impl SurfaceCache {
    pub fn new(capacity: usize) -> Self {
        Self::with_decimals(capacity, DEFAULT_KEY_DECIMALS)
    }

    pub fn with_decimals(capacity: usize, decimals: u32) -> Self {
        Self {
            capacity,
            decimals,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached surface for `config`, computing and storing it on a miss.
    ///
    /// Invalid configs are rejected before lookup; failed computations are
    /// not cached.
    pub fn get_or_compute(
        &mut self,
        config: &HeatmapConfig,
    ) -> Result<Arc<PriceSurface>, PricingError> {
        config.validate()?;
        let key = SurfaceKey::from_config(config, self.decimals);

        if let Some(surface) = self.entries.get(&key) {
            self.hits += 1;
            debug!(?key, "surface cache hit");
            return Ok(Arc::clone(surface));
        }

        self.misses += 1;
        debug!(?key, "surface cache miss");
        let surface = Arc::new(PriceSurface::from_config(config)?);

        if self.capacity > 0 {
            while self.entries.len() >= self.capacity {
                match self.order.pop_front() {
                    Some(oldest) => {
                        trace!(?oldest, "evicting surface");
                        self.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
            self.order.push_back(key.clone());
            self.entries.insert(key, Arc::clone(&surface));
        }

        Ok(surface)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, config: &HeatmapConfig) -> bool {
        self.entries
            .contains_key(&SurfaceKey::from_config(config, self.decimals))
    }

    /// Drop all entries. Hit/miss counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
