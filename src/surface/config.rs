use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::models::bs::{positive, OptionParams};

/// Slider bounds for the volatility axis of the heatmap.
pub const VOL_FLOOR: f64 = 0.01;
pub const VOL_CAP: f64 = 1.0;

/// Market parameters and axis ranges for a (spot, volatility) price surface.
///
/// Missing range bounds are derived from the point parameters: the spot axis
/// spans `[0.8 * spot, 1.2 * spot]` and the volatility axis
/// `[0.5 * volatility, 1.5 * volatility]` clamped to `[VOL_FLOOR, VOL_CAP]`.
///
/// ```rust
/// use bs_surface::HeatmapConfig;
///
/// let config = HeatmapConfig::from_toml_str("spot = 50.0\nresolution = 10")?;
/// assert_eq!(config.spot_range(), (40.0, 60.0));
/// assert_eq!(config.strike, 100.0);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Current underlying price (S0)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to maturity in years (T)
    pub time_to_maturity: f64,
    /// Annualised volatility at the current point (σ0)
    pub volatility: f64,
    /// Continuously compounded risk-free rate (r)
    pub interest_rate: f64,
    pub spot_min: Option<f64>,
    pub spot_max: Option<f64>,
    pub vol_min: Option<f64>,
    pub vol_max: Option<f64>,
    /// Number of points on each axis
    pub resolution: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            time_to_maturity: 1.0,
            volatility: 0.2,
            interest_rate: 0.05,
            spot_min: None,
            spot_max: None,
            vol_min: None,
            vol_max: None,
            resolution: default_resolution(),
        }
    }
}

impl HeatmapConfig {
    /// Parse a config from TOML. Absent keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse heatmap config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Resolved `(min, max)` of the spot axis.
    pub fn spot_range(&self) -> (f64, f64) {
        (
            self.spot_min.unwrap_or(self.spot * 0.8),
            self.spot_max.unwrap_or(self.spot * 1.2),
        )
    }

    /// Resolved `(min, max)` of the volatility axis.
    pub fn vol_range(&self) -> (f64, f64) {
        (
            self.vol_min
                .unwrap_or((self.volatility * 0.5).clamp(VOL_FLOOR, VOL_CAP)),
            self.vol_max
                .unwrap_or((self.volatility * 1.5).clamp(VOL_FLOOR, VOL_CAP)),
        )
    }

    /// The point request at (spot, volatility).
    pub fn params(&self) -> Result<OptionParams, PricingError> {
        OptionParams::new(
            self.time_to_maturity,
            self.strike,
            self.spot,
            self.volatility,
            self.interest_rate,
        )
    }

    /// Check point parameters, both ranges and the resolution.
    pub fn validate(&self) -> Result<(), PricingError> {
        self.params()?;

        let (spot_min, spot_max) = self.spot_range();
        check_range("spot", "current_price", spot_min, spot_max)?;
        let (vol_min, vol_max) = self.vol_range();
        check_range("volatility", "volatility", vol_min, vol_max)?;

        if self.resolution == 0 {
            return Err(PricingError::InvalidResolution(self.resolution));
        }
        Ok(())
    }
}

fn check_range(
    axis: &'static str,
    param: &'static str,
    min: f64,
    max: f64,
) -> Result<(), PricingError> {
    positive(param, min)?;
    positive(param, max)?;
    if min > max {
        return Err(PricingError::InvalidRange { axis, min, max });
    }
    Ok(())
}

fn default_resolution() -> usize {
    50
}
