//! # bs-surface: Black-Scholes Pricing and Price Surfaces
//!
//! `bs-surface` prices European options in closed form under the Black-Scholes model
//! (no dividends) and evaluates call/put price surfaces over a grid of spot prices and
//! volatilities, the input to price heatmaps.
//!
//! ## Core Features
//!
//! - **Pricing Engine**: call/put prices, call/put delta and gamma from one evaluation
//! - **Validated Requests**: out-of-domain inputs return a typed [`PricingError`]
//! - **Price Surfaces**: call and put matrices over the outer product of spot and volatility axes
//! - **Memoization**: [`SurfaceCache`] skips recomputation for repeated identical inputs
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_surface::{price, HeatmapConfig, SurfaceCache};
//!
//! // Single point
//! let res = price(2.0, 90.0, 100.0, 0.2, 0.05)?;
//! println!("Call Price: {:.4}, Put Price: {:.4}", res.call_price, res.put_price);
//!
//! // Surface over the default ranges (spot ±20%, vol 0.5x-1.5x)
//! let mut cache = SurfaceCache::default();
//! let surface = cache.get_or_compute(&HeatmapConfig::default())?;
//! assert_eq!(surface.shape(), (50, 50));
//! # Ok::<(), bs_surface::PricingError>(())
//! ```

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod models;
pub mod surface;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use error::PricingError;
pub use models::bs::{norm_cdf, norm_pdf, OptionParams, OptionType, PricingResult};
pub use surface::{
    linspace, spot_metrics, HeatmapConfig, PriceSurface, SurfaceCache, SurfaceKey,
};

use ndarray::Array2;

// ================================================================================================
// PRICING API
// ================================================================================================

/// Price a European call and put and compute their spot Greeks.
///
/// # Arguments
///
/// * `time_to_maturity` - Years until expiry (T), must be > 0
/// * `strike` - Strike price (K), must be > 0
/// * `current_price` - Underlying spot price (S), must be > 0
/// * `volatility` - Annualised volatility (σ), must be > 0
/// * `interest_rate` - Continuously compounded risk-free rate (r), any finite value
///
/// # Returns
///
/// [`PricingResult`] with call/put prices, call/put deltas and the shared gamma.
///
/// # Errors
///
/// [`PricingError::InvalidParameter`] naming the first offending field. Valid but
/// extreme inputs never error; check [`PricingResult::is_finite`] if inputs are untrusted.
///
/// # Formulas
///
/// ```text
/// d1 = (ln(S/K) + (r + σ²/2)T) / (σ√T),  d2 = d1 - σ√T
/// call  = S N(d1) - K e^(-rT) N(d2)
/// put   = K e^(-rT) N(-d2) - S N(-d1)
/// delta = N(d1) (call), N(d1) - 1 (put)
/// gamma = n(d1) / (S σ √T)
/// ```
pub fn price(
    time_to_maturity: f64,
    strike: f64,
    current_price: f64,
    volatility: f64,
    interest_rate: f64,
) -> Result<PricingResult, PricingError> {
    models::bs::price(
        time_to_maturity,
        strike,
        current_price,
        volatility,
        interest_rate,
    )
}

/// Evaluate call and put prices over the outer product of `spot_grid` and `vol_grid`.
///
/// Both matrices have shape `(vol_grid.len(), spot_grid.len())`: row `i` holds
/// volatility `vol_grid[i]`, column `j` spot `spot_grid[j]`. `T`, `K` and `r`
/// are shared by all cells.
///
/// # Example
///
/// ```rust
/// use bs_surface::{linspace, price_grid};
///
/// let spots = linspace(80.0, 120.0, 5);
/// let vols = linspace(0.1, 0.3, 3);
/// let (calls, puts) = price_grid(1.0, 100.0, &spots, &vols, 0.05)?;
/// assert_eq!(calls.dim(), (3, 5));
/// assert_eq!(puts.dim(), (3, 5));
/// # Ok::<(), bs_surface::PricingError>(())
/// ```
pub fn price_grid(
    time_to_maturity: f64,
    strike: f64,
    spot_grid: &[f64],
    vol_grid: &[f64],
    interest_rate: f64,
) -> Result<(Array2<f64>, Array2<f64>), PricingError> {
    surface::grid::price_grid(
        time_to_maturity,
        strike,
        spot_grid,
        vol_grid,
        interest_rate,
    )
}
