//! Error types for the pricing engine and surface construction.

use thiserror::Error;

/// Errors raised when a pricing request or grid is outside the model's domain.
///
/// Numeric overflow for valid-but-extreme inputs is *not* an error: IEEE
/// `Inf`/`NaN` values propagate into the result, see
/// [`PricingResult::is_finite`](crate::PricingResult::is_finite).
///
/// # Examples
///
/// ```
/// use bs_surface::PricingError;
///
/// let err = PricingError::InvalidParameter { name: "volatility", value: 0.0 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A parameter is non-finite, or non-positive where the model requires `> 0`.
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter {
        /// Field name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A grid axis with no points.
    #[error("Empty grid: {axis} axis has no points")]
    EmptyGrid {
        /// Axis name ("spot" or "volatility")
        axis: &'static str,
    },

    /// A range whose lower bound exceeds its upper bound.
    #[error("Invalid range for {axis}: min = {min} > max = {max}")]
    InvalidRange {
        /// Axis name ("spot" or "volatility")
        axis: &'static str,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// A grid resolution of zero.
    #[error("Invalid grid resolution: {0}")]
    InvalidResolution(usize),
}
