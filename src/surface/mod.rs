//! Spot/volatility price surfaces for heatmap visualization
//!
//! Configuration of the two axes, grid evaluation on top of the pricing
//! engine, and a memoizing cache so repeated renders with identical inputs do
//! not recompute the surface.

pub mod cache;
pub mod config;
pub mod grid;

pub use cache::{SurfaceCache, SurfaceKey};
pub use config::HeatmapConfig;
pub use grid::{linspace, price_grid, spot_metrics, PriceSurface};
