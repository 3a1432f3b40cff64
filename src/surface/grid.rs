//! Price surfaces over a (spot, volatility) grid.
//!
//! Every cell is produced by the same kernel as [`crate::models::bs::price`];
//! the grid only broadcasts it over the outer product of the two axes.
//! Matrices are laid out with volatility on rows and spot on columns, so
//! `calls[[i, j]]` is the call price at `(spots[j], vols[i])`.

use ndarray::Array2;
use serde::Serialize;
use tracing::{debug, warn};

use super::config::HeatmapConfig;
use crate::error::PricingError;
use crate::models::bs::{evaluate, finite, positive, PricingResult};

/// `n` evenly spaced points from `start` to `end`, both endpoints included.
///
/// `n == 1` yields `[start]` and `n == 0` an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Call and put price matrices of shape `(vol_grid.len(), spot_grid.len())`.
///
/// `T`, `K` and `r` are validated once, and every axis value once. No cell is
/// evaluated unless the whole grid is inside the model's domain.
#[allow(non_snake_case)]
pub fn price_grid(
    T: f64,
    K: f64,
    spot_grid: &[f64],
    vol_grid: &[f64],
    r: f64,
) -> Result<(Array2<f64>, Array2<f64>), PricingError> {
    positive("time_to_maturity", T)?;
    positive("strike", K)?;
    finite("interest_rate", r)?;

    if spot_grid.is_empty() {
        return Err(PricingError::EmptyGrid { axis: "spot" });
    }
    if vol_grid.is_empty() {
        return Err(PricingError::EmptyGrid { axis: "volatility" });
    }
    for &s in spot_grid {
        positive("current_price", s)?;
    }
    for &sigma in vol_grid {
        positive("volatility", sigma)?;
    }

    let shape = (vol_grid.len(), spot_grid.len());
    debug!(rows = shape.0, cols = shape.1, "evaluating price grid");

    let mut calls = Array2::zeros(shape);
    let mut puts = Array2::zeros(shape);
    for (i, &sigma) in vol_grid.iter().enumerate() {
        for (j, &s) in spot_grid.iter().enumerate() {
            let res = evaluate(T, K, s, sigma, r);
            calls[[i, j]] = res.call_price;
            puts[[i, j]] = res.put_price;
        }
    }
    Ok((calls, puts))
}

/// A computed surface together with the axes it was evaluated on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSurface {
    pub spots: Vec<f64>,
    pub vols: Vec<f64>,
    pub calls: Array2<f64>,
    pub puts: Array2<f64>,
}

impl PriceSurface {
    #[allow(non_snake_case)]
    pub fn compute(
        T: f64,
        K: f64,
        spots: Vec<f64>,
        vols: Vec<f64>,
        r: f64,
    ) -> Result<Self, PricingError> {
        let (calls, puts) = price_grid(T, K, &spots, &vols, r)?;
        Ok(Self {
            spots,
            vols,
            calls,
            puts,
        })
    }

    /// Build both axes from the config's ranges and resolution and evaluate.
    pub fn from_config(config: &HeatmapConfig) -> Result<Self, PricingError> {
        config.validate()?;
        let (spot_min, spot_max) = config.spot_range();
        let (vol_min, vol_max) = config.vol_range();
        Self::compute(
            config.time_to_maturity,
            config.strike,
            linspace(spot_min, spot_max, config.resolution),
            linspace(vol_min, vol_max, config.resolution),
            config.interest_rate,
        )
    }

    /// `(rows, cols)` = `(vols.len(), spots.len())`.
    pub fn shape(&self) -> (usize, usize) {
        self.calls.dim()
    }

    pub fn call_at(&self, vol_idx: usize, spot_idx: usize) -> Option<f64> {
        self.calls.get([vol_idx, spot_idx]).copied()
    }

    pub fn put_at(&self, vol_idx: usize, spot_idx: usize) -> Option<f64> {
        self.puts.get([vol_idx, spot_idx]).copied()
    }

    /// `(min, max)` over the call matrix, for colour scaling.
    pub fn call_range(&self) -> (f64, f64) {
        value_range(&self.calls)
    }

    /// `(min, max)` over the put matrix, for colour scaling.
    pub fn put_range(&self) -> (f64, f64) {
        value_range(&self.puts)
    }
}

fn value_range(m: &Array2<f64>) -> (f64, f64) {
    m.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Prices and Greeks at the config's current spot and volatility.
pub fn spot_metrics(config: &HeatmapConfig) -> Result<PricingResult, PricingError> {
    let res = config.params()?.price();
    if !res.is_finite() {
        warn!(?res, "point metrics are not finite");
    }
    Ok(res)
}
