// Example: heatmap.rs
// Computes call and put price surfaces over a (spot, volatility) grid and writes
// them as SVG heatmaps.
//
// Usage:
//     cargo run --example heatmap
//     cargo run --example heatmap -- <config.toml>
//
// Without a config file the defaults are used: S0=100, K=100, T=1, σ0=0.2,
// r=0.05, spot ±20%, volatility 0.5x-1.5x, 50x50 grid.
// Output: call_heatmap.svg and put_heatmap.svg in the working directory.

use std::env;
use std::error::Error;

use bs_surface::{spot_metrics, HeatmapConfig, PriceSurface, SurfaceCache};
use ndarray::Array2;
use plotters::prelude::*;
use tracing::info;

/// Blue (low) to red (high).
fn heat_color(value: f64, lo: f64, hi: f64) -> HSLColor {
    let t = if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.5
    };
    HSLColor((1.0 - t) * 240.0 / 360.0, 0.85, 0.5)
}

fn cell_width(axis: &[f64]) -> f64 {
    if axis.len() > 1 {
        axis[1] - axis[0]
    } else {
        axis[0].abs().max(1e-3) * 0.1
    }
}

fn draw_heatmap(
    path: &str,
    title: &str,
    surface: &PriceSurface,
    values: &Array2<f64>,
    (lo, hi): (f64, f64),
) -> Result<(), Box<dyn Error>> {
    let ds = cell_width(&surface.spots);
    let dv = cell_width(&surface.vols);
    let x_min = surface.spots[0] - ds / 2.0;
    let x_max = surface.spots[surface.spots.len() - 1] + ds / 2.0;
    let y_min = surface.vols[0] - dv / 2.0;
    let y_max = surface.vols[surface.vols.len() - 1] + dv / 2.0;

    let root = SVGBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!("{} (range {:.2} - {:.2})", title, lo, hi),
            ("sans-serif", 28),
        )
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Spot Price")
        .y_desc("Volatility")
        .draw()?;

    chart.draw_series(values.indexed_iter().map(|((i, j), &v)| {
        let s = surface.spots[j];
        let sigma = surface.vols[i];
        Rectangle::new(
            [
                (s - ds / 2.0, sigma - dv / 2.0),
                (s + ds / 2.0, sigma + dv / 2.0),
            ],
            heat_color(v, lo, hi).filled(),
        )
    }))?;

    root.present()?;
    info!(path, "heatmap written");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match env::args().nth(1) {
        Some(path) => HeatmapConfig::from_file(&path)?,
        None => HeatmapConfig::default(),
    };
    let (spot_min, spot_max) = config.spot_range();
    let (vol_min, vol_max) = config.vol_range();
    println!(
        "Grid: {} x {} | spot [{:.2}, {:.2}] | vol [{:.3}, {:.3}]",
        config.resolution, config.resolution, spot_min, spot_max, vol_min, vol_max
    );

    let point = spot_metrics(&config)?;
    println!("Spot & Vol at Current Values");
    println!("  Call Price: ${:.2}", point.call_price);
    println!("  Put Price:  ${:.2}", point.put_price);

    let mut cache = SurfaceCache::default();
    let surface = cache.get_or_compute(&config)?;
    // A second render with identical inputs is served from the cache.
    let again = cache.get_or_compute(&config)?;
    println!(
        "Cache: {} hit(s), {} miss(es), same surface = {}",
        cache.hits(),
        cache.misses(),
        std::sync::Arc::ptr_eq(&surface, &again)
    );

    draw_heatmap(
        "call_heatmap.svg",
        "CALL Prices",
        &surface,
        &surface.calls,
        surface.call_range(),
    )?;
    draw_heatmap(
        "put_heatmap.svg",
        "PUT Prices",
        &surface,
        &surface.puts,
        surface.put_range(),
    )?;

    println!("Heatmaps saved to call_heatmap.svg and put_heatmap.svg");
    Ok(())
}
