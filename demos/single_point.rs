// Example: single_point.rs
// Prices the reference request (T=2, K=90, S=100, σ=0.2, r=0.05) and prints
// prices and Greeks.
//
// Usage:
//     cargo run --example single_point
//     cargo run --example single_point -- <T> <K> <S> <sigma> <r>

use std::env;

use anyhow::{Context, Result};
use bs_surface::OptionParams;

fn parse_args(args: &[String]) -> Result<OptionParams> {
    if args.len() == 1 {
        return Ok(OptionParams::new(2.0, 90.0, 100.0, 0.2, 0.05)?);
    }
    if args.len() != 6 {
        anyhow::bail!(
            "Usage: {} [<time_to_maturity> <strike> <current_price> <volatility> <interest_rate>]",
            args[0]
        );
    }

    let mut values = [0.0; 5];
    for (slot, raw) in values.iter_mut().zip(&args[1..]) {
        *slot = raw
            .parse()
            .with_context(|| format!("Not a number: {}", raw))?;
    }
    let [t, k, s, sigma, r] = values;
    Ok(OptionParams::new(t, k, s, sigma, r)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let params = parse_args(&args)?;
    let res = params.price();

    println!(
        "Call Price: {:.4}, Put Price: {:.4}",
        res.call_price, res.put_price
    );
    println!(
        "Call Delta: {:.4}, Put Delta: {:.4}",
        res.call_delta, res.put_delta
    );
    println!("Gamma: {:.4}", res.call_gamma());
    Ok(())
}
