// Closed-form Black-Scholes pricing for European options without dividends.
// Prices and the two spot Greeks (delta, gamma) come out of one evaluation of
// d1/d2 so the single-point and grid call sites share the same kernel.

use std::f64::consts::{PI, SQRT_2};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;

use crate::error::PricingError;

/// Standard normal cumulative distribution function.
///
/// Evaluated as `0.5 * erfc(-x / sqrt(2))`, which keeps relative accuracy in
/// the lower tail where `0.5 * (1 + erf(x))` cancels.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal probability density function.
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            other => Err(format!("Invalid option type: {}", other)),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Check a pricing request against the model's domain.
///
/// `T`, `K`, `S` and `sigma` must be finite and strictly positive; `r` may take
/// any finite value, including negative rates.
#[allow(non_snake_case)]
pub fn validate(T: f64, K: f64, S: f64, sigma: f64, r: f64) -> Result<(), PricingError> {
    positive("time_to_maturity", T)?;
    positive("strike", K)?;
    positive("current_price", S)?;
    positive("volatility", sigma)?;
    finite("interest_rate", r)
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter { name, value })
    }
}

pub(crate) fn finite(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter { name, value })
    }
}

/// A validated Black-Scholes pricing request.
///
/// Fields are private so that every instance has passed [`validate`]; use
/// [`OptionParams::new`] to build one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionParams {
    time_to_maturity: f64,
    strike: f64,
    current_price: f64,
    volatility: f64,
    interest_rate: f64,
}

impl OptionParams {
    /// Build a request, rejecting inputs outside the model's domain.
    pub fn new(
        time_to_maturity: f64,
        strike: f64,
        current_price: f64,
        volatility: f64,
        interest_rate: f64,
    ) -> Result<Self, PricingError> {
        validate(
            time_to_maturity,
            strike,
            current_price,
            volatility,
            interest_rate,
        )?;
        Ok(Self {
            time_to_maturity,
            strike,
            current_price,
            volatility,
            interest_rate,
        })
    }

    pub fn time_to_maturity(&self) -> f64 {
        self.time_to_maturity
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    /// Discount factor `exp(-r * T)`.
    pub fn discount_factor(&self) -> f64 {
        (-self.interest_rate * self.time_to_maturity).exp()
    }

    /// Price the request. Infallible because construction already validated it.
    pub fn price(&self) -> PricingResult {
        evaluate(
            self.time_to_maturity,
            self.strike,
            self.current_price,
            self.volatility,
            self.interest_rate,
        )
    }
}

/// Prices and Greeks for one pricing request.
///
/// Gamma is shared by the call and the put under Black-Scholes without
/// dividends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub call_price: f64,
    pub put_price: f64,
    pub call_delta: f64,
    pub put_delta: f64,
    pub gamma: f64,
}

impl PricingResult {
    pub fn call_gamma(&self) -> f64 {
        self.gamma
    }

    pub fn put_gamma(&self) -> f64 {
        self.gamma
    }

    pub fn price_of(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_price,
            OptionType::Put => self.put_price,
        }
    }

    pub fn delta_of(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_delta,
            OptionType::Put => self.put_delta,
        }
    }

    /// Whether every field is finite. Extreme but valid inputs (e.g. very
    /// large `T * sigma^2`) can overflow intermediate terms.
    pub fn is_finite(&self) -> bool {
        self.call_price.is_finite()
            && self.put_price.is_finite()
            && self.call_delta.is_finite()
            && self.put_delta.is_finite()
            && self.gamma.is_finite()
    }
}

/// Price a European call and put and their spot Greeks.
///
/// # Errors
///
/// [`PricingError::InvalidParameter`] if `T`, `K`, `S` or `sigma` is not a
/// strictly positive finite number, or `r` is not finite.
///
/// # Example
///
/// ```rust
/// use bs_surface::models::bs::price;
///
/// let res = price(2.0, 90.0, 100.0, 0.2, 0.05)?;
/// assert!((res.call_price - 22.0334).abs() < 1e-4);
/// # Ok::<(), bs_surface::PricingError>(())
/// ```
#[allow(non_snake_case)]
pub fn price(T: f64, K: f64, S: f64, sigma: f64, r: f64) -> Result<PricingResult, PricingError> {
    validate(T, K, S, sigma, r)?;
    Ok(evaluate(T, K, S, sigma, r))
}

/// Price of a European call under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn call_price(T: f64, K: f64, S: f64, sigma: f64, r: f64) -> Result<f64, PricingError> {
    price(T, K, S, sigma, r).map(|res| res.call_price)
}

/// Price of a European put under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn put_price(T: f64, K: f64, S: f64, sigma: f64, r: f64) -> Result<f64, PricingError> {
    price(T, K, S, sigma, r).map(|res| res.put_price)
}

/// Unchecked kernel. Callers must have validated the inputs.
#[allow(non_snake_case)]
pub(crate) fn evaluate(T: f64, K: f64, S: f64, sigma: f64, r: f64) -> PricingResult {
    let sqrt_t = T.sqrt();
    let vt = sigma * sqrt_t;
    let drift = (r + 0.5 * sigma * sigma) * T;
    let d1 = ((S / K).ln() + drift) / vt;
    let d2 = d1 - vt;
    let nd1 = norm_cdf(d1);
    let df = (-r * T).exp();

    PricingResult {
        call_price: S * nd1 - K * df * norm_cdf(d2),
        put_price: K * df * norm_cdf(-d2) - S * norm_cdf(-d1),
        call_delta: nd1,
        put_delta: nd1 - 1.0,
        gamma: norm_pdf(d1) / (S * vt),
    }
}
