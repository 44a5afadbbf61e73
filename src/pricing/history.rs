//! 90-day price history generation.
//!
//! Two paths produce a [`PriceHistory`]:
//!
//! - [`synthesize`] fabricates a whole product (demo mode) from nothing but
//!   the identifier and a random source.
//! - [`anchored_history`] builds a curve around a real, scraped price.
//!
//! Every random draw goes through the `rng` argument, so a seeded generator
//! reproduces a series exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::category::{ProductCategory, Volatility};

pub const HISTORY_DAYS: usize = 90;

/// No synthetic price ever drops below this share of its base price.
const FLOOR_RATIO: f64 = 0.7;

/// Number of trailing days pushed down so "now" reads as a deal.
const FINAL_DAYS: usize = 5;

const CHEAP_FINAL_DISCOUNT: f64 = 0.9;
const PREMIUM_FINAL_DISCOUNT: f64 = 0.95;
const PREMIUM_THRESHOLD: f64 = 500.0;

/// Scraped prices are assumed to be this far below the usual price.
const LIVE_MARKUP: f64 = 1.15;

/// Day-to-day moves below this share of the baseline are flattened.
const STICKY_RATIO: f64 = 0.005;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub series: Vec<f64>,
    pub current_price: f64,
    pub peak_price: f64,
    pub lowest_price: f64,
}

impl PriceHistory {
    /// Derives peak and lowest from `series`; `current_price` is supplied by
    /// the caller because a live lookup reports the scraped price.
    #[must_use]
    pub fn new(series: Vec<f64>, current_price: f64) -> Self {
        let peak_price = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lowest_price = series.iter().copied().fold(f64::INFINITY, f64::min);
        Self {
            series,
            current_price,
            peak_price,
            lowest_price,
        }
    }

    /// History whose current price is simply the last sample.
    #[must_use]
    pub fn from_series(series: Vec<f64>) -> Self {
        let current = series.last().copied().unwrap_or_default();
        Self::new(series, current)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticProduct {
    pub asin: String,
    pub title: String,
    pub category: ProductCategory,
    pub base_price: f64,
    pub history: PriceHistory,
}

/// Fabricates a complete demo product for `asin`.
pub fn synthesize<R: Rng + ?Sized>(asin: &str, rng: &mut R) -> SyntheticProduct {
    let category = ProductCategory::infer(asin);
    let base_price = category.sample_base_price(rng);
    let series = synthesize_series(category, base_price, rng);
    let title = category.sample_title(asin, rng);

    SyntheticProduct {
        asin: asin.to_string(),
        title,
        category,
        base_price,
        history: PriceHistory::from_series(series),
    }
}

/// Builds the demo-mode series for a given category and base price.
pub fn synthesize_series<R: Rng + ?Sized>(
    category: ProductCategory,
    base_price: f64,
    rng: &mut R,
) -> Vec<f64> {
    let volatility = category.volatility();
    let trend = match volatility {
        Volatility::Stable => linspace(base_price * 1.05, base_price, HISTORY_DAYS),
        Volatility::Volatile => {
            let start = base_price * (1.0 - 0.05 * rng.random::<f64>());
            let end = base_price * (1.0 + 0.05 * rng.random::<f64>());
            linspace(start, end, HISTORY_DAYS)
        }
    };
    let (sale_count, sale_discount) = sale_plan(volatility, rng);

    let mut sales = vec![0.0; HISTORY_DAYS];
    overlay_sales(
        rng,
        &mut sales,
        sale_count,
        HISTORY_DAYS - 10,
        5..=10,
        base_price * sale_discount,
    );

    let noise_sigma = base_price * noise_level(base_price);
    let floor = base_price * FLOOR_RATIO;

    let mut series: Vec<f64> = trend
        .iter()
        .zip(&sales)
        .map(|(t, s)| (t + s + gaussian(rng, noise_sigma)).max(floor))
        .collect();

    let discount = if base_price < PREMIUM_THRESHOLD {
        CHEAP_FINAL_DISCOUNT
    } else {
        PREMIUM_FINAL_DISCOUNT
    };
    for price in series.iter_mut().rev().take(FINAL_DAYS) {
        *price *= discount;
    }

    series
}

/// Builds a history ending at a real scraped `price`.
pub fn anchored_history<R: Rng + ?Sized>(price: f64, rng: &mut R) -> PriceHistory {
    let baseline = price * LIVE_MARKUP;
    let mut series = linspace(baseline * 0.95, baseline * 1.05, HISTORY_DAYS);

    let mut sales = vec![0.0; HISTORY_DAYS];

    // One big event (think Black Friday) half of the time.
    if rng.random::<f64>() > 0.5 {
        let start = rng.random_range(20..=70);
        let width = rng.random_range(5..=10);
        fill(&mut sales, start, width, baseline * 0.2);
    }

    let mini_sales = rng.random_range(1..=3);
    overlay_sales(rng, &mut sales, mini_sales, HISTORY_DAYS - 7, 3..=7, baseline * 0.1);

    for (p, s) in series.iter_mut().zip(&sales) {
        *p += s + gaussian(rng, baseline * 0.01);
    }

    blend_toward(&mut series, price);

    let floor = baseline * FLOOR_RATIO;
    for p in &mut series {
        *p = p.max(floor);
    }

    // Real listings rarely move every day; swallow sub-0.5% wiggles.
    hold_small_moves(&mut series, baseline * STICKY_RATIO);

    let series = series.into_iter().map(round_cents).collect();
    PriceHistory::new(series, price)
}

/// Sale count and depth (as a share of base price) for a volatility profile.
fn sale_plan<R: Rng + ?Sized>(volatility: Volatility, rng: &mut R) -> (usize, f64) {
    match volatility {
        Volatility::Stable => (rng.random_range(1..=2), 0.1),
        Volatility::Volatile => (rng.random_range(2..=3), rng.random_range(0.15..0.25)),
    }
}

/// Pulls the last `FINAL_DAYS` samples toward `price`; the weight grows
/// linearly to 1 at `len - FINAL_DAYS`.
fn blend_toward(series: &mut [f64], price: f64) {
    let n = series.len();
    for i in 1..=FINAL_DAYS.min(n) {
        let weight = i as f64 / FINAL_DAYS as f64;
        series[n - i] = series[n - i].mul_add(1.0 - weight, price * weight);
    }
}

/// Copies the previous sample forward whenever the move is under `threshold`.
fn hold_small_moves(series: &mut [f64], threshold: f64) {
    for i in 1..series.len() {
        if (series[i] - series[i - 1]).abs() < threshold {
            series[i] = series[i - 1];
        }
    }
}

fn overlay_sales<R: Rng + ?Sized>(
    rng: &mut R,
    sales: &mut [f64],
    count: usize,
    latest_start: usize,
    width: RangeInclusive<usize>,
    depth: f64,
) {
    for _ in 0..count {
        let start = rng.random_range(0..=latest_start);
        let len = rng.random_range(width.clone());
        fill(sales, start, len, depth);
    }
}

/// Overlapping sales replace each other rather than stacking.
fn fill(sales: &mut [f64], start: usize, len: usize, depth: f64) {
    let end = (start + len).min(sales.len());
    for v in &mut sales[start.min(end)..end] {
        *v = -depth;
    }
}

/// Cheaper items get relatively noisier prices.
fn noise_level(base_price: f64) -> f64 {
    if base_price > 0.0 {
        (5.0 / base_price).min(0.02)
    } else {
        0.02
    }
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Normal sample via Box-Muller. `u1` is drawn from (0, 1] so `ln` stays finite.
fn gaussian<R: Rng + ?Sized>(rng: &mut R, sigma: f64) -> f64 {
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    sigma * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
