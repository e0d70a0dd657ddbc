//! Sweep projections across the permitted yield bands
//!
//! Runs a grid of rate and fraction-count scenarios for both payment modes in
//! parallel and prints one CSV summary row per cell.
//! Accepts config via environment variables:
//!   SWEEP_YEARS, SWEEP_RATE_STEPS, SWEEP_MAX_FRACTIONS, SWEEP_FINANCING_YEARS

use std::env;
use std::time::Instant;

use rayon::prelude::*;

use arven_projections::{Currency, PaymentMode, PriceTier, Purchase, ScenarioRunner};

fn main() {
    env_logger::init();

    let start = Instant::now();

    let years: u32 = env::var("SWEEP_YEARS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    let rate_steps: u32 = env::var("SWEEP_RATE_STEPS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4)
        .max(1);

    let max_fractions: u32 = env::var("SWEEP_MAX_FRACTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4);

    let financing_years: u32 = env::var("SWEEP_FINANCING_YEARS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(2);

    let runner = ScenarioRunner::new();
    let unit_price = runner
        .terms()
        .pricing
        .price(PriceTier::Discounted, Currency::Mxn)
        .expect("discounted MXN list price");

    // Grid: both modes x evenly spaced rates across the band x fraction counts
    let mut cells = Vec::new();
    for mode in [PaymentMode::Cash, PaymentMode::Financed] {
        let band = runner.terms().yield_policy.range_for(mode);
        for step in 0..=rate_steps {
            // Clamp so float error at the top step cannot leave the band
            let rate = band.clamp(band.min + (band.max - band.min) * step as f64 / rate_steps as f64);
            for fractions in 1..=max_fractions {
                cells.push((mode, rate, fractions));
            }
        }
    }

    let rows: Vec<String> = cells
        .par_iter()
        .map(|&(mode, rate, fractions)| {
            let purchase = match mode {
                PaymentMode::Cash => {
                    Purchase::cash(unit_price, fractions, rate, years, Currency::Mxn)
                }
                PaymentMode::Financed => Purchase::financed(
                    unit_price,
                    fractions,
                    rate,
                    years,
                    financing_years,
                    Currency::Mxn,
                ),
            };

            let projection = runner
                .run(&purchase)
                .expect("grid rates stay inside the band");
            let summary = &projection.summary;

            format!(
                "{:?},{:.4},{},{:.2},{:.2},{:.2},{:.2},{:.2}",
                mode,
                rate,
                fractions,
                summary.total_investment,
                summary.final_balance,
                summary.total_returns,
                summary.total_roi_pct,
                summary.final_total_value,
            )
        })
        .collect();

    println!("Mode,Rate,Fractions,Investment,FinalBalance,TotalReturns,TotalROI,FinalTotalValue");
    for row in &rows {
        println!("{}", row);
    }

    eprintln!(
        "{} scenarios in {:.1}ms",
        rows.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
}
