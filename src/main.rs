//! Projection CLI
//!
//! Command-line interface for running investment projections

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, ValueEnum};

use arven_projections::terms::effective_annual_rate;
use arven_projections::{
    format_currency, format_percent, Currency, PaymentMode, PriceTier, ProductTerms,
    ProjectionEngine, Purchase,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Cash,
    Financed,
}

impl From<ModeArg> for PaymentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Cash => PaymentMode::Cash,
            ModeArg::Financed => PaymentMode::Financed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CurrencyArg {
    Mxn,
    Usd,
}

impl From<CurrencyArg> for Currency {
    fn from(currency: CurrencyArg) -> Self {
        match currency {
            CurrencyArg::Mxn => Currency::Mxn,
            CurrencyArg::Usd => Currency::Usd,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TierArg {
    PreSale,
    Discounted,
}

impl From<TierArg> for PriceTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::PreSale => PriceTier::PreSale,
            TierArg::Discounted => PriceTier::Discounted,
        }
    }
}

/// Run an investment projection and print the schedule
#[derive(Parser)]
#[command(
    name = "arven_projections",
    version,
    about = "Investment projection calculator for fractional villa ownership"
)]
struct Args {
    /// Price per fraction; defaults to the list price for --tier
    #[arg(long)]
    price: Option<f64>,

    /// List-price tier used when no explicit price is given
    #[arg(long, value_enum, default_value = "discounted")]
    tier: TierArg,

    /// Number of fractions purchased
    #[arg(long, default_value_t = 1)]
    fractions: u32,

    /// Payment mode
    #[arg(long, value_enum, default_value = "cash")]
    mode: ModeArg,

    /// Annual yield rate as a decimal; defaults to the midpoint of the band
    #[arg(long)]
    rate: Option<f64>,

    /// Projection horizon in years
    #[arg(long, default_value_t = 10)]
    years: u32,

    /// Years to pay off a financed purchase
    #[arg(long, default_value_t = 2)]
    financing_years: u32,

    /// Purchase currency
    #[arg(long, value_enum, default_value = "mxn")]
    currency: CurrencyArg,

    /// Directory with CSV term overrides
    #[arg(long)]
    terms_dir: Option<PathBuf>,

    /// Write the full semester schedule to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full projection as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let terms = match &args.terms_dir {
        Some(dir) => ProductTerms::from_csv_path(dir)
            .map_err(|e| anyhow::anyhow!("failed to load terms from {}: {}", dir.display(), e))?,
        None => ProductTerms::default_terms(),
    };

    let mode = PaymentMode::from(args.mode);
    let currency = Currency::from(args.currency);
    let tier = PriceTier::from(args.tier);

    let band = terms.yield_policy.range_for(mode);
    let rate = args.rate.unwrap_or_else(|| band.midpoint());
    let price = match args.price {
        Some(price) => price,
        None => terms
            .pricing
            .price(tier, currency)
            .with_context(|| format!("no list price for {:?}/{:?}", tier, currency))?,
    };

    let purchase = Purchase {
        unit_price: price,
        unit_count: args.fractions,
        payment_mode: mode,
        annual_rate: rate,
        horizon_years: args.years,
        financing_years: args.financing_years,
        currency,
    };

    let engine = ProjectionEngine::new(terms);
    let projection = engine.project(&purchase)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
        return Ok(());
    }

    println!("Arven Projections v0.1.0");
    println!("Generated {}", Local::now().format("%Y-%m-%d %H:%M"));
    println!();
    println!("Purchase:");
    println!(
        "  Price per fraction: {}",
        format_currency(purchase.unit_price, currency)
    );
    println!("  Fractions: {}", purchase.unit_count);
    println!("  Mode: {:?}", mode);
    println!(
        "  Annual rate: {} (effective {})",
        format_percent(rate * 100.0),
        format_percent(effective_annual_rate(rate) * 100.0)
    );
    println!("  Horizon: {} years", purchase.horizon_years);
    if mode == PaymentMode::Financed {
        println!("  Financing period: {} years", purchase.financing_years);
    }
    println!();

    // Console shows the first 24 semesters; --csv gets the full schedule
    println!("Semester Schedule:");
    println!(
        "{:>7} {:>5} {:>9} {:>16} {:>14} {:>16} {:>16} {:>10}",
        "Period", "Year", "Semester", "Starting", "Yield", "Ending", "TotalValue", "Status"
    );
    println!("{}", "-".repeat(102));

    for row in projection.period_records.iter().take(24) {
        println!(
            "{:>7} {:>5} {:>9} {:>16} {:>14} {:>16} {:>16} {:>10}",
            row.period,
            row.year,
            format!("S{}", row.period_in_year),
            format_currency(row.starting_balance, currency),
            format_currency(row.yield_earned, currency),
            format_currency(row.ending_balance, currency),
            format_currency(row.total_value_with_appreciation, currency),
            if row.yield_active { "active" } else { "financing" },
        );
    }
    if projection.period_records.len() > 24 {
        println!(
            "... ({} more semesters)",
            projection.period_records.len() - 24
        );
    }

    println!();
    println!("Yearly Projection:");
    println!(
        "{:>5} {:>16} {:>14} {:>16} {:>16} {:>16} {:>9}",
        "Year", "Starting", "Yield", "Ending", "Appreciation", "TotalValue", "ROI"
    );
    println!("{}", "-".repeat(98));
    for year in &projection.yearly_records {
        let appreciation = if currency == Currency::Mxn {
            format_currency(year.appreciation_value, currency)
        } else {
            "N/A".to_string()
        };
        println!(
            "{:>5} {:>16} {:>14} {:>16} {:>16} {:>16} {:>9}",
            year.year,
            format_currency(year.starting_balance, currency),
            format_currency(year.total_yield, currency),
            format_currency(year.ending_balance, currency),
            appreciation,
            format_currency(year.total_value_with_appreciation, currency),
            format_percent(year.roi_pct),
        );
    }

    if let Some(csv_path) = &args.csv {
        let mut file = File::create(csv_path)
            .with_context(|| format!("unable to create {}", csv_path.display()))?;

        writeln!(
            file,
            "Period,Year,Semester,MonthsElapsed,StartingBalance,YieldEarned,EndingBalance,AppreciationValue,TotalValueWithAppreciation,YieldActive"
        )?;
        for row in &projection.period_records {
            writeln!(
                file,
                "{},{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{}",
                row.period,
                row.year,
                row.period_in_year,
                row.months_elapsed,
                row.starting_balance,
                row.yield_earned,
                row.ending_balance,
                row.appreciation_value,
                row.total_value_with_appreciation,
                row.yield_active,
            )?;
        }

        println!();
        println!("Full schedule written to: {}", csv_path.display());
    }

    let summary = &projection.summary;
    println!();
    println!("Summary:");
    println!(
        "  Total investment: {}",
        format_currency(summary.total_investment, currency)
    );
    println!(
        "  Final balance: {}",
        format_currency(summary.final_balance, currency)
    );
    println!(
        "  Total returns: {}",
        format_currency(summary.total_returns, currency)
    );
    println!("  Total ROI: {}", format_percent(summary.total_roi_pct));
    if currency == Currency::Mxn {
        println!(
            "  Final appreciation: {}",
            format_currency(summary.final_appreciation, currency)
        );
    }
    println!(
        "  Final total value: {}",
        format_currency(summary.final_total_value, currency)
    );
    println!(
        "  Total gain: {}",
        format_currency(summary.total_gain, currency)
    );
    if summary.yields_start_year > 0 {
        println!(
            "  Yield accrual begins after year {}",
            summary.yields_start_year
        );
    }

    Ok(())
}
