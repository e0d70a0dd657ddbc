//! CSV-based terms loader
//!
//! Loads product term overrides from CSV files in data/terms/

use std::error::Error;
use std::fs::File;
use std::path::Path;

use super::yields::YieldRange;
use crate::purchase::{Currency, PriceTier};

/// Default path to the terms directory
pub const DEFAULT_TERMS_PATH: &str = "data/terms";

/// Raw CSV row matching price_list.csv columns
#[derive(Debug, serde::Deserialize)]
struct PriceRow {
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Price")]
    price: f64,
}

impl PriceRow {
    fn to_entry(self) -> Result<(PriceTier, Currency, f64), Box<dyn Error>> {
        let tier = match self.tier.as_str() {
            "PreSale" => PriceTier::PreSale,
            "Discounted" => PriceTier::Discounted,
            other => return Err(format!("Unknown Tier: {}", other).into()),
        };

        let currency = match self.currency.as_str() {
            "MXN" => Currency::Mxn,
            "USD" => Currency::Usd,
            other => return Err(format!("Unknown Currency: {}", other).into()),
        };

        if !(self.price > 0.0) {
            return Err(format!("Non-positive price for {}/{}", self.tier, self.currency).into());
        }

        Ok((tier, currency, self.price))
    }
}

/// Load the yield bands from yield_ranges.csv
///
/// Columns: Mode,MinRate,MaxRate with one row per payment mode.
/// Returns (cash_band, financed_band).
pub fn load_yield_ranges(path: &Path) -> Result<(YieldRange, YieldRange), Box<dyn Error>> {
    let file = File::open(path.join("yield_ranges.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut cash = None;
    let mut financed = None;

    for result in reader.records() {
        let record = result?;
        let min: f64 = record[1].parse()?;
        let max: f64 = record[2].parse()?;

        if min > max {
            return Err(format!("Inverted band for {}: {} > {}", &record[0], min, max).into());
        }

        match &record[0] {
            "Cash" => cash = Some(YieldRange { min, max }),
            "Financed" => financed = Some(YieldRange { min, max }),
            other => return Err(format!("Unknown Mode: {}", other).into()),
        }
    }

    match (cash, financed) {
        (Some(cash), Some(financed)) => Ok((cash, financed)),
        _ => Err("yield_ranges.csv must define both Cash and Financed bands".into()),
    }
}

/// Load the appreciation curve parameters from appreciation.csv
///
/// Columns: Ceiling,RampMonths with a single data row.
pub fn load_appreciation(path: &Path) -> Result<(f64, u32), Box<dyn Error>> {
    let file = File::open(path.join("appreciation.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    for result in reader.records() {
        let record = result?;
        let ceiling: f64 = record[0].parse()?;
        let ramp_months: u32 = record[1].parse()?;

        if !(ceiling > 0.0) {
            return Err("appreciation ceiling must be positive".into());
        }
        if ramp_months == 0 {
            return Err("appreciation ramp must be at least 1 month".into());
        }

        return Ok((ceiling, ramp_months));
    }

    Err("appreciation.csv has no data row".into())
}

/// Load list price rows from price_list.csv
pub fn load_price_list(path: &Path) -> Result<Vec<(PriceTier, Currency, f64)>, Box<dyn Error>> {
    let file = File::open(path.join("price_list.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let row: PriceRow = result?;
        entries.push(row.to_entry()?);
    }

    Ok(entries)
}

/// Raw terms data loaded from CSV, before model construction
#[derive(Debug)]
pub struct LoadedTerms {
    pub cash_band: YieldRange,
    pub financed_band: YieldRange,
    pub appreciation_ceiling: f64,
    pub appreciation_ramp_months: u32,
    pub prices: Vec<(PriceTier, Currency, f64)>,
}

impl LoadedTerms {
    /// Load all term files from a directory
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        let (cash_band, financed_band) = load_yield_ranges(path)?;
        let (appreciation_ceiling, appreciation_ramp_months) = load_appreciation(path)?;
        let prices = load_price_list(path)?;

        Ok(Self {
            cash_band,
            financed_band,
            appreciation_ceiling,
            appreciation_ramp_months,
            prices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn test_load_terms_from_csv() {
        let dir = std::env::temp_dir().join("arven_projections_terms_test");
        fs::create_dir_all(&dir).unwrap();

        let mut f = File::create(dir.join("yield_ranges.csv")).unwrap();
        writeln!(f, "Mode,MinRate,MaxRate").unwrap();
        writeln!(f, "Cash,0.08,0.12").unwrap();
        writeln!(f, "Financed,0.05,0.08").unwrap();

        let mut f = File::create(dir.join("appreciation.csv")).unwrap();
        writeln!(f, "Ceiling,RampMonths").unwrap();
        writeln!(f, "850000,20").unwrap();

        let mut f = File::create(dir.join("price_list.csv")).unwrap();
        writeln!(f, "Tier,Currency,Price").unwrap();
        writeln!(f, "PreSale,MXN,449500").unwrap();
        writeln!(f, "Discounted,MXN,525000").unwrap();

        let loaded = LoadedTerms::load_from(&dir).unwrap();
        assert_eq!(loaded.cash_band.min, 0.08);
        assert_eq!(loaded.financed_band.max, 0.08);
        assert_eq!(loaded.appreciation_ceiling, 850_000.0);
        assert_eq!(loaded.appreciation_ramp_months, 20);
        assert_eq!(loaded.prices.len(), 2);
        assert_eq!(
            loaded.prices[1],
            (PriceTier::Discounted, Currency::Mxn, 525_000.0)
        );
    }
}
