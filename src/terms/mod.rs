//! Product terms: yield bands, appreciation curve, and list prices

mod appreciation;
mod pricing;
mod yields;
pub mod loader;

pub use appreciation::AppreciationModel;
pub use loader::LoadedTerms;
pub use pricing::PriceList;
pub use yields::{effective_annual_rate, YieldRange, YieldRangePolicy};

use std::path::Path;

/// Container for all product terms a projection depends on
#[derive(Debug, Clone)]
pub struct ProductTerms {
    pub yield_policy: YieldRangePolicy,
    pub appreciation: AppreciationModel,
    pub pricing: PriceList,
}

impl ProductTerms {
    /// Terms matching the currently marketed product
    pub fn default_terms() -> Self {
        Self {
            yield_policy: YieldRangePolicy::default_bands(),
            appreciation: AppreciationModel::default_curve(),
            pricing: PriceList::default_list(),
        }
    }

    /// Load term overrides from CSV files in the default location (data/terms/)
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TERMS_PATH))
    }

    /// Load term overrides from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let loaded = LoadedTerms::load_from(path)?;

        Ok(Self {
            yield_policy: YieldRangePolicy::from_bands(loaded.cash_band, loaded.financed_band),
            appreciation: AppreciationModel::new(
                loaded.appreciation_ceiling,
                loaded.appreciation_ramp_months,
            ),
            pricing: PriceList::from_loaded(&loaded.prices),
        })
    }
}

impl Default for ProductTerms {
    fn default() -> Self {
        Self::default_terms()
    }
}
