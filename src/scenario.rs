//! Scenario runner for batch projections
//!
//! Pre-builds product terms once, then allows running many projections with
//! different purchases without re-reading CSV overrides.

use crate::error::ProjectionError;
use crate::projection::{Projection, ProjectionEngine};
use crate::purchase::Purchase;
use crate::terms::ProductTerms;

/// Projections at the low end, the purchase's own rate, and the high end of
/// the permitted yield band
///
/// The comparison view charts exactly these three outcomes.
#[derive(Debug, Clone)]
pub struct RateBand {
    pub low: Projection,
    pub selected: Projection,
    pub high: Projection,
}

/// Pre-loaded scenario runner for efficient batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// for fractions in 1..=4 {
///     let purchase = Purchase::cash(price, fractions, rate, years, currency);
///     let projection = runner.run(&purchase)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Pre-loaded product terms
    terms: ProductTerms,
}

impl ScenarioRunner {
    /// Create runner with the default in-memory terms
    pub fn new() -> Self {
        Self {
            terms: ProductTerms::default_terms(),
        }
    }

    /// Create runner by loading term overrides from CSV files
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            terms: ProductTerms::from_csv()?,
        })
    }

    /// Create runner from a specific terms directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            terms: ProductTerms::from_csv_path(path)?,
        })
    }

    /// Create runner with pre-built terms
    pub fn with_terms(terms: ProductTerms) -> Self {
        Self { terms }
    }

    /// Run a single projection
    pub fn run(&self, purchase: &Purchase) -> Result<Projection, ProjectionError> {
        let engine = ProjectionEngine::new(self.terms.clone());
        engine.project(purchase)
    }

    /// Run projections for multiple purchases
    pub fn run_batch(&self, purchases: &[Purchase]) -> Result<Vec<Projection>, ProjectionError> {
        let engine = ProjectionEngine::new(self.terms.clone());
        purchases.iter().map(|p| engine.project(p)).collect()
    }

    /// Project a purchase at the band minimum, its own rate, and the band
    /// maximum for its payment mode
    pub fn run_rate_band(&self, purchase: &Purchase) -> Result<RateBand, ProjectionError> {
        let band = self.terms.yield_policy.range_for(purchase.payment_mode);
        let engine = ProjectionEngine::new(self.terms.clone());

        let mut low_purchase = purchase.clone();
        low_purchase.annual_rate = band.min;
        let mut high_purchase = purchase.clone();
        high_purchase.annual_rate = band.max;

        Ok(RateBand {
            low: engine.project(&low_purchase)?,
            selected: engine.project(purchase)?,
            high: engine.project(&high_purchase)?,
        })
    }

    /// Get reference to the terms for inspection
    pub fn terms(&self) -> &ProductTerms {
        &self.terms
    }

    /// Get mutable reference to the terms for customization
    pub fn terms_mut(&mut self) -> &mut ProductTerms {
        &mut self.terms
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::purchase::Currency;

    #[test]
    fn test_rate_band_ordering() {
        let runner = ScenarioRunner::new();
        let purchase = Purchase::cash(499_500.0, 1, 0.10, 10, Currency::Mxn);

        let band = runner.run_rate_band(&purchase).unwrap();

        assert_eq!(band.low.summary.annual_rate, 0.08);
        assert_eq!(band.selected.summary.annual_rate, 0.10);
        assert_eq!(band.high.summary.annual_rate, 0.12);

        // Higher rate compounds to a higher final balance
        assert!(band.low.summary.final_balance < band.selected.summary.final_balance);
        assert!(band.selected.summary.final_balance < band.high.summary.final_balance);
    }

    #[test]
    fn test_batch_preserves_order() {
        let runner = ScenarioRunner::new();
        let purchases: Vec<_> = (1..=3)
            .map(|count| Purchase::cash(499_500.0, count, 0.10, 5, Currency::Mxn))
            .collect();

        let results = runner.run_batch(&purchases).unwrap();
        assert_eq!(results.len(), 3);
        for (i, projection) in results.iter().enumerate() {
            assert_eq!(
                projection.summary.total_investment,
                499_500.0 * (i + 1) as f64
            );
        }
    }

    #[test]
    fn test_batch_fails_on_any_invalid_purchase() {
        let runner = ScenarioRunner::new();
        let purchases = vec![
            Purchase::cash(499_500.0, 1, 0.10, 5, Currency::Mxn),
            Purchase::cash(-1.0, 1, 0.10, 5, Currency::Mxn),
        ];
        assert!(runner.run_batch(&purchases).is_err());
    }
}
