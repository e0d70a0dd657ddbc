//! Core projection engine for semi-annual yield schedules

use log::debug;

use super::schedule::{PeriodRecord, Projection, ProjectionSummary, YearlyRecord};
use crate::error::ProjectionError;
use crate::purchase::{Currency, Purchase};
use crate::terms::ProductTerms;

/// Main projection engine
///
/// Pure and deterministic: safe to call repeatedly (once per input change,
/// once per scenario) since it only allocates fresh output structures.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    terms: ProductTerms,
}

impl ProjectionEngine {
    /// Create an engine with the given product terms
    pub fn new(terms: ProductTerms) -> Self {
        Self { terms }
    }

    /// Create an engine with the currently marketed terms
    pub fn with_default_terms() -> Self {
        Self::new(ProductTerms::default_terms())
    }

    /// Product terms this engine projects under
    pub fn terms(&self) -> &ProductTerms {
        &self.terms
    }

    /// Project a purchase over its full horizon
    ///
    /// Yields compound semester over semester; financed purchases accrue
    /// nothing until the financing period ends. Appreciation runs on its own
    /// curve and only enters the blended total value.
    pub fn project(&self, purchase: &Purchase) -> Result<Projection, ProjectionError> {
        self.validate(purchase)?;

        let total_investment = purchase.total_investment();
        // The annual rate is split evenly across the two semesters and then
        // compounded period over period. This is not a nominal-to-effective
        // conversion: 10% annual credits 5% per semester.
        let semi_annual_rate = purchase.annual_rate / 2.0;
        let total_periods = purchase.total_periods();
        let yields_start_period = purchase.yields_start_period();

        debug!(
            "projecting {} periods, rate {:.4}/semester, yields start after period {}",
            total_periods, semi_annual_rate, yields_start_period
        );

        let mut period_records = Vec::with_capacity(total_periods as usize);
        let mut balance = total_investment;

        for period in 1..=total_periods {
            let starting_balance = balance;
            let yield_active = period > yields_start_period;
            let yield_earned = if yield_active {
                starting_balance * semi_annual_rate
            } else {
                0.0
            };
            let ending_balance = starting_balance + yield_earned;
            let months_elapsed = period * 6;

            let appreciation_value = match purchase.currency {
                Currency::Mxn => self
                    .terms
                    .appreciation
                    .value_at(total_investment, months_elapsed),
                // No USD appreciation curve is defined for the product; the
                // principal portion stays flat and contributes zero gain.
                Currency::Usd => total_investment,
            };

            period_records.push(PeriodRecord {
                period,
                year: (period - 1) / 2 + 1,
                period_in_year: (period - 1) % 2 + 1,
                months_elapsed,
                starting_balance,
                yield_earned,
                ending_balance,
                appreciation_value,
                total_value_with_appreciation: ending_balance - total_investment
                    + appreciation_value,
                yield_active,
            });

            balance = ending_balance;
        }

        let yearly_records = aggregate_years(&period_records, total_investment);

        let final_appreciation = period_records
            .last()
            .map(|p| p.appreciation_value)
            .unwrap_or(total_investment);
        let final_total_value = balance - total_investment + final_appreciation;

        let summary = ProjectionSummary {
            total_investment,
            payment_mode: purchase.payment_mode,
            annual_rate: purchase.annual_rate,
            horizon_years: purchase.horizon_years,
            currency: purchase.currency,
            final_balance: balance,
            total_returns: balance - total_investment,
            total_roi_pct: (balance - total_investment) / total_investment * 100.0,
            final_appreciation,
            final_total_value,
            total_gain: final_total_value - total_investment,
            yields_start_year: purchase.yields_start_year(),
        };

        Ok(Projection {
            summary,
            period_records,
            yearly_records,
        })
    }

    /// Reject invalid purchases before producing any output
    fn validate(&self, purchase: &Purchase) -> Result<(), ProjectionError> {
        purchase.validate()?;

        let band = self.terms.yield_policy.range_for(purchase.payment_mode);
        if !band.contains(purchase.annual_rate) {
            return Err(ProjectionError::InvalidInput(format!(
                "annual rate {:.4} outside the {:?} band [{:.2}, {:.2}]",
                purchase.annual_rate, purchase.payment_mode, band.min, band.max
            )));
        }

        Ok(())
    }
}

/// Group pairs of semesters into yearly aggregates
fn aggregate_years(periods: &[PeriodRecord], total_investment: f64) -> Vec<YearlyRecord> {
    periods
        .chunks(2)
        .map(|year_periods| {
            let first = &year_periods[0];
            let last = &year_periods[year_periods.len() - 1];

            YearlyRecord {
                year: first.year,
                starting_balance: first.starting_balance,
                ending_balance: last.ending_balance,
                total_yield: year_periods.iter().map(|p| p.yield_earned).sum(),
                roi_pct: (last.ending_balance - total_investment) / total_investment * 100.0,
                appreciation_value: last.appreciation_value,
                total_value_with_appreciation: last.total_value_with_appreciation,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::purchase::PaymentMode;
    use approx::assert_relative_eq;

    fn engine() -> ProjectionEngine {
        ProjectionEngine::with_default_terms()
    }

    #[test]
    fn test_cash_scenario_one_year() {
        // 499,500 MXN, one fraction, cash at 10% over 1 year
        let purchase = Purchase::cash(499_500.0, 1, 0.10, 1, Currency::Mxn);
        let projection = engine().project(&purchase).unwrap();

        assert_eq!(projection.period_records.len(), 2);

        let p1 = &projection.period_records[0];
        assert_relative_eq!(p1.starting_balance, 499_500.0);
        assert_relative_eq!(p1.yield_earned, 24_975.0, epsilon = 1e-6);
        assert_relative_eq!(p1.ending_balance, 524_475.0, epsilon = 1e-6);
        assert!(p1.yield_active);

        let p2 = &projection.period_records[1];
        assert_relative_eq!(p2.starting_balance, 524_475.0, epsilon = 1e-6);
        assert_relative_eq!(p2.yield_earned, 26_223.75, epsilon = 1e-6);
        assert_relative_eq!(p2.ending_balance, 550_698.75, epsilon = 1e-6);

        let y1 = &projection.yearly_records[0];
        assert_relative_eq!(y1.total_yield, 51_198.75, epsilon = 1e-6);
        assert_relative_eq!(y1.roi_pct, 10.25, epsilon = 1e-9);

        assert_relative_eq!(projection.summary.final_balance, 550_698.75, epsilon = 1e-6);
        assert_relative_eq!(projection.summary.total_returns, 51_198.75, epsilon = 1e-6);
        assert_eq!(projection.summary.yields_start_year, 0);
    }

    #[test]
    fn test_financed_scenario_delays_yields() {
        // Same purchase financed over 1 year at 6%: the first two semesters
        // pay down principal and earn nothing
        let purchase = Purchase::financed(499_500.0, 1, 0.06, 10, 1, Currency::Mxn);
        let projection = engine().project(&purchase).unwrap();

        let p1 = &projection.period_records[0];
        let p2 = &projection.period_records[1];
        assert!(!p1.yield_active);
        assert!(!p2.yield_active);
        assert_eq!(p1.yield_earned, 0.0);
        assert_eq!(p2.yield_earned, 0.0);
        assert_relative_eq!(p1.ending_balance, 499_500.0);
        assert_relative_eq!(p2.ending_balance, 499_500.0);

        let p3 = &projection.period_records[2];
        assert!(p3.yield_active);
        assert_relative_eq!(p3.starting_balance, 499_500.0);
        assert_relative_eq!(p3.yield_earned, 499_500.0 * 0.03, epsilon = 1e-6);

        assert_eq!(projection.summary.yields_start_year, 1);
    }

    #[test]
    fn test_financed_two_year_delay() {
        let purchase = Purchase::financed(499_500.0, 1, 0.06, 10, 2, Currency::Mxn);
        let projection = engine().project(&purchase).unwrap();

        for p in &projection.period_records[..4] {
            assert!(!p.yield_active);
            assert_eq!(p.yield_earned, 0.0);
        }
        assert!(projection.period_records[4].yield_active);
    }

    #[test]
    fn test_balance_continuity() {
        let purchase = Purchase::cash(499_500.0, 2, 0.12, 15, Currency::Mxn);
        let projection = engine().project(&purchase).unwrap();

        assert_relative_eq!(
            projection.period_records[0].starting_balance,
            purchase.total_investment()
        );
        for pair in projection.period_records.windows(2) {
            assert_relative_eq!(pair[1].starting_balance, pair[0].ending_balance);
        }
    }

    #[test]
    fn test_cash_mode_always_active() {
        let purchase = Purchase::cash(499_500.0, 1, 0.08, 5, Currency::Mxn);
        let projection = engine().project(&purchase).unwrap();
        assert!(projection.period_records.iter().all(|p| p.yield_active));
    }

    #[test]
    fn test_usd_holds_appreciation_flat() {
        let purchase = Purchase::cash(27_500.0, 1, 0.10, 10, Currency::Usd);
        let projection = engine().project(&purchase).unwrap();

        for p in &projection.period_records {
            assert_relative_eq!(p.appreciation_value, 27_500.0);
            // Flat appreciation means the blended value tracks the balance
            assert_relative_eq!(p.total_value_with_appreciation, p.ending_balance, epsilon = 1e-6);
        }
        assert_relative_eq!(
            projection.summary.total_gain,
            projection.summary.total_returns,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_mxn_appreciation_follows_curve() {
        let purchase = Purchase::cash(499_500.0, 1, 0.10, 2, Currency::Mxn);
        let projection = engine().project(&purchase).unwrap();

        // Period 1 ends at month 6 of the 20-month ramp
        let expected_m6 = 499_500.0 + (850_000.0 - 499_500.0) * 6.0 / 20.0;
        assert_relative_eq!(
            projection.period_records[0].appreciation_value,
            expected_m6,
            epsilon = 1e-9
        );

        // Month 24 is past the ramp
        let p4 = &projection.period_records[3];
        assert_relative_eq!(p4.appreciation_value, 850_000.0);
        assert_relative_eq!(
            p4.total_value_with_appreciation,
            p4.ending_balance - 499_500.0 + 850_000.0
        );
    }

    #[test]
    fn test_yearly_records_match_periods() {
        let purchase = Purchase::cash(499_500.0, 1, 0.10, 10, Currency::Mxn);
        let projection = engine().project(&purchase).unwrap();

        assert_eq!(projection.yearly_records.len(), 10);
        for (i, year) in projection.yearly_records.iter().enumerate() {
            let first = &projection.period_records[i * 2];
            let second = &projection.period_records[i * 2 + 1];
            assert_eq!(year.year, (i + 1) as u32);
            assert_relative_eq!(year.starting_balance, first.starting_balance);
            assert_relative_eq!(year.ending_balance, second.ending_balance);
            assert_relative_eq!(year.total_yield, first.yield_earned + second.yield_earned);
            assert_relative_eq!(year.appreciation_value, second.appreciation_value);
            assert_relative_eq!(
                year.total_value_with_appreciation,
                second.total_value_with_appreciation
            );
        }
    }

    #[test]
    fn test_summary_consistency() {
        let purchase = Purchase::financed(499_500.0, 3, 0.07, 12, 2, Currency::Mxn);
        let projection = engine().project(&purchase).unwrap();
        let summary = &projection.summary;
        let last = projection.final_period().unwrap();

        assert_relative_eq!(summary.total_investment, 1_498_500.0);
        assert_relative_eq!(summary.final_balance, last.ending_balance);
        assert_relative_eq!(
            summary.total_returns,
            summary.final_balance - summary.total_investment
        );
        assert_relative_eq!(summary.final_appreciation, last.appreciation_value);
        assert_relative_eq!(summary.final_total_value, last.total_value_with_appreciation);
        assert_relative_eq!(
            summary.total_gain,
            summary.final_total_value - summary.total_investment
        );
        assert_eq!(summary.payment_mode, PaymentMode::Financed);
        assert_eq!(summary.horizon_years, 12);
    }

    #[test]
    fn test_rejects_out_of_band_rate() {
        // 6% is a financed-band rate; cash purchases start at 8%
        let purchase = Purchase::cash(499_500.0, 1, 0.06, 10, Currency::Mxn);
        let err = engine().project(&purchase).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidInput(_)));

        let purchase = Purchase::financed(499_500.0, 1, 0.10, 10, 2, Currency::Mxn);
        assert!(engine().project(&purchase).is_err());

        let mut purchase = Purchase::cash(499_500.0, 1, 0.10, 10, Currency::Mxn);
        purchase.annual_rate = f64::NAN;
        assert!(engine().project(&purchase).is_err());
    }

    #[test]
    fn test_rejects_invalid_structure() {
        let purchase = Purchase::cash(0.0, 1, 0.10, 10, Currency::Mxn);
        assert!(engine().project(&purchase).is_err());

        let purchase = Purchase::cash(499_500.0, 0, 0.10, 10, Currency::Mxn);
        assert!(engine().project(&purchase).is_err());
    }
}
