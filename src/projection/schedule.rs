//! Schedule output structures for projections

use serde::{Deserialize, Serialize};

use crate::purchase::{Currency, PaymentMode};

/// A single row of projection output for one semester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Semester index, 1-based
    pub period: u32,

    /// Year this semester belongs to, 1-based
    pub year: u32,

    /// Position within the year (1 or 2)
    pub period_in_year: u32,

    /// Months elapsed since purchase at the end of this semester
    pub months_elapsed: u32,

    /// Balance carried in from the prior semester (total investment for period 1)
    pub starting_balance: f64,

    /// Yield credited this semester (0 while still financing)
    pub yield_earned: f64,

    /// Balance carried forward: starting balance plus yield
    pub ending_balance: f64,

    /// Appreciated property value at this point on the curve; held flat at
    /// the total investment for USD purchases
    pub appreciation_value: f64,

    /// Blended investor value: yield balance with the principal portion
    /// replaced by the appreciated property value
    pub total_value_with_appreciation: f64,

    /// Whether yields are accruing in this semester
    pub yield_active: bool,
}

/// Aggregate of the two semesters in a projection year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub year: u32,
    pub starting_balance: f64,
    pub ending_balance: f64,

    /// Yield credited across both semesters of the year
    pub total_yield: f64,

    /// Cumulative return on investment at year end, as a percentage
    pub roi_pct: f64,

    /// Appreciated value at year end
    pub appreciation_value: f64,

    /// Blended investor value at year end
    pub total_value_with_appreciation: f64,
}

/// Headline figures derived from the final period
///
/// Echoes the defining inputs so a report renderer can reproduce the full
/// document from this result alone, without recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_investment: f64,
    pub payment_mode: PaymentMode,
    pub annual_rate: f64,
    pub horizon_years: u32,
    pub currency: Currency,

    /// Ending balance of the final semester
    pub final_balance: f64,

    /// Final balance minus total investment
    pub total_returns: f64,

    /// Total return on investment over the horizon, as a percentage
    pub total_roi_pct: f64,

    /// Appreciated value at the end of the horizon
    pub final_appreciation: f64,

    /// Blended investor value at the end of the horizon
    pub final_total_value: f64,

    /// Blended value minus total investment
    pub total_gain: f64,

    /// Year in which yields begin (0 = immediately, for cash purchases)
    pub yields_start_year: u32,
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub summary: ProjectionSummary,

    /// Semester-by-semester schedule
    pub period_records: Vec<PeriodRecord>,

    /// Year-by-year aggregation of the semester schedule
    pub yearly_records: Vec<YearlyRecord>,
}

impl Projection {
    /// Final semester of the schedule
    pub fn final_period(&self) -> Option<&PeriodRecord> {
        self.period_records.last()
    }
}
