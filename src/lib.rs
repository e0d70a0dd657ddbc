//! Arven Projections - Investment projection engine for fractional villa ownership
//!
//! This library provides:
//! - Semi-annual compound yield schedules with a financing delay for
//!   financed purchases
//! - An independent linear property-appreciation curve blended into total
//!   investor value
//! - Mode-specific yield band policy and a list-price catalog, with CSV
//!   overrides
//! - Scenario comparison across the permitted rate band
//! - Display formatting for currency amounts and percentages

pub mod error;
pub mod format;
pub mod projection;
pub mod purchase;
pub mod scenario;
pub mod terms;

// Re-export commonly used types
pub use error::ProjectionError;
pub use format::{format_currency, format_percent};
pub use projection::{PeriodRecord, Projection, ProjectionEngine, ProjectionSummary, YearlyRecord};
pub use purchase::{Currency, PaymentMode, PriceTier, Purchase};
pub use scenario::{RateBand, ScenarioRunner};
pub use terms::{AppreciationModel, PriceList, ProductTerms, YieldRange, YieldRangePolicy};
