//! Projection engine and schedule outputs

mod engine;
mod schedule;

pub use engine::ProjectionEngine;
pub use schedule::{PeriodRecord, Projection, ProjectionSummary, YearlyRecord};
