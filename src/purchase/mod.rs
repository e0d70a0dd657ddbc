//! Purchase inputs and validation

mod data;

pub use data::{Currency, PaymentMode, PriceTier, Purchase};
