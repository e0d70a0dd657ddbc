//! Fraction list prices by tier and currency

use std::collections::HashMap;

use crate::purchase::{Currency, PriceTier};

/// List price catalog for a fraction
///
/// The input layer resolves the unit price from tier + currency unless the
/// caller supplies an explicit price.
#[derive(Debug, Clone)]
pub struct PriceList {
    prices: HashMap<(PriceTier, Currency), f64>,
}

impl PriceList {
    /// Current launch price sheet
    pub fn default_list() -> Self {
        let mut prices = HashMap::new();
        prices.insert((PriceTier::PreSale, Currency::Mxn), 449_500.0);
        prices.insert((PriceTier::PreSale, Currency::Usd), 24_500.0);
        prices.insert((PriceTier::Discounted, Currency::Mxn), 499_500.0);
        prices.insert((PriceTier::Discounted, Currency::Usd), 27_500.0);
        Self { prices }
    }

    /// Apply loaded price rows on top of the defaults
    ///
    /// Rows only replace the entries they name; tiers absent from the data
    /// keep their default price.
    pub fn from_loaded(entries: &[(PriceTier, Currency, f64)]) -> Self {
        let mut list = Self::default_list();
        for &(tier, currency, price) in entries {
            list.prices.insert((tier, currency), price);
        }
        list
    }

    /// List price for a tier in a currency
    pub fn price(&self, tier: PriceTier, currency: Currency) -> Option<f64> {
        self.prices.get(&(tier, currency)).copied()
    }

    /// Replace a single list price
    pub fn set_price(&mut self, tier: PriceTier, currency: Currency, price: f64) {
        self.prices.insert((tier, currency), price);
    }
}
