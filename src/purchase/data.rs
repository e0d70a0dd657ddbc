//! Purchase input structures for projection runs

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Currency a purchase is denominated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Mexican pesos (the product's base currency)
    Mxn,
    /// US dollars
    Usd,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Mxn => "MXN",
            Currency::Usd => "USD",
        }
    }

    /// Display symbol; both es-MX pesos and en-US dollars use the dollar sign
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Mxn => "$",
            Currency::Usd => "$",
        }
    }
}

/// How the purchase is paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    /// Paid in full upfront; yields accrue from the first semester
    Cash,
    /// Principal is paid off over a financing period; yields start after payoff
    Financed,
}

/// List-price tier for a fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    /// Pre-construction launch price
    PreSale,
    /// Current discounted price
    Discounted,
}

/// A single fractional purchase to project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    /// Price of one fraction in `currency` units
    pub unit_price: f64,

    /// Number of fractions purchased
    pub unit_count: u32,

    /// Payment mode (drives both the yield band and yield activation)
    pub payment_mode: PaymentMode,

    /// Annual yield rate as a decimal fraction (e.g. 0.10 for 10%)
    pub annual_rate: f64,

    /// Projection length in years
    pub horizon_years: u32,

    /// Years needed to pay off the principal; only meaningful for Financed
    #[serde(default)]
    pub financing_years: u32,

    /// Currency the purchase is denominated in
    pub currency: Currency,
}

impl Purchase {
    /// Create a cash purchase (no financing period)
    pub fn cash(
        unit_price: f64,
        unit_count: u32,
        annual_rate: f64,
        horizon_years: u32,
        currency: Currency,
    ) -> Self {
        Self {
            unit_price,
            unit_count,
            payment_mode: PaymentMode::Cash,
            annual_rate,
            horizon_years,
            financing_years: 0,
            currency,
        }
    }

    /// Create a financed purchase
    pub fn financed(
        unit_price: f64,
        unit_count: u32,
        annual_rate: f64,
        horizon_years: u32,
        financing_years: u32,
        currency: Currency,
    ) -> Self {
        Self {
            unit_price,
            unit_count,
            payment_mode: PaymentMode::Financed,
            annual_rate,
            horizon_years,
            financing_years,
            currency,
        }
    }

    /// Total invested capital across all fractions
    pub fn total_investment(&self) -> f64 {
        self.unit_price * self.unit_count as f64
    }

    /// Number of semesters in the projection
    pub fn total_periods(&self) -> u32 {
        self.horizon_years * 2
    }

    /// Last semester with no yield accrual (0 = yields active from period 1)
    ///
    /// Financed purchases accrue nothing until the principal is paid off; the
    /// financing period is ignored for cash purchases.
    pub fn yields_start_period(&self) -> u32 {
        match self.payment_mode {
            PaymentMode::Cash => 0,
            PaymentMode::Financed => self.financing_years * 2,
        }
    }

    /// Year in which yields begin accruing (0 = immediately)
    pub fn yields_start_year(&self) -> u32 {
        match self.payment_mode {
            PaymentMode::Cash => 0,
            PaymentMode::Financed => self.financing_years,
        }
    }

    /// Structural validation of the purchase inputs.
    ///
    /// The yield band check depends on the product terms and lives in the
    /// engine; everything checkable from the purchase alone is checked here.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !(self.unit_price > 0.0) {
            return Err(ProjectionError::InvalidInput(format!(
                "unit price must be positive, got {}",
                self.unit_price
            )));
        }
        if self.unit_count < 1 {
            return Err(ProjectionError::InvalidInput(
                "unit count must be at least 1".to_string(),
            ));
        }
        if self.horizon_years < 1 {
            return Err(ProjectionError::InvalidInput(
                "projection horizon must be at least 1 year".to_string(),
            ));
        }
        if self.payment_mode == PaymentMode::Financed && self.financing_years < 1 {
            return Err(ProjectionError::InvalidInput(
                "financed purchases need a financing period of at least 1 year".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_purchase() -> Purchase {
        Purchase::cash(499_500.0, 1, 0.10, 10, Currency::Mxn)
    }

    #[test]
    fn test_total_investment() {
        let mut p = base_purchase();
        p.unit_count = 3;
        assert_eq!(p.total_investment(), 1_498_500.0);
    }

    #[test]
    fn test_yield_activation_timing() {
        let cash = base_purchase();
        assert_eq!(cash.yields_start_period(), 0);
        assert_eq!(cash.yields_start_year(), 0);

        let financed = Purchase::financed(499_500.0, 1, 0.06, 10, 2, Currency::Mxn);
        assert_eq!(financed.yields_start_period(), 4);
        assert_eq!(financed.yields_start_year(), 2);
        assert_eq!(financed.total_periods(), 20);
    }

    #[test]
    fn test_validation_rejects_bad_inputs() {
        let mut p = base_purchase();
        p.unit_price = 0.0;
        assert!(p.validate().is_err());

        let mut p = base_purchase();
        p.unit_price = -1.0;
        assert!(p.validate().is_err());

        let mut p = base_purchase();
        p.unit_count = 0;
        assert!(p.validate().is_err());

        let mut p = base_purchase();
        p.horizon_years = 0;
        assert!(p.validate().is_err());

        let mut p = Purchase::financed(499_500.0, 1, 0.06, 10, 2, Currency::Mxn);
        p.financing_years = 0;
        assert!(p.validate().is_err());

        // Financing period is ignored for cash purchases
        let mut p = base_purchase();
        p.financing_years = 0;
        assert!(p.validate().is_ok());
    }
}
