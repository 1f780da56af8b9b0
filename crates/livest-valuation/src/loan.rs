//! Home loan (EMI) estimator

use crate::config::ValuationConfig;
use crate::engine::Valuation;
use crate::error::{Result, ValuationError};
use serde::{Deserialize, Serialize};

/// Longest tenure the estimator accepts
pub const MAX_TENURE_YEARS: u32 = 50;

/// Inputs to the EMI formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed, in rupees
    pub principal: f64,
    /// Annual interest rate in percent, e.g. `8.5`
    pub annual_rate_percent: f64,
    pub tenure_years: u32,
}

/// Monthly instalment and what it adds up to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiBreakdown {
    /// Monthly instalment in whole rupees
    pub emi: f64,
    pub months: u32,
    pub total_payable: f64,
    pub total_interest: f64,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, tenure_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure_years,
        }
    }

    /// Default terms borrowing the full valuation, or the configured
    /// fallback principal when there is none yet
    pub fn from_config(config: &ValuationConfig, valuation: Option<&Valuation>) -> Self {
        let principal = valuation.map_or(config.fallback_principal, |v| v.estimated_price);
        Self::new(principal, config.loan_rate_percent, config.loan_tenure_years)
    }

    pub fn with_principal(mut self, principal: f64) -> Self {
        self.principal = principal;
        self
    }

    pub fn with_rate(mut self, annual_rate_percent: f64) -> Self {
        self.annual_rate_percent = annual_rate_percent;
        self
    }

    pub fn with_tenure(mut self, tenure_years: u32) -> Self {
        self.tenure_years = tenure_years;
        self
    }

    pub fn months(&self) -> u32 {
        self.tenure_years.saturating_mul(12)
    }

    fn validate(&self) -> Result<()> {
        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(ValuationError::invalid(
                "principal",
                "loan amount must be a non-negative number",
            ));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(ValuationError::invalid(
                "annual_rate_percent",
                "interest rate must be a non-negative number",
            ));
        }
        if self.tenure_years == 0 {
            return Err(ValuationError::invalid(
                "tenure_years",
                "tenure must be at least one year",
            ));
        }
        if self.tenure_years > MAX_TENURE_YEARS {
            return Err(ValuationError::invalid(
                "tenure_years",
                format!("tenure must be at most {MAX_TENURE_YEARS} years"),
            ));
        }
        Ok(())
    }

    /// Monthly instalment rounded to whole rupees.
    ///
    /// `P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly rate and `n`
    /// the number of months; a zero rate splits the principal evenly.
    pub fn monthly_emi(&self) -> Result<f64> {
        self.validate()?;

        let n = f64::from(self.months());
        let r = self.annual_rate_percent / 12.0 / 100.0;
        if r == 0.0 {
            return Ok((self.principal / n).round());
        }

        let growth = (1.0 + r).powf(n);
        Ok((self.principal * r * growth / (growth - 1.0)).round())
    }

    /// EMI plus totals over the whole tenure
    pub fn breakdown(&self) -> Result<EmiBreakdown> {
        let emi = self.monthly_emi()?;
        let months = self.months();
        let total_payable = emi * f64::from(months);
        Ok(EmiBreakdown {
            emi,
            months,
            total_payable,
            total_interest: (total_payable - self.principal).max(0.0),
        })
    }
}
