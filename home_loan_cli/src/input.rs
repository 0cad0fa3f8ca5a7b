use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use home_loan_lib::loan::{HomeLoan, LoanTerms, Rate};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoanFile {
    loan: LoanRaw,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoanRaw {
    purchase_price: f64,
    down_payment: f64,
    /// Accepts either a bare number or a "6.5%" style string.
    annual_interest_rate: toml::Value,
    loan_term_years: u32,
    annual_property_tax: Option<f64>,
    annual_home_insurance: Option<f64>,
    annual_hoa_fees: Option<f64>,
}

impl LoanRaw {
    fn build(self) -> Result<HomeLoan> {
        let rate = match &self.annual_interest_rate {
            toml::Value::Float(pct) => Rate::from_percent(*pct),
            toml::Value::Integer(pct) => Rate::from_percent(*pct as f64),
            toml::Value::String(s) => s
                .parse()
                .context(format!("Failed to parse interest rate \"{}\"", s))?,
            other => {
                return Err(anyhow!(
                    "Interest rate must be a number or a percent string, got {:?}",
                    other
                ));
            }
        };

        HomeLoan::new(LoanTerms {
            purchase_price: self.purchase_price,
            down_payment: self.down_payment,
            annual_interest_rate: rate,
            loan_term_years: self.loan_term_years,
            annual_property_tax: self.annual_property_tax.unwrap_or(0.0),
            annual_home_insurance: self.annual_home_insurance.unwrap_or(0.0),
            annual_hoa_fees: self.annual_hoa_fees.unwrap_or(0.0),
        })
        .context("Failed to build loan from config")
    }
}

pub fn read_loan(path: &Path) -> Result<HomeLoan> {
    let file: LoanFile = toml::from_str(
        &std::fs::read_to_string(path).context("Failed to read loan file contents")?,
    )
    .context("Failed to parse loan config")?;

    file.loan.build()
}
