use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use thousands::Separable;

// Bounds past which input is treated as a typo rather than a loan. The
// annuity formula overflows f64 long before either limit matters.
pub const MAX_TERM_YEARS: u32 = 100;
pub const MAX_RATE_PERCENT: f64 = 100.0;

/// An annual interest rate in percent (6.5 means 6.5% per year)
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct Rate(f64);

impl Rate {
    pub fn from_percent(pct: f64) -> Self {
        Self(pct)
    }

    pub fn as_percent(&self) -> f64 {
        self.0
    }

    /// The per-month fraction the amortization formulas work in.
    pub fn monthly(&self) -> f64 {
        self.0 / 12.0 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl std::str::FromStr for Rate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let clean = s.trim().trim_end_matches('%').trim();
        let pct: f64 = clean
            .parse()
            .context(format!("Failed to parse rate \"{}\"", s))?;
        Ok(Rate(pct))
    }
}

/// A dollar amount for display purposes. Rounding to whole cents happens
/// here and nowhere else; the calculations keep full precision.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Dollars(pub f64);

impl std::fmt::Display for Dollars {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cents = (self.0 * 100.0).round() as i64;
        write!(
            f,
            "{}${}.{:02}",
            if cents < 0 { "-" } else { "" },
            (cents.abs() / 100).separate_with_commas(),
            cents.abs() % 100,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoanTerms {
    pub purchase_price: f64,
    pub down_payment: f64,
    pub annual_interest_rate: Rate,
    pub loan_term_years: u32,
    #[serde(default)]
    pub annual_property_tax: f64,
    #[serde(default)]
    pub annual_home_insurance: f64,
    #[serde(default)]
    pub annual_hoa_fees: f64,
}

/// The four monthly cost components plus their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentBreakdown {
    pub mortgage: f64,
    pub property_tax: f64,
    pub home_insurance: f64,
    pub hoa_fees: f64,
    pub total: f64,
}

/// A fixed-rate home loan. Construction validates the terms; every
/// figure after that is a pure function of them.
#[derive(Debug, Clone)]
pub struct HomeLoan {
    terms: LoanTerms,
}

impl HomeLoan {
    pub fn new(terms: LoanTerms) -> Result<Self> {
        let out = Self { terms };
        out.validate().context("Provided loan terms were invalid")?;
        Ok(out)
    }

    fn validate(&self) -> Result<()> {
        let t = &self.terms;
        for (name, value) in [
            ("purchase_price", t.purchase_price),
            ("down_payment", t.down_payment),
            ("annual_interest_rate", t.annual_interest_rate.as_percent()),
            ("annual_property_tax", t.annual_property_tax),
            ("annual_home_insurance", t.annual_home_insurance),
            ("annual_hoa_fees", t.annual_hoa_fees),
        ] {
            if !value.is_finite() {
                return Err(anyhow!("{} must be a finite number, got {}", name, value));
            }
        }
        if t.purchase_price <= 0.0 {
            return Err(anyhow!(
                "Purchase price must be positive, got {}",
                t.purchase_price
            ));
        }
        if t.down_payment < 0.0 {
            return Err(anyhow!(
                "Down payment can't be negative, got {}",
                t.down_payment
            ));
        }
        if t.down_payment > t.purchase_price {
            return Err(anyhow!(
                "Down payment ({}) can't exceed the purchase price ({})",
                t.down_payment,
                t.purchase_price
            ));
        }
        if t.annual_interest_rate.as_percent() < 0.0 {
            return Err(anyhow!(
                "Interest rate can't be negative, got {}",
                t.annual_interest_rate
            ));
        }
        if t.annual_interest_rate.as_percent() > MAX_RATE_PERCENT {
            return Err(anyhow!(
                "Interest rate can't exceed {}%, got {}",
                MAX_RATE_PERCENT,
                t.annual_interest_rate
            ));
        }
        if t.loan_term_years == 0 {
            return Err(anyhow!("Loan term must be at least one year"));
        }
        if t.loan_term_years > MAX_TERM_YEARS {
            return Err(anyhow!(
                "Loan term can't exceed {} years, got {}",
                MAX_TERM_YEARS,
                t.loan_term_years
            ));
        }
        for (name, value) in [
            ("property tax", t.annual_property_tax),
            ("home insurance", t.annual_home_insurance),
            ("HOA fees", t.annual_hoa_fees),
        ] {
            if value < 0.0 {
                return Err(anyhow!("Annual {} can't be negative, got {}", name, value));
            }
        }
        Ok(())
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    /// The amount actually borrowed: purchase price less down payment.
    pub fn principal(&self) -> f64 {
        self.terms.purchase_price - self.terms.down_payment
    }

    pub fn term_years(&self) -> u32 {
        self.terms.loan_term_years
    }

    pub fn term_months(&self) -> u32 {
        self.terms.loan_term_years * 12
    }

    pub fn monthly_interest_rate(&self) -> f64 {
        self.terms.annual_interest_rate.monthly()
    }

    pub fn monthly_property_tax(&self) -> f64 {
        self.terms.annual_property_tax / 12.0
    }

    pub fn monthly_home_insurance(&self) -> f64 {
        self.terms.annual_home_insurance / 12.0
    }

    pub fn monthly_hoa_fees(&self) -> f64 {
        self.terms.annual_hoa_fees / 12.0
    }

    /// Level monthly principal-and-interest payment (the annuity formula).
    /// A zero rate means no annuity factor exists so the principal is
    /// simply spread evenly over the term.
    pub fn monthly_mortgage_payment(&self) -> f64 {
        let r = self.monthly_interest_rate();
        let n = f64::from(self.term_months());
        if r == 0.0 {
            self.principal() / n
        } else {
            let growth = (1.0 + r).powf(n);
            self.principal() * r * growth / (growth - 1.0)
        }
    }

    pub fn total_monthly_payment(&self) -> f64 {
        self.monthly_mortgage_payment()
            + self.monthly_property_tax()
            + self.monthly_home_insurance()
            + self.monthly_hoa_fees()
    }

    pub fn payment_breakdown(&self) -> PaymentBreakdown {
        PaymentBreakdown {
            mortgage: self.monthly_mortgage_payment(),
            property_tax: self.monthly_property_tax(),
            home_insurance: self.monthly_home_insurance(),
            hoa_fees: self.monthly_hoa_fees(),
            total: self.total_monthly_payment(),
        }
    }
}
