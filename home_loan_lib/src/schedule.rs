use itertools::Itertools;

use crate::loan::HomeLoan;

/// Loan state at the end of a given year.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancePoint {
    pub year: u32,
    pub remaining_balance: f64,
    pub cumulative_interest: f64,
}

/// Interest and payment totals within a single year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyInterestPoint {
    pub year: u32,
    pub interest_paid: f64,
    pub payment_total: f64,
}

impl HomeLoan {
    /// Remaining balance and cumulative interest at the end of each year
    /// of the term, from the closed-form amortization balance.
    pub fn balance_series(&self) -> Vec<BalancePoint> {
        let payment = self.monthly_mortgage_payment();
        let r = self.monthly_interest_rate();
        let n = f64::from(self.term_months());

        (1..=self.term_years())
            .map(|year| {
                let months = f64::from(year * 12);
                let remaining = if r == 0.0 {
                    // The closed form divides by zero at r = 0; with no
                    // interest the balance just falls off linearly.
                    self.principal() - payment * months
                } else {
                    let growth = (1.0 + r).powf(n);
                    self.principal() * (growth - (1.0 + r).powf(months)) / (growth - 1.0)
                };
                BalancePoint {
                    year,
                    remaining_balance: remaining,
                    cumulative_interest: payment * months - (self.principal() - remaining),
                }
            })
            .collect()
    }

    /// First difference of the cumulative interest series, alongside the
    /// (constant) total paid per year.
    pub fn yearly_interest_series(&self) -> Vec<YearlyInterestPoint> {
        let payment_total = self.monthly_mortgage_payment() * 12.0;
        let balances = self.balance_series();

        std::iter::once(0.0)
            .chain(balances.iter().map(|p| p.cumulative_interest))
            .tuple_windows()
            .zip(balances.iter())
            .map(|((prev, curr), point)| YearlyInterestPoint {
                year: point.year,
                interest_paid: curr - prev,
                payment_total,
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use anyhow::Result;
    use itertools::Itertools;

    use crate::loan::test::{assert_close, standard_terms};
    use crate::loan::{HomeLoan, LoanTerms, Rate};

    fn loan(rate: f64, years: u32) -> Result<HomeLoan> {
        HomeLoan::new(LoanTerms {
            annual_interest_rate: Rate::from_percent(rate),
            loan_term_years: years,
            ..standard_terms()
        })
    }

    #[test]
    fn test_series_cover_every_year() -> Result<()> {
        let loan = loan(6.0, 30)?;
        let balances = loan.balance_series();
        let yearly = loan.yearly_interest_series();
        assert_eq!(balances.len(), 30);
        assert_eq!(yearly.len(), 30);
        for (i, (b, y)) in balances.iter().zip(yearly.iter()).enumerate() {
            assert_eq!(b.year, i as u32 + 1);
            assert_eq!(y.year, i as u32 + 1);
        }
        Ok(())
    }

    #[test]
    fn test_fully_amortizes_by_term_end() -> Result<()> {
        for (rate, years) in [(6.0, 30), (3.25, 15), (0.0, 30), (9.9, 7), (6.0, 1)] {
            let loan = loan(rate, years)?;
            let last = loan.balance_series().into_iter().last().unwrap();
            assert_close(last.remaining_balance, 0.0, 1e-4);
        }
        Ok(())
    }

    #[test]
    fn test_balance_and_interest_monotonic() -> Result<()> {
        let loan = loan(6.0, 30)?;
        let series = loan.balance_series();
        for (prev, curr) in series.iter().tuple_windows() {
            assert!(
                curr.remaining_balance < prev.remaining_balance,
                "balance should fall every year: {:?} -> {:?}",
                prev,
                curr,
            );
            assert!(
                curr.cumulative_interest > prev.cumulative_interest,
                "cumulative interest should rise every year: {:?} -> {:?}",
                prev,
                curr,
            );
        }
        Ok(())
    }

    #[test]
    fn test_yearly_interest_sums_to_cumulative() -> Result<()> {
        for (rate, years) in [(6.0, 30), (4.5, 20), (0.0, 10)] {
            let loan = loan(rate, years)?;
            let total: f64 = loan
                .yearly_interest_series()
                .iter()
                .map(|p| p.interest_paid)
                .sum();
            let last = loan.balance_series().into_iter().last().unwrap();
            assert_close(total, last.cumulative_interest, 1e-4);
        }
        Ok(())
    }

    #[test]
    fn test_first_year_interest_matches_cumulative() -> Result<()> {
        let loan = loan(6.0, 30)?;
        let first_cumulative = loan.balance_series()[0].cumulative_interest;
        let first_yearly = loan.yearly_interest_series()[0].interest_paid;
        assert_close(first_yearly, first_cumulative, 1e-9);
        Ok(())
    }

    #[test]
    fn test_yearly_payment_total_is_constant() -> Result<()> {
        let loan = loan(6.0, 30)?;
        let expected = loan.monthly_mortgage_payment() * 12.0;
        for point in loan.yearly_interest_series() {
            assert_close(point.payment_total, expected, 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_zero_rate_straight_line() -> Result<()> {
        let loan = loan(0.0, 30)?;
        let yearly_principal = loan.principal() / 30.0;
        for point in loan.balance_series() {
            assert_close(
                point.remaining_balance,
                loan.principal() - yearly_principal * f64::from(point.year),
                1e-6,
            );
            assert_close(point.cumulative_interest, 0.0, 1e-6);
        }
        for point in loan.yearly_interest_series() {
            assert_close(point.interest_paid, 0.0, 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_zero_principal_series() -> Result<()> {
        let mut terms = standard_terms();
        terms.down_payment = terms.purchase_price;
        let loan = HomeLoan::new(terms)?;
        for point in loan.balance_series() {
            assert_close(point.remaining_balance, 0.0, 1e-9);
            assert_close(point.cumulative_interest, 0.0, 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_first_year_interest_roughly_rate_on_principal() -> Result<()> {
        // Early in a long loan nearly the whole balance is outstanding, so
        // the first year's interest sits a little under principal * rate.
        let loan = loan(6.0, 30)?;
        let first = &loan.yearly_interest_series()[0];
        assert!(first.interest_paid < 300000.0 * 0.06);
        assert!(first.interest_paid > 300000.0 * 0.06 * 0.95);
        Ok(())
    }
}
