use anyhow::Result;
use structopt::StructOpt;

use home_loan_lib::loan::{Dollars, HomeLoan};

#[derive(Debug, StructOpt)]
pub enum OutputType {
    /// Print the monthly payment breakdown
    Summary,
    /// Print the year by year amortization schedule
    Schedule,
    /// Debug print every detail you have
    Debug,
}

impl OutputType {
    pub fn output(&self, loan: &HomeLoan) -> Result<()> {
        match self {
            Self::Summary => {
                let breakdown = loan.payment_breakdown();
                println!("Principal: {}", Dollars(loan.principal()));
                println!(
                    "Rate: {} over {} years",
                    loan.terms().annual_interest_rate,
                    loan.term_years()
                );
                println!();
                println!("Mortgage payment:  {}", Dollars(breakdown.mortgage));
                println!("Property tax:      {}", Dollars(breakdown.property_tax));
                println!("Home insurance:    {}", Dollars(breakdown.home_insurance));
                println!("HOA fees:          {}", Dollars(breakdown.hoa_fees));
                println!();
                println!("Total monthly payment: {}", Dollars(breakdown.total));
            }
            Self::Schedule => {
                println!(
                    "{:>4} {:>16} {:>20} {:>16}",
                    "Year", "Balance", "Cumulative interest", "Interest paid"
                );
                let yearly = loan.yearly_interest_series();
                for (balance, interest) in loan.balance_series().iter().zip(yearly.iter()) {
                    println!(
                        "{:>4} {:>16} {:>20} {:>16}",
                        balance.year,
                        Dollars(balance.remaining_balance).to_string(),
                        Dollars(balance.cumulative_interest).to_string(),
                        Dollars(interest.interest_paid).to_string(),
                    );
                }
            }
            Self::Debug => {
                println!("{:#?}", loan);
                println!("{:#?}", loan.balance_series());
                println!("{:#?}", loan.yearly_interest_series());
            }
        }
        Ok(())
    }
}
