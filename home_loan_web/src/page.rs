use home_loan_lib::loan::Dollars;

pub struct Results {
    pub total_monthly_payment: f64,
    pub balance_chart: String,
    pub yearly_chart: String,
}

pub fn render(results: Option<&Results>) -> String {
    let results_html = match results {
        Some(r) => format!(
            r#"  <hr>
  <h2>Total monthly payment: {}</h2>
  <img src="{}" alt="Remaining balance and cumulative interest" width="800" height="600">
  <img src="{}" alt="Yearly interest paid" width="800" height="600">
"#,
            Dollars(r.total_monthly_payment),
            r.balance_chart,
            r.yearly_chart,
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Home Loan Calculator</title>
</head>
<body>
  <h1>Home Loan Calculator</h1>
  <form method="post" action="/">
    <label>Purchase price ($)
      <input type="number" name="purchase_price" step="any" min="0" required>
    </label><br>
    <label>Down payment ($)
      <input type="number" name="down_payment" step="any" min="0" value="0" required>
    </label><br>
    <label>Annual interest rate (%)
      <input type="number" name="annual_interest_rate" step="any" min="0" required>
    </label><br>
    <label>Loan term (years)
      <input type="number" name="loan_term_years" step="1" min="1" required>
    </label><br>
    <label>Annual property tax ($)
      <input type="number" name="annual_property_tax" step="any" min="0" value="0" required>
    </label><br>
    <label>Annual home insurance ($)
      <input type="number" name="annual_home_insurance" step="any" min="0" value="0" required>
    </label><br>
    <label>Annual HOA fees ($)
      <input type="number" name="annual_hoa_fees" step="any" min="0" value="0" required>
    </label><br>
    <button type="submit">Calculate</button>
  </form>
{}</body>
</html>
"#,
        results_html
    )
}
