use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;

use home_loan_lib::loan::HomeLoan;

/// URL paths (under /static) of the two rendered charts.
pub struct ChartPaths {
    pub balance: String,
    pub yearly: String,
}

pub fn render_charts(loan: &HomeLoan, static_dir: &Path) -> Result<ChartPaths> {
    let suffix = unique_suffix();
    let balance_name = format!("plot1_{}.svg", suffix);
    let yearly_name = format!("plot2_{}.svg", suffix);

    let balances = loan.balance_series();
    draw_chart(
        &static_dir.join(&balance_name),
        "Remaining Loan Balance and Cumulative Interest Paid Over Time",
        loan.term_years(),
        &[
            (
                "Remaining Balance",
                balances
                    .iter()
                    .map(|p| (p.year, p.remaining_balance))
                    .collect(),
            ),
            (
                "Cumulative Interest Paid",
                balances
                    .iter()
                    .map(|p| (p.year, p.cumulative_interest))
                    .collect(),
            ),
        ],
    )
    .context("Failed to render balance chart")?;

    let yearly = loan.yearly_interest_series();
    draw_chart(
        &static_dir.join(&yearly_name),
        "Yearly Interest Paid Over Time",
        loan.term_years(),
        &[
            (
                "Yearly Interest Paid",
                yearly.iter().map(|p| (p.year, p.interest_paid)).collect(),
            ),
            (
                "Yearly Paid",
                yearly.iter().map(|p| (p.year, p.payment_total)).collect(),
            ),
        ],
    )
    .context("Failed to render yearly interest chart")?;

    Ok(ChartPaths {
        balance: format!("/static/{}", balance_name),
        yearly: format!("/static/{}", yearly_name),
    })
}

// Filenames only have to be unique within one static dir, nanoseconds
// since the epoch cover that.
pub(crate) fn unique_suffix() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

fn draw_chart(
    path: &Path,
    caption: &str,
    years: u32,
    series: &[(&str, Vec<(u32, f64)>)],
) -> Result<()> {
    const COLORS: [RGBColor; 2] = [BLUE, RED];

    let y_max = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|(_, y)| *y))
        .fold(0.0_f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let root = SVGBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to fill chart background: {}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0u32..years + 1, 0.0..y_max)
        .map_err(|e| anyhow!("Failed to build chart axes: {}", e))?;

    chart
        .configure_mesh()
        .x_desc("Years")
        .y_desc("Amount ($)")
        .draw()
        .map_err(|e| anyhow!("Failed to draw chart mesh: {}", e))?;

    for (i, (label, points)) in series.iter().enumerate() {
        let color = COLORS[i % COLORS.len()];
        chart
            .draw_series(LineSeries::new(points.iter().copied(), &color))
            .map_err(|e| anyhow!("Failed to draw series \"{}\": {}", label, e))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| anyhow!("Failed to draw chart legend: {}", e))?;

    root.present()
        .map_err(|e| anyhow!("Failed to write chart to {:?}: {}", path, e))?;
    Ok(())
}
