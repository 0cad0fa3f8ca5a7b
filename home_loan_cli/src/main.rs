use std::path::PathBuf;

use anyhow::{Context, Result};
use structopt::StructOpt;

mod input;
mod output;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "home-loan",
    about = "Fixed-rate mortgage amortization calculator."
)]
struct Opts {
    /// The path to your loan description file
    #[structopt(parse(from_os_str))]
    loan_file: PathBuf,

    #[structopt(subcommand)]
    output: output::OutputType,
}

fn main() -> Result<()> {
    let opts = Opts::from_args();

    let loan = input::read_loan(&opts.loan_file).context("Failed to load loan file")?;
    opts.output.output(&loan)
}
