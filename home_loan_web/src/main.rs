use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "home-loan-web",
    about = "Web front end for the home loan calculator."
)]
struct Opts {
    /// Port to listen on
    #[structopt(long, default_value = "8080")]
    port: u16,

    /// Directory rendered charts are written to and served from
    #[structopt(long, default_value = "./static", parse(from_os_str))]
    static_dir: PathBuf,
}

fn main() -> Result<()> {
    let opts = Opts::from_args();
    home_loan_web::run_server(opts.port, opts.static_dir)
}
