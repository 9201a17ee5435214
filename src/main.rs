//! Evaluate one arcball drag from the command line.
//!
//! Usage:
//!   arcball-drag --start 400,300 --end 420,310
//!   arcball-drag --config arcball.toml --start 400,300 --end 420,310 --json

use anyhow::Result;
use arcball::cli::{init_logging, Cli};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let report = cli.run()?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}
