use anyhow::Result;
use clap::Parser;
use tracing::error;

mod app;
mod args;
mod logging;

use args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.quiet);
    match app::run(cli) {
        Ok(()) => Ok(()),
        Err(err) => {
            error!(error = %err, "Launch failed");
            Err(err)
        }
    }
}
