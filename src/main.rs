use anyhow::Result;
use clap::Parser;
use pocketdash::cli::Cli;
use pocketdash::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli.run()
}
