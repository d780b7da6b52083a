//! `tnm` command-line front end

use anyhow::Result;
use clap::Parser;
use tnm_cli::commands::Commands;

/// Extract TNM classifications from clinical reports
#[derive(Debug, Parser)]
#[command(name = "tnm", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract(args) => args.execute(),
        Commands::List { subcommand } => subcommand.execute(),
        Commands::Validate(args) => args.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
