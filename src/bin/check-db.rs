use std::io::Write;

use anyhow::{anyhow, Result};
use check_db::{CheckDbConfig, InspectLens, OutputFormat};
use clap::Parser;
use tracing::{info, Level};

/// List one column of a table in a local SQLite database.
///
/// With no arguments, lists the `name` column of the `embeddings` table in
/// `./embeddings.db`.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// configuration file path; without it the built-in defaults are used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information to stderr
    #[clap(long)]
    debug: bool,

    /// Database file to inspect
    #[clap(short, long)]
    database: Option<String>,

    /// Table to look up
    #[clap(short, long)]
    table: Option<String>,

    /// Column to list
    #[clap(long)]
    column: Option<String>,

    /// Output format: plain, table, markdown, json, json-pretty, json-line
    #[clap(short, long, default_value = "plain")]
    format: OutputFormat,

    /// Print a commented configuration file template and exit
    #[clap(long)]
    config_template: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    if cli.config_template {
        print!("{}", CheckDbConfig::template());
        return;
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config =
        CheckDbConfig::new(&cli.config)?.with_overrides(cli.database, cli.table, cli.column);
    info!("configuration:\n{}", config.summary());

    let outcome = InspectLens::new(config.target()).inspect()?;
    let output = outcome.render(cli.format)?;

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            return Err(anyhow!("Failed to write output: {}", e));
        }
    }
    Ok(())
}
