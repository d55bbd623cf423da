use anyhow::{Context, Result};
use clap::Parser;
use pgn2csv::{convert_file, ConvertConfig, RowLayout, DEFAULT_MAX_PLIES, DEFAULT_OUTPUT};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Convert a PGN file into a CSV table of the first plies of every game.
#[derive(Parser)]
#[command(name = "pgn2csv")]
#[command(about = "Convert PGN games to a per-ply CSV table")]
#[command(version)]
struct Args {
    /// PGN file to read
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// CSV file to write
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Number of plies kept per game
    #[arg(long, default_value_t = DEFAULT_MAX_PLIES)]
    max_plies: usize,

    /// Keep the result in the Result column for short games
    #[arg(long)]
    pad: bool,

    /// Do not print the table
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let layout = if args.pad {
        RowLayout::Padded
    } else {
        RowLayout::Ragged
    };
    let config = ConvertConfig::new(&args.input)
        .with_output(&args.output)
        .with_max_plies(args.max_plies)
        .with_layout(layout)
        .with_print_table(!args.quiet);

    let summary = convert_file(&config).with_context(|| {
        format!(
            "converting '{}' to '{}'",
            config.input.display(),
            config.output.display()
        )
    })?;

    info!(
        games = summary.games,
        truncated = summary.truncated,
        output = %config.output.display(),
        "done"
    );
    Ok(())
}
