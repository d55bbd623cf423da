//! Convert PGN game collections into a per-ply CSV table.
//!
//! Every game becomes one row holding the SAN of its first plies followed by
//! its `Result` tag. The header is `Ply 1` .. `Ply N`, `Result`.

use std::io::Write;
use tracing::info;

mod config;
mod error;
mod reader;
mod row;
mod table;
mod visitor;

pub use config::{ConvertConfig, RowLayout, DEFAULT_MAX_PLIES, DEFAULT_OUTPUT};
pub use error::ConvertError;
pub use reader::{read_games, GameReader};
pub use row::GameRow;
pub use table::{header, PlyTable};
pub use visitor::{render_game, PlyRenderer};

/// What a finished run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionSummary {
    pub games: usize,
    pub truncated: usize,
    pub columns: usize,
}

/// Run the whole pipeline: read `config.input`, print the table preview to
/// `console` when enabled, then write `config.output`.
///
/// Nothing is written if any game fails to convert.
pub fn convert<W: Write>(
    config: &ConvertConfig,
    console: &mut W,
) -> Result<ConversionSummary, ConvertError> {
    config.validate()?;
    info!(
        input = %config.input.display(),
        max_plies = config.max_plies,
        layout = ?config.layout,
        "reading games"
    );

    let rows = GameReader::open(&config.input, config.max_plies)?
        .collect::<Result<Vec<GameRow>, ConvertError>>()?;
    let truncated = rows.iter().filter(|r| r.is_truncated()).count();
    info!(games = rows.len(), truncated, "converted games");

    let table = PlyTable::from_rows(rows, config.max_plies, config.layout)?;

    if config.print_table {
        writeln!(console, "{}", table.preview()?)?;
    }
    table.write_csv_file(&config.output)?;

    Ok(ConversionSummary {
        games: table.num_rows(),
        truncated,
        columns: table.num_columns(),
    })
}

/// [`convert`] with the preview going to stdout.
pub fn convert_file(config: &ConvertConfig) -> Result<ConversionSummary, ConvertError> {
    let stdout = std::io::stdout();
    let mut console = stdout.lock();
    convert(config, &mut console)
}
