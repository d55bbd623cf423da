//! Mainline SAN renderer for PGN games.
//!
//! Each game is replayed on its own board: every mainline move is resolved
//! against the current position, rendered back to SAN (with check and mate
//! suffixes) and then played. Rendering stops at the configured ply limit.

use crate::error::ConvertError;
use crate::row::GameRow;
use pgn_reader::{RawTag, SanPlus, Skip, Visitor};
use shakmaty::{fen::Fen, CastlingMode, Chess};
use std::mem;
use std::ops::ControlFlow;
use tracing::{debug, warn};

const RESULT_TAGS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Visitor that turns one game into a [`GameRow`].
///
/// The first problem found in a game is kept and returned from `end_game`;
/// moves after it are ignored so the reader can still consume the rest of
/// the game text.
pub struct PlyRenderer {
    max_plies: usize,
    games_started: usize,
    pos: Chess,
    plies: Vec<String>,
    total_plies: usize,
    result: Option<String>,
    error: Option<ConvertError>,
}

impl PlyRenderer {
    pub fn new(max_plies: usize) -> Self {
        PlyRenderer {
            max_plies,
            games_started: 0,
            pos: Chess::default(),
            plies: Vec::with_capacity(max_plies),
            total_plies: 0,
            result: None,
            error: None,
        }
    }

    /// Number of games this renderer has begun, including a failed one.
    pub fn games_started(&self) -> usize {
        self.games_started
    }

    fn set_error(&mut self, err: ConvertError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Starting position from the `FEN` and `Variant` tags, default otherwise.
    fn setup_position(&mut self, tags: &[(String, String)]) {
        let castling_mode = tags
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("Variant"))
            .and_then(|(_, v)| {
                if v.eq_ignore_ascii_case("chess960") {
                    Some(CastlingMode::Chess960)
                } else {
                    None
                }
            })
            .unwrap_or(CastlingMode::Standard);

        let fen_header = tags
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("FEN"))
            .map(|(_, v)| v.as_str());

        self.pos = Chess::default();
        if let Some(fen_str) = fen_header {
            let game = self.games_started;
            match fen_str.parse::<Fen>() {
                Ok(fen) => match fen.into_position(castling_mode) {
                    Ok(pos) => self.pos = pos,
                    Err(e) => self.set_error(ConvertError::InvalidFen {
                        game,
                        reason: e.to_string(),
                    }),
                },
                Err(e) => self.set_error(ConvertError::InvalidFen {
                    game,
                    reason: e.to_string(),
                }),
            }
        }
    }
}

impl Visitor for PlyRenderer {
    type Tags = Vec<(String, String)>;
    type Movetext = ();
    type Output = Result<GameRow, ConvertError>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        self.games_started += 1;
        self.plies = Vec::with_capacity(self.max_plies);
        self.total_plies = 0;
        self.result = None;
        self.error = None;
        ControlFlow::Continue(Vec::with_capacity(10))
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        let key_str = String::from_utf8_lossy(key).into_owned();
        let value_str = String::from_utf8_lossy(value.as_bytes()).into_owned();
        tags.push((key_str, value_str));
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let game = self.games_started;

        // Tag names are case-sensitive here, unlike FEN and Variant.
        match tags.iter().find(|(k, _)| k == "Result") {
            Some((_, value)) => {
                if !RESULT_TAGS.contains(&value.as_str()) {
                    warn!(game, result = %value, "non-standard Result tag");
                }
                self.result = Some(value.clone());
            }
            None => self.set_error(ConvertError::MissingResult { game }),
        }

        self.setup_position(&tags);
        ControlFlow::Continue(())
    }

    fn san(
        &mut self,
        _movetext: &mut Self::Movetext,
        san_plus: SanPlus,
    ) -> ControlFlow<Self::Output> {
        self.total_plies += 1;
        if self.error.is_some() || self.plies.len() >= self.max_plies {
            return ControlFlow::Continue(());
        }

        match san_plus.san.to_move(&self.pos) {
            Ok(m) => {
                let rendered = SanPlus::from_move_and_play_unchecked(&mut self.pos, m);
                self.plies.push(rendered.to_string());
            }
            Err(err) => {
                let game = self.games_started;
                let ply = self.total_plies;
                self.set_error(ConvertError::IllegalMove {
                    game,
                    ply,
                    san: san_plus.to_string(),
                    reason: err.to_string(),
                });
            }
        }
        ControlFlow::Continue(())
    }

    fn begin_variation(
        &mut self,
        _movetext: &mut Self::Movetext,
    ) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true)) // Skip variations, stay in mainline
    }

    fn end_game(&mut self, _movetext: Self::Movetext) -> Self::Output {
        let index = self.games_started;
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        let result = self
            .result
            .take()
            .ok_or(ConvertError::MissingResult { game: index })?;

        debug!(
            game = index,
            plies = self.plies.len(),
            total_plies = self.total_plies,
            result = %result,
            "rendered game"
        );

        Ok(GameRow {
            index,
            plies: mem::take(&mut self.plies),
            result,
            total_plies: self.total_plies,
        })
    }
}

/// Render a single game from PGN text.
pub fn render_game(pgn: &str, max_plies: usize) -> Result<GameRow, ConvertError> {
    use pgn_reader::Reader;
    use std::io::Cursor;

    let mut reader = Reader::new(Cursor::new(pgn));
    let mut renderer = PlyRenderer::new(max_plies);

    match reader.read_game(&mut renderer) {
        Ok(Some(row)) => row,
        Ok(None) => Err(ConvertError::Pgn {
            game: 1,
            source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no game found in PGN"),
        }),
        Err(source) => Err(ConvertError::Pgn { game: 1, source }),
    }
}
