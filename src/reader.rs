//! Lazy iteration over the games of a PGN source.

use crate::error::ConvertError;
use crate::row::GameRow;
use crate::visitor::PlyRenderer;
use pgn_reader::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Yields one [`GameRow`] per game until the input is exhausted.
///
/// A tokenizer or I/O error ends the iteration. A game-level error (illegal
/// move, missing `Result`) is yielded and the next call moves on to the
/// following game.
pub struct GameReader<R: Read> {
    reader: Reader<R>,
    renderer: PlyRenderer,
    finished: bool,
}

impl<R: Read> GameReader<R> {
    pub fn new(input: R, max_plies: usize) -> Self {
        GameReader {
            reader: Reader::new(input),
            renderer: PlyRenderer::new(max_plies),
            finished: false,
        }
    }

    /// Games seen so far, including one that failed.
    pub fn games_read(&self) -> usize {
        self.renderer.games_started()
    }
}

impl GameReader<File> {
    pub fn open(path: impl AsRef<Path>, max_plies: usize) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConvertError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(GameReader::new(file, max_plies))
    }
}

impl<R: Read> Iterator for GameReader<R> {
    type Item = Result<GameRow, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.reader.read_game(&mut self.renderer) {
            Ok(Some(row)) => Some(row),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(source) => {
                self.finished = true;
                Some(Err(ConvertError::Pgn {
                    game: self.renderer.games_started().max(1),
                    source,
                }))
            }
        }
    }
}

/// Read every game from `input`, stopping at the first error.
pub fn read_games<R: Read>(input: R, max_plies: usize) -> Result<Vec<GameRow>, ConvertError> {
    GameReader::new(input, max_plies).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_GAMES: &str = r#"[Event "Game1"]
[Result "1-0"]

1. e4 e5 1-0

[Event "Game2"]
[Result "0-1"]

1. d4 d5 2. c4 0-1
"#;

    #[test]
    fn test_reads_games_in_order() {
        let rows = read_games(TWO_GAMES.as_bytes(), 40).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].plies, vec!["e4", "e5"]);
        assert_eq!(rows[0].result, "1-0");
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[1].plies, vec!["d4", "d5", "c4"]);
        assert_eq!(rows[1].result, "0-1");
    }

    #[test]
    fn test_empty_input_has_no_games() {
        assert!(read_games("".as_bytes(), 40).unwrap().is_empty());
        assert!(read_games("\n\n  \n".as_bytes(), 40).unwrap().is_empty());
    }

    #[test]
    fn test_iterator_is_lazy_and_fused() {
        let mut games = GameReader::new(TWO_GAMES.as_bytes(), 40);
        assert_eq!(games.games_read(), 0);

        assert!(games.next().unwrap().is_ok());
        assert_eq!(games.games_read(), 1);
        assert!(games.next().unwrap().is_ok());
        assert!(games.next().is_none());
        assert!(games.next().is_none());
        assert_eq!(games.games_read(), 2);
    }

    #[test]
    fn test_first_bad_game_stops_collection() {
        let pgn = "[Result \"1-0\"]\n\n1. e4 1-0\n\n[Event \"x\"]\n\n1. d4 *\n\n[Result \"*\"]\n\n1. c4 *\n";
        let err = read_games(pgn.as_bytes(), 40).unwrap_err();
        assert!(matches!(err, ConvertError::MissingResult { game: 2 }));
    }

    #[test]
    fn test_open_missing_file() {
        let err = GameReader::open("does/not/exist.pgn", 40).err().unwrap();
        assert!(matches!(err, ConvertError::Open { .. }));
    }
}
