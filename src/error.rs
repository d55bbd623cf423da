use arrow::error::ArrowError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a conversion run can fail. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("game {game}: parsing error: {source}")]
    Pgn {
        game: usize,
        #[source]
        source: io::Error,
    },

    #[error("game {game}: illegal move at ply {ply}: {san} ({reason})")]
    IllegalMove {
        game: usize,
        ply: usize,
        san: String,
        reason: String,
    },

    #[error("game {game}: invalid FEN: {reason}")]
    InvalidFen { game: usize, reason: String },

    #[error("game {game}: missing Result tag")]
    MissingResult { game: usize },

    #[error("game {game}: row has {fields} fields but the table has {columns} columns")]
    RowTooWide {
        game: usize,
        fields: usize,
        columns: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Arrow(#[from] ArrowError),
}

#[cfg(test)]
mod tests {
    use super::ConvertError;

    #[test]
    fn test_messages_name_the_game() {
        let err = ConvertError::IllegalMove {
            game: 3,
            ply: 7,
            san: "Nf9".to_string(),
            reason: "illegal san".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "game 3: illegal move at ply 7: Nf9 (illegal san)"
        );

        let err = ConvertError::MissingResult { game: 12 };
        assert_eq!(err.to_string(), "game 12: missing Result tag");
    }

    #[test]
    fn test_open_error_keeps_path_and_source() {
        use std::error::Error;

        let err = ConvertError::Open {
            path: "games.pgn".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("failed to open 'games.pgn'"));
        assert!(err.source().is_some());
    }
}
