use crate::error::ConvertError;
use std::path::{Path, PathBuf};

/// Number of plies rendered per game unless configured otherwise.
pub const DEFAULT_MAX_PLIES: usize = 40;

/// Output file written into the working directory by default.
pub const DEFAULT_OUTPUT: &str = "data.csv";

/// How rows shorter than the header are laid out in the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowLayout {
    /// Values are left-aligned and the remaining cells stay empty, so a short
    /// game's result lands in a ply column. Matches the historical output.
    #[default]
    Ragged,
    /// Missing plies are left empty and the result always sits in the
    /// `Result` column.
    Padded,
}

/// Parameters for a single conversion run.
#[derive(Clone, Debug)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub max_plies: usize,
    pub layout: RowLayout,
    pub print_table: bool,
}

impl ConvertConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        ConvertConfig {
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            max_plies: DEFAULT_MAX_PLIES,
            layout: RowLayout::default(),
            print_table: true,
        }
    }

    pub fn with_output(mut self, output: impl AsRef<Path>) -> Self {
        self.output = output.as_ref().to_path_buf();
        self
    }

    pub fn with_max_plies(mut self, max_plies: usize) -> Self {
        self.max_plies = max_plies;
        self
    }

    pub fn with_layout(mut self, layout: RowLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_print_table(mut self, print_table: bool) -> Self {
        self.print_table = print_table;
        self
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.max_plies == 0 {
            return Err(ConvertError::InvalidConfig(
                "max plies must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConvertConfig::new("games.pgn");
        assert_eq!(config.input, PathBuf::from("games.pgn"));
        assert_eq!(config.output, PathBuf::from("data.csv"));
        assert_eq!(config.max_plies, 40);
        assert_eq!(config.layout, RowLayout::Ragged);
        assert!(config.print_table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConvertConfig::new("games.pgn")
            .with_output("out/plies.csv")
            .with_max_plies(12)
            .with_layout(RowLayout::Padded)
            .with_print_table(false);

        assert_eq!(config.output, PathBuf::from("out/plies.csv"));
        assert_eq!(config.max_plies, 12);
        assert_eq!(config.layout, RowLayout::Padded);
        assert!(!config.print_table);
    }

    #[test]
    fn test_zero_plies_rejected() {
        let config = ConvertConfig::new("games.pgn").with_max_plies(0);
        assert!(matches!(
            config.validate(),
            Err(ConvertError::InvalidConfig(_))
        ));
    }
}
