/// One converted game: the rendered plies followed by the declared result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRow {
    /// 1-based position of the game in its input.
    pub index: usize,
    /// SAN of the mainline, truncated to the configured ply limit.
    pub plies: Vec<String>,
    /// Value of the `Result` tag, verbatim.
    pub result: String,
    /// Mainline length before truncation.
    pub total_plies: usize,
}

impl GameRow {
    /// Number of fields in the assembled row (plies plus result).
    pub fn field_count(&self) -> usize {
        self.plies.len() + 1
    }

    pub fn is_truncated(&self) -> bool {
        self.total_plies > self.plies.len()
    }

    /// The row as written: plies in order, then the result. No padding.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.plies
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.result.as_str()))
    }

    pub fn into_fields(self) -> Vec<String> {
        let mut fields = self.plies;
        fields.push(self.result);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::GameRow;

    fn row(plies: &[&str], result: &str, total_plies: usize) -> GameRow {
        GameRow {
            index: 1,
            plies: plies.iter().map(|s| s.to_string()).collect(),
            result: result.to_string(),
            total_plies,
        }
    }

    #[test]
    fn test_result_is_appended_without_padding() {
        let r = row(&["e4", "e5", "Nf3"], "1-0", 3);
        assert_eq!(r.field_count(), 4);
        assert_eq!(r.fields().collect::<Vec<_>>(), vec!["e4", "e5", "Nf3", "1-0"]);
        assert_eq!(r.into_fields(), vec!["e4", "e5", "Nf3", "1-0"]);
    }

    #[test]
    fn test_game_without_moves_is_just_the_result() {
        let r = row(&[], "*", 0);
        assert_eq!(r.into_fields(), vec!["*"]);
    }

    #[test]
    fn test_truncation_flag() {
        assert!(!row(&["d4"], "0-1", 1).is_truncated());
        assert!(row(&["d4"], "0-1", 9).is_truncated());
    }
}
