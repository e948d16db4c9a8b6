//! Reference list of commonly misspelled words, as written by `scrape-misspell`.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{ListingError, Result};
use crate::similarity::edit_distance;

pub const CORRECT_COLUMN: &str = "correct";
pub const INCORRECT_COLUMN: &str = "incorrect";
pub const DISTANCE_COLUMN: &str = "levenshteinDistance";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MisspellingPair {
    pub correct: String,
    pub incorrect: String,
}

impl MisspellingPair {
    pub fn new(correct: impl Into<String>, incorrect: impl Into<String>) -> Self {
        Self {
            correct: correct.into(),
            incorrect: incorrect.into(),
        }
    }
}

/// Reads the word list. Extra columns are ignored; a missing file, a missing
/// `correct`/`incorrect` column, an empty cell or a list without rows is an
/// error.
pub fn load_word_list(path: &Path) -> Result<Vec<MisspellingPair>> {
    if !path.is_file() {
        return Err(ListingError::WordListMissing(path.to_path_buf()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| ListingError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let correct_idx = column(CORRECT_COLUMN)?;
    let incorrect_idx = column(INCORRECT_COLUMN)?;

    let mut pairs = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let cell = |idx: usize, name: &str| match row.get(idx).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(ListingError::MalformedRow {
                path: path.to_path_buf(),
                line,
                reason: format!("empty '{name}' value"),
            }),
        };
        pairs.push(MisspellingPair {
            correct: cell(correct_idx, CORRECT_COLUMN)?,
            incorrect: cell(incorrect_idx, INCORRECT_COLUMN)?,
        });
    }
    if pairs.is_empty() {
        return Err(ListingError::EmptyWordList(path.to_path_buf()));
    }
    debug!("loaded {} misspelling pairs from {:?}", pairs.len(), path);
    Ok(pairs)
}

pub fn write_word_list(path: &Path, pairs: &[MisspellingPair]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ListingError::io(parent, e))?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_path(path)?;
    writer.write_record([CORRECT_COLUMN, INCORRECT_COLUMN, DISTANCE_COLUMN])?;
    for pair in pairs {
        let distance = edit_distance(&pair.correct, &pair.incorrect).to_string();
        writer.write_record([pair.correct.as_str(), pair.incorrect.as_str(), distance.as_str()])?;
    }
    writer.flush().map_err(|e| ListingError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("derived").join("misspelled.csv");
        let pairs = vec![
            MisspellingPair::new("accommodate", "accomodate"),
            MisspellingPair::new("a lot", "alot"),
        ];
        write_word_list(&path, &pairs).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("correct,incorrect,levenshteinDistance\n"));
        assert!(text.contains("accommodate,accomodate,1\n"));
        assert_eq!(load_word_list(&path).unwrap(), pairs);
    }

    #[test]
    fn missing_file_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_word_list(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, ListingError::WordListMissing(_)));
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.csv");
        fs::write(&path, "correct,wrong\nbelieve,beleive\n").unwrap();
        match load_word_list(&path) {
            Err(ListingError::MissingColumn { column, .. }) => assert_eq!(column, "incorrect"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn header_only_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.csv");
        fs::write(&path, "correct,incorrect,levenshteinDistance\n").unwrap();
        let err = load_word_list(&path).unwrap_err();
        assert!(matches!(err, ListingError::EmptyWordList(_)));
    }

    #[test]
    fn empty_cell_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.csv");
        fs::write(&path, "correct,incorrect\nbelieve,beleive\nweird,\n").unwrap();
        match load_word_list(&path) {
            Err(ListingError::MalformedRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
