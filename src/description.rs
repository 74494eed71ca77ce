//! Free-text descriptions carried as ledger data entries
//!
//! Data entry values are short, so a description is split into numbered
//! chunks of 64 characters. Each chunk is written and then cleared in the
//! same transaction; the text survives only in the operation history.

use serde::Serialize;
use thiserror::Error;

/// Maximum characters per data entry value
pub const CHUNK_LEN: usize = 64;

/// Maximum accepted description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// A single data entry write (`value: None` clears the entry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataEntry {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptionError {
    #[error("description length is {0}, expected 1..=2000")]
    InvalidLength(usize),
}

/// Split a description into set/clear data entry pairs named `data0`, `data1`, ...
pub fn chunk_description(description: &str) -> Result<Vec<DataEntry>, DescriptionError> {
    let chars: Vec<char> = description.chars().collect();
    if chars.is_empty() || chars.len() > MAX_DESCRIPTION_LEN {
        return Err(DescriptionError::InvalidLength(chars.len()));
    }

    let entries = chars
        .chunks(CHUNK_LEN)
        .enumerate()
        .flat_map(|(i, chunk)| {
            let name = format!("data{}", i);
            [
                DataEntry {
                    name: name.clone(),
                    value: Some(chunk.iter().collect()),
                },
                DataEntry { name, value: None },
            ]
        })
        .collect();

    Ok(entries)
}

/// Rebuild a description from its data entries, in order
pub fn assemble_description<'a>(entries: impl IntoIterator<Item = &'a DataEntry>) -> String {
    entries
        .into_iter()
        .filter_map(|e| e.value.as_deref())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_description_single_chunk() {
        let entries = chunk_description("Offer HEXA 1 for a song").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "data0");
        assert_eq!(entries[0].value.as_deref(), Some("Offer HEXA 1 for a song"));
        assert_eq!(entries[1].name, "data0");
        assert!(entries[1].value.is_none());
    }

    #[test]
    fn test_chunk_boundaries() {
        let exact = "a".repeat(CHUNK_LEN);
        assert_eq!(chunk_description(&exact).unwrap().len(), 2);

        let over = "b".repeat(CHUNK_LEN + 1);
        let entries = chunk_description(&over).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[2].name, "data1");
        assert_eq!(entries[2].value.as_deref(), Some("b"));
    }

    #[test]
    fn test_length_limits() {
        assert_eq!(
            chunk_description(""),
            Err(DescriptionError::InvalidLength(0))
        );
        let too_long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert_eq!(
            chunk_description(&too_long),
            Err(DescriptionError::InvalidLength(MAX_DESCRIPTION_LEN + 1))
        );
        assert!(chunk_description(&"x".repeat(MAX_DESCRIPTION_LEN)).is_ok());
    }

    #[test]
    fn test_multibyte_chars_not_split() {
        let text = "é".repeat(CHUNK_LEN + 3);
        let entries = chunk_description(&text).unwrap();
        assert_eq!(entries[2].value.as_deref(), Some("ééé"));
    }

    #[test]
    fn test_assemble_description() {
        let text = "Request HEXA 5, ".repeat(10);
        let entries = chunk_description(&text).unwrap();
        assert_eq!(assemble_description(&entries), text);
    }
}
