//! Data Transfer Objects for API

use crate::error::{ApiError, Result};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tnm_core::ClassificationRecord;

/// Input source for extraction
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    /// Raw text string
    Text(String),
    /// File path
    File(PathBuf),
    /// Raw bytes (UTF-8)
    Bytes(Vec<u8>),
    /// Reader (not serializable)
    #[cfg_attr(feature = "serde", serde(skip))]
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<dyn Read>").finish(),
        }
    }
}

impl Input {
    /// Create input from text
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    /// Create input from file path
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Read the text content from the input
    pub fn read_text(self) -> Result<String> {
        match self {
            Input::Text(text) => Ok(text),
            Input::File(path) => fs::read_to_string(&path).map_err(ApiError::Io),
            Input::Bytes(bytes) => String::from_utf8(bytes).map_err(ApiError::Utf8),
            Input::Reader(mut reader) => {
                let mut buffer = String::new();
                reader.read_to_string(&mut buffer).map_err(ApiError::Io)?;
                Ok(buffer)
            }
        }
    }
}

/// Processing metadata
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Total characters processed
    pub total_chars: usize,
    /// Number of records found
    pub record_count: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Code of the language whose boundary defaults were used
    pub language: String,
}

/// Extracted records with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Output {
    /// Classification records in document order
    pub records: Vec<ClassificationRecord>,
    /// Processing metadata
    pub metadata: Metadata,
}

impl Output {
    /// Whether no classification was found
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_input_debug_hides_payload() {
        let input = Input::from_bytes(vec![b'a'; 16]);
        assert_eq!(format!("{input:?}"), "Bytes(16)");

        let input = Input::from_reader(Cursor::new("pT1"));
        assert_eq!(format!("{input:?}"), "Reader(\"<dyn Read>\")");
    }

    #[test]
    fn test_invalid_utf8_bytes() {
        let input = Input::from_bytes(vec![0xff, 0xfe]);
        assert!(matches!(input.read_text(), Err(ApiError::Utf8(_))));
    }

    #[test]
    fn test_reader_input() {
        let input = Input::from_reader(Cursor::new("pT2 N0"));
        assert_eq!(input.read_text().unwrap(), "pT2 N0");
    }
}
