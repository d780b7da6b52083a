//! JSON output formatter

use super::{DocumentResult, OutputFormatter};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tnm_api::{ClassificationRecord, IcdOExtraction, Metadata};

/// JSON formatter - outputs one object per document as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    documents: Vec<DocumentResult>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
struct DocumentData<'a> {
    source: &'a str,
    records: &'a [ClassificationRecord],
    metadata: &'a Metadata,
    #[serde(flatten)]
    morphology: Option<&'a IcdOExtraction>,
}

impl<'a> From<&'a DocumentResult> for DocumentData<'a> {
    fn from(document: &'a DocumentResult) -> Self {
        Self {
            source: &document.source,
            records: &document.output.records,
            metadata: &document.output.metadata,
            morphology: document.morphology.as_ref(),
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, document: &DocumentResult) -> Result<()> {
        self.documents.push(document.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let data: Vec<DocumentData<'_>> = self.documents.iter().map(DocumentData::from).collect();
        serde_json::to_writer_pretty(&mut self.writer, &data)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
