//! Plain text output formatter

use super::{record_summary, DocumentResult, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - one line per record
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, document: &DocumentResult) -> Result<()> {
        writeln!(
            self.writer,
            "{}: {} record(s)",
            document.source, document.output.metadata.record_count
        )?;
        for (index, record) in document.output.records.iter().enumerate() {
            writeln!(self.writer, "[{}] {}", index + 1, record_summary(record))?;
        }
        if let Some(morphology) = &document.morphology {
            for code in morphology.morphology() {
                writeln!(self.writer, "ICD-O: {}", code.value)?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
