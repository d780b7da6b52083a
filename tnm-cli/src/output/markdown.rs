//! Markdown output formatter

use super::{DocumentResult, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - one section per document, records as a numbered list
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    record_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            record_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_document(&mut self, document: &DocumentResult) -> Result<()> {
        writeln!(self.writer, "## {}", document.source)?;
        writeln!(self.writer)?;

        for (index, record) in document.output.records.iter().enumerate() {
            let codes = record
                .iter()
                .map(|component| format!("`{}`", component.token()))
                .collect::<Vec<_>>()
                .join(" ");
            let merged = if record.is_merged() { " *(merged)*" } else { "" };
            writeln!(self.writer, "{}. {codes}{merged}", index + 1)?;
        }
        self.record_count += document.output.records.len();

        if let Some(morphology) = &document.morphology {
            for code in morphology.morphology() {
                writeln!(self.writer, "- ICD-O: `{}`", code.value)?;
            }
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total records: {}*", self.record_count)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::document;

    #[test]
    fn test_markdown_output() {
        let mut buffer = Vec::new();
        {
            let mut formatter = MarkdownFormatter::new(&mut buffer);
            formatter
                .format_document(&document("a.txt", "pT1 N0", false))
                .unwrap();
            formatter
                .format_document(&document("b.txt", "T2 N1. Später: ypT0", false))
                .unwrap();
            formatter.finish().unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with("## a.txt\n\n1. `pT1` `N0`\n"));
        assert!(output.contains("## b.txt\n\n1. `T2` `N1`\n2. `ypT0`\n"));
        assert!(output.ends_with("---\n*Total records: 3*\n"));
    }
}
