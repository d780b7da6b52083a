//! Grouping component matches into classification records

use crate::component::ComponentMatch;
use crate::error::Result;
use crate::record::ClassificationRecord;

/// Partitions an ordered match stream into records
///
/// A match goes into the open record when its slot is free or when it contains
/// the stored match. Any other repeat of a kind closes the record and opens a
/// new one.
#[derive(Debug, Default)]
pub struct ClassificationBuilder {
    current: ClassificationRecord,
    records: Vec<ClassificationRecord>,
}

impl ClassificationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next match in document order
    pub fn push(&mut self, component: ComponentMatch) -> Result<()> {
        if !self.current.accepts(&component) {
            self.close();
        }
        self.current.insert(component)?;
        Ok(())
    }

    /// Close the open record and return all non-empty records
    pub fn finish(mut self) -> Vec<ClassificationRecord> {
        self.close();
        self.records
    }

    fn close(&mut self) {
        let record = std::mem::take(&mut self.current);
        if !record.is_empty() {
            self.records.push(record);
        }
    }
}

/// Run a whole match stream through a fresh builder
pub fn build_records<I>(matches: I) -> Result<Vec<ClassificationRecord>>
where
    I: IntoIterator<Item = ComponentMatch>,
{
    let mut builder = ClassificationBuilder::new();
    for component in matches {
        builder.push(component)?;
    }
    Ok(builder.finish())
}
