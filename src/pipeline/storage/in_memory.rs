use crate::app::ports::RecordSink;
use crate::error::Result;
use crate::types::ShapedRecord;
use tracing::debug;

/// In-memory sink for development/testing
#[derive(Debug, Default)]
pub struct InMemorySink {
    records: Vec<ShapedRecord>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ShapedRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ShapedRecord> {
        self.records
    }
}

impl RecordSink for InMemorySink {
    fn write_record(&mut self, record: &ShapedRecord) -> Result<()> {
        self.records.push(record.clone());
        debug!("Stored {} record #{}", record.kind, self.records.len());
        Ok(())
    }
}
