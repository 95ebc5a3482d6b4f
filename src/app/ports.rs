use crate::error::Result;
use crate::types::ShapedRecord;

/// Destination for shaped records, fed one record at a time in input order
pub trait RecordSink {
    fn write_record(&mut self, record: &ShapedRecord) -> Result<()>;

    /// Flush anything buffered. Called once after the last record.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn write_record(&mut self, record: &ShapedRecord) -> Result<()> {
        (**self).write_record(record)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn write_record(&mut self, record: &ShapedRecord) -> Result<()> {
        (**self).write_record(record)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}
