use crate::app::ports::RecordSink;
use crate::error::Result;
use crate::observability::metrics;
use crate::types::ShapedRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File-based implementation of [`RecordSink`].
///
/// Compact mode writes one JSON object per line (ready for `mongoimport`);
/// pretty mode writes indented objects, each followed by a newline.
pub struct JsonFileSink<W: Write = BufWriter<File>> {
    writer: W,
    pretty: bool,
    written: usize,
}

impl JsonFileSink<BufWriter<File>> {
    pub fn create(path: &Path, pretty: bool) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        info!("Creating shaped output file: {}", path.display());
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self::from_writer(BufWriter::new(file), pretty))
    }
}

impl<W: Write> JsonFileSink<W> {
    pub fn from_writer(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonFileSink<W> {
    fn write_record(&mut self, record: &ShapedRecord) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, record)?;
        } else {
            serde_json::to_writer(&mut self.writer, record)?;
        }
        self.writer.write_all(b"\n")?;
        self.written += 1;
        metrics::sink::record_written();
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        info!("Wrote {} shaped records", self.written);
        Ok(())
    }
}

/// `map.osm` -> `map.osm.json`
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".json");
    PathBuf::from(name)
}
