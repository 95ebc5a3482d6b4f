//! Metrics for the shaping pipeline.
//!
//! Recorded through the `metrics` facade. [`init_metrics`] installs the
//! Prometheus recorder; the returned handle renders the current values.

use std::fmt;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

use crate::error::Result;

/// Install the process-wide Prometheus recorder
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("Metrics system initialized");
    Ok(handle)
}

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Reader metrics
    ReaderElementsRead,

    // Shaper metrics
    ShaperRecordsShaped,
    ShaperElementsRejected,
    ShaperErrors,
    ShaperTagsSkipped,
    ShaperPostcodesRejected,

    // Sink metrics
    SinkRecordsWritten,
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricName::ReaderElementsRead => "osm_reader_elements_read_total",
            MetricName::ShaperRecordsShaped => "osm_shaper_records_shaped_total",
            MetricName::ShaperElementsRejected => "osm_shaper_elements_rejected_total",
            MetricName::ShaperErrors => "osm_shaper_errors_total",
            MetricName::ShaperTagsSkipped => "osm_shaper_tags_skipped_total",
            MetricName::ShaperPostcodesRejected => "osm_shaper_postcodes_rejected_total",
            MetricName::SinkRecordsWritten => "osm_sink_records_written_total",
        };
        write!(f, "{}", name)
    }
}

impl MetricName {
    pub fn as_str(&self) -> String {
        self.to_string()
    }
}

pub mod reader {
    use super::MetricName;

    pub fn elements_read(count: u64) {
        metrics::counter!(MetricName::ReaderElementsRead.as_str()).increment(count);
    }
}

pub mod shaper {
    use super::MetricName;

    pub fn record_shaped(kind: &str) {
        metrics::counter!(MetricName::ShaperRecordsShaped.as_str(), "kind" => kind.to_string())
            .increment(1);
    }

    pub fn element_rejected() {
        metrics::counter!(MetricName::ShaperElementsRejected.as_str()).increment(1);
    }

    pub fn shape_error() {
        metrics::counter!(MetricName::ShaperErrors.as_str()).increment(1);
    }

    /// `reason` is `problem_chars` or `address_key`
    pub fn tag_skipped(reason: &'static str) {
        metrics::counter!(MetricName::ShaperTagsSkipped.as_str(), "reason" => reason).increment(1);
    }

    pub fn postcode_rejected() {
        metrics::counter!(MetricName::ShaperPostcodesRejected.as_str()).increment(1);
    }
}

pub mod sink {
    use super::MetricName;

    pub fn record_written() {
        metrics::counter!(MetricName::SinkRecordsWritten.as_str()).increment(1);
    }
}
