use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::app::ports::RecordSink;
use crate::constants::{NODE_KIND, WAY_KIND};
use crate::observability::metrics;
use crate::pipeline::processing::parser::Parser;
use crate::pipeline::processing::shape::Shaper;
use crate::types::RawElement;

/// Result of a complete shaping run
#[derive(Debug, Clone, Serialize)]
pub struct ShapeReport {
    pub total_elements: usize,
    pub shaped_records: usize,
    pub rejected_elements: usize,
    pub errors: Vec<String>,
    pub nodes: usize,
    pub ways: usize,
    /// Distinct `created.user` values across shaped records
    pub distinct_users: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Use case for shaping raw elements and handing the records to a sink
pub struct ShapeUseCase<S: RecordSink> {
    shaper: Shaper,
    output: S,
}

impl<S: RecordSink> ShapeUseCase<S> {
    pub fn new(shaper: Shaper, output: S) -> Self {
        Self { shaper, output }
    }

    /// Create a use case with the default shaper options
    pub fn with_default_shaper(output: S) -> Self {
        Self::new(Shaper::new(), output)
    }

    pub fn output(&self) -> &S {
        &self.output
    }

    pub fn into_output(self) -> S {
        self.output
    }

    /// Parse `bytes` with `parser`, then shape every element it yields
    pub fn shape_bytes<P: Parser>(&mut self, parser: &P, bytes: &[u8]) -> Result<ShapeReport> {
        let elements = parser.parse(bytes).context("Failed to read map export")?;
        self.shape_elements(elements)
    }

    /// Shape elements in order. Per-element shaping errors are collected in the
    /// report; a failing sink aborts the run.
    #[instrument(skip_all)]
    pub fn shape_elements<I>(&mut self, elements: I) -> Result<ShapeReport>
    where
        I: IntoIterator<Item = RawElement>,
    {
        let started_at = Utc::now();
        let mut total = 0usize;
        let mut shaped = 0usize;
        let mut rejected = 0usize;
        let mut nodes = 0usize;
        let mut ways = 0usize;
        let mut errors = Vec::new();
        let mut users = HashSet::new();

        for (i, element) in elements.into_iter().enumerate() {
            total += 1;
            match self.shaper.shape(&element) {
                Ok(Some(record)) => {
                    self.output
                        .write_record(&record)
                        .with_context(|| format!("Failed to write record for element {i}"))?;

                    shaped += 1;
                    match record.kind.as_str() {
                        NODE_KIND => nodes += 1,
                        WAY_KIND => ways += 1,
                        _ => {}
                    }
                    if let Some(user) = record.user() {
                        users.insert(user.to_string());
                    }
                    metrics::shaper::record_shaped(&record.kind);

                    if shaped % 10_000 == 0 {
                        debug!("Shaped {} records", shaped);
                    }
                }
                Ok(None) => {
                    rejected += 1;
                    metrics::shaper::element_rejected();
                }
                Err(e) => {
                    warn!("Shaping failed for element {}: {}", i, e);
                    metrics::shaper::shape_error();
                    errors.push(format!("Failed to shape element {i}: {e}"));
                }
            }
        }

        self.output.finish().context("Failed to finish output")?;

        info!(
            "Shaped {} records from {} elements ({} rejected, {} errors)",
            shaped,
            total,
            rejected,
            errors.len()
        );

        Ok(ShapeReport {
            total_elements: total,
            shaped_records: shaped,
            rejected_elements: rejected,
            errors,
            nodes,
            ways,
            distinct_users: users.len(),
            started_at,
            finished_at: Utc::now(),
        })
    }
}
