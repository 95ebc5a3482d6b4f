pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod observability;
pub mod pipeline;
pub mod types;

// Application use cases and the ports they talk through
pub mod app;
// Concrete adapters for those ports
pub mod infra;

pub use pipeline::processing::normalize::{normalize_network, normalize_postcode};
pub use pipeline::processing::shape::Shaper;
pub use types::{ChildEntry, FieldValue, RawElement, ShapedRecord};
