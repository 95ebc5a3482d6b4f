pub mod processing;
pub mod storage;

pub use processing::parser::{MetricsParser, OsmXmlParser, Parser};
pub use processing::shape::{Shaper, ShaperOptions};
