pub mod record_output_adapter;

pub use record_output_adapter::{default_output_path, JsonFileSink};
