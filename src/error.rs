use thiserror::Error;

#[derive(Error, Debug)]
pub enum WranglerError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to install metrics recorder: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Per-element failures. Rejections and skipped tags are not errors and never
/// show up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("{kind} {} has non-numeric {field} value {value:?}", display_id(.id))]
    InvalidCoordinate {
        kind: String,
        id: Option<String>,
        field: &'static str,
        value: String,
    },

    #[error("{kind} {} repeats attribute {name:?}", display_id(.id))]
    DuplicateAttribute {
        kind: String,
        id: Option<String>,
        name: String,
    },
}

fn display_id(id: &Option<String>) -> String {
    match id {
        Some(id) => format!("id={id}"),
        None => "without id".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, WranglerError>;
