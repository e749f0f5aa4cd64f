use thiserror::Error;

/// Everything that can go wrong while wiring up a scene or an item.
///
/// These are all detected before the first frame runs; the per-frame update
/// itself has no failure path.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scene file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("item is missing its {0}")]
    MissingBinding(&'static str),

    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("unknown activation key {0:?}")]
    UnknownKey(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, value: impl ToString) -> Self {
        ConfigError::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}
