use thiserror::Error;

use crate::config::Mode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{component} hidden_size {hidden_size} is not divisible by num_heads {num_heads}")]
    HeadSplit {
        component: &'static str,
        hidden_size: usize,
        num_heads: usize,
    },

    #[error("encoder hidden_size {encoder} does not match decoder hidden_size {decoder}")]
    HiddenSizeMismatch { encoder: usize, decoder: usize },

    #[error("lr_policy d_model {d_model} does not match hidden_size {hidden_size}")]
    DModelMismatch { d_model: usize, hidden_size: usize },

    #[error("{0} must be positive")]
    NotPositive(String),

    #[error("{field} is {value}, expected a rate in [0, 1)")]
    RateOutOfRange { field: String, value: f32 },

    #[error("{0} must not be empty")]
    Empty(String),

    #[error("{mode} data layer references missing file {path}")]
    MissingFile { mode: Mode, path: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}
