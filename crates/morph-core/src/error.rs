use thiserror::Error;

use crate::shapes::ShapeKind;

#[derive(Debug, Error)]
pub enum MorphError {
    /// At least one shape supplied no samples, so there is nothing to morph.
    #[error("no particle samples available (monitor={monitor}, phone={phone}, vr={vr})")]
    NoSamples {
        monitor: usize,
        phone: usize,
        vr: usize,
    },

    #[error("malformed {shape} samples: {source}")]
    Samples {
        shape: ShapeKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MorphError>;
