use crate::error::{MorphError, Result};
use crate::shapes::ShapeKind;

/// Parse a sample payload: a JSON array of `[x, y, z]` triples.
pub fn parse_samples(shape: ShapeKind, json: &str) -> Result<Vec<[f32; 3]>> {
    serde_json::from_str(json).map_err(|source| MorphError::Samples { shape, source })
}
