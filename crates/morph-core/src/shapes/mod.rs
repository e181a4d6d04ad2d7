//! Shape target tables.
//!
//! Three point clouds (monitor, phone, vr) normalised into one shared unit
//! cube, plus loading of the raw JSON sample payloads.
pub mod normalize;
pub mod samples;

use std::fmt;

pub use normalize::{Bounds, ShapeTable};

/// The three shapes the particles cycle through, in cycle order.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ShapeKind {
    Monitor = 0,
    Phone = 1,
    Vr = 2,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Monitor, ShapeKind::Phone, ShapeKind::Vr];
    pub const COUNT: usize = 3;

    /// Shape for a cycle index; indices wrap modulo 3.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            ShapeKind::Monitor => "monitor",
            ShapeKind::Phone => "phone",
            ShapeKind::Vr => "vr",
        }
    }

    /// Human-readable name used in logs.
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Monitor => "Monitor",
            ShapeKind::Phone => "Phone",
            ShapeKind::Vr => "VR",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_wraps() {
        assert_eq!(ShapeKind::from_index(0), ShapeKind::Monitor);
        assert_eq!(ShapeKind::from_index(2), ShapeKind::Vr);
        assert_eq!(ShapeKind::from_index(4), ShapeKind::Phone);
    }

    #[test]
    fn test_display_uses_asset_key() {
        assert_eq!(ShapeKind::Vr.to_string(), "vr");
        assert_eq!(ShapeKind::Vr.label(), "VR");
    }
}
