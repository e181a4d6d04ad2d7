use glam::Vec3;
use log::{info, warn};

use crate::error::{MorphError, Result};
use crate::shapes::ShapeKind;

/// Axis-aligned bounding box over raw sample coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub const EMPTY: Bounds = Bounds {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn include(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Largest side of the box. Degenerate boxes report 1.0 so that
    /// normalisation collapses every sample onto the cube centre instead of
    /// dividing by zero.
    pub fn max_range(&self) -> f32 {
        let range = (self.max - self.min).max_element();
        if range > f32::EPSILON {
            range
        } else {
            1.0
        }
    }

    /// Map a raw sample into the unit cube centred on 0.5.
    ///
    /// Raw Y and Z are swapped and X is mirrored to match the mesh
    /// coordinate convention.
    pub fn normalize(&self, raw: Vec3) -> Vec3 {
        let c = self.center();
        let range = self.max_range();
        Vec3::new(
            0.5 - (raw.x - c.x) / range,
            0.5 + (raw.z - c.z) / range,
            0.5 + (raw.y - c.y) / range,
        )
    }
}

/// Immutable normalised targets for all three shapes.
#[derive(Clone, Debug)]
pub struct ShapeTable {
    count: usize,
    targets: [Vec<Vec3>; 3],
}

impl ShapeTable {
    /// Normalise three raw sample arrays into one shared unit cube.
    ///
    /// Uses `min(max_count, shortest array)` particles. One bounding box is
    /// computed over the first `max_count` samples of every shape so they
    /// keep their relative scale.
    pub fn normalize(raw: [&[[f32; 3]]; 3], max_count: usize) -> Result<Self> {
        let [monitor, phone, vr] = raw;
        let shortest = monitor.len().min(phone.len()).min(vr.len());
        let count = max_count.min(shortest);
        if count == 0 {
            return Err(MorphError::NoSamples {
                monitor: monitor.len(),
                phone: phone.len(),
                vr: vr.len(),
            });
        }
        if count < max_count {
            warn!(
                "Shape samples cover only {} of {} requested particles (monitor={}, phone={}, vr={})",
                count,
                max_count,
                monitor.len(),
                phone.len(),
                vr.len()
            );
        }

        // Each shape contributes up to `max_count` of its own samples, so a
        // short sibling array never changes the shared scale.
        let mut bounds = Bounds::EMPTY;
        for shape in &raw {
            for p in &shape[..max_count.min(shape.len())] {
                bounds.include(Vec3::from_array(*p));
            }
        }

        let targets = raw.map(|shape| {
            shape[..count]
                .iter()
                .map(|p| bounds.normalize(Vec3::from_array(*p)))
                .collect::<Vec<_>>()
        });

        info!(
            "Normalised {} particles per shape, shared range {:.4}",
            count,
            bounds.max_range()
        );

        Ok(Self { count, targets })
    }

    /// Build a table from targets that are already in unit-cube space.
    ///
    /// Tables are truncated to the shortest of the three.
    pub fn from_normalized(targets: [Vec<Vec3>; 3]) -> Result<Self> {
        let count = targets.iter().map(Vec::len).min().unwrap_or(0);
        if count == 0 {
            return Err(MorphError::NoSamples {
                monitor: targets[0].len(),
                phone: targets[1].len(),
                vr: targets[2].len(),
            });
        }
        let targets = targets.map(|mut t| {
            t.truncate(count);
            t
        });
        Ok(Self { count, targets })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn targets(&self, shape: ShapeKind) -> &[Vec3] {
        &self.targets[shape.index()]
    }
}
