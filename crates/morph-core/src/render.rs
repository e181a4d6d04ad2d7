use bytemuck::{Pod, Zeroable};

use crate::config::Palette;
use crate::math::{gamma_correct, CUBE_CENTER};
use crate::particle::{ParticleSet, Tint};

/// GPU-compatible instance record: 24 bytes, offset then linear colour.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Position relative to the group origin at the cube centre.
    pub offset: [f32; 3],
    pub color: [f32; 3],
}

/// Palette colours after gamma correction, ready for the instance buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearPalette {
    pub in_place: [f32; 3],
    pub away: [f32; 3],
}

impl LinearPalette {
    pub fn new(palette: &Palette) -> Self {
        Self {
            in_place: gamma_correct(palette.in_place, palette.gamma),
            away: gamma_correct(palette.away, palette.gamma),
        }
    }

    #[inline]
    pub fn color(&self, tint: Tint) -> [f32; 3] {
        match tint {
            Tint::InPlace => self.in_place,
            Tint::Away => self.away,
        }
    }
}

/// Per-frame output handed to the renderer.
///
/// Owned by the engine and rewritten in place once per frame; the renderer
/// only ever reads it between frames.
pub struct RenderSnapshot {
    pub instances: Vec<InstanceData>,
    /// Rotation about +Y applied to the whole particle group.
    pub group_rotation: f32,
    /// True when any instance colour changed since the previous snapshot.
    pub colors_dirty: bool,
    palette: LinearPalette,
    written: Vec<Tint>,
}

impl RenderSnapshot {
    pub fn new(particles: &ParticleSet, palette: &Palette) -> Self {
        let palette = LinearPalette::new(palette);
        let instances = particles
            .position
            .iter()
            .zip(&particles.tint)
            .map(|(p, t)| InstanceData {
                offset: (*p - CUBE_CENTER).to_array(),
                color: palette.color(*t),
            })
            .collect();
        Self {
            instances,
            group_rotation: 0.0,
            colors_dirty: true,
            palette,
            written: particles.tint.clone(),
        }
    }

    /// Copy positions and any changed colours out of the particle set.
    pub fn sync(&mut self, particles: &ParticleSet, group_rotation: f32) {
        self.group_rotation = group_rotation;
        self.colors_dirty = false;
        for i in 0..particles.count {
            let instance = &mut self.instances[i];
            instance.offset = (particles.position[i] - CUBE_CENTER).to_array();

            let tint = particles.tint[i];
            if self.written[i] != tint {
                instance.color = self.palette.color(tint);
                self.written[i] = tint;
                self.colors_dirty = true;
            }
        }
    }

    pub fn palette(&self) -> &LinearPalette {
        &self.palette
    }

    /// Raw bytes of the instance buffer, for direct upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}
