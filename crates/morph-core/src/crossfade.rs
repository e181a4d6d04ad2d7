//! Cross-fade state for the three product models.
//!
//! The models dissolve through a scan-line discard pattern whose threshold
//! follows the (delayed) model morph progress. This module only produces the
//! uniform values and visibility flags; the shader lives with the renderer.

use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};

use crate::shapes::ShapeKind;
use crate::transition::TransitionState;

/// Uniform block for one model's dissolve material: 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialUniforms {
    pub time: f32,
    pub model_index: u32,
    pub current_shape: u32,
    pub next_shape: u32,
    pub current_threshold: f32,
    pub next_threshold: f32,
    pub _pad: [f32; 2],
}

impl MaterialUniforms {
    /// Discard threshold the shader compares the scan pattern against.
    /// Anything above the pattern's range (2.0) hides the model entirely.
    pub fn band_threshold(&self) -> f32 {
        if self.model_index == self.current_shape {
            self.current_threshold * 2.0 - 1.0
        } else if self.model_index == self.next_shape {
            self.next_threshold * 2.0 - 1.0
        } else {
            2.0
        }
    }
}

pub struct ModelCrossfade {
    pub visible: [bool; 3],
    pub uniforms: [MaterialUniforms; 3],
    /// Models face the opposite way to the particle group.
    pub rotation: f32,
}

impl Default for ModelCrossfade {
    fn default() -> Self {
        let mut uniforms = [MaterialUniforms::zeroed(); 3];
        for (i, u) in uniforms.iter_mut().enumerate() {
            u.model_index = i as u32;
            u.next_shape = 1;
            u.current_threshold = -1.0;
            u.next_threshold = 1.0;
        }
        Self {
            visible: [true, false, false],
            uniforms,
            rotation: PI,
        }
    }
}

impl ModelCrossfade {
    pub fn update(&mut self, state: &TransitionState, time: f32, group_rotation: f32) {
        let current = state.current();
        let next = state.next();
        let mp = state.model_progress();
        let fading = (0.0..1.0).contains(&mp);

        let (current_threshold, next_threshold) = if fading { (mp, 1.0 - mp) } else { (-1.0, 1.0) };

        for shape in ShapeKind::ALL {
            let i = shape.index();
            self.visible[i] = shape == current || (fading && shape == next);
            self.uniforms[i] = MaterialUniforms {
                time,
                model_index: i as u32,
                current_shape: current.index() as u32,
                next_shape: next.index() as u32,
                current_threshold,
                next_threshold,
                _pad: [0.0; 2],
            };
        }
        self.rotation = group_rotation + PI;
    }

    pub fn uniform_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uniforms)
    }
}
