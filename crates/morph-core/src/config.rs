use serde::Deserialize;

use crate::error::{MorphError, Result};

/// Tuning constants for the morph engine.
///
/// Every field has a default, so a JSON override only needs to name the
/// values it changes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// Upper bound on particle count; the engine uses fewer when the shape
    /// samples run out.
    pub particle_count: usize,
    pub gravity: f32,
    /// Spring constant while settled on a shape.
    pub spring_strength: f32,
    /// Spring constant while morphing (softer, for a smoother glide).
    pub morph_spring_strength: f32,
    /// Extra factor applied to `spring_strength` outside a morph.
    pub settle_multiplier: f32,
    /// Per-frame velocity retention in [0,1].
    pub damping: f32,
    pub turbulence_strength: f32,
    pub turbulence_freq: f32,
    pub wave_strength: f32,
    pub wave_freq: f32,
    /// Distance from target beyond which a settled particle counts as "away".
    pub distance_threshold: f32,
    pub mouse_intensity: f32,
    pub mouse_range: f32,
    pub mouse_falloff: f32,
    pub mouse_depth_min: f32,
    pub mouse_depth_max: f32,
    /// Pointer movement below this length produces no force.
    pub mouse_min_movement: f32,
    /// Force magnitude above which the frame force is rescaled to `mouse_intensity`.
    pub mouse_force_cap_threshold: f32,
    pub vortex_strength: f32,
    /// +1 or -1, flips the swirl handedness.
    pub vortex_direction: f32,
    /// Seconds for a full particle morph.
    pub morph_duration: f32,
    pub wave_pre_delay: f32,
    pub wave_post_delay: f32,
    /// Lead-in (in morph units) before the model cross-fade starts.
    pub model_morph_delay: f32,
    /// Radians per second of group auto-rotation.
    pub rotation_speed: f32,
    pub min_frame_dt: f32,
    pub max_frame_dt: f32,
    pub palette: Palette,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            particle_count: 40_000,
            gravity: 0.0,
            spring_strength: 100.0,
            morph_spring_strength: 45.0,
            settle_multiplier: 5.0,
            damping: 0.5,
            turbulence_strength: 0.1,
            turbulence_freq: 35.0,
            wave_strength: 75.0,
            wave_freq: 15.0,
            distance_threshold: 0.2,
            mouse_intensity: 20.0,
            mouse_range: 4.0,
            mouse_falloff: 3.0,
            mouse_depth_min: 0.0,
            mouse_depth_max: 1.0,
            mouse_min_movement: 0.001,
            mouse_force_cap_threshold: 0.3,
            vortex_strength: 100.0,
            vortex_direction: 1.0,
            morph_duration: 0.1,
            wave_pre_delay: 0.0,
            wave_post_delay: 0.5,
            model_morph_delay: 0.25,
            rotation_speed: 1.0,
            min_frame_dt: 0.000_01,
            max_frame_dt: 1.0 / 60.0,
            palette: Palette::default(),
        }
    }
}

impl MorphConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MorphError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("gravity", self.gravity),
            ("spring_strength", self.spring_strength),
            ("morph_spring_strength", self.morph_spring_strength),
            ("settle_multiplier", self.settle_multiplier),
            ("damping", self.damping),
            ("turbulence_strength", self.turbulence_strength),
            ("turbulence_freq", self.turbulence_freq),
            ("wave_strength", self.wave_strength),
            ("wave_freq", self.wave_freq),
            ("distance_threshold", self.distance_threshold),
            ("mouse_intensity", self.mouse_intensity),
            ("mouse_range", self.mouse_range),
            ("mouse_falloff", self.mouse_falloff),
            ("mouse_depth_min", self.mouse_depth_min),
            ("mouse_depth_max", self.mouse_depth_max),
            ("vortex_strength", self.vortex_strength),
            ("vortex_direction", self.vortex_direction),
            ("morph_duration", self.morph_duration),
            ("wave_pre_delay", self.wave_pre_delay),
            ("wave_post_delay", self.wave_post_delay),
            ("model_morph_delay", self.model_morph_delay),
            ("rotation_speed", self.rotation_speed),
        ];
        if let Some((name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MorphError::Config(format!("{name} must be finite")));
        }
        if self.morph_duration <= 0.0 {
            return Err(MorphError::Config(format!(
                "morph_duration must be positive, got {}",
                self.morph_duration
            )));
        }
        if self.mouse_depth_min > self.mouse_depth_max {
            return Err(MorphError::Config(format!(
                "mouse depth band is inverted: {} > {}",
                self.mouse_depth_min, self.mouse_depth_max
            )));
        }
        if !(self.min_frame_dt > 0.0 && self.min_frame_dt <= self.max_frame_dt) {
            return Err(MorphError::Config(format!(
                "frame dt bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.min_frame_dt, self.max_frame_dt
            )));
        }
        Ok(())
    }
}

/// The two particle colours, in display (non-linear) space.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub in_place: [f32; 3],
    pub away: [f32; 3],
    pub gamma: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            in_place: [0.690, 0.733, 0.796],
            away: [1.0, 0.831, 0.255],
            gamma: 2.2,
        }
    }
}
