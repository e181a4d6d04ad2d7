use glam::{Quat, Vec3};

/// Centre of the unit cube the particles live in.
pub const CUBE_CENTER: Vec3 = Vec3::splat(0.5);

/// Raise each channel to `gamma` (display colour -> linear buffer colour).
pub fn gamma_correct(rgb: [f32; 3], gamma: f32) -> [f32; 3] {
    rgb.map(|c| c.powf(gamma))
}

/// Rotate `p` by `angle` radians about the +Y axis passing through `center`.
pub fn rotate_about_y(p: Vec3, center: Vec3, angle: f32) -> Vec3 {
    Quat::from_rotation_y(angle) * (p - center) + center
}

/// Clamp into [0, 1]; NaN maps to 0.
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x >= 0.0 {
        x.min(1.0)
    } else {
        0.0
    }
}

/// Component-wise clamp into the unit cube.
#[inline]
pub fn clamp_unit(p: Vec3) -> Vec3 {
    Vec3::new(clamp01(p.x), clamp01(p.y), clamp01(p.z))
}
