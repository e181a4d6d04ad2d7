use glam::Vec3;

/// Sine/cosine swirl field sampled at `pos`.
///
/// Each axis is driven by the other two position components at spatial
/// frequency `freq`, with slightly detuned time phases so the field never
/// settles into a standing pattern. Components are in [-1, 1].
#[inline]
pub fn swirl(pos: Vec3, freq: f32, time: f32) -> Vec3 {
    Vec3::new(
        (pos.y * freq + time).sin() * (pos.z * freq + time * 1.3).cos(),
        (pos.z * freq + time * 1.1).sin() * (pos.x * freq + time * 0.9).cos(),
        (pos.x * freq + time * 0.8).sin() * (pos.y * freq + time * 1.2).cos(),
    )
}

/// Velocity kick from the always-on ambient turbulence.
///
/// `strength` is already scaled by the frame delta.
pub fn turbulence_impulse(pos: Vec3, freq: f32, time: f32, strength: f32) -> Vec3 {
    if strength == 0.0 {
        return Vec3::ZERO;
    }
    swirl(pos, freq, time) * strength
}

/// Velocity kick from the transition wave.
///
/// `strength` is already scaled by the frame delta; `multiplier` is the
/// fade factor from the transition state (0 when the wave is not armed).
pub fn wave_impulse(pos: Vec3, freq: f32, time: f32, strength: f32, multiplier: f32) -> Vec3 {
    let s = strength * multiplier;
    if s == 0.0 {
        return Vec3::ZERO;
    }
    swirl(pos, freq, time) * s
}
