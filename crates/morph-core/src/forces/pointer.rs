use glam::{Quat, Vec3};

use crate::config::MorphConfig;
use crate::math::{rotate_about_y, CUBE_CENTER};

/// World up, used to derive the vortex tangent.
const UP: Vec3 = Vec3::Y;

/// Parameters for the pointer push and vortex terms.
#[derive(Clone, Copy, Debug)]
pub struct PointerParams {
    pub intensity: f32,
    pub range: f32,
    pub falloff: f32,
    pub depth_min: f32,
    pub depth_max: f32,
    pub min_movement: f32,
    pub force_cap_threshold: f32,
    pub vortex_strength: f32,
    pub vortex_direction: f32,
}

impl From<&MorphConfig> for PointerParams {
    fn from(c: &MorphConfig) -> Self {
        Self {
            intensity: c.mouse_intensity,
            range: c.mouse_range,
            falloff: c.mouse_falloff,
            depth_min: c.mouse_depth_min,
            depth_max: c.mouse_depth_max,
            min_movement: c.mouse_min_movement,
            force_cap_threshold: c.mouse_force_cap_threshold,
            vortex_strength: c.vortex_strength,
            vortex_direction: c.vortex_direction,
        }
    }
}

/// Pointer ray in the particle group's local frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerRay {
    pub origin: Vec3,
    /// Unit length once any pointer input has arrived; zero before that.
    pub direction: Vec3,
}

impl PointerRay {
    /// Perpendicular distance from `p` to the ray's line.
    #[inline]
    pub fn distance_to(&self, p: Vec3) -> f32 {
        self.direction.cross(p - self.origin).length()
    }
}

/// Pointer state, written by input events and read once per frame.
///
/// Input can arrive at any point between frames. Coordinates are stored in
/// the group's de-rotated frame so the push direction matches what is on
/// screen at the time of the event.
#[derive(Clone, Debug, Default)]
pub struct MouseState {
    coord: Vec3,
    prev_coord: Vec3,
    ray: PointerRay,
}

impl MouseState {
    pub fn coord(&self) -> Vec3 {
        self.coord
    }

    pub fn ray(&self) -> PointerRay {
        self.ray
    }

    /// Record a world-space pointer ray.
    ///
    /// The ray is intersected with the z = 0 plane, then the hit point, the
    /// origin and the direction are rotated by `-group_rotation` about the
    /// cube centre. A ray that misses the plane keeps the previous hit point.
    pub fn update_from_world_ray(&mut self, origin: Vec3, direction: Vec3, group_rotation: f32) {
        let direction = direction.normalize_or_zero();
        let angle = -group_rotation;

        if let Some(hit) = intersect_view_plane(origin, direction) {
            self.coord = rotate_about_y(hit, CUBE_CENTER, angle);
        }
        self.ray = PointerRay {
            origin: rotate_about_y(origin, CUBE_CENTER, angle),
            direction: Quat::from_rotation_y(angle) * direction,
        };
    }

    /// Pointer force for this frame, from movement since the previous frame.
    ///
    /// Movement shorter than `min_movement` yields zero. A force longer than
    /// `force_cap_threshold` is rescaled to length `intensity`.
    pub fn take_frame_force(&mut self, params: &PointerParams) -> Vec3 {
        let delta = self.coord - self.prev_coord;
        self.prev_coord = self.coord;

        if delta.length() <= params.min_movement {
            return Vec3::ZERO;
        }
        let mut force = delta * params.intensity;
        let len = force.length();
        if len > params.force_cap_threshold {
            force *= params.intensity / len;
        }
        force
    }
}

/// Intersect a ray with the plane z = 0 (normal facing -Z).
fn intersect_view_plane(origin: Vec3, direction: Vec3) -> Option<Vec3> {
    if direction.z.abs() < 1e-8 {
        return None;
    }
    let t = -origin.z / direction.z;
    if t < 0.0 {
        return None;
    }
    Some(origin + direction * t)
}

/// Velocity kick from the pointer for one particle.
///
/// Only particles inside the depth band are affected. Strength falls off
/// with the perpendicular distance to the pointer ray. Particles that have
/// been knocked `away` from their target also get a tangential component
/// around the up axis, so they swirl rather than scatter.
pub fn compute_pointer_push(
    pos: Vec3,
    ray: &PointerRay,
    frame_force: Vec3,
    away: bool,
    params: &PointerParams,
) -> Vec3 {
    if pos.z < params.depth_min || pos.z > params.depth_max {
        return Vec3::ZERO;
    }

    let dist = ray.distance_to(pos);
    let magnitude = (1.0 - dist * params.range).max(0.0).powf(params.falloff).max(0.0);
    if magnitude <= 0.01 {
        return Vec3::ZERO;
    }

    let mut push = frame_force * magnitude;

    if away && params.vortex_strength > 0.0 {
        let push_len = push.length();
        if push_len > 0.001 {
            let tangent = (push / push_len).cross(UP);
            let tangent_len = tangent.length();
            if tangent_len > 0.001 {
                let vortex_amount = params.vortex_strength * 0.01 * params.vortex_direction;
                push += tangent / tangent_len * push_len * vortex_amount;
            }
        }
    }

    push
}
