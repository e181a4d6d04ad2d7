use glam::Vec3;

/// Which palette colour a particle is drawn with.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Tint {
    /// Morphing, or settled within the distance threshold of its target.
    #[default]
    InPlace = 0,
    /// Settled shape, but knocked further than the threshold from its target.
    Away = 1,
}

/// SoA particle storage
pub struct ParticleSet {
    pub count: usize,
    /// Always inside the unit cube after a step.
    pub position: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    pub tint: Vec<Tint>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec3::ZERO; count],
            velocity: vec![Vec3::ZERO; count],
            tint: vec![Tint::InPlace; count],
        }
    }

    /// Particles at rest on the given targets.
    pub fn at_rest_on(targets: &[Vec3]) -> Self {
        let mut set = Self::new(targets.len());
        set.position.copy_from_slice(targets);
        set
    }
}
