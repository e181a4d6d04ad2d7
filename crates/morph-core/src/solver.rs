use std::f32::consts::TAU;

use glam::Vec3;
use log::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::clock::FrameClock;
use crate::config::MorphConfig;
use crate::crossfade::ModelCrossfade;
use crate::error::{MorphError, Result};
use crate::forces::pointer::{compute_pointer_push, MouseState, PointerParams, PointerRay};
use crate::forces::turbulence::{turbulence_impulse, wave_impulse};
use crate::math::clamp_unit;
use crate::particle::{ParticleSet, Tint};
use crate::render::RenderSnapshot;
use crate::shapes::samples::parse_samples;
use crate::shapes::{ShapeKind, ShapeTable};
use crate::transition::{NavDirection, TransitionEvent, TransitionState};

/// Everything one particle update reads, captured once per frame.
struct FrameContext<'a> {
    current: &'a [Vec3],
    next: &'a [Vec3],
    morphing: bool,
    progress: f32,
    dt: f32,
    time: f32,
    turbulence_freq: f32,
    turbulence_strength: f32,
    wave_freq: f32,
    wave_strength: f32,
    wave_multiplier: f32,
    ray: PointerRay,
    pointer_force: Vec3,
    pointer: PointerParams,
    spring: f32,
    damping: f32,
    gravity: f32,
    threshold_sq: f32,
}

impl FrameContext<'_> {
    /// Advance one particle by `dt`. Returns the new position, velocity and tint.
    fn step_particle(&self, i: usize, pos: Vec3, mut vel: Vec3) -> (Vec3, Vec3, Tint) {
        let target = if self.morphing {
            self.current[i].lerp(self.next[i], self.progress)
        } else {
            self.current[i]
        };
        let to_target = target - pos;
        let away = !self.morphing && to_target.length_squared() > self.threshold_sq;

        // ==== 1. TURBULENCE ====
        vel += turbulence_impulse(pos, self.turbulence_freq, self.time, self.turbulence_strength);

        // ==== 2. WAVE ====
        vel += wave_impulse(pos, self.wave_freq, self.time, self.wave_strength, self.wave_multiplier);

        // ==== 3. POINTER ====
        vel += compute_pointer_push(pos, &self.ray, self.pointer_force, away, &self.pointer);

        // ==== 4. SPRING + DAMPING ====
        vel += to_target * self.spring;
        vel *= self.damping;
        vel.y += self.gravity * self.dt;

        let new_pos = clamp_unit(pos + vel * self.dt);
        let tint = if away { Tint::Away } else { Tint::InPlace };
        (new_pos, vel, tint)
    }
}

/// The particle morph engine.
///
/// Owns the shape targets, the particle set, the transition state machine,
/// pointer state and the per-frame render outputs. Drive it with
/// [`MorphEngine::advance`] once per display frame.
pub struct MorphEngine {
    config: MorphConfig,
    pointer_params: PointerParams,
    table: ShapeTable,
    particles: ParticleSet,
    transition: TransitionState,
    mouse: MouseState,
    clock: FrameClock,
    group_rotation: f32,
    snapshot: RenderSnapshot,
    crossfade: ModelCrossfade,
    events: Vec<TransitionEvent>,
    running: bool,
}

impl MorphEngine {
    /// Build an engine with particles at rest on the monitor shape.
    pub fn new(table: ShapeTable, config: MorphConfig) -> Result<Self> {
        config.validate()?;
        let count = table.count().min(config.particle_count);
        if count == 0 {
            return Err(MorphError::NoSamples {
                monitor: table.targets(ShapeKind::Monitor).len().min(config.particle_count),
                phone: table.targets(ShapeKind::Phone).len().min(config.particle_count),
                vr: table.targets(ShapeKind::Vr).len().min(config.particle_count),
            });
        }

        let particles = ParticleSet::at_rest_on(&table.targets(ShapeKind::Monitor)[..count]);
        let snapshot = RenderSnapshot::new(&particles, &config.palette);

        info!("Morph engine created: {} particles", count);

        Ok(Self {
            pointer_params: PointerParams::from(&config),
            transition: TransitionState::new(&config),
            clock: FrameClock::new(config.min_frame_dt, config.max_frame_dt),
            config,
            table,
            particles,
            mouse: MouseState::default(),
            group_rotation: 0.0,
            snapshot,
            crossfade: ModelCrossfade::default(),
            events: Vec::new(),
            running: true,
        })
    }

    /// Normalise raw samples and build an engine.
    pub fn from_samples(raw: [&[[f32; 3]]; 3], config: MorphConfig) -> Result<Self> {
        let table = ShapeTable::normalize(raw, config.particle_count)?;
        Self::new(table, config)
    }

    /// Build an engine from the three JSON sample payloads.
    pub fn from_json(monitor: &str, phone: &str, vr: &str, config: MorphConfig) -> Result<Self> {
        let monitor = parse_samples(ShapeKind::Monitor, monitor)?;
        let phone = parse_samples(ShapeKind::Phone, phone)?;
        let vr = parse_samples(ShapeKind::Vr, vr)?;
        Self::from_samples([&monitor, &phone, &vr], config)
    }

    /// Replace the transition state, e.g. to resume a scripted sequence.
    pub fn with_transition(mut self, transition: TransitionState) -> Self {
        self.transition = transition;
        self
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn count(&self) -> usize {
        self.particles.count
    }

    pub fn table(&self) -> &ShapeTable {
        &self.table
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn transition(&self) -> &TransitionState {
        &self.transition
    }

    pub fn snapshot(&self) -> &RenderSnapshot {
        &self.snapshot
    }

    pub fn crossfade(&self) -> &ModelCrossfade {
        &self.crossfade
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    pub fn group_rotation(&self) -> f32 {
        self.group_rotation
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Suspend or resume stepping (e.g. when the canvas scrolls out of view).
    pub fn set_running(&mut self, running: bool) {
        if self.running != running {
            info!("Morph engine {}", if running { "resumed" } else { "suspended" });
        }
        self.running = running;
    }

    /// Queue a manual transition; ignored while one is queued or in flight.
    pub fn request(&mut self, direction: NavDirection) -> bool {
        self.transition.request(direction)
    }

    /// Feed a world-space pointer ray. May be called any time between frames.
    pub fn pointer_ray(&mut self, origin: Vec3, direction: Vec3) {
        self.mouse
            .update_from_world_ray(origin, direction, self.group_rotation);
    }

    /// Events produced since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run one display frame.
    ///
    /// `raw_dt` is the wall-clock time since the previous frame in seconds;
    /// it is clamped before integration. Returns `false` without touching
    /// any state while the engine is suspended.
    pub fn advance(&mut self, raw_dt: f32) -> bool {
        if !self.running {
            return false;
        }

        let dt = self.clock.tick(raw_dt);
        let time = self.clock.elapsed() as f32;
        let rotation_delta = dt * self.config.rotation_speed;
        self.group_rotation = (self.group_rotation + rotation_delta).rem_euclid(TAU);

        self.transition.update(dt, rotation_delta, &mut self.events);
        self.crossfade
            .update(&self.transition, time, self.group_rotation);
        self.integrate(dt, time);
        true
    }

    /// Integrate every particle by `dt` at animation time `time` using the
    /// current transition state, then refresh the render snapshot.
    pub fn integrate(&mut self, dt: f32, time: f32) {
        let cfg = &self.config;
        let tr = &self.transition;
        let morphing = tr.is_morphing();

        let spring = if morphing {
            cfg.morph_spring_strength * dt
        } else {
            cfg.spring_strength * dt * cfg.settle_multiplier
        };

        let ctx = FrameContext {
            current: self.table.targets(tr.current()),
            next: self.table.targets(tr.next()),
            morphing,
            progress: tr.progress(),
            dt,
            time,
            turbulence_freq: cfg.turbulence_freq,
            turbulence_strength: cfg.turbulence_strength * dt,
            wave_freq: cfg.wave_freq,
            wave_strength: cfg.wave_strength * dt,
            wave_multiplier: tr.wave_multiplier(),
            ray: self.mouse.ray(),
            pointer_force: self.mouse.take_frame_force(&self.pointer_params),
            pointer: self.pointer_params,
            spring,
            damping: cfg.damping,
            gravity: cfg.gravity,
            threshold_sq: cfg.distance_threshold * cfg.distance_threshold,
        };

        let particles = &mut self.particles;

        #[cfg(feature = "parallel")]
        {
            particles
                .position
                .par_iter_mut()
                .zip(particles.velocity.par_iter_mut())
                .zip(particles.tint.par_iter_mut())
                .enumerate()
                .for_each(|(i, ((pos, vel), tint))| {
                    let (p, v, t) = ctx.step_particle(i, *pos, *vel);
                    *pos = p;
                    *vel = v;
                    *tint = t;
                });
        }

        #[cfg(not(feature = "parallel"))]
        {
            for i in 0..particles.count {
                let (p, v, t) = ctx.step_particle(i, particles.position[i], particles.velocity[i]);
                particles.position[i] = p;
                particles.velocity[i] = v;
                particles.tint[i] = t;
            }
        }

        self.snapshot.sync(&self.particles, self.group_rotation);
    }
}
