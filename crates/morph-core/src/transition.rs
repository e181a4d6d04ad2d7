//! Timed shape-transition state machine.
//!
//! A transition is queued either by the auto-rotation counter completing a
//! full turn or by explicit navigation. Queuing arms the "wave" disturbance;
//! once its pre-delay elapses the particle morph runs for `morph_duration`
//! seconds, and the wave then fades out over `wave_post_delay` seconds.

use std::f32::consts::TAU;

use log::{debug, trace};

use crate::config::MorphConfig;
use crate::shapes::ShapeKind;

/// Wave timer value while no wave is armed.
pub const WAVE_DISARMED: f32 = -999.0;

/// One full turn of the particle group, in radians.
pub const FULL_ROTATION: f32 = TAU;

/// Explicit navigation direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NavDirection {
    Previous,
    Next,
}

impl NavDirection {
    /// Shape reached by stepping once from `from` in this direction.
    pub fn step(self, from: ShapeKind) -> ShapeKind {
        let i = from.index();
        match self {
            NavDirection::Previous => ShapeKind::from_index(i + ShapeKind::COUNT - 1),
            NavDirection::Next => ShapeKind::from_index(i + 1),
        }
    }
}

/// Coarse phase of the machine, derived from its timers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransitionPhase {
    /// Settled on `current`; nothing queued.
    Idle,
    /// Wave armed, waiting for its timer to reach zero before morphing.
    PreDelay,
    /// Particles blending from `current` to `next`.
    Morphing,
    /// Morph committed; wave still fading out.
    PostDelay,
}

/// Side effects the collaborators react to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransitionEvent {
    MorphStarted { from: ShapeKind, to: ShapeKind },
    /// Morph progress crossed 0.5: swap captions to `shape`.
    CaptionSwap { shape: ShapeKind },
    /// Morph finished and `shape` is now current (switch video, refresh CTA).
    ShapeCommitted { shape: ShapeKind },
    WaveEnded,
}

/// Timing constants the machine reads from [`MorphConfig`].
#[derive(Clone, Copy, Debug)]
struct Timing {
    morph_duration: f32,
    pre_delay: f32,
    post_delay: f32,
    model_morph_delay: f32,
    rotation_speed: f32,
}

impl From<&MorphConfig> for Timing {
    fn from(c: &MorphConfig) -> Self {
        Self {
            morph_duration: c.morph_duration,
            pre_delay: c.wave_pre_delay,
            post_delay: c.wave_post_delay,
            model_morph_delay: c.model_morph_delay,
            rotation_speed: c.rotation_speed,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TransitionState {
    timing: Timing,
    current: ShapeKind,
    next: ShapeKind,
    progress: f32,
    model_progress: f32,
    auto_rotation: f32,
    wave_timer: f32,
    wave_active: bool,
    queued: bool,
    direction: Option<NavDirection>,
}

impl TransitionState {
    /// Settled on the monitor shape, with phone lined up next.
    pub fn new(config: &MorphConfig) -> Self {
        Self {
            timing: Timing::from(config),
            current: ShapeKind::Monitor,
            next: ShapeKind::Phone,
            progress: 1.0,
            model_progress: 1.0,
            auto_rotation: 0.0,
            wave_timer: WAVE_DISARMED,
            wave_active: false,
            queued: false,
            direction: None,
        }
    }

    /// A morph already in flight from `current` to `next` at `progress`.
    ///
    /// Used to resume scripted sequences; the wave is left disarmed.
    pub fn morphing(config: &MorphConfig, current: ShapeKind, next: ShapeKind, progress: f32) -> Self {
        Self {
            current,
            next,
            progress: progress.clamp(0.0, 1.0),
            ..Self::new(config)
        }
    }

    pub fn current(&self) -> ShapeKind {
        self.current
    }

    pub fn next(&self) -> ShapeKind {
        self.next
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn model_progress(&self) -> f32 {
        self.model_progress
    }

    pub fn auto_rotation(&self) -> f32 {
        self.auto_rotation
    }

    pub fn wave_timer(&self) -> f32 {
        self.wave_timer
    }

    pub fn is_wave_active(&self) -> bool {
        self.wave_active
    }

    pub fn is_queued(&self) -> bool {
        self.queued
    }

    pub fn direction(&self) -> Option<NavDirection> {
        self.direction
    }

    pub fn is_morphing(&self) -> bool {
        self.progress < 1.0
    }

    pub fn phase(&self) -> TransitionPhase {
        if self.is_morphing() {
            TransitionPhase::Morphing
        } else if self.queued {
            TransitionPhase::PreDelay
        } else if self.wave_active {
            TransitionPhase::PostDelay
        } else {
            TransitionPhase::Idle
        }
    }

    /// Whether a navigation request would be accepted right now.
    pub fn can_navigate(&self) -> bool {
        self.progress >= 1.0 && !self.wave_active && !self.queued
    }

    /// Queue a manual transition. Returns `false` (and changes nothing) when a
    /// transition is already queued or in flight.
    pub fn request(&mut self, direction: NavDirection) -> bool {
        if !self.can_navigate() {
            trace!("Navigation {:?} ignored: transition in flight", direction);
            return false;
        }
        self.direction = Some(direction);
        self.arm_wave();
        debug!("Navigation {:?} queued from {}", direction, self.current.label());
        true
    }

    /// Multiplier for the wave disturbance: 1 while morphing, otherwise a
    /// linear ramp keyed to the wave timer that reaches 0 at the end of the
    /// post-delay window.
    pub fn wave_multiplier(&self) -> f32 {
        if !self.wave_active {
            return 0.0;
        }
        if self.progress < 1.0 {
            return 1.0;
        }
        if self.timing.post_delay <= 0.0 {
            return 0.0;
        }
        let since_end = self.wave_timer - self.timing.morph_duration;
        (1.0 - since_end / self.timing.post_delay).max(0.0)
    }

    /// Advance the machine by one frame.
    ///
    /// `rotation_delta` is the group rotation applied this frame; it feeds the
    /// auto-trigger counter. Events are appended to `events` in the order they
    /// happen.
    pub fn update(&mut self, dt: f32, rotation_delta: f32, events: &mut Vec<TransitionEvent>) {
        let timing = self.timing;
        self.auto_rotation += rotation_delta;

        // ==== 1. AUTO TRIGGER ====
        let pre_rotation = timing.rotation_speed * timing.pre_delay;
        if self.auto_rotation >= FULL_ROTATION - pre_rotation
            && !self.wave_active
            && !self.queued
            && self.progress >= 1.0
        {
            self.direction = None;
            self.arm_wave();
            debug!("Auto transition queued from {}", self.current.label());
        }

        // ==== 2. PRE-DELAY ====
        if self.wave_active {
            self.wave_timer += dt;
            if self.wave_timer >= 0.0 && self.progress >= 1.0 && self.queued {
                if self.auto_rotation >= FULL_ROTATION && self.direction.is_none() {
                    self.auto_rotation = 0.0;
                }
                self.start_morph(events);
                self.queued = false;
            }
        }

        // ==== 3. PARTICLE MORPH ====
        if self.progress < 1.0 {
            let step = dt / timing.morph_duration;
            let before = self.progress;
            self.progress += step;
            if self.progress >= 0.5 && before < 0.5 {
                events.push(TransitionEvent::CaptionSwap { shape: self.next });
            }
            if self.progress >= 1.0 {
                self.progress = 1.0;
                self.current = self.next;
                self.direction = None;
                debug!("Shape committed: {}", self.current.label());
                events.push(TransitionEvent::ShapeCommitted { shape: self.current });
            }
        }

        // ==== 4. MODEL CROSS-FADE ====
        if self.model_progress < 1.0 {
            self.model_progress = (self.model_progress + dt / timing.morph_duration).min(1.0);
        }

        // ==== 5. WAVE FADE-OUT ====
        if self.wave_active && self.wave_timer >= timing.morph_duration + timing.post_delay {
            self.wave_active = false;
            self.wave_timer = WAVE_DISARMED;
            events.push(TransitionEvent::WaveEnded);
        }
    }

    fn arm_wave(&mut self) {
        self.queued = true;
        self.wave_active = true;
        self.wave_timer = -self.timing.pre_delay;
    }

    fn start_morph(&mut self, events: &mut Vec<TransitionEvent>) {
        self.progress = 0.0;
        self.model_progress = -self.timing.model_morph_delay;
        self.next = self.direction.unwrap_or(NavDirection::Next).step(self.current);
        debug!("Morph started: {} -> {}", self.current.label(), self.next.label());
        events.push(TransitionEvent::MorphStarted {
            from: self.current,
            to: self.next,
        });
    }
}
