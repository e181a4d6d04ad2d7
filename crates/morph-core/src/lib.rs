//! Particle morph engine for the shape hero animation.
//!
//! A fixed set of particles springs toward one of three point-cloud shapes
//! (monitor, phone, vr). A timed state machine decides when to blend toward
//! the next shape, a secondary "wave" disturbance brackets each morph, and
//! pointer movement pushes and swirls nearby particles. Every frame produces a
//! [`render::RenderSnapshot`] for the instanced renderer.

pub mod clock;
pub mod config;
pub mod content;
pub mod crossfade;
pub mod error;
pub mod forces;
pub mod math;
pub mod particle;
pub mod render;
pub mod shapes;
pub mod solver;
pub mod timeline;
pub mod transition;

pub use config::{MorphConfig, Palette};
pub use error::{MorphError, Result};
pub use shapes::{ShapeKind, ShapeTable};
pub use solver::MorphEngine;
pub use transition::{NavDirection, TransitionEvent, TransitionPhase, TransitionState};
