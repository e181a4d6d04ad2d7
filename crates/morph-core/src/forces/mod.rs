/// Per-particle force terms: ambient turbulence, the transition wave, and
/// pointer push/vortex.
pub mod pointer;
pub mod turbulence;
