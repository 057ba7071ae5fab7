//! Collision and integration engine for the 2D ideal gas.
//!
//! [`ParticleContainer`] owns the particles and advances them one discrete tick at a
//! time; [`Particle`] is the per-body state record.

pub mod collision;
pub mod container;
pub mod geometry;
pub mod particle;
pub mod stats;

pub use collision::{TickSummary, Wall};
pub use container::{ParticleContainer, DEFAULT_NEIGHBOR_WINDOW, DEFAULT_TIME_STEP};
pub use geometry::{Vec2, DIM};
pub use particle::{Particle, Tint};
pub use stats::SpeedHistogram;
