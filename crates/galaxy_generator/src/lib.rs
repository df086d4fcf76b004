//! Procedural spiral galaxy point clouds.
//!
//! Maps a [`GalaxyParams`] snapshot to a [`ParticleBuffer`] of positions and
//! colors. Rendering is left to the caller.

mod error;
mod generator;
mod params;

pub use error::GalaxyError;
pub use generator::{GalaxyGenerator, ParticleBuffer, generate};
pub use params::GalaxyParams;
