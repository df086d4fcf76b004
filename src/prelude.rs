pub use crate::galaxy::{Galaxy, GalaxyStats};
pub use galaxy_generator::{GalaxyGenerator, GalaxyParams, ParticleBuffer};
