use bevy::prelude::*;
use galaxy_generator::GalaxyParams;

mod rotation;
mod spawn_galaxy;

use spawn_galaxy::GalaxyRenderable;

pub struct GalaxyPlugin;

impl Plugin for GalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxyParams::default())
            .init_resource::<GalaxyRenderable>()
            .init_resource::<GalaxyStats>()
            .add_systems(
                Update,
                (spawn_galaxy::rebuild_galaxy, rotation::rotate_galaxy).chain(),
            );
    }
}

/// Marks the point cloud entity currently in the scene.
#[derive(Component)]
pub struct Galaxy;

#[derive(Resource, Default, Debug)]
pub struct GalaxyStats {
    pub particle_count: usize,
    /// Number of successful generations so far.
    pub generation: u32,
    pub build_millis: f32,
}
