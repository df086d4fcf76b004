use bevy::prelude::*;

mod points_material;

pub use points_material::{GalaxyPointsMaterial, build_point_mesh};

pub struct GraphicsPlugin;

impl Plugin for GraphicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<GalaxyPointsMaterial>::default());
    }
}
