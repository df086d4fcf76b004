use crate::graphics::{GalaxyPointsMaterial, build_point_mesh};
use crate::prelude::*;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use std::time::Instant;

/// Handles of the point cloud currently in the scene.
#[derive(Resource, Default)]
pub struct GalaxyRenderable {
    current: Option<LiveGalaxy>,
}

struct LiveGalaxy {
    entity: Entity,
    mesh: Handle<Mesh>,
    material: Handle<GalaxyPointsMaterial>,
}

impl GalaxyRenderable {
    /// Releases the mesh and material, then takes the entity out of the scene.
    fn dispose(
        &mut self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<GalaxyPointsMaterial>,
    ) {
        let Some(live) = self.current.take() else {
            return;
        };
        meshes.remove(&live.mesh);
        materials.remove(&live.material);
        commands.entity(live.entity).despawn();
        debug!("Disposed galaxy {}", live.entity);
    }
}

/// Regenerates the point cloud whenever the live parameters change.
/// Parameters that fail validation leave the current galaxy in place.
pub(super) fn rebuild_galaxy(
    mut commands: Commands,
    params: Res<GalaxyParams>,
    mut renderable: ResMut<GalaxyRenderable>,
    mut stats: ResMut<GalaxyStats>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<GalaxyPointsMaterial>>,
) {
    if !params.is_changed() {
        return;
    }

    let started = Instant::now();
    let buffer = match GalaxyGenerator::new().generate(&params) {
        Ok(buffer) => buffer,
        Err(err) => {
            warn!("Rejected galaxy parameters: {err}");
            return;
        }
    };

    renderable.dispose(&mut commands, &mut meshes, &mut materials);

    stats.generation += 1;
    stats.particle_count = buffer.len();

    if buffer.is_empty() {
        stats.build_millis = started.elapsed().as_secs_f32() * 1000.0;
        info!("Galaxy {} is empty, nothing to draw", stats.generation);
        return;
    }

    let mesh = meshes.add(build_point_mesh(&buffer));
    let material = materials.add(GalaxyPointsMaterial::new(params.size));
    let entity = commands
        .spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::IDENTITY,
            Galaxy,
            NoFrustumCulling,
        ))
        .id();
    renderable.current = Some(LiveGalaxy {
        entity,
        mesh,
        material,
    });

    stats.build_millis = started.elapsed().as_secs_f32() * 1000.0;
    info!(
        "Generated galaxy {}: {} particles, {} arms in {:.1} ms",
        stats.generation, stats.particle_count, params.branches, stats.build_millis
    );
}
