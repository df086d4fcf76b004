use bevy::{
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};
use bevy_egui::EguiContexts;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(PostUpdate, camera_control_system);
    }
}

const START_POSITION: Vec3 = Vec3::new(3.0, 3.0, 3.0);

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);
    let camera_main = CameraMain::looking_from(START_POSITION, Vec3::ZERO);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        Transform::from_translation(camera_main.translation())
            .looking_at(camera_main.target_pos, Vec3::Y),
        camera_main,
    ));
}

/// Orbit camera state. Drag and scroll input feed velocities that decay
/// every frame, which gives the damped feel.
#[derive(Component, Clone, Debug)]
pub struct CameraMain {
    target_pos: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    orbit_velocity: Vec2,
    smooth_zoom_buffer: f32,
}

impl CameraMain {
    const ORBIT_SENSITIVITY: f32 = 0.002;
    /// Share of velocity kept per 60 Hz frame.
    const DAMPING: f32 = 0.9;
    const MAX_PITCH: f32 = 1.5;
    const MIN_DISTANCE: f32 = 0.5;
    const MAX_DISTANCE: f32 = 60.0;

    fn looking_from(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length();
        Self {
            target_pos: target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
            orbit_velocity: Vec2::ZERO,
            smooth_zoom_buffer: 0.0,
        }
    }

    fn translation(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target_pos + Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    /// Advances the orbit by one frame. `drag` is the mouse delta in pixels,
    /// `scroll` the wheel delta in lines (positive zooms in).
    fn advance(&mut self, drag: Vec2, scroll: f32, delta_secs: f32) {
        self.orbit_velocity += drag * Self::ORBIT_SENSITIVITY;
        self.smooth_zoom_buffer += scroll * 0.05;

        self.yaw -= self.orbit_velocity.x;
        self.pitch = (self.pitch + self.orbit_velocity.y).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
        self.orbit_velocity *= Self::DAMPING.powf(delta_secs * 60.0);

        // scroll delta is cached to a buffer and converted to zoom over time
        let smooth_zoom_min = 0.001f32;
        let smooth_zoom_factor = 0.2f32;
        let smooth_zoom_amount = if self.smooth_zoom_buffer < 0.0 {
            f32::min(
                self.smooth_zoom_buffer * smooth_zoom_factor,
                (-smooth_zoom_min).max(self.smooth_zoom_buffer),
            )
        } else {
            f32::max(
                self.smooth_zoom_buffer * smooth_zoom_factor,
                smooth_zoom_min.min(self.smooth_zoom_buffer),
            )
        };
        self.smooth_zoom_buffer -= smooth_zoom_amount;
        self.distance = (self.distance * (1.0 - smooth_zoom_amount))
            .clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }
}

pub fn camera_control_system(
    mut query: Query<(&mut Transform, &mut CameraMain)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    time: Res<Time>,
) {
    let Ok((mut transform, mut camera_main)) = query.single_mut() else {
        return;
    };

    // input over the parameter panel belongs to egui
    let ctx = contexts.ctx_mut();
    let pointer_on_ui = ctx.wants_pointer_input() || ctx.is_pointer_over_area();

    let motion: Vec2 = motion_evr.read().map(|ev| ev.delta).sum();
    let scroll: f32 = scroll_evr
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.02,
        })
        .sum();

    let (drag, scroll) = if pointer_on_ui {
        (Vec2::ZERO, 0.0)
    } else if mouse_buttons.pressed(MouseButton::Left) {
        (motion, scroll)
    } else {
        (Vec2::ZERO, scroll)
    };

    camera_main.advance(drag, scroll, time.delta_secs());

    transform.translation = camera_main.translation();
    transform.look_at(camera_main.target_pos, Vec3::Y);
}
