use super::Galaxy;
use bevy::prelude::*;

/// Radians per second around the vertical axis.
const ROTATION_SPEED: f32 = 0.05;

pub fn galaxy_rotation(elapsed_secs: f32) -> Quat {
    Quat::from_rotation_y(elapsed_secs * ROTATION_SPEED)
}

/// Orientation depends only on elapsed time, so a rebuilt galaxy picks up
/// where the old one left off.
pub(super) fn rotate_galaxy(time: Res<Time>, mut query: Query<&mut Transform, With<Galaxy>>) {
    let rotation = galaxy_rotation(time.elapsed_secs());
    for mut transform in &mut query {
        transform.rotation = rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_is_slow_and_vertical() {
        assert_eq!(galaxy_rotation(0.0), Quat::IDENTITY);

        let (axis, angle) = galaxy_rotation(10.0).to_axis_angle();
        assert!((angle - 0.5).abs() < 1e-5);
        assert!(axis.abs_diff_eq(Vec3::Y, 1e-5));
    }
}
