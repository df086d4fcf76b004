use crate::prelude::*;
use bevy::diagnostic::DiagnosticsStore;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

pub struct StatsWidgetPlugin;

impl Plugin for StatsWidgetPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_widget)
            .add_systems(Update, update_widget_system)
            .add_plugins(FrameTimeDiagnosticsPlugin::default());
    }
}

#[derive(Component)]
struct StatsText;

fn setup_widget(mut commands: Commands) {
    commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::FlexStart,
                width: Val::Px(260.),
                right: Val::Percent(1.),
                top: Val::Percent(1.),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::linear_rgba(0.0, 0.03, 0.08, 0.5)),
            GlobalZIndex(i32::MAX),
        ))
        .with_children(|parent| {
            parent.spawn((
                StatsText,
                Text(" N/A".to_string()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
            ));
        });
}

fn stats_label(stats: &GalaxyStats, fps: f64, frame_time: f64) -> String {
    format!(
        "Particles: {}\nGeneration: {} ({:.1} ms)\nFPS: {fps:.1} ({frame_time:.2} ms)",
        stats.particle_count, stats.generation, stats.build_millis
    )
}

fn update_widget_system(
    diagnostics: Res<DiagnosticsStore>,
    stats: Res<GalaxyStats>,
    mut query: Query<&mut Text, With<StatsText>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|frame_time| frame_time.smoothed())
        .unwrap_or(0.0);

    for mut text in &mut query {
        text.0 = stats_label(&stats, fps, frame_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_lists_particles_and_timing() {
        let stats = GalaxyStats {
            particle_count: 100_000,
            generation: 2,
            build_millis: 12.34,
        };
        let label = stats_label(&stats, 59.96, 16.678);
        assert!(label.contains("Particles: 100000"));
        assert!(label.contains("Generation: 2 (12.3 ms)"));
        assert!(label.contains("FPS: 60.0 (16.68 ms)"));
    }
}
