use crate::prelude::*;
use bevy::color::ColorToPacked;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GalaxyPanel>()
            .add_systems(Startup, configure_visuals_system)
            .add_systems(PostStartup, init_panel_system)
            .add_systems(Update, ui_system);
    }
}

/// Values being edited in the panel. They only reach the live
/// [`GalaxyParams`] once an edit finishes and the draft validates.
#[derive(Resource, Default)]
pub struct GalaxyPanel {
    draft: GalaxyParams,
    error: Option<String>,
    /// A color pick changed the draft and has not been committed yet.
    color_dirty: bool,
}

impl GalaxyPanel {
    /// A color edit finishes when the pointer is released over the picker,
    /// or when the picker closes.
    fn color_edit_finished(&mut self, popup_open: bool, pointer_released: bool) -> bool {
        let finished = self.color_dirty && (pointer_released || !popup_open);
        if finished {
            self.color_dirty = false;
        }
        finished
    }

    fn try_commit(&mut self) -> Option<GalaxyParams> {
        match self.draft.validate() {
            Ok(()) => {
                self.error = None;
                Some(self.draft.clone())
            }
            Err(err) => {
                warn!("Rejected parameter update: {err}");
                self.error = Some(err.to_string());
                None
            }
        }
    }
}

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

fn init_panel_system(galaxy_params: Res<GalaxyParams>, mut panel: ResMut<GalaxyPanel>) {
    panel.draft = galaxy_params.clone();
}

fn edit_finished(response: &egui::Response) -> bool {
    gesture_finished(response.drag_stopped(), response.changed(), response.dragged())
}

/// Sliders report a finished edit when a drag ends, or on any change that
/// is not part of a drag (typed value, click on the track).
fn gesture_finished(drag_stopped: bool, changed: bool, dragged: bool) -> bool {
    drag_stopped || (changed && !dragged)
}

/// Returns whether the color changed this frame. Changes are only
/// committed once the edit finishes, see [`GalaxyPanel::color_edit_finished`].
fn color_row(ui: &mut egui::Ui, color: &mut Srgba, label: &str) -> bool {
    ui.horizontal(|ui| {
        let mut rgb = color.to_u8_array_no_alpha();
        let response = ui.color_edit_button_srgb(&mut rgb);
        ui.label(label);
        if response.changed() {
            *color = Srgba::rgb_u8(rgb[0], rgb[1], rgb[2]);
        }
        response.changed()
    })
    .inner
}

fn ui_system(
    mut contexts: EguiContexts,
    mut panel: ResMut<GalaxyPanel>,
    mut galaxy_params: ResMut<GalaxyParams>,
) {
    let ctx = contexts.ctx_mut();
    let panel = &mut *panel;

    let minval = GalaxyParams::MIN;
    let maxval = GalaxyParams::MAX;
    let step = GalaxyParams::STEP;

    let finished = egui::SidePanel::left("galaxy_panel")
        .default_width(360.0)
        .show(ctx, |ui| {
            ui.heading("Galaxy Parameters");
            let draft = &mut panel.draft;
            let mut finished = false;

            finished |= edit_finished(
                &ui.add(
                    egui::Slider::new(&mut draft.count, minval.count..=maxval.count)
                        .step_by(step.count as f64)
                        .text("Number Of Particles"),
                ),
            );
            finished |= edit_finished(
                &ui.add(
                    egui::Slider::new(&mut draft.size, minval.size..=maxval.size)
                        .step_by(step.size as f64)
                        .text("Size Of Particles"),
                ),
            );
            finished |= edit_finished(
                &ui.add(
                    egui::Slider::new(&mut draft.radius, minval.radius..=maxval.radius)
                        .step_by(step.radius as f64)
                        .text("Radius Of Galaxies"),
                ),
            );
            finished |= edit_finished(
                &ui.add(
                    egui::Slider::new(&mut draft.branches, minval.branches..=maxval.branches)
                        .step_by(step.branches as f64)
                        .text("Branches Of Galaxies"),
                ),
            );
            finished |= edit_finished(
                &ui.add(
                    egui::Slider::new(&mut draft.spin, minval.spin..=maxval.spin)
                        .step_by(step.spin as f64)
                        .text("Spin Galaxies"),
                ),
            );
            finished |= edit_finished(
                &ui.add(
                    egui::Slider::new(
                        &mut draft.randomness,
                        minval.randomness..=maxval.randomness,
                    )
                    .step_by(step.randomness as f64)
                    .text("Randomness"),
                ),
            );
            finished |= edit_finished(
                &ui.add(
                    egui::Slider::new(
                        &mut draft.randomness_power,
                        minval.randomness_power..=maxval.randomness_power,
                    )
                    .step_by(step.randomness_power as f64)
                    .text("Randomness Power"),
                ),
            );
            ui.separator();
            panel.color_dirty |= color_row(ui, &mut draft.inside_color, "Inside Color");
            panel.color_dirty |= color_row(ui, &mut draft.outside_color, "Outside Color");

            if let Some(error) = &panel.error {
                ui.separator();
                ui.colored_label(egui::Color32::LIGHT_RED, error);
            }
            finished
        })
        .inner;

    let popup_open = ctx.memory(|memory| memory.any_popup_open());
    let pointer_released = ctx.input(|input| input.pointer.any_released());
    let finished = finished || panel.color_edit_finished(popup_open, pointer_released);

    if finished {
        if let Some(params) = panel.try_commit() {
            *galaxy_params = params;
        }
    }
}
