//! Display settings panel

use mv_core::{MAX_FOV_DEGREES, MIN_FOV_DEGREES};
use mv_renderer::constants::grid::MAX_CELLS;

use crate::panels::{Panel, PanelContext};

/// Settings panel editing the renderer configuration
#[derive(Default)]
pub struct SettingsPanel;

impl SettingsPanel {
    pub fn new() -> Self {
        Self
    }

    fn rgb_button(ui: &mut egui::Ui, label: &str, rgb: &mut [f32; 3]) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label(label);
            let mut color = to_srgb(*rgb);
            if ui.color_edit_button_srgb(&mut color).changed() {
                *rgb = from_srgb(color);
                changed = true;
            }
        });
        changed
    }

    fn percent_slider(ui: &mut egui::Ui, label: &str, alpha: &mut f32) -> bool {
        let mut percent = (*alpha * 100.0).round();
        let changed = ui
            .add(
                egui::Slider::new(&mut percent, 0.0..=100.0)
                    .suffix("%")
                    .text(label),
            )
            .changed();
        if changed {
            *alpha = percent / 100.0;
        }
        changed
    }
}

impl Panel for SettingsPanel {
    fn title(&self) -> &'static str {
        "Settings"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &PanelContext<'_>) {
        let mut renderer_cfg = ctx.config.read().config().renderer.clone();
        let mut changed = false;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.collapsing("Mesh", |ui| {
                let shading = &mut renderer_cfg.shading;
                ui.horizontal(|ui| {
                    changed |= ui.radio_value(&mut shading.wireframe, false, "Solid").changed();
                    changed |= ui
                        .radio_value(&mut shading.wireframe, true, "Wireframe")
                        .changed();
                });
                changed |= Self::rgb_button(ui, "Color:", &mut shading.mesh_color);
                changed |= Self::percent_slider(ui, "Opacity", &mut shading.alpha);
            });

            ui.collapsing("Viewport", |ui| {
                let background = &mut renderer_cfg.viewport.background_color;
                let mut rgb = [background[0], background[1], background[2]];
                if Self::rgb_button(ui, "Background:", &mut rgb) {
                    background[..3].copy_from_slice(&rgb);
                    changed = true;
                }
                changed |= ui
                    .add(
                        egui::Slider::new(
                            &mut renderer_cfg.camera.fov_degrees,
                            MIN_FOV_DEGREES..=MAX_FOV_DEGREES,
                        )
                        .suffix("°")
                        .text("Field of view"),
                    )
                    .changed();
            });

            ui.collapsing("Grid", |ui| {
                let grid = &mut renderer_cfg.grid;
                changed |= ui.checkbox(&mut grid.enabled, "Show grid").changed();
                changed |= Self::percent_slider(ui, "Opacity", &mut grid.alpha);
                ui.horizontal(|ui| {
                    ui.label("Cells:");
                    changed |= ui
                        .add(egui::DragValue::new(&mut grid.cells).range(1..=MAX_CELLS))
                        .changed();
                });
                ui.horizontal(|ui| {
                    ui.label("Size:");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut grid.size)
                                .speed(0.1)
                                .range(0.1..=1000.0),
                        )
                        .changed();
                });
            });
        });

        if changed {
            ctx.config.write().config_mut().renderer = renderer_cfg;
        }

        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("Reset to defaults").clicked() {
                ctx.config.write().reset_to_defaults();
            }
            if ui.button("Save settings").clicked()
                && let Err(e) = ctx.config.read().save()
            {
                tracing::error!("Failed to save config: {}", e);
            }
        });
    }
}

fn to_srgb(rgb: [f32; 3]) -> [u8; 3] {
    rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn from_srgb(color: [u8; 3]) -> [f32; 3] {
    color.map(|c| c as f32 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_srgb([1.0, 0.0, 0.5]), [255, 0, 128]);
        assert_eq!(to_srgb([2.0, -1.0, 0.0]), [255, 0, 0]);
        assert_eq!(from_srgb([255, 0, 51]), [1.0, 0.0, 0.2]);
    }
}
