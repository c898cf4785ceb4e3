//! Information about the open file

use crate::panels::{Panel, PanelContext};
use crate::state::SceneInfo;

/// Scene information panel
#[derive(Default)]
pub struct SceneInfoPanel;

impl SceneInfoPanel {
    pub fn new() -> Self {
        Self
    }

    fn scene_grid(ui: &mut egui::Ui, scene: &SceneInfo) {
        egui::Grid::new("scene_info_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Name");
                ui.label(&scene.name);
                ui.end_row();

                ui.label("Path");
                ui.label(scene.path.display().to_string())
                    .on_hover_text(scene.path.display().to_string());
                ui.end_row();

                ui.label("Format");
                ui.label(scene.format);
                ui.end_row();

                ui.label("Vertices");
                ui.label(scene.stats.vertices.to_string());
                ui.end_row();

                ui.label("Triangles");
                ui.label(scene.stats.triangles.to_string());
                ui.end_row();

                ui.label("Edges");
                ui.label(scene.stats.edges.to_string());
                ui.end_row();

                if let Some(obj) = &scene.obj_info {
                    ui.label("UVs");
                    ui.label(if obj.has_uv { "Yes" } else { "No" });
                    ui.end_row();

                    ui.label("Materials");
                    ui.label(obj.material_count.to_string());
                    ui.end_row();

                    ui.label("Draw calls");
                    ui.label(obj.draw_calls.to_string());
                    ui.end_row();
                }
            });
    }
}

impl Panel for SceneInfoPanel {
    fn title(&self) -> &'static str {
        "Scene"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &PanelContext<'_>) {
        let state = ctx.app_state.lock();
        match &state.scene {
            Some(scene) => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    Self::scene_grid(ui, scene);
                });
            }
            None => {
                ui.weak("No mesh loaded");
                ui.label("Use File > Open... or drop a file on the window.");
            }
        }
    }
}
