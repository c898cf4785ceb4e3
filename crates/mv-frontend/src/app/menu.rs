//! Menu bar rendering

use std::path::PathBuf;

use mv_core::MeshFormat;

use crate::state::{AppAction, SharedAppState};

/// Actions triggered by the menu that the app handles itself
pub enum MenuAction {
    ResetLayout,
    ShowAbout,
}

/// Ask the user for a mesh file
pub fn pick_mesh_file() -> Option<PathBuf> {
    let extensions: Vec<String> = MeshFormat::EXTENSIONS
        .iter()
        .flat_map(|ext| [ext.to_string(), ext.to_uppercase()])
        .collect();
    rfd::FileDialog::new()
        .set_title("Open mesh")
        .add_filter("Mesh files", &extensions)
        .add_filter("All files", &["*"])
        .pick_file()
}

/// Render the menu bar and return any triggered action
pub fn render_menu_bar(ctx: &egui::Context, app_state: &SharedAppState) -> Option<MenuAction> {
    let mut menu_action = None;
    let has_scene = app_state.lock().has_scene();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(
                        &egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O),
                    )))
                    .clicked()
                {
                    ui.close_menu();
                    if let Some(path) = pick_mesh_file() {
                        app_state.lock().queue_action(AppAction::OpenMesh(path));
                    }
                }
                if ui
                    .add_enabled(has_scene, egui::Button::new("Close"))
                    .clicked()
                {
                    app_state.lock().queue_action(AppAction::CloseMesh);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Reset Rotation").clicked() {
                    app_state.lock().queue_action(AppAction::ResetRotation);
                    ui.close_menu();
                }
                if ui.button("Fit View").clicked() {
                    app_state.lock().queue_action(AppAction::FitView);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Reset Layout").clicked() {
                    menu_action = Some(MenuAction::ResetLayout);
                    ui.close_menu();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    menu_action = Some(MenuAction::ShowAbout);
                    ui.close_menu();
                }
            });
        });
    });

    menu_action
}
