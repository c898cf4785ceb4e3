//! Modal windows: About and error messages

use crate::state::SharedAppState;

const CONTROLS: &[(&str, &str)] = &[
    ("Left drag", "Rotate"),
    ("Right drag", "Pan"),
    ("Mouse wheel", "Zoom"),
    ("Right click", "Reset rotation / fit view"),
    ("Ctrl+O", "Open a mesh"),
    ("Drop a file", "Open it"),
];

/// About window listing the controls
pub fn show_about(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("About")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.heading("Mesh Viewer");
            ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
            ui.label("Views OBJ, STL, PLY, OFF and OM meshes.");
            ui.separator();
            egui::Grid::new("about_controls")
                .num_columns(2)
                .show(ui, |ui| {
                    for (input, action) in CONTROLS {
                        ui.strong(*input);
                        ui.label(*action);
                        ui.end_row();
                    }
                });
        });
}

/// Show the pending error message, if any, until acknowledged
pub fn show_error(ctx: &egui::Context, app_state: &SharedAppState) {
    let Some(message) = app_state.lock().error_message.clone() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.colored_label(ui.visuals().error_fg_color, message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        app_state.lock().error_message = None;
    }
}
