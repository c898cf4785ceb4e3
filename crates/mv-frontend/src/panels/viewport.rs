//! 3D Viewport panel

use glam::Vec2;

use crate::panels::{Panel, PanelContext};
use crate::state::{AppAction, SharedAppState, SharedViewportState, ViewportGesture};

/// 3D viewport panel
#[derive(Default)]
pub struct ViewportPanel;

impl Panel for ViewportPanel {
    fn title(&self) -> &'static str {
        "Viewport"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &PanelContext<'_>) {
        match ctx.render {
            Some((render_state, viewport_state)) => {
                self.scene_ui(ui, ctx.app_state, render_state, viewport_state)
            }
            None => Self::unavailable_ui(ui),
        }
    }
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self
    }

    fn unavailable_ui(ui: &mut egui::Ui) {
        let available_size = ui.available_size();
        let (response, painter) =
            ui.allocate_painter(available_size, egui::Sense::click_and_drag());

        painter.rect_filled(response.rect, 0.0, egui::Color32::from_rgb(25, 25, 25));
        painter.text(
            response.rect.center(),
            egui::Align2::CENTER_CENTER,
            "3D Viewport\n(wgpu not available)",
            egui::FontId::proportional(16.0),
            egui::Color32::GRAY,
        );
    }

    fn scene_ui(
        &mut self,
        ui: &mut egui::Ui,
        app_state: &SharedAppState,
        render_state: &egui_wgpu::RenderState,
        viewport_state: &SharedViewportState,
    ) {
        let available_size = ui.available_size();
        let width = available_size.x as u32;
        let height = available_size.y as u32;

        if width == 0 || height == 0 {
            return;
        }

        let (rect, response) =
            ui.allocate_exact_size(available_size, egui::Sense::click_and_drag());
        let to_local = |p: egui::Pos2| Vec2::new(p.x - rect.min.x, p.y - rect.min.y);

        // Input first so this frame shows its own gesture
        let mut gesture = ViewportGesture::default();

        // Left button: arcball, anchored where the button went down
        if response.drag_started_by(egui::PointerButton::Primary) {
            gesture.rotate_start = ui
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos())
                .map(to_local);
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            gesture.rotate_to = response.interact_pointer_pos().map(to_local);
        }
        gesture.rotate_end = response.drag_stopped_by(egui::PointerButton::Primary);

        // Right button: pan
        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            gesture.pan = Vec2::new(delta.x, delta.y);
        }

        if response.hovered() {
            gesture.scroll = ui.input(|i| i.smooth_scroll_delta.y);
        }

        let view_changed = !gesture.is_empty() && viewport_state.lock().apply_gesture(&gesture);

        let texture_id = {
            let mut state = viewport_state.lock();
            let mut egui_renderer = render_state.renderer.write();
            let tex_id = state.ensure_texture(width, height, &mut egui_renderer);
            state.render();
            tex_id
        };

        egui::Image::new(egui::load::SizedTexture::new(
            texture_id,
            [available_size.x, available_size.y],
        ))
        .paint_at(ui, rect);

        // Context menu
        response.context_menu(|ui| {
            if ui.button("Reset Rotation").clicked() {
                app_state.lock().queue_action(AppAction::ResetRotation);
                ui.close_menu();
            }
            if ui.button("Fit View").clicked() {
                app_state.lock().queue_action(AppAction::FitView);
                ui.close_menu();
            }
        });

        // Smooth scrolling and drags keep producing deltas after this frame
        if view_changed || response.dragged() {
            ui.ctx().request_repaint();
        }
    }
}
