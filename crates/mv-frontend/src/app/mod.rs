//! Main application module

mod dialogs;
mod dock;
mod menu;

use std::path::PathBuf;
use std::sync::Arc;

use egui_dock::{DockArea, DockState, Style};
use parking_lot::Mutex;

use crate::actions::{ActionContext, dispatch_action};
use crate::config::SharedConfig;
use crate::panels::PanelContext;
use crate::state::{
    AppAction, SharedAppState, SharedViewportState, ViewportState, create_shared_state,
};

pub use dock::{MeshTabViewer, PanelType, create_dock_layout};
pub use menu::{MenuAction, pick_mesh_file, render_menu_bar};

const OPEN_SHORTCUT: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);

/// Main application
pub struct MeshViewerApp {
    dock_state: DockState<PanelType>,
    app_state: SharedAppState,
    viewport_state: Option<SharedViewportState>,
    config: SharedConfig,
    show_about: bool,
}

impl MeshViewerApp {
    /// Create a new app, optionally opening `initial_file`
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: SharedConfig,
        initial_file: Option<PathBuf>,
    ) -> Self {
        let renderer_config = config.read().config().renderer.clone();

        // Create viewport state if WGPU is available
        let viewport_state = cc.wgpu_render_state.as_ref().map(|render_state| {
            let device = render_state.device.clone();
            let queue = render_state.queue.clone();
            let format = render_state.target_format;

            Arc::new(Mutex::new(ViewportState::new(
                device,
                queue,
                format,
                &renderer_config,
            )))
        });
        if viewport_state.is_none() {
            tracing::warn!("wgpu render state unavailable, viewport disabled");
        }

        let app_state = create_shared_state();
        if let Some(path) = initial_file {
            app_state.lock().queue_action(AppAction::OpenMesh(path));
        }

        Self {
            dock_state: create_dock_layout(),
            app_state,
            viewport_state,
            config,
            show_about: false,
        }
    }

    /// Process pending actions
    fn process_actions(&mut self) {
        let actions = self.app_state.lock().take_pending_actions();
        let ctx = ActionContext::new(&self.app_state, self.viewport_state.as_ref());

        for action in actions {
            dispatch_action(action, &ctx);
        }
    }

    /// Keyboard shortcuts and dropped files
    fn handle_input(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_shortcut(&OPEN_SHORTCUT))
            && let Some(path) = pick_mesh_file()
        {
            self.app_state.lock().queue_action(AppAction::OpenMesh(path));
        }

        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            tracing::debug!("File dropped: {}", path.display());
            self.app_state.lock().queue_action(AppAction::OpenMesh(path));
        }
    }

    /// Push edited settings to the renderer and remember the window size
    fn sync_config(&mut self, ctx: &egui::Context) {
        let inner_size = ctx.input(|i| i.viewport().inner_rect.map(|r| r.size()));

        if let Some(size) = inner_size {
            let resized = {
                let cfg = self.config.read();
                let window = &cfg.config().window;
                window.width != size.x || window.height != size.y
            };
            if resized {
                let mut cfg = self.config.write();
                cfg.config_mut().window.width = size.x;
                cfg.config_mut().window.height = size.y;
            }
        }

        if let Some(viewport_state) = &self.viewport_state {
            let renderer_config = self.config.read().config().renderer.clone();
            viewport_state.lock().apply_config(&renderer_config);
        }
    }
}

impl eframe::App for MeshViewerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.process_actions();

        if let Some(menu_action) = render_menu_bar(ctx, &self.app_state) {
            match menu_action {
                MenuAction::ResetLayout => {
                    self.dock_state = create_dock_layout();
                }
                MenuAction::ShowAbout => self.show_about = true,
            }
        }

        self.sync_config(ctx);

        let render = frame.wgpu_render_state().zip(self.viewport_state.as_ref());
        let mut tab_viewer = MeshTabViewer {
            ctx: PanelContext {
                app_state: &self.app_state,
                config: &self.config,
                render,
            },
        };

        DockArea::new(&mut self.dock_state)
            .style(Style::from_egui(ctx.style().as_ref()))
            .show(ctx, &mut tab_viewer);

        dialogs::show_about(ctx, &mut self.show_about);
        dialogs::show_error(ctx, &self.app_state);
    }
}
