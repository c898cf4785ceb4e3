//! UI panels

mod scene_info;
mod settings;
mod viewport;

pub use scene_info::SceneInfoPanel;
pub use settings::SettingsPanel;
pub use viewport::ViewportPanel;

use crate::config::SharedConfig;
use crate::state::{SharedAppState, SharedViewportState};

/// Shared handles a panel may use while drawing
pub struct PanelContext<'a> {
    pub app_state: &'a SharedAppState,
    pub config: &'a SharedConfig,
    /// wgpu state and the 3D viewport, when wgpu is available
    pub render: Option<(&'a egui_wgpu::RenderState, &'a SharedViewportState)>,
}

/// A dockable panel
pub trait Panel {
    /// Tab title
    fn title(&self) -> &'static str;

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &PanelContext<'_>);
}
