//! Dock layout and tab viewer

use egui_dock::{DockState, NodeIndex, TabViewer};

use crate::panels::{Panel, PanelContext, SceneInfoPanel, SettingsPanel, ViewportPanel};

/// Tabs of the main window
pub enum PanelType {
    Viewport(ViewportPanel),
    Scene(SceneInfoPanel),
    Settings(SettingsPanel),
}

impl PanelType {
    fn panel(&mut self) -> &mut dyn Panel {
        match self {
            PanelType::Viewport(p) => p,
            PanelType::Scene(p) => p,
            PanelType::Settings(p) => p,
        }
    }
}

/// Draws each tab with the shared panel context
pub struct MeshTabViewer<'a> {
    pub ctx: PanelContext<'a>,
}

impl TabViewer for MeshTabViewer<'_> {
    type Tab = PanelType;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        tab.panel().title().into()
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        tab.panel().ui(ui, &self.ctx);
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false
    }
}

/// Viewport in the centre, scene information left, settings right
pub fn create_dock_layout() -> DockState<PanelType> {
    let mut dock_state = DockState::new(vec![PanelType::Viewport(ViewportPanel::new())]);
    let surface = dock_state.main_surface_mut();

    let [center, _settings] = surface.split_right(
        NodeIndex::root(),
        0.75,
        vec![PanelType::Settings(SettingsPanel::new())],
    );
    let [_scene, _viewport] =
        surface.split_left(center, 0.25, vec![PanelType::Scene(SceneInfoPanel::new())]);

    dock_state
}
