//! Application state module

mod viewport;

pub use viewport::{SharedViewportState, ViewportGesture, ViewportState};

use std::path::PathBuf;
use std::sync::Arc;

use mv_core::{MeshDocument, MeshStats, ObjInfo};
use parking_lot::Mutex;

/// Actions that can be performed on the app state
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Open a mesh file
    OpenMesh(PathBuf),
    /// Close the current mesh
    CloseMesh,
    /// Undo all arcball rotation
    ResetRotation,
    /// Re-frame the current mesh
    FitView,
}

/// Details of the open file shown in the scene panel
#[derive(Debug, Clone, PartialEq)]
pub struct SceneInfo {
    pub path: PathBuf,
    pub name: String,
    pub format: &'static str,
    pub stats: MeshStats,
    pub obj_info: Option<ObjInfo>,
}

impl SceneInfo {
    pub fn from_document(document: &MeshDocument) -> Self {
        Self {
            path: document.path.clone(),
            name: document.name.clone(),
            format: document.format.name(),
            stats: document.stats,
            obj_info: document.obj_info.clone(),
        }
    }
}

/// Application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Currently open file
    pub scene: Option<SceneInfo>,
    /// Error waiting to be shown in a message box
    pub error_message: Option<String>,
    pending_actions: Vec<AppAction>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action
    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    /// Take pending actions
    pub fn take_pending_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }

    /// Whether a mesh is open
    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    /// Report an error to the user
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }
}

pub type SharedAppState = Arc<Mutex<AppState>>;

/// Create a new shared app state
pub fn create_shared_state() -> SharedAppState {
    Arc::new(Mutex::new(AppState::new()))
}
