//! Mesh Viewer Frontend
//!
//! egui-based application for viewing triangle meshes.

pub mod actions;
pub mod app;
pub mod config;
pub mod panels;
pub mod state;

// Re-exports for convenience
pub use app::MeshViewerApp;
pub use config::{AppConfig, ConfigError, ConfigManager, SharedConfig};
pub use state::{AppAction, AppState, SceneInfo, SharedAppState};
