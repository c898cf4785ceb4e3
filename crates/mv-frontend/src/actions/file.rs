//! File action handlers

use std::path::PathBuf;

use mv_core::MeshDocument;

use crate::state::{AppAction, SceneInfo};

use super::ActionContext;

/// Handle file-related actions
pub fn handle_file_action(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::OpenMesh(path) => handle_open_mesh(path, ctx),
        AppAction::CloseMesh => handle_close_mesh(ctx),
        _ => {}
    }
}

fn handle_open_mesh(path: PathBuf, ctx: &ActionContext) {
    let document = match MeshDocument::open(&path) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!("Failed to open {}: {}", path.display(), e);
            ctx.app_state
                .lock()
                .show_error(format!("Could not open {}:\n{}", path.display(), e));
            return;
        }
    };

    if let Some(viewport_state) = ctx.viewport_state {
        viewport_state.lock().set_mesh(&document.mesh);
    } else {
        tracing::warn!("viewport_state is None - mesh is not rendered");
    }

    ctx.app_state.lock().scene = Some(SceneInfo::from_document(&document));
}

fn handle_close_mesh(ctx: &ActionContext) {
    if let Some(viewport_state) = ctx.viewport_state {
        viewport_state.lock().clear_mesh();
    }
    if let Some(scene) = ctx.app_state.lock().scene.take() {
        tracing::info!("Closed {}", scene.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::dispatch_action;
    use crate::state::create_shared_state;

    #[test]
    fn test_open_publishes_scene_info() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.off");
        std::fs::write(&path, "OFF\n4 1 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n").unwrap();

        let app_state = create_shared_state();
        let ctx = ActionContext::new(&app_state, None);
        dispatch_action(AppAction::OpenMesh(path), &ctx);

        let state = app_state.lock();
        let scene = state.scene.as_ref().unwrap();
        assert_eq!(scene.name, "quad.off");
        assert_eq!(scene.stats.triangles, 2);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_open_failure_shows_error() {
        let app_state = create_shared_state();
        let ctx = ActionContext::new(&app_state, None);
        dispatch_action(AppAction::OpenMesh(PathBuf::from("/nonexistent/a.stl")), &ctx);

        let state = app_state.lock();
        assert!(state.scene.is_none());
        assert!(state.error_message.is_some());
    }

    #[test]
    fn test_unsupported_format_shows_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let app_state = create_shared_state();
        let ctx = ActionContext::new(&app_state, None);
        dispatch_action(AppAction::OpenMesh(path), &ctx);

        let message = app_state.lock().error_message.clone().unwrap();
        assert!(message.contains("txt"));
    }

    #[test]
    fn test_close_clears_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.obj");
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let app_state = create_shared_state();
        let ctx = ActionContext::new(&app_state, None);
        dispatch_action(AppAction::OpenMesh(path), &ctx);
        assert!(app_state.lock().has_scene());

        dispatch_action(AppAction::CloseMesh, &ctx);
        assert!(!app_state.lock().has_scene());
    }
}
