//! Action handling
//!
//! UI code queues [`AppAction`]s in the app state; the app drains the queue
//! once per frame and routes each action to its handler here.

mod file;
mod view;

use crate::state::{AppAction, SharedAppState, SharedViewportState};

pub use file::handle_file_action;
pub use view::handle_view_action;

/// State an action handler may change
pub struct ActionContext<'a> {
    pub app_state: &'a SharedAppState,
    /// Absent when wgpu is unavailable
    pub viewport_state: Option<&'a SharedViewportState>,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        app_state: &'a SharedAppState,
        viewport_state: Option<&'a SharedViewportState>,
    ) -> Self {
        Self {
            app_state,
            viewport_state,
        }
    }
}

/// Route an action to its handler
pub fn dispatch_action(action: AppAction, ctx: &ActionContext) {
    tracing::debug!("Dispatching {:?}", action);
    match action {
        AppAction::OpenMesh(_) | AppAction::CloseMesh => handle_file_action(action, ctx),
        AppAction::ResetRotation | AppAction::FitView => handle_view_action(action, ctx),
    }
}
