//! Camera action handlers

use crate::state::AppAction;

use super::ActionContext;

/// Handle view-related actions
pub fn handle_view_action(action: AppAction, ctx: &ActionContext) {
    let Some(viewport_state) = ctx.viewport_state else {
        return;
    };
    let mut vp = viewport_state.lock();
    match action {
        AppAction::ResetRotation => vp.reset_rotation(),
        AppAction::FitView => vp.fit_view(),
        _ => {}
    }
}
