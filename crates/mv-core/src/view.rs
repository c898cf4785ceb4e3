//! Camera and model transform for the viewport
//!
//! The camera sits on the +Z axis looking at the origin. The mesh is
//! normalised into a unit sphere around the origin, rotated by the arcball
//! and then shifted by the screen-space pan offset.

use glam::{Mat4, Vec2, Vec3};

use crate::arcball::ArcBallController;
use crate::bounds::BoundingBox;

/// Default field of view in degrees
pub const DEFAULT_FOV_DEGREES: f32 = 60.0;
/// Minimum field of view in degrees
pub const MIN_FOV_DEGREES: f32 = 10.0;
/// Maximum field of view in degrees
pub const MAX_FOV_DEGREES: f32 = 120.0;
/// Camera distance before the first FOV change
pub const DEFAULT_DISTANCE: f32 = 2.0;
/// Closest the camera may get to the origin
pub const MIN_DISTANCE: f32 = 0.1;
/// Near clipping plane
pub const NEAR_PLANE: f32 = 0.1;
/// Far clipping plane
pub const FAR_PLANE: f32 = 1000.0;

/// Viewport camera, arcball and mesh framing.
#[derive(Debug, Clone)]
pub struct ViewState {
    fov_degrees: f32,
    distance: f32,
    pan: Vec2,
    center: Vec3,
    scale: f32,
    arcball: ArcBallController,
}

impl ViewState {
    /// Create a view for a viewport of the given size in pixels.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            distance: DEFAULT_DISTANCE,
            pan: Vec2::ZERO,
            center: Vec3::ZERO,
            scale: 1.0,
            arcball: ArcBallController::new(width, height),
        }
    }

    /// Distance at which a unit sphere fills the given field of view.
    pub fn camera_distance(fov_degrees: f32) -> f32 {
        1.0 / (fov_degrees.to_radians() / 2.0).tan()
    }

    /// Field of view in degrees.
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Set the field of view and move the camera to match it.
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov_degrees = fov_degrees.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);
        self.distance = Self::camera_distance(self.fov_degrees);
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Move the camera along its axis. Positive moves away from the model.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).max(MIN_DISTANCE);
    }

    /// Shift the model by a cursor movement in pixels.
    pub fn pan(&mut self, delta: Vec2, sensitivity: f32) {
        self.pan.x += delta.x * sensitivity;
        self.pan.y -= delta.y * sensitivity;
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan
    }

    /// Viewport resized.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.arcball.set_bounds(width, height);
    }

    pub fn arcball(&self) -> &ArcBallController {
        &self.arcball
    }

    pub fn arcball_mut(&mut self) -> &mut ArcBallController {
        &mut self.arcball
    }

    /// Frame a mesh with the given bounds.
    pub fn fit(&mut self, bbox: &BoundingBox) {
        if bbox.is_empty() {
            self.clear();
            return;
        }
        self.center = bbox.center();
        let scale = bbox.radius();
        self.scale = if scale.is_finite() && scale > f32::EPSILON {
            scale
        } else {
            1.0
        };
        self.pan = Vec2::ZERO;
        self.arcball.reset();
    }

    /// Back to the identity framing.
    pub fn clear(&mut self) {
        self.center = Vec3::ZERO;
        self.scale = 1.0;
        self.pan = Vec2::ZERO;
        self.arcball.reset();
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Model matrix: normalise, rotate about the mesh center, then pan.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.pan.extend(0.0))
            * Mat4::from_quat(self.arcball.rotation())
            * Mat4::from_scale(Vec3::splat(1.0 / self.scale))
            * Mat4::from_translation(-self.center)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, self.distance), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self, width: f32, height: f32) -> Mat4 {
        let aspect = width / height.max(1.0);
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Combined model-view-projection matrix.
    pub fn mvp(&self, width: f32, height: f32) -> Mat4 {
        self.projection_matrix(width, height) * self.view_matrix() * self.model_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_distance_matches_fov() {
        assert_relative_eq!(ViewState::camera_distance(90.0), 1.0, epsilon = 1e-5);
        assert_relative_eq!(
            ViewState::camera_distance(60.0),
            3.0_f32.sqrt(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_set_fov_moves_camera_and_clamps() {
        let mut view = ViewState::new(800.0, 600.0);
        assert_eq!(view.distance(), DEFAULT_DISTANCE);

        view.set_fov_degrees(90.0);
        assert_relative_eq!(view.distance(), 1.0, epsilon = 1e-5);

        view.set_fov_degrees(500.0);
        assert_eq!(view.fov_degrees(), MAX_FOV_DEGREES);
    }

    #[test]
    fn test_zoom_has_lower_limit() {
        let mut view = ViewState::new(800.0, 600.0);
        view.zoom(0.5);
        assert_relative_eq!(view.distance(), 2.5);
        view.zoom(-100.0);
        assert_eq!(view.distance(), MIN_DISTANCE);
    }

    #[test]
    fn test_fit_normalises_mesh_into_unit_sphere() {
        let mut view = ViewState::new(800.0, 600.0);
        let bbox = BoundingBox::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(14.0, 4.0, 2.0));
        view.fit(&bbox);

        let model = view.model_matrix();
        let center = model.transform_point3(bbox.center());
        let corner = model.transform_point3(bbox.max);
        assert_relative_eq!(center.length(), 0.0, epsilon = 1e-5);
        assert_relative_eq!(corner.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_fit_single_point_falls_back_to_unit_scale() {
        let mut view = ViewState::new(800.0, 600.0);
        view.fit(&BoundingBox::from_points([Vec3::new(1.0, 2.0, 3.0)]));
        assert_eq!(view.scale(), 1.0);
        assert_eq!(view.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_fit_resets_rotation_and_pan() {
        let mut view = ViewState::new(101.0, 101.0);
        view.pan(Vec2::new(10.0, 10.0), 0.01);
        view.arcball_mut().on_press(Vec2::new(50.0, 50.0));
        view.arcball_mut().on_drag(Vec2::new(80.0, 50.0));
        view.arcball_mut().on_release();

        view.fit(&BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0)));
        assert_eq!(view.pan_offset(), Vec2::ZERO);
        assert_eq!(view.arcball().rotation(), glam::Quat::IDENTITY);
    }

    #[test]
    fn test_pan_follows_cursor_in_screen_space() {
        let mut view = ViewState::new(800.0, 600.0);
        view.pan(Vec2::new(10.0, 20.0), 0.01);
        assert_relative_eq!(view.pan_offset().x, 0.1, epsilon = 1e-6);
        assert_relative_eq!(view.pan_offset().y, -0.2, epsilon = 1e-6);

        // Panning is applied after rotation, so it stays screen aligned.
        let p = view.model_matrix().transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, 0.1, epsilon = 1e-6);
        assert_relative_eq!(p.y, -0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_mvp_puts_origin_at_screen_center() {
        let view = ViewState::new(800.0, 600.0);
        let clip = view.mvp(800.0, 600.0) * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
        assert!(clip.z / clip.w > 0.0 && clip.z / clip.w < 1.0);
    }

    #[test]
    fn test_projection_tolerates_zero_height() {
        let view = ViewState::new(800.0, 0.0);
        assert!(view.projection_matrix(800.0, 0.0).is_finite());
    }
}
