//! Arcball rotation controller
//!
//! Maps 2D cursor positions onto a virtual unit sphere centred in the
//! viewport and turns the arc between two sphere points into a rotation.

use glam::{Quat, Vec2, Vec3};

/// Threshold below which a rotation is treated as degenerate.
pub const ARCBALL_EPSILON: f32 = 1.0e-5;

/// Factor applied to the x component of each drag rotation.
///
/// Vertical mouse motion rotates around the screen x axis; it is damped so
/// that tilting the model feels slower than spinning it.
pub const PITCH_DAMPING: f32 = 0.5;

/// Smallest viewport extent the arcball accepts.
const MIN_BOUND: f32 = 2.0;

/// Projects cursor positions onto a unit sphere.
#[derive(Debug, Clone)]
pub struct ArcBall {
    start: Vec3,
    end: Vec3,
    adjust_width: f32,
    adjust_height: f32,
}

impl ArcBall {
    /// Create an arcball for a viewport of the given size in pixels.
    pub fn new(width: f32, height: f32) -> Self {
        let mut arcball = Self {
            start: Vec3::ZERO,
            end: Vec3::ZERO,
            adjust_width: 0.0,
            adjust_height: 0.0,
        };
        arcball.set_bounds(width, height);
        arcball
    }

    /// Update the viewport size.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        let width = width.max(MIN_BOUND);
        let height = height.max(MIN_BOUND);
        self.adjust_width = 1.0 / ((width - 1.0) * 0.5);
        self.adjust_height = 1.0 / ((height - 1.0) * 0.5);
    }

    /// Map a cursor position (pixels, y down) onto the unit sphere.
    ///
    /// Points outside the sphere's silhouette are pulled onto its rim.
    pub fn map_to_sphere(&self, point: Vec2) -> Vec3 {
        let x = point.x * self.adjust_width - 1.0;
        let y = 1.0 - point.y * self.adjust_height;

        let length2 = x * x + y * y;
        if length2 > 1.0 {
            let norm = 1.0 / length2.sqrt();
            Vec3::new(x * norm, y * norm, 0.0)
        } else {
            Vec3::new(x, y, (1.0 - length2).sqrt())
        }
    }

    /// Record the start of a drag.
    pub fn click(&mut self, point: Vec2) {
        self.start = self.map_to_sphere(point);
    }

    /// Rotation from the click point to `point`.
    ///
    /// The returned quaternion is not normalised: its vector part is
    /// `start × end` and its scalar part is `start · end`. Returns `None`
    /// when the two sphere points are (nearly) parallel.
    pub fn drag(&mut self, point: Vec2) -> Option<Quat> {
        self.end = self.map_to_sphere(point);
        let perp = self.start.cross(self.end);

        if perp.length() > ARCBALL_EPSILON {
            Some(Quat::from_xyzw(
                perp.x,
                perp.y,
                perp.z,
                self.start.dot(self.end),
            ))
        } else {
            None
        }
    }
}

/// Arcball with committed orientation and drag state.
#[derive(Debug, Clone)]
pub struct ArcBallController {
    arcball: ArcBall,
    last_rotation: Quat,
    this_rotation: Quat,
    dragging: bool,
}

impl ArcBallController {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            arcball: ArcBall::new(width, height),
            last_rotation: Quat::IDENTITY,
            this_rotation: Quat::IDENTITY,
            dragging: false,
        }
    }

    /// Update the viewport size.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.arcball.set_bounds(width, height);
    }

    /// Left button pressed at `point`.
    pub fn on_press(&mut self, point: Vec2) {
        self.last_rotation = self.this_rotation;
        self.dragging = true;
        self.arcball.click(point);
    }

    /// Cursor moved to `point` while the button is held.
    pub fn on_drag(&mut self, point: Vec2) {
        if !self.dragging {
            return;
        }

        let delta = self
            .arcball
            .drag(point)
            .map(|q| Quat::from_xyzw(q.x * PITCH_DAMPING, q.y, q.z, q.w))
            .filter(|q| q.length_squared() >= ARCBALL_EPSILON)
            .map(Quat::normalize)
            .unwrap_or(Quat::IDENTITY);

        self.this_rotation = (delta * self.last_rotation).normalize();
    }

    /// Left button released.
    pub fn on_release(&mut self) {
        self.dragging = false;
        self.last_rotation = self.this_rotation;
    }

    /// Drop any accumulated rotation.
    pub fn reset(&mut self) {
        self.dragging = false;
        self.last_rotation = Quat::IDENTITY;
        self.this_rotation = Quat::IDENTITY;
    }

    /// Current orientation.
    pub fn rotation(&self) -> Quat {
        self.this_rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-4);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-4);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-4);
    }

    #[test]
    fn test_map_to_sphere_center_is_pole() {
        let arcball = ArcBall::new(101.0, 101.0);
        assert_vec3_eq(arcball.map_to_sphere(Vec2::new(50.0, 50.0)), Vec3::Z);
    }

    #[test]
    fn test_map_to_sphere_corner_lands_on_rim() {
        let arcball = ArcBall::new(101.0, 101.0);
        let v = arcball.map_to_sphere(Vec2::new(0.0, 0.0));
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert_vec3_eq(v, Vec3::new(-h, h, 0.0));
        assert_relative_eq!(v.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_map_to_sphere_flips_screen_y() {
        let arcball = ArcBall::new(101.0, 101.0);
        let above = arcball.map_to_sphere(Vec2::new(50.0, 25.0));
        assert!(above.y > 0.0);
    }

    #[test]
    fn test_tiny_bounds_are_clamped() {
        let arcball = ArcBall::new(0.0, 0.0);
        let v = arcball.map_to_sphere(Vec2::new(1.0, 1.0));
        assert!(v.is_finite());
    }

    #[test]
    fn test_drag_without_motion_is_degenerate() {
        let mut arcball = ArcBall::new(101.0, 101.0);
        arcball.click(Vec2::new(30.0, 40.0));
        assert!(arcball.drag(Vec2::new(30.0, 40.0)).is_none());
    }

    #[test]
    fn test_horizontal_drag_rotates_about_y() {
        let mut controller = ArcBallController::new(101.0, 101.0);
        controller.on_press(Vec2::new(50.0, 50.0));
        controller.on_drag(Vec2::new(75.0, 50.0));

        let rotated = controller.rotation() * Vec3::Z;
        assert_vec3_eq(rotated, Vec3::new(0.75_f32.sqrt(), 0.0, 0.5));
    }

    #[test]
    fn test_drags_compose_across_releases() {
        let mut controller = ArcBallController::new(101.0, 101.0);
        for _ in 0..2 {
            controller.on_press(Vec2::new(50.0, 50.0));
            controller.on_drag(Vec2::new(75.0, 50.0));
            controller.on_release();
        }

        let rotated = controller.rotation() * Vec3::Z;
        assert_vec3_eq(rotated, Vec3::new(0.75_f32.sqrt(), 0.0, -0.5));
    }

    #[test]
    fn test_drag_replaces_previous_delta_within_one_press() {
        let mut controller = ArcBallController::new(101.0, 101.0);
        controller.on_press(Vec2::new(50.0, 50.0));
        controller.on_drag(Vec2::new(90.0, 50.0));
        controller.on_drag(Vec2::new(75.0, 50.0));

        let rotated = controller.rotation() * Vec3::Z;
        assert_vec3_eq(rotated, Vec3::new(0.75_f32.sqrt(), 0.0, 0.5));
    }

    #[test]
    fn test_vertical_drag_is_damped() {
        let mut controller = ArcBallController::new(101.0, 101.0);
        controller.on_press(Vec2::new(50.0, 50.0));
        controller.on_drag(Vec2::new(50.0, 25.0));

        let (axis, angle) = controller.rotation().to_axis_angle();
        assert!(axis.x < 0.0);
        // Undamped this drag would rotate by 60 degrees.
        assert!(angle > 30.0_f32.to_radians());
        assert!(angle < 35.0_f32.to_radians());
    }

    #[test]
    fn test_drag_ignored_when_not_pressed() {
        let mut controller = ArcBallController::new(101.0, 101.0);
        controller.on_drag(Vec2::new(75.0, 50.0));
        assert_eq!(controller.rotation(), Quat::IDENTITY);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_rotation_stays_unit() {
        let mut controller = ArcBallController::new(640.0, 480.0);
        controller.on_press(Vec2::new(10.0, 400.0));
        for i in 0..50 {
            controller.on_drag(Vec2::new(10.0 + i as f32 * 12.0, 400.0 - i as f32 * 7.0));
        }
        controller.on_release();
        assert_relative_eq!(controller.rotation().length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_reset_clears_rotation() {
        let mut controller = ArcBallController::new(101.0, 101.0);
        controller.on_press(Vec2::new(50.0, 50.0));
        controller.on_drag(Vec2::new(75.0, 50.0));
        controller.reset();

        assert!(!controller.is_dragging());
        assert_eq!(controller.rotation(), Quat::IDENTITY);

        // A new drag starts from identity, not from the dropped rotation.
        controller.on_press(Vec2::new(50.0, 50.0));
        controller.on_drag(Vec2::new(50.0, 50.0));
        assert_eq!(controller.rotation(), Quat::IDENTITY);
    }
}
