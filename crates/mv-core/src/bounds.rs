//! Axis-aligned bounds of a point cloud, used to frame meshes.

use glam::Vec3;

/// Axis-aligned box. `min > max` on any axis means no point was added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Inverted box that any point expands.
    pub fn empty() -> Self {
        Self::new(Vec3::INFINITY, Vec3::NEG_INFINITY)
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), BoundingBox::expand_to_include)
    }

    pub fn expand_to_include(self, point: Vec3) -> Self {
        Self::new(self.min.min(point), self.max.max(point))
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Distance from the center to any corner.
    pub fn radius(&self) -> f32 {
        self.half_extents().length()
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_box() {
        let bbox = BoundingBox::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.center(), Vec3::ZERO);
        assert_eq!(bbox.half_extents(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.size(), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points([
            Vec3::new(1.0, 5.0, -2.0),
            Vec3::new(-3.0, 0.0, 4.0),
            Vec3::new(0.0, 2.0, 0.0),
        ]);
        assert_eq!(bbox.min, Vec3::new(-3.0, 0.0, -2.0));
        assert_eq!(bbox.max, Vec3::new(1.0, 5.0, 4.0));
        assert!(!bbox.is_empty());
    }

    #[test]
    fn test_single_point_is_not_empty() {
        let bbox = BoundingBox::from_points([Vec3::ONE]);
        assert!(!bbox.is_empty());
        assert_eq!(bbox.radius(), 0.0);
    }

    #[test]
    fn test_empty_box() {
        assert!(BoundingBox::empty().is_empty());
        assert!(BoundingBox::default().is_empty());
        assert!(BoundingBox::from_points(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_radius_is_half_diagonal() {
        let bbox = BoundingBox::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 1.0));
        assert_eq!(bbox.radius(), 1.5);
    }
}
