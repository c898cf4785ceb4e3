//! Renderer configuration structures
//!
//! This module provides configurable settings for the renderer that can be
//! serialized and loaded from configuration files.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Grid rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Whether the grid is drawn
    pub enabled: bool,
    /// Grid extent (half-size in each direction)
    pub size: f32,
    /// Number of lines in each direction
    pub cells: u32,
    /// Grid opacity (0.0 - 1.0)
    pub alpha: f32,
    /// Grid line color (RGB)
    pub color: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: constants::grid::DEFAULT_SIZE,
            cells: constants::grid::DEFAULT_CELLS,
            alpha: constants::grid::DEFAULT_ALPHA,
            color: constants::grid::LINE_COLOR,
        }
    }
}

/// Viewport rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Background clear color (RGBA)
    pub background_color: [f32; 4],
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            background_color: constants::viewport::CLEAR_COLOR,
        }
    }
}

/// Mesh shading configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShadingConfig {
    /// Mesh base color (RGB)
    pub mesh_color: [f32; 3],
    /// Mesh opacity (0.0 - 1.0)
    pub alpha: f32,
    /// Light vector
    pub light: [f32; 3],
    /// Draw edges instead of filled triangles
    pub wireframe: bool,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            mesh_color: constants::shading::MESH_COLOR,
            alpha: constants::shading::DEFAULT_ALPHA,
            light: constants::shading::LIGHT,
            wireframe: false,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Camera distance per scroll point
    pub zoom_sensitivity: f32,
    /// Pan units per dragged pixel
    pub pan_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: mv_core::DEFAULT_FOV_DEGREES,
            zoom_sensitivity: constants::camera::ZOOM_SENSITIVITY,
            pan_sensitivity: constants::camera::PAN_SENSITIVITY,
        }
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RendererConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridConfig,
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Shading settings
    #[serde(default)]
    pub shading: ShadingConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
}

impl RendererConfig {
    /// Create a new renderer configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp values edited by hand into their usable ranges.
    pub fn sanitized(mut self) -> Self {
        self.grid.alpha = self.grid.alpha.clamp(0.0, 1.0);
        self.grid.size = self.grid.size.max(0.0);
        self.grid.cells = self.grid.cells.min(constants::grid::MAX_CELLS);
        self.shading.alpha = self.shading.alpha.clamp(0.0, 1.0);
        self.camera.fov_degrees = self
            .camera
            .fov_degrees
            .clamp(mv_core::MIN_FOV_DEGREES, mv_core::MAX_FOV_DEGREES);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RendererConfig::default();
        assert!(config.grid.enabled);
        assert_eq!(config.grid.cells, 50);
        assert_eq!(config.grid.size, 20.0);
        assert_eq!(config.grid.alpha, 1.0);
        assert_eq!(config.shading.mesh_color, [1.0, 1.0, 1.0]);
        assert!(!config.shading.wireframe);
        assert_eq!(config.camera.fov_degrees, 60.0);
    }

    #[test]
    fn test_ron_roundtrip() {
        let mut config = RendererConfig::default();
        config.shading.wireframe = true;
        config.grid.cells = 12;

        let text = ron::to_string(&config).unwrap();
        let parsed: RendererConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let parsed: RendererConfig = ron::from_str("(grid: (cells: 8))").unwrap();
        assert_eq!(parsed.grid.cells, 8);
        assert_eq!(parsed.grid.size, 20.0);
        assert_eq!(parsed.shading, ShadingConfig::default());
    }

    #[test]
    fn test_sanitized_clamps() {
        let mut config = RendererConfig::default();
        config.shading.alpha = 3.0;
        config.grid.alpha = -1.0;
        config.camera.fov_degrees = 500.0;
        config.grid.cells = 1_000_000;

        let config = config.sanitized();
        assert_eq!(config.shading.alpha, 1.0);
        assert_eq!(config.grid.alpha, 0.0);
        assert_eq!(config.camera.fov_degrees, 120.0);
        assert_eq!(config.grid.cells, constants::grid::MAX_CELLS);
    }
}
