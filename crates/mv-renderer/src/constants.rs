//! Rendering constants
//!
//! Default values shared by the renderer configuration and the
//! sub-renderers.

/// Grid rendering constants
pub mod grid {
    /// Default grid extent (half-size in each direction)
    pub const DEFAULT_SIZE: f32 = mv_core::DEFAULT_GRID_SIZE;
    /// Default number of lines in each direction
    pub const DEFAULT_CELLS: u32 = mv_core::DEFAULT_GRID_CELLS;
    /// Grid line color (white)
    pub const LINE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
    /// Grid opacity
    pub const DEFAULT_ALPHA: f32 = 1.0;
    /// Largest accepted line count
    pub const MAX_CELLS: u32 = 1000;
}

/// Mesh shading constants
pub mod shading {
    /// Base mesh color (white)
    pub const MESH_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
    /// Mesh opacity
    pub const DEFAULT_ALPHA: f32 = 1.0;
    /// Light vector added to the surface position
    pub const LIGHT: [f32; 3] = [1.0, 1.0, 1.0];
}

/// Camera input constants
pub mod camera {
    /// Distance per scroll point
    pub const ZOOM_SENSITIVITY: f32 = 0.002;
    /// Pan units per pixel
    pub const PAN_SENSITIVITY: f32 = 0.003;
}

/// Viewport rendering constants
pub mod viewport {
    /// Background clear color
    pub const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
    /// MSAA sample count
    pub const SAMPLE_COUNT: u32 = 4;
    /// Depth buffer format
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
}
