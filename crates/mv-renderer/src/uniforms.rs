//! GPU uniform layouts

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Camera uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    /// Combined model-view-projection matrix.
    pub mvp: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Wrap a model-view-projection matrix.
    pub fn new(mvp: Mat4) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

/// Surface color and light for one draw
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    /// RGBA color. Alpha is the opacity.
    pub color: [f32; 4],
    /// Light vector in xyz, w unused.
    pub light: [f32; 4],
}

impl MaterialUniform {
    /// Build from an RGB color, an opacity and a light vector.
    pub fn new(color: [f32; 3], alpha: f32, light: [f32; 3]) -> Self {
        Self {
            color: [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)],
            light: [light[0], light[1], light[2], 0.0],
        }
    }
}
