//! Built-in sub-renderers.
//!
//! - [`GridRenderer`]: reference grid on the ground plane
//! - [`MeshRenderer`]: shaded or wireframe mesh

pub mod grid;
pub mod mesh;

pub use grid::GridRenderer;
pub use mesh::{MeshData, MeshRenderer};
