//! Mesh Viewer Renderer
//!
//! WGPU-based 3D rendering for the mesh viewer.
//!
//! # Module Structure
//!
//! ```text
//! mv-renderer/
//! ├── sub_renderers/   # Grid and mesh renderers
//! ├── shaders/         # WGSL sources
//! ├── config.rs        # Serialisable renderer settings
//! ├── constants.rs     # Default values
//! ├── pipeline.rs      # Pipeline builder
//! ├── uniforms.rs      # GPU uniform layouts
//! ├── vertex.rs        # Vertex layouts
//! └── renderer.rs      # Main Renderer
//! ```

pub mod config;
pub mod constants;
pub mod pipeline;
pub mod renderer;
pub mod sub_renderers;
pub mod uniforms;
pub mod vertex;

pub use config::{CameraConfig, GridConfig, RendererConfig, ShadingConfig, ViewportConfig};
pub use renderer::Renderer;
pub use sub_renderers::{GridRenderer, MeshData, MeshRenderer};
pub use uniforms::{CameraUniform, MaterialUniform};
pub use vertex::{MeshVertex, PositionVertex};
