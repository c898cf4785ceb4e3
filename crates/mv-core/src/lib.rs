//! Mesh Viewer Core
//!
//! GPU-free building blocks of the mesh viewer:
//! - Mesh loading (OBJ, STL, PLY, OFF, OM) and normal computation
//! - Mesh statistics and OBJ metadata
//! - Arcball rotation controller
//! - View (camera and model transform) maths
//! - Reference grid geometry

pub mod arcball;
pub mod bounds;
pub mod document;
pub mod grid;
pub mod mesh;
pub mod obj_info;
pub mod view;

pub use arcball::*;
pub use bounds::*;
pub use document::*;
pub use grid::*;
pub use mesh::*;
pub use obj_info::*;
pub use view::*;
