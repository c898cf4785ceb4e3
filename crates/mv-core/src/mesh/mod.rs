//! Mesh file loading (OBJ, STL, PLY, OFF, OM formats)

mod normals;
mod obj;
mod off;
mod om;
mod ply;
mod stl;

use std::collections::HashSet;
use std::path::Path;

use glam::Vec3;

use crate::bounds::BoundingBox;

pub use normals::{calculate_face_normals, calculate_triangle_normal, calculate_vertex_normals};
pub use obj::load_obj_from_bytes;
pub use off::load_off_from_bytes;
pub use om::load_om_from_bytes;
pub use ply::load_ply_from_bytes;
pub use stl::load_stl_from_bytes;

/// Indexed triangle mesh with per-vertex normals
#[derive(Debug, Clone, PartialEq)]
pub struct TriMesh {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl TriMesh {
    /// Build a mesh from positions and triangle indices.
    ///
    /// Indices are validated and vertex normals are computed from the faces.
    pub fn new(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if positions.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::Parse(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(MeshError::Parse(format!(
                "face references vertex {} but the mesh has {} vertices",
                bad,
                positions.len()
            )));
        }

        let normals = calculate_vertex_normals(&positions, &indices);
        Ok(Self {
            positions,
            normals,
            indices,
        })
    }

    /// Build a mesh from polygon faces, fan-triangulating each one.
    ///
    /// Faces with fewer than three vertices are dropped.
    pub(crate) fn from_polygons(
        positions: Vec<[f32; 3]>,
        faces: impl IntoIterator<Item = Vec<u32>>,
    ) -> Result<Self, MeshError> {
        let mut indices = Vec::new();
        for face in faces {
            if face.len() < 3 {
                continue;
            }
            for i in 1..face.len() - 1 {
                indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
            }
        }
        Self::new(positions, indices)
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unique undirected edges, lower index first.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let edge = if a < b { [a, b] } else { [b, a] };
                if seen.insert(edge) {
                    edges.push(edge);
                }
            }
        }
        edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.positions.iter().map(|p| Vec3::from(*p)))
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertices: self.vertex_count(),
            triangles: self.triangle_count(),
            edges: self.edge_count(),
        }
    }
}

/// Element counts shown in the scene panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
    pub edges: usize,
}

/// Detect mesh format from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Stl,
    Ply,
    Off,
    Om,
    Unknown,
}

impl MeshFormat {
    /// Extensions offered in the open dialog
    pub const EXTENSIONS: &'static [&'static str] = &["obj", "stl", "ply", "off", "om"];

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("obj") => MeshFormat::Obj,
            Some("stl") => MeshFormat::Stl,
            Some("ply") => MeshFormat::Ply,
            Some("off") => MeshFormat::Off,
            Some("om") => MeshFormat::Om,
            _ => MeshFormat::Unknown,
        }
    }

    /// Check if the format is supported
    pub fn is_supported(&self) -> bool {
        !matches!(self, MeshFormat::Unknown)
    }

    /// Get format name
    pub fn name(&self) -> &'static str {
        match self {
            MeshFormat::Obj => "OBJ",
            MeshFormat::Stl => "STL",
            MeshFormat::Ply => "PLY",
            MeshFormat::Off => "OFF",
            MeshFormat::Om => "OpenMesh",
            MeshFormat::Unknown => "Unknown",
        }
    }
}

/// Detect the format from the extension and read the whole file
pub(crate) fn read_mesh_file(path: &Path) -> Result<(MeshFormat, Vec<u8>), MeshError> {
    let format = MeshFormat::from_path(path);
    if !format.is_supported() {
        return Err(MeshError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        ));
    }

    let data = std::fs::read(path).map_err(|e| MeshError::Io(e.to_string()))?;
    Ok((format, data))
}

/// Load any supported mesh format
pub fn load_mesh(path: impl AsRef<Path>) -> Result<TriMesh, MeshError> {
    let path = path.as_ref();
    let (format, data) = read_mesh_file(path)?;
    let mesh = load_mesh_from_bytes(format, &data)?;

    tracing::debug!(
        "Loaded {} mesh {:?}: {} vertices, {} triangles",
        format.name(),
        path,
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Load a mesh of a known format from memory
pub fn load_mesh_from_bytes(format: MeshFormat, data: &[u8]) -> Result<TriMesh, MeshError> {
    match format {
        MeshFormat::Obj => load_obj_from_bytes(data),
        MeshFormat::Stl => load_stl_from_bytes(data),
        MeshFormat::Ply => load_ply_from_bytes(data),
        MeshFormat::Off => load_off_from_bytes(data),
        MeshFormat::Om => load_om_from_bytes(data),
        MeshFormat::Unknown => Err(MeshError::UnsupportedFormat("unknown".to_string())),
    }
}

/// Reservation for `count` records of at least `record_size` bytes each,
/// never more than `remaining` bytes could hold.
pub(crate) fn bounded_capacity(count: usize, remaining: usize, record_size: usize) -> usize {
    count.min(remaining / record_size.max(1))
}

/// Mesh loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty mesh: no geometry found")]
    EmptyMesh,
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
