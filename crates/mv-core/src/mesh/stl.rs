//! STL file loading (ASCII and binary)

use std::io::Cursor;

use super::{MeshError, TriMesh};

/// Load an STL from bytes.
///
/// stl_io merges identical corners, so adjacent facets share vertices.
pub fn load_stl_from_bytes(data: &[u8]) -> Result<TriMesh, MeshError> {
    let mut cursor = Cursor::new(data);
    let mesh = stl_io::read_stl(&mut cursor).map_err(|e| MeshError::Parse(e.to_string()))?;

    if mesh.faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let positions = mesh
        .vertices
        .iter()
        .map(|v| [v[0], v[1], v[2]])
        .collect::<Vec<_>>();
    let indices = mesh
        .faces
        .iter()
        .flat_map(|face| face.vertices.iter().map(|&idx| idx as u32))
        .collect::<Vec<_>>();

    TriMesh::new(positions, indices)
}
