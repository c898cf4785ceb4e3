//! OBJ mesh file loading

use std::collections::HashMap;
use std::io::{BufRead, Cursor};

use super::{MeshError, TriMesh};

/// Load an OBJ from bytes. Material libraries are not resolved.
pub fn load_obj_from_bytes(data: &[u8]) -> Result<TriMesh, MeshError> {
    let mut cursor = Cursor::new(data);
    load_obj_from_reader(&mut cursor)
}

fn load_obj_from_reader(reader: &mut impl BufRead) -> Result<TriMesh, MeshError> {
    let (models, _materials) = tobj::load_obj_buf(
        reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: false,
            ..Default::default()
        },
        |_| Ok(Default::default()),
    )
    .map_err(|e| MeshError::Parse(e.to_string()))?;

    if models.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    // Combine all objects and groups into one mesh
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        let vertex_offset = positions.len() as u32;

        positions.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|chunk| [chunk[0], chunk[1], chunk[2]]),
        );
        indices.extend(mesh.indices.iter().map(|&idx| vertex_offset + idx));
    }

    // tobj re-indexes every object and group on its own
    let (positions, indices) = weld(&positions, &indices)?;
    TriMesh::new(positions, indices)
}

/// Merge bit-identical positions and remap the faces onto them.
fn weld(
    positions: &[[f32; 3]],
    indices: &[u32],
) -> Result<(Vec<[f32; 3]>, Vec<u32>), MeshError> {
    let mut lookup: HashMap<[u32; 3], u32> = HashMap::with_capacity(positions.len());
    let mut welded = Vec::with_capacity(positions.len());
    let remap: Vec<u32> = positions
        .iter()
        .map(|p| {
            *lookup.entry(p.map(f32::to_bits)).or_insert_with(|| {
                welded.push(*p);
                (welded.len() - 1) as u32
            })
        })
        .collect();

    let indices = indices
        .iter()
        .map(|&idx| {
            remap
                .get(idx as usize)
                .copied()
                .ok_or_else(|| MeshError::Parse(format!("vertex index {} out of range", idx)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((welded, indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_triangle() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = load_obj_from_bytes(obj).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.normals()[0], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_quad_is_triangulated() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = load_obj_from_bytes(obj).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_missing_material_library_is_ignored() {
        let obj = b"mtllib nowhere.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl red\nf 1 2 3\n";
        let mesh = load_obj_from_bytes(obj).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_texture_and_normal_indices_keep_positions_shared() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\nvn 0 0 1\n\
f 1/1/1 2/2/1 3/3/1\nf 1/1/1 3/3/1 4/4/1\n";
        let mesh = load_obj_from_bytes(obj).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.stats().edges, 5);
    }

    #[test]
    fn test_groups_share_seam_vertices() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\ng a\nf 1 2 3\ng b\nf 1 3 4\n";
        let mesh = load_obj_from_bytes(obj).unwrap();
        assert_eq!(
            mesh.stats(),
            crate::mesh::MeshStats {
                vertices: 4,
                triangles: 2,
                edges: 5,
            }
        );
        assert_eq!(mesh.normals()[0], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_objects_keep_distinct_positions() {
        let obj = b"o first\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
o second\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n";
        let mesh = load_obj_from_bytes(obj).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_input_is_empty_mesh() {
        let err = load_obj_from_bytes(b"# nothing here\n").unwrap_err();
        assert!(matches!(err, MeshError::EmptyMesh));
    }
}
