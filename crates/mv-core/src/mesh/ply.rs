//! PLY file loading (ASCII and binary)

use std::io::Cursor;

use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use super::{MeshError, TriMesh};

/// Load a PLY from bytes. Polygon faces are fan-triangulated.
pub fn load_ply_from_bytes(data: &[u8]) -> Result<TriMesh, MeshError> {
    let mut reader = Cursor::new(data);
    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| MeshError::Parse(e.to_string()))?;

    let positions = match ply.payload.get("vertex") {
        Some(vertices) => vertices
            .iter()
            .map(|v| {
                Ok([
                    scalar_property(v, "x")?,
                    scalar_property(v, "y")?,
                    scalar_property(v, "z")?,
                ])
            })
            .collect::<Result<Vec<_>, MeshError>>()?,
        None => return Err(MeshError::EmptyMesh),
    };

    let faces = match ply.payload.get("face") {
        Some(faces) => faces
            .iter()
            .map(face_indices)
            .collect::<Result<Vec<_>, MeshError>>()?,
        None => Vec::new(),
    };

    TriMesh::from_polygons(positions, faces)
}

/// Read a scalar property as f32
fn scalar_property(element: &DefaultElement, name: &str) -> Result<f32, MeshError> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val),
        Some(Property::Double(val)) => Ok(*val as f32),
        Some(Property::Char(val)) => Ok(*val as f32),
        Some(Property::UChar(val)) => Ok(*val as f32),
        Some(Property::Short(val)) => Ok(*val as f32),
        Some(Property::UShort(val)) => Ok(*val as f32),
        Some(Property::Int(val)) => Ok(*val as f32),
        Some(Property::UInt(val)) => Ok(*val as f32),
        _ => Err(MeshError::Parse(format!(
            "vertex property '{}' not found or not a scalar",
            name
        ))),
    }
}

/// Read the index list of a face element
fn face_indices(element: &DefaultElement) -> Result<Vec<u32>, MeshError> {
    let list = element
        .get("vertex_indices")
        .or_else(|| element.get("vertex_index"));

    fn signed<T: Copy + TryInto<u32>>(values: &[T]) -> Result<Vec<u32>, MeshError> {
        values
            .iter()
            .map(|&v| {
                v.try_into()
                    .map_err(|_| MeshError::Parse("negative face index".to_string()))
            })
            .collect()
    }

    match list {
        Some(Property::ListInt(indices)) => signed(indices),
        Some(Property::ListShort(indices)) => signed(indices),
        Some(Property::ListChar(indices)) => signed(indices),
        Some(Property::ListUInt(indices)) => Ok(indices.clone()),
        Some(Property::ListUShort(indices)) => Ok(indices.iter().map(|&i| i as u32).collect()),
        Some(Property::ListUChar(indices)) => Ok(indices.iter().map(|&i| i as u32).collect()),
        _ => Err(MeshError::Parse("face indices not found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_ply_quad() {
        let data = b"ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
1 1 0
0 1 0
4 0 1 2 3
";
        let mesh = load_ply_from_bytes(data).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.positions()[2], [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_point_cloud_ply_has_no_faces() {
        let data = b"ply
format ascii 1.0
element vertex 2
property double x
property double y
property double z
end_header
0 0 0
1 2 3
";
        let mesh = load_ply_from_bytes(data).unwrap();
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_missing_coordinate_is_parse_error() {
        let data = b"ply
format ascii 1.0
element vertex 1
property float x
property float y
end_header
0 0
";
        let err = load_ply_from_bytes(data).unwrap_err();
        assert!(matches!(err, MeshError::Parse(_)));
    }

    #[test]
    fn test_negative_index_is_parse_error() {
        let data = b"ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
0 1 0
3 0 -1 2
";
        let err = load_ply_from_bytes(data).unwrap_err();
        assert!(matches!(err, MeshError::Parse(_)));
    }
}
