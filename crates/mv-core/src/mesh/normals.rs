//! Normal calculation utilities for mesh data

use glam::Vec3;

/// Normal used when a face or vertex has no usable orientation
const FALLBACK_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Calculate normal for a single triangle
pub fn calculate_triangle_normal(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> [f32; 3] {
    let (v0, v1, v2) = (Vec3::from(v0), Vec3::from(v1), Vec3::from(v2));
    let cross = (v1 - v0).cross(v2 - v0);
    let len = cross.length();
    if len > 0.0 {
        (cross / len).to_array()
    } else {
        FALLBACK_NORMAL
    }
}

/// Calculate face normals from vertices and indices
pub fn calculate_face_normals(vertices: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    indices
        .chunks_exact(3)
        .map(|tri| {
            calculate_triangle_normal(
                vertices[tri[0] as usize],
                vertices[tri[1] as usize],
                vertices[tri[2] as usize],
            )
        })
        .collect()
}

/// Calculate per-vertex normals as the normalised sum of incident face normals
pub fn calculate_vertex_normals(vertices: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let face_normals = calculate_face_normals(vertices, indices);
    let mut sums = vec![Vec3::ZERO; vertices.len()];

    for (tri, normal) in indices.chunks_exact(3).zip(&face_normals) {
        let normal = Vec3::from(*normal);
        for &idx in tri {
            sums[idx as usize] += normal;
        }
    }

    sums.into_iter()
        .map(|sum| {
            let len = sum.length();
            if len > f32::EPSILON {
                (sum / len).to_array()
            } else {
                FALLBACK_NORMAL
            }
        })
        .collect()
}
