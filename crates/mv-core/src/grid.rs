//! Reference grid geometry

/// Default number of lines in each direction
pub const DEFAULT_GRID_CELLS: u32 = 50;
/// Default grid extent (half-size in each direction)
pub const DEFAULT_GRID_SIZE: f32 = 20.0;

/// Generate grid line endpoints on the y = 0 plane.
///
/// Returns a line list: every consecutive pair of points is one segment.
/// `steps` lines run along X and `steps` lines run along Z, placed at
/// evenly spaced offsets covering `-size..=size`.
pub fn generate_grid_lines(size: f32, steps: u32) -> Vec<[f32; 3]> {
    let offsets = linspace(-size, size, steps);
    let mut points = Vec::with_capacity(offsets.len() * 4);

    // Lines parallel to X axis
    for &z in &offsets {
        points.push([-size, 0.0, z]);
        points.push([size, 0.0, z]);
    }

    // Lines parallel to Z axis
    for &x in &offsets {
        points.push([x, 0.0, -size]);
        points.push([x, 0.0, size]);
    }

    points
}

/// `count` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f32, end: f32, count: u32) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f32;
            (0..count).map(|i| start + step * i as f32).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_vertex_count() {
        let points = generate_grid_lines(DEFAULT_GRID_SIZE, DEFAULT_GRID_CELLS);
        assert_eq!(points.len(), 4 * DEFAULT_GRID_CELLS as usize);
    }

    #[test]
    fn test_grid_lies_on_ground_plane() {
        let points = generate_grid_lines(5.0, 7);
        assert!(points.iter().all(|p| p[1] == 0.0));
        assert!(
            points
                .iter()
                .all(|p| p[0].abs() <= 5.0 + 1e-5 && p[2].abs() <= 5.0 + 1e-5)
        );
    }

    #[test]
    fn test_grid_spans_full_extent() {
        let points = generate_grid_lines(2.0, 3);
        // First family: along X at z = -2, 0, 2
        assert_eq!(points[0], [-2.0, 0.0, -2.0]);
        assert_eq!(points[1], [2.0, 0.0, -2.0]);
        assert_eq!(points[2], [-2.0, 0.0, 0.0]);
        assert_eq!(points[5], [2.0, 0.0, 2.0]);
        // Second family: along Z at x = -2, 0, 2
        assert_eq!(points[6], [-2.0, 0.0, -2.0]);
        assert_eq!(points[7], [-2.0, 0.0, 2.0]);
        assert_eq!(points[11], [2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_single_step_grid() {
        let points = generate_grid_lines(3.0, 1);
        assert_eq!(
            points,
            vec![
                [-3.0, 0.0, -3.0],
                [3.0, 0.0, -3.0],
                [-3.0, 0.0, -3.0],
                [-3.0, 0.0, 3.0],
            ]
        );
    }

    #[test]
    fn test_zero_steps_is_empty() {
        assert!(generate_grid_lines(10.0, 0).is_empty());
    }
}
