//! OFF (Object File Format) loading
//!
//! ASCII only. Header variants such as `COFF` or `NOFF` are accepted and
//! any per-vertex or per-face extras after the required fields are skipped.

use super::{MeshError, TriMesh, bounded_capacity};

/// Shortest vertex record, `0 0 0\n`
const MIN_VERTEX_BYTES: usize = 6;
/// Shortest face record, `0\n`
const MIN_FACE_BYTES: usize = 2;

/// Load an OFF from bytes.
pub fn load_off_from_bytes(data: &[u8]) -> Result<TriMesh, MeshError> {
    // The header decides whether the rest is text at all
    let (header, body) = split_header(data)?;
    let mut header_tokens = header.split_whitespace();
    let keyword = header_tokens.next().unwrap_or("");
    if !keyword.ends_with("OFF") {
        return Err(MeshError::Parse(format!("unexpected OFF header '{}'", keyword)));
    }
    if header_tokens.clone().any(|t| t.eq_ignore_ascii_case("BINARY")) {
        return Err(MeshError::UnsupportedFormat("binary OFF".to_string()));
    }

    let text = std::str::from_utf8(body).map_err(|_| not_text())?;
    let mut lines = text.lines().map(strip_comment).filter(|line| !line.is_empty());

    // Counts may share the header line
    let counts: Vec<&str> = match header_tokens.clone().next() {
        Some(_) => header_tokens.collect(),
        None => lines
            .next()
            .ok_or_else(|| MeshError::Parse("missing OFF element counts".to_string()))?
            .split_whitespace()
            .collect(),
    };
    let vertex_count = parse_count(counts.first().copied())?;
    let face_count = parse_count(counts.get(1).copied())?;

    let mut positions =
        Vec::with_capacity(bounded_capacity(vertex_count, body.len(), MIN_VERTEX_BYTES));
    for i in 0..vertex_count {
        let line = lines
            .next()
            .ok_or_else(|| MeshError::Parse(format!("expected {} vertices, found {}", vertex_count, i)))?;
        let coords = line
            .split_whitespace()
            .take(3)
            .map(|t| t.parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| MeshError::Parse(format!("bad vertex '{}': {}", line, e)))?;
        if coords.len() < 3 {
            return Err(MeshError::Parse(format!("bad vertex '{}'", line)));
        }
        positions.push([coords[0], coords[1], coords[2]]);
    }

    let mut faces = Vec::with_capacity(bounded_capacity(face_count, body.len(), MIN_FACE_BYTES));
    for i in 0..face_count {
        let line = lines
            .next()
            .ok_or_else(|| MeshError::Parse(format!("expected {} faces, found {}", face_count, i)))?;
        let mut tokens = line.split_whitespace();
        let n = parse_count(tokens.next())?;
        let face = tokens
            .take(n)
            .map(|t| t.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| MeshError::Parse(format!("bad face '{}': {}", line, e)))?;
        if face.len() != n {
            return Err(MeshError::Parse(format!("bad face '{}'", line)));
        }
        faces.push(face);
    }

    TriMesh::from_polygons(positions, faces)
}

/// First non-blank line and everything after it
fn split_header(data: &[u8]) -> Result<(&str, &[u8]), MeshError> {
    let mut rest = data;
    while !rest.is_empty() {
        let (line, tail) = match rest.iter().position(|&b| b == b'\n') {
            Some(end) => (&rest[..end], &rest[end + 1..]),
            None => (rest, &rest[rest.len()..]),
        };
        let line = strip_comment(std::str::from_utf8(line).map_err(|_| not_text())?);
        if !line.is_empty() {
            return Ok((line, tail));
        }
        rest = tail;
    }
    Err(MeshError::Parse("missing OFF header".to_string()))
}

fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or("").trim()
}

fn not_text() -> MeshError {
    MeshError::Parse("OFF file is not valid text".to_string())
}

fn parse_count(token: Option<&str>) -> Result<usize, MeshError> {
    token
        .ok_or_else(|| MeshError::Parse("missing element count".to_string()))?
        .parse()
        .map_err(|e| MeshError::Parse(format!("bad element count: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TETRAHEDRON: &str = "OFF
# a comment
4 4 6
0 0 0
1 0 0
0 1 0
0 0 1
3 0 2 1
3 0 1 3
3 0 3 2
3 1 2 3
";

    #[test]
    fn test_tetrahedron() {
        let mesh = load_off_from_bytes(TETRAHEDRON.as_bytes()).unwrap();
        assert_eq!(
            mesh.stats(),
            crate::mesh::MeshStats {
                vertices: 4,
                triangles: 4,
                edges: 6,
            }
        );
    }

    #[test]
    fn test_counts_on_header_line_and_colors() {
        let data = "COFF 4 1 0\n0 0 0 255 0 0 255\n1 0 0 255 0 0 255\n1 1 0 255 0 0 255\n0 1 0 255 0 0 255\n4 0 1 2 3 1 0 0\n";
        let mesh = load_off_from_bytes(data.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_truncated_file() {
        let err = load_off_from_bytes(b"OFF\n3 1 0\n0 0 0\n1 0 0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse(_)));
    }

    #[test]
    fn test_wrong_header() {
        let err = load_off_from_bytes(b"PLY\n3 1 0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse(_)));
    }

    #[test]
    fn test_binary_off_is_unsupported() {
        let err = load_off_from_bytes(b"OFF BINARY\n").unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedFormat(_)));

        let mut data = b"# exported\nOFF BINARY\n".to_vec();
        data.extend_from_slice(&[0, 0, 0, 3, 0xff, 0xfe, 0x80, 0x81]);
        let err = load_off_from_bytes(&data).unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_non_text_body_is_parse_error() {
        let err = load_off_from_bytes(b"OFF\n3 1 0\n\xff\xfe\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse(msg) if msg.contains("not valid text")));
    }

    #[test]
    fn test_huge_counts_fail_without_reserving() {
        let err = load_off_from_bytes(b"OFF\n4000000000 0 0\n0 0 0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse(msg) if msg.contains("expected 4000000000 vertices")));

        let err = load_off_from_bytes(b"OFF\n3 4000000000 0\n0 0 0\n1 0 0\n0 1 0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse(msg) if msg.contains("faces")));
    }

    #[test]
    fn test_face_index_out_of_range() {
        let err = load_off_from_bytes(b"OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 7\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse(_)));
    }
}
