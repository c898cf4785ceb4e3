//! A mesh file opened for viewing

use std::path::{Path, PathBuf};

use crate::mesh::{MeshError, MeshFormat, MeshStats, TriMesh, load_mesh_from_bytes, read_mesh_file};
use crate::obj_info::ObjInfo;

/// Loaded mesh together with the file details shown in the UI
#[derive(Debug, Clone)]
pub struct MeshDocument {
    /// Absolute path when it can be resolved
    pub path: PathBuf,
    /// File name with extension
    pub name: String,
    pub format: MeshFormat,
    pub mesh: TriMesh,
    pub stats: MeshStats,
    /// Present for OBJ files only
    pub obj_info: Option<ObjInfo>,
}

impl MeshDocument {
    /// Load a mesh file and gather its statistics.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let (format, data) = read_mesh_file(path)?;
        let mesh = load_mesh_from_bytes(format, &data)?;

        let obj_info = match format {
            MeshFormat::Obj => Some(ObjInfo::scan(&String::from_utf8_lossy(&data))),
            _ => None,
        };

        let path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "unnamed".to_string());
        let stats = mesh.stats();

        tracing::info!(
            "Opened {} ({}): {} vertices, {} triangles, {} edges",
            name,
            format.name(),
            stats.vertices,
            stats.triangles,
            stats.edges
        );

        Ok(Self {
            path,
            name,
            format,
            mesh,
            stats,
            obj_info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_obj_collects_info() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        std::fs::write(
            &path,
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvt 0 0\nusemtl a\nf 1 2 3\nusemtl b\nf 1 3 4\n",
        )
        .unwrap();

        let doc = MeshDocument::open(&path).unwrap();
        assert_eq!(doc.name, "quad.obj");
        assert_eq!(doc.format, MeshFormat::Obj);
        assert!(doc.path.is_absolute());
        assert_eq!(
            doc.stats,
            MeshStats {
                vertices: 4,
                triangles: 2,
                edges: 5,
            }
        );
        assert_eq!(
            doc.obj_info,
            Some(ObjInfo {
                has_uv: true,
                material_count: 2,
                draw_calls: 2,
            })
        );
    }

    #[test]
    fn test_open_off_has_no_obj_info() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.off");
        std::fs::write(&path, "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap();

        let doc = MeshDocument::open(&path).unwrap();
        assert_eq!(doc.format, MeshFormat::Off);
        assert!(doc.obj_info.is_none());
    }

    #[test]
    fn test_open_propagates_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.off");
        std::fs::write(&path, "OFF\n3 1 0\n0 0 0\n").unwrap();

        assert!(matches!(
            MeshDocument::open(&path),
            Err(MeshError::Parse(_))
        ));
    }

    #[test]
    fn test_open_unsupported_extension() {
        assert!(matches!(
            MeshDocument::open("thing.3ds"),
            Err(MeshError::UnsupportedFormat(_))
        ));
    }
}
