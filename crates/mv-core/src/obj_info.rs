//! Material and texture metadata scanned from OBJ text

use std::collections::HashSet;

/// Extra information shown for OBJ files
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjInfo {
    /// Whether the file carries texture coordinates
    pub has_uv: bool,
    /// Distinct material names referenced by `usemtl`
    pub material_count: usize,
    /// One draw per `usemtl` switch, at least one
    pub draw_calls: usize,
}

impl ObjInfo {
    /// Scan OBJ source text.
    pub fn scan(contents: &str) -> Self {
        let mut has_uv = false;
        let mut materials = HashSet::new();
        let mut usemtl_count = 0;

        for line in contents.lines() {
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("vt") => has_uv = true,
                Some("usemtl") => {
                    if let Some(name) = tokens.next() {
                        materials.insert(name);
                        usemtl_count += 1;
                    }
                }
                _ => {}
            }
        }

        Self {
            has_uv,
            material_count: materials.len(),
            draw_calls: usemtl_count.max(1),
        }
    }
}
