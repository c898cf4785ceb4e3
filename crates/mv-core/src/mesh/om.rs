//! OpenMesh binary (`.om`) loading
//!
//! Only geometry and connectivity are read. Normals, colors, status flags
//! and custom properties are skipped by their stored size.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use super::{MeshError, TriMesh, bounded_capacity};

const MAGIC: &[u8; 2] = b"OM";

/// Version 2.0 switched face storage to halfedge connectivity
const VERSION_2_0: u8 = 2 << 5;

mod entity {
    pub const VERTEX: u8 = 0x00;
    pub const MESH: u8 = 0x01;
    pub const FACE: u8 = 0x02;
    pub const EDGE: u8 = 0x04;
    pub const HALFEDGE: u8 = 0x06;
    pub const SENTINEL: u8 = 0x07;
}

mod kind {
    pub const POSITION: u8 = 0x00;
    pub const CUSTOM: u8 = 0x06;
    pub const TOPOLOGY: u8 = 0x07;
}

/// File header
#[derive(Debug, Clone, Copy)]
struct Header {
    mesh: u8,
    version: u8,
    n_vertices: usize,
    n_faces: usize,
    n_edges: usize,
}

/// Bit-packed chunk descriptor.
///
/// From the low bit up: reserved (1), name (1), entity (3), kind (4),
/// signed (1), float (1), dim (3), size code (2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChunkHeader {
    named: bool,
    entity: u8,
    kind: u8,
    signed: bool,
    float: bool,
    dim: u8,
    bits: u8,
}

impl ChunkHeader {
    fn from_bits(raw: u16) -> Self {
        Self {
            named: (raw >> 1) & 0x1 != 0,
            entity: ((raw >> 2) & 0x7) as u8,
            kind: ((raw >> 5) & 0xf) as u8,
            signed: (raw >> 9) & 0x1 != 0,
            float: (raw >> 10) & 0x1 != 0,
            dim: ((raw >> 11) & 0x7) as u8,
            bits: ((raw >> 14) & 0x3) as u8,
        }
    }

    /// Bytes per scalar component.
    ///
    /// Integers use 8/16/32/64 bits for codes 0..=3, floats 32/64/128 for
    /// codes 1..=3. Float code 0 is invalid and yields 0.
    fn scalar_size(&self) -> usize {
        match (self.float, self.bits) {
            (false, bits) => 1 << bits,
            (true, 0) => 0,
            (true, bits) => 2 << bits,
        }
    }

    /// Bytes per element
    fn element_size(&self) -> usize {
        self.components() * self.scalar_size()
    }

    /// Components per element
    fn components(&self) -> usize {
        self.dim as usize + 1
    }
}

/// Connectivity collected while reading chunks
#[derive(Debug, Default)]
struct Topology {
    faces: Vec<Vec<u32>>,
    face_halfedges: Vec<i64>,
    next: Vec<i64>,
    to_vertex: Vec<i64>,
}

/// Load an OpenMesh binary file from bytes.
pub fn load_om_from_bytes(data: &[u8]) -> Result<TriMesh, MeshError> {
    let mut reader = Cursor::new(data);
    let header = read_header(&mut reader)?;

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut topology = Topology::default();

    while (reader.position() as usize) < data.len() {
        let chunk = ChunkHeader::from_bits(reader.read_u16::<LittleEndian>().map_err(truncated)?);
        if chunk.entity == entity::SENTINEL {
            break;
        }
        if chunk.named {
            let len = reader.read_u8().map_err(truncated)? as usize;
            skip(&mut reader, len)?;
        }

        match (chunk.entity, chunk.kind) {
            (entity::VERTEX, kind::POSITION) => {
                positions = read_positions(&mut reader, &chunk, header.n_vertices)?;
            }
            (entity::FACE, kind::TOPOLOGY) if header.version < VERSION_2_0 => {
                topology.faces = read_face_lists(&mut reader, &chunk, &header)?;
            }
            (entity::FACE, kind::TOPOLOGY) => {
                topology.face_halfedges = (0..header.n_faces)
                    .map(|_| read_int(&mut reader, &chunk))
                    .collect::<Result<_, _>>()?;
            }
            (entity::EDGE, kind::TOPOLOGY) => {
                let halfedges = header.n_edges.saturating_mul(2);
                let capacity =
                    bounded_capacity(halfedges, remaining(&reader), 3 * chunk.scalar_size());
                topology.next = Vec::with_capacity(capacity);
                topology.to_vertex = Vec::with_capacity(capacity);
                for _ in 0..halfedges {
                    topology.next.push(read_int(&mut reader, &chunk)?);
                    topology.to_vertex.push(read_int(&mut reader, &chunk)?);
                    // Incident face, recovered from the face chunk instead
                    read_int(&mut reader, &chunk)?;
                }
            }
            (_, kind::CUSTOM) => {
                let block = reader.read_u32::<LittleEndian>().map_err(truncated)? as usize;
                skip(&mut reader, block)?;
            }
            _ => {
                let count = entity_count(&header, chunk.entity)?;
                skip(&mut reader, count.saturating_mul(chunk.element_size()))?;
            }
        }
    }

    if positions.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let faces = if header.version < VERSION_2_0 {
        topology.faces
    } else {
        faces_from_halfedges(&topology)?
    };

    tracing::trace!(
        "OM {} mesh v{}.{}: {} vertices, {} faces",
        header.mesh as char,
        header.version >> 5,
        header.version & 0x1f,
        positions.len(),
        faces.len()
    );

    TriMesh::from_polygons(positions, faces)
}

fn read_header(reader: &mut Cursor<&[u8]>) -> Result<Header, MeshError> {
    let mut magic = [0u8; 2];
    reader.read_exact(&mut magic).map_err(truncated)?;
    if &magic != MAGIC {
        return Err(MeshError::Parse("missing OM magic".to_string()));
    }

    let mesh = reader.read_u8().map_err(truncated)?;
    if !matches!(mesh, b'T' | b'Q' | b'P') {
        return Err(MeshError::Parse(format!("unknown OM mesh type {:#04x}", mesh)));
    }
    let version = reader.read_u8().map_err(truncated)?;

    let mut counts = [0usize; 3];
    for count in &mut counts {
        *count = reader.read_u32::<LittleEndian>().map_err(truncated)? as usize;
    }

    Ok(Header {
        mesh,
        version,
        n_vertices: counts[0],
        n_faces: counts[1],
        n_edges: counts[2],
    })
}

fn read_positions(
    reader: &mut Cursor<&[u8]>,
    chunk: &ChunkHeader,
    n_vertices: usize,
) -> Result<Vec<[f32; 3]>, MeshError> {
    if !chunk.float || chunk.components() != 3 {
        return Err(MeshError::Parse(
            "vertex positions must be 3D floating point".to_string(),
        ));
    }

    let scalar_size = chunk.scalar_size();
    if !matches!(scalar_size, 4 | 8) {
        return Err(MeshError::Parse(format!(
            "unsupported {}-byte float positions",
            scalar_size
        )));
    }

    let mut positions =
        Vec::with_capacity(bounded_capacity(n_vertices, remaining(reader), chunk.element_size()));
    for _ in 0..n_vertices {
        let mut p = [0.0f32; 3];
        for c in &mut p {
            *c = if scalar_size == 4 {
                reader.read_f32::<LittleEndian>().map_err(truncated)?
            } else {
                reader.read_f64::<LittleEndian>().map_err(truncated)? as f32
            };
        }
        positions.push(p);
    }
    Ok(positions)
}

/// Pre-2.0 faces: explicit vertex index lists
fn read_face_lists(
    reader: &mut Cursor<&[u8]>,
    chunk: &ChunkHeader,
    header: &Header,
) -> Result<Vec<Vec<u32>>, MeshError> {
    // Triangles with byte indices are the tightest packing
    let mut faces = Vec::with_capacity(bounded_capacity(header.n_faces, remaining(reader), 3));
    for _ in 0..header.n_faces {
        let n = match header.mesh {
            b'T' => 3,
            b'Q' => 4,
            _ => reader.read_u16::<LittleEndian>().map_err(truncated)? as usize,
        };
        let face = (0..n)
            .map(|_| index(read_int(reader, chunk)?))
            .collect::<Result<Vec<_>, _>>()?;
        faces.push(face);
    }
    Ok(faces)
}

/// Walk each face's halfedge loop to recover its vertices
fn faces_from_halfedges(topology: &Topology) -> Result<Vec<Vec<u32>>, MeshError> {
    let n_halfedges = topology.next.len();
    topology
        .face_halfedges
        .iter()
        .map(|&start| -> Result<Vec<u32>, MeshError> {
            let mut face = Vec::new();
            let mut h = start;
            loop {
                let hi = usize::try_from(h)
                    .ok()
                    .filter(|&hi| hi < n_halfedges)
                    .ok_or_else(|| MeshError::Parse(format!("invalid halfedge {}", h)))?;
                face.push(index(topology.to_vertex[hi])?);
                h = topology.next[hi];
                if h == start {
                    break;
                }
                if face.len() > n_halfedges {
                    return Err(MeshError::Parse("halfedge loop does not close".to_string()));
                }
            }
            Ok(face)
        })
        .collect()
}

/// Read one integer of the chunk's width, sign-extending if flagged
fn read_int(reader: &mut Cursor<&[u8]>, chunk: &ChunkHeader) -> Result<i64, MeshError> {
    if chunk.float {
        return Err(MeshError::Parse("OM topology must be stored as integers".to_string()));
    }
    let value = match (chunk.scalar_size(), chunk.signed) {
        (1, true) => reader.read_i8().map(i64::from),
        (1, false) => reader.read_u8().map(i64::from),
        (2, true) => reader.read_i16::<LittleEndian>().map(i64::from),
        (2, false) => reader.read_u16::<LittleEndian>().map(i64::from),
        (4, true) => reader.read_i32::<LittleEndian>().map(i64::from),
        (4, false) => reader.read_u32::<LittleEndian>().map(i64::from),
        (_, true) => reader.read_i64::<LittleEndian>(),
        (_, false) => reader.read_u64::<LittleEndian>().map(|v| v as i64),
    };
    value.map_err(truncated)
}

fn index(value: i64) -> Result<u32, MeshError> {
    u32::try_from(value).map_err(|_| MeshError::Parse(format!("invalid vertex index {}", value)))
}

fn entity_count(header: &Header, entity: u8) -> Result<usize, MeshError> {
    match entity {
        entity::VERTEX => Ok(header.n_vertices),
        entity::FACE => Ok(header.n_faces),
        entity::EDGE => Ok(header.n_edges),
        entity::HALFEDGE => Ok(header.n_edges.saturating_mul(2)),
        entity::MESH => Ok(1),
        other => Err(MeshError::Parse(format!("unknown OM chunk entity {}", other))),
    }
}

fn remaining(reader: &Cursor<&[u8]>) -> usize {
    reader.get_ref().len().saturating_sub(reader.position() as usize)
}

fn skip(reader: &mut Cursor<&[u8]>, bytes: usize) -> Result<(), MeshError> {
    if bytes > remaining(reader) {
        return Err(MeshError::Parse("OM chunk runs past end of file".to_string()));
    }
    reader.set_position(reader.position() + bytes as u64);
    Ok(())
}

fn truncated(e: std::io::Error) -> MeshError {
    MeshError::Parse(format!("truncated OM file: {}", e))
}
