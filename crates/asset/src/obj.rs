//! OBJ parser supporting positions, normals and texture coordinates.
//!
//! Every face corner becomes its own vertex (no welding), indices are
//! emitted sequentially. Directives other than `v`/`vt`/`vn`/`f`
//! (materials, groups, smoothing, ...) are skipped.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use corelib::{MeshBuilder, Vec2, Vec3, Vec4};

use crate::{
    error::{FormatError, ObjError},
    mesh::{CpuMeshBuilder, MeshData},
};

/// Texture coordinate used when a face reference omits `t`.
pub const DEFAULT_UV: Vec2 = Vec2::ZERO;
/// Normal used when a face reference omits `n`.
pub const DEFAULT_NORMAL: Vec3 = Vec3::ZERO;
/// OBJ carries no vertex color; every vertex is opaque white.
pub const DEFAULT_COLOR: Vec4 = Vec4::ONE;

/// How faces with more than three corners are decomposed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Triangulation {
    /// `(c0, ci, ci+1)` for every `i` in `1..n-1`.
    #[default]
    Fan,
    /// Emit every corner once, in file order. Only yields a triangle list
    /// when the file contains triangles exclusively.
    Verbatim,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjOptions {
    pub triangulation: Triangulation,
}

impl ObjOptions {
    pub fn with_triangulation(mut self, triangulation: Triangulation) -> Self {
        self.triangulation = triangulation;
        self
    }
}

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<MeshData, ObjError> {
    load_obj_path_with(path, CpuMeshBuilder::new(), &ObjOptions::default())
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<MeshData, ObjError> {
    load_obj_with(reader, CpuMeshBuilder::new(), &ObjOptions::default())
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> Result<MeshData, ObjError> {
    load_obj_from_reader(io::Cursor::new(contents))
}

/// Open `path` and bake its geometry through `builder`.
pub fn load_obj_path_with<B: MeshBuilder>(
    path: impl AsRef<Path>,
    builder: B,
    options: &ObjOptions,
) -> Result<B::Mesh, ObjError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ObjError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_obj_with(BufReader::new(file), builder, options)
}

/// Parse OBJ statements from `reader` and bake them through `builder`.
///
/// Lines are read as raw bytes and decoded lossily: non-UTF-8 bytes in
/// comments or skipped directives are harmless, inside a numeric payload
/// they surface as a format error.
pub fn load_obj_with<R: BufRead, B: MeshBuilder>(
    mut reader: R,
    mut builder: B,
    options: &ObjOptions,
) -> Result<B::Mesh, ObjError> {
    let mut pools = Pools::default();
    let mut face: Vec<FaceVertex> = Vec::new();
    let mut buf: Vec<u8> = Vec::new();

    for line in 1.. {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ObjError::Read { line, source })?;
        if read == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&buf);
        parse_line(&text, &mut pools, &mut face, &mut builder, options)
            .map_err(|kind| ObjError::Format { line, kind })?;
    }

    Ok(builder.bake()?)
}

/// Attribute pools in declaration order.
#[derive(Debug, Default)]
struct Pools {
    positions: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    normals: Vec<Vec3>,
}

/// One face corner, already 0-based and bounds-checked against the pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FaceVertex {
    position: usize,
    texcoord: Option<usize>,
    normal: Option<usize>,
}

fn parse_line<B: MeshBuilder>(
    line: &str,
    pools: &mut Pools,
    face: &mut Vec<FaceVertex>,
    builder: &mut B,
    options: &ObjOptions,
) -> Result<(), FormatError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(());
    }

    let mut parts = trimmed.split_whitespace();
    match parts.next() {
        Some("v") => {
            let x = parse_f32(parts.next(), "x coordinate")?;
            let y = parse_f32(parts.next(), "y coordinate")?;
            let z = parse_f32(parts.next(), "z coordinate")?;
            pools.positions.push(Vec3::new(x, y, z));
        }
        Some("vt") => {
            let u = parse_f32(parts.next(), "u coordinate")?;
            let v = parse_f32(parts.next(), "v coordinate")?;
            pools.texcoords.push(Vec2::new(u, v));
        }
        Some("vn") => {
            let nx = parse_f32(parts.next(), "nx coordinate")?;
            let ny = parse_f32(parts.next(), "ny coordinate")?;
            let nz = parse_f32(parts.next(), "nz coordinate")?;
            pools.normals.push(Vec3::new(nx, ny, nz));
        }
        Some("f") => {
            face.clear();
            // Trailing `# ...` comments end the face.
            for token in parts.take_while(|t| !t.starts_with('#')) {
                face.push(parse_face_vertex(token, pools)?);
            }
            if face.len() < 3 {
                return Err(FormatError::TooFewVertices { count: face.len() });
            }
            emit_face(face, pools, builder, options.triangulation)?;
        }
        _ => {
            // o/g/s/usemtl/mtllib/etc.
        }
    }
    Ok(())
}

fn emit_face<B: MeshBuilder>(
    face: &[FaceVertex],
    pools: &Pools,
    builder: &mut B,
    triangulation: Triangulation,
) -> Result<(), FormatError> {
    match triangulation {
        Triangulation::Verbatim => {
            for corner in face {
                emit_corner(corner, pools, builder)?;
            }
        }
        Triangulation::Fan => {
            for tri in 1..(face.len() - 1) {
                emit_corner(&face[0], pools, builder)?;
                emit_corner(&face[tri], pools, builder)?;
                emit_corner(&face[tri + 1], pools, builder)?;
            }
        }
    }
    Ok(())
}

fn emit_corner<B: MeshBuilder>(
    corner: &FaceVertex,
    pools: &Pools,
    builder: &mut B,
) -> Result<(), FormatError> {
    if builder.vertex_count() >= u32::MAX as usize {
        return Err(FormatError::TooManyVertices);
    }
    // Indices were checked against the pools, which only grow.
    let position = pools.positions[corner.position];
    let uv = corner.texcoord.map_or(DEFAULT_UV, |i| pools.texcoords[i]);
    let normal = corner.normal.map_or(DEFAULT_NORMAL, |i| pools.normals[i]);

    let index = builder.add_vertex(position, normal, uv, DEFAULT_COLOR);
    builder.add_index(index);
    Ok(())
}

fn parse_f32(value: Option<&str>, what: &'static str) -> Result<f32, FormatError> {
    let token = value.ok_or(FormatError::MissingValue { what })?;
    token.parse::<f32>().map_err(|_| FormatError::InvalidFloat {
        what,
        token: token.to_owned(),
    })
}

/// Parse `p`, `p/t`, `p/t/n` or `p//n`.
fn parse_face_vertex(token: &str, pools: &Pools) -> Result<FaceVertex, FormatError> {
    let malformed = || FormatError::MalformedReference {
        token: token.to_owned(),
    };

    let mut split = token.split('/');
    let pos = split.next().filter(|p| !p.is_empty()).ok_or_else(malformed)?;
    let tex = split.next().filter(|t| !t.is_empty());
    let norm = split.next().filter(|n| !n.is_empty());
    if split.next().is_some() {
        return Err(malformed());
    }

    Ok(FaceVertex {
        position: resolve_index(pos, pools.positions.len(), "position")?,
        texcoord: tex
            .map(|t| resolve_index(t, pools.texcoords.len(), "texcoord"))
            .transpose()?,
        normal: norm
            .map(|n| resolve_index(n, pools.normals.len(), "normal"))
            .transpose()?,
    })
}

/// Convert a 1-based (or negative, end-relative) OBJ index into a pool offset.
fn resolve_index(token: &str, len: usize, attribute: &'static str) -> Result<usize, FormatError> {
    let raw = token
        .parse::<i64>()
        .map_err(|_| FormatError::InvalidIndex {
            attribute,
            token: token.to_owned(),
        })?;
    if raw == 0 {
        return Err(FormatError::ZeroIndex { attribute });
    }

    let idx = if raw > 0 { raw - 1 } else { len as i64 + raw };
    if idx < 0 || idx as usize >= len {
        return Err(FormatError::IndexOutOfRange {
            attribute,
            index: raw,
            len,
        });
    }

    Ok(idx as usize)
}
