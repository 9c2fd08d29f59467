//! OBJ-style model parser
//!
//! Reads the line-oriented model grammar into an indexed [`ParsedMesh`]:
//!
//! ```text
//! # comment
//! v  x y z          position
//! vn x y z          normal (switches off normal synthesis for the mesh)
//! vt u v            texture coordinate
//! f  a b c [d]      face; corners are `i`, `i/t`, `i//n` or `i/t/n`
//! ```
//!
//! Indices in the file are 1-based and stored 0-based. Quads are split
//! along the (0, 2) diagonal. Unknown records are skipped. Referential
//! integrity is checked once the whole file is read, because records may
//! refer forward.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use thiserror::Error;

use crate::foundation::math::{triangle_normal, Vec2, Vec3};
use crate::foundation::text::{split_each, split_runs, trim_any, CORNER_SEPARATOR, LINE_IGNORE, TOKEN_SEPARATORS};

/// Model parsing failures
///
/// Line numbers are 1-based; face numbers count triangles after quad
/// splitting, starting at 0.
#[derive(Error, Debug)]
pub enum ObjError {
    /// Reading the model failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not valid UTF-8 text
    #[error("line {line}: stream did not contain valid UTF-8")]
    InvalidText {
        /// Source line
        line: usize,
    },

    /// A numeric field could not be parsed
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber {
        /// Source line
        line: usize,
        /// Offending text
        token: String,
    },

    /// A record has the wrong number of parameters
    #[error("line {line}: {record} command should have exactly {expected} parameters, found {found}")]
    ParameterCount {
        /// Source line
        line: usize,
        /// Record keyword
        record: &'static str,
        /// Required count
        expected: usize,
        /// Actual count
        found: usize,
    },

    /// A face corner is not `i`, `i/t` or `i/t/n`
    #[error("line {line}: f parameter '{descriptor}' should have 1, 2, or 3 parameters separated by '/'")]
    CornerDescriptor {
        /// Source line
        line: usize,
        /// Offending corner
        descriptor: String,
    },

    /// A face has other than 3 or 4 corners
    #[error("line {line}: f command should have 3 or 4 parameters, found {found}")]
    PolygonArity {
        /// Source line
        line: usize,
        /// Corner count
        found: usize,
    },

    /// A face refers to a position that does not exist
    #[error("index for triangle {index} is out of bounds (face {face})")]
    IndexOutOfBounds {
        /// Face containing the reference
        face: usize,
        /// 0-based position index
        index: i64,
    },

    /// A face refers to a texture coordinate that does not exist
    #[error("texture coordinate index {index} is out of bounds (face {face})")]
    DanglingTexCoord {
        /// Face containing the reference
        face: usize,
        /// 0-based texture coordinate index
        index: usize,
    },

    /// A face refers to a normal that does not exist
    #[error("normal index {index} is out of bounds (face {face})")]
    DanglingNormal {
        /// Face containing the reference
        face: usize,
        /// 0-based normal index
        index: usize,
    },
}

/// Where the per-vertex normals of a parsed mesh come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalSource {
    /// At least one `vn` record was present; corners index `normals`
    Explicit,
    /// Averaged face normals, indexed by position
    Synthesized,
}

/// One triangle corner with independent attribute indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    /// Position index
    pub position: usize,
    /// Texture coordinate index, if given
    pub tex_coord: Option<usize>,
    /// Normal index, if given
    pub normal: Option<usize>,
}

impl Corner {
    /// Corner with only a position index
    pub const fn new(position: usize) -> Self {
        Self {
            position,
            tex_coord: None,
            normal: None,
        }
    }
}

/// Triangle of three corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Corners in winding order
    pub corners: [Corner; 3],
}

/// Indexed mesh as read from a model file
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMesh {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Explicit normals, or one synthesized normal per position
    pub normals: Vec<Vec3>,
    /// Texture coordinates
    pub tex_coords: Vec<Vec2>,
    /// Triangles
    pub faces: Vec<Face>,
    /// How `normals` is indexed
    pub normal_source: NormalSource,
}

impl ParsedMesh {
    /// Normal for one corner
    ///
    /// Explicit meshes return zero for corners without a normal index.
    pub fn corner_normal(&self, corner: &Corner) -> Vec3 {
        let index = match self.normal_source {
            NormalSource::Synthesized => Some(corner.position),
            NormalSource::Explicit => corner.normal,
        };
        index
            .and_then(|i| self.normals.get(i))
            .copied()
            .unwrap_or_else(Vec3::zeros)
    }
}

/// Model file loader
pub struct ObjLoader;

impl ObjLoader {
    /// Load and parse a model file
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<ParsedMesh, ObjError> {
        let path = path.as_ref();
        log::debug!("Loading model from: {:?}", path);
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// Parse model text held in memory
    pub fn parse_str(source: &str) -> Result<ParsedMesh, ObjError> {
        Self::parse(Cursor::new(source))
    }

    /// Parse a model from any buffered reader
    pub fn parse<R: BufRead>(reader: R) -> Result<ParsedMesh, ObjError> {
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut tex_coords = Vec::new();
        let mut faces = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line_number = number + 1;
            let line = line.map_err(|e| match e.kind() {
                std::io::ErrorKind::InvalidData => ObjError::InvalidText { line: line_number },
                _ => ObjError::Io(e),
            })?;
            let line = trim_any(&line, LINE_IGNORE);

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts = split_runs(line, TOKEN_SEPARATORS);
            let params = &parts[1..];

            match parts[0] {
                "v" => {
                    let [x, y, z] = parse_floats::<3>(line_number, "v", params)?;
                    positions.push(Vec3::new(x, y, z));
                }
                "vn" => {
                    let [x, y, z] = parse_floats::<3>(line_number, "vn", params)?;
                    normals.push(Vec3::new(x, y, z));
                }
                "vt" => {
                    let [u, v] = parse_floats::<2>(line_number, "vt", params)?;
                    tex_coords.push(Vec2::new(u, v));
                }
                "f" => {
                    let corners = params
                        .iter()
                        .map(|descriptor| parse_corner(line_number, faces.len(), descriptor))
                        .collect::<Result<Vec<_>, _>>();

                    match (params.len(), corners?.as_slice()) {
                        (3, &[a, b, c]) => faces.push(Face { corners: [a, b, c] }),
                        (4, &[a, b, c, d]) => {
                            faces.push(Face { corners: [a, b, c] });
                            faces.push(Face { corners: [a, c, d] });
                        }
                        (found, _) => {
                            return Err(ObjError::PolygonArity {
                                line: line_number,
                                found,
                            })
                        }
                    }
                }
                other => log::trace!("line {}: ignoring '{}' record", line_number, other),
            }
        }

        let normal_source = if normals.is_empty() {
            NormalSource::Synthesized
        } else {
            NormalSource::Explicit
        };

        validate_faces(&faces, positions.len(), tex_coords.len(), normal_source, normals.len())?;

        if normal_source == NormalSource::Synthesized {
            normals = synthesize_normals(&positions, &faces);
        }

        log::debug!(
            "Parsed model: {} positions, {} normals ({:?}), {} texture coordinates, {} faces",
            positions.len(),
            normals.len(),
            normal_source,
            tex_coords.len(),
            faces.len()
        );

        Ok(ParsedMesh {
            positions,
            normals,
            tex_coords,
            faces,
            normal_source,
        })
    }
}

fn parse_number<T: std::str::FromStr>(line: usize, token: &str) -> Result<T, ObjError> {
    token.parse().map_err(|_| ObjError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

fn parse_floats<const N: usize>(line: usize, record: &'static str, params: &[&str]) -> Result<[f32; N], ObjError> {
    if params.len() != N {
        return Err(ObjError::ParameterCount {
            line,
            record,
            expected: N,
            found: params.len(),
        });
    }
    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(params) {
        *value = parse_number(line, token)?;
    }
    Ok(values)
}

/// Optional attribute index; non-positive values mean "not given"
fn parse_optional_index(line: usize, token: &str) -> Result<Option<usize>, ObjError> {
    let raw: i64 = parse_number(line, token)?;
    Ok(zero_based(raw))
}

fn zero_based(raw: i64) -> Option<usize> {
    raw.checked_sub(1).and_then(|i| usize::try_from(i).ok())
}

fn parse_corner(line: usize, face: usize, descriptor: &str) -> Result<Corner, ObjError> {
    let fields = split_each(descriptor, CORNER_SEPARATOR);
    if fields.len() > 3 {
        return Err(ObjError::CornerDescriptor {
            line,
            descriptor: descriptor.to_string(),
        });
    }

    let raw: i64 = parse_number(line, fields[0])?;
    let position = zero_based(raw).ok_or(ObjError::IndexOutOfBounds {
        face,
        index: raw.saturating_sub(1),
    })?;

    let tex_coord = match fields.get(1) {
        Some(token) if !token.is_empty() => parse_optional_index(line, token)?,
        _ => None,
    };
    let normal = match fields.get(2) {
        Some(token) => parse_optional_index(line, token)?,
        None => None,
    };

    Ok(Corner {
        position,
        tex_coord,
        normal,
    })
}

fn validate_faces(
    faces: &[Face],
    position_count: usize,
    tex_coord_count: usize,
    normal_source: NormalSource,
    normal_count: usize,
) -> Result<(), ObjError> {
    for (face, triangle) in faces.iter().enumerate() {
        for corner in &triangle.corners {
            if corner.position >= position_count {
                return Err(ObjError::IndexOutOfBounds {
                    face,
                    index: corner.position as i64,
                });
            }
            if let Some(index) = corner.tex_coord.filter(|i| *i >= tex_coord_count) {
                return Err(ObjError::DanglingTexCoord { face, index });
            }
            if normal_source == NormalSource::Explicit {
                if let Some(index) = corner.normal.filter(|i| *i >= normal_count) {
                    return Err(ObjError::DanglingNormal { face, index });
                }
            }
        }
    }
    Ok(())
}

/// Unweighted average of the unit normals of every face touching a position
fn synthesize_normals(positions: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::zeros(); positions.len()];
    let mut degree = vec![0u32; positions.len()];

    for (index, face) in faces.iter().enumerate() {
        let [a, b, c] = face.corners.map(|corner| corner.position);
        let normal = triangle_normal(&positions[a], &positions[b], &positions[c]).unwrap_or_else(|| {
            log::warn!("Face {} is degenerate; it contributes a zero normal", index);
            Vec3::zeros()
        });
        for position in [a, b, c] {
            normals[position] += normal;
            degree[position] += 1;
        }
    }

    for (normal, count) in normals.iter_mut().zip(&degree) {
        if *count > 0 {
            *normal /= *count as f32;
        }
    }
    normals
}
