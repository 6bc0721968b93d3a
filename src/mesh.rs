//! Triangle mesh and its plain-text loader.
//!
//! The source format is line-oriented: `v x y z` lines declare vertices,
//! `f a b c` lines declare faces by 1-based vertex index in encounter
//! order. Blank lines and lines with any other leading token are ignored.
//! Loading is all-or-nothing; a malformed line aborts with a [`LoadError`]
//! before any frame runs.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::math::mat4::Mat4;
use crate::math::vec4::Vec4;
use crate::triangle::Triangle;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read mesh file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected 3 fields after '{record}'")]
    MissingFields { line: usize, record: &'static str },
    #[error("line {line}: unparsable number '{token}'")]
    BadNumber { line: usize, token: String },
    #[error("line {line}: face index {index} out of range (1..={max})")]
    BadIndex { line: usize, index: usize, max: usize },
}

/// An ordered list of triangles plus the 3D pivot used for
/// center-relative rotations.
///
/// Transform operations return a new mesh; the triangle list itself is
/// never mutated in place.
#[derive(Clone, Debug)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    center: Vec4,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>, center: Vec4) -> Self {
        Self { triangles, center }
    }

    /// Parse a mesh from its text description.
    ///
    /// Faces are resolved against the complete vertex list, so `f` records
    /// may appear before the vertices they reference.
    pub fn parse(description: &str) -> Result<Self, LoadError> {
        let mut vertices: Vec<Vec4> = Vec::new();
        let mut faces: Vec<(usize, [usize; 3])> = Vec::new();

        for (index, raw) in description.lines().enumerate() {
            let line = index + 1;
            let mut fields = raw.split_whitespace();
            match fields.next() {
                Some("v") => {
                    let [x, y, z] = parse_fields(fields, line, "v", parse_coord)?;
                    vertices.push(Vec4::point(x, y, z));
                }
                Some("f") => {
                    faces.push((line, parse_fields(fields, line, "f", parse_index)?));
                }
                // Blank lines and unknown record types are ignored.
                _ => {}
            }
        }

        let resolve = |line: usize, i: usize| -> Result<Vec4, LoadError> {
            if i == 0 || i > vertices.len() {
                return Err(LoadError::BadIndex {
                    line,
                    index: i,
                    max: vertices.len(),
                });
            }
            Ok(vertices[i - 1])
        };

        let mut triangles = Vec::with_capacity(faces.len());
        for (line, [a, b, c]) in faces {
            triangles.push(Triangle::new(
                resolve(line, a)?,
                resolve(line, b)?,
                resolve(line, c)?,
            ));
        }

        log::info!(
            "parsed mesh: {} vertices, {} triangles",
            vertices.len(),
            triangles.len()
        );
        Ok(Self::new(triangles, Vec4::point(0.0, 0.0, 0.0)))
    }

    /// Load a mesh description from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// The built-in unit cube, for running without an asset file.
    pub fn cube() -> Self {
        let triangles = CUBE_FACES
            .iter()
            .map(|&[a, b, c]| {
                Triangle::new(
                    CUBE_VERTICES[a - 1],
                    CUBE_VERTICES[b - 1],
                    CUBE_VERTICES[c - 1],
                )
            })
            .collect();
        Self::new(triangles, Vec4::point(0.0, 0.0, 0.0))
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn center(&self) -> Vec4 {
        self.center
    }

    /// Returns a translated copy; the rotation pivot moves with the mesh.
    pub fn translate(&self, x: f32, y: f32, z: f32) -> Self {
        Self {
            triangles: self.apply(Mat4::translation(x, y, z)),
            center: Vec4::point(self.center.x + x, self.center.y + y, self.center.z + z),
        }
    }

    /// Returns a copy rotated around the X axis about the mesh's own
    /// center. The pivot is unchanged.
    pub fn rotate_x(&self, angle: f32) -> Self {
        Self {
            triangles: self.apply(Mat4::rotation_x_about(angle, self.center)),
            center: self.center,
        }
    }

    /// Returns a copy rotated around the Y axis about the mesh's own center.
    pub fn rotate_y(&self, angle: f32) -> Self {
        Self {
            triangles: self.apply(Mat4::rotation_y_about(angle, self.center)),
            center: self.center,
        }
    }

    /// Returns a copy rotated around the Z axis about the mesh's own center.
    pub fn rotate_z(&self, angle: f32) -> Self {
        Self {
            triangles: self.apply(Mat4::rotation_z_about(angle, self.center)),
            center: self.center,
        }
    }

    fn apply(&self, mat: Mat4) -> Vec<Triangle> {
        self.triangles
            .iter()
            .map(|tri| tri.transformed(mat))
            .collect()
    }
}

fn parse_fields<T: Copy>(
    mut fields: std::str::SplitWhitespace<'_>,
    line: usize,
    record: &'static str,
    parse: fn(&str, usize) -> Result<T, LoadError>,
) -> Result<[T; 3], LoadError> {
    let mut next = || {
        fields
            .next()
            .ok_or(LoadError::MissingFields { line, record })
            .and_then(|tok| parse(tok, line))
    };
    Ok([next()?, next()?, next()?])
}

fn parse_coord(token: &str, line: usize) -> Result<f32, LoadError> {
    token.parse().map_err(|_| LoadError::BadNumber {
        line,
        token: token.to_string(),
    })
}

fn parse_index(token: &str, line: usize) -> Result<usize, LoadError> {
    token.parse().map_err(|_| LoadError::BadNumber {
        line,
        token: token.to_string(),
    })
}

pub const CUBE_VERTICES: [Vec4; 8] = [
    Vec4::point(-1.0, -1.0, -1.0),
    Vec4::point(-1.0, 1.0, -1.0),
    Vec4::point(1.0, 1.0, -1.0),
    Vec4::point(1.0, -1.0, -1.0),
    Vec4::point(1.0, 1.0, 1.0),
    Vec4::point(1.0, -1.0, 1.0),
    Vec4::point(-1.0, 1.0, 1.0),
    Vec4::point(-1.0, -1.0, 1.0),
];

/// Clockwise-wound faces, 1-based as in the text format.
pub const CUBE_FACES: [[usize; 3]; 12] = [
    // Front face
    [1, 2, 3],
    [1, 3, 4],
    // Right face
    [4, 3, 5],
    [4, 5, 6],
    // Back face
    [6, 5, 7],
    [6, 7, 8],
    // Left face
    [8, 7, 2],
    [8, 2, 1],
    // Top face
    [2, 7, 5],
    [2, 5, 3],
    // Bottom face
    [6, 8, 1],
    [6, 1, 4],
];
