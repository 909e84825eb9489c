//! Mesh types
//!
//! Shared types produced by every generator: the owned `Mesh` buffer, the
//! primitive descriptor attached to it, and small helper types.

use bytemuck::cast_slice;
use glam::{DVec3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Shape parameters of the parametric primitive a mesh was generated from
///
/// Downstream consumers can use this to treat a mesh as an exact analytic
/// shape (e.g. "sphere of radius R") instead of an arbitrary triangle soup.
/// It is only valid while the geometry is untouched; anything that edits the
/// mesh must reset it to `Primitive::None`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    /// Arbitrary mesh, no analytic shape
    #[default]
    None,
    /// Axis-aligned box centered at the origin
    Box { size: DVec3 },
    /// Sphere centered at the origin
    Sphere { radius: f64 },
    /// Y-up cylinder centered at the origin
    Cylinder { radius: f64, height: f64 },
    /// Y-up cone centered at the origin (apex at `+height / 2`)
    Cone { radius: f64, height: f64 },
    /// Y-up capsule; `height` is the length of the cylindrical part
    Capsule { radius: f64, height: f64 },
}

impl Primitive {
    /// Whether this descriptor names an analytic shape
    pub fn is_some(&self) -> bool {
        !matches!(self, Primitive::None)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Compute the box enclosing `points`, or `None` if there are none
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = Self {
            min: *first,
            max: *first,
        };
        for p in rest {
            bbox.min = bbox.min.min(*p);
            bbox.max = bbox.max.max(*p);
        }
        Some(bbox)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Whether `p` lies inside the box, allowing `eps` of slack on every side
    pub fn contains(&self, p: Vec3, eps: f32) -> bool {
        p.cmpge(self.min - Vec3::splat(eps)).all() && p.cmple(self.max + Vec3::splat(eps)).all()
    }
}

/// Generated mesh buffer
///
/// Positions and triangles are always present. Normals and texture
/// coordinates each come with their own per-corner index stream
/// (`3 * triangle_count()` entries) so that seams can split attributes
/// without splitting geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions; order defines index meaning
    pub vertices: Vec<Vec3>,
    /// Triangles as vertex index triples, counter-clockwise seen from outside
    pub triangles: Vec<[u32; 3]>,
    /// Normal table (empty if normals were not generated)
    pub normals: Vec<Vec3>,
    /// Normal table index per triangle corner
    pub normal_indices: Vec<u32>,
    /// Texture coordinate table (empty if UVs were not generated)
    pub tex_coords: Vec<Vec2>,
    /// Texture coordinate table index per triangle corner
    pub tex_coord_indices: Vec<u32>,
    /// Analytic shape this mesh was generated from
    pub primitive: Primitive,
    /// Bounds of `vertices`, if they have been computed
    pub bounding_box: Option<BoundingBox>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for the given number of vertices and triangles
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
            ..Self::default()
        }
    }

    /// Add a vertex, returning its index
    pub fn add_vertex(&mut self, position: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Add a triangle using three vertex indices
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.triangles.push([i0, i1, i2]);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_tex_coords(&self) -> bool {
        !self.tex_coords.is_empty()
    }

    /// Triangle vertex indices flattened into one index per corner
    pub fn corner_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.triangles.iter().flatten().copied()
    }

    /// Normal of corner `corner` (0..3) of triangle `triangle`
    pub fn normal_for_corner(&self, triangle: usize, corner: usize) -> Option<Vec3> {
        let index = *self.normal_indices.get(triangle * 3 + corner)?;
        self.normals.get(index as usize).copied()
    }

    /// Texture coordinate of corner `corner` (0..3) of triangle `triangle`
    pub fn tex_coord_for_corner(&self, triangle: usize, corner: usize) -> Option<Vec2> {
        let index = *self.tex_coord_indices.get(triangle * 3 + corner)?;
        self.tex_coords.get(index as usize).copied()
    }

    /// Unit normal of a triangle computed from its positions
    ///
    /// # Panics
    ///
    /// Panics if `triangle` is out of range or the triangle references a
    /// vertex that does not exist.
    pub fn face_normal(&self, triangle: usize) -> Vec3 {
        let [a, b, c] = self.triangles[triangle].map(|i| self.vertices[i as usize]);
        (b - a).cross(c - a).normalize_or_zero()
    }

    /// Recompute `bounding_box` from the current vertices
    pub fn update_bounding_box(&mut self) {
        self.bounding_box = BoundingBox::from_points(&self.vertices);
    }

    /// Forget the analytic shape (call after editing the geometry)
    pub fn clear_primitive(&mut self) {
        self.primitive = Primitive::None;
    }

    /// Positions as raw bytes (`[f32; 3]` per vertex) for upload to a renderer
    pub fn position_bytes(&self) -> &[u8] {
        cast_slice(&self.vertices)
    }

    /// Triangle indices as raw bytes (`u32` per corner) for upload to a renderer
    pub fn index_bytes(&self) -> &[u8] {
        cast_slice(&self.triangles)
    }
}

/// Indexed line set (wireframe)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSet {
    pub vertices: Vec<Vec3>,
    pub lines: Vec<[u32; 2]>,
}

impl LineSet {
    pub fn add_line(&mut self, i0: u32, i1: u32) {
        self.lines.push([i0, i1]);
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
