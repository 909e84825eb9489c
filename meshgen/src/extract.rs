//! Mesh extraction
//!
//! Flattens a small hierarchy of shapes and transforms into a single mesh in
//! the root frame. Used to build composite shapes such as the arrow.

use glam::{DAffine3, DMat3, DVec3, Vec3};
use tracing::debug;

use crate::types::Mesh;

/// Node of a shape hierarchy
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    /// Plain grouping node
    Group(Vec<SceneNode>),
    /// Applies `transform` to all of its children
    Transform {
        transform: DAffine3,
        children: Vec<SceneNode>,
    },
    /// Leaf holding a mesh
    Shape(Mesh),
}

impl SceneNode {
    /// Transform node with a pure translation
    pub fn translated(translation: DVec3, children: Vec<SceneNode>) -> Self {
        SceneNode::Transform {
            transform: DAffine3::from_translation(translation),
            children,
        }
    }
}

/// Flatten `root` into one mesh
///
/// Positions are transformed by the accumulated transform and normals by its
/// inverse transpose. Normals and texture coordinates are only kept when
/// every non-empty shape has them. The result never carries a primitive
/// descriptor.
pub fn integrate(root: &SceneNode) -> Mesh {
    let mut shapes = Vec::new();
    collect_shapes(root, DAffine3::IDENTITY, &mut shapes);
    shapes.retain(|(mesh, _)| !mesh.triangles.is_empty());

    let with_normals = !shapes.is_empty() && shapes.iter().all(|(m, _)| m.has_normals());
    let with_tex_coords = !shapes.is_empty() && shapes.iter().all(|(m, _)| m.has_tex_coords());

    let mut result = Mesh::with_capacity(
        shapes.iter().map(|(m, _)| m.vertex_count()).sum(),
        shapes.iter().map(|(m, _)| m.triangle_count()).sum(),
    );

    for (mesh, transform) in &shapes {
        append_shape(&mut result, mesh, transform, with_normals, with_tex_coords);
    }

    debug!(
        "integrate: {} shapes, {} vertices, {} triangles",
        shapes.len(),
        result.vertex_count(),
        result.triangle_count()
    );

    result
}

fn collect_shapes<'a>(node: &'a SceneNode, parent: DAffine3, out: &mut Vec<(&'a Mesh, DAffine3)>) {
    match node {
        SceneNode::Group(children) => {
            for child in children {
                collect_shapes(child, parent, out);
            }
        }
        SceneNode::Transform {
            transform,
            children,
        } => {
            let combined = parent * *transform;
            for child in children {
                collect_shapes(child, combined, out);
            }
        }
        SceneNode::Shape(mesh) => out.push((mesh, parent)),
    }
}

fn append_shape(
    result: &mut Mesh,
    mesh: &Mesh,
    transform: &DAffine3,
    with_normals: bool,
    with_tex_coords: bool,
) {
    let vertex_offset = result.vertices.len() as u32;
    let normal_offset = result.normals.len() as u32;
    let tex_coord_offset = result.tex_coords.len() as u32;

    // A mirroring transform turns the winding inside out
    let flip = transform.matrix3.determinant() < 0.0;
    let corners: [usize; 3] = if flip { [0, 2, 1] } else { [0, 1, 2] };

    result.vertices.extend(
        mesh.vertices
            .iter()
            .map(|v| transform.transform_point3(v.as_dvec3()).as_vec3()),
    );
    for triangle in &mesh.triangles {
        result.triangles.push(corners.map(|c| triangle[c] + vertex_offset));
    }

    if with_normals {
        let normal_matrix = normal_matrix(transform.matrix3);
        result.normals.extend(mesh.normals.iter().map(|n| {
            (normal_matrix * n.as_dvec3())
                .as_vec3()
                .try_normalize()
                .unwrap_or(Vec3::ZERO)
        }));
        for corner in mesh.normal_indices.chunks_exact(3) {
            result
                .normal_indices
                .extend(corners.map(|c| corner[c] + normal_offset));
        }
    }

    if with_tex_coords {
        result.tex_coords.extend_from_slice(&mesh.tex_coords);
        for corner in mesh.tex_coord_indices.chunks_exact(3) {
            result
                .tex_coord_indices
                .extend(corners.map(|c| corner[c] + tex_coord_offset));
        }
    }
}

/// Inverse transpose of the linear part; falls back to the linear part itself
/// when it is singular
fn normal_matrix(linear: DMat3) -> DMat3 {
    if linear.determinant().abs() > f64::EPSILON {
        linear.inverse().transpose()
    } else {
        linear
    }
}
