//! Crease-angle normal generation
//!
//! Computes per-corner normals for an indexed mesh. Triangles that meet at a
//! vertex share a smoothed normal when the angle between their face normals is
//! below the crease angle; otherwise the edge stays hard.

use glam::Vec3;
use hashbrown::HashMap;
use tracing::debug;

use crate::types::Mesh;

/// Slack on the crease comparison; faces meeting at exactly the crease angle
/// stay separated
const CREASE_EPSILON: f32 = 1.0e-5;

/// Normal generator with reusable scratch buffers
#[derive(Debug, Default)]
pub struct NormalFilter {
    face_normals: Vec<Vec3>,
    vertex_faces: Vec<Vec<u32>>,
    lookup: HashMap<[u32; 3], u32>,
}

impl NormalFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `mesh.normals` / `mesh.normal_indices` with crease-angle normals
    ///
    /// `crease_angle` is in radians: 0 gives one normal per face, π smooths
    /// across every edge.
    pub fn generate_normals(&mut self, mesh: &mut Mesh, crease_angle: f64) {
        mesh.normals.clear();
        mesh.normal_indices.clear();
        if mesh.triangles.is_empty() {
            return;
        }

        self.compute_face_normals(mesh);
        self.collect_vertex_faces(mesh);
        self.lookup.clear();

        let cos_crease = (crease_angle as f32).cos();
        mesh.normal_indices.reserve(mesh.triangles.len() * 3);

        for (face, triangle) in mesh.triangles.iter().enumerate() {
            let own = self.face_normals[face];
            for &vertex in triangle {
                let mut sum = own;
                for &other in &self.vertex_faces[vertex as usize] {
                    if other as usize == face {
                        continue;
                    }
                    let normal = self.face_normals[other as usize];
                    if own.dot(normal) > cos_crease + CREASE_EPSILON {
                        sum += normal;
                    }
                }
                let normal = sum.try_normalize().unwrap_or(own);
                let index = self.intern(&mut mesh.normals, normal);
                mesh.normal_indices.push(index);
            }
        }

        debug!(
            "generated {} normals for {} triangles (crease angle {:.3})",
            mesh.normals.len(),
            mesh.triangles.len(),
            crease_angle
        );
    }

    fn compute_face_normals(&mut self, mesh: &Mesh) {
        self.face_normals.clear();
        self.face_normals.extend(mesh.triangles.iter().map(|t| {
            let [a, b, c] = t.map(|i| mesh.vertices[i as usize]);
            (b - a).cross(c - a).normalize_or_zero()
        }));
    }

    fn collect_vertex_faces(&mut self, mesh: &Mesh) {
        for faces in &mut self.vertex_faces {
            faces.clear();
        }
        if self.vertex_faces.len() < mesh.vertices.len() {
            self.vertex_faces.resize_with(mesh.vertices.len(), Vec::new);
        }
        for (face, triangle) in mesh.triangles.iter().enumerate() {
            for &vertex in triangle {
                let faces = &mut self.vertex_faces[vertex as usize];
                // A degenerate triangle may repeat a vertex
                if faces.last() != Some(&(face as u32)) {
                    faces.push(face as u32);
                }
            }
        }
    }

    /// Index of `normal` in `normals`, appending it if it is new
    fn intern(&mut self, normals: &mut Vec<Vec3>, normal: Vec3) -> u32 {
        // + 0.0 folds -0.0 into 0.0 so both hash alike
        let key = (normal + Vec3::ZERO).to_array().map(f32::to_bits);
        *self.lookup.entry(key).or_insert_with(|| {
            normals.push(normal);
            (normals.len() - 1) as u32
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// Two triangles folded 90 degrees along the shared edge (0, 1)
    fn folded_quad() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0, 0.0, -1.0));
        mesh.add_triangle(0, 1, 2); // +Z
        mesh.add_triangle(0, 1, 3); // +Y
        mesh
    }

    #[test]
    fn test_zero_crease_is_faceted() {
        let mut mesh = folded_quad();
        NormalFilter::new().generate_normals(&mut mesh, 0.0);

        assert_eq!(mesh.normals.len(), 2);
        assert_eq!(mesh.normal_indices.len(), 6);
        assert!(mesh.normal_for_corner(0, 0).unwrap().abs_diff_eq(Vec3::Z, 1e-6));
        assert!(mesh.normal_for_corner(1, 0).unwrap().abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_right_angle_stays_hard_at_half_pi() {
        let mut mesh = folded_quad();
        NormalFilter::new().generate_normals(&mut mesh, PI / 2.0);
        assert_eq!(mesh.normals.len(), 2);
    }

    #[test]
    fn test_full_crease_smooths_shared_vertices() {
        let mut mesh = folded_quad();
        NormalFilter::new().generate_normals(&mut mesh, PI);

        let shared = mesh.normal_for_corner(0, 0).unwrap();
        let expected = (Vec3::Y + Vec3::Z).normalize();
        assert!(shared.abs_diff_eq(expected, 1e-6));
        // Unshared corners keep their face normal
        assert!(mesh.normal_for_corner(0, 2).unwrap().abs_diff_eq(Vec3::Z, 1e-6));
        assert!(mesh.normal_for_corner(1, 2).unwrap().abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mut mesh = folded_quad();
        NormalFilter::new().generate_normals(&mut mesh, PI);
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_filter_reuse_across_meshes() {
        let mut filter = NormalFilter::new();
        let mut big = folded_quad();
        filter.generate_normals(&mut big, PI);

        let mut small = Mesh::new();
        small.add_vertex(Vec3::ZERO);
        small.add_vertex(Vec3::X);
        small.add_vertex(Vec3::Y);
        small.add_triangle(0, 1, 2);
        filter.generate_normals(&mut small, PI);

        assert_eq!(small.normals, vec![Vec3::Z]);
        assert_eq!(small.normal_indices, vec![0, 0, 0]);
    }

    #[test]
    fn test_empty_mesh() {
        let mut mesh = Mesh::new();
        NormalFilter::new().generate_normals(&mut mesh, PI);
        assert!(mesh.normals.is_empty());
        assert!(mesh.normal_indices.is_empty());
    }
}
