//! Simple primitives: box, sphere, disc

use glam::{DVec3, Vec3};
use std::f64::consts::PI;
use tracing::warn;

use crate::error::{GenerateError, Result};
use crate::generator::{MeshGenerator, check_non_negative};
use crate::types::{Mesh, Primitive};
use crate::uv;

impl MeshGenerator {
    /// Generate an axis-aligned box with faceted normals
    ///
    /// # Arguments
    /// * `size` - Full extents along X, Y and Z (each >= 0.0)
    /// * `with_uv` - Also generate texture coordinates
    ///
    /// # Returns
    /// Mesh with 8 vertices and 12 triangles, tagged `Primitive::Box`
    pub fn generate_box(&mut self, size: DVec3, with_uv: bool) -> Result<Mesh> {
        check_non_negative("box", "size.x", size.x)?;
        check_non_negative("box", "size.y", size.y)?;
        check_non_negative("box", "size.z", size.z)?;

        let half = (size * 0.5).as_vec3();
        let (x, y, z) = (half.x, half.y, half.z);

        let mut mesh = Mesh {
            vertices: vec![
                Vec3::new(x, y, z),
                Vec3::new(-x, y, z),
                Vec3::new(-x, -y, z),
                Vec3::new(x, -y, z),
                Vec3::new(x, y, -z),
                Vec3::new(-x, y, -z),
                Vec3::new(-x, -y, -z),
                Vec3::new(x, -y, -z),
            ],
            triangles: vec![
                [0, 1, 2], [2, 3, 0], // +Z
                [0, 5, 1], [0, 4, 5], // +Y
                [1, 5, 6], [1, 6, 2], // -X
                [2, 6, 7], [2, 7, 3], // -Y
                [3, 7, 4], [3, 4, 0], // +X
                [4, 6, 5], [4, 7, 6], // -Z
            ],
            primitive: Primitive::Box { size },
            ..Mesh::default()
        };

        self.update_bounding_box(&mut mesh);
        self.generate_normals(&mut mesh, 0.0);

        if with_uv {
            uv::box_tex_coords(&mut mesh);
        }

        Ok(mesh)
    }

    /// Generate a UV sphere with smooth normals
    ///
    /// Uses `division_number / 2` latitude bands and `division_number`
    /// longitude steps, with a single vertex at each pole.
    ///
    /// # Returns
    /// Mesh with `(vdn - 1) * hdn + 2` vertices and `2 * (vdn - 1) * hdn`
    /// triangles, tagged `Primitive::Sphere`. Fails if `radius < 0` or the division number
    /// is below 4.
    pub fn generate_sphere(&mut self, radius: f64, with_uv: bool) -> Result<Mesh> {
        check_non_negative("sphere", "radius", radius)?;
        let division_number = self.division_number();
        if division_number < 4 {
            warn!(
                "generate_sphere: division number must be >= 4, got {}",
                division_number
            );
            return Err(GenerateError::TooFewDivisions {
                shape: "sphere",
                division_number,
                minimum: 4,
            });
        }

        let vdn = division_number / 2; // latitude bands
        let hdn = division_number; // longitude steps

        let mut mesh = Mesh::with_capacity((vdn - 1) * hdn + 2, 2 * (vdn - 1) * hdn);

        for i in 1..vdn {
            let tv = i as f64 * PI / vdn as f64;
            for j in 0..hdn {
                let th = j as f64 * 2.0 * PI / hdn as f64;
                mesh.add_vertex(
                    DVec3::new(
                        radius * tv.sin() * th.cos(),
                        radius * tv.cos(),
                        radius * tv.sin() * th.sin(),
                    )
                    .as_vec3(),
                );
            }
        }

        let top = mesh.add_vertex(Vec3::new(0.0, radius as f32, 0.0));
        let bottom = mesh.add_vertex(Vec3::new(0.0, -radius as f32, 0.0));

        let hdn = hdn as u32;

        // Top cap fan
        for i in 0..hdn {
            mesh.add_triangle(top, (i + 1) % hdn, i);
        }

        // Bands, two triangles per quad
        for band in 0..(vdn as u32 - 2) {
            let upper = band * hdn;
            let lower = (band + 1) * hdn;
            for j in 0..hdn {
                let next = (j + 1) % hdn;
                mesh.add_triangle(j + upper, next + lower, j + lower);
                mesh.add_triangle(j + upper, next + upper, next + lower);
            }
        }

        // Bottom cap fan
        let offset = (vdn as u32 - 2) * hdn;
        for i in 0..hdn {
            mesh.add_triangle(bottom, i + offset, (i + 1) % hdn + offset);
        }

        mesh.primitive = Primitive::Sphere { radius };

        self.update_bounding_box(&mut mesh);
        self.generate_normals(&mut mesh, PI);

        if with_uv {
            uv::sphere_tex_coords(&mut mesh, radius);
        }

        Ok(mesh)
    }

    /// Generate a flat annulus in the XZ plane facing +Y
    ///
    /// All triangles share one normal, so the normal filter is bypassed and
    /// the normal is written even when normal generation is disabled.
    ///
    /// # Returns
    /// Mesh with `2 * division_number` vertices and as many triangles. Fails
    /// unless `0 < inner_radius < radius`.
    pub fn generate_disc(&mut self, radius: f64, inner_radius: f64) -> Result<Mesh> {
        if !(inner_radius > 0.0 && radius > inner_radius) {
            warn!(
                "generate_disc: inner radius must be in (0, radius), got {} (radius {})",
                inner_radius, radius
            );
            return Err(GenerateError::InvalidInnerRadius {
                radius,
                inner_radius,
            });
        }

        let n = self.division_number();
        let mut mesh = Mesh::with_capacity(n * 2, n * 2);

        for i in 0..n {
            let angle = i as f64 * 2.0 * PI / n as f64;
            let (z, x) = angle.sin_cos();
            mesh.add_vertex(DVec3::new(inner_radius * x, 0.0, inner_radius * z).as_vec3());
            mesh.add_vertex(DVec3::new(radius * x, 0.0, radius * z).as_vec3());
        }

        let n = n as u32;
        for i in 0..n {
            let current = i * 2;
            let next = ((i + 1) % n) * 2;
            mesh.add_triangle(current, next + 1, current + 1);
            mesh.add_triangle(current, next, next + 1);
        }

        mesh.normals = vec![Vec3::Y];
        mesh.normal_indices = vec![0; mesh.triangles.len() * 3];

        self.update_bounding_box(&mut mesh);

        Ok(mesh)
    }
}
