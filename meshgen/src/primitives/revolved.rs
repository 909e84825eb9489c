//! Surfaces of revolution: cylinder, cone, capsule, torus

use glam::{DVec3, Vec3};
use std::f64::consts::PI;
use tracing::debug;

use super::{ConeFaces, CylinderFaces};
use crate::error::Result;
use crate::generator::{MeshGenerator, check_finite, check_non_negative, lattice_size};
use crate::types::{Mesh, Primitive};
use crate::uv;

/// Point on a Y-up ring of the given radius at `angle` radians from +X toward +Z
fn ring_point(radius: f64, angle: f64, y: f64) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    DVec3::new(radius * cos, y, radius * sin).as_vec3()
}

impl MeshGenerator {
    /// Generate a Y-up cylinder
    ///
    /// # Arguments
    /// * `radius` - Radius (>= 0.0)
    /// * `height` - Height (>= 0.0)
    /// * `faces` - Which of bottom cap, top cap and side to emit
    /// * `with_uv` - Also generate texture coordinates
    ///
    /// # Returns
    /// Mesh with `2 * division_number + 2` vertices (top ring, bottom ring,
    /// top center, bottom center), tagged `Primitive::Cylinder`
    pub fn generate_cylinder(
        &mut self,
        radius: f64,
        height: f64,
        faces: CylinderFaces,
        with_uv: bool,
    ) -> Result<Mesh> {
        check_non_negative("cylinder", "radius", radius)?;
        check_non_negative("cylinder", "height", height)?;

        let n = self.division_number();
        let mut mesh = Mesh::with_capacity(n * 2 + 2, n * 4);
        let y = height / 2.0;

        let ring: Vec<(Vec3, Vec3)> = (0..n)
            .map(|i| {
                let angle = i as f64 * 2.0 * PI / n as f64;
                (ring_point(radius, angle, y), ring_point(radius, angle, -y))
            })
            .collect();
        mesh.vertices.extend(ring.iter().map(|(top, _)| *top));
        mesh.vertices.extend(ring.iter().map(|(_, bottom)| *bottom));

        let top_center = mesh.add_vertex(Vec3::new(0.0, y as f32, 0.0));
        let bottom_center = mesh.add_vertex(Vec3::new(0.0, -y as f32, 0.0));

        let n = n as u32;
        for i in 0..n {
            let next = (i + 1) % n;
            if faces.top {
                mesh.add_triangle(top_center, next, i);
            }
            if faces.side {
                mesh.add_triangle(i, next + n, i + n);
                mesh.add_triangle(i, next, next + n);
            }
            if faces.bottom {
                mesh.add_triangle(bottom_center, i + n, next + n);
            }
        }

        mesh.primitive = Primitive::Cylinder { radius, height };

        self.update_bounding_box(&mut mesh);
        self.generate_normals(&mut mesh, PI / 2.0);

        if with_uv {
            uv::cylinder_tex_coords(&mut mesh);
        }

        Ok(mesh)
    }

    /// Generate a Y-up cone with its apex at `+height / 2`
    ///
    /// # Returns
    /// Mesh with `division_number + 2` vertices (base ring, apex, base center),
    /// tagged `Primitive::Cone`
    pub fn generate_cone(
        &mut self,
        radius: f64,
        height: f64,
        faces: ConeFaces,
        with_uv: bool,
    ) -> Result<Mesh> {
        check_non_negative("cone", "radius", radius)?;
        check_non_negative("cone", "height", height)?;

        let n = self.division_number();
        let mut mesh = Mesh::with_capacity(n + 2, n * 2);
        let y = height / 2.0;

        for i in 0..n {
            let angle = i as f64 * 2.0 * PI / n as f64;
            mesh.add_vertex(ring_point(radius, angle, -y));
        }

        let apex = mesh.add_vertex(Vec3::new(0.0, y as f32, 0.0));
        let bottom_center = mesh.add_vertex(Vec3::new(0.0, -y as f32, 0.0));

        let n = n as u32;
        for i in 0..n {
            let next = (i + 1) % n;
            if faces.side {
                mesh.add_triangle(apex, next, i);
            }
            if faces.bottom {
                mesh.add_triangle(bottom_center, i, next);
            }
        }

        mesh.primitive = Primitive::Cone { radius, height };

        self.update_bounding_box(&mut mesh);
        self.generate_normals(&mut mesh, PI / 2.0);

        if with_uv {
            uv::cone_tex_coords(&mut mesh);
        }

        Ok(mesh)
    }

    /// Generate a Y-up capsule: two hemispheres joined by a cylindrical band
    ///
    /// `height` is the length of the cylindrical part; the total extent along
    /// Y is `height + 2 * radius`. The latitude band count is rounded up to an
    /// even number so both hemispheres get the same rings.
    ///
    /// # Returns
    /// Mesh with `vdn * hdn + 2` vertices, tagged `Primitive::Capsule`. No UVs.
    pub fn generate_capsule(&mut self, radius: f64, height: f64) -> Result<Mesh> {
        check_non_negative("capsule", "radius", radius)?;
        check_non_negative("capsule", "height", height)?;

        let mut vdn = self.division_number() / 2;
        if vdn % 2 == 1 {
            vdn += 1;
        }
        let hdn = self.division_number();

        let mut mesh = Mesh::with_capacity(vdn * hdn + 2, vdn * hdn * 2);

        for i in 1..=vdn {
            // The equator ring appears twice, once per hemisphere
            let (y, tv) = if i <= vdn / 2 {
                (height / 2.0, i as f64 * PI / vdn as f64)
            } else {
                (-height / 2.0, (i - 1) as f64 * PI / vdn as f64)
            };
            for j in 0..hdn {
                let th = j as f64 * 2.0 * PI / hdn as f64;
                mesh.add_vertex(
                    DVec3::new(
                        radius * tv.sin() * th.cos(),
                        radius * tv.cos() + y,
                        radius * tv.sin() * th.sin(),
                    )
                    .as_vec3(),
                );
            }
        }

        let top = mesh.add_vertex(Vec3::new(0.0, (radius + height / 2.0) as f32, 0.0));
        let bottom = mesh.add_vertex(Vec3::new(0.0, (-radius - height / 2.0) as f32, 0.0));

        let vdn = vdn as u32;
        let hdn = hdn as u32;

        for i in 0..hdn {
            mesh.add_triangle(top, (i + 1) % hdn, i);
        }

        for band in 0..vdn.saturating_sub(1) {
            let upper = band * hdn;
            let lower = (band + 1) * hdn;
            for j in 0..hdn {
                let next = (j + 1) % hdn;
                mesh.add_triangle(j + upper, next + lower, j + lower);
                mesh.add_triangle(j + upper, next + upper, next + lower);
            }
        }

        let offset = vdn.saturating_sub(1) * hdn;
        for i in 0..hdn {
            mesh.add_triangle(bottom, i + offset, (i + 1) % hdn + offset);
        }

        mesh.primitive = Primitive::Capsule { radius, height };

        self.update_bounding_box(&mut mesh);
        self.generate_normals(&mut mesh, PI);

        Ok(mesh)
    }

    /// Generate a full torus in the XZ plane
    pub fn generate_torus(&mut self, radius: f64, cross_section_radius: f64) -> Result<Mesh> {
        self.generate_torus_arc(radius, cross_section_radius, 0.0, 2.0 * PI)
    }

    /// Generate a torus swept from `begin_angle` to `end_angle` (radians)
    ///
    /// The number of stations along the ring is `division_number * end_angle / 2π`
    /// (truncated), plus one when the sweep is partial so both ends get a ring.
    /// A partial torus is an open tube: its ends are not capped. The cross
    /// section uses `division_number / 4` steps.
    pub fn generate_torus_arc(
        &mut self,
        radius: f64,
        cross_section_radius: f64,
        begin_angle: f64,
        end_angle: f64,
    ) -> Result<Mesh> {
        check_non_negative("torus", "radius", radius)?;
        check_non_negative("torus", "cross_section_radius", cross_section_radius)?;
        check_finite("torus", "begin_angle", begin_angle)?;
        check_finite("torus", "end_angle", end_angle)?;

        let n = self.division_number();
        let is_partial = begin_angle > 0.0 || end_angle < 2.0 * PI;
        let mut phi_stations = (n as f64 * end_angle / (2.0 * PI)).max(0.0) as usize;
        let phi_step = if phi_stations > 0 {
            (end_angle - begin_angle) / phi_stations as f64
        } else {
            0.0
        };
        if is_partial {
            phi_stations = phi_stations.saturating_add(1);
        }
        let theta_stations = n / 4;
        let vertex_count = lattice_size("torus", phi_stations, theta_stations)?;

        debug!(
            "generate_torus: {} x {} stations (partial: {})",
            phi_stations, theta_stations, is_partial
        );

        let mut mesh = Mesh::with_capacity(vertex_count, vertex_count.saturating_mul(2));

        for i in 0..phi_stations {
            let phi = begin_angle + i as f64 * phi_step;
            for j in 0..theta_stations {
                let theta = j as f64 * 2.0 * PI / theta_stations as f64;
                let r = cross_section_radius * theta.cos() + radius;
                mesh.add_vertex(
                    DVec3::new(
                        phi.cos() * r,
                        cross_section_radius * theta.sin(),
                        phi.sin() * r,
                    )
                    .as_vec3(),
                );
            }
        }

        let phi_stations = phi_stations as u32;
        let theta_stations = theta_stations as u32;
        let segments = if is_partial {
            phi_stations.saturating_sub(1)
        } else {
            phi_stations
        };

        for i in 0..segments {
            let current = i * theta_stations;
            let next = ((i + 1) % phi_stations) * theta_stations;
            for j in 0..theta_stations {
                let j_next = (j + 1) % theta_stations;
                mesh.add_triangle(current + j, next + j_next, next + j);
                mesh.add_triangle(current + j, current + j_next, next + j_next);
            }
        }

        self.update_bounding_box(&mut mesh);
        self.generate_normals(&mut mesh, PI);

        Ok(mesh)
    }
}
