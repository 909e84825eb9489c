//! Composite shapes built from other primitives

use glam::DVec3;

use super::{ConeFaces, CylinderFaces};
use crate::error::Result;
use crate::extract::{SceneNode, integrate};
use crate::generator::MeshGenerator;
use crate::types::Mesh;

impl MeshGenerator {
    /// Generate a Y-up arrow: a cylindrical shaft with a cone on top
    ///
    /// The shaft is centered at the origin and has no top cap; the cone base
    /// sits on the shaft's top. Both parts are merged into one mesh with no
    /// primitive descriptor.
    pub fn generate_arrow(
        &mut self,
        cylinder_radius: f64,
        cylinder_height: f64,
        cone_radius: f64,
        cone_height: f64,
    ) -> Result<Mesh> {
        let cone = self.generate_cone(cone_radius, cone_height, ConeFaces::ALL, false)?;
        let cylinder = self.generate_cylinder(
            cylinder_radius,
            cylinder_height,
            CylinderFaces {
                top: false,
                ..CylinderFaces::ALL
            },
            false,
        )?;

        let offset = DVec3::new(0.0, cylinder_height / 2.0 + cone_height / 2.0, 0.0);
        let root = SceneNode::Group(vec![
            SceneNode::translated(offset, vec![SceneNode::Shape(cone)]),
            SceneNode::Shape(cylinder),
        ]);

        let mut mesh = integrate(&root);
        self.update_bounding_box(&mut mesh);

        Ok(mesh)
    }
}
