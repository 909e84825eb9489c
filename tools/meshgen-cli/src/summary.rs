//! JSON summary printed when no output file is given

use meshgen::{BoundingBox, Primitive};
use serde::Serialize;

use crate::commands::Generated;

#[derive(Debug, Serialize)]
pub struct MeshSummary {
    pub shape: &'static str,
    pub vertices: usize,
    pub triangles: usize,
    pub normals: usize,
    pub tex_coords: usize,
    pub primitive: Primitive,
    pub bounding_box: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wireframe_lines: Option<usize>,
}

impl MeshSummary {
    pub fn new(generated: &Generated) -> Self {
        let mesh = &generated.mesh;
        Self {
            shape: generated.name,
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            normals: mesh.normals.len(),
            tex_coords: mesh.tex_coords.len(),
            primitive: mesh.primitive,
            bounding_box: mesh.bounding_box,
            wireframe_lines: generated.wireframe.as_ref().map(|lines| lines.line_count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshgen::MeshGenerator;

    #[test]
    fn test_summary_json() {
        let mesh = MeshGenerator::new()
            .generate_sphere(1.0, false)
            .unwrap();
        let generated = Generated {
            name: "sphere",
            mesh,
            wireframe: None,
        };

        let value = serde_json::to_value(MeshSummary::new(&generated)).unwrap();
        assert_eq!(value["shape"], "sphere");
        assert_eq!(value["vertices"], 182);
        assert_eq!(value["triangles"], 360);
        assert_eq!(value["primitive"]["type"], "sphere");
        assert!(value.get("wireframe_lines").is_none());
        assert_eq!(value["bounding_box"]["max"][1], 1.0);
    }
}
