//! Cross-cutting properties every generator must satisfy

use glam::{DVec2, DVec3, Vec3};
use hashbrown::HashMap;
use meshgen::{
    ConeFaces, CylinderFaces, ElevationGrid, Extrusion, GenerateError, Mesh, MeshGenerator,
    Primitive,
};

fn generator() -> MeshGenerator {
    let mut generator = MeshGenerator::new();
    generator.set_division_number(12);
    generator
}

fn closed_shapes(generator: &mut MeshGenerator) -> Vec<(&'static str, Mesh)> {
    vec![
        ("box", generator.generate_box(DVec3::new(2.0, 2.0, 2.0), true).unwrap()),
        ("sphere", generator.generate_sphere(1.0, true).unwrap()),
        (
            "cylinder",
            generator
                .generate_cylinder(1.0, 2.0, CylinderFaces::ALL, true)
                .unwrap(),
        ),
        (
            "cone",
            generator.generate_cone(1.0, 2.0, ConeFaces::ALL, true).unwrap(),
        ),
        ("capsule", generator.generate_capsule(0.5, 1.0).unwrap()),
    ]
}

fn face_centroid(mesh: &Mesh, triangle: usize) -> Vec3 {
    let [a, b, c] = mesh.triangles[triangle].map(|i| mesh.vertices[i as usize]);
    (a + b + c) / 3.0
}

/// Count of every directed edge in the mesh
fn directed_edges(mesh: &Mesh) -> HashMap<(u32, u32), usize> {
    let mut edges = HashMap::new();
    for &[a, b, c] in &mesh.triangles {
        for edge in [(a, b), (b, c), (c, a)] {
            *edges.entry(edge).or_insert(0) += 1;
        }
    }
    edges
}

#[test]
fn all_indices_are_in_range() {
    let mut generator = generator();
    let mut meshes = closed_shapes(&mut generator);
    meshes.push(("disc", generator.generate_disc(1.0, 0.5).unwrap()));
    meshes.push(("torus", generator.generate_torus(1.0, 0.25).unwrap()));
    meshes.push(("arrow", generator.generate_arrow(0.1, 1.0, 0.2, 0.3).unwrap()));
    meshes.push((
        "extrusion",
        generator.generate_extrusion(&Extrusion::default(), true).unwrap(),
    ));
    meshes.push((
        "elevation grid",
        generator
            .generate_elevation_grid(&ElevationGrid::flat(4, 3), true)
            .unwrap(),
    ));

    for (name, mesh) in &meshes {
        let vertices = mesh.vertex_count() as u32;
        assert!(
            mesh.triangles.iter().flatten().all(|&i| i < vertices),
            "{name}: vertex index out of range"
        );
        assert_eq!(mesh.normal_indices.len(), mesh.triangle_count() * 3, "{name}");
        assert!(
            mesh.normal_indices
                .iter()
                .all(|&i| (i as usize) < mesh.normals.len()),
            "{name}: normal index out of range"
        );
        if mesh.has_tex_coords() {
            assert_eq!(mesh.tex_coord_indices.len(), mesh.triangle_count() * 3, "{name}");
            assert!(
                mesh.tex_coord_indices
                    .iter()
                    .all(|&i| (i as usize) < mesh.tex_coords.len()),
                "{name}: texture coordinate index out of range"
            );
        }
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-4, "{name}: normal {n:?} is not unit length");
        }
    }
}

#[test]
fn closed_primitives_wind_outward() {
    let mut generator = generator();
    for (name, mesh) in closed_shapes(&mut generator) {
        for i in 0..mesh.triangle_count() {
            let outward = face_centroid(&mesh, i);
            assert!(
                mesh.face_normal(i).dot(outward) > 0.0,
                "{name}: triangle {i} faces inward"
            );
        }
    }
}

#[test]
fn closed_primitives_are_watertight() {
    let mut generator = generator();
    for (name, mesh) in closed_shapes(&mut generator) {
        let edges = directed_edges(&mesh);
        for (&(a, b), &count) in &edges {
            assert_eq!(count, 1, "{name}: edge ({a}, {b}) used {count} times");
            assert!(edges.contains_key(&(b, a)), "{name}: edge ({a}, {b}) has no twin");
        }
    }
}

#[test]
fn smooth_normals_point_away_from_center() {
    let mut generator = generator();
    let sphere = generator.generate_sphere(1.0, false).unwrap();
    for (t, triangle) in sphere.triangles.iter().enumerate() {
        for (corner, &v) in triangle.iter().enumerate() {
            let normal = sphere.normal_for_corner(t, corner).unwrap();
            assert!(normal.dot(sphere.vertices[v as usize]) > 0.9);
        }
    }
}

#[test]
fn box_matches_its_size() {
    let mesh = generator().generate_box(DVec3::splat(2.0), false).unwrap();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);

    let bbox = mesh.bounding_box.unwrap();
    assert_eq!(bbox.min, Vec3::splat(-1.0));
    assert_eq!(bbox.max, Vec3::splat(1.0));
}

#[test]
fn sphere_counts_at_default_resolution() {
    let mut generator = MeshGenerator::new();
    let mesh = generator.generate_sphere(1.0, false).unwrap();
    assert_eq!(mesh.vertex_count(), 182);
    assert_eq!(mesh.triangle_count(), 360);
}

#[test]
fn disc_requires_inner_radius_inside_outer() {
    let mut generator = generator();
    assert!(matches!(
        generator.generate_disc(1.0, 0.0),
        Err(GenerateError::InvalidInnerRadius { .. })
    ));
    assert!(matches!(
        generator.generate_disc(1.0, 1.5),
        Err(GenerateError::InvalidInnerRadius { .. })
    ));
}

#[test]
fn capped_extrusion_is_watertight() {
    let mut generator = generator();
    let mesh = generator
        .generate_extrusion(&Extrusion::default(), false)
        .unwrap();

    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);

    let edges = directed_edges(&mesh);
    assert_eq!(edges.len(), 36);
    for (&(a, b), &count) in &edges {
        assert_eq!(count, 1, "edge ({a}, {b}) used {count} times");
        assert!(edges.contains_key(&(b, a)), "edge ({a}, {b}) has no twin");
    }
}

#[test]
fn bent_extrusion_with_concave_cross_section_is_watertight() {
    // L-shaped cross section swept around a corner
    let extrusion = Extrusion {
        spine: vec![
            DVec3::ZERO,
            DVec3::new(0.0, 2.0, 0.0),
            DVec3::new(2.0, 4.0, 0.0),
            DVec3::new(4.0, 4.0, 0.0),
        ],
        cross_section: vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 2.0),
            DVec2::new(1.0, 2.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(0.0, 0.0),
        ],
        ..Extrusion::default()
    };
    let mesh = generator().generate_extrusion(&extrusion, true).unwrap();

    assert_eq!(mesh.vertex_count(), 4 * 6);
    // 3 segments of 6 quads, plus 4 triangles per cap
    assert_eq!(mesh.triangle_count(), 3 * 6 * 2 + 2 * 4);

    let edges = directed_edges(&mesh);
    for (&(a, b), &count) in &edges {
        assert_eq!(count, 1);
        assert!(edges.contains_key(&(b, a)));
    }
}

#[test]
fn torus_station_counts() {
    let mut generator = MeshGenerator::new();

    let full = generator.generate_torus(1.0, 0.25).unwrap();
    assert_eq!(full.vertex_count(), 20 * 5);

    let half = generator
        .generate_torus_arc(1.0, 0.25, 0.0, std::f64::consts::PI)
        .unwrap();
    assert_eq!(half.vertex_count(), 11 * 5);
    assert_eq!(half.triangle_count(), 10 * 5 * 2);
}

#[test]
fn generation_is_idempotent() {
    let mut generator = generator();
    let extrusion = Extrusion {
        crease_angle: 1.0,
        ..Extrusion::default()
    };
    assert_eq!(
        generator.generate_sphere(1.0, true).unwrap(),
        generator.generate_sphere(1.0, true).unwrap()
    );
    assert_eq!(
        generator.generate_extrusion(&extrusion, true).unwrap(),
        generator.generate_extrusion(&extrusion, true).unwrap()
    );
    assert_eq!(
        generator.generate_torus(1.0, 0.3).unwrap(),
        generator.generate_torus(1.0, 0.3).unwrap()
    );
}

#[test]
fn primitive_descriptor_serializes_tagged() {
    let mesh = generator().generate_sphere(1.5, false).unwrap();
    let json = serde_json::to_string(&mesh.primitive).unwrap();
    assert_eq!(json, r#"{"type":"sphere","radius":1.5}"#);

    let parsed: Primitive = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, mesh.primitive);

    let arrow = generator().generate_arrow(0.1, 1.0, 0.2, 0.3).unwrap();
    assert_eq!(arrow.primitive, Primitive::None);
}
