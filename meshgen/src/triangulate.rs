//! Planar polygon triangulation (ear clipping)
//!
//! Used to close the end caps of extrusions. The polygon is given as indices
//! into a shared position buffer; the output refers to positions *within the
//! polygon* so callers can map them back to whatever index space they use.

use glam::Vec3;
use tracing::warn;

/// Triangulate a planar polygon
///
/// Returns triangles as indices into `polygon` (not into `positions`). The
/// triangles keep the polygon's orientation. A simple polygon with `n`
/// vertices yields `n - 2` triangles; fewer than 3 vertices yield none.
pub fn triangulate(positions: &[Vec3], polygon: &[u32]) -> Vec<[usize; 3]> {
    let n = polygon.len();
    if n < 3 {
        return Vec::new();
    }

    let points: Vec<Vec3> = polygon.iter().map(|&i| positions[i as usize]).collect();
    let normal = polygon_normal(&points);

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let count = remaining.len();
        let ear = (0..count).find(|&i| {
            let prev = remaining[(i + count - 1) % count];
            let curr = remaining[i];
            let next = remaining[(i + 1) % count];
            is_ear(&points, &remaining, prev, curr, next, normal)
        });

        let Some(i) = ear else {
            warn!(
                "ear clipping stuck with {} of {} vertices remaining, using fan triangulation",
                count, n
            );
            break;
        };

        let prev = remaining[(i + count - 1) % count];
        let next = remaining[(i + 1) % count];
        triangles.push([prev, remaining[i], next]);
        remaining.remove(i);
    }

    // Last triangle, or a fan over whatever could not be clipped
    for i in 1..remaining.len() - 1 {
        triangles.push([remaining[0], remaining[i], remaining[i + 1]]);
    }

    triangles
}

/// Unit polygon normal by Newell's method (zero for degenerate input)
fn polygon_normal(points: &[Vec3]) -> Vec3 {
    let mut normal = Vec3::ZERO;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        normal.x += (p.y - q.y) * (p.z + q.z);
        normal.y += (p.z - q.z) * (p.x + q.x);
        normal.z += (p.x - q.x) * (p.y + q.y);
    }
    normal.normalize_or_zero()
}

fn is_ear(
    points: &[Vec3],
    remaining: &[usize],
    prev: usize,
    curr: usize,
    next: usize,
    normal: Vec3,
) -> bool {
    let a = points[prev];
    let b = points[curr];
    let c = points[next];

    // Reflex or degenerate corners are not ears
    let turn = (b - a).cross(c - b);
    if turn.dot(normal) <= 0.0 {
        return false;
    }

    remaining
        .iter()
        .filter(|&&i| i != prev && i != curr && i != next)
        .all(|&i| !point_in_triangle(points[i], a, b, c, normal))
}

/// Whether `p` lies inside or on the triangle `abc` seen along `normal`
fn point_in_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3, normal: Vec3) -> bool {
    let side = |u: Vec3, v: Vec3| (v - u).cross(p - u).dot(normal);
    side(a, b) >= 0.0 && side(b, c) >= 0.0 && side(c, a) >= 0.0
}
