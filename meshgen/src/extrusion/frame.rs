//! Local coordinate frames along an extrusion spine
//!
//! Every spine station gets a rotation whose Y axis follows the spine tangent.
//! Where the spine bends, Z is the bend plane normal; on straight runs the
//! nearest previously defined Z is carried forward, and its sign is kept
//! continuous so the cross section does not flip. A spine that never bends
//! gets the minimal rotation of +Y onto its tangent instead.

use glam::{DMat3, DQuat, DVec3};
use tracing::debug;

/// Unit tangent, or +Y when the spine points coincide
fn unit_tangent(y: DVec3) -> DVec3 {
    y.try_normalize().unwrap_or_else(|| {
        debug!("extrusion: zero-length spine tangent, using +Y");
        DVec3::Y
    })
}

/// Rotation taking +Y onto `y` about the axis perpendicular to both
fn minimal_rotation(y: DVec3) -> DMat3 {
    DMat3::from_quat(DQuat::from_rotation_arc(DVec3::Y, y))
}

/// Tangent and bend normal at station `i` (the normal may be zero)
fn station_axes(spine: &[DVec3], closed: bool, i: usize) -> (DVec3, DVec3) {
    let n = spine.len();
    let (prev, curr, next, tangent) = if i == 0 {
        if closed {
            let (a, b, c) = (spine[n - 1], spine[0], spine[1]);
            (a, b, c, c - a)
        } else {
            let (a, b, c) = (spine[0], spine[1], spine[2]);
            (a, b, c, b - a)
        }
    } else if i == n - 1 {
        if closed {
            let (a, b, c) = (spine[n - 2], spine[n - 1], spine[0]);
            (a, b, c, c - a)
        } else {
            let (a, b, c) = (spine[n - 3], spine[n - 2], spine[n - 1]);
            (a, b, c, c - b)
        }
    } else {
        let (a, b, c) = (spine[i - 1], spine[i], spine[i + 1]);
        (a, b, c, c - a)
    };
    (tangent, (next - curr).cross(prev - curr))
}

/// Rotation of the cross section plane at every station of `spine`
///
/// `spine` must hold at least 2 points with any closing duplicate removed;
/// `closed` says whether it loops back to its first point.
pub(crate) fn spine_frames(spine: &[DVec3], closed: bool) -> Vec<DMat3> {
    let n = spine.len();

    if n < 3 {
        let rotation = minimal_rotation(unit_tangent(spine[1] - spine[0]));
        return vec![rotation; n];
    }

    let mut tangents = Vec::with_capacity(n);
    let mut normals = Vec::with_capacity(n);
    let mut first_defined = None;
    let mut previous = DVec3::ZERO;

    for i in 0..n {
        let (tangent, mut normal) = station_axes(spine, closed, i);
        if normal == DVec3::ZERO {
            if first_defined.is_some() {
                normal = previous;
            }
        } else {
            first_defined.get_or_insert(i);
            previous = normal;
        }
        tangents.push(tangent);
        normals.push(normal);
    }

    let Some(first) = first_defined else {
        debug!("extrusion: spine is straight, using minimal rotation frames");
        return tangents
            .into_iter()
            .map(|y| minimal_rotation(unit_tangent(y)))
            .collect();
    };

    let mut frames = Vec::with_capacity(n);
    for i in 0..n {
        if i < first {
            normals[i] = normals[first];
        }
        if i > 0 && normals[i].dot(normals[i - 1]) < 0.0 {
            normals[i] = -normals[i];
        }
        let y = unit_tangent(tangents[i]);
        let z = normals[i].normalize();
        frames.push(DMat3::from_cols(y.cross(z), y, z));
    }
    frames
}
