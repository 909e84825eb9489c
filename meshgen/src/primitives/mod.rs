//! Primitive tessellators
//!
//! One routine per parametric shape, implemented on `MeshGenerator` so they
//! share its division number and normal/bounding box settings. All shapes are
//! centered at the origin with Y up, and wind their triangles counter-clockwise
//! seen from outside.
//!
//! | Shape    | Crease angle | Primitive descriptor | UVs |
//! |----------|--------------|----------------------|-----|
//! | box      | 0            | `Box`                | yes |
//! | sphere   | π            | `Sphere`             | yes |
//! | cylinder | π/2          | `Cylinder`           | yes |
//! | cone     | π/2          | `Cone`               | yes |
//! | capsule  | π            | `Capsule`            | no  |
//! | disc     | (flat)       | none                 | no  |
//! | torus    | π            | none                 | no  |
//! | arrow    | (merged)     | none                 | no  |

mod composite;
mod revolved;
mod simple;


/// Face groups of a cylinder to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CylinderFaces {
    pub bottom: bool,
    pub top: bool,
    pub side: bool,
}

impl Default for CylinderFaces {
    fn default() -> Self {
        Self::ALL
    }
}

impl CylinderFaces {
    pub const ALL: Self = Self {
        bottom: true,
        top: true,
        side: true,
    };
}

/// Face groups of a cone to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConeFaces {
    pub bottom: bool,
    pub side: bool,
}

impl Default for ConeFaces {
    fn default() -> Self {
        Self::ALL
    }
}

impl ConeFaces {
    pub const ALL: Self = Self {
        bottom: true,
        side: true,
    };
}
