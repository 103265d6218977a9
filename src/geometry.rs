/// Collision primitives.
///
/// One convention crate-wide: a `BoundingBox`'s `x`/`y` is the **center**
/// of the rectangle, not a corner.  Anything described by top-left data
/// (level layouts, hand-placed obstacles) goes through `from_top_left`
/// at construction so every intersection test sees the same convention.

use crate::entities::{Obstacle, ObstacleKind};

/// Transient center-based box used for intersection queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        BoundingBox { x, y, w, h }
    }
}

/// Axis-separation test.  Two boxes intersect unless fully separated on at
/// least one axis; touching edges count as intersecting.
pub fn intersects(a: &BoundingBox, b: &BoundingBox) -> bool {
    let separated = a.x + a.w / 2.0 < b.x - b.w / 2.0
        || a.x - a.w / 2.0 > b.x + b.w / 2.0
        || a.y + a.h / 2.0 < b.y - b.h / 2.0
        || a.y - a.h / 2.0 > b.y + b.h / 2.0;
    !separated
}

/// True if `bb` intersects any obstacle in the slice.
pub fn hits_any(bb: &BoundingBox, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| intersects(bb, &o.bounds()))
}

impl Obstacle {
    /// Adapter for obstacle data given as a top-left rect.  This is the only
    /// place corner coordinates enter the crate; everything downstream is
    /// center-based.
    pub fn from_top_left(x: f32, y: f32, w: f32, h: f32, kind: ObstacleKind) -> Self {
        Obstacle {
            x: x + w / 2.0,
            y: y + h / 2.0,
            w,
            h,
            kind,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.w, self.h)
    }
}
