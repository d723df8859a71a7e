//=========================================================================
// Geometry
//=========================================================================
//
// World-space axis-aligned rectangles.
//
// Convention: Y-up. `x`/`y` name the bottom-left corner, so `top()` is
// `y + height`. Trigger zones, hitboxes and tile queries all share it.
//
//=========================================================================

//=== Rect ================================================================

/// Axis-aligned box in world space (Y-up, origin at bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    //--- Construction -----------------------------------------------------

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Builds a rectangle of the given size centred on `(cx, cy)`.
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    //--- Edges ------------------------------------------------------------

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    //--- Queries ----------------------------------------------------------

    /// Strict AABB overlap. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.bottom() < other.top()
            && self.top() > other.bottom()
    }

    /// Euclidean distance between the two centres.
    pub fn center_distance(&self, other: &Rect) -> f32 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (ax - bx).hypot(ay - by)
    }

    /// Scales position and size uniformly (authoring units → world units).
    pub fn scaled(&self, scale: f32) -> Self {
        Self::new(self.x * scale, self.y * scale, self.width * scale, self.height * scale)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
