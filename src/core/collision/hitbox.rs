//=========================================================================
// Hitbox
//=========================================================================
//
// Inset collision rectangle derived from an entity's live bounds.
//
// Offsets are fractions of the entity's own size per side: negative
// shrinks, positive grows. The rectangle stays centred on the entity and
// is recomputed on every call, never cached.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;

//=== Body ================================================================

/// Anything with a live centre and size that a hitbox can be derived from.
pub trait Body {
    fn center(&self) -> (f32, f32);
    fn size(&self) -> (f32, f32);
}

/// Something whose centre the collision resolver may move.
pub trait Movable: Body {
    fn translate(&mut self, dx: f32, dy: f32);
}

//=== HitboxOffsets =======================================================

/// Per-side inset ratios in fraction-of-size units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitboxOffsets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl HitboxOffsets {
    /// Full bounding box, no inset.
    pub const NONE: Self = Self { left: 0.0, right: 0.0, top: 0.0, bottom: 0.0 };
}

//=== Hitbox ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hitbox {
    offsets: HitboxOffsets,
}

impl Hitbox {
    pub fn new(offsets: HitboxOffsets) -> Self {
        Self { offsets }
    }

    pub fn offsets(&self) -> HitboxOffsets {
        self.offsets
    }

    /// Current hitbox of `body` in world space.
    pub fn rect<B: Body + ?Sized>(&self, body: &B) -> Rect {
        let (width, height) = body.size();
        let (cx, cy) = body.center();
        let o = self.offsets;

        let hit_width = width * (1.0 + o.left + o.right);
        let hit_height = height * (1.0 + o.top + o.bottom);

        Rect::from_center(cx, cy, hit_width, hit_height)
    }

    /// Corners counter-clockwise (Y-up) from bottom-left: BL, BR, TR, TL.
    pub fn corners<B: Body + ?Sized>(&self, body: &B) -> [(f32, f32); 4] {
        let r = self.rect(body);
        [
            (r.left(), r.bottom()),
            (r.right(), r.bottom()),
            (r.right(), r.top()),
            (r.left(), r.top()),
        ]
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Crate {
        center: (f32, f32),
        size: (f32, f32),
    }

    impl Body for Crate {
        fn center(&self) -> (f32, f32) {
            self.center
        }

        fn size(&self) -> (f32, f32) {
            self.size
        }
    }

    #[test]
    fn no_offsets_match_bounding_box() {
        let body = Crate { center: (50.0, 50.0), size: (20.0, 10.0) };
        let rect = Hitbox::default().rect(&body);
        assert_eq!(rect, Rect::new(40.0, 45.0, 20.0, 10.0));
    }

    #[test]
    fn negative_offsets_shrink_around_center() {
        let body = Crate { center: (0.0, 0.0), size: (100.0, 100.0) };
        let hitbox = Hitbox::new(HitboxOffsets { left: -0.1, right: -0.1, top: -0.2, bottom: -0.1 });

        let rect = hitbox.rect(&body);
        assert!((rect.width - 80.0).abs() < 1e-4);
        assert!((rect.height - 70.0).abs() < 1e-4);
        assert_eq!(rect.center(), (0.0, 0.0));
    }

    #[test]
    fn positive_offsets_grow() {
        let body = Crate { center: (0.0, 0.0), size: (10.0, 10.0) };
        let hitbox = Hitbox::new(HitboxOffsets { left: 0.5, right: 0.5, ..HitboxOffsets::NONE });
        assert_eq!(hitbox.rect(&body).width, 20.0);
    }

    #[test]
    fn rect_tracks_live_body_state() {
        let mut body = Crate { center: (0.0, 0.0), size: (10.0, 10.0) };
        let hitbox = Hitbox::default();
        let before = hitbox.rect(&body);

        body.center = (30.0, 40.0);
        let after = hitbox.rect(&body);

        assert_ne!(before, after);
        assert_eq!(after.center(), (30.0, 40.0));
    }

    #[test]
    fn corners_are_counter_clockwise_from_bottom_left() {
        let body = Crate { center: (5.0, 5.0), size: (10.0, 10.0) };
        let corners = Hitbox::default().corners(&body);
        assert_eq!(corners, [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);

        // Positive shoelace area means counter-clockwise with Y up.
        let area: f32 = (0..4)
            .map(|i| {
                let (x0, y0) = corners[i];
                let (x1, y1) = corners[(i + 1) % 4];
                x0 * y1 - x1 * y0
            })
            .sum();
        assert!(area > 0.0);
    }
}
