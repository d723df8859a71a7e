//=========================================================================
// Collision Resolver
//=========================================================================
//
// Axis-separated sliding resolution against a solidity query.
//
// Flow:
//   corners → probe(dx, 0) → commit X
//           → probe(0, dy) from the moved corners → commit Y
//
// Each axis is gated on its own, so a wall on one side cancels only that
// component and the entity slides along it. Stateless and reentrant.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::hitbox::{Hitbox, Movable};
use crate::core::contracts::SolidityQuery;

//=== AxisClearance =======================================================

/// Per-axis result of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisClearance {
    pub can_move_x: bool,
    pub can_move_y: bool,
}

//=== Probe ===============================================================

/// Tests every corner offset by `dx` (when non-zero) and, separately, by
/// `dy` (when non-zero). An axis is blocked as soon as one corner lands
/// on a solid point along it.
pub fn probe<Q>(corners: &[(f32, f32)], dx: f32, dy: f32, query: &Q) -> AxisClearance
where
    Q: SolidityQuery + ?Sized,
{
    let mut clearance = AxisClearance { can_move_x: true, can_move_y: true };

    for &(cx, cy) in corners {
        if dx != 0.0 && clearance.can_move_x && query.is_solid(cx + dx, cy) {
            debug!("Blocked on X at ({}, {})", cx + dx, cy);
            clearance.can_move_x = false;
        }
        if dy != 0.0 && clearance.can_move_y && query.is_solid(cx, cy + dy) {
            debug!("Blocked on Y at ({}, {})", cx, cy + dy);
            clearance.can_move_y = false;
        }
    }

    clearance
}

//=== Resolve =============================================================

/// Moves `entity` by as much of `(dx, dy)` as the world allows and
/// returns the displacement actually applied.
pub fn resolve<M, Q>(entity: &mut M, hitbox: &Hitbox, dx: f32, dy: f32, query: &Q) -> (f32, f32)
where
    M: Movable + ?Sized,
    Q: SolidityQuery + ?Sized,
{
    let applied_dx = if dx != 0.0 && probe(&hitbox.corners(entity), dx, 0.0, query).can_move_x {
        entity.translate(dx, 0.0);
        dx
    } else {
        0.0
    };

    let applied_dy = if dy != 0.0 && probe(&hitbox.corners(entity), 0.0, dy, query).can_move_y {
        entity.translate(0.0, dy);
        dy
    } else {
        0.0
    };

    (applied_dx, applied_dy)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collision::hitbox::Body;

    struct Mover {
        center: (f32, f32),
    }

    impl Body for Mover {
        fn center(&self) -> (f32, f32) {
            self.center
        }

        fn size(&self) -> (f32, f32) {
            (10.0, 10.0)
        }
    }

    impl Movable for Mover {
        fn translate(&mut self, dx: f32, dy: f32) {
            self.center.0 += dx;
            self.center.1 += dy;
        }
    }

    //=====================================================================
    // Probe Tests
    //=====================================================================

    #[test]
    fn open_space_allows_both_axes() {
        let open = |_x: f32, _y: f32| false;
        let clearance = probe(&[(0.0, 0.0), (10.0, 10.0)], 5.0, 5.0, &open);
        assert_eq!(clearance, AxisClearance { can_move_x: true, can_move_y: true });
    }

    #[test]
    fn zero_displacement_never_queries() {
        let everything_solid = |_x: f32, _y: f32| true;
        let clearance = probe(&[(0.0, 0.0)], 0.0, 0.0, &everything_solid);
        assert!(clearance.can_move_x && clearance.can_move_y);
    }

    #[test]
    fn a_single_corner_blocks_its_axis() {
        // Only the top-right corner reaches the wall.
        let wall = |x: f32, y: f32| x > 12.0 && y > 8.0;
        let corners = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];

        let clearance = probe(&corners, 4.0, 0.0, &wall);
        assert!(!clearance.can_move_x);
        assert!(clearance.can_move_y);
    }

    //=====================================================================
    // Resolve Tests
    //=====================================================================

    /// Wall on the right, nothing above: diagonal motion slides upward.
    #[test]
    fn blocked_x_still_applies_y() {
        let wall_right = |x: f32, _y: f32| x >= 20.0;
        let mut mover = Mover { center: (12.0, 0.0) };

        let applied = resolve(&mut mover, &Hitbox::default(), 4.0, 3.0, &wall_right);

        assert_eq!(applied, (0.0, 3.0));
        assert_eq!(mover.center, (12.0, 3.0));
    }

    #[test]
    fn blocked_y_still_applies_x() {
        let ceiling = |_x: f32, y: f32| y >= 20.0;
        let mut mover = Mover { center: (0.0, 12.0) };

        let applied = resolve(&mut mover, &Hitbox::default(), -2.0, 5.0, &ceiling);

        assert_eq!(applied, (-2.0, 0.0));
        assert_eq!(mover.center, (-2.0, 12.0));
    }

    #[test]
    fn free_movement_applies_fully() {
        let open = |_x: f32, _y: f32| false;
        let mut mover = Mover { center: (0.0, 0.0) };
        assert_eq!(resolve(&mut mover, &Hitbox::default(), 1.5, -2.5, &open), (1.5, -2.5));
        assert_eq!(mover.center, (1.5, -2.5));
    }

    /// Both axes individually clear but the diagonal target is solid:
    /// Y is probed from the already-moved corners and gets blocked.
    #[test]
    fn outer_corner_is_not_cut() {
        let block = |x: f32, y: f32| x > 6.0 && y > 6.0;
        let mut mover = Mover { center: (0.0, 0.0) };

        let applied = resolve(&mut mover, &Hitbox::default(), 2.0, 2.0, &block);

        assert_eq!(applied, (2.0, 0.0));
    }

    //=====================================================================
    // Property Tests
    //=====================================================================

    mod properties {
        use super::*;
        use crate::core::collision::TileMap;
        use proptest::prelude::*;

        proptest! {
            /// Integer steps keep corner arithmetic exact, so a walk that
            /// starts clear never ends a step with a corner inside a wall.
            #[test]
            fn walking_never_enters_walls(steps in prop::collection::vec((-40i32..40, -40i32..40), 1..40)) {
                let map = TileMap::walled(6, 6, 64.0);
                let hitbox = Hitbox::default();
                let mut mover = Mover { center: (192.0, 192.0) };

                for (dx, dy) in steps {
                    let (dx, dy) = (dx as f32, dy as f32);
                    let applied = resolve(&mut mover, &hitbox, dx, dy, &map);

                    prop_assert!(applied.0 == 0.0 || applied.0 == dx);
                    prop_assert!(applied.1 == 0.0 || applied.1 == dy);
                    for (x, y) in hitbox.corners(&mover) {
                        prop_assert!(!map.is_solid(x, y), "corner ({}, {}) in a wall", x, y);
                    }
                }
            }
        }
    }
}
