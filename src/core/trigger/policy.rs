//=========================================================================
// Interaction Policy
//=========================================================================
//
// Per-kind gates applied after a trigger's zone overlaps the player:
// an optional centre-to-centre distance limit (in tiles) and an optional
// confirm-press requirement.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::KindTag;

//=== KindPolicy ==========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindPolicy {
    /// Maximum centre distance in tiles; `None` means overlap is enough.
    pub max_distance_tiles: Option<f32>,
    pub requires_confirm: bool,
}

impl KindPolicy {
    /// Overlap alone activates.
    pub const OVERLAP: Self = Self { max_distance_tiles: None, requires_confirm: false };

    /// Near enough and an explicit confirm press.
    pub const fn confirmed_within(tiles: f32) -> Self {
        Self { max_distance_tiles: Some(tiles), requires_confirm: true }
    }

    /// Whether an overlapping trigger may fire.
    pub fn permits(&self, distance: f32, tile_size: f32, confirm_pressed: bool) -> bool {
        if self.requires_confirm && !confirm_pressed {
            return false;
        }
        match self.max_distance_tiles {
            Some(tiles) => distance <= tiles * tile_size,
            None => true,
        }
    }
}

//=== InteractionPolicy ===================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionPolicy {
    pub generic: KindPolicy,
    pub container: KindPolicy,
    pub map_transfer: KindPolicy,
}

impl InteractionPolicy {
    pub fn for_kind(&self, tag: KindTag) -> KindPolicy {
        match tag {
            KindTag::Generic => self.generic,
            KindTag::Container => self.container,
            KindTag::MapTransfer => self.map_transfer,
        }
    }
}

impl Default for InteractionPolicy {
    fn default() -> Self {
        Self {
            generic: KindPolicy::OVERLAP,
            container: KindPolicy::confirmed_within(1.5),
            map_transfer: KindPolicy::OVERLAP,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gates_only_containers() {
        let policy = InteractionPolicy::default();
        assert_eq!(policy.for_kind(KindTag::Generic), KindPolicy::OVERLAP);
        assert_eq!(policy.for_kind(KindTag::MapTransfer), KindPolicy::OVERLAP);

        let container = policy.for_kind(KindTag::Container);
        assert_eq!(container.max_distance_tiles, Some(1.5));
        assert!(container.requires_confirm);
    }

    #[test]
    fn container_needs_confirm_and_range() {
        let gate = KindPolicy::confirmed_within(1.5);
        assert!(gate.permits(96.0, 64.0, true));
        assert!(!gate.permits(96.0, 64.0, false));
        assert!(!gate.permits(96.5, 64.0, true));
    }

    #[test]
    fn overlap_policy_ignores_distance_and_confirm() {
        assert!(KindPolicy::OVERLAP.permits(10_000.0, 64.0, false));
    }
}
