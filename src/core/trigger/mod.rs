//=========================================================================
// Triggers
//=========================================================================
//
// Typed world-space zones and the registry that fires them.
//
// Architecture:
//   TriggerRecord ──load──> TriggerRegistry ──check──> activate
//                                │                        │
//                                └── Trigger { kind } ────┴──> TriggerEnv
//
// A trigger carries a frame cooldown so overlapping it for several
// frames fires it once. Kind-specific state lives in `TriggerKind`.
//
//=========================================================================

//=== Module Declarations =================================================

mod container;
mod policy;
mod record;
mod registry;
mod transfer;

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;

//=== Public API ==========================================================

pub use container::{
    default_loot, parse_loot, Container, LockProgress, LockSequence, LockSymbol, LootEntry,
    VisualProxy,
};
pub use policy::{InteractionPolicy, KindPolicy};
pub use record::TriggerRecord;
pub use registry::{Activation, TriggerEnv, TriggerRegistry};
pub use transfer::MapTransfer;

/// Frames a trigger stays inert after firing.
pub const DEFAULT_COOLDOWN_FRAMES: u32 = 60;

//=== TriggerId ===========================================================

/// Trigger identity, unique within one loaded region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(pub String);

impl TriggerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//=== Cooldown ============================================================

/// Re-entrancy guard counted in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    remaining: u32,
    period: u32,
}

impl Cooldown {
    pub fn new(period: u32) -> Self {
        Self { remaining: 0, period }
    }

    /// `true` while frames remain.
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn start(&mut self) {
        self.remaining = self.period;
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_FRAMES)
    }
}

//=== TriggerKind =========================================================

/// Kind-specific trigger state.
#[derive(Debug)]
pub enum TriggerKind {
    Generic,
    Container(Container),
    MapTransfer(MapTransfer),
}

/// Data-free discriminant of [`TriggerKind`], used for policy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Generic,
    Container,
    MapTransfer,
}

impl TriggerKind {
    pub fn tag(&self) -> KindTag {
        match self {
            Self::Generic => KindTag::Generic,
            Self::Container(_) => KindTag::Container,
            Self::MapTransfer(_) => KindTag::MapTransfer,
        }
    }
}

//=== Trigger =============================================================

#[derive(Debug)]
pub struct Trigger {
    id: TriggerId,
    rect: Rect,
    cooldown: Cooldown,
    kind: TriggerKind,
}

impl Trigger {
    pub fn new(id: TriggerId, rect: Rect, kind: TriggerKind) -> Self {
        Self { id, rect, cooldown: Cooldown::default(), kind }
    }

    pub fn with_cooldown(mut self, period: u32) -> Self {
        self.cooldown = Cooldown::new(period);
        self
    }

    pub fn id(&self) -> &TriggerId {
        &self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn kind(&self) -> &TriggerKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut TriggerKind {
        &mut self.kind
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    /// `true` while the cooldown runs.
    pub fn is_activated(&self) -> bool {
        self.cooldown.is_active()
    }

    pub fn container(&self) -> Option<&Container> {
        match &self.kind {
            TriggerKind::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn container_mut(&mut self) -> Option<&mut Container> {
        match &mut self.kind {
            TriggerKind::Container(container) => Some(container),
            _ => None,
        }
    }

    pub(crate) fn start_cooldown(&mut self) {
        self.cooldown.start();
    }

    pub(crate) fn tick_cooldown(&mut self) {
        self.cooldown.tick();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_counts_down_to_inactive() {
        let mut cooldown = Cooldown::new(2);
        assert!(!cooldown.is_active());

        cooldown.start();
        assert!(cooldown.is_active());
        cooldown.tick();
        assert_eq!(cooldown.remaining(), 1);
        cooldown.tick();
        assert!(!cooldown.is_active());
        cooldown.tick();
        assert_eq!(cooldown.remaining(), 0);
    }

    #[test]
    fn trigger_exposes_kind_accessors() {
        let chest = Trigger::new(
            TriggerId::new("chest"),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            TriggerKind::Container(Container::new(LockSequence::default(), default_loot())),
        );
        assert_eq!(chest.kind().tag(), KindTag::Container);
        assert!(chest.container().is_some());
        assert_eq!(chest.cooldown().period(), DEFAULT_COOLDOWN_FRAMES);

        let plain = Trigger::new(TriggerId::new("sign"), Rect::default(), TriggerKind::Generic);
        assert!(plain.container().is_none());
        assert_eq!(plain.id().to_string(), "sign");
    }
}
