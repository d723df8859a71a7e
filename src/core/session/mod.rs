//=========================================================================
// Session State
//=========================================================================
//
// The explicitly owned game data every scene reads and writes: player
// record, inventory and user settings. Constructed once at startup and
// handed to scenes through the GameContext.
//
//=========================================================================

//=== Module Declarations =================================================

mod inventory;

//=== External Dependencies ===============================================

use log::debug;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::contracts::PositionSink;
use crate::core::error::CoreResult;

//=== Public API ==========================================================

pub use inventory::{item_info, Inventory, ItemInfo, ItemSlot};

//=== Position ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

//=== PlayerState =========================================================

/// Persisted player record. Also the player-position sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub health: i32,
    pub position: Position,
    /// Region the position refers to; `None` means the world's home region.
    pub region: Option<String>,
    pub level: u32,
    pub experience: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            health: 100,
            position: Position { x: 120.0, y: 300.0 },
            region: None,
            level: 1,
            experience: 0,
        }
    }
}

impl PositionSink for PlayerState {
    fn position(&self) -> (f32, f32) {
        (self.position.x, self.position.y)
    }

    fn set_position(&mut self, x: f32, y: f32, region: Option<&str>) {
        self.position = Position { x, y };
        if let Some(region) = region {
            debug!("Player moved to region `{}` at ({}, {})", region, x, y);
            self.region = Some(region.to_string());
        }
    }
}

//=== Settings ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume in `0.0..=1.0`.
    pub volume: f32,
    pub fullscreen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { volume: 0.7, fullscreen: false }
    }
}

//=== SessionState ========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub player: PlayerState,
    pub inventory: Inventory,
    pub settings: Settings,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty JSON snapshot for debugging.
    pub fn export_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new_game() {
        let session = SessionState::new();
        assert_eq!(session.player.health, 100);
        assert_eq!(session.player.position(), (120.0, 300.0));
        assert_eq!(session.player.level, 1);
        assert!(session.inventory.is_empty());
        assert_eq!(session.settings.volume, 0.7);
        assert!(!session.settings.fullscreen);
    }

    #[test]
    fn set_position_keeps_region_when_absent() {
        let mut player = PlayerState::default();
        player.set_position(10.0, 20.0, Some("cellar"));
        player.set_position(30.0, 40.0, None);

        assert_eq!(player.position(), (30.0, 40.0));
        assert_eq!(player.region.as_deref(), Some("cellar"));
    }

    #[test]
    fn export_json_contains_sections() {
        let mut session = SessionState::new();
        session.inventory.add("healing_potion", 1);

        let json = session.export_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["player"]["health"], 100);
        assert_eq!(value["inventory"]["items"][0]["id"], "healing_potion");
        assert_eq!(value["settings"]["fullscreen"], false);
    }
}
