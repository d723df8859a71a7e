//=========================================================================
// Scenes
//=========================================================================
//
// The game's concrete scenes and the ids they are registered under.
//
// ```text
//   lobby (primary) ──new game──> game (primary)
//                                   ├─ pause_menu ── settings
//                                   ├─ lock_picking
//                                   └─ cheat_console
// ```
//
// Each id doubles as the input profile that is current while the scene
// is active.
//
//=========================================================================

//=== Submodules ==========================================================

mod console;
mod gameplay;
mod lobby;
mod lock_picking;
mod menu;
mod pause_menu;
mod settings;

//=== Public API ==========================================================

pub use console::{CheatConsoleScene, ConsoleCommand, LineBuffer};
pub use gameplay::GameplayScene;
pub use lobby::LobbyScene;
pub use lock_picking::{LockPickingScene, AUTO_CLOSE};
pub use pause_menu::PauseMenuScene;
pub use settings::SettingsScene;

use crate::core::error::CoreResult;
use crate::core::scene::SceneCoordinator;

pub const LOBBY: &str = "lobby";
pub const GAME: &str = "game";
pub const PAUSE_MENU: &str = "pause_menu";
pub const SETTINGS: &str = "settings";
pub const LOCK_PICKING: &str = "lock_picking";
pub const CHEAT_CONSOLE: &str = "cheat_console";

/// Registers every scene under its id.
pub fn register_all(coordinator: &mut SceneCoordinator) -> CoreResult<()> {
    coordinator.register(LOBBY, LobbyScene::new())?;
    coordinator.register(GAME, GameplayScene::new())?;
    coordinator.register(PAUSE_MENU, PauseMenuScene::new())?;
    coordinator.register(SETTINGS, SettingsScene::new())?;
    coordinator.register(LOCK_PICKING, LockPickingScene::new())?;
    coordinator.register(CHEAT_CONSOLE, CheatConsoleScene::new())?;
    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================
