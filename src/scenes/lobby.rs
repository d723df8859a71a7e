//=========================================================================
// Lobby Scene
//=========================================================================
//
// Primary main menu: new game, load game, settings, exit.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::menu::{MenuInput, MenuList};
use super::{GAME, SETTINGS};
use crate::core::context::GameContext;
use crate::core::input::{KeyCode, Modifiers};
use crate::core::render::Frame;
use crate::core::scene::{Resizable, Scene, SceneParams};
use crate::core::session::{Inventory, PlayerState};

//=== LobbyAction =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LobbyAction {
    NewGame,
    LoadGame,
    Settings,
    Exit,
}

//=== LobbyScene ==========================================================

pub struct LobbyScene {
    menu: MenuList<LobbyAction>,
}

impl LobbyScene {
    pub fn new() -> Self {
        Self {
            menu: MenuList::new(vec![
                ("New Game", LobbyAction::NewGame),
                ("Load Game", LobbyAction::LoadGame),
                ("Settings", LobbyAction::Settings),
                ("Exit", LobbyAction::Exit),
            ]),
        }
    }

    fn activate(&mut self, action: LobbyAction, ctx: &mut GameContext) {
        match action {
            LobbyAction::NewGame => {
                info!("Starting a new game");
                ctx.session.player = PlayerState::default();
                ctx.session.inventory = Inventory::new();
                if !ctx.world.reset() {
                    warn!("Home region `{}` could not be reloaded", ctx.world.home());
                }
                ctx.scenes.switch_to(GAME, SceneParams::None);
            }
            LobbyAction::LoadGame => info!("Loading saved games is not available"),
            LobbyAction::Settings => ctx.scenes.push_overlay(SETTINGS, SceneParams::None),
            LobbyAction::Exit => ctx.scenes.quit(),
        }
    }
}

impl Default for LobbyScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for LobbyScene {
    fn on_enter(&mut self, params: &SceneParams, _ctx: &mut GameContext) {
        if let SceneParams::MenuIndex(index) = params {
            self.menu.select(*index);
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut GameContext) {}

    fn draw(&self, frame: &mut Frame, _ctx: &GameContext) {
        self.menu.draw(frame, "ITCUBIA", |_| None);
    }

    fn on_key_down(&mut self, key: KeyCode, _modifiers: Modifiers, ctx: &mut GameContext) {
        match self.menu.handle_key(key, &ctx.input) {
            MenuInput::Select => {
                if let Some(action) = self.menu.selected() {
                    self.activate(action, ctx);
                }
            }
            MenuInput::Back => self.activate(LobbyAction::Exit, ctx),
            _ => {}
        }
    }

    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }
}

impl Resizable for LobbyScene {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.menu.set_viewport(width, height);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneRequest;

    fn lobby_ctx() -> GameContext {
        let mut ctx = GameContext::default();
        ctx.input.set_profile("lobby");
        ctx
    }

    fn press(scene: &mut LobbyScene, key: KeyCode, ctx: &mut GameContext) {
        scene.on_key_down(key, Modifiers::NONE, ctx);
    }

    #[test]
    fn new_game_resets_session_and_switches() {
        let mut ctx = lobby_ctx();
        ctx.session.player.health = 3;
        ctx.session.inventory.add("gold_coin", 5);
        let mut lobby = LobbyScene::new();

        press(&mut lobby, KeyCode::Enter, &mut ctx);

        assert_eq!(ctx.session.player.health, 100);
        assert!(ctx.session.inventory.is_empty());
        assert_eq!(
            ctx.scenes.take(),
            vec![SceneRequest::SwitchTo { id: GAME.into(), params: SceneParams::None }]
        );
    }

    #[test]
    fn settings_opens_as_overlay() {
        let mut ctx = lobby_ctx();
        let mut lobby = LobbyScene::new();
        lobby.on_enter(&SceneParams::MenuIndex(2), &mut ctx);

        press(&mut lobby, KeyCode::KeyE, &mut ctx);

        assert_eq!(
            ctx.scenes.take(),
            vec![SceneRequest::PushOverlay { id: SETTINGS.into(), params: SceneParams::None }]
        );
    }

    #[test]
    fn load_game_only_logs() {
        let mut ctx = lobby_ctx();
        let mut lobby = LobbyScene::new();

        press(&mut lobby, KeyCode::ArrowDown, &mut ctx);
        press(&mut lobby, KeyCode::Enter, &mut ctx);

        assert!(ctx.scenes.is_empty());
    }

    #[test]
    fn back_and_exit_quit() {
        let mut ctx = lobby_ctx();
        let mut lobby = LobbyScene::new();

        press(&mut lobby, KeyCode::Escape, &mut ctx);
        lobby.on_enter(&SceneParams::MenuIndex(3), &mut ctx);
        press(&mut lobby, KeyCode::Enter, &mut ctx);

        assert_eq!(ctx.scenes.take(), vec![SceneRequest::Quit, SceneRequest::Quit]);
    }
}
