//=========================================================================
// Pause Menu
//=========================================================================
//
// Overlay over gameplay: resume, settings, main menu, exit.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::menu::{MenuInput, MenuList};
use super::{LOBBY, SETTINGS};
use crate::core::context::GameContext;
use crate::core::input::{KeyCode, Modifiers};
use crate::core::render::Frame;
use crate::core::scene::{Resizable, Scene, SceneParams};

//=== PauseAction =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PauseAction {
    Resume,
    Settings,
    MainMenu,
    ExitGame,
}

//=== PauseMenuScene ======================================================

pub struct PauseMenuScene {
    menu: MenuList<PauseAction>,
}

impl PauseMenuScene {
    pub fn new() -> Self {
        Self {
            menu: MenuList::new(vec![
                ("Resume", PauseAction::Resume),
                ("Settings", PauseAction::Settings),
                ("Main Menu", PauseAction::MainMenu),
                ("Exit Game", PauseAction::ExitGame),
            ]),
        }
    }

    fn activate(&mut self, action: PauseAction, ctx: &mut GameContext) {
        match action {
            PauseAction::Resume => ctx.scenes.pop_overlay(),
            PauseAction::Settings => ctx.scenes.push_overlay(SETTINGS, SceneParams::None),
            PauseAction::MainMenu => ctx.scenes.switch_to(LOBBY, SceneParams::None),
            PauseAction::ExitGame => ctx.scenes.quit(),
        }
    }
}

impl Default for PauseMenuScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for PauseMenuScene {
    fn on_enter(&mut self, params: &SceneParams, _ctx: &mut GameContext) {
        let index = match params {
            SceneParams::MenuIndex(index) => *index,
            _ => 0,
        };
        self.menu.select(index);
    }

    fn update(&mut self, _dt: f32, _ctx: &mut GameContext) {}

    fn draw(&self, frame: &mut Frame, _ctx: &GameContext) {
        self.menu.draw(frame, "Paused", |_| None);
    }

    fn on_key_down(&mut self, key: KeyCode, _modifiers: Modifiers, ctx: &mut GameContext) {
        match self.menu.handle_key(key, &ctx.input) {
            MenuInput::Select => {
                if let Some(action) = self.menu.selected() {
                    self.activate(action, ctx);
                }
            }
            MenuInput::Back => self.activate(PauseAction::Resume, ctx),
            _ => {}
        }
    }

    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }
}

impl Resizable for PauseMenuScene {
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

    fn pause_ctx() -> GameContext {
        let mut ctx = GameContext::default();
        ctx.input.set_profile("pause_menu");
        ctx
    }

    #[test]
    fn escape_resumes() {
        let mut ctx = pause_ctx();
        let mut pause = PauseMenuScene::new();
        pause.on_key_down(KeyCode::Escape, Modifiers::NONE, &mut ctx);
        assert_eq!(ctx.scenes.take(), vec![SceneRequest::PopOverlay]);
    }

    #[test]
    fn entries_map_to_requests() {
        let mut ctx = pause_ctx();
        let mut pause = PauseMenuScene::new();

        for index in 0..4 {
            pause.on_enter(&SceneParams::MenuIndex(index), &mut ctx);
            pause.on_key_down(KeyCode::Space, Modifiers::NONE, &mut ctx);
        }

        assert_eq!(
            ctx.scenes.take(),
            vec![
                SceneRequest::PopOverlay,
                SceneRequest::PushOverlay { id: SETTINGS.into(), params: SceneParams::None },
                SceneRequest::SwitchTo { id: LOBBY.into(), params: SceneParams::None },
                SceneRequest::Quit,
            ]
        );
    }

    #[test]
    fn reopening_starts_at_resume() {
        let mut ctx = pause_ctx();
        let mut pause = PauseMenuScene::new();
        pause.on_key_down(KeyCode::ArrowDown, Modifiers::NONE, &mut ctx);
        pause.on_enter(&SceneParams::None, &mut ctx);
        assert_eq!(pause.menu.selected(), Some(PauseAction::Resume));
    }
}
