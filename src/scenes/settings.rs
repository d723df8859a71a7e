//=========================================================================
// Settings Scene
//=========================================================================
//
// Overlay for volume, controls and graphics. Volume is edited in steps
// of 10 on a 0..=100 scale and stored in the session as a fraction.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::menu::{MenuInput, MenuList};
use crate::core::context::GameContext;
use crate::core::input::{KeyCode, Modifiers};
use crate::core::render::Frame;
use crate::core::scene::{Resizable, Scene, SceneParams};

const VOLUME_STEP: i32 = 10;

//=== SettingsAction ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsAction {
    Volume,
    Controls,
    Graphics,
    Back,
}

//=== SettingsScene =======================================================

pub struct SettingsScene {
    menu: MenuList<SettingsAction>,
}

impl SettingsScene {
    pub fn new() -> Self {
        Self {
            menu: MenuList::new(vec![
                ("Volume", SettingsAction::Volume),
                ("Controls", SettingsAction::Controls),
                ("Graphics", SettingsAction::Graphics),
                ("Back", SettingsAction::Back),
            ]),
        }
    }

    fn change_volume(&self, delta: i32, ctx: &mut GameContext) {
        if self.menu.selected() != Some(SettingsAction::Volume) {
            return;
        }

        let current = volume_percent(ctx.session.settings.volume);
        let next = (current + delta).clamp(0, 100);
        ctx.session.settings.volume = next as f32 / 100.0;
        info!("Volume set to {}%", next);
    }

    fn activate(&mut self, action: SettingsAction, ctx: &mut GameContext) {
        match action {
            SettingsAction::Volume => {}
            SettingsAction::Controls => info!("Control settings are edited in the key bindings file"),
            SettingsAction::Graphics => info!("No graphics settings available"),
            SettingsAction::Back => ctx.scenes.pop_overlay(),
        }
    }
}

impl Default for SettingsScene {
    fn default() -> Self {
        Self::new()
    }
}

fn volume_percent(volume: f32) -> i32 {
    (volume * 100.0).round() as i32
}

impl Scene for SettingsScene {
    fn on_enter(&mut self, params: &SceneParams, _ctx: &mut GameContext) {
        if let SceneParams::MenuIndex(index) = params {
            self.menu.select(*index);
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut GameContext) {}

    fn draw(&self, frame: &mut Frame, ctx: &GameContext) {
        let volume = volume_percent(ctx.session.settings.volume);
        self.menu.draw(frame, "Settings", |action| {
            (action == SettingsAction::Volume).then(|| format!("{}%", volume))
        });
    }

    fn on_key_down(&mut self, key: KeyCode, _modifiers: Modifiers, ctx: &mut GameContext) {
        match self.menu.handle_key(key, &ctx.input) {
            MenuInput::Left => self.change_volume(-VOLUME_STEP, ctx),
            MenuInput::Right => self.change_volume(VOLUME_STEP, ctx),
            MenuInput::Select => {
                if let Some(action) = self.menu.selected() {
                    self.activate(action, ctx);
                }
            }
            MenuInput::Back => self.activate(SettingsAction::Back, ctx),
            MenuInput::Moved | MenuInput::Ignored => {}
        }
    }

    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }
}

impl Resizable for SettingsScene {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.menu.set_viewport(width, height);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
