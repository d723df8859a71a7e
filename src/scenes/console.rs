//=========================================================================
// Cheat Console
//=========================================================================
//
// Developer overlay with a single editable command line.
//
// Typing: letters come out upper-case, digits as-is, Minus types `-`
// (`_` with Shift). Left/Right move the cursor, Backspace/Delete edit
// around it. `submit` records the line in history, runs it and closes
// the overlay; `close` just closes.
//
// Commands:
//   GODMOD      health := 9999
//   TP_x_y      move the player to (x, y) in the current region
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;
use crate::core::contracts::PositionSink;
use crate::core::geometry::Rect;
use crate::core::input::{KeyCode, Modifiers};
use crate::core::render::Frame;
use crate::core::scene::{Resizable, Scene, SceneParams};

const GOD_HEALTH: i32 = 9999;
const MAX_LINE: usize = 64;

//=== ConsoleCommand ======================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    GodMode,
    Teleport { x: f32, y: f32 },
}

impl ConsoleCommand {
    /// Parses one submitted line. `Err` carries the reason for the log.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line == "GODMOD" {
            return Ok(Self::GodMode);
        }

        if let Some(args) = line.strip_prefix("TP_") {
            let mut parts = args.split('_');
            let coords = (parts.next(), parts.next(), parts.next());
            return match coords {
                (Some(x), Some(y), None) => match (x.parse::<f32>(), y.parse::<f32>()) {
                    (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => Ok(Self::Teleport { x, y }),
                    _ => Err(format!("bad teleport coordinates in `{}`", line)),
                },
                _ => Err(format!("expected TP_x_y, got `{}`", line)),
            };
        }

        Err(format!("unknown command `{}`", line))
    }

    fn execute(&self, ctx: &mut GameContext) {
        match *self {
            Self::GodMode => {
                ctx.session.player.health = GOD_HEALTH;
                info!("God mode: health set to {}", GOD_HEALTH);
            }
            Self::Teleport { x, y } => {
                ctx.session.player.set_position(x, y, None);
                info!("Teleported player to ({}, {})", x, y);
            }
        }
    }
}

//=== LineBuffer ==========================================================

/// Text line with a char-indexed cursor.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, c: char) {
        if self.chars.len() >= MAX_LINE {
            return;
        }
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        self.chars.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }
}

/// Character a key types into the console, if any.
fn typed_char(key: KeyCode, modifiers: Modifiers) -> Option<char> {
    match key {
        KeyCode::Minus if modifiers.shift => Some('_'),
        KeyCode::Minus => Some('-'),
        KeyCode::Space => Some(' '),
        _ => key.letter().or_else(|| key.digit()),
    }
}

//=== CheatConsoleScene ===================================================

pub struct CheatConsoleScene {
    line: LineBuffer,
    history: Vec<String>,
    viewport: (u32, u32),
}

impl CheatConsoleScene {
    pub fn new() -> Self {
        Self {
            line: LineBuffer::default(),
            history: Vec::new(),
            viewport: (1280, 720),
        }
    }

    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn submit(&mut self, ctx: &mut GameContext) {
        let line = self.line.take();
        if !line.trim().is_empty() {
            self.history.push(line.clone());
            match ConsoleCommand::parse(&line) {
                Ok(command) => command.execute(ctx),
                Err(reason) => warn!("Console: {}", reason),
            }
        }
        ctx.scenes.pop_overlay();
    }
}

impl Default for CheatConsoleScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for CheatConsoleScene {
    fn on_enter(&mut self, _params: &SceneParams, _ctx: &mut GameContext) {
        self.line.clear();
    }

    fn update(&mut self, _dt: f32, _ctx: &mut GameContext) {}

    fn draw(&self, frame: &mut Frame, _ctx: &GameContext) {
        let width = self.viewport.0 as f32;
        let top = self.viewport.1 as f32;
        frame.panel(Rect::new(0.0, top - 40.0, width, 40.0));

        let mut shown = self.line.text();
        shown.insert(self.line.cursor().min(shown.len()), '|');
        frame.text(8.0, top - 28.0, format!("> {}", shown));

        for (row, entry) in self.history.iter().rev().take(5).enumerate() {
            frame.text(8.0, top - 60.0 - row as f32 * 20.0, entry.clone());
        }
    }

    fn on_key_down(&mut self, key: KeyCode, modifiers: Modifiers, ctx: &mut GameContext) {
        if ctx.input.is_action_key("submit", key) {
            self.submit(ctx);
            return;
        }
        if ctx.input.is_action_key("close", key) {
            ctx.scenes.pop_overlay();
            return;
        }

        match key {
            KeyCode::ArrowLeft => self.line.left(),
            KeyCode::ArrowRight => self.line.right(),
            KeyCode::Backspace => self.line.backspace(),
            KeyCode::Delete => self.line.delete(),
            _ => {
                if let Some(c) = typed_char(key, modifiers) {
                    self.line.insert(c);
                }
            }
        }
    }

    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }
}

impl Resizable for CheatConsoleScene {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneRequest;

    fn console_ctx() -> GameContext {
        let mut ctx = GameContext::default();
        ctx.input.set_profile("cheat_console");
        ctx
    }

    fn type_line(scene: &mut CheatConsoleScene, text: &str, ctx: &mut GameContext) {
        for c in text.chars() {
            let (key, modifiers) = match c {
                '_' => (KeyCode::Minus, Modifiers::SHIFT),
                '-' => (KeyCode::Minus, Modifiers::NONE),
                c =>(KeyCode::from_name(&c.to_string()).unwrap(), Modifiers::NONE),
            };
            scene.on_key_down(key, modifiers, ctx);
        }
    }

    #[test]
    fn godmod_sets_health_and_closes() {
        let mut ctx = console_ctx();
        let mut console = CheatConsoleScene::new();

        type_line(&mut console, "godmod", &mut ctx);
        assert_eq!(console.line().text(), "GODMOD");
        console.on_key_down(KeyCode::Enter, Modifiers::NONE, &mut ctx);

        assert_eq!(ctx.session.player.health, 9999);
        assert_eq!(console.history(), ["GODMOD".to_string()]);
        assert_eq!(ctx.scenes.take(), vec![SceneRequest::PopOverlay]);
    }

    #[test]
    fn teleport_persists_position() {
        let mut ctx = console_ctx();
        let mut console = CheatConsoleScene::new();

        type_line(&mut console, "TP_320_-40", &mut ctx);
        console.on_key_down(KeyCode::Enter, Modifiers::NONE, &mut ctx);

        assert_eq!(ctx.session.player.position(), (320.0, -40.0));
    }

    #[test]
    fn malformed_teleport_is_ignored() {
        let mut ctx = console_ctx();
        let before = ctx.session.player.position();
        let mut console = CheatConsoleScene::new();

        type_line(&mut console, "TP_12", &mut ctx);
        console.on_key_down(KeyCode::Enter, Modifiers::NONE, &mut ctx);

        assert_eq!(ctx.session.player.position(), before);
        assert_eq!(console.history(), ["TP_12".to_string()]);
        assert_eq!(ctx.scenes.take(), vec![SceneRequest::PopOverlay]);
    }

    #[test]
    fn cursor_editing() {
        let mut ctx = console_ctx();
        let mut console = CheatConsoleScene::new();

        type_line(&mut console, "ABD", &mut ctx);
        console.on_key_down(KeyCode::ArrowLeft, Modifiers::NONE, &mut ctx);
        type_line(&mut console, "C", &mut ctx);
        assert_eq!(console.line().text(), "ABCD");

        console.on_key_down(KeyCode::Delete, Modifiers::NONE, &mut ctx);
        console.on_key_down(KeyCode::ArrowLeft, Modifiers::NONE, &mut ctx);
        console.on_key_down(KeyCode::Backspace, Modifiers::NONE, &mut ctx);
        assert_eq!(console.line().text(), "AC");
        assert_eq!(console.line().cursor(), 1);
    }

    #[test]
    fn grave_closes_without_running() {
        let mut ctx = console_ctx();
        let mut console = CheatConsoleScene::new();

        type_line(&mut console, "GODMOD", &mut ctx);
        console.on_key_down(KeyCode::Grave, Modifiers::NONE, &mut ctx);

        assert_eq!(ctx.session.player.health, 100);
        assert!(console.history().is_empty());
        assert_eq!(ctx.scenes.take(), vec![SceneRequest::PopOverlay]);

        console.on_enter(&SceneParams::None, &mut ctx);
        assert_eq!(console.line().text(), "");
    }

    #[test]
    fn command_parsing() {
        assert_eq!(ConsoleCommand::parse("GODMOD"), Ok(ConsoleCommand::GodMode));
        assert_eq!(ConsoleCommand::parse("TP_1_2"), Ok(ConsoleCommand::Teleport { x: 1.0, y: 2.0 }));
        assert!(ConsoleCommand::parse("TP_1_2_3").is_err());
        assert!(ConsoleCommand::parse("TP_A_2").is_err());
        assert!(ConsoleCommand::parse("FLY").is_err());
    }
}
