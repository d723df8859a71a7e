//=========================================================================
// Menu List
//=========================================================================
//
// Vertical list of labelled entries with a clamped cursor, shared by
// the lobby, pause and settings screens. Lays itself out centred in
// the last known window size.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;
use crate::core::input::{ActionInput, KeyCode};
use crate::core::render::Frame;

const ROW_SPACING: f32 = 70.0;
const PANEL_WIDTH: f32 = 480.0;
const PANEL_PADDING: f32 = 60.0;
const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);

//=== MenuInput ===========================================================

/// What a key meant to a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuInput {
    Moved,
    Select,
    Back,
    Left,
    Right,
    Ignored,
}

//=== MenuList ============================================================

#[derive(Debug, Clone)]
pub(crate) struct MenuList<A: Copy> {
    entries: Vec<(&'static str, A)>,
    selected: usize,
    viewport: (u32, u32),
}

impl<A: Copy> MenuList<A> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(entries: Vec<(&'static str, A)>) -> Self {
        Self { entries, selected: 0, viewport: DEFAULT_VIEWPORT }
    }

    //--- Cursor -----------------------------------------------------------

    pub(crate) fn selected_index(&self) -> usize {
        self.selected
    }

    pub(crate) fn selected(&self) -> Option<A> {
        self.entries.get(self.selected).map(|(_, action)| *action)
    }

    /// Moves the cursor to `index`, clamped to the last entry.
    pub(crate) fn select(&mut self, index: usize) {
        self.selected = index.min(self.entries.len().saturating_sub(1));
    }

    pub(crate) fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(crate) fn move_down(&mut self) {
        self.select(self.selected + 1);
    }

    /// Interprets `key` through the menu actions of the current profile.
    /// Cursor moves are applied here; everything else is for the caller.
    pub(crate) fn handle_key(&mut self, key: KeyCode, input: &ActionInput) -> MenuInput {
        if input.is_action_key("menu_up", key) {
            self.move_up();
            MenuInput::Moved
        } else if input.is_action_key("menu_down", key) {
            self.move_down();
            MenuInput::Moved
        } else if input.is_action_key("select", key) {
            MenuInput::Select
        } else if input.is_action_key("back", key) {
            MenuInput::Back
        } else if input.is_action_key("menu_left", key) {
            MenuInput::Left
        } else if input.is_action_key("menu_right", key) {
            MenuInput::Right
        } else {
            MenuInput::Ignored
        }
    }

    //--- Layout -----------------------------------------------------------

    pub(crate) fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Backdrop panel centred in the viewport.
    pub(crate) fn panel(&self) -> Rect {
        let height = self.entries.len() as f32 * ROW_SPACING + 2.0 * PANEL_PADDING;
        Rect::from_center(
            self.viewport.0 as f32 / 2.0,
            self.viewport.1 as f32 / 2.0,
            PANEL_WIDTH,
            height,
        )
    }

    /// Draws the panel, a title above it and the entries; `value` can
    /// append a suffix to an entry's label.
    pub(crate) fn draw(&self, frame: &mut Frame, title: &str, value: impl Fn(A) -> Option<String>) {
        let panel = self.panel();
        let (cx, _) = panel.center();

        frame.panel(panel);
        frame.text(cx, panel.top() + ROW_SPACING / 2.0, title);

        for (index, (label, action)) in self.entries.iter().enumerate() {
            let y = panel.top() - PANEL_PADDING - index as f32 * ROW_SPACING;
            let cursor = if index == self.selected { "> " } else { "  " };
            let text = match value(*action) {
                Some(suffix) => format!("{}{}: {}", cursor, label, suffix),
                None => format!("{}{}", cursor, label),
            };
            frame.text(cx, y, text);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> MenuList<u8> {
        MenuList::new(vec![("One", 1), ("Two", 2), ("Three", 3)])
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut menu = menu();
        menu.move_up();
        assert_eq!(menu.selected(), Some(1));

        menu.move_down();
        menu.move_down();
        menu.move_down();
        assert_eq!(menu.selected(), Some(3));

        menu.select(10);
        assert_eq!(menu.selected_index(), 2);
    }

    #[test]
    fn keys_map_through_profile() {
        let mut input = ActionInput::default();
        input.set_profile("settings");
        let mut menu = menu();

        assert_eq!(menu.handle_key(KeyCode::ArrowDown, &input), MenuInput::Moved);
        assert_eq!(menu.selected(), Some(2));
        assert_eq!(menu.handle_key(KeyCode::Enter, &input), MenuInput::Select);
        assert_eq!(menu.handle_key(KeyCode::Escape, &input), MenuInput::Back);
        assert_eq!(menu.handle_key(KeyCode::ArrowLeft, &input), MenuInput::Left);
        assert_eq!(menu.handle_key(KeyCode::KeyZ, &input), MenuInput::Ignored);
    }

    #[test]
    fn panel_recentres_on_resize() {
        let mut menu = menu();
        menu.set_viewport(800, 600);
        assert_eq!(menu.panel().center(), (400.0, 300.0));
    }

    #[test]
    fn draw_marks_cursor_and_values() {
        let mut menu = menu();
        menu.move_down();

        let mut frame = Frame::new();
        menu.draw(&mut frame, "Menu", |action| (action == 3).then(|| "on".to_string()));

        let texts: Vec<_> = frame.texts().collect();
        assert_eq!(texts, vec!["Menu", "  One", "> Two", "  Three: on"]);
    }
}
