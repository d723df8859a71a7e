//=========================================================================
// Render Seam
//=========================================================================
//
// Scenes describe what to draw as a flat command list; rasterizing it is
// the host's business. The coordinator brackets each scene's commands
// with a `Layer` marker so a host (or a test) can tell who drew what.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;

//=== DrawCommand =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Following commands belong to the named scene.
    Layer(String),
    /// Filled backdrop rectangle.
    Panel(Rect),
    Text { x: f32, y: f32, text: String },
    Tile { rect: Rect, id: u16 },
}

//=== Frame ===============================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&mut self, id: &str) {
        self.commands.push(DrawCommand::Layer(id.to_string()));
    }

    pub fn panel(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Panel(rect));
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>) {
        self.commands.push(DrawCommand::Text { x, y, text: text.into() });
    }

    pub fn tile(&mut self, rect: Rect, id: u16) {
        self.commands.push(DrawCommand::Tile { rect, id });
    }

    /// Layer ids in draw order.
    pub fn layers(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Layer(id) => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every text command's string, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_and_texts_in_draw_order() {
        let mut frame = Frame::new();
        frame.layer("game");
        frame.tile(Rect::new(0.0, 0.0, 64.0, 64.0), 32);
        frame.layer("pause_menu");
        frame.panel(Rect::new(0.0, 0.0, 100.0, 100.0));
        frame.text(10.0, 10.0, "Paused");

        assert_eq!(frame.layers(), vec!["game", "pause_menu"]);
        assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["Paused"]);
        assert_eq!(frame.len(), 5);
    }
}
