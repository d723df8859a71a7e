//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-redraw accumulator between winit callbacks and the core channel.
//
// - keys:   KeyDown/KeyUp in arrival order, consecutive duplicates
//           (OS auto-repeat) collapsed
// - resize: latest window size only
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== InputBuffer =========================================================

#[derive(Debug, Default)]
pub(crate) struct InputBuffer {
    keys: Vec<InputEvent>,
    resize: Option<(u32, u32)>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const KEYS_BASE: usize = 32;

        Self {
            keys: Vec::with_capacity(KEYS_BASE),
            resize: None,
        }
    }

    //--- Accumulation -----------------------------------------------------

    pub(crate) fn push_key(&mut self, event: InputEvent) {
        if self.keys.last() != Some(&event) {
            self.keys.push(event);
        }
    }

    /// Replaces any earlier resize from the same frame.
    pub(crate) fn push_resize(&mut self, width: u32, height: u32) {
        self.resize = Some((width, height));
    }

    //--- Drain ------------------------------------------------------------

    /// Returns the frame's keys and resize, or `None` when nothing was
    /// buffered. Leaves the buffer empty.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Option<(u32, u32)>)> {
        if self.is_empty() {
            return None;
        }
        Some((std::mem::take(&mut self.keys), self.resize.take()))
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len() + usize::from(self.resize.is_some())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.resize.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers};

    fn down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    #[test]
    fn auto_repeat_collapses() {
        let mut buffer = InputBuffer::new();
        buffer.push_key(down(KeyCode::KeyA));
        buffer.push_key(down(KeyCode::KeyA));
        buffer.push_key(down(KeyCode::KeyB));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn distinct_transitions_keep_order() {
        let mut buffer = InputBuffer::new();
        buffer.push_key(down(KeyCode::KeyA));
        buffer.push_key(up(KeyCode::KeyA));
        buffer.push_key(down(KeyCode::KeyA));

        let (keys, resize) = buffer.drain().unwrap();
        assert_eq!(keys, vec![down(KeyCode::KeyA), up(KeyCode::KeyA), down(KeyCode::KeyA)]);
        assert_eq!(resize, None);
    }

    #[test]
    fn resize_keeps_latest() {
        let mut buffer = InputBuffer::new();
        buffer.push_resize(640, 480);
        buffer.push_resize(1024, 768);

        let (keys, resize) = buffer.drain().unwrap();
        assert!(keys.is_empty());
        assert_eq!(resize, Some((1024, 768)));
    }

    #[test]
    fn drain_empties_buffer() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());

        buffer.push_key(down(KeyCode::Space));
        assert!(buffer.drain().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }
}
