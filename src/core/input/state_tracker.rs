//=========================================================================
// State Tracker
//=========================================================================
//
// Key state with per-frame delta tracking.
//
// Architecture:
//   InputEvent → apply() → HashSet (keys held) → query
//
// Frame lifecycle: begin_frame() → apply() per event → query
//
// Events are applied one at a time so a key handler dispatched for an
// event already sees that event's effect on held/pressed state.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers};

//=== StateTracker ========================================================

/// Tracks persistent state (keys held) and per-frame deltas (keys pressed/released).
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    modifiers: Modifiers,

    //--- Frame Deltas (reset by begin_frame) ------------------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas (pressed/released flags).
    pub(super) fn begin_frame(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
    }

    /// Applies one event.
    pub(super) fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                // Key repeat: only the UP → DOWN transition counts as a press
                if self.keys_down.insert(*key) {
                    self.keys_pressed_this_frame.insert(*key);
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.remove(key) {
                    self.keys_released_this_frame.insert(*key);
                }
            }
        }
    }

    /// Forgets every held key and this frame's deltas.
    pub(super) fn release_all(&mut self) {
        self.keys_down.clear();
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
        self.modifiers = Modifiers::NONE;
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    pub fn keys_pressed(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_pressed_this_frame.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
