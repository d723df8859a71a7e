//=========================================================================
// Input System
//
// Keyboard input for the core thread.
//
// Responsibilities:
// - Track held keys and per-frame press/release edges
// - Resolve named actions through per-scene binding profiles
// - Load, save and rebind the persisted key-binding file
//
// Notes:
// Owned by the GameContext and fed by the CoreRuntime, one event at a
// time, before each event is dispatched to the active scene.
//
//=========================================================================

//=== Submodules ==========================================================

mod actions;
mod bindings;
pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use actions::{ActionInput, FALLBACK_PROFILE, GLOBAL_PROFILE};
pub use bindings::{KeyBindings, Profile};
pub use event::{InputEvent, KeyCode, Modifiers};
pub use state_tracker::StateTracker;
