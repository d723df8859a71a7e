//=========================================================================
// Action Input
//=========================================================================
//
// Resolves named actions against the key state through the current
// binding profile.
//
// Architecture:
//   (action, current profile) → keys → StateTracker → held / pressed
//                      └─ falls back to the `global` profile
//
// The profile tracks the active scene; switching it releases every held
// key so a key held across a scene change cannot leak into the new
// scene as a stale "held" action.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::bindings::KeyBindings;
use super::event::{InputEvent, KeyCode, Modifiers};
use super::state_tracker::StateTracker;
use crate::core::contracts::InputQuery;
use crate::core::error::CoreResult;

/// Profile every query consults after the current one.
pub const GLOBAL_PROFILE: &str = "global";

/// Profile used when a scene has no profile of its own.
pub const FALLBACK_PROFILE: &str = "game";

//=== ActionInput =========================================================

#[derive(Debug)]
pub struct ActionInput {
    bindings: KeyBindings,
    tracker: StateTracker,
    profile: String,
}

impl ActionInput {
    //--- Construction -----------------------------------------------------

    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            tracker: StateTracker::new(),
            profile: FALLBACK_PROFILE.to_string(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    pub fn begin_frame(&mut self) {
        self.tracker.begin_frame();
    }

    pub fn apply(&mut self, event: &InputEvent) {
        self.tracker.apply(event);
    }

    //--- Profiles ---------------------------------------------------------

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Selects the profile for `name`, or the fallback if none exists.
    /// A change of profile releases all held keys.
    pub fn set_profile(&mut self, name: &str) {
        let target = if self.bindings.has_profile(name) || name == GLOBAL_PROFILE {
            name
        } else {
            warn!("No input profile `{}`, using `{}`", name, FALLBACK_PROFILE);
            FALLBACK_PROFILE
        };

        if target == self.profile {
            return;
        }

        debug!("Input profile: {} -> {}", self.profile, target);
        self.profile = target.to_string();
        self.tracker.release_all();
    }

    //--- Bindings ---------------------------------------------------------

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Rebinds one action and persists the bindings immediately.
    pub fn rebind(&mut self, profile: &str, action: &str, keys: Vec<KeyCode>) -> CoreResult<()> {
        self.bindings.set(profile, action, keys);
        self.bindings.save()
    }

    /// Keys for `action`: current profile first, then global.
    fn keys_for<'a>(&'a self, action: &'a str) -> impl Iterator<Item = KeyCode> + 'a {
        self.bindings
            .keys(&self.profile, action)
            .iter()
            .chain(self.bindings.keys(GLOBAL_PROFILE, action))
            .copied()
    }

    /// Whether `key` is bound to `action` in the current or global profile.
    pub fn is_action_key(&self, action: &str, key: KeyCode) -> bool {
        self.keys_for(action).any(|bound| bound == key)
    }

    //--- Raw State --------------------------------------------------------

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.tracker.is_key_down(key)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.tracker.modifiers()
    }

    /// `true` on the frame `action` stopped being held by any of its keys.
    pub fn action_released(&self, action: &str) -> bool {
        self.keys_for(action).any(|key| self.tracker.is_key_released(key))
    }
}

impl Default for ActionInput {
    fn default() -> Self {
        Self::new(KeyBindings::defaults())
    }
}

//=== InputQuery ==========================================================

impl InputQuery for ActionInput {
    fn action(&self, name: &str) -> bool {
        self.keys_for(name).any(|key| self.tracker.is_key_down(key))
    }

    fn action_pressed(&self, name: &str) -> bool {
        self.keys_for(name).any(|key| self.tracker.is_key_pressed(key))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn press(input: &mut ActionInput, key: KeyCode) {
        input.apply(&InputEvent::KeyDown { key, modifiers: Modifiers::NONE });
    }

    #[test]
    fn actions_resolve_through_current_profile() {
        let mut input = ActionInput::default();
        input.begin_frame();
        press(&mut input, KeyCode::ArrowUp);

        assert!(input.action("move_up"));
        assert!(input.action_pressed("move_up"));
        assert!(!input.action("move_down"));

        input.begin_frame();
        assert!(input.action("move_up"));
        assert!(!input.action_pressed("move_up"));
    }

    #[test]
    fn global_profile_applies_everywhere() {
        let mut input = ActionInput::default();
        input.set_profile("lobby");
        input.begin_frame();
        press(&mut input, KeyCode::Grave);

        assert!(input.action_pressed("console"));
        assert!(input.is_action_key("console", KeyCode::Grave));
        assert!(!input.is_action_key("move_up", KeyCode::KeyW));
        assert!(input.is_action_key("menu_up", KeyCode::KeyW));
    }

    #[test]
    fn unknown_profile_falls_back_to_game() {
        let mut input = ActionInput::default();
        input.set_profile("lobby");
        input.set_profile("attic");
        assert_eq!(input.profile(), FALLBACK_PROFILE);
    }

    #[test]
    fn profile_switch_releases_held_keys() {
        let mut input = ActionInput::default();
        input.begin_frame();
        press(&mut input, KeyCode::KeyW);
        assert!(input.action("move_up"));

        input.set_profile("pause_menu");
        input.set_profile("game");

        assert!(!input.action("move_up"));
        assert!(!input.is_key_down(KeyCode::KeyW));
    }

    #[test]
    fn same_profile_keeps_held_keys() {
        let mut input = ActionInput::default();
        press(&mut input, KeyCode::KeyW);
        input.set_profile("game");
        assert!(input.action("move_up"));
    }

    #[test]
    fn confirm_is_interact_edge() {
        let mut input = ActionInput::default();
        input.begin_frame();
        press(&mut input, KeyCode::KeyE);
        assert!(input.confirm_pressed());

        input.begin_frame();
        assert!(!input.confirm_pressed());
    }

    #[test]
    fn rebind_persists_immediately() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key_bindings.json");
        let mut input = ActionInput::new(KeyBindings::load_or_create(&path).unwrap());

        input.rebind("game", "interact", vec![KeyCode::KeyF]).unwrap();
        assert!(input.is_action_key("interact", KeyCode::KeyF));

        let reloaded = KeyBindings::load_or_create(&path).unwrap();
        assert_eq!(reloaded.keys("game", "interact"), &[KeyCode::KeyF]);
    }
}
