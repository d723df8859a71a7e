//=========================================================================
// Input Event Types
//
// Internal representation of keyboard input.
//
// The platform layer (winit) translates its key codes into `KeyCode`
// before anything reaches the core thread, so scenes and bindings never
// see platform types.
//
// Responsibilities:
// - Represent physical keys in a stable, portable way
// - Name keys for the persisted binding file (`"ESCAPE"`, `"W"`, ...)
// - Carry modifier state (Shift, Ctrl, Alt) alongside key transitions
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held / pressed / released)
//         ↓
//    ActionInput (named actions per profile)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is the same physical key on QWERTY and AZERTY layouts.
///
/// Coverage:
/// - Alphanumeric keys (A-Z, 0-9)
/// - Arrow keys
/// - The special keys the game binds (Escape, Enter, F11, grave, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Backquote / tilde key, opens the developer console.
    Grave,

    /// `-` key; with Shift it types `_` in the console.
    Minus,

    ShiftLeft,
    F11,
    F12,

    /// Fallback for keys the platform layer does not map.
    Unidentified,
}

//--- Lookup Tables -------------------------------------------------------

const LETTERS: [KeyCode; 26] = [
    KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
    KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
    KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
    KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
    KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
    KeyCode::KeyZ,
];

const DIGITS: [KeyCode; 10] = [
    KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
    KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
];

const SPECIAL_NAMES: [(KeyCode, &str); 16] = [
    (KeyCode::ArrowUp, "UP"),
    (KeyCode::ArrowDown, "DOWN"),
    (KeyCode::ArrowLeft, "LEFT"),
    (KeyCode::ArrowRight, "RIGHT"),
    (KeyCode::Space, "SPACE"),
    (KeyCode::Enter, "ENTER"),
    (KeyCode::Escape, "ESCAPE"),
    (KeyCode::Tab, "TAB"),
    (KeyCode::Backspace, "BACKSPACE"),
    (KeyCode::Delete, "DELETE"),
    (KeyCode::Grave, "GRAVE"),
    (KeyCode::Minus, "MINUS"),
    (KeyCode::ShiftLeft, "LSHIFT"),
    (KeyCode::F11, "F11"),
    (KeyCode::F12, "F12"),
    (KeyCode::Unidentified, "UNIDENTIFIED"),
];

//--- Implementation ------------------------------------------------------

impl KeyCode {
    /// Name used in the binding file. Letters are `"A"`..`"Z"`, digits
    /// `"0"`..`"9"`.
    pub fn name(self) -> String {
        if let Some(c) = self.letter() {
            return c.to_string();
        }
        if let Some(d) = self.digit() {
            return d.to_string();
        }
        SPECIAL_NAMES
            .iter()
            .find(|(key, _)| *key == self)
            .map_or_else(|| "UNIDENTIFIED".to_string(), |(_, name)| name.to_string())
    }

    /// Parses a binding-file key name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_uppercase();

        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_uppercase() {
                return Some(LETTERS[(c as u8 - b'A') as usize]);
            }
            if c.is_ascii_digit() {
                return Some(DIGITS[(c as u8 - b'0') as usize]);
            }
        }

        SPECIAL_NAMES
            .iter()
            .filter(|(key, _)| *key != Self::Unidentified)
            .find(|(_, candidate)| *candidate == name)
            .map(|(key, _)| *key)
    }

    /// Upper-case letter for A-Z keys.
    pub fn letter(self) -> Option<char> {
        LETTERS
            .iter()
            .position(|key| *key == self)
            .map(|index| (b'A' + index as u8) as char)
    }

    /// Digit character for the number row.
    pub fn digit(self) -> Option<char> {
        DIGITS
            .iter()
            .position(|key| *key == self)
            .map(|index| (b'0' + index as u8) as char)
    }
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// Left and right variants are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };
}

//=== InputEvent ==========================================================

/// Key transition from the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
}

impl InputEvent {
    pub fn key(&self) -> KeyCode {
        match self {
            Self::KeyDown { key, .. } | Self::KeyUp { key, .. } => *key,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::KeyDown { modifiers, .. } | Self::KeyUp { modifiers, .. } => *modifiers,
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(self, Self::KeyDown { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Key Name Tests
    //=====================================================================

    #[test]
    fn binding_names_match_file_format() {
        assert_eq!(KeyCode::ArrowUp.name(), "UP");
        assert_eq!(KeyCode::ShiftLeft.name(), "LSHIFT");
        assert_eq!(KeyCode::Grave.name(), "GRAVE");
        assert_eq!(KeyCode::KeyW.name(), "W");
        assert_eq!(KeyCode::Digit7.name(), "7");
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(KeyCode::from_name("escape"), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_name(" e "), Some(KeyCode::KeyE));
        assert_eq!(KeyCode::from_name("F11"), Some(KeyCode::F11));
        assert_eq!(KeyCode::from_name("0"), Some(KeyCode::Digit0));
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert_eq!(KeyCode::from_name("HYPER"), None);
        assert_eq!(KeyCode::from_name(""), None);
        assert_eq!(KeyCode::from_name("UNIDENTIFIED"), None);
    }

    /// Every nameable key parses back from its own name.
    #[test]
    fn names_parse_back() {
        let keys = LETTERS
            .iter()
            .chain(DIGITS.iter())
            .chain(SPECIAL_NAMES.iter().map(|(key, _)| key))
            .filter(|key| **key != KeyCode::Unidentified);

        for &key in keys {
            assert_eq!(KeyCode::from_name(&key.name()), Some(key), "{:?}", key);
        }
    }

    #[test]
    fn letter_and_digit_chars() {
        assert_eq!(KeyCode::KeyZ.letter(), Some('Z'));
        assert_eq!(KeyCode::Digit3.digit(), Some('3'));
        assert_eq!(KeyCode::Minus.letter(), None);
    }

    //=====================================================================
    // Event Tests
    //=====================================================================

    #[test]
    fn event_accessors() {
        let down = InputEvent::KeyDown { key: KeyCode::KeyA, modifiers: Modifiers::SHIFT };
        let up = InputEvent::KeyUp { key: KeyCode::KeyA, modifiers: Modifiers::NONE };

        assert!(down.is_down());
        assert!(!up.is_down());
        assert_eq!(down.key(), up.key());
        assert_eq!(down.modifiers(), Modifiers::SHIFT);
        assert_ne!(down, up);
    }
}
