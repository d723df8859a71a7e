//=========================================================================
// Key Bindings
//=========================================================================
//
// Named-action key bindings grouped into profiles, persisted as JSON:
//
//   {
//     "global": { "console": ["GRAVE"], ... },
//     "game":   { "move_up": ["W", "UP"], ... }
//   }
//
// One profile per scene id plus `global`, which every scene sees.
// Load-or-create never leaves the game without bindings: a missing file
// is created from the defaults, a malformed one is replaced by them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::event::KeyCode;
use crate::core::error::CoreResult;

/// Action name → bound keys.
pub type Profile = BTreeMap<String, Vec<KeyCode>>;

/// On-disk shape: key names instead of codes.
type FileFormat = BTreeMap<String, BTreeMap<String, Vec<String>>>;

//=== KeyBindings =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    profiles: BTreeMap<String, Profile>,
    path: Option<PathBuf>,
}

impl KeyBindings {
    //--- Construction -----------------------------------------------------

    /// Built-in profiles, not tied to a file.
    pub fn defaults() -> Self {
        use KeyCode::*;

        let menu: &[(&str, &[KeyCode])] = &[
            ("menu_up", &[ArrowUp, KeyW]),
            ("menu_down", &[ArrowDown, KeyS]),
            ("select", &[Enter, KeyE]),
            ("back", &[Escape]),
        ];

        let mut profiles = BTreeMap::new();
        profiles.insert(
            "global".to_string(),
            profile(&[("fullscreen", &[F11]), ("screenshot", &[F12]), ("console", &[Grave])]),
        );
        profiles.insert("lobby".to_string(), profile(menu));
        profiles.insert(
            "pause_menu".to_string(),
            profile(&[
                ("menu_up", &[ArrowUp, KeyW]),
                ("menu_down", &[ArrowDown, KeyS]),
                ("select", &[Enter, Space, KeyE]),
                ("back", &[Escape]),
            ]),
        );
        let mut settings = profile(menu);
        settings.insert("menu_left".to_string(), vec![KeyA, ArrowLeft]);
        settings.insert("menu_right".to_string(), vec![KeyD, ArrowRight]);
        profiles.insert("settings".to_string(), settings);
        profiles.insert(
            "game".to_string(),
            profile(&[
                ("move_up", &[KeyW, ArrowUp]),
                ("move_down", &[KeyS, ArrowDown]),
                ("move_left", &[KeyA, ArrowLeft]),
                ("move_right", &[KeyD, ArrowRight]),
                ("inventory", &[KeyI, Tab]),
                ("interact", &[KeyE]),
                ("pause", &[Escape, KeyP]),
                ("run", &[ShiftLeft]),
            ]),
        );
        profiles.insert(
            "lock_picking".to_string(),
            profile(&[
                ("pick_left", &[KeyA, ArrowLeft]),
                ("pick_right", &[KeyD, ArrowRight]),
                ("cancel", &[Escape]),
            ]),
        );
        profiles.insert(
            "cheat_console".to_string(),
            profile(&[("submit", &[Enter]), ("close", &[Escape, Grave])]),
        );

        Self { profiles, path: None }
    }

    /// Loads `path`, creating it from the defaults when absent and
    /// rewriting it when malformed.
    pub fn load_or_create(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();

        if !path.exists() {
            info!("No key bindings at {}, writing defaults", path.display());
            let bindings = Self { path: Some(path), ..Self::defaults() };
            bindings.save()?;
            return Ok(bindings);
        }

        let raw = fs::read_to_string(&path)?;
        match serde_json::from_str::<FileFormat>(&raw) {
            Ok(file) => {
                let mut bindings = Self::from_file(file);
                bindings.fill_missing_profiles();
                bindings.path = Some(path);
                info!("Loaded key bindings from {}", bindings.display_path());
                Ok(bindings)
            }
            Err(err) => {
                warn!("Key bindings at {} are malformed ({}), restoring defaults", path.display(), err);
                let bindings = Self { path: Some(path), ..Self::defaults() };
                bindings.save()?;
                Ok(bindings)
            }
        }
    }

    //--- Persistence ------------------------------------------------------

    /// Writes the bindings to their file. A file-less set is not saved.
    pub fn save(&self) -> CoreResult<()> {
        let Some(path) = &self.path else {
            debug!("Key bindings have no file; skipping save");
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.to_file())?;
        fs::write(path, json)?;
        debug!("Saved key bindings to {}", path.display());
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn display_path(&self) -> String {
        self.path().map_or_else(|| "<memory>".to_string(), |path| path.display().to_string())
    }

    //--- Queries ----------------------------------------------------------

    pub fn has_profile(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Keys bound to `action` in `profile`; empty when either is unknown.
    pub fn keys(&self, profile: &str, action: &str) -> &[KeyCode] {
        self.profiles
            .get(profile)
            .and_then(|actions| actions.get(action))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    //--- Mutation ---------------------------------------------------------

    /// Replaces the keys of one action, creating the profile if needed.
    pub fn set(&mut self, profile: &str, action: &str, keys: Vec<KeyCode>) {
        self.profiles
            .entry(profile.to_string())
            .or_default()
            .insert(action.to_string(), keys);
    }

    //--- File Format ------------------------------------------------------

    fn from_file(file: FileFormat) -> Self {
        let profiles = file
            .into_iter()
            .map(|(name, actions)| {
                let actions = actions
                    .into_iter()
                    .map(|(action, names)| {
                        let keys = names
                            .iter()
                            .filter_map(|key| {
                                let code = KeyCode::from_name(key);
                                if code.is_none() {
                                    warn!("Unknown key `{}` bound to {}.{}", key, name, action);
                                }
                                code
                            })
                            .collect();
                        (action, keys)
                    })
                    .collect();
                (name, actions)
            })
            .collect();

        Self { profiles, path: None }
    }

    fn to_file(&self) -> FileFormat {
        self.profiles
            .iter()
            .map(|(name, actions)| {
                let actions = actions
                    .iter()
                    .map(|(action, keys)| (action.clone(), keys.iter().map(|key| key.name()).collect()))
                    .collect();
                (name.clone(), actions)
            })
            .collect()
    }

    /// Adds default profiles the file predates.
    fn fill_missing_profiles(&mut self) {
        for (name, profile) in Self::defaults().profiles {
            if !self.profiles.contains_key(&name) {
                debug!("Key bindings: adding default profile `{}`", name);
                self.profiles.insert(name, profile);
            }
        }
    }
}

fn profile(entries: &[(&str, &[KeyCode])]) -> Profile {
    entries
        .iter()
        .map(|(action, keys)| (action.to_string(), keys.to_vec()))
        .collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::defaults()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_cover_every_scene_profile() {
        let bindings = KeyBindings::defaults();
        for profile in ["global", "lobby", "pause_menu", "settings", "game", "lock_picking", "cheat_console"] {
            assert!(bindings.has_profile(profile), "missing {}", profile);
        }
        assert_eq!(bindings.keys("game", "interact"), &[KeyCode::KeyE]);
        assert_eq!(bindings.keys("global", "console"), &[KeyCode::Grave]);
        assert!(bindings.keys("game", "fly").is_empty());
        assert!(bindings.keys("attic", "interact").is_empty());
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings").join("key_bindings.json");

        let bindings = KeyBindings::load_or_create(&path).unwrap();

        assert!(path.exists());
        assert_eq!(bindings.profile("game"), KeyBindings::defaults().profile("game"));

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["game"]["move_up"], serde_json::json!(["W", "UP"]));
    }

    #[test]
    fn malformed_file_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key_bindings.json");
        fs::write(&path, "{ not json").unwrap();

        let bindings = KeyBindings::load_or_create(&path).unwrap();

        assert_eq!(bindings.keys("game", "pause"), &[KeyCode::Escape, KeyCode::KeyP]);
        let rewritten = fs::read_to_string(&path).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&rewritten).is_ok());
    }

    #[test]
    fn file_values_override_defaults_and_unknown_keys_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key_bindings.json");
        fs::write(&path, r#"{ "game": { "interact": ["F", "HYPER"] } }"#).unwrap();

        let bindings = KeyBindings::load_or_create(&path).unwrap();

        assert_eq!(bindings.keys("game", "interact"), &[KeyCode::KeyF]);
        assert!(bindings.keys("game", "move_up").is_empty());
        assert!(bindings.has_profile("cheat_console"));
    }

    #[test]
    fn save_round_trips_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key_bindings.json");

        let mut bindings = KeyBindings::load_or_create(&path).unwrap();
        bindings.set("game", "interact", vec![KeyCode::KeyF, KeyCode::Enter]);
        bindings.save().unwrap();

        let reloaded = KeyBindings::load_or_create(&path).unwrap();
        assert_eq!(reloaded.keys("game", "interact"), &[KeyCode::KeyF, KeyCode::Enter]);
    }
}
