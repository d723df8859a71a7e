//=========================================================================
// Trigger Records
//=========================================================================
//
// Authoring-side trigger description as it appears in region JSON:
//
//   { "id": "chest_1", "type": "chest", "x": 3, "y": 2,
//     "width": 70, "height": 70,
//     "properties": { "lock": "<><", "loot": "healing_potion:3" } }
//
// Zone geometry is in authoring units (Y-up) and is multiplied by the
// load scale; teleport targets are world units. Properties are loosely
// typed: numbers may be written as strings and strings as numbers.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

//=== Internal Dependencies ===============================================

use super::container::{default_loot, parse_loot, Container, LockSequence};
use super::transfer::MapTransfer;
use super::{Trigger, TriggerId, TriggerKind};
use crate::core::geometry::Rect;

//=== TriggerRecord =======================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl TriggerRecord {
    pub fn new(kind: &str, rect: Rect) -> Self {
        Self {
            id: None,
            kind: kind.to_string(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    //--- Building ---------------------------------------------------------

    /// Builds the runtime trigger. `index` names id-less records.
    pub fn build(&self, index: usize, scale: f32) -> Trigger {
        let id = match &self.id {
            Some(id) if !id.is_empty() => TriggerId::new(id.clone()),
            _ => TriggerId::new(format!("event_{}", index)),
        };
        let rect = Rect::new(self.x, self.y, self.width, self.height).scaled(scale);

        let kind = match self.kind.to_ascii_lowercase().as_str() {
            "chest" | "container" => TriggerKind::Container(self.container()),
            "teleport" | "map_transfer" => TriggerKind::MapTransfer(self.transfer()),
            "" | "generic" | "event" => TriggerKind::Generic,
            other => {
                warn!("Trigger `{}` has unknown type `{}`, treating as generic", id, other);
                TriggerKind::Generic
            }
        };

        Trigger::new(id, rect, kind)
    }

    fn container(&self) -> Container {
        let lock = self.text("lock").map(|lock| LockSequence::parse(&lock)).unwrap_or_default();
        let loot = self
            .text("loot")
            .map(|loot| parse_loot(&loot))
            .filter(|loot| !loot.is_empty())
            .unwrap_or_else(default_loot);
        Container::new(lock, loot)
    }

    /// Destination coordinates are already world units.
    fn transfer(&self) -> MapTransfer {
        let target_region = self.text("target_map").filter(|name| !name.is_empty());
        let target_x = self.number("target_x").or_else(|| self.number("target_X")).unwrap_or(0.0);
        let target_y = self.number("target_y").or_else(|| self.number("target_Y")).unwrap_or(0.0);
        MapTransfer::new(target_region, target_x, target_y)
    }

    //--- Property Access --------------------------------------------------

    fn text(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Null => None,
            other => {
                warn!("Property `{}` should be text, found {}", key, other);
                None
            }
        }
    }

    fn number(&self, key: &str) -> Option<f32> {
        match self.properties.get(key)? {
            Value::Number(number) => number.as_f64().map(|n| n as f32),
            Value::String(text) => match text.trim().parse::<f32>() {
                Ok(n) => Some(n),
                Err(_) => {
                    warn!("Property `{}` is not a number: {:?}", key, text);
                    None
                }
            },
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
