//=========================================================================
// Region Library
//=========================================================================
//
// Authoring-side region data and the in-memory source that serves it.
//
// JSON layout (one object per region name):
//
//   {
//     "start": {
//       "map": "32 32 32\n32 0 32\n32 32 32",
//       "solid": [32],
//       "authored_tile_size": 70,
//       "triggers": [ { "type": "chest", ... } ]
//     }
//   }
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::info;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::AUTHORED_TILE_SIZE;
use crate::core::error::CoreResult;
use crate::core::trigger::TriggerRecord;

//=== RegionData ==========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionData {
    /// Whitespace-separated tile ids, top row first.
    pub map: String,
    #[serde(default)]
    pub solid: Vec<u16>,
    /// Tile edge length the trigger geometry was authored against.
    #[serde(default = "default_authored_tile_size")]
    pub authored_tile_size: f32,
    #[serde(default)]
    pub triggers: Vec<TriggerRecord>,
}

fn default_authored_tile_size() -> f32 {
    AUTHORED_TILE_SIZE
}

//=== RegionSource ========================================================

/// Asset collaborator that resolves region names.
pub trait RegionSource: Send {
    fn fetch(&self, name: &str) -> Option<RegionData>;
}

//=== RegionLibrary =======================================================

#[derive(Debug, Clone, Default)]
pub struct RegionLibrary {
    regions: HashMap<String, RegionData>,
}

impl RegionLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> CoreResult<Self> {
        let regions: HashMap<String, RegionData> = serde_json::from_str(json)?;
        info!("Region library: {} regions", regions.len());
        Ok(Self { regions })
    }

    pub fn insert(&mut self, name: &str, data: RegionData) {
        self.regions.insert(name.to_string(), data);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.regions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl RegionSource for RegionLibrary {
    fn fetch(&self, name: &str) -> Option<RegionData> {
        self.regions.get(name).cloned()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
