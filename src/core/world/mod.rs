//=========================================================================
// World
//=========================================================================
//
// The loaded region (tile map + triggers) and the staged loader that
// replaces it.
//
// Region swaps are two-phase. A map-transfer trigger calls
// `load_region`, which builds the new region off to the side; the
// gameplay scene calls `commit_staged` once the trigger pass is over.
// A failed build leaves the current region untouched.
//
//=========================================================================

//=== Module Declarations =================================================

mod library;

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::collision::TileMap;
use crate::core::contracts::RegionLoader;
use crate::core::error::CoreResult;
use crate::core::trigger::{InteractionPolicy, TriggerRegistry};

//=== Public API ==========================================================

pub use library::{RegionData, RegionLibrary, RegionSource};

/// World tile edge length in pixels.
pub const TILE_SIZE: f32 = 64.0;

/// Tile edge length region data is authored against.
pub const AUTHORED_TILE_SIZE: f32 = 70.0;

//=== Region ==============================================================

pub struct Region {
    pub name: String,
    pub map: TileMap,
    pub triggers: TriggerRegistry,
}

impl Region {
    pub fn build(
        name: &str,
        data: &RegionData,
        tile_size: f32,
        policy: InteractionPolicy,
    ) -> CoreResult<Self> {
        let map = TileMap::parse(&data.map, tile_size, data.solid.iter().copied())?;

        let mut triggers = TriggerRegistry::new(tile_size, policy);
        triggers.load(&data.triggers, tile_size / data.authored_tile_size);

        Ok(Self { name: name.to_string(), map, triggers })
    }

    /// Region with no tiles and no triggers. Everything is solid.
    pub fn empty(tile_size: f32, policy: InteractionPolicy) -> Self {
        Self {
            name: String::new(),
            map: TileMap::empty(tile_size),
            triggers: TriggerRegistry::new(tile_size, policy),
        }
    }
}

//=== RegionStager ========================================================

struct RegionStager {
    source: Box<dyn RegionSource>,
    staged: Option<Region>,
    tile_size: f32,
    policy: InteractionPolicy,
}

impl RegionLoader for RegionStager {
    fn load_region(&mut self, name: &str) -> bool {
        let Some(data) = self.source.fetch(name) else {
            error!("Region `{}` not found", name);
            return false;
        };

        match Region::build(name, &data, self.tile_size, self.policy) {
            Ok(region) => {
                self.staged = Some(region);
                true
            }
            Err(err) => {
                error!("Region `{}` failed to build: {}", name, err);
                false
            }
        }
    }
}

//=== World ===============================================================

pub struct World {
    region: Region,
    loader: RegionStager,
    home: String,
}

impl World {
    //--- Construction -----------------------------------------------------

    /// A world with nothing loaded; call [`enter`](Self::enter) next.
    pub fn new(
        source: Box<dyn RegionSource>,
        home: &str,
        tile_size: f32,
        policy: InteractionPolicy,
    ) -> Self {
        Self {
            region: Region::empty(tile_size, policy),
            loader: RegionStager { source, staged: None, tile_size, policy },
            home: home.to_string(),
        }
    }

    pub fn empty(tile_size: f32) -> Self {
        Self::new(Box::new(RegionLibrary::new()), "", tile_size, InteractionPolicy::default())
    }

    //--- Access -----------------------------------------------------------

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn region_mut(&mut self) -> &mut Region {
        &mut self.region
    }

    /// Region plus loader, borrowed together for a trigger pass.
    pub fn split_mut(&mut self) -> (&mut Region, &mut dyn RegionLoader) {
        (&mut self.region, &mut self.loader)
    }

    /// Region new games and unknown saves start in.
    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn tile_size(&self) -> f32 {
        self.loader.tile_size
    }

    pub fn has_staged(&self) -> bool {
        self.loader.staged.is_some()
    }

    //--- Region Swaps -----------------------------------------------------

    /// Swaps in a staged region. Returns whether a swap happened.
    pub fn commit_staged(&mut self) -> bool {
        match self.loader.staged.take() {
            Some(region) => {
                info!("Entering region `{}`", region.name);
                self.region = region;
                true
            }
            None => false,
        }
    }

    /// Rebuilds the home region from its source, dropping any staged
    /// region and all trigger state (opened containers, cooldowns).
    pub fn reset(&mut self) -> bool {
        self.loader.staged = None;
        let home = self.home.clone();
        self.enter(&home)
    }

    /// Loads and commits `name` in one step.
    pub fn enter(&mut self, name: &str) -> bool {
        self.loader.load_region(name) && self.commit_staged()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
