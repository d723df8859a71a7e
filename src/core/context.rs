//=========================================================================
// Game Context
//=========================================================================
//
// Everything a scene may read or change, passed explicitly into every
// scene hook. Owned by the core thread.
//
//   session  player record, inventory, settings
//   input    action queries for the active profile
//   world    loaded region and the region loader
//   scenes   transition requests, applied at the frame boundary
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::ActionInput;
use crate::core::scene::SceneRequests;
use crate::core::session::SessionState;
use crate::core::world::{World, TILE_SIZE};

//=== GameContext =========================================================

pub struct GameContext {
    pub session: SessionState,
    pub input: ActionInput,
    pub world: World,
    pub scenes: SceneRequests,
    pub tile_size: f32,
}

impl GameContext {
    pub fn new(session: SessionState, input: ActionInput, world: World) -> Self {
        let tile_size = world.tile_size();
        Self { session, input, world, scenes: SceneRequests::new(), tile_size }
    }
}

impl Default for GameContext {
    /// Fresh session, default bindings, empty world.
    fn default() -> Self {
        Self::new(SessionState::new(), ActionInput::default(), World::empty(TILE_SIZE))
    }
}
