//=========================================================================
// Collaborator Contracts
//=========================================================================
//
// The four services the interaction layer consumes but does not own:
//
//   SolidityQuery   world-space solid/non-solid test (collision)
//   RegionLoader    swap in a world region by name (map transfer)
//   PositionSink    the persisted "where is the player" record
//   InputQuery      named-action level and edge queries
//
// Implementations live elsewhere in the crate (TileMap, World,
// PlayerState, ActionInput); tests substitute closures and mocks.
//
//=========================================================================

/// Action whose press edge confirms container interaction.
pub const CONFIRM_ACTION: &str = "interact";

//=== SolidityQuery =======================================================

/// Answers whether a world-space point is blocked.
///
/// Implementations must report every point outside the loaded region as
/// solid (closed world).
pub trait SolidityQuery {
    fn is_solid(&self, x: f32, y: f32) -> bool;
}

impl<F> SolidityQuery for F
where
    F: Fn(f32, f32) -> bool,
{
    fn is_solid(&self, x: f32, y: f32) -> bool {
        self(x, y)
    }
}

//=== RegionLoader ========================================================

/// Loads a replacement world region by name.
///
/// Returns `false` when the region is unknown or malformed; the current
/// region must then stay untouched. On `true` the caller re-fetches map
/// bounds and solidity before the next movement update.
pub trait RegionLoader {
    fn load_region(&mut self, name: &str) -> bool;
}

//=== PositionSink ========================================================

/// Single source of truth for the player's persisted position.
pub trait PositionSink {
    /// Current persisted world position.
    fn position(&self) -> (f32, f32);

    /// Persists a new position, optionally moving to another region.
    fn set_position(&mut self, x: f32, y: f32, region: Option<&str>);
}

//=== InputQuery ==========================================================

/// Named-action input queries. Action names are an open namespace.
pub trait InputQuery {
    /// `true` while any key bound to `name` is held.
    fn action(&self, name: &str) -> bool;

    /// `true` only on the frame a key bound to `name` went down.
    fn action_pressed(&self, name: &str) -> bool;

    /// Edge-detected confirm used by container interaction.
    fn confirm_pressed(&self) -> bool {
        self.action_pressed(CONFIRM_ACTION)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
