//=========================================================================
// Collision
//=========================================================================
//
// Hitboxes, the sliding resolver and the tile-grid solidity source.
//
// Architecture:
//   Body ──Hitbox──> corners ──probe/resolve──> SolidityQuery (TileMap)
//
//=========================================================================

//=== Module Declarations =================================================

mod hitbox;
mod resolver;
mod tile_map;

//=== Public API ==========================================================

pub use hitbox::{Body, Hitbox, HitboxOffsets, Movable};
pub use resolver::{probe, resolve, AxisClearance};
pub use tile_map::{TileMap, FLOOR_TILE, WALL_TILE};
