//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use itcubia::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::{CoreRuntime, TickControl};

// Errors
pub use crate::core::error::{CoreError, CoreResult};

// Shared context and collaborator contracts
pub use crate::core::context::GameContext;
pub use crate::core::contracts::{InputQuery, PositionSink, RegionLoader, SolidityQuery};

// Input system
pub use crate::core::input::{ActionInput, KeyBindings, KeyCode, Modifiers};

// Scene system
pub use crate::core::scene::{Resizable, Scene, SceneCoordinator, SceneParams};
pub use crate::core::render::Frame;

// World
pub use crate::core::geometry::Rect;
pub use crate::core::world::{RegionLibrary, RegionSource};
