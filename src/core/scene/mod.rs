//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle and the primary + overlay stack that routes frames.
//
// Architecture:
//   SceneCoordinator
//     ├─ scenes:   HashMap<String, Box<dyn Scene>>
//     ├─ primary:  Option<String>
//     └─ overlays: Vec<String>   (bottom → top)
//
// Flow:
//   key events → active scene
//   tick()     → active scene
//   render()   → primary, then overlays bottom → top
//   apply_requests() → SceneRequests queued by scenes during the frame
//
//=========================================================================

//=== Module Declarations =================================================

mod coordinator;
mod requests;

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;
use crate::core::input::{KeyCode, Modifiers};
use crate::core::render::Frame;
use crate::core::trigger::TriggerId;

//=== Public API ==========================================================

pub use coordinator::SceneCoordinator;
pub use requests::{SceneRequest, SceneRequests};

//=== SceneParams =========================================================

/// Arguments handed to [`Scene::on_enter`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SceneParams {
    #[default]
    None,
    /// Menu cursor to start on.
    MenuIndex(usize),
    /// Container the lock-picking overlay works on.
    LockPicking { trigger: TriggerId },
}

//=== Resizable ===========================================================

/// Optional capability for scenes that lay out against the window size.
pub trait Resizable {
    fn on_resize(&mut self, width: u32, height: u32);
}

//=== Scene Trait =========================================================

/// A screen or mode: one instance per id, reused across activations.
///
/// Only `update()` is required. `on_enter`/`on_exit` bracket every
/// activation, `on_pause`/`on_resume` bracket being covered by an
/// overlay. Transitions are requested through `ctx.scenes` and applied
/// by the coordinator at the end of the frame.
///
/// ```rust
/// # use itcubia::prelude::*;
/// struct Splash;
///
/// impl Scene for Splash {
///     fn update(&mut self, _dt: f32, ctx: &mut GameContext) {
///         ctx.scenes.switch_to("lobby", SceneParams::None);
///     }
/// }
/// ```
pub trait Scene: Send {
    fn on_enter(&mut self, _params: &SceneParams, _ctx: &mut GameContext) {}

    fn on_exit(&mut self, _ctx: &mut GameContext) {}

    /// An overlay was pushed on top of this scene.
    fn on_pause(&mut self, _ctx: &mut GameContext) {}

    /// The overlay above this scene was popped.
    fn on_resume(&mut self, _ctx: &mut GameContext) {}

    /// Called every tick while this scene is the active one.
    fn update(&mut self, dt: f32, ctx: &mut GameContext);

    /// Called every frame while the scene is on the stack, active or not.
    fn draw(&self, _frame: &mut Frame, _ctx: &GameContext) {}

    fn on_key_down(&mut self, _key: KeyCode, _modifiers: Modifiers, _ctx: &mut GameContext) {}

    fn on_key_up(&mut self, _key: KeyCode, _modifiers: Modifiers, _ctx: &mut GameContext) {}

    /// Resize capability, if the scene has one.
    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        None
    }
}
