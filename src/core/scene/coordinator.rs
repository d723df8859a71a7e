//=========================================================================
// Scene Coordinator
//=========================================================================
//
// Registry of scenes by id plus the primary scene and overlay stack.
//
// Exactly one scene is active: the top overlay, or the primary when no
// overlay is stacked. Only the active scene receives update and input;
// every stacked scene draws, primary first.
//
// Lifecycle pairing:
//   switch_to    on_exit(primary), on_exit(overlays top → bottom), on_enter(target)
//   push_overlay on_pause(active), on_enter(overlay)
//   pop_overlay  on_exit(top), on_resume(new active)
//
// Failures are logged and returned, never panicked on: the frame loop
// keeps running whatever a scene asked for.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneParams, SceneRequest};
use crate::core::context::GameContext;
use crate::core::error::{CoreError, CoreResult};
use crate::core::input::{KeyCode, Modifiers, FALLBACK_PROFILE};
use crate::core::render::Frame;
use crate::core::TickControl;

/// Upper bound on request rounds per frame; scenes that keep queueing
/// requests from their own lifecycle hooks cannot stall the loop.
const MAX_REQUEST_ROUNDS: usize = 32;

//=== SceneSlot ===========================================================

struct SceneSlot {
    scene: Box<dyn Scene>,
    is_active: bool,
}

//=== SceneCoordinator ====================================================

#[derive(Default)]
pub struct SceneCoordinator {
    scenes: HashMap<String, SceneSlot>,
    primary: Option<String>,
    overlays: Vec<String>,
}

impl SceneCoordinator {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Stores `scene` under `id`. An id can only be registered once.
    pub fn register<T>(&mut self, id: &str, scene: T) -> CoreResult<()>
    where
        T: Scene + 'static,
    {
        if self.scenes.contains_key(id) {
            warn!("Scene `{}` is already registered", id);
            return Err(CoreError::DuplicateSceneId(id.to_string()));
        }

        debug!("Registered scene `{}`", id);
        self.scenes.insert(id.to_string(), SceneSlot { scene: Box::new(scene), is_active: false });
        Ok(())
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    //--- Queries ----------------------------------------------------------

    /// Top overlay if any, else the primary scene.
    pub fn active_scene(&self) -> Option<&str> {
        self.overlays.last().or(self.primary.as_ref()).map(String::as_str)
    }

    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    /// Overlay ids, bottom to top.
    pub fn overlays(&self) -> &[String] {
        &self.overlays
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.scenes.get(id).is_some_and(|slot| slot.is_active)
    }

    //--- Transitions ------------------------------------------------------

    /// Replaces the primary scene and clears the overlay stack.
    pub fn switch_to(&mut self, id: &str, params: SceneParams, ctx: &mut GameContext) -> CoreResult<()> {
        self.ensure_registered(id)?;
        info!("Switching to scene `{}`", id);

        if let Some(previous) = self.primary.take() {
            self.exit(&previous, ctx);
        }

        let overlays = std::mem::take(&mut self.overlays);
        for overlay in overlays.iter().rev() {
            self.exit(overlay, ctx);
        }

        self.primary = Some(id.to_string());
        self.sync_active(ctx);

        if let Some(scene) = self.scene_mut(id) {
            scene.on_enter(&params, ctx);
        }
        Ok(())
    }

    /// Pauses the active scene and stacks `id` over it.
    pub fn push_overlay(&mut self, id: &str, params: SceneParams, ctx: &mut GameContext) -> CoreResult<()> {
        self.ensure_registered(id)?;

        if self.primary.as_deref() == Some(id) || self.overlays.iter().any(|overlay| overlay == id) {
            warn!("Scene `{}` is already on the stack, not pushing", id);
            return Err(CoreError::OverlayAlreadyStacked(id.to_string()));
        }

        if let Some(active) = self.active_scene().map(str::to_string) {
            if let Some(scene) = self.scene_mut(&active) {
                scene.on_pause(ctx);
            }
        }

        debug!("Pushing overlay `{}`", id);
        self.overlays.push(id.to_string());
        self.sync_active(ctx);

        if let Some(scene) = self.scene_mut(id) {
            scene.on_enter(&params, ctx);
        }
        Ok(())
    }

    /// Removes the top overlay and resumes whatever is now active.
    pub fn pop_overlay(&mut self, ctx: &mut GameContext) -> Option<String> {
        let Some(top) = self.overlays.pop() else {
            warn!("pop_overlay with no overlay on the stack");
            return None;
        };

        debug!("Popping overlay `{}`", top);
        self.exit(&top, ctx);
        self.sync_active(ctx);

        if let Some(active) = self.active_scene().map(str::to_string) {
            if let Some(scene) = self.scene_mut(&active) {
                scene.on_resume(ctx);
            }
        }
        Some(top)
    }

    /// Applies every queued request in FIFO order, including requests
    /// queued by the lifecycle hooks those requests trigger.
    pub fn apply_requests(&mut self, ctx: &mut GameContext) -> TickControl {
        let mut control = TickControl::Continue;

        for _ in 0..MAX_REQUEST_ROUNDS {
            let requests = ctx.scenes.take();
            if requests.is_empty() {
                return control;
            }

            for request in requests {
                match request {
                    SceneRequest::SwitchTo { id, params } => {
                        let _ = self.switch_to(&id, params, ctx);
                    }
                    SceneRequest::PushOverlay { id, params } => {
                        let _ = self.push_overlay(&id, params, ctx);
                    }
                    SceneRequest::PopOverlay => {
                        self.pop_overlay(ctx);
                    }
                    SceneRequest::Quit => {
                        info!("Quit requested");
                        control = TickControl::Exit;
                    }
                }
            }
        }

        warn!("Scene requests still pending after {} rounds, dropping", MAX_REQUEST_ROUNDS);
        ctx.scenes.take();
        control
    }

    //--- Frame Routing ----------------------------------------------------

    /// Updates the active scene only.
    pub fn tick(&mut self, dt: f32, ctx: &mut GameContext) {
        if let Some(active) = self.active_scene().map(str::to_string) {
            if let Some(scene) = self.scene_mut(&active) {
                scene.update(dt, ctx);
            }
        }
    }

    /// Draws the primary scene, then every overlay bottom to top.
    pub fn render(&self, ctx: &GameContext) -> Frame {
        let mut frame = Frame::new();

        for id in self.primary.iter().chain(self.overlays.iter()) {
            if let Some(slot) = self.scenes.get(id) {
                frame.layer(id);
                slot.scene.draw(&mut frame, ctx);
            }
        }

        trace!("Rendered {} draw commands", frame.len());
        frame
    }

    pub fn dispatch_key_down(&mut self, key: KeyCode, modifiers: Modifiers, ctx: &mut GameContext) {
        if let Some(active) = self.active_scene().map(str::to_string) {
            if let Some(scene) = self.scene_mut(&active) {
                scene.on_key_down(key, modifiers, ctx);
            }
        }
    }

    pub fn dispatch_key_up(&mut self, key: KeyCode, modifiers: Modifiers, ctx: &mut GameContext) {
        if let Some(active) = self.active_scene().map(str::to_string) {
            if let Some(scene) = self.scene_mut(&active) {
                scene.on_key_up(key, modifiers, ctx);
            }
        }
    }

    /// Forwards a window resize to every scene with the capability.
    pub fn resize(&mut self, width: u32, height: u32) {
        for slot in self.scenes.values_mut() {
            if let Some(resizable) = slot.scene.as_resizable() {
                resizable.on_resize(width, height);
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn ensure_registered(&self, id: &str) -> CoreResult<()> {
        if self.scenes.contains_key(id) {
            Ok(())
        } else {
            warn!("Scene `{}` is not registered", id);
            Err(CoreError::UnknownScene(id.to_string()))
        }
    }

    fn scene_mut(&mut self, id: &str) -> Option<&mut (dyn Scene + 'static)> {
        self.scenes.get_mut(id).map(|slot| slot.scene.as_mut())
    }

    fn exit(&mut self, id: &str, ctx: &mut GameContext) {
        if let Some(slot) = self.scenes.get_mut(id) {
            slot.is_active = false;
            slot.scene.on_exit(ctx);
        }
    }

    /// Refreshes `is_active` flags and points input at the active profile.
    fn sync_active(&mut self, ctx: &mut GameContext) {
        let active = self.active_scene().map(str::to_string);

        for (id, slot) in self.scenes.iter_mut() {
            slot.is_active = active.as_deref() == Some(id.as_str());
        }

        ctx.input.set_profile(active.as_deref().unwrap_or(FALLBACK_PROFILE));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
