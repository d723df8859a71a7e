//=========================================================================
// Lock Picking
//=========================================================================
//
// Overlay mini-game for a locked container.
//
// Each `pick_left` / `pick_right` key feeds one symbol into the
// container's prefix check. On success the container opens into the
// session inventory and the overlay closes itself after AUTO_CLOSE
// seconds. `cancel` closes it immediately and drops the attempt.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;
use crate::core::error::CoreResult;
use crate::core::geometry::Rect;
use crate::core::input::{KeyCode, Modifiers};
use crate::core::render::Frame;
use crate::core::scene::{Resizable, Scene, SceneParams};
use crate::core::trigger::{Container, LockProgress, LockSymbol, TriggerId};

/// Seconds the success message stays up before the overlay pops.
pub const AUTO_CLOSE: f32 = 1.0;

const PANEL_SIZE: (f32, f32) = (400.0, 200.0);

//=== LockPickingScene ====================================================

pub struct LockPickingScene {
    trigger: Option<TriggerId>,
    /// Symbols shown on the panel. Kept after success, cleared on a
    /// wrong symbol and on enter.
    shown: Vec<LockSymbol>,
    status: String,
    close_in: Option<f32>,
    viewport: (u32, u32),
}

impl LockPickingScene {
    pub fn new() -> Self {
        Self {
            trigger: None,
            shown: Vec::new(),
            status: String::new(),
            close_in: None,
            viewport: (1280, 720),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_closing(&self) -> bool {
        self.close_in.is_some()
    }

    fn container<'a>(&self, ctx: &'a mut GameContext) -> CoreResult<&'a mut Container> {
        let id = self.trigger.clone().unwrap_or_else(|| TriggerId::new(""));
        ctx.world.region_mut().triggers.container_mut(&id)
    }

    fn pick(&mut self, symbol: LockSymbol, ctx: &mut GameContext) {
        let progress = match self.container(ctx) {
            Ok(container) => container.enter_symbol(symbol),
            Err(err) => {
                warn!("Lock picking without a container: {}", err);
                ctx.scenes.pop_overlay();
                return;
            }
        };

        match progress {
            LockProgress::InProgress(count) => {
                self.shown.push(symbol);
                let total = self.container(ctx).map(|c| c.lock().len()).unwrap_or(count);
                self.status = format!("{}/{}", count, total);
            }
            LockProgress::Failed => {
                self.shown.clear();
                self.status = "Wrong! Try again.".to_string();
            }
            LockProgress::Success => {
                self.shown.push(symbol);
                self.status = "Unlocked!".to_string();
                self.close_in = Some(AUTO_CLOSE);

                let GameContext { world, session, .. } = ctx;
                let id = self.trigger.clone().unwrap_or_else(|| TriggerId::new(""));
                if let Ok(container) = world.region_mut().triggers.container_mut(&id) {
                    container.open(&mut session.inventory);
                }
                info!("Lock on `{}` picked", id);
            }
        }
    }
}

impl Default for LockPickingScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for LockPickingScene {
    fn on_enter(&mut self, params: &SceneParams, ctx: &mut GameContext) {
        self.shown.clear();
        self.close_in = None;

        let SceneParams::LockPicking { trigger } = params else {
            warn!("Lock picking opened without a container");
            self.trigger = None;
            ctx.scenes.pop_overlay();
            return;
        };
        self.trigger = Some(trigger.clone());

        match self.container(ctx) {
            Ok(container) => {
                container.reset_attempt();
                self.status = format!("Pick the lock ({} symbols)", container.lock().len());
            }
            Err(err) => {
                warn!("Lock picking on missing container: {}", err);
                ctx.scenes.pop_overlay();
            }
        }
    }

    fn on_exit(&mut self, ctx: &mut GameContext) {
        if let Ok(container) = self.container(ctx) {
            container.reset_attempt();
        }
        self.trigger = None;
        self.close_in = None;
    }

    fn update(&mut self, dt: f32, ctx: &mut GameContext) {
        if let Some(remaining) = self.close_in.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.close_in = None;
                ctx.scenes.pop_overlay();
            }
        }
    }

    fn draw(&self, frame: &mut Frame, _ctx: &GameContext) {
        let (cx, cy) = (self.viewport.0 as f32 / 2.0, self.viewport.1 as f32 / 2.0);
        frame.panel(Rect::from_center(cx, cy, PANEL_SIZE.0, PANEL_SIZE.1));
        frame.text(cx, cy + 60.0, "LOCK PICKING");
        frame.text(cx, cy, self.status.clone());

        let shown: Vec<String> = self.shown.iter().map(|s| s.as_char().to_string()).collect();
        frame.text(cx, cy - 40.0, shown.join(" "));
        frame.text(cx, cy - 80.0, "< / > pick  |  ESC cancel");
    }

    fn on_key_down(&mut self, key: KeyCode, _modifiers: Modifiers, ctx: &mut GameContext) {
        if self.close_in.is_some() {
            return;
        }

        if ctx.input.is_action_key("pick_left", key) {
            self.pick(LockSymbol::Left, ctx);
        } else if ctx.input.is_action_key("pick_right", key) {
            self.pick(LockSymbol::Right, ctx);
        } else if ctx.input.is_action_key("cancel", key) {
            info!("Lock picking cancelled");
            ctx.scenes.pop_overlay();
        }
    }

    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }
}

impl Resizable for LockPickingScene {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneRequest;
    use crate::core::trigger::{LockSequence, LootEntry, Trigger, TriggerKind};

    fn ctx_with_chest(lock: &str) -> GameContext {
        let mut ctx = GameContext::default();
        ctx.input.set_profile("lock_picking");
        let container = Container::new(LockSequence::parse(lock), vec![LootEntry::new("potion", 3)]);
        ctx.world
            .region_mut()
            .triggers
            .insert(Trigger::new(
                TriggerId::new("chest"),
                Rect::new(0.0, 0.0, 64.0, 64.0),
                TriggerKind::Container(container),
            ))
            .unwrap();
        ctx
    }

    fn params() -> SceneParams {
        SceneParams::LockPicking { trigger: TriggerId::new("chest") }
    }

    fn press(scene: &mut LockPickingScene, key: KeyCode, ctx: &mut GameContext) {
        scene.on_key_down(key, Modifiers::NONE, ctx);
    }

    fn chest(ctx: &mut GameContext) -> &mut Container {
        ctx.world.region_mut().triggers.container_mut(&TriggerId::new("chest")).unwrap()
    }

    #[test]
    fn progress_then_success_opens_and_auto_closes() {
        let mut ctx = ctx_with_chest("<><");
        let mut scene = LockPickingScene::new();
        scene.on_enter(&params(), &mut ctx);

        press(&mut scene, KeyCode::ArrowLeft, &mut ctx);
        assert_eq!(scene.status(), "1/3");
        press(&mut scene, KeyCode::KeyD, &mut ctx);
        press(&mut scene, KeyCode::KeyA, &mut ctx);

        assert!(scene.is_closing());
        assert!(chest(&mut ctx).is_opened());
        assert_eq!(ctx.session.inventory.count_of("potion"), 3);

        scene.update(0.5, &mut ctx);
        assert!(ctx.scenes.is_empty());
        scene.update(0.5, &mut ctx);
        assert_eq!(ctx.scenes.take(), vec![SceneRequest::PopOverlay]);
    }

    #[test]
    fn panel_keeps_full_sequence_after_success() {
        let mut ctx = ctx_with_chest("<><");
        let mut scene = LockPickingScene::new();
        scene.on_enter(&params(), &mut ctx);

        press(&mut scene, KeyCode::ArrowLeft, &mut ctx);
        press(&mut scene, KeyCode::ArrowRight, &mut ctx);
        press(&mut scene, KeyCode::ArrowLeft, &mut ctx);

        assert!(chest(&mut ctx).entered().is_empty());
        assert_eq!(scene.shown, [LockSymbol::Left, LockSymbol::Right, LockSymbol::Left]);

        scene.on_enter(&params(), &mut ctx);
        assert!(scene.shown.is_empty());
    }

    #[test]
    fn wrong_symbol_resets_attempt() {
        let mut ctx = ctx_with_chest("<><");
        let mut scene = LockPickingScene::new();
        scene.on_enter(&params(), &mut ctx);

        press(&mut scene, KeyCode::ArrowLeft, &mut ctx);
        press(&mut scene, KeyCode::ArrowLeft, &mut ctx);

        assert_eq!(scene.status(), "Wrong! Try again.");
        assert!(scene.shown.is_empty());
        assert!(chest(&mut ctx).entered().is_empty());
        assert!(!chest(&mut ctx).is_opened());
    }

    #[test]
    fn cancel_pops_and_drops_attempt() {
        let mut ctx = ctx_with_chest("<><");
        let mut scene = LockPickingScene::new();
        scene.on_enter(&params(), &mut ctx);

        press(&mut scene, KeyCode::ArrowLeft, &mut ctx);
        press(&mut scene, KeyCode::Escape, &mut ctx);
        assert_eq!(ctx.scenes.take(), vec![SceneRequest::PopOverlay]);

        scene.on_exit(&mut ctx);
        assert!(chest(&mut ctx).entered().is_empty());
    }

    #[test]
    fn missing_container_closes_overlay() {
        let mut ctx = ctx_with_chest("<");
        let mut scene = LockPickingScene::new();

        scene.on_enter(&SceneParams::LockPicking { trigger: TriggerId::new("ghost") }, &mut ctx);
        scene.on_enter(&SceneParams::None, &mut ctx);

        assert_eq!(ctx.scenes.take(), vec![SceneRequest::PopOverlay, SceneRequest::PopOverlay]);
    }

    #[test]
    fn keys_ignored_while_closing() {
        let mut ctx = ctx_with_chest("<");
        let mut scene = LockPickingScene::new();
        scene.on_enter(&params(), &mut ctx);

        press(&mut scene, KeyCode::ArrowLeft, &mut ctx);
        press(&mut scene, KeyCode::Escape, &mut ctx);

        assert!(ctx.scenes.is_empty());
        assert_eq!(ctx.session.inventory.count_of("potion"), 3);
    }
}
