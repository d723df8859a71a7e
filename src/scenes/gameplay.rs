//=========================================================================
// Gameplay Scene
//=========================================================================
//
// Primary scene for walking the world.
//
// Per tick:
//   overlay keys → movement state → collision resolve → position sink
//                → trigger cooldowns + checks → staged region commit
//
// The session's player record is the source of truth for position; the
// avatar is re-read from it whenever something else may have moved the
// player (teleports, console, region swaps, resume).
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{CHEAT_CONSOLE, LOCK_PICKING, PAUSE_MENU};
use crate::core::collision::{resolve, Hitbox};
use crate::core::context::GameContext;
use crate::core::contracts::{InputQuery, PositionSink, RegionLoader};
use crate::core::geometry::Rect;
use crate::core::movement::{displacement, Avatar, DirectionSet, PLAYER_HITBOX, PLAYER_SPEED};
use crate::core::render::Frame;
use crate::core::scene::{Scene, SceneParams, SceneRequests};
use crate::core::session::{Inventory, PlayerState};
use crate::core::trigger::{TriggerEnv, TriggerId};

//=== GameplayScene =======================================================

pub struct GameplayScene {
    avatar: Avatar,
    hitbox: Hitbox,
    show_inventory: bool,
}

impl GameplayScene {
    pub fn new() -> Self {
        Self {
            avatar: Avatar::at(0.0, 0.0),
            hitbox: Hitbox::new(PLAYER_HITBOX),
            show_inventory: false,
        }
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    /// Player hitbox in world space.
    pub fn player_rect(&self) -> Rect {
        self.hitbox.rect(&self.avatar)
    }

    /// Loads the player's region if it is not the current one.
    fn ensure_region(&self, ctx: &mut GameContext) {
        let wanted = ctx
            .session
            .player
            .region
            .clone()
            .unwrap_or_else(|| ctx.world.home().to_string());

        if ctx.world.region().name == wanted {
            return;
        }
        if !ctx.world.enter(&wanted) {
            warn!("Player region `{}` unavailable, staying in `{}`", wanted, ctx.world.region().name);
        }
    }

    fn sync_from_session(&mut self, player: &PlayerState) {
        let (x, y) = player.position();
        self.avatar.center = (x, y);
    }

    fn walk(&mut self, dt: f32, ctx: &mut GameContext) {
        let held = DirectionSet::held(&ctx.input);
        let pressed = DirectionSet::pressed(&ctx.input);
        self.avatar.state = self.avatar.state.transition(held, pressed);

        let (dx, dy) = displacement(held, PLAYER_SPEED, dt);
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let applied = resolve(&mut self.avatar, &self.hitbox, dx, dy, &ctx.world.region().map);
        if applied != (dx, dy) {
            trace!("Movement blocked: requested ({}, {}), applied {:?}", dx, dy, applied);
        }

        let (x, y) = self.avatar.center;
        ctx.session.player.set_position(x, y, None);
    }

    fn run_triggers(&mut self, dt: f32, ctx: &mut GameContext) {
        let player_rect = self.player_rect();
        let GameContext { session, input, world, scenes, .. } = ctx;

        let (region, loader) = world.split_mut();
        region.triggers.update(dt);

        let mut env = GameEnv {
            loader,
            player: &mut session.player,
            inventory: &mut session.inventory,
            scenes,
        };
        let fired = region.triggers.check(&player_rect, &*input, &mut env);
        if !fired.is_empty() {
            debug!("Triggers fired: {:?}", fired);
        }

        if world.commit_staged() {
            session.player.region = Some(world.region().name.clone());
        }
        self.sync_from_session(&session.player);
    }
}

impl Default for GameplayScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for GameplayScene {
    fn on_enter(&mut self, _params: &SceneParams, ctx: &mut GameContext) {
        self.ensure_region(ctx);
        self.sync_from_session(&ctx.session.player);
        self.avatar.state = Default::default();
        self.show_inventory = false;
        info!("Entered `{}` at {:?}", ctx.world.region().name, self.avatar.center);
    }

    fn on_resume(&mut self, ctx: &mut GameContext) {
        self.sync_from_session(&ctx.session.player);
        self.avatar.state = Default::default();
    }

    fn update(&mut self, dt: f32, ctx: &mut GameContext) {
        if ctx.input.action_pressed("pause") {
            ctx.scenes.push_overlay(PAUSE_MENU, SceneParams::None);
            return;
        }
        if ctx.input.action_pressed("console") {
            ctx.scenes.push_overlay(CHEAT_CONSOLE, SceneParams::None);
            return;
        }
        if ctx.input.action_pressed("inventory") {
            self.show_inventory = !self.show_inventory;
        }

        self.walk(dt, ctx);
        self.run_triggers(dt, ctx);
    }

    fn draw(&self, frame: &mut Frame, ctx: &GameContext) {
        let map = &ctx.world.region().map;
        let size = map.tile_size();
        for (col, row, id) in map.tiles() {
            frame.tile(Rect::new(col as f32 * size, row as f32 * size, size, size), id);
        }

        for trigger in ctx.world.region().triggers.iter() {
            frame.panel(trigger.rect());
        }
        frame.panel(self.player_rect());

        let player = &ctx.session.player;
        frame.text(16.0, 16.0, format!("HP {}  LVL {}", player.health, player.level));

        if self.show_inventory {
            frame.text(16.0, 48.0, "Inventory");
            for (index, slot) in ctx.session.inventory.items.iter().enumerate() {
                frame.text(16.0, 80.0 + index as f32 * 24.0, format!("{} x{}", slot.name, slot.count));
            }
        }
    }
}

//=== GameEnv =============================================================

/// Trigger collaborators over disjoint borrows of the context.
struct GameEnv<'a> {
    loader: &'a mut dyn RegionLoader,
    player: &'a mut PlayerState,
    inventory: &'a mut Inventory,
    scenes: &'a mut SceneRequests,
}

impl TriggerEnv for GameEnv<'_> {
    fn load_region(&mut self, name: &str) -> bool {
        self.loader.load_region(name)
    }

    fn player(&mut self) -> &mut dyn PositionSink {
        &mut *self.player
    }

    fn inventory(&mut self) -> &mut Inventory {
        &mut *self.inventory
    }

    fn begin_lock_picking(&mut self, trigger: &TriggerId) {
        self.scenes.push_overlay(LOCK_PICKING, SceneParams::LockPicking { trigger: trigger.clone() });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
