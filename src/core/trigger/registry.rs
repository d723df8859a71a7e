//=========================================================================
// Trigger Registry
//=========================================================================
//
// Owns every trigger of the loaded region, ticks their cooldowns and
// fires them on player overlap.
//
// Check pass (once per frame, after movement):
//
//   for trigger in region:
//       skip if cooling down
//       skip unless zone overlaps player box
//       skip unless the kind's policy allows (distance / confirm)
//       activate, start cooldown
//       stop after a completed region transfer
//
// Side effects outside the registry go through `TriggerEnv`, so the
// registry never reaches into scenes, the player or the world directly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::container::VisualProxy;
use super::policy::InteractionPolicy;
use super::record::TriggerRecord;
use super::{Container, Trigger, TriggerId, TriggerKind};
use crate::core::contracts::{InputQuery, PositionSink};
use crate::core::error::{CoreError, CoreResult};
use crate::core::geometry::Rect;
use crate::core::session::Inventory;

//=== TriggerEnv ==========================================================

/// Collaborators a trigger activation may touch.
pub trait TriggerEnv {
    /// Region-loader contract; `false` leaves the current region intact.
    fn load_region(&mut self, name: &str) -> bool;

    fn player(&mut self) -> &mut dyn PositionSink;

    fn inventory(&mut self) -> &mut Inventory;

    /// Hands a locked container to the lock-picking overlay.
    fn begin_lock_picking(&mut self, trigger: &TriggerId);

    fn on_generic(&mut self, trigger: &TriggerId) {
        debug!("Generic trigger `{}` fired", trigger);
    }
}

//=== Activation ==========================================================

/// What a single activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Generic,
    Transferred,
    TransferAborted,
    LockPickingStarted,
    Opened,
    AlreadyOpened,
}

//=== TriggerRegistry =====================================================

pub struct TriggerRegistry {
    triggers: Vec<Trigger>,
    tile_size: f32,
    policy: InteractionPolicy,
}

impl TriggerRegistry {
    //--- Construction -----------------------------------------------------

    pub fn new(tile_size: f32, policy: InteractionPolicy) -> Self {
        Self { triggers: Vec::new(), tile_size, policy }
    }

    /// Replaces the registry contents with triggers built from `records`.
    ///
    /// Never fails: unknown kinds become generic, a repeated id is skipped.
    pub fn load(&mut self, records: &[TriggerRecord], scale: f32) {
        self.triggers.clear();
        let mut seen = HashSet::new();

        for (index, record) in records.iter().enumerate() {
            let trigger = record.build(index, scale);
            if !seen.insert(trigger.id().clone()) {
                warn!("Duplicate trigger id `{}` skipped", trigger.id());
                continue;
            }
            self.triggers.push(trigger);
        }

        info!("Loaded {} triggers", self.triggers.len());
    }

    /// Adds one prebuilt trigger.
    pub fn insert(&mut self, trigger: Trigger) -> CoreResult<()> {
        if self.get(trigger.id()).is_some() {
            return Err(CoreError::DuplicateTriggerId(trigger.id().to_string()));
        }
        self.triggers.push(trigger);
        Ok(())
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.triggers.iter()
    }

    pub fn get(&self, id: &TriggerId) -> Option<&Trigger> {
        self.triggers.iter().find(|trigger| trigger.id() == id)
    }

    pub fn get_mut(&mut self, id: &TriggerId) -> Option<&mut Trigger> {
        self.triggers.iter_mut().find(|trigger| trigger.id() == id)
    }

    pub fn container_mut(&mut self, id: &TriggerId) -> CoreResult<&mut Container> {
        self.get_mut(id)
            .and_then(Trigger::container_mut)
            .ok_or_else(|| CoreError::UnknownTrigger(id.to_string()))
    }

    pub fn policy(&self) -> &InteractionPolicy {
        &self.policy
    }

    //--- Visual Binding ---------------------------------------------------

    pub fn bind_visual(&mut self, id: &TriggerId, proxy: Box<dyn VisualProxy>) -> CoreResult<()> {
        self.container_mut(id)?
            .bind_visual(proxy)
            .map_err(|_| CoreError::VisualAlreadyBound(id.to_string()))
    }

    //--- Frame Hooks ------------------------------------------------------

    /// Advances every cooldown by one frame.
    pub fn update(&mut self, _dt: f32) {
        for trigger in &mut self.triggers {
            trigger.tick_cooldown();
        }
    }

    /// Fires every eligible trigger overlapping `player`; returns their ids.
    pub fn check(
        &mut self,
        player: &Rect,
        input: &dyn InputQuery,
        env: &mut dyn TriggerEnv,
    ) -> Vec<TriggerId> {
        let confirm = input.confirm_pressed();
        let mut fired = Vec::new();

        for trigger in &mut self.triggers {
            if trigger.is_activated() || !trigger.rect().overlaps(player) {
                continue;
            }

            let gate = self.policy.for_kind(trigger.kind().tag());
            let distance = trigger.rect().center_distance(player);
            if !gate.permits(distance, self.tile_size, confirm) {
                continue;
            }

            let outcome = activate(trigger, env);
            fired.push(trigger.id().clone());

            if outcome == Activation::Transferred {
                break;
            }
        }

        fired
    }
}

//=== Activation ==========================================================

/// Runs the kind-specific behaviour and starts the cooldown.
pub(crate) fn activate(trigger: &mut Trigger, env: &mut dyn TriggerEnv) -> Activation {
    trigger.start_cooldown();
    let id = trigger.id().clone();

    match trigger.kind_mut() {
        TriggerKind::Generic => {
            env.on_generic(&id);
            Activation::Generic
        }

        TriggerKind::MapTransfer(transfer) => {
            if let Some(region) = &transfer.target_region {
                if !env.load_region(region) {
                    error!("Transfer `{}` aborted: region `{}` failed to load", id, region);
                    return Activation::TransferAborted;
                }
            }
            info!(
                "Transfer `{}` to {:?} at ({}, {})",
                id, transfer.target_region, transfer.target_x, transfer.target_y
            );
            env.player().set_position(
                transfer.target_x,
                transfer.target_y,
                transfer.target_region.as_deref(),
            );
            Activation::Transferred
        }

        TriggerKind::Container(container) => {
            if container.is_opened() {
                Activation::AlreadyOpened
            } else if container.is_locked() {
                info!("Container `{}` is locked", id);
                env.begin_lock_picking(&id);
                Activation::LockPickingStarted
            } else {
                container.open(env.inventory());
                Activation::Opened
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
