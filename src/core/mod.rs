//=========================================================================
// Core Runtime
//=========================================================================
//
// Game logic for the core (non-platform) thread.
//
// Architecture:
//   PlatformEvent ─> EventCollector ─> CoreRuntime::step()
//                                        ├─ resize    → Resizable scenes
//                                        ├─ key edges → ActionInput + active scene
//                                        ├─ tick      → active scene
//                                        ├─ requests  → SceneCoordinator
//                                        └─ render    → Frame
//
// The runtime owns the SceneCoordinator and the GameContext and paces
// itself at a fixed TPS. It only talks to the platform through the
// bridge channels.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod collision;
pub mod context;
pub mod contracts;
pub mod error;
pub mod geometry;
pub mod input;
pub mod movement;
pub(crate) mod platform_bridge;
pub mod render;
pub mod scene;
pub mod session;
pub mod trigger;
pub mod world;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use context::GameContext;
use error::CoreResult;
use input::InputEvent;
use platform_bridge::{CoreEvent, EventCollector, PlatformEvent};
use render::Frame;
use scene::{SceneCoordinator, SceneParams};

//=== Public API ==========================================================

pub use platform_bridge::TickControl;

//=== CoreRuntime =========================================================

/// Scene coordinator plus the context it drives.
///
/// [`step`](Self::step) runs one frame and is usable without threads;
/// the engine wraps it in a paced loop on its own thread.
pub struct CoreRuntime {
    coordinator: SceneCoordinator,
    ctx: GameContext,
    last_frame: Frame,
}

impl CoreRuntime {
    //--- Construction -----------------------------------------------------

    pub fn new(ctx: GameContext) -> Self {
        Self {
            coordinator: SceneCoordinator::new(),
            ctx,
            last_frame: Frame::new(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn coordinator(&self) -> &SceneCoordinator {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut SceneCoordinator {
        &mut self.coordinator
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    /// Draw list produced by the most recent step.
    pub fn last_frame(&self) -> &Frame {
        &self.last_frame
    }

    //--- Frame ------------------------------------------------------------

    /// Makes `id` the primary scene and applies whatever it queued.
    pub fn start(&mut self, id: &str) -> CoreResult<()> {
        self.coordinator.switch_to(id, SceneParams::None, &mut self.ctx)?;
        self.coordinator.apply_requests(&mut self.ctx);
        Ok(())
    }

    /// Runs one frame: resize, input, update, requests, draw.
    pub fn step(&mut self, batches: &[Vec<InputEvent>], resize: Option<(u32, u32)>, dt: f32) -> TickControl {
        if let Some((width, height)) = resize {
            self.coordinator.resize(width, height);
        }

        self.ctx.input.begin_frame();
        for event in batches.iter().flatten() {
            self.ctx.input.apply(event);
            if event.is_down() {
                self.coordinator.dispatch_key_down(event.key(), event.modifiers(), &mut self.ctx);
            } else {
                self.coordinator.dispatch_key_up(event.key(), event.modifiers(), &mut self.ctx);
            }
        }

        self.coordinator.tick(dt, &mut self.ctx);
        let control = self.coordinator.apply_requests(&mut self.ctx);
        self.last_frame = self.coordinator.render(&self.ctx);
        control
    }

    //--- Threading --------------------------------------------------------

    /// Moves the runtime onto its own thread, stepping at `tps`.
    ///
    /// The loop ends when the platform closes or disconnects, or when a
    /// scene requests quit, in which case `CoreEvent::Shutdown` is sent
    /// back to the platform.
    pub(crate) fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        core_events: Sender<CoreEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);
        let dt = frame_duration.as_secs_f32();

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Platform closed, core thread exiting");
                    break;
                }

                //--- Step 2: Run the frame ---------------------------------
                let batches = collector.take_batches();
                let resize = collector.take_resize();
                if self.step(&batches, resize, dt) == TickControl::Exit {
                    info!("Quit requested, core thread exiting");
                    if core_events.send(CoreEvent::Shutdown).is_err() {
                        warn!("Platform already gone, shutdown not delivered");
                    }
                    break;
                }

                //--- Step 3: Fixed pacing ----------------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
