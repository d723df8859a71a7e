//=========================================================================
// Engine
//
// Entry point that wires the platform thread to the core thread.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [Runtime]
//         │                          │                                       │
//         ├─ with_tps()              ├─ key bindings loaded                  ├─ start scene entered
//         ├─ with_regions()          └─ world + session created              ├─ core thread spawned
//         └─ with_bindings_path()                                            └─ platform loop (blocks)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;
use crate::core::error::CoreResult;
use crate::core::input::{ActionInput, KeyBindings};
use crate::core::platform_bridge::{CoreEvent, PlatformEvent};
use crate::core::session::SessionState;
use crate::core::trigger::InteractionPolicy;
use crate::core::world::{RegionLibrary, RegionSource, World, TILE_SIZE};
use crate::core::CoreRuntime;
use crate::platform::Platform;

//=== Defaults ============================================================

pub const DEFAULT_BINDINGS_PATH: &str = "settings/key_bindings.json";
pub const DEFAULT_TITLE: &str = "ITCUBIA";
pub const DEFAULT_HOME_REGION: &str = "start";
pub const DEFAULT_START_SCENE: &str = "lobby";

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 platform messages
/// - **Key bindings**: `settings/key_bindings.json`, created on first run
/// - **Tile size**: 64.0
/// - **Regions**: none; home region `start`
/// - **Start scene**: `lobby`
/// - **Window title**: `ITCUBIA`
///
/// # Examples
///
/// ```no_run
/// use itcubia::EngineBuilder;
/// use itcubia::core::world::RegionLibrary;
///
/// let regions = RegionLibrary::from_json(r#"{ "start": { "map": "0 0\n0 0" } }"#).unwrap();
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_regions(Box::new(regions))
///     .build()
///     .register_scenes(itcubia::scenes::register_all)
///     .unwrap()
///     .run()
///     .unwrap();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    bindings_path: PathBuf,
    tile_size: f32,
    regions: Option<Box<dyn RegionSource>>,
    home_region: String,
    start_scene: String,
    title: String,
    policy: InteractionPolicy,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            bindings_path: PathBuf::from(DEFAULT_BINDINGS_PATH),
            tile_size: TILE_SIZE,
            regions: None,
            home_region: DEFAULT_HOME_REGION.to_string(),
            start_scene: DEFAULT_START_SCENE.to_string(),
            title: DEFAULT_TITLE.to_string(),
            policy: InteractionPolicy::default(),
        }
    }

    /// Sets the target ticks per second for the core thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the platform → core channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Key-binding file to load, or create with defaults when missing.
    pub fn with_bindings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.bindings_path = path.into();
        self
    }

    /// World tile edge length in pixels.
    ///
    /// # Panics
    ///
    /// Panics if `tile_size <= 0.0`.
    pub fn with_tile_size(mut self, tile_size: f32) -> Self {
        assert!(tile_size > 0.0, "Tile size must be positive, got {}", tile_size);
        self.tile_size = tile_size;
        self
    }

    pub fn with_regions(mut self, regions: Box<dyn RegionSource>) -> Self {
        self.regions = Some(regions);
        self
    }

    /// Region the player starts in when the session names none.
    pub fn with_home_region(mut self, name: &str) -> Self {
        self.home_region = name.to_string();
        self
    }

    pub fn with_start_scene(mut self, id: &str) -> Self {
        self.start_scene = id.to_string();
        self
    }

    pub fn with_window_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Per-kind distance and confirm gates for triggers.
    pub fn with_interaction_policy(mut self, policy: InteractionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the engine.
    ///
    /// Key bindings are loaded here. A binding file that cannot be read
    /// or written is logged and the built-in defaults are used instead.
    pub fn build(self) -> Engine {
        let bindings = match KeyBindings::load_or_create(self.bindings_path.clone()) {
            Ok(bindings) => bindings,
            Err(err) => {
                error!("Key bindings unavailable ({}), using defaults", err);
                KeyBindings::defaults()
            }
        };

        let regions = self.regions.unwrap_or_else(|| Box::new(RegionLibrary::new()));
        let world = World::new(regions, &self.home_region, self.tile_size, self.policy);
        let ctx = GameContext::new(SessionState::new(), ActionInput::new(bindings), world);

        Engine {
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            start_scene: self.start_scene,
            title: self.title,
            runtime: CoreRuntime::new(ctx),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Configured engine, ready for scene registration and [`run`](Self::run).
pub struct Engine {
    tps: f64,
    channel_capacity: usize,
    start_scene: String,
    title: String,
    runtime: CoreRuntime,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Hands the runtime to `init_fn`, typically to register scenes.
    pub fn init<F>(mut self, init_fn: F) -> CoreResult<Self>
    where
        F: FnOnce(&mut CoreRuntime) -> CoreResult<()>,
    {
        info!("Initializing engine");
        init_fn(&mut self.runtime)?;
        info!("Engine initialization complete");
        Ok(self)
    }

    /// Registers scenes directly on the coordinator.
    pub fn register_scenes<F>(self, register: F) -> CoreResult<Self>
    where
        F: FnOnce(&mut crate::core::scene::SceneCoordinator) -> CoreResult<()>,
    {
        self.init(|runtime| register(runtime.coordinator_mut()))
    }

    pub fn runtime(&self) -> &CoreRuntime {
        &self.runtime
    }

    //--- Execution --------------------------------------------------------

    /// Enters the start scene, then runs until the window closes or a
    /// scene requests quit.
    ///
    /// # Lifecycle
    ///
    /// 1. Enters the start scene on the calling thread
    /// 2. Creates the platform → core and core → platform channels
    /// 3. Spawns the core thread at the configured TPS
    /// 4. Runs the platform event loop (blocks here)
    /// 5. Joins the core thread
    ///
    /// Fails only if the start scene is not registered. Platform and
    /// core-thread failures are logged.
    pub fn run(mut self) -> CoreResult<()> {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Enter the start scene -------------------------------------
        self.runtime.start(&self.start_scene)?;

        //--- 2. Create communication channels ----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);
        let (core_tx, core_rx): (Sender<CoreEvent>, Receiver<CoreEvent>) = unbounded();

        info!("Channels created (capacity: {})", self.channel_capacity);

        //--- 3. Spawn the core thread -------------------------------------
        let core_handle = self.runtime.spawn_core_thread(rx, core_tx, self.tps);
        info!("Core thread spawned");

        //--- 4. Launch the platform ---------------------------------------
        let platform = Platform::new(tx, core_rx, self.title);
        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 5. Wait for the core thread ----------------------------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CoreError;
    use tempfile::TempDir;

    fn temp_builder() -> (TempDir, EngineBuilder) {
        let dir = tempfile::tempdir().unwrap();
        let builder = EngineBuilder::new().with_bindings_path(dir.path().join("bindings.json"));
        (dir, builder)
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.bindings_path, PathBuf::from("settings/key_bindings.json"));
        assert_eq!(builder.tile_size, 64.0);
        assert_eq!(builder.start_scene, "lobby");
        assert_eq!(builder.title, "ITCUBIA");
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Tile size must be positive")]
    fn builder_with_tile_size_panics_on_negative() {
        EngineBuilder::new().with_tile_size(-1.0);
    }

    #[test]
    fn build_creates_missing_bindings_file() {
        let (dir, builder) = temp_builder();
        let engine = builder.with_tps(120.0).with_channel_capacity(256).build();

        assert!(dir.path().join("bindings.json").exists());
        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.runtime().context().input.bindings().keys("game", "interact").len(), 1);
    }

    #[test]
    fn build_passes_world_configuration() {
        let (_dir, builder) = temp_builder();
        let regions = RegionLibrary::from_json(r#"{ "cave": { "map": "0 0\n0 0" } }"#).unwrap();

        let engine = builder
            .with_tile_size(32.0)
            .with_regions(Box::new(regions))
            .with_home_region("cave")
            .build();

        let ctx = engine.runtime().context();
        assert_eq!(ctx.tile_size, 32.0);
        assert_eq!(ctx.world.home(), "cave");
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn init_registers_scenes() {
        let (_dir, builder) = temp_builder();
        let engine = builder.build().register_scenes(crate::scenes::register_all).unwrap();
        assert!(engine.runtime().coordinator().is_registered("lobby"));
    }

    #[test]
    fn init_propagates_errors() {
        let (_dir, builder) = temp_builder();
        let result = builder
            .build()
            .init(|_| Err(CoreError::UnknownScene("nowhere".into())));
        assert!(matches!(result, Err(CoreError::UnknownScene(_))));
    }

    #[test]
    fn run_fails_for_unregistered_start_scene() {
        let (_dir, builder) = temp_builder();
        let result = builder.with_start_scene("missing").build().run();
        assert!(matches!(result, Err(CoreError::UnknownScene(id)) if id == "missing"));
    }
}
