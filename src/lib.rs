//=========================================================================
// ITCUBIA - Library Root
//
// A 2D adventure game core: a primary + overlay scene stack, named input
// profiles, sliding tile collision and spatial triggers (chests with
// lock-picking, region teleports).
//
// Typical usage:
// ```no_run
// use itcubia::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new()
//         .build()
//         .register_scenes(itcubia::scenes::register_all)
//         .and_then(|engine| engine.run())
//         .unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine-independent systems: scene coordinator, input,
// collision, triggers, world and session state. Everything in it runs on
// the core thread and is testable without a window.
//
// `scenes` holds the game's concrete scenes.
//
pub mod core;
pub mod prelude;
pub mod scenes;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window and event loop and is not part of the
// public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
