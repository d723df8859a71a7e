//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the winit platform thread and the core thread.
//
// Components:
// - `interface`: messages in both directions and the platform error
// - `event_collector`: core-side channel drain and TickControl
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub use event_collector::TickControl;
pub(crate) use event_collector::EventCollector;
pub(crate) use interface::{CoreEvent, PlatformError, PlatformEvent};
