//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages crossing the thread boundary in both directions, plus the
// platform error type.
//
//   platform ──PlatformEvent──> core
//   platform <──CoreEvent────── core
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from platform to core.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformEvent {
    /// Key events gathered since the previous redraw, in arrival order.
    Inputs(Vec<InputEvent>),

    /// Latest window size in physical pixels.
    Resized { width: u32, height: u32 },

    /// Window close requested.
    WindowClosed,
}

//=== CoreEvent ===========================================================

/// Events sent from core back to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CoreEvent {
    /// A scene asked the game to quit; the platform should close.
    Shutdown,
}

//=== PlatformError =======================================================

#[derive(Debug, Error)]
pub(crate) enum PlatformError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    #[error("event loop error: {0}")]
    EventLoopExecution(String),
}
