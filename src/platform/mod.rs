//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges winit (OS window and keyboard) with the core thread.
//
// Architecture:
// ```text
//  Main Thread:                     Core Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  winit Event Loop        │    │  CoreRuntime     │
//  │   ↓                      │    │   ├─ ActionInput │
//  │  InputProcessor          │    │   └─ Scenes      │
//  │   ↓                      │    │                  │
//  │  InputBuffer             │    │                  │
//  │   ├─ keys:   Vec<>       │    │                  │
//  │   └─ resize: Option<>    │    │                  │
//  │   ↓ RedrawRequested      │    │                  │
//  │  PlatformEvent ──────────┼───>│                  │
//  │                          │<───┼── CoreEvent      │
//  └──────────────────────────┘    └──────────────────┘
// ```
//
// RedrawRequested is the frame boundary: buffered input goes out as one
// message. A `CoreEvent::Shutdown` from the core closes the loop.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window owner and input aggregator. Must stay on the main thread.
pub(crate) struct Platform {
    /// Created lazily in `resumed()`.
    window: Option<Window>,
    title: String,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    core_events: Receiver<CoreEvent>,
    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        event_sender: Sender<PlatformEvent>,
        core_events: Receiver<CoreEvent>,
        title: impl Into<String>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            title: title.into(),
            buffer: InputBuffer::new(),
            event_sender,
            core_events,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes or the core
    /// requests shutdown.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input to the core. Nothing is sent for an empty
    /// frame; a dead core only costs a warning.
    fn flush_input_buffer(&mut self) {
        let Some((keys, resize)) = self.buffer.drain() else {
            return;
        };

        if let Some((width, height)) = resize {
            if self.event_sender.send(PlatformEvent::Resized { width, height }).is_err() {
                warn!(target: "platform::input", "Channel disconnected, dropping resize");
            }
        }

        if !keys.is_empty() {
            let count = keys.len();
            trace!(target: "platform::input", "Flushing {} key events", count);

            if self.event_sender.send(PlatformEvent::Inputs(keys)).is_err() {
                warn!(target: "platform::input", "Channel disconnected, dropping {} key events", count);
            }
        }
    }

    /// True once the core has asked to shut down.
    fn shutdown_requested(&self) -> bool {
        matches!(self.core_events.try_recv(), Ok(CoreEvent::Shutdown))
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        let _ = self.event_sender.send(PlatformEvent::WindowClosed);
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(1280, 720));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.buffer.push_resize(size.width, size.height);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close(event_loop);
            }

            WindowEvent::Resized(size) => {
                self.buffer.push_resize(size.width, size.height);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", modifiers);
                self.input_processor.update_modifiers(modifiers.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(&key_event) {
                    Some(event) => self.buffer.push_key(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if self.shutdown_requested() {
                    info!(target: "platform", "Core requested shutdown");
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shutdown_requested() {
            info!(target: "platform", "Core requested shutdown");
            event_loop.exit();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crossbeam_channel::unbounded;

    fn platform() -> (Platform, Receiver<PlatformEvent>, Sender<CoreEvent>) {
        let (tx, rx) = unbounded();
        let (core_tx, core_rx) = unbounded();
        (Platform::new(tx, core_rx, "test"), rx, core_tx)
    }

    fn space() -> InputEvent {
        InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::NONE }
    }

    #[test]
    fn window_is_created_lazily() {
        let (platform, _rx, _core) = platform();
        assert!(platform.window().is_none());
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (mut platform, rx, _core) = platform();
        platform.flush_input_buffer();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn flush_sends_resize_then_keys() {
        let (mut platform, rx, _core) = platform();
        platform.buffer.push_resize(800, 600);
        platform.buffer.push_key(space());

        platform.flush_input_buffer();

        assert_eq!(rx.try_recv(), Ok(PlatformEvent::Resized { width: 800, height: 600 }));
        assert_eq!(rx.try_recv(), Ok(PlatformEvent::Inputs(vec![space()])));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn flush_survives_disconnected_core() {
        let (mut platform, rx, _core) = platform();
        platform.buffer.push_key(space());
        drop(rx);
        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn shutdown_is_observed() {
        let (platform, _rx, core) = platform();
        assert!(!platform.shutdown_requested());

        core.send(CoreEvent::Shutdown).unwrap();
        assert!(platform.shutdown_requested());
    }
}
