//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side drain of the platform channel, bounded per frame.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input batches
//                                             → latest resize
//                                             → TickControl
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::event::InputEvent;

const MAX_EVENTS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Frame loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
    resize: Option<(u32, u32)>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
            resize: None,
        }
    }

    /// Drains pending platform events without blocking.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        self.resize = None;
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs(batch)) => {
                    if !batch.is_empty() {
                        self.input_batches.push(batch);
                    }
                }
                Ok(PlatformEvent::Resized { width, height }) => {
                    self.resize = Some((width, height));
                }
                Ok(PlatformEvent::WindowClosed) => return TickControl::Exit,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
            drained += 1;
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        } else if drained > 0 {
            trace!("Collected {} platform events", drained);
        }

        TickControl::Continue
    }

    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    /// Takes the collected batches, leaving an empty vec.
    pub(crate) fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        std::mem::take(&mut self.input_batches)
    }

    /// Latest resize seen this frame, if any.
    pub(crate) fn take_resize(&mut self) -> Option<(u32, u32)> {
        self.resize.take()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
