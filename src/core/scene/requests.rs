//=========================================================================
// Scene Requests
//=========================================================================
//
// Queue of scene-stack operations requested during a frame.
//
// Scenes cannot reach the coordinator that owns them, so they queue
// requests here through the GameContext. The coordinator applies them
// in FIFO order at the frame boundary.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SceneParams;

//=== SceneRequest ========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SceneRequest {
    /// Replace the primary scene and clear every overlay.
    SwitchTo { id: String, params: SceneParams },

    /// Pause the active scene and push an overlay over it.
    PushOverlay { id: String, params: SceneParams },

    /// Remove the top overlay.
    PopOverlay,

    /// Stop the game loop.
    Quit,
}

//=== SceneRequests =======================================================

#[derive(Debug, Default)]
pub struct SceneRequests {
    queue: Vec<SceneRequest>,
}

impl SceneRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switch_to(&mut self, id: &str, params: SceneParams) {
        self.push(SceneRequest::SwitchTo { id: id.to_string(), params });
    }

    pub fn push_overlay(&mut self, id: &str, params: SceneParams) {
        self.push(SceneRequest::PushOverlay { id: id.to_string(), params });
    }

    pub fn pop_overlay(&mut self) {
        self.push(SceneRequest::PopOverlay);
    }

    pub fn quit(&mut self) {
        self.push(SceneRequest::Quit);
    }

    pub fn push(&mut self, request: SceneRequest) {
        self.queue.push(request);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneRequest> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all requests, leaving the queue empty.
    pub fn take(&mut self) -> Vec<SceneRequest> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_keep_fifo_order() {
        let mut requests = SceneRequests::new();
        requests.push_overlay("pause_menu", SceneParams::None);
        requests.pop_overlay();
        requests.quit();

        assert_eq!(requests.len(), 3);
        let taken = requests.take();
        assert!(requests.is_empty());
        assert_eq!(
            taken,
            vec![
                SceneRequest::PushOverlay { id: "pause_menu".into(), params: SceneParams::None },
                SceneRequest::PopOverlay,
                SceneRequest::Quit,
            ]
        );
    }
}
