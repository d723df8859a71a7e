//=========================================================================
// Map Transfer
//=========================================================================

/// Teleport destination. `target_region: None` stays in the current region.
#[derive(Debug, Clone, PartialEq)]
pub struct MapTransfer {
    pub target_region: Option<String>,
    pub target_x: f32,
    pub target_y: f32,
}

impl MapTransfer {
    pub fn new(target_region: Option<String>, target_x: f32, target_y: f32) -> Self {
        Self { target_region, target_x, target_y }
    }

    pub fn within_region(target_x: f32, target_y: f32) -> Self {
        Self::new(None, target_x, target_y)
    }

    pub fn is_cross_region(&self) -> bool {
        self.target_region.is_some()
    }
}
