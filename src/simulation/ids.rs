//! Widget identity
//!
//! Each line owns its own generator, so independent runs never share ids.

use super::types::WidgetId;

/// Monotonic source of widget ids, carried from snapshot to snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetIdGenerator {
    next_id: u64,
}

impl WidgetIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.next_id
    }
}
