//! Single-slot error surface read by the presentation layer.

use crate::feed::FeedError;

/// Holds at most one error. Publishing replaces whatever was there, seen or
/// not; there is no queue.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorSlot {
    current: Option<FeedError>,
}

impl ErrorSlot {
    pub fn publish(&mut self, error: FeedError) {
        self.current = Some(error);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&FeedError> {
        self.current.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.current.is_some()
    }
}
