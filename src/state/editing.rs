//! Post editor state.

use crate::feed::{FeedError, Post};

/// State of the create/edit form.
///
/// `draft` is `None` while creating a new post and holds a copy of the
/// selected post while editing one. `last_error` is where create, update and
/// delete failures are recorded; it is separate from the feed's
/// [`ErrorSlot`](super::ErrorSlot).
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditState {
    pub is_editing: bool,
    pub draft: Option<Post>,
    pub saving: bool,
    pub last_error: Option<FeedError>,
}

impl EditState {
    /// Identifier of the post being edited, if any.
    ///
    pub fn target_id(&self) -> Option<&str> {
        self.draft.as_ref().map(|post| post.id.as_str())
    }

    /// Closed form, keeping the recorded mutation error.
    ///
    pub fn closed(last_error: Option<FeedError>) -> Self {
        EditState {
            last_error,
            ..EditState::default()
        }
    }
}
