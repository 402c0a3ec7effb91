//! Actions applied to [`FeedState`](super::FeedState) by the reducer.

use super::pagination::Direction;
use crate::feed::{FeedError, Post, PostPage};

/// Everything that can change feed state. Actions describe what happened;
/// `reduce` decides what it means for the state.
///
#[derive(Debug, Clone)]
pub enum Action {
    // === Pagination ===
    /// A list fetch is about to be issued, optionally moving the cursor.
    ListRequested { direction: Option<Direction> },
    /// A list fetch tagged `request` completed.
    ListLoaded { request: u64, page: PostPage },
    /// A list fetch tagged `request` failed.
    ListFailed { request: u64, error: FeedError },

    // === Status ===
    StatusLoaded(String),
    StatusFailed(FeedError),

    // === Editor ===
    NewPost,
    StartEdit { id: String },
    CancelEdit,
    SaveStarted,
    /// Server returned the stored post; `replaces` is the edited identifier.
    PostSaved { post: Post, replaces: Option<String> },
    SaveFailed(FeedError),

    // === Delete ===
    DeleteStarted { id: String },
    PostDeleted { id: String },
    DeleteFailed { id: String, error: FeedError },

    // === Error reporter ===
    PublishError(FeedError),
    DismissError,
}
