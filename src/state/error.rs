//! State management-specific error types.

/// Errors that can occur when an event does not fit the current state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Post not on the current page
    #[error("Post not found on the current page: {id}")]
    PostNotFound { id: String },

    /// Save requested while the editor is closed
    #[error("No post is being edited")]
    NotEditing,

    /// Event arrived after the feed was torn down
    #[error("Feed has been shut down")]
    ShutDown,
}
