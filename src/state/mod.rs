//! Feed state management module.
//!
//! This module contains the state of a mounted feed view:
//! - `FeedState`, the aggregate of posts, cursor, flags, editor and status
//! - `Action` and the pure `reduce` function, the only way state changes
//! - Pagination cursor, editor state and the single-slot error reporter

mod action;
mod editing;
mod error;
mod pagination;
mod reducer;
mod reporter;

pub use action::Action;
pub use editing::EditState;
pub use error::StateError;
pub use pagination::{Direction, ListPhase, Pagination};
pub use reducer::reduce;
pub use reporter::ErrorSlot;

use crate::feed::Post;

/// Number of posts the server returns per page.
pub const PAGE_SIZE: usize = 2;

/// Houses data representative of the feed view.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeedState {
    /// Current page as last confirmed by the server, plus any post appended
    /// by a create that has not been resynced yet.
    pub posts: Vec<Post>,
    pub pagination: Pagination,
    pub loading: bool,
    pub error: ErrorSlot,
    pub editing: EditState,
    pub status: String,
}

impl FeedState {
    /// Return a new instance positioned on the first page.
    ///
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new instance positioned on `page`.
    ///
    pub fn at_page(page: u32) -> Self {
        FeedState {
            pagination: Pagination::at_page(page),
            ..FeedState::default()
        }
    }

    /// Apply an action in place.
    ///
    pub fn apply(&mut self, action: Action) {
        *self = reduce(std::mem::take(self), action);
    }

    pub fn current_page(&self) -> u32 {
        self.pagination.current_page
    }

    pub fn last_page(&self) -> u32 {
        self.pagination.last_page()
    }

    pub fn latest_list_request(&self) -> u64 {
        self.pagination.latest_request
    }

    /// Whether the "no posts found" placeholder should be shown.
    ///
    pub fn is_empty_page(&self) -> bool {
        self.posts.is_empty() && !self.loading
    }

    pub fn find_post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }
}
