//! Pure state transitions: `(FeedState, Action) -> FeedState`.
//!
//! No I/O happens here. Responses are reconciled into the post list the way
//! the server would order them after the next reload: created posts are
//! appended, updated posts replaced in place, deleted posts filtered out.

use super::action::Action;
use super::editing::EditState;
use super::pagination::{ListPhase, Pagination};
use super::FeedState;

/// Apply `action` to `state` and return the resulting state.
///
pub fn reduce(state: FeedState, action: Action) -> FeedState {
    match action {
        // === Pagination ===
        Action::ListRequested { direction } => {
            let current_page = state.pagination.target(direction);
            FeedState {
                // Navigation shows the loader instead of the old page.
                posts: if direction.is_some() {
                    Vec::new()
                } else {
                    state.posts
                },
                loading: true,
                pagination: Pagination {
                    current_page,
                    phase: ListPhase::Loading,
                    latest_request: state.pagination.latest_request + 1,
                    ..state.pagination
                },
                ..state
            }
        }

        Action::ListLoaded { request, .. } | Action::ListFailed { request, .. }
            if !state.pagination.is_latest(request) =>
        {
            state
        }

        Action::ListLoaded { page, .. } => FeedState {
            posts: page.posts,
            loading: false,
            pagination: Pagination {
                total_count: page.total_count,
                phase: ListPhase::Loaded,
                ..state.pagination
            },
            ..state
        },

        Action::ListFailed { error, .. } => {
            let mut reporter = state.error;
            reporter.publish(error);
            FeedState {
                loading: false,
                error: reporter,
                pagination: Pagination {
                    phase: ListPhase::Errored,
                    ..state.pagination
                },
                ..state
            }
        }

        // === Status ===
        Action::StatusLoaded(status) => FeedState { status, ..state },

        Action::StatusFailed(error) | Action::PublishError(error) => {
            let mut reporter = state.error;
            reporter.publish(error);
            FeedState {
                error: reporter,
                ..state
            }
        }

        // === Editor ===
        Action::NewPost => FeedState {
            editing: EditState {
                is_editing: true,
                ..EditState::default()
            },
            ..state
        },

        Action::StartEdit { id } => {
            let selected = state.posts.iter().find(|p| p.id == id).cloned();
            match selected {
                Some(post) => FeedState {
                    editing: EditState {
                        is_editing: true,
                        draft: Some(post),
                        ..EditState::default()
                    },
                    ..state
                },
                None => state,
            }
        }

        Action::CancelEdit => FeedState {
            editing: EditState::default(),
            ..state
        },

        Action::SaveStarted => FeedState {
            editing: EditState {
                saving: true,
                last_error: None,
                ..state.editing
            },
            ..state
        },

        Action::PostSaved { post, replaces } => {
            let mut posts = state.posts;
            match replaces {
                Some(id) => {
                    if let Some(slot) = posts.iter_mut().find(|p| p.id == id) {
                        *slot = post;
                    }
                }
                None => posts.push(post),
            }
            FeedState {
                posts,
                editing: EditState::closed(None),
                ..state
            }
        }

        Action::SaveFailed(error) => FeedState {
            editing: EditState::closed(Some(error)),
            ..state
        },

        // === Delete ===
        Action::DeleteStarted { .. } => FeedState {
            loading: true,
            ..state
        },

        Action::PostDeleted { id } => {
            let mut posts = state.posts;
            posts.retain(|p| p.id != id);
            FeedState {
                posts,
                loading: state.pagination.phase == ListPhase::Loading,
                ..state
            }
        }

        Action::DeleteFailed { error, .. } => FeedState {
            loading: state.pagination.phase == ListPhase::Loading,
            editing: EditState {
                last_error: Some(error),
                ..state.editing
            },
            ..state
        },

        // === Error reporter ===
        Action::DismissError => {
            let mut reporter = state.error;
            reporter.clear();
            FeedState {
                error: reporter,
                ..state
            }
        }
    }
}
