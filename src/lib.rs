//! Client-side controller for a paginated post feed backed by a remote
//! service.
//!
//! The [`feed`] module talks to the service, [`state`] holds the pure feed
//! model and its reducer, and [`events::network`] drives requests and applies
//! their results.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod logger;
pub mod state;
