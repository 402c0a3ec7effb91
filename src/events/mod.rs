//! Event handling module.
//!
//! Network events drive the feed: navigation, mutations and status updates
//! are turned into service calls whose results are applied to feed state.

pub mod network;
