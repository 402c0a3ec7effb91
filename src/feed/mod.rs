//! Access to the remote feed service.
//!
//! [`Feed`] wraps the authenticated [`Client`] and exposes the post
//! repository (`posts`) and the user status service (`status`). Operations
//! never retry and keep no cache.

mod client;
mod error;
mod models;
mod posts;
mod resource;
mod status;

pub use client::Client;
pub use error::FeedError;
pub use resource::*;

use log::*;
use std::time::Duration;

/// Responsible for asynchronous interaction with the feed service including
/// transformation of response data into explicitly-defined types.
///
pub struct Feed {
    client: Client,
}

impl Feed {
    /// Returns a new instance for the given access token and service URL.
    ///
    pub fn new(access_token: &str, base_url: &str, timeout: Duration) -> Result<Feed, FeedError> {
        debug!("Initializing feed client for {}...", base_url);
        Ok(Feed {
            client: Client::new(access_token, base_url, timeout)?,
        })
    }

    /// Returns an instance backed by an existing client.
    ///
    pub fn with_client(client: Client) -> Feed {
        Feed { client }
    }
}
