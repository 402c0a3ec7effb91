//! HTTP client for feed service requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the feed service, handling authentication, status checks, and response
//! parsing.

use super::error::FeedError;
use super::models::ErrorBody;
use log::*;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Makes authenticated requests to the feed service and tries to conform
/// response data to given model.
///
pub struct Client {
    pub(crate) access_token: String,
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given access token and base URL.
    ///
    pub fn new(access_token: &str, base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Client {
            access_token: access_token.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client,
        })
    }

    /// Prepare a request for the given path with the bearer token attached.
    ///
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_url = format!("{}/{}", &self.base_url, path.trim_start_matches('/'));
        self.http_client
            .request(method, &request_url)
            .header("Authorization", format!("Bearer {}", &self.access_token))
    }

    /// Send the request and return the response if its status is one of
    /// `accepted`. Any other status becomes [`FeedError::HttpStatus`] carrying
    /// the server's `message`, when the body has one.
    ///
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        accepted: &[u16],
    ) -> Result<Response, FeedError> {
        let response = request.send().await?;
        let status = response.status();
        if accepted.contains(&status.as_u16()) {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        error!(
            "Request failed with status {}: {}",
            status,
            String::from_utf8_lossy(&body)
        );
        Err(FeedError::HttpStatus {
            status: status.as_u16(),
            message,
        })
    }

    /// Read the whole body and deserialize it into the given model.
    ///
    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FeedError> {
        let response_bytes = response.bytes().await?;
        serde_json::from_slice::<T>(&response_bytes).map_err(|e| {
            error!(
                "Failed to deserialize response: {}. Response body: {}",
                e,
                String::from_utf8_lossy(&response_bytes)
            );
            FeedError::from(e)
        })
    }
}
