use super::client::Client;
use super::models::StatusBody;
use super::{Feed, FeedError};
use log::*;
use reqwest::Method;

impl Feed {
    /// Returns the current user's status.
    ///
    pub async fn status(&self) -> Result<String, FeedError> {
        debug!("Requesting user status...");
        let request = self.client.request(Method::GET, "auth/status");
        let response = self.client.send(request, &[200]).await?;
        let body: StatusBody = Client::decode(response).await?;
        Ok(body.status)
    }

    /// Store a new status and return the value the server confirmed.
    ///
    pub async fn update_status(&self, status: &str) -> Result<String, FeedError> {
        debug!("Updating user status...");
        let request = self
            .client
            .request(Method::PATCH, "auth/status")
            .json(&StatusBody {
                status: status.to_owned(),
            });
        let response = self.client.send(request, &[200, 202]).await?;
        let body: StatusBody = Client::decode(response).await?;
        Ok(body.status)
    }
}
