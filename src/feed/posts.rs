use super::client::Client;
use super::models::{ListWrapper, PostWrapper};
use super::{DraftImage, Feed, FeedError, Post, PostDraft, PostPage};
use log::*;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

const LIST_ACCEPTED: &[u16] = &[200];
const MUTATION_ACCEPTED: &[u16] = &[200, 201];

impl Feed {
    /// Returns the given page of posts and the total across all pages.
    ///
    pub async fn posts(&self, page: u32) -> Result<PostPage, FeedError> {
        debug!("Requesting posts for page {}...", page);
        let request = self
            .client
            .request(Method::GET, "feed/posts")
            .query(&[("page", page)]);
        let response = self.client.send(request, LIST_ACCEPTED).await?;
        let model: ListWrapper = Client::decode(response).await?;
        let page_data = PostPage::from(model);
        debug!(
            "Fetched page {}: {} posts (total {})",
            page,
            page_data.posts.len(),
            page_data.total_count
        );
        Ok(page_data)
    }

    /// Create a post from the draft and return it as stored by the server.
    ///
    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, FeedError> {
        debug!("Creating post '{}'...", draft.title);
        let request = self
            .client
            .request(Method::POST, "feed/post")
            .multipart(draft_form(draft));
        self.submit(request).await
    }

    /// Replace the fields of post `id` with the draft.
    ///
    pub async fn update_post(&self, id: &str, draft: &PostDraft) -> Result<Post, FeedError> {
        debug!("Updating post {}...", id);
        let request = self
            .client
            .request(Method::PUT, &format!("feed/post/{}", id))
            .multipart(draft_form(draft));
        self.submit(request).await
    }

    /// Delete post `id`.
    ///
    pub async fn delete_post(&self, id: &str) -> Result<(), FeedError> {
        debug!("Deleting post {}...", id);
        let request = self
            .client
            .request(Method::DELETE, &format!("feed/post/{}", id));
        self.client.send(request, MUTATION_ACCEPTED).await?;
        Ok(())
    }

    async fn submit(&self, request: reqwest::RequestBuilder) -> Result<Post, FeedError> {
        let response = self.client.send(request, MUTATION_ACCEPTED).await?;
        let model: PostWrapper = Client::decode(response).await?;
        Ok(Post::from(model.post))
    }
}

/// Build the multipart payload for a draft.
///
fn draft_form(draft: &PostDraft) -> Form {
    let form = Form::new()
        .text("title", draft.title.clone())
        .text("content", draft.content.clone());
    match &draft.image {
        Some(DraftImage::Upload { file_name, bytes }) => form.part(
            "image",
            Part::bytes(bytes.clone()).file_name(file_name.clone()),
        ),
        Some(DraftImage::Existing(image_url)) => form.text("image", image_url.clone()),
        None => form,
    }
}
