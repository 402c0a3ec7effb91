use crate::error::{AppError, AppResult};
use crate::feed::{Feed, FeedError, PostDraft};
use crate::state::{Action, Direction, FeedState, StateError};
use log::*;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    Mount,
    Reload,
    NextPage,
    PreviousPage,
    LoadStatus,
    UpdateStatus { status: String },
    NewPost,
    StartEdit { id: String },
    CancelEdit,
    SavePost { draft: PostDraft },
    DeletePost { id: String },
    DismissError,
}

/// Drives the feed: turns events into service calls and applies the results
/// to shared state through the reducer.
///
/// Clones share the same state, service and lifetime, so events may be
/// handled concurrently. Each completed request is applied as one action
/// under the state lock. List responses are tagged with a sequence number
/// and only the latest one is applied; issuing a list request cancels the
/// previous one, and [`Handler::shutdown`] cancels everything still in
/// flight.
///
#[derive(Clone)]
pub struct Handler {
    state: Arc<Mutex<FeedState>>,
    feed: Arc<Feed>,
    lifetime: CancellationToken,
    list_request: Arc<Mutex<Option<CancellationToken>>>,
}

impl Handler {
    /// Return new instance owning the given state.
    ///
    pub fn new(feed: Feed, state: FeedState) -> Self {
        Handler {
            state: Arc::new(Mutex::new(state)),
            feed: Arc::new(feed),
            lifetime: CancellationToken::new(),
            list_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Copy of the current feed state.
    ///
    pub async fn snapshot(&self) -> FeedState {
        self.state.lock().await.clone()
    }

    /// Tear the feed down. Outstanding requests are abandoned and their
    /// results never applied; later events are rejected.
    ///
    pub fn shutdown(&self) {
        info!("Shutting down feed, cancelling outstanding requests...");
        self.lifetime.cancel();
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&self, event: Event) -> AppResult<()> {
        debug!("Processing network event '{:?}'...", event);
        if self.lifetime.is_cancelled() {
            return Err(StateError::ShutDown.into());
        }
        match event {
            Event::Mount => self.mount().await?,
            Event::Reload => self.load_posts(None).await?,
            Event::NextPage => self.load_posts(Some(Direction::Next)).await?,
            Event::PreviousPage => self.load_posts(Some(Direction::Previous)).await?,
            Event::LoadStatus => self.load_status().await?,
            Event::UpdateStatus { status } => self.update_status(status).await?,
            Event::NewPost => {
                self.dispatch(Action::NewPost).await;
            }
            Event::StartEdit { id } => self.start_edit(id).await?,
            Event::CancelEdit => {
                self.dispatch(Action::CancelEdit).await;
            }
            Event::SavePost { draft } => self.save_post(draft).await?,
            Event::DeletePost { id } => self.delete_post(id).await?,
            Event::DismissError => {
                self.dispatch(Action::DismissError).await;
            }
        }
        Ok(())
    }

    /// Apply `action` unless the feed has been shut down. Returns whether
    /// it was applied.
    ///
    async fn dispatch(&self, action: Action) -> bool {
        let mut state = self.state.lock().await;
        if self.lifetime.is_cancelled() {
            debug!("Feed shut down, dropping {:?}.", action);
            return false;
        }
        state.apply(action);
        true
    }

    /// Fetch the first page and the user status independently.
    ///
    async fn mount(&self) -> AppResult<()> {
        info!("Preparing initial feed data...");
        let (status, posts) = tokio::join!(self.load_status(), self.load_posts(None));
        status.and(posts)
    }

    /// Issue a list request for the current page, moved in `direction`.
    ///
    async fn load_posts(&self, direction: Option<Direction>) -> AppResult<()> {
        let (request, page, token) = {
            let mut state = self.state.lock().await;
            if self.lifetime.is_cancelled() {
                debug!("Feed shut down, skipping list request.");
                return Ok(());
            }
            let token = self.lifetime.child_token();
            if let Some(previous) = self.list_request.lock().await.replace(token.clone()) {
                previous.cancel();
            }
            state.apply(Action::ListRequested { direction });
            (state.latest_list_request(), state.current_page(), token)
        };

        info!("Fetching posts for page {}...", page);
        match cancellable(&token, self.feed.posts(page)).await {
            None => {
                debug!("List request {} for page {} was cancelled.", request, page);
                Ok(())
            }
            Some(Ok(data)) => {
                info!("Received {} posts for page {}.", data.posts.len(), page);
                self.apply_list_result(request, Action::ListLoaded { request, page: data })
                    .await;
                Ok(())
            }
            Some(Err(e)) => {
                error!("Failed to fetch posts for page {}: {}", page, e);
                let applied = self
                    .apply_list_result(
                        request,
                        Action::ListFailed {
                            request,
                            error: e.clone(),
                        },
                    )
                    .await;
                if applied {
                    Err(e.into())
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Apply a completed list request under the lock. Returns false when the
    /// result was discarded, either as stale or because the feed is shut down.
    ///
    async fn apply_list_result(&self, request: u64, action: Action) -> bool {
        let mut state = self.state.lock().await;
        if self.lifetime.is_cancelled() {
            debug!("Feed shut down, dropping list response {}.", request);
            return false;
        }
        if !state.pagination.is_latest(request) {
            warn!(
                "Discarding stale list response {} (latest is {}).",
                request,
                state.latest_list_request()
            );
            return false;
        }
        state.apply(action);
        true
    }

    async fn load_status(&self) -> AppResult<()> {
        info!("Fetching user status...");
        let result = cancellable(&self.lifetime, self.feed.status()).await;
        self.apply_status(result).await
    }

    /// Local status only changes once the server confirms the new value.
    ///
    async fn update_status(&self, status: String) -> AppResult<()> {
        info!("Updating user status...");
        let result = cancellable(&self.lifetime, self.feed.update_status(&status)).await;
        self.apply_status(result).await
    }

    async fn apply_status(&self, result: Option<Result<String, FeedError>>) -> AppResult<()> {
        match result {
            None => Ok(()),
            Some(Ok(status)) => {
                info!("User status is now '{}'.", status);
                self.dispatch(Action::StatusLoaded(status)).await;
                Ok(())
            }
            Some(Err(e)) => {
                error!("Failed to fetch or update user status: {}", e);
                if self.dispatch(Action::StatusFailed(e.clone())).await {
                    Err(e.into())
                } else {
                    Ok(())
                }
            }
        }
    }

    async fn start_edit(&self, id: String) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if state.find_post(&id).is_none() {
            warn!("Cannot edit post {}: not on the current page.", id);
            return Err(StateError::PostNotFound { id }.into());
        }
        state.apply(Action::StartEdit { id });
        Ok(())
    }

    /// Create or update depending on the editor, reconcile the response into
    /// the list, then reload the current page whatever the outcome.
    ///
    async fn save_post(&self, draft: PostDraft) -> AppResult<()> {
        let replaces = {
            let mut state = self.state.lock().await;
            if self.lifetime.is_cancelled() {
                return Err(StateError::ShutDown.into());
            }
            if !state.editing.is_editing {
                return Err(StateError::NotEditing.into());
            }
            state.apply(Action::SaveStarted);
            state.editing.target_id().map(str::to_owned)
        };

        let outcome = match &replaces {
            Some(id) => {
                info!("Updating post {}...", id);
                cancellable(&self.lifetime, self.feed.update_post(id, &draft)).await
            }
            None => {
                info!("Creating new post '{}'...", draft.title);
                cancellable(&self.lifetime, self.feed.create_post(&draft)).await
            }
        };
        let saved = match outcome {
            None => return Ok(()),
            Some(Ok(post)) => {
                info!("Post '{}' saved with id {}.", post.title, post.id);
                self.dispatch(Action::PostSaved { post, replaces }).await;
                Ok(())
            }
            Some(Err(e)) => {
                error!("Failed to save post: {}", e);
                if self.dispatch(Action::SaveFailed(e.clone())).await {
                    Err(e)
                } else {
                    Ok(())
                }
            }
        };

        let reloaded = self.load_posts(None).await;
        match saved {
            Err(e) => Err(AppError::from(e)),
            Ok(()) => reloaded,
        }
    }

    /// Delete a post, then reload the current page whatever the outcome.
    /// Failures are recorded on the editor state but never published to the
    /// error reporter.
    ///
    async fn delete_post(&self, id: String) -> AppResult<()> {
        info!("Deleting post {}...", id);
        self.dispatch(Action::DeleteStarted { id: id.clone() }).await;

        let deleted = match cancellable(&self.lifetime, self.feed.delete_post(&id)).await {
            None => return Ok(()),
            Some(Ok(())) => {
                info!("Post {} deleted successfully.", id);
                self.dispatch(Action::PostDeleted { id }).await;
                Ok(())
            }
            Some(Err(e)) => {
                warn!("Failed to delete post {}: {}", id, e);
                let recorded = self
                    .dispatch(Action::DeleteFailed {
                        id,
                        error: e.clone(),
                    })
                    .await;
                if recorded {
                    Err(e)
                } else {
                    Ok(())
                }
            }
        };

        let reloaded = self.load_posts(None).await;
        match deleted {
            Err(e) => Err(AppError::from(e)),
            Ok(()) => reloaded,
        }
    }
}

/// Await `fut` unless `token` is cancelled first.
///
async fn cancellable<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        _ = token.cancelled() => None,
        output = fut => Some(output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Client, Post};
    use crate::state::ListPhase;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn handler(server: &MockServer) -> Handler {
        let client = Client::new("token", &server.base_url(), Duration::from_secs(5)).unwrap();
        Handler::new(Feed::with_client(client), FeedState::new())
    }

    fn fake_posts(count: usize) -> Vec<Post> {
        (0..count)
            .map(|i| Post {
                id: format!("post-{}", i),
                ..Faker.fake::<Post>()
            })
            .collect()
    }

    fn post_json(post: &Post) -> Value {
        json!({
            "_id": post.id,
            "title": post.title,
            "content": post.content,
            "imageUrl": post.image_url,
            "creator": { "_id": post.creator.id, "name": post.creator.name },
            "createdAt": post.created_at.to_rfc3339(),
        })
    }

    fn page_json(posts: &[Post], total: u64) -> Value {
        json!({
            "posts": posts.iter().map(post_json).collect::<Vec<_>>(),
            "totalItems": total
        })
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: "Some content".to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn mount_loads_posts_and_status() -> AppResult<()> {
        let posts = fake_posts(2);
        let server = MockServer::start();
        let list = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/feed/posts")
                    .query_param("page", "1")
                    .header("Authorization", "Bearer token");
                then.status(200).json_body(page_json(&posts, 2));
            })
            .await;
        let status = server
            .mock_async(|when, then| {
                when.method("GET").path("/auth/status");
                then.status(200).json_body(json!({ "status": "Hello" }));
            })
            .await;

        let handler = handler(&server);
        handler.handle(Event::Mount).await?;
        list.assert_async().await;
        status.assert_async().await;

        let state = handler.snapshot().await;
        assert_eq!(state.posts, posts);
        assert_eq!(state.status, "Hello");
        assert!(!state.loading);
        assert_eq!(state.pagination.phase, ListPhase::Loaded);
        Ok(())
    }

    #[tokio::test]
    async fn mount_status_failure_still_loads_posts() {
        let posts = fake_posts(1);
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts");
                then.status(200).json_body(page_json(&posts, 1));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/auth/status");
                then.status(500);
            })
            .await;

        let handler = handler(&server);
        assert!(handler.handle(Event::Mount).await.is_err());
        let state = handler.snapshot().await;
        assert_eq!(state.posts, posts);
        assert!(matches!(
            state.error.current(),
            Some(FeedError::HttpStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn navigation_over_three_posts() -> AppResult<()> {
        let posts = fake_posts(3);
        let server = MockServer::start();
        let page_zero = server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts").query_param("page", "0");
                then.status(500);
            })
            .await;
        let page_one = server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts").query_param("page", "1");
                then.status(200).json_body(page_json(&posts[..2], 3));
            })
            .await;
        let page_two = server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts").query_param("page", "2");
                then.status(200).json_body(page_json(&posts[2..], 3));
            })
            .await;

        let handler = handler(&server);
        handler.handle(Event::Reload).await?;
        let state = handler.snapshot().await;
        assert_eq!(state.posts, posts[..2].to_vec());
        assert_eq!(state.last_page(), 2);

        handler.handle(Event::NextPage).await?;
        let state = handler.snapshot().await;
        assert_eq!(state.current_page(), 2);
        assert_eq!(state.posts, posts[2..].to_vec());

        handler.handle(Event::PreviousPage).await?;
        handler.handle(Event::PreviousPage).await?;
        let state = handler.snapshot().await;
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.posts, posts[..2].to_vec());

        assert_eq!(page_one.hits_async().await, 3);
        assert_eq!(page_two.hits_async().await, 1);
        assert_eq!(page_zero.hits_async().await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn stale_list_response_is_not_applied() -> AppResult<()> {
        let posts = fake_posts(3);
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts").query_param("page", "1");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(page_json(&posts[..2], 3));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts").query_param("page", "2");
                then.status(200).json_body(page_json(&posts[2..], 3));
            })
            .await;

        let handler = handler(&server);
        let (slow, fast) = tokio::join!(handler.handle(Event::Reload), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handler.handle(Event::NextPage).await
        });
        slow?;
        fast?;

        let state = handler.snapshot().await;
        assert_eq!(state.current_page(), 2);
        assert_eq!(state.posts, posts[2..].to_vec());
        assert!(!state.loading);
        Ok(())
    }

    #[tokio::test]
    async fn create_then_reload_contains_post_once() -> AppResult<()> {
        let existing = fake_posts(1);
        let created = Post {
            id: "created".to_string(),
            title: "Brand new".to_string(),
            ..Faker.fake::<Post>()
        };
        let server = MockServer::start();
        let mut first_page = server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts");
                then.status(200).json_body(page_json(&existing, 1));
            })
            .await;

        let handler = handler(&server);
        handler.handle(Event::Reload).await?;
        first_page.delete_async().await;

        let resynced = vec![existing[0].clone(), created.clone()];
        let reload = server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts").query_param("page", "1");
                then.status(200).json_body(page_json(&resynced, 2));
            })
            .await;
        let create = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/feed/post")
                    .body_contains("Brand new");
                then.status(201).json_body(json!({ "post": post_json(&created) }));
            })
            .await;

        handler.handle(Event::NewPost).await?;
        handler
            .handle(Event::SavePost {
                draft: draft("Brand new"),
            })
            .await?;
        create.assert_async().await;
        reload.assert_async().await;

        let state = handler.snapshot().await;
        assert_eq!(
            state.posts.iter().filter(|p| p.title == "Brand new").count(),
            1
        );
        assert!(!state.editing.is_editing);
        assert!(!state.editing.saving);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_post() -> AppResult<()> {
        let posts = fake_posts(2);
        let updated = Post {
            title: "Edited".to_string(),
            ..posts[1].clone()
        };
        let server = MockServer::start();
        let mut list = server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts");
                then.status(200).json_body(page_json(&posts, 2));
            })
            .await;

        let handler = handler(&server);
        handler.handle(Event::Reload).await?;
        list.delete_async().await;

        let resynced = vec![posts[0].clone(), updated.clone()];
        server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts");
                then.status(200).json_body(page_json(&resynced, 2));
            })
            .await;
        let update = server
            .mock_async(|when, then| {
                when.method("PUT").path(format!("/feed/post/{}", posts[1].id));
                then.status(200).json_body(json!({ "post": post_json(&updated) }));
            })
            .await;

        handler
            .handle(Event::StartEdit {
                id: posts[1].id.clone(),
            })
            .await?;
        assert_eq!(handler.snapshot().await.editing.draft.as_ref(), Some(&posts[1]));

        let edit = PostDraft {
            title: "Edited".to_string(),
            ..PostDraft::from_post(&posts[1])
        };
        handler.handle(Event::SavePost { draft: edit }).await?;
        update.assert_async().await;

        let state = handler.snapshot().await;
        assert_eq!(state.posts, resynced);
        assert_eq!(state.editing.draft, None);
        Ok(())
    }

    #[tokio::test]
    async fn save_failure_closes_editor_and_reloads() {
        let posts = fake_posts(1);
        let server = MockServer::start();
        let list = server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts");
                then.status(200).json_body(page_json(&posts, 1));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/feed/post");
                then.status(422)
                    .json_body(json!({ "message": "Validation failed, entered data is incorrect." }));
            })
            .await;

        let handler = handler(&server);
        handler.handle(Event::NewPost).await.unwrap();
        let result = handler
            .handle(Event::SavePost {
                draft: draft("x"),
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::Feed(FeedError::HttpStatus { status: 422, .. }))
        ));

        let state = handler.snapshot().await;
        assert!(!state.editing.is_editing);
        assert!(!state.editing.saving);
        assert_eq!(
            state
                .editing
                .last_error
                .as_ref()
                .and_then(|e| e.server_message()),
            Some("Validation failed, entered data is incorrect.")
        );
        assert!(!state.error.is_set());
        assert_eq!(list.hits_async().await, 1);
        assert_eq!(state.posts, posts);
    }

    #[tokio::test]
    async fn save_without_editor_is_rejected() {
        let server = MockServer::start();
        let handler = handler(&server);
        let result = handler
            .handle(Event::SavePost {
                draft: draft("x"),
            })
            .await;
        assert!(matches!(result, Err(AppError::State(StateError::NotEditing))));
    }

    #[tokio::test]
    async fn start_edit_unknown_post() {
        let server = MockServer::start();
        let handler = handler(&server);
        let result = handler
            .handle(Event::StartEdit {
                id: "missing".to_string(),
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::State(StateError::PostNotFound { .. }))
        ));
        assert!(!handler.snapshot().await.editing.is_editing);
    }

    #[tokio::test]
    async fn delete_removes_post() -> AppResult<()> {
        let posts = fake_posts(2);
        let server = MockServer::start();
        let mut list = server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts");
                then.status(200).json_body(page_json(&posts, 2));
            })
            .await;

        let handler = handler(&server);
        handler.handle(Event::Reload).await?;
        list.delete_async().await;

        let remaining = posts[1..].to_vec();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts");
                then.status(200).json_body(page_json(&remaining, 1));
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method("DELETE").path(format!("/feed/post/{}", posts[0].id));
                then.status(200).json_body(json!({ "message": "Deleted post." }));
            })
            .await;

        handler
            .handle(Event::DeletePost {
                id: posts[0].id.clone(),
            })
            .await?;
        delete.assert_async().await;

        let state = handler.snapshot().await;
        assert_eq!(state.posts, remaining);
        assert!(state.find_post(&posts[0].id).is_none());
        assert!(!state.loading);
        Ok(())
    }

    #[tokio::test]
    async fn delete_failure_is_not_reported() -> AppResult<()> {
        let posts = fake_posts(2);
        let server = MockServer::start();
        let list = server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts");
                then.status(200).json_body(page_json(&posts, 2));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("DELETE").path(format!("/feed/post/{}", posts[0].id));
                then.status(403).json_body(json!({ "message": "Not authorized!" }));
            })
            .await;

        let handler = handler(&server);
        handler.handle(Event::Reload).await?;
        let result = handler
            .handle(Event::DeletePost {
                id: posts[0].id.clone(),
            })
            .await;
        assert!(result.is_err());

        let state = handler.snapshot().await;
        assert!(!state.loading);
        assert!(!state.error.is_set());
        assert!(state.editing.last_error.is_some());
        assert_eq!(state.posts, posts);
        assert_eq!(list.hits_async().await, 2);
        Ok(())
    }

    #[tokio::test]
    async fn status_round_trip() -> AppResult<()> {
        let server = MockServer::start();
        let update = server
            .mock_async(|when, then| {
                when.method("PATCH")
                    .path("/auth/status")
                    .json_body(json!({ "status": "Learning Rust" }));
                then.status(200).json_body(json!({ "status": "Learning Rust" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/auth/status");
                then.status(200).json_body(json!({ "status": "Learning Rust" }));
            })
            .await;

        let handler = handler(&server);
        handler
            .handle(Event::UpdateStatus {
                status: "Learning Rust".to_string(),
            })
            .await?;
        update.assert_async().await;
        assert_eq!(handler.snapshot().await.status, "Learning Rust");

        handler.handle(Event::LoadStatus).await?;
        assert_eq!(handler.snapshot().await.status, "Learning Rust");
        Ok(())
    }

    #[tokio::test]
    async fn status_update_failure_keeps_old_status() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("PATCH").path("/auth/status");
                then.status(500);
            })
            .await;

        let handler = handler(&server);
        handler
            .state
            .lock()
            .await
            .apply(Action::StatusLoaded("Old".to_string()));
        let result = handler
            .handle(Event::UpdateStatus {
                status: "New".to_string(),
            })
            .await;
        assert!(result.is_err());

        let state = handler.snapshot().await;
        assert_eq!(state.status, "Old");
        assert!(state.error.is_set());

        handler.handle(Event::DismissError).await.unwrap();
        assert!(!handler.snapshot().await.error.is_set());
    }

    #[tokio::test]
    async fn shutdown_discards_outstanding_requests() {
        let posts = fake_posts(2);
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(page_json(&posts, 2));
            })
            .await;

        let handler = handler(&server);
        let (pending, _) = tokio::join!(handler.handle(Event::Reload), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handler.shutdown();
        });
        assert!(pending.is_ok());

        let state = handler.snapshot().await;
        assert!(state.posts.is_empty());
        assert_eq!(state.pagination.phase, ListPhase::Loading);

        let result = handler.handle(Event::Reload).await;
        assert!(matches!(result, Err(AppError::State(StateError::ShutDown))));
    }

    #[tokio::test]
    async fn superseded_list_failure_is_not_an_error() -> AppResult<()> {
        let posts = fake_posts(3);
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts").query_param("page", "1");
                then.status(500).delay(Duration::from_millis(500));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts").query_param("page", "2");
                then.status(200).json_body(page_json(&posts[2..], 3));
            })
            .await;

        let handler = handler(&server);
        let (slow, fast) = tokio::join!(handler.handle(Event::Reload), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handler.handle(Event::NextPage).await
        });
        slow?;
        fast?;

        let state = handler.snapshot().await;
        assert_eq!(state.posts, posts[2..].to_vec());
        assert_eq!(state.pagination.phase, ListPhase::Loaded);
        assert!(!state.error.is_set());
        Ok(())
    }

    #[tokio::test]
    async fn shutdown_after_save_response_discards_result_and_reload() {
        let created = Post {
            id: "created".to_string(),
            ..Faker.fake::<Post>()
        };
        let server = MockServer::start();
        let list = server
            .mock_async(|when, then| {
                when.method("GET").path("/feed/posts");
                then.status(200).json_body(page_json(&[], 0));
            })
            .await;
        let create = server
            .mock_async(|when, then| {
                when.method("POST").path("/feed/post");
                then.status(201)
                    .delay(Duration::from_millis(200))
                    .json_body(json!({ "post": post_json(&created) }));
            })
            .await;

        let handler = handler(&server);
        handler.handle(Event::NewPost).await.unwrap();
        let saving = tokio::spawn({
            let handler = handler.clone();
            async move {
                handler
                    .handle(Event::SavePost {
                        draft: draft("Too late"),
                    })
                    .await
            }
        });

        // Hold the state while the create response arrives, then tear down
        // before the save can apply it.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let guard = handler.state.lock().await;
        tokio::time::sleep(Duration::from_millis(400)).await;
        handler.shutdown();
        drop(guard);

        assert!(saving.await.unwrap().is_ok());
        create.assert_async().await;
        assert_eq!(list.hits_async().await, 0);

        let state = handler.snapshot().await;
        assert!(state.posts.is_empty());
        assert!(state.editing.saving);
        assert!(!state.loading);
        assert_eq!(state.pagination.phase, ListPhase::Idle);
    }
}
