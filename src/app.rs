use crate::config::Config;
use crate::error::AppResult;
use crate::events::network::{Event, Handler};
use crate::feed::{DraftImage, Feed, PostDraft};
use crate::state::{FeedState, StateError};
use log::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Specify the one-shot commands the front end can run against the feed.
///
#[derive(Debug, Clone)]
pub enum Command {
    Page {
        number: u32,
    },
    Create {
        title: String,
        content: String,
        image: Option<PathBuf>,
    },
    Edit {
        page: u32,
        id: String,
        title: Option<String>,
        content: Option<String>,
        image: Option<PathBuf>,
    },
    Delete {
        page: u32,
        id: String,
    },
    Status {
        value: Option<String>,
    },
}

impl Command {
    /// Page the feed is mounted on before the command runs.
    ///
    fn page(&self) -> u32 {
        match self {
            Command::Page { number } => *number,
            Command::Edit { page, .. } | Command::Delete { page, .. } => *page,
            Command::Create { .. } | Command::Status { .. } => 1,
        }
    }
}

/// Oversees feed mounting, command execution and output.
///
pub struct App {
    handler: Handler,
}

impl App {
    /// Mount the feed according to the given configuration, run the command
    /// and print the resulting feed. Returns the result of the command.
    ///
    pub async fn start(config: Config, command: Command) -> AppResult<()> {
        info!("Starting application...");
        let feed = Feed::new(
            config.access_token()?,
            &config.base_url,
            config.request_timeout(),
        )?;
        let app = App {
            handler: Handler::new(feed, FeedState::at_page(command.page())),
        };

        let result = app.run(command).await;
        app.handler.shutdown();
        println!("{}", summary(&app.handler.snapshot().await));

        info!("Exiting application...");
        result
    }

    async fn run(&self, command: Command) -> AppResult<()> {
        // Mount failures are already on the feed state; mutations still run.
        let mounted = self.handler.handle(Event::Mount).await;
        if let Err(e) = &mounted {
            warn!("Feed mounted with errors: {}", e);
        }
        match command {
            Command::Page { .. } | Command::Status { value: None } => mounted,
            Command::Status {
                value: Some(status),
            } => self.handler.handle(Event::UpdateStatus { status }).await,
            Command::Create {
                title,
                content,
                image,
            } => {
                let draft = PostDraft {
                    title,
                    content,
                    image: image.as_deref().map(read_image).transpose()?,
                };
                self.handler.handle(Event::NewPost).await?;
                self.handler.handle(Event::SavePost { draft }).await
            }
            Command::Edit {
                id,
                title,
                content,
                image,
                ..
            } => {
                self.handler
                    .handle(Event::StartEdit { id: id.clone() })
                    .await?;
                let current = self
                    .handler
                    .snapshot()
                    .await
                    .editing
                    .draft
                    .ok_or(StateError::PostNotFound { id })?;

                let mut draft = PostDraft::from_post(&current);
                if let Some(title) = title {
                    draft.title = title;
                }
                if let Some(content) = content {
                    draft.content = content;
                }
                if let Some(path) = image {
                    draft.image = Some(read_image(&path)?);
                }
                self.handler.handle(Event::SavePost { draft }).await
            }
            Command::Delete { id, .. } => self.handler.handle(Event::DeletePost { id }).await,
        }
    }
}

/// Load an image file as an upload part.
///
fn read_image(path: &Path) -> AppResult<DraftImage> {
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(DraftImage::Upload { file_name, bytes })
}

/// Plain-text rendering of the feed state.
///
pub fn summary(state: &FeedState) -> String {
    let mut lines = vec![format!("Status: {}", state.status)];
    if let Some(error) = state.error.current() {
        lines.push(format!("Error: {}", error));
    }
    if let Some(error) = &state.editing.last_error {
        lines.push(format!("Last change failed: {}", error));
    }
    lines.push(format!(
        "Page {} of {} ({} posts)",
        state.current_page(),
        state.last_page().max(1),
        state.pagination.total_count
    ));
    let mut hints = Vec::new();
    if state.pagination.has_previous() {
        hints.push(format!("previous: page {}", state.current_page() - 1));
    }
    if state.pagination.has_next() {
        hints.push(format!("next: page {}", state.current_page() + 1));
    }
    if !hints.is_empty() {
        lines.push(format!("({})", hints.join(", ")));
    }
    if state.is_empty_page() {
        lines.push("No posts found.".to_string());
    }
    for post in &state.posts {
        lines.push(format!(
            "  [{}] {} by {} on {}",
            post.id,
            post.title,
            post.creator.name,
            post.display_date()
        ));
    }
    lines.join("\n")
}
