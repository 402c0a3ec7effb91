//! Wire representations of feed service payloads.

use super::resource::{Creator, Post, PostPage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub(crate) struct CreatorModel {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
pub(crate) struct PostModel {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    pub creator: CreatorModel,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Body of `GET /feed/posts`.
///
#[derive(Deserialize)]
pub(crate) struct ListWrapper {
    pub posts: Vec<PostModel>,
    #[serde(rename = "totalItems")]
    pub total_items: u64,
}

/// Body of a successful create or update.
///
#[derive(Deserialize)]
pub(crate) struct PostWrapper {
    pub post: PostModel,
}

/// Status payload, used both ways.
///
#[derive(Deserialize, Serialize)]
pub(crate) struct StatusBody {
    pub status: String,
}

/// Error payload returned alongside failed mutations.
///
#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: model.id,
            title: model.title,
            content: model.content,
            image_url: model.image_url,
            creator: Creator {
                id: model.creator.id,
                name: model.creator.name,
            },
            created_at: model.created_at,
        }
    }
}

impl From<ListWrapper> for PostPage {
    fn from(model: ListWrapper) -> Self {
        PostPage {
            posts: model.posts.into_iter().map(Post::from).collect(),
            total_count: model.total_items,
        }
    }
}
