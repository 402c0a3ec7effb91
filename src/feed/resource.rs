use chrono::{DateTime, Datelike, Utc};
use fake::Dummy;

/// Defines the author of a post.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Creator {
    pub id: String,
    pub name: String,
}

/// Defines post data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_url: String, // opaque handle, resolved by the presentation layer
    pub creator: Creator,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Whether the given user wrote this post and may therefore edit it.
    ///
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.creator.id == user_id
    }

    /// Creation date in US month/day/year form, e.g. `3/7/2024`.
    ///
    pub fn display_date(&self) -> String {
        format!(
            "{}/{}/{}",
            self.created_at.month(),
            self.created_at.day(),
            self.created_at.year()
        )
    }
}

/// One page of posts together with the server-side total.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total_count: u64,
}

/// Image sent along with a post draft.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DraftImage {
    /// New file to upload.
    Upload { file_name: String, bytes: Vec<u8> },
    /// Keep the image the post already references.
    Existing(String),
}

/// Fields submitted when creating or updating a post.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image: Option<DraftImage>,
}

impl PostDraft {
    /// Draft that re-submits an existing post's fields, keeping its image.
    ///
    pub fn from_post(post: &Post) -> PostDraft {
        PostDraft {
            title: post.title.clone(),
            content: post.content.clone(),
            image: Some(DraftImage::Existing(post.image_url.clone())),
        }
    }
}
