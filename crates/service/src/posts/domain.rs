use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post. `name`/`avatar` are the author's values at creation time and are never refreshed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub text: String,
    pub user_id: Uuid,
    pub name: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    /// Unique per user, most recent first.
    pub likes: Vec<Like>,
    /// Most recent first.
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Like {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub user_id: Uuid,
    pub name: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /posts`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostInput {
    #[serde(default)]
    pub text: String,
}

/// Body of `POST /posts/comment/:id`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommentInput {
    #[serde(default)]
    pub text: String,
}

/// Post row to persist, author fields already snapshotted
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
}

/// Comment row to persist, author fields already snapshotted
#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
}

impl Post {
    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.likes.iter().any(|l| l.user_id == user_id)
    }
}

impl From<models::post_like::Model> for Like {
    fn from(m: models::post_like::Model) -> Self { Self { user_id: m.user_id } }
}

impl From<models::post_comment::Model> for Comment {
    fn from(m: models::post_comment::Model) -> Self {
        Self {
            id: m.id,
            text: m.text,
            user_id: m.user_id,
            name: m.name,
            avatar: m.avatar,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

impl Post {
    pub(crate) fn from_parts(m: models::post::Model, likes: Vec<Like>, comments: Vec<Comment>) -> Self {
        Self {
            id: m.id,
            text: m.text,
            user_id: m.user_id,
            name: m.name,
            avatar: m.avatar,
            created_at: m.created_at.with_timezone(&Utc),
            likes,
            comments,
        }
    }
}
