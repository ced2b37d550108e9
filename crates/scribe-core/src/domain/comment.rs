use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a comment: a registered user or an anonymous guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CommentAuthor {
    User(Uuid),
    Guest(String),
}

/// Comment entity - a reply attached to exactly one post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: CommentAuthor,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment on a post.
    pub fn new(post_id: Uuid, author: CommentAuthor, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            author,
            body,
            created_at: now,
            updated_at: now,
        }
    }

    /// The registered author's id, if any. Guest comments have none.
    pub fn author_user_id(&self) -> Option<Uuid> {
        match &self.author {
            CommentAuthor::User(id) => Some(*id),
            CommentAuthor::Guest(_) => None,
        }
    }
}
