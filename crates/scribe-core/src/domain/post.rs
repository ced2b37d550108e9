use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog article, published or draft.
///
/// Posts are addressed by their slug everywhere outside the database. The slug
/// is derived from the title once at creation and stays stable across edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub draft: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by the given user.
    pub fn new(
        user_id: Uuid,
        title: String,
        description: String,
        body: String,
        draft: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            slug: slugify(&title),
            title,
            description,
            body,
            draft,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Turn a title into a URL slug: lowercase, alphanumeric runs joined by `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_slugify_punctuation_and_case() {
        assert_eq!(slugify("Rust: Fearless Concurrency!"), "rust-fearless-concurrency");
        assert_eq!(slugify("  Leading & trailing  "), "leading-trailing");
    }

    #[test]
    fn test_new_post_derives_slug() {
        let post = Post::new(
            Uuid::new_v4(),
            "My First Post".to_string(),
            "desc".to_string(),
            "body".to_string(),
            false,
        );

        assert_eq!(post.slug, "my-first-post");
        assert!(!post.draft);
    }
}
