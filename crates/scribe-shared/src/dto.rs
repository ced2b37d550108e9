//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub superuser: bool,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPostRequest {
    pub title: String,
    pub description: String,
    pub body: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to edit a post. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub draft: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// A post as rendered in listings and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub draft: bool,
    pub author_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A page of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

/// A post with everything its detail page renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub tags: Vec<TagResponse>,
    pub comments: Vec<CommentResponse>,
}

/// Request to add a comment to a post.
///
/// `guest_name` is only honored for anonymous submitters; authenticated
/// comments are attributed to the requesting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommentRequest {
    pub body: String,
    #[serde(default)]
    pub guest_name: Option<String>,
}

/// Request to edit a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    pub body: String,
}

/// A comment as rendered under a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub body: String,
    pub author_id: Option<String>,
    pub guest_name: Option<String>,
    pub created_at: String,
}

/// A tag label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub name: String,
}

/// The sidebar payload: recent posts plus the tag cloud.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarResponse {
    pub recent_posts: Vec<PostResponse>,
    pub tags: Vec<TagResponse>,
}
