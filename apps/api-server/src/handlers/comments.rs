//! Comment mutation handlers.
//!
//! Comment creation is open to everyone; anonymous submitters are recorded
//! as guests. Edits and deletes require the authenticated author (or a
//! superuser), and always redirect back to the parent post's detail page.

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use scribe_core::domain::{Comment, CommentAuthor};
use scribe_core::policy;
use scribe_shared::dto::{CommentResponse, NewCommentRequest, UpdateCommentRequest};

use super::see_other;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn comment_response(comment: Comment) -> CommentResponse {
    let (author_id, guest_name) = match &comment.author {
        CommentAuthor::User(id) => (Some(id.to_string()), None),
        CommentAuthor::Guest(name) => (None, Some(name.clone())),
    };

    CommentResponse {
        id: comment.id.to_string(),
        body: comment.body,
        author_id,
        guest_name,
        created_at: comment.created_at.to_rfc3339(),
    }
}

fn comment_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("No comment with id {}", id))
}

/// A comment whose post is gone. Unreachable while the schema cascades
/// post deletes onto comments.
fn parent_post_missing() -> AppError {
    AppError::NotFound("Parent post not found".to_string())
}

/// POST /api/posts/{slug}/comments - Open to anonymous visitors
pub async fn create(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    slug: web::Path<String>,
    body: web::Json<NewCommentRequest>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();
    let req = body.into_inner();

    if req.body.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "body must not be empty".to_string(),
        ]));
    }

    let post = state
        .posts
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post with slug '{}'", slug)))?;

    let author = match viewer.0 {
        Some(identity) => CommentAuthor::User(identity.user_id),
        None => CommentAuthor::Guest(
            req.guest_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Guest".to_string()),
        ),
    };

    let comment = Comment::new(post.id, author, req.body);
    let saved = state.comments.insert(comment).await?;

    let location = format!("/posts/{}", slug);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(comment_response(saved)))
}

/// PUT /api/comments/{id} - Protected route, author or superuser only
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let req = body.into_inner();

    if req.body.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "body must not be empty".to_string(),
        ]));
    }

    let mut comment = state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    // Same body as an unknown id, so existence is not confirmed.
    policy::authorize_owner("comment", id, comment.author_user_id(), &identity.actor())
        .map_err(|_| comment_not_found(id))?;

    comment.body = req.body;
    comment.updated_at = chrono::Utc::now();
    let saved = state.comments.update(comment).await?;

    let post = state
        .posts
        .find_by_id(saved.post_id)
        .await?
        .ok_or_else(parent_post_missing)?;

    Ok(see_other(format!("/posts/{}", post.slug)))
}

/// DELETE /api/comments/{id} - Protected route, author or superuser only
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();

    let comment = state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    policy::authorize_owner("comment", id, comment.author_user_id(), &identity.actor())
        .map_err(|_| comment_not_found(id))?;

    // Resolve the redirect target before the comment disappears.
    let post = state
        .posts
        .find_by_id(comment.post_id)
        .await?
        .ok_or_else(parent_post_missing)?;
    let location = format!("/posts/{}", post.slug);

    state.comments.delete(comment.id).await?;

    Ok(see_other(location))
}
