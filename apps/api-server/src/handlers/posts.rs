//! Post listing, detail and mutation handlers.

use actix_web::{HttpResponse, http::header, web};
use serde::Deserialize;

use scribe_core::domain::{Post, sort_tags};
use scribe_core::policy;
use scribe_shared::dto::{
    NewPostRequest, PostDetailResponse, PostListResponse, PostResponse, TagResponse,
    UpdatePostRequest,
};

use super::{comments::comment_response, see_other};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Listing page size, matching the rendered index.
const POSTS_PER_PAGE: usize = 6;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

pub(crate) fn post_response(post: Post) -> PostResponse {
    PostResponse {
        slug: post.slug,
        title: post.title,
        description: post.description,
        body: post.body,
        draft: post.draft,
        author_id: post.user_id.to_string(),
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

fn post_not_found(slug: &str) -> AppError {
    AppError::NotFound(format!("No post with slug '{}'", slug))
}

/// GET /api/posts?page=N
///
/// Newest first, six per page. Drafts are filtered out unless the viewer
/// owns them.
pub async fn list(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = query.page.max(1);

    let posts = state.posts.list_recent().await?;
    let visible = policy::visible_posts(posts, viewer.actor().as_ref());

    let total_pages = visible.len().div_ceil(POSTS_PER_PAGE).max(1);
    let posts = visible
        .into_iter()
        .skip((page - 1).saturating_mul(POSTS_PER_PAGE))
        .take(POSTS_PER_PAGE)
        .map(post_response)
        .collect();

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts,
        page,
        per_page: POSTS_PER_PAGE,
        total_pages,
    }))
}

/// GET /api/posts/{slug}
pub async fn detail(state: web::Data<AppState>, slug: web::Path<String>) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();

    let post = state
        .posts
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| post_not_found(&slug))?;

    let mut tags = state.tags.find_for_post(post.id).await?;
    sort_tags(&mut tags);

    let comments = state.comments.find_by_post(post.id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(post),
        tags: tags
            .into_iter()
            .map(|t| TagResponse { name: t.name })
            .collect(),
        comments: comments.into_iter().map(comment_response).collect(),
    }))
}

/// POST /api/posts - Protected route
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<NewPostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "title must not be empty".to_string(),
        ]));
    }
    if req.body.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "body must not be empty".to_string(),
        ]));
    }

    let post = Post::new(
        identity.user_id,
        req.title,
        req.description,
        req.body,
        req.draft,
    );
    if post.slug.is_empty() {
        return Err(AppError::Validation(vec![
            "title must contain at least one alphanumeric character".to_string(),
        ]));
    }

    let saved = state.posts.insert(post).await?;
    if !req.tags.is_empty() {
        state.tags.set_post_tags(saved.id, &req.tags).await?;
    }

    tracing::info!(slug = %saved.slug, author = %identity.username, "Post created");

    let location = format!("/posts/{}", saved.slug);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(post_response(saved)))
}

/// PUT /api/posts/{slug} - Protected route, owner or superuser only
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    slug: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();

    let mut post = state
        .posts
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| post_not_found(&slug))?;

    // Same body as an unknown slug, so existence is not confirmed.
    policy::authorize_owner("post", post.id, Some(post.user_id), &identity.actor())
        .map_err(|_| post_not_found(&slug))?;

    let req = body.into_inner();
    if let Some(title) = req.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation(vec![
                "title must not be empty".to_string(),
            ]));
        }
        post.title = title;
    }
    if let Some(description) = req.description {
        post.description = description;
    }
    if let Some(body) = req.body {
        post.body = body;
    }
    if let Some(draft) = req.draft {
        post.draft = draft;
    }
    post.updated_at = chrono::Utc::now();

    let saved = state.posts.update(post).await?;
    if let Some(tags) = req.tags {
        state.tags.set_post_tags(saved.id, &tags).await?;
    }

    Ok(see_other(format!("/posts/{}", saved.slug)))
}

/// DELETE /api/posts/{slug} - Protected route, owner or superuser only
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();

    let post = state
        .posts
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| post_not_found(&slug))?;

    policy::authorize_owner("post", post.id, Some(post.user_id), &identity.actor())
        .map_err(|_| post_not_found(&slug))?;

    state.posts.delete(post.id).await?;

    tracing::info!(slug = %slug, actor = %identity.username, "Post deleted");

    Ok(see_other("/posts".to_string()))
}
