//! Sidebar context endpoint.

use actix_web::{HttpResponse, web};

use scribe_core::domain::sort_tags;
use scribe_shared::dto::{SidebarResponse, TagResponse};

use super::posts::post_response;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// How many recent posts the sidebar shows.
const SIDEBAR_RECENT_POSTS: u64 = 5;

/// GET /api/sidebar
///
/// The five most recent posts plus every tag, sorted alphabetically without
/// regard to stored casing.
pub async fn sidebar(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let recent = state.posts.recent(SIDEBAR_RECENT_POSTS).await?;

    let mut tags = state.tags.list_all().await?;
    sort_tags(&mut tags);

    Ok(HttpResponse::Ok().json(SidebarResponse {
        recent_posts: recent.into_iter().map(post_response).collect(),
        tags: tags
            .into_iter()
            .map(|t| TagResponse { name: t.name })
            .collect(),
    }))
}
