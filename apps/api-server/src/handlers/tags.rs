//! Tag listing handlers.

use actix_web::{HttpResponse, web};

use scribe_core::policy;

use super::posts::post_response;
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/tags/{name}/posts
///
/// Posts carrying the named tag, newest first, with drafts filtered the same
/// way as the main listing. An unknown tag yields an empty list.
pub async fn posts_by_tag(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    name: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_by_tag(&name).await?;
    let visible = policy::visible_posts(posts, viewer.actor().as_ref());

    Ok(HttpResponse::Ok().json(
        visible
            .into_iter()
            .map(post_response)
            .collect::<Vec<_>>(),
    ))
}
