//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;
mod sidebar;
mod tags;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, http::header, web};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{slug}", web::get().to(posts::detail))
                    .route("/{slug}", web::put().to(posts::update))
                    .route("/{slug}", web::delete().to(posts::delete))
                    .route("/{slug}/comments", web::post().to(comments::create)),
            )
            // Comment routes
            .service(
                web::scope("/comments")
                    .route("/{id}", web::put().to(comments::update))
                    .route("/{id}", web::delete().to(comments::delete)),
            )
            // Sidebar and tags
            .route("/sidebar", web::get().to(sidebar::sidebar))
            .route("/tags/{name}/posts", web::get().to(tags::posts_by_tag)),
    );
}

/// Form-style success: redirect the client to the given location.
pub(crate) fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
