//! Handler tests over in-memory repositories.
//!
//! The route table is exercised end to end with `actix_web::test`, backed by
//! a mutex-guarded store implementing the repository ports.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use async_trait::async_trait;
    use serde_json::json;
    use uuid::Uuid;

    use scribe_core::domain::{Comment, CommentAuthor, Post, Tag, User};
    use scribe_core::error::RepoError;
    use scribe_core::ports::{
        BaseRepository, CommentRepository, PasswordService, PostRepository, TagRepository,
        TokenService, UserRepository,
    };
    use scribe_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    #[derive(Default)]
    struct Store {
        users: Mutex<Vec<User>>,
        posts: Mutex<Vec<Post>>,
        comments: Mutex<Vec<Comment>>,
        tags: Mutex<Vec<Tag>>,
        post_tags: Mutex<Vec<(Uuid, Uuid)>>,
    }

    #[derive(Clone, Default)]
    struct MemRepo {
        store: Arc<Store>,
    }

    macro_rules! mem_base_repository {
        ($entity:ty, $rows:ident) => {
            #[async_trait]
            impl BaseRepository<$entity, Uuid> for MemRepo {
                async fn find_by_id(&self, id: Uuid) -> Result<Option<$entity>, RepoError> {
                    let rows = self.store.$rows.lock().unwrap();
                    Ok(rows.iter().find(|e| e.id == id).cloned())
                }

                async fn insert(&self, entity: $entity) -> Result<$entity, RepoError> {
                    self.store.$rows.lock().unwrap().push(entity.clone());
                    Ok(entity)
                }

                async fn update(&self, entity: $entity) -> Result<$entity, RepoError> {
                    let mut rows = self.store.$rows.lock().unwrap();
                    match rows.iter_mut().find(|e| e.id == entity.id) {
                        Some(row) => {
                            *row = entity.clone();
                            Ok(entity)
                        }
                        None => Err(RepoError::NotFound),
                    }
                }

                async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
                    let mut rows = self.store.$rows.lock().unwrap();
                    let before = rows.len();
                    rows.retain(|e| e.id != id);
                    if rows.len() == before {
                        return Err(RepoError::NotFound);
                    }
                    Ok(())
                }
            }
        };
    }

    mem_base_repository!(User, users);
    mem_base_repository!(Post, posts);
    mem_base_repository!(Comment, comments);

    #[async_trait]
    impl UserRepository for MemRepo {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            let users = self.store.users.lock().unwrap();
            Ok(users.iter().find(|u| u.email == email).cloned())
        }
    }

    #[async_trait]
    impl PostRepository for MemRepo {
        async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
            let posts = self.store.posts.lock().unwrap();
            Ok(posts.iter().find(|p| p.slug == slug).cloned())
        }

        async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
            let mut posts = self.store.posts.lock().unwrap().clone();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(posts)
        }

        async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
            let mut posts = self.list_recent().await?;
            posts.truncate(limit as usize);
            Ok(posts)
        }

        async fn list_by_tag(&self, tag_name: &str) -> Result<Vec<Post>, RepoError> {
            let tag_id = {
                let tags = self.store.tags.lock().unwrap();
                match tags.iter().find(|t| t.name == tag_name) {
                    Some(tag) => tag.id,
                    None => return Ok(Vec::new()),
                }
            };
            let post_ids: Vec<Uuid> = {
                let links = self.store.post_tags.lock().unwrap();
                links
                    .iter()
                    .filter(|(_, t)| *t == tag_id)
                    .map(|(p, _)| *p)
                    .collect()
            };
            let mut posts: Vec<Post> = {
                let posts = self.store.posts.lock().unwrap();
                posts
                    .iter()
                    .filter(|p| post_ids.contains(&p.id))
                    .cloned()
                    .collect()
            };
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(posts)
        }
    }

    #[async_trait]
    impl CommentRepository for MemRepo {
        async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
            let comments = self.store.comments.lock().unwrap();
            let mut found: Vec<Comment> = comments
                .iter()
                .filter(|c| c.post_id == post_id)
                .cloned()
                .collect();
            found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            Ok(found)
        }
    }

    #[async_trait]
    impl TagRepository for MemRepo {
        async fn list_all(&self) -> Result<Vec<Tag>, RepoError> {
            Ok(self.store.tags.lock().unwrap().clone())
        }

        async fn find_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
            let tag_ids: Vec<Uuid> = {
                let links = self.store.post_tags.lock().unwrap();
                links
                    .iter()
                    .filter(|(p, _)| *p == post_id)
                    .map(|(_, t)| *t)
                    .collect()
            };
            let tags = self.store.tags.lock().unwrap();
            Ok(tags
                .iter()
                .filter(|t| tag_ids.contains(&t.id))
                .cloned()
                .collect())
        }

        async fn set_post_tags(
            &self,
            post_id: Uuid,
            names: &[String],
        ) -> Result<Vec<Tag>, RepoError> {
            let mut attached = Vec::new();
            {
                let mut tags = self.store.tags.lock().unwrap();
                for name in names {
                    if attached.iter().any(|t: &Tag| t.name == *name) {
                        continue;
                    }
                    let tag = match tags.iter().find(|t| t.name == *name) {
                        Some(tag) => tag.clone(),
                        None => {
                            let tag = Tag::new(name.clone());
                            tags.push(tag.clone());
                            tag
                        }
                    };
                    attached.push(tag);
                }
            }
            let mut links = self.store.post_tags.lock().unwrap();
            links.retain(|(p, _)| *p != post_id);
            for tag in &attached {
                links.push((post_id, tag.id));
            }
            Ok(attached)
        }
    }

    fn mem_state() -> (AppState, MemRepo) {
        let repo = MemRepo::default();
        let state = AppState {
            users: Arc::new(repo.clone()),
            posts: Arc::new(repo.clone()),
            comments: Arc::new(repo.clone()),
            tags: Arc::new(repo.clone()),
        };
        (state, repo)
    }

    fn token_service() -> Arc<dyn TokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret: "handler-test-secret".to_string(),
            expiration_hours: 1,
            issuer: "handler-tests".to_string(),
        }))
    }

    fn bearer(
        tokens: &Arc<dyn TokenService>,
        user_id: Uuid,
        username: &str,
        superuser: bool,
    ) -> (header::HeaderName, String) {
        let token = tokens.generate_token(user_id, username, superuser).unwrap();
        (header::AUTHORIZATION, format!("Bearer {}", token))
    }

    fn sample_post(owner: Uuid, title: &str) -> Post {
        Post::new(
            owner,
            title.to_string(),
            "A description".to_string(),
            "Some body text".to_string(),
            false,
        )
    }

    macro_rules! test_app {
        ($state:expr, $tokens:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .app_data(web::Data::new(Arc::clone(&$tokens)))
                    .app_data(web::Data::new(
                        Arc::new(Argon2PasswordService::new()) as Arc<dyn PasswordService>
                    ))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_anonymous_comment_defaults_to_guest() {
        let (state, repo) = mem_state();
        let tokens = token_service();
        let post = sample_post(Uuid::new_v4(), "Launch Notes");
        repo.store.posts.lock().unwrap().push(post.clone());

        let app = test_app!(state, tokens);
        let req = test::TestRequest::post()
            .uri("/api/posts/launch-notes/comments")
            .set_json(json!({ "body": "First!" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/posts/launch-notes"
        );
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["guest_name"], "Guest");
        assert!(body["author_id"].is_null());

        let comments = repo.store.comments.lock().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].post_id, post.id);
        assert!(matches!(&comments[0].author, CommentAuthor::Guest(name) if name == "Guest"));
    }

    #[actix_web::test]
    async fn test_anonymous_comment_keeps_given_guest_name() {
        let (state, repo) = mem_state();
        let tokens = token_service();
        repo.store
            .posts
            .lock()
            .unwrap()
            .push(sample_post(Uuid::new_v4(), "Launch Notes"));

        let app = test_app!(state, tokens);
        let req = test::TestRequest::post()
            .uri("/api/posts/launch-notes/comments")
            .set_json(json!({ "body": "Well written", "guest_name": "Visitor" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["guest_name"], "Visitor");
        assert!(body["author_id"].is_null());
    }

    #[actix_web::test]
    async fn test_authenticated_comment_attributed_to_user() {
        let (state, repo) = mem_state();
        let tokens = token_service();
        let commenter = Uuid::new_v4();
        repo.store
            .posts
            .lock()
            .unwrap()
            .push(sample_post(Uuid::new_v4(), "Launch Notes"));

        let app = test_app!(state, tokens);
        // A guest_name sent alongside a valid token must be ignored.
        let req = test::TestRequest::post()
            .uri("/api/posts/launch-notes/comments")
            .insert_header(bearer(&tokens, commenter, "carol", false))
            .set_json(json!({ "body": "Good read", "guest_name": "Impostor" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["author_id"], commenter.to_string());
        assert!(body["guest_name"].is_null());

        let comments = repo.store.comments.lock().unwrap();
        assert!(matches!(&comments[0].author, CommentAuthor::User(id) if *id == commenter));
    }

    #[actix_web::test]
    async fn test_delete_comment_redirects_to_parent_post() {
        let (state, repo) = mem_state();
        let tokens = token_service();
        let author = Uuid::new_v4();
        let post = sample_post(Uuid::new_v4(), "Launch Notes");
        let comment = Comment::new(post.id, CommentAuthor::User(author), "Typo here".to_string());
        repo.store.posts.lock().unwrap().push(post);
        repo.store.comments.lock().unwrap().push(comment.clone());

        let app = test_app!(state, tokens);
        let req = test::TestRequest::delete()
            .uri(&format!("/api/comments/{}", comment.id))
            .insert_header(bearer(&tokens, author, "carol", false))
            .to_request();
        let resp = test::call_service(&app, req).await;

        // The redirect still points at the parent post even though the
        // comment row is gone by the time the response is built.
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/posts/launch-notes"
        );
        assert!(repo.store.comments.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_edit_comment_on_missing_parent_reports_post() {
        let (state, repo) = mem_state();
        let tokens = token_service();
        let author = Uuid::new_v4();
        // Dangling post_id: no such post in the store.
        let comment = Comment::new(
            Uuid::new_v4(),
            CommentAuthor::User(author),
            "Orphaned".to_string(),
        );
        repo.store.comments.lock().unwrap().push(comment.clone());

        let app = test_app!(state, tokens);
        let req = test::TestRequest::put()
            .uri(&format!("/api/comments/{}", comment.id))
            .insert_header(bearer(&tokens, author, "carol", false))
            .set_json(json!({ "body": "Edited" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains("post"));
        assert!(!detail.contains("comment"));
    }

    #[actix_web::test]
    async fn test_denied_post_delete_reads_like_missing_post() {
        let tokens = token_service();
        let stranger = Uuid::new_v4();

        // Someone else's post exists under this slug.
        let (state, repo) = mem_state();
        let post = sample_post(Uuid::new_v4(), "Launch Notes");
        repo.store.posts.lock().unwrap().push(post);
        let app = test_app!(state, tokens);
        let req = test::TestRequest::delete()
            .uri("/api/posts/launch-notes")
            .insert_header(bearer(&tokens, stranger, "mallory", false))
            .to_request();
        let denied = test::call_service(&app, req).await;
        assert_eq!(denied.status(), StatusCode::NOT_FOUND);
        assert_eq!(repo.store.posts.lock().unwrap().len(), 1);
        let denied_body = test::read_body(denied).await;

        // No post under this slug at all.
        let (state, _repo) = mem_state();
        let app = test_app!(state, tokens);
        let req = test::TestRequest::delete()
            .uri("/api/posts/launch-notes")
            .insert_header(bearer(&tokens, stranger, "mallory", false))
            .to_request();
        let missing = test::call_service(&app, req).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let missing_body = test::read_body(missing).await;

        // Byte-identical bodies: the response never confirms existence.
        assert_eq!(denied_body, missing_body);
        let body: serde_json::Value = serde_json::from_slice(&denied_body).unwrap();
        assert!(!body["detail"].as_str().unwrap().contains("id"));
    }

    #[actix_web::test]
    async fn test_superuser_can_delete_another_users_post() {
        let (state, repo) = mem_state();
        let tokens = token_service();
        let post = sample_post(Uuid::new_v4(), "Launch Notes");
        repo.store.posts.lock().unwrap().push(post);

        let app = test_app!(state, tokens);
        let req = test::TestRequest::delete()
            .uri("/api/posts/launch-notes")
            .insert_header(bearer(&tokens, Uuid::new_v4(), "admin", true))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert!(repo.store.posts.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_create_post_requires_authentication() {
        let (state, repo) = mem_state();
        let tokens = token_service();

        let app = test_app!(state, tokens);
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "Anonymous Post", "description": "", "body": "text" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(repo.store.posts.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_list_far_out_of_range_page_is_empty() {
        let (state, repo) = mem_state();
        let tokens = token_service();
        repo.store
            .posts
            .lock()
            .unwrap()
            .push(sample_post(Uuid::new_v4(), "Launch Notes"));

        let app = test_app!(state, tokens);
        let req = test::TestRequest::get()
            .uri(&format!("/api/posts?page={}", usize::MAX))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["posts"].as_array().unwrap().is_empty());
        assert_eq!(body["total_pages"], 1);
    }
}
