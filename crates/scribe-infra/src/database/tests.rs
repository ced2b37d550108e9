#[cfg(test)]
mod tests {
    use crate::database::entity::{comment, post};
    use crate::database::postgres_repo::{PostgresCommentRepository, PostgresPostRepository};
    use scribe_core::domain::{Comment, CommentAuthor, Post};
    use scribe_core::error::RepoError;
    use scribe_core::ports::{BaseRepository, CommentRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn post_model(slug: &str, draft: bool) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            slug: slug.to_owned(),
            title: "Test Post".to_owned(),
            description: "A post for testing".to_owned(),
            body: "Content".to_owned(),
            draft,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let model = post_model("test-post", false);
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
    }

    #[tokio::test]
    async fn test_find_post_by_slug() {
        let model = post_model("hello-world", true);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let post = repo.find_by_slug("hello-world").await.unwrap().unwrap();
        assert_eq!(post.slug, "hello-world");
        assert!(post.draft);
    }

    #[tokio::test]
    async fn test_find_post_by_unknown_slug_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.find_by_slug("no-such-post").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_comment_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let result: Result<(), _> =
            BaseRepository::<Comment, _>::delete(&repo, uuid::Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_comments_by_post_maps_authors() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let registered = comment::Model {
            id: uuid::Uuid::new_v4(),
            post_id,
            user_id: Some(author_id),
            guest_name: None,
            body: "from a user".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        };
        let guest = comment::Model {
            id: uuid::Uuid::new_v4(),
            post_id,
            user_id: None,
            guest_name: Some("Visitor".to_owned()),
            body: "from a guest".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![registered, guest]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let comments = repo.find_by_post(post_id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert!(matches!(comments[0].author, CommentAuthor::User(id) if id == author_id));
        assert!(matches!(&comments[1].author, CommentAuthor::Guest(name) if name == "Visitor"));
        assert_eq!(comments[0].author_user_id(), Some(author_id));
        assert_eq!(comments[1].author_user_id(), None);
    }
}
