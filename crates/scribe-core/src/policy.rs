//! Authorization and visibility rules.
//!
//! The two pieces of real business logic in the platform: the
//! ownership-or-superuser guard protecting mutations, and the draft-visibility
//! filter applied to post listings.

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;

/// The authenticated requester, as seen by policy checks.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub superuser: bool,
}

/// Guard a fetch-then-mutate operation: the actor must own the record or be a
/// superuser.
///
/// Failures surface as `NotFound` rather than a forbidden error, so the
/// existence of records the actor cannot touch is never confirmed. Records
/// with no owner (guest comments) can only be mutated by a superuser.
pub fn authorize_owner(
    entity_type: &'static str,
    id: Uuid,
    owner: Option<Uuid>,
    actor: &Actor,
) -> Result<(), DomainError> {
    if actor.superuser || owner == Some(actor.user_id) {
        return Ok(());
    }
    Err(DomainError::NotFound { entity_type, id })
}

/// Filter draft posts out of a listing.
///
/// A post survives the filter iff it is not a draft, or the viewer is its
/// owner. Anonymous viewers never see drafts; superusers get no exemption.
pub fn visible_posts(posts: Vec<Post>, viewer: Option<&Actor>) -> Vec<Post> {
    posts
        .into_iter()
        .filter(|post| !post.draft || viewer.is_some_and(|v| v.user_id == post.user_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(user_id: Uuid, draft: bool) -> Post {
        Post::new(
            user_id,
            "Title".to_string(),
            "desc".to_string(),
            "body".to_string(),
            draft,
        )
    }

    fn actor(user_id: Uuid) -> Actor {
        Actor {
            user_id,
            superuser: false,
        }
    }

    #[test]
    fn test_published_posts_visible_to_everyone() {
        let owner = Uuid::new_v4();
        let posts = vec![post(owner, false)];

        assert_eq!(visible_posts(posts.clone(), None).len(), 1);
        assert_eq!(
            visible_posts(posts, Some(&actor(Uuid::new_v4()))).len(),
            1
        );
    }

    #[test]
    fn test_draft_hidden_from_anonymous() {
        let posts = vec![post(Uuid::new_v4(), true)];
        assert!(visible_posts(posts, None).is_empty());
    }

    #[test]
    fn test_draft_visible_only_to_owner() {
        let owner = Uuid::new_v4();
        let posts = vec![post(owner, true)];

        assert_eq!(visible_posts(posts.clone(), Some(&actor(owner))).len(), 1);
        assert!(visible_posts(posts, Some(&actor(Uuid::new_v4()))).is_empty());
    }

    #[test]
    fn test_draft_hidden_from_superuser_listing() {
        let su = Actor {
            user_id: Uuid::new_v4(),
            superuser: true,
        };
        let posts = vec![post(Uuid::new_v4(), true)];

        assert!(visible_posts(posts, Some(&su)).is_empty());
    }

    #[test]
    fn test_authorize_owner_accepts_owner() {
        let owner = Uuid::new_v4();
        let result = authorize_owner("post", Uuid::new_v4(), Some(owner), &actor(owner));
        assert!(result.is_ok());
    }

    #[test]
    fn test_authorize_owner_accepts_superuser() {
        let su = Actor {
            user_id: Uuid::new_v4(),
            superuser: true,
        };
        let result = authorize_owner("post", Uuid::new_v4(), Some(Uuid::new_v4()), &su);
        assert!(result.is_ok());
    }

    #[test]
    fn test_authorize_owner_rejects_stranger_as_not_found() {
        let id = Uuid::new_v4();
        let result = authorize_owner("post", id, Some(Uuid::new_v4()), &actor(Uuid::new_v4()));

        match result {
            Err(DomainError::NotFound { entity_type, id: got }) => {
                assert_eq!(entity_type, "post");
                assert_eq!(got, id);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_authorize_guest_comment_requires_superuser() {
        let id = Uuid::new_v4();
        assert!(authorize_owner("comment", id, None, &actor(Uuid::new_v4())).is_err());

        let su = Actor {
            user_id: Uuid::new_v4(),
            superuser: true,
        };
        assert!(authorize_owner("comment", id, None, &su).is_ok());
    }
}
