//! Domain entities - the core business objects.

mod comment;
mod post;
mod tag;
mod user;

pub use comment::{Comment, CommentAuthor};
pub use post::Post;
pub use tag::{Tag, sort_tags};
pub use user::User;
