//! Domain data types

pub mod category;
pub mod comment;
pub mod edge;
pub mod post;
pub mod user;

pub use category::PostCategory;
pub use comment::{comment_is_valid, Comment};
pub use edge::{Bookmark, Follow};
pub use post::{content_is_valid, characters_remaining, Post, PostType, PostsPage, SortOrder};
pub use user::{AuthProvider, User, UserProfile};
