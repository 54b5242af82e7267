//! Domain types for users and comics.

pub mod comic;
pub mod user;

pub use comic::{Comic, ComicMetadata, ComicRecord};
pub use user::User;
