//! Core identifier and URL types.

mod base_url;
mod book_id;

pub use base_url::BaseUrl;
pub use book_id::BookId;
