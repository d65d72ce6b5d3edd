//! Data models for Shelfkeeper

pub mod book;
pub mod bookshelf;
pub mod category;
pub mod series;
pub mod user;
pub mod volume;

// Re-export commonly used types
pub use book::{Book, BookDetailResponse, BookResponse};
pub use bookshelf::Bookshelf;
pub use category::Category;
pub use series::Series;
pub use user::{User, UserInfo};
pub use volume::{BookMetadata, VolumeInfo};
