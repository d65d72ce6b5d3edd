//! Book model, wire representations and display ordering

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::volume::{BookMetadata, VolumeInfo};

/// Book row joined with the names of its bookshelf, category and series
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: i32,
    pub isbn: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub small_thumbnail_url: Option<String>,
    pub large_thumbnail_url: Option<String>,
    pub details: Option<String>,
    pub volume_number: Option<i32>,
    pub user_id: i32,
    pub bookshelf_id: i32,
    pub category_id: Option<i32>,
    pub series_id: Option<i32>,
    pub bookshelf_name: Option<String>,
    pub category_name: Option<String>,
    pub series_title: Option<String>,
}

/// Display ordering key:
/// (category name, author, has series, series title, volume number, title).
///
/// Books without a category come first, standalone books come before
/// books belonging to a series of the same author.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SortKey(
    pub String,
    pub String,
    pub u8,
    pub String,
    pub i32,
    pub String,
);

impl Book {
    pub fn sort_key(&self) -> SortKey {
        SortKey(
            self.category_name.clone().unwrap_or_default(),
            self.author.clone(),
            u8::from(self.series_id.is_some()),
            self.series_title.clone().unwrap_or_default(),
            self.volume_number.unwrap_or(0),
            self.title.clone(),
        )
    }
}

/// Sort books for display; ties fall back to creation order
pub fn sort_books(books: &mut [Book]) {
    books.sort_by_cached_key(|b| (b.sort_key(), b.id));
}

/// Book as rendered in list views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookResponse {
    pub id: i32,
    pub isbn: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub small_thumbnail_url: Option<String>,
    pub large_thumbnail_url: Option<String>,
    pub details: Option<String>,
    pub bookshelf: i32,
    pub bookshelf_name: Option<String>,
    pub category: Option<i32>,
    pub category_name: Option<String>,
    pub series: Option<i32>,
    pub series_title: Option<String>,
    pub volume_number: Option<i32>,
    pub user: i32,
    #[schema(value_type = Vec<Object>)]
    pub sort_key: SortKey,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        let sort_key = book.sort_key();
        Self {
            id: book.id,
            isbn: book.isbn,
            title: book.title,
            subtitle: book.subtitle,
            author: book.author,
            small_thumbnail_url: book.small_thumbnail_url,
            large_thumbnail_url: book.large_thumbnail_url,
            details: book.details,
            bookshelf: book.bookshelf_id,
            bookshelf_name: book.bookshelf_name,
            category: book.category_id,
            category_name: book.category_name,
            series: book.series_id,
            series_title: book.series_title,
            volume_number: book.volume_number,
            user: book.user_id,
            sort_key,
        }
    }
}

/// Single book view, with bibliographic data fetched live
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetailResponse {
    #[serde(flatten)]
    pub book: BookResponse,
    /// Raw `volumeInfo` document, `null` when the lookup yields nothing
    #[schema(value_type = Option<Object>)]
    pub google_data: Option<VolumeInfo>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 13, message = "ISBN must be 1 to 13 characters"))]
    pub isbn: String,
    /// Bookshelf ID (required)
    pub bookshelf: Option<i32>,
    pub category: Option<i32>,
    pub series: Option<i32>,
    #[validate(range(min = 1, message = "Volume number must be positive"))]
    pub volume_number: Option<i32>,
}

/// Update book request. Relations and volume number are replaced as sent;
/// omitted title/subtitle/author keep their stored values.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 13, message = "ISBN must be 1 to 13 characters"))]
    pub isbn: String,
    pub bookshelf: Option<i32>,
    pub category: Option<i32>,
    pub series: Option<i32>,
    #[validate(range(min = 1, message = "Volume number must be positive"))]
    pub volume_number: Option<i32>,
    #[validate(length(min = 1, max = 500, message = "Title must be 1 to 500 characters"))]
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Author must be 1 to 255 characters"))]
    pub author: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl CreateBook {
    pub fn normalized(mut self) -> Self {
        self.isbn = normalize_isbn(&self.isbn);
        self
    }
}

impl UpdateBook {
    /// Normalize the ISBN; blank overrides count as not sent
    pub fn normalized(mut self) -> Self {
        self.isbn = normalize_isbn(&self.isbn);
        self.title = trimmed(self.title);
        self.subtitle = trimmed(self.subtitle);
        self.author = trimmed(self.author);
        self
    }
}

/// Book list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Only books on this bookshelf
    pub bookshelf: Option<i32>,
}

/// ISBN search query
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct IsbnQuery {
    #[serde(default)]
    pub isbn: String,
}

/// Strip the separators people usually type into an ISBN
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Fully resolved values for a book insert or update
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub user_id: i32,
    pub isbn: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub small_thumbnail_url: Option<String>,
    pub large_thumbnail_url: Option<String>,
    pub details: Option<String>,
    pub volume_number: Option<i32>,
    pub bookshelf_id: i32,
    pub category_id: Option<i32>,
    pub series_id: Option<i32>,
}

impl BookRecord {
    pub fn new(
        user_id: i32,
        isbn: String,
        bookshelf_id: i32,
        category_id: Option<i32>,
        series_id: Option<i32>,
        volume_number: Option<i32>,
        metadata: BookMetadata,
    ) -> Self {
        Self {
            user_id,
            isbn,
            title: metadata.title,
            subtitle: metadata.subtitle,
            author: metadata.author,
            small_thumbnail_url: metadata.small_thumbnail_url,
            large_thumbnail_url: metadata.large_thumbnail_url,
            details: metadata.details,
            volume_number,
            bookshelf_id,
            category_id,
            series_id,
        }
    }
}
