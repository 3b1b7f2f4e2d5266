//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod language;
pub mod user;

// Re-export commonly used types
pub use author::{Author, AuthorIn};
pub use book::{Book, BookIn};
pub use book_instance::{BookInstance, BookInstanceIn, LoanStatus, LoanedCopy};
pub use genre::{Genre, GenreIn};
pub use language::{Language, LanguageIn};
pub use user::{User, UserClaims};
