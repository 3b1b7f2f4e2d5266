//! Book model and related types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// ISBN-10 (last character may be X) or ISBN-13, hyphens stripped
static ISBN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{9}[\dX]|\d{13})$").expect("valid ISBN regex"));

/// Book record (a title, not a physical copy)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    /// Brief description of the book
    pub summary: String,
    /// 10 or 13 character ISBN
    pub isbn: String,
    #[serde(rename = "author")]
    pub author_id: Option<i32>,
    #[serde(rename = "language")]
    pub language_id: Option<i32>,
    /// Genre ids
    #[serde(rename = "genre")]
    pub genre_ids: Vec<i32>,
}

/// Book payload (every field of the record except the id)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookIn {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 1000, message = "Summary must be 1-1000 characters"))]
    pub summary: String,
    pub isbn: String,
    #[serde(default, rename = "author")]
    pub author_id: Option<i32>,
    #[serde(default, rename = "language")]
    pub language_id: Option<i32>,
    #[serde(default, rename = "genre")]
    pub genre_ids: Vec<i32>,
}

impl BookIn {
    /// Validate field lengths and the ISBN format, normalising the ISBN in place
    pub fn check(&mut self) -> AppResult<()> {
        self.validate()?;
        self.isbn = normalize_isbn(&self.isbn)?;
        self.genre_ids.sort_unstable();
        self.genre_ids.dedup();
        Ok(())
    }
}

/// Strip hyphens and spaces, upper-case a trailing x, then check the shape
pub fn normalize_isbn(raw: &str) -> AppResult<String> {
    let isbn: String = raw
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if ISBN_RE.is_match(&isbn) {
        Ok(isbn)
    } else {
        Err(AppError::Validation(format!(
            "isbn: '{}' is not a 10 or 13 character ISBN",
            raw
        )))
    }
}
