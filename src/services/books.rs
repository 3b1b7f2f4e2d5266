//! Book service

use crate::{
    error::AppResult,
    models::{
        author::Author,
        book::{Book, BookIn},
        book_instance::BookInstance,
        genre::Genre,
        language::Language,
    },
    repository::Repository,
};

/// Book with its related records resolved, for the detail page
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub language: Option<Language>,
    pub genres: Vec<Genre>,
    pub copies: Vec<BookInstance>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books_list().await
    }

    /// One page of books and the total count
    pub async fn list_page(&self, limit: i64, offset: i64) -> AppResult<(Vec<Book>, i64)> {
        let books = self.repository.books_list_page(limit, offset).await?;
        let total = self.repository.books_count().await?;
        Ok((books, total))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books_get_by_id(id).await
    }

    pub async fn get_detail(&self, id: i32) -> AppResult<BookDetail> {
        let book = self.repository.books_get_by_id(id).await?;

        let author = match book.author_id {
            Some(author_id) => Some(self.repository.authors_get_by_id(author_id).await?),
            None => None,
        };
        let language = match book.language_id {
            Some(language_id) => Some(self.repository.languages_get_by_id(language_id).await?),
            None => None,
        };
        let genres = self.repository.genres_list_by_ids(&book.genre_ids).await?;
        let copies = self.repository.instances_list_for_book(id).await?;

        Ok(BookDetail {
            book,
            author,
            language,
            genres,
            copies,
        })
    }

    pub async fn create(&self, mut data: BookIn) -> AppResult<Book> {
        data.check()?;
        let book = self.repository.books_create(&data).await?;
        tracing::info!("Created book id={} isbn={}", book.id, book.isbn);
        Ok(book)
    }

    pub async fn update(&self, id: i32, mut data: BookIn) -> AppResult<Book> {
        data.check()?;
        let book = self.repository.books_update(id, &data).await?;
        tracing::info!("Updated book id={}", id);
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books_delete(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }
}
