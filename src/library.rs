//! Library facade
//!
//! Owns all in-memory state and exposes the surface the CLI drives. One
//! command runs to completion before the next; no state escapes this struct.

use uuid::Uuid;

use crate::{
    config::LendingConfig,
    error::{AppError, AppResult},
    models::{Book, LendingTicket, Patron},
    repository::Repository,
    services::{LendingCoordinator, PaymentAuthorizer},
};

pub struct Library {
    repository: Repository,
    lending: LendingCoordinator,
}

impl Library {
    /// Build the library around the chosen payment rail and lending policy
    pub fn new(authorizer: Box<dyn PaymentAuthorizer>, lending: &LendingConfig) -> Self {
        Self {
            repository: Repository::new(),
            lending: LendingCoordinator::new(authorizer, lending.period_days, lending.issue_fee),
        }
    }

    // --- Catalog operations ---

    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        isbn: &str,
        pub_year: i32,
        quantity: i64,
    ) -> AppResult<()> {
        self.repository
            .books
            .add_book(Book::new(title, author, isbn, pub_year), quantity)
    }

    pub fn search_by_title(&self, title: &str) -> Vec<&Book> {
        self.repository.books.all_by_title(title)
    }

    pub fn search_by_author(&self, author: &str) -> Vec<&Book> {
        self.repository.books.all_by_author(author)
    }

    pub fn search_by_year(&self, year: i32) -> Vec<&Book> {
        self.repository.books.all_by_year(year)
    }

    pub fn search_by_isbn(&self, isbn: &str) -> AppResult<&Book> {
        self.repository
            .books
            .get_by_isbn(isbn)
            .ok_or_else(|| AppError::BookNotFound(isbn.to_string()))
    }

    pub fn list_all(&self) -> Vec<&Book> {
        self.repository.books.list_all()
    }

    pub fn available_copies(&self, isbn: &str) -> u32 {
        self.repository.books.available_copies(isbn)
    }

    // --- Patron operations ---

    pub fn register_patron(&mut self, name: &str, email: &str) -> Uuid {
        self.repository.patrons.register(name, email).id
    }

    pub fn find_patron(&self, id: Uuid) -> Option<&Patron> {
        self.repository.patrons.get_by_id(id)
    }

    // --- Lending operations ---

    /// Issue a book to a patron, charging the flat fee first
    pub fn issue_book(&mut self, isbn: &str, patron_id: Uuid) -> AppResult<LendingTicket> {
        if self.repository.patrons.get_by_id(patron_id).is_none() {
            return Err(AppError::PatronNotFound(patron_id));
        }
        let book = self
            .repository
            .books
            .get_by_isbn(isbn)
            .ok_or_else(|| AppError::BookNotFound(isbn.to_string()))?
            .clone();

        self.lending.issue(
            &mut self.repository.books,
            &mut self.repository.patrons,
            &book,
            patron_id,
        )
    }

    /// Return a book; the discarded ticket is handed back so the caller can
    /// surface an overdue notice
    pub fn return_book(&mut self, isbn: &str, patron_id: Uuid) -> AppResult<LendingTicket> {
        if self.repository.patrons.get_by_id(patron_id).is_none() {
            return Err(AppError::PatronNotFound(patron_id));
        }
        if self.repository.books.get_by_isbn(isbn).is_none() {
            return Err(AppError::BookNotFound(isbn.to_string()));
        }

        self.lending.return_book(
            &mut self.repository.books,
            &mut self.repository.patrons,
            isbn,
            patron_id,
        )
    }

    /// Books currently out with the patron; empty for an unknown id
    pub fn borrowed_books_of(&self, patron_id: Uuid) -> Vec<Book> {
        self.lending
            .borrowed_books_of(&self.repository.patrons, patron_id)
    }
}
