//! Book catalog and per-ISBN shelf counters

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

/// Per-ISBN split of copies between on-shelf and checked-out.
///
/// Invariant: `available + borrowed` equals the total number of copies ever
/// added for the ISBN. No operation removes copies from the inventory.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BookCount {
    pub available: u32,
    pub borrowed: u32,
}

#[derive(Debug, Clone)]
struct ShelfEntry {
    book: Book,
    count: BookCount,
}

/// Inventory of all books in the library, keyed by ISBN.
///
/// Insertion order of first registration is preserved; every search returns
/// its matches in that order.
#[derive(Debug, Default)]
pub struct BookCatalog {
    shelves: IndexMap<String, ShelfEntry>,
}

impl BookCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add copies of a book, registering the record on first sight.
    ///
    /// A re-submission of a known ISBN keeps the stored record untouched
    /// (first registration wins) but still accrues the quantity. Quantities
    /// that are non-positive or would push the counter past its capacity are
    /// rejected without touching the shelf.
    pub fn add_book(&mut self, book: Book, quantity: i64) -> AppResult<()> {
        if quantity <= 0 {
            return Err(AppError::InvalidQuantity(quantity));
        }
        let copies = u32::try_from(quantity).map_err(|_| AppError::InvalidQuantity(quantity))?;

        if let Some(entry) = self.shelves.get(&book.isbn) {
            // Total copies must stay within counter capacity so that returns
            // can always move a copy back to the shelf
            let total =
                u64::from(entry.count.available) + u64::from(entry.count.borrowed) + u64::from(copies);
            if total > u64::from(u32::MAX) {
                return Err(AppError::InvalidQuantity(quantity));
            }
        }

        let entry = self
            .shelves
            .entry(book.isbn.clone())
            .or_insert_with(|| ShelfEntry {
                book,
                count: BookCount::default(),
            });
        entry.count.available += copies;

        tracing::debug!(
            isbn = %entry.book.isbn,
            available = entry.count.available,
            "added {} copies of '{}'",
            quantity,
            entry.book.title
        );
        Ok(())
    }

    /// True when at least one copy is on the shelf
    pub fn is_available(&self, isbn: &str) -> bool {
        self.available_copies(isbn) > 0
    }

    /// Move one copy from available to borrowed.
    ///
    /// Callers are expected to check `is_available` first; the guard here
    /// keeps the counters from going negative if they do not.
    pub fn mark_borrowed(&mut self, isbn: &str) -> AppResult<()> {
        let entry = self
            .shelves
            .get_mut(isbn)
            .filter(|e| e.count.available > 0)
            .ok_or_else(|| AppError::NotAvailable(isbn.to_string()))?;
        entry.count.available -= 1;
        entry.count.borrowed += 1;
        Ok(())
    }

    /// Move one copy from borrowed back to available
    pub fn mark_returned(&mut self, isbn: &str) -> AppResult<()> {
        let entry = self
            .shelves
            .get_mut(isbn)
            .filter(|e| e.count.borrowed > 0)
            .ok_or_else(|| AppError::NoBorrowedCopies(isbn.to_string()))?;
        entry.count.available += 1;
        entry.count.borrowed -= 1;
        Ok(())
    }

    pub fn get_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.shelves.get(isbn).map(|e| &e.book)
    }

    /// All books whose title matches, ignoring case
    pub fn all_by_title(&self, title: &str) -> Vec<&Book> {
        let needle = title.to_lowercase();
        self.shelves
            .values()
            .map(|e| &e.book)
            .filter(|b| b.title.to_lowercase() == needle)
            .collect()
    }

    /// All books whose author matches, ignoring case
    pub fn all_by_author(&self, author: &str) -> Vec<&Book> {
        let needle = author.to_lowercase();
        self.shelves
            .values()
            .map(|e| &e.book)
            .filter(|b| b.author.to_lowercase() == needle)
            .collect()
    }

    /// All books published in the given year
    pub fn all_by_year(&self, year: i32) -> Vec<&Book> {
        self.shelves
            .values()
            .map(|e| &e.book)
            .filter(|b| b.pub_year == year)
            .collect()
    }

    /// Full catalog snapshot, insertion order
    pub fn list_all(&self) -> Vec<&Book> {
        self.shelves.values().map(|e| &e.book).collect()
    }

    pub fn available_copies(&self, isbn: &str) -> u32 {
        self.shelves.get(isbn).map_or(0, |e| e.count.available)
    }

    pub fn borrowed_copies(&self, isbn: &str) -> u32 {
        self.shelves.get(isbn).map_or(0, |e| e.count.borrowed)
    }
}
