//! In-memory data stores
//!
//! All state lives for the process lifetime only. Each store owns its
//! collections exclusively; counters are mutated through the defined methods
//! and never directly by callers.

pub mod books;
pub mod patrons;

pub use books::BookCatalog;
pub use patrons::PatronRegistry;

/// Container for all stores
#[derive(Debug, Default)]
pub struct Repository {
    pub books: BookCatalog,
    pub patrons: PatronRegistry,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }
}
