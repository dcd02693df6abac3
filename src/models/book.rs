//! Book (catalog entry) model

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A catalog entry identified by its ISBN.
///
/// Every record also carries a generated unique id, but equality and hashing
/// go by ISBN only: two submissions with the same ISBN describe the same
/// edition regardless of who typed them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub pub_year: i32,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        pub_year: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            pub_year,
        }
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn.hash(state);
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' by {} (ISBN {}, {})",
            self.title, self.author, self.isbn, self.pub_year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_goes_by_isbn_only() {
        let a = Book::new("1984", "George Orwell", "9780451524935", 1949);
        let b = Book::new("Nineteen Eighty-Four", "G. Orwell", "9780451524935", 1950);
        assert_eq!(a, b);
        assert_ne!(a.id, b.id);
    }
}
