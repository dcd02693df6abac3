//! Demo data loaded at startup

use serde::Deserialize;

use crate::{error::AppResult, library::Library};

#[derive(Debug, Deserialize)]
struct SeedBook {
    title: String,
    author: String,
    isbn: String,
    pub_year: i32,
    quantity: i64,
}

#[derive(Debug, Deserialize)]
struct SeedPatron {
    name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct SeedData {
    books: Vec<SeedBook>,
    patrons: Vec<SeedPatron>,
}

const SEED_JSON: &str = r#"
{
  "books": [
    { "title": "The Great Gatsby", "author": "F. Scott Fitzgerald", "isbn": "9780743273565", "pub_year": 1925, "quantity": 3 },
    { "title": "To Kill a Mockingbird", "author": "Harper Lee", "isbn": "9780061120084", "pub_year": 1960, "quantity": 5 },
    { "title": "1984", "author": "George Orwell", "isbn": "9780451524935", "pub_year": 1949, "quantity": 2 },
    { "title": "Pride and Prejudice", "author": "Jane Austen", "isbn": "9780141439518", "pub_year": 1813, "quantity": 4 }
  ],
  "patrons": [
    { "name": "Alice Smith", "email": "alice@example.com" },
    { "name": "Bob Johnson", "email": "bob@example.com" }
  ]
}
"#;

/// Populate the library with the embedded demo inventory and patrons
pub fn seed(library: &mut Library) -> AppResult<()> {
    let data: SeedData = serde_json::from_str(SEED_JSON)
        .expect("embedded seed data is well-formed");

    for book in &data.books {
        library.add_book(&book.title, &book.author, &book.isbn, book.pub_year, book.quantity)?;
    }
    for patron in &data.patrons {
        let id = library.register_patron(&patron.name, &patron.email);
        tracing::info!(patron_id = %id, "seeded patron '{}'", patron.name);
    }

    tracing::info!(
        books = data.books.len(),
        patrons = data.patrons.len(),
        "demo data seeded"
    );
    Ok(())
}
