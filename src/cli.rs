//! Interactive command-line menu
//!
//! Thin driver over the [`Library`](crate::library::Library) facade: reads
//! one command, runs it to completion, prints the outcome and prompts again.
//! Core errors are reported and never terminate the loop.

use std::io::{BufRead, Write};

use uuid::Uuid;
use validator::Validate;

use crate::{library::Library, models::Book};

/// Patron-registration input, validated at the boundary so the registry
/// itself stays infallible
#[derive(Debug, Validate)]
pub struct RegisterPatronInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "not a valid email address"))]
    pub email: String,
}

pub struct Cli<R, W> {
    library: Library,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Cli<R, W> {
    pub fn new(library: Library, input: R, output: W) -> Self {
        Self {
            library,
            input,
            output,
        }
    }

    /// Main menu loop; returns when the user picks Exit or stdin closes
    pub fn run(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "Welcome to the Athenaeum library manager!")?;
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            match line.trim().parse::<u32>() {
                Ok(0) => break,
                Ok(choice) => self.handle_choice(choice)?,
                Err(_) => writeln!(self.output, "Please enter a number from the menu.")?,
            }
        }
        writeln!(self.output, "Thank you for visiting. Goodbye!")?;
        Ok(())
    }

    fn print_menu(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "\n--- Library Menu ---")?;
        writeln!(self.output, "1. Add a new book to the inventory")?;
        writeln!(self.output, "2. Register a new patron")?;
        writeln!(self.output, "3. Issue a book to a patron")?;
        writeln!(self.output, "4. Return a book from a patron")?;
        writeln!(self.output, "5. Search for a book by title")?;
        writeln!(self.output, "6. List all books")?;
        writeln!(self.output, "7. List books borrowed by a patron")?;
        writeln!(self.output, "0. Exit")?;
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()
    }

    fn handle_choice(&mut self, choice: u32) -> std::io::Result<()> {
        match choice {
            1 => self.handle_add_book(),
            2 => self.handle_register_patron(),
            3 => self.handle_issue_book(),
            4 => self.handle_return_book(),
            5 => self.handle_search_by_title(),
            6 => self.handle_list_all(),
            7 => self.handle_borrowed_books(),
            _ => writeln!(self.output, "Invalid choice. Please try again."),
        }
    }

    fn handle_add_book(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "\n--- Add New Book ---")?;
        let Some(title) = self.prompt("Enter title: ")? else { return Ok(()) };
        let Some(author) = self.prompt("Enter author: ")? else { return Ok(()) };
        let Some(isbn) = self.prompt("Enter ISBN: ")? else { return Ok(()) };
        let Some(year) = self.prompt_parsed::<i32>("Enter publication year: ")? else {
            return Ok(());
        };
        let Some(quantity) = self.prompt_parsed::<i64>("Enter quantity to add: ")? else {
            return Ok(());
        };

        match self.library.add_book(&title, &author, &isbn, year, quantity) {
            Ok(()) => writeln!(
                self.output,
                "{quantity} copies of '{title}' added to the inventory."
            ),
            Err(e) => self.report(&e),
        }
    }

    fn handle_register_patron(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "\n--- Register New Patron ---")?;
        let Some(name) = self.prompt("Enter patron name: ")? else { return Ok(()) };
        let Some(email) = self.prompt("Enter patron email: ")? else { return Ok(()) };

        let input = RegisterPatronInput { name, email };
        if let Err(errors) = input.validate() {
            return self.report(&errors.into());
        }

        let id = self.library.register_patron(&input.name, &input.email);
        writeln!(self.output, "Patron registered with ID: {id}")
    }

    fn handle_issue_book(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "\n--- Issue Book ---")?;
        let Some(patron_id) = self.prompt_parsed::<Uuid>("Enter patron ID: ")? else {
            return Ok(());
        };
        let Some(isbn) = self.prompt("Enter book ISBN to issue: ")? else { return Ok(()) };

        match self.library.issue_book(&isbn, patron_id) {
            Ok(ticket) => writeln!(
                self.output,
                "Issued '{}' (ticket {}), due back on {}.",
                ticket.book.title, ticket.id, ticket.due_date
            ),
            Err(e) => self.report(&e),
        }
    }

    fn handle_return_book(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "\n--- Return Book ---")?;
        let Some(patron_id) = self.prompt_parsed::<Uuid>("Enter patron ID: ")? else {
            return Ok(());
        };
        let Some(isbn) = self.prompt("Enter book ISBN to return: ")? else { return Ok(()) };

        match self.library.return_book(&isbn, patron_id) {
            Ok(ticket) => {
                writeln!(self.output, "'{}' returned, thank you.", ticket.book.title)?;
                if ticket.is_overdue(chrono::Utc::now().date_naive()) {
                    writeln!(
                        self.output,
                        "Note: this book was due on {} and came back late. Fines may apply.",
                        ticket.due_date
                    )?;
                }
                Ok(())
            }
            Err(e) => self.report(&e),
        }
    }

    fn handle_search_by_title(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "\n--- Search for Book by Title ---")?;
        let Some(title) = self.prompt("Enter the title to search for: ")? else {
            return Ok(());
        };

        let found: Vec<Book> = self
            .library
            .search_by_title(&title)
            .into_iter()
            .cloned()
            .collect();
        if found.is_empty() {
            writeln!(self.output, "No books found with that title.")
        } else {
            writeln!(self.output, "Found books:")?;
            self.print_books(&found)
        }
    }

    fn handle_list_all(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "\n--- All Books in Inventory ---")?;
        let all: Vec<Book> = self.library.list_all().into_iter().cloned().collect();
        if all.is_empty() {
            writeln!(self.output, "The library has no books.")
        } else {
            self.print_books(&all)
        }
    }

    fn handle_borrowed_books(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "\n--- Books Borrowed by Patron ---")?;
        let Some(patron_id) = self.prompt_parsed::<Uuid>("Enter patron ID: ")? else {
            return Ok(());
        };
        let Some(patron) = self.library.find_patron(patron_id).cloned() else {
            return writeln!(self.output, "Patron not found.");
        };

        let borrowed = self.library.borrowed_books_of(patron_id);
        if borrowed.is_empty() {
            writeln!(self.output, "{} has not borrowed any books.", patron.name)
        } else {
            writeln!(self.output, "Books out with {}:", patron.name)?;
            self.print_books(&borrowed)
        }
    }

    fn print_books(&mut self, books: &[Book]) -> std::io::Result<()> {
        for book in books {
            let available = self.library.available_copies(&book.isbn);
            writeln!(self.output, " - {book}, available copies: {available}")?;
        }
        Ok(())
    }

    fn report(&mut self, error: &crate::error::AppError) -> std::io::Result<()> {
        writeln!(self.output, "Error: {error}")
    }

    fn prompt(&mut self, label: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        Ok(self.read_line()?.map(|l| l.trim().to_string()))
    }

    /// Prompt and parse, reprompting until the input parses or stdin closes
    fn prompt_parsed<T: std::str::FromStr>(&mut self, label: &str) -> std::io::Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(label)? else {
                return Ok(None);
            };
            match line.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Invalid input, please try again.")?,
            }
        }
    }

    /// None on end of input
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }
}

/// Run the menu over the process stdin/stdout
pub fn run(library: Library) -> std::io::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Cli::new(library, stdin.lock(), stdout.lock()).run()
}
