//! Lending coordination service
//!
//! The only component that touches the book catalog, the patron registry and
//! the payment authorizer together. Single-threaded by design: the
//! availability check and the inventory mutation in `issue` are not atomic,
//! which is fine while one command runs to completion at a time.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, LendingTicket, PaymentStatus},
    repository::{BookCatalog, PatronRegistry},
    services::payment::PaymentAuthorizer,
};

pub struct LendingCoordinator {
    authorizer: Box<dyn PaymentAuthorizer>,
    period_days: i64,
    issue_fee: Decimal,
}

impl LendingCoordinator {
    pub fn new(authorizer: Box<dyn PaymentAuthorizer>, period_days: i64, issue_fee: Decimal) -> Self {
        Self {
            authorizer,
            period_days,
            issue_fee,
        }
    }

    /// Issue one copy of `book` to the patron.
    ///
    /// Charges the flat issue fee through the configured rail before any
    /// inventory change: a declined payment leaves the counters and the
    /// patron's ticket list exactly as they were.
    pub fn issue(
        &self,
        catalog: &mut BookCatalog,
        patrons: &mut PatronRegistry,
        book: &Book,
        patron_id: Uuid,
    ) -> AppResult<LendingTicket> {
        if !catalog.is_available(&book.isbn) {
            return Err(AppError::BookUnavailable(book.isbn.clone()));
        }

        let issue_date = Utc::now().date_naive();
        let due_date = issue_date + Duration::days(self.period_days);
        let mut ticket = LendingTicket::new(
            book.clone(),
            patron_id,
            issue_date,
            due_date,
            self.issue_fee,
        );

        if !self.authorizer.charge(self.issue_fee) {
            ticket.payment_status = PaymentStatus::Failed;
            tracing::warn!(
                ticket_id = %ticket.id,
                "payment declined, no ticket issued for '{}'",
                book.title
            );
            return Err(AppError::PaymentDeclined(self.issue_fee));
        }

        ticket.payment_status = PaymentStatus::Paid;
        catalog.mark_borrowed(&book.isbn)?;
        tracing::info!(
            ticket_id = %ticket.id,
            patron_id = %patron_id,
            due_date = %due_date,
            "issued '{}'",
            book.title
        );
        patrons.add_ticket(ticket.clone());
        Ok(ticket)
    }

    /// Return one copy of the book identified by `isbn` from the patron.
    ///
    /// Takes the first active ticket in list order for that ISBN, restores
    /// the inventory counters and discards the ticket. The discarded ticket
    /// is handed back so callers can surface an overdue notice.
    pub fn return_book(
        &self,
        catalog: &mut BookCatalog,
        patrons: &mut PatronRegistry,
        isbn: &str,
        patron_id: Uuid,
    ) -> AppResult<LendingTicket> {
        if !patrons
            .active_tickets_of(patron_id)
            .iter()
            .any(|t| t.book.isbn == isbn)
        {
            return Err(AppError::NoActiveLoan {
                patron_id,
                isbn: isbn.to_string(),
            });
        }

        catalog.mark_returned(isbn)?;
        // The scan above guarantees a match
        let ticket = patrons
            .remove_ticket(patron_id, isbn)
            .ok_or_else(|| AppError::NoActiveLoan {
                patron_id,
                isbn: isbn.to_string(),
            })?;

        if ticket.is_overdue(Utc::now().date_naive()) {
            tracing::warn!(
                ticket_id = %ticket.id,
                due_date = %ticket.due_date,
                "'{}' returned late, fines may apply",
                ticket.book.title
            );
        }
        tracing::info!(ticket_id = %ticket.id, "returned '{}'", ticket.book.title);
        Ok(ticket)
    }

    /// Books currently out with the patron, in ticket order
    pub fn borrowed_books_of(&self, patrons: &PatronRegistry, patron_id: Uuid) -> Vec<Book> {
        patrons
            .active_tickets_of(patron_id)
            .iter()
            .map(|t| t.book.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::payment::MockPaymentAuthorizer;

    const ISBN: &str = "9780451524935";

    fn fixture(charge_outcome: bool) -> (LendingCoordinator, BookCatalog, PatronRegistry) {
        let mut authorizer = MockPaymentAuthorizer::new();
        authorizer.expect_charge().return_const(charge_outcome);

        let coordinator =
            LendingCoordinator::new(Box::new(authorizer), 14, Decimal::new(500, 2));
        let mut catalog = BookCatalog::new();
        catalog
            .add_book(Book::new("1984", "George Orwell", ISBN, 1949), 2)
            .unwrap();
        (coordinator, catalog, PatronRegistry::new())
    }

    #[test]
    fn issue_creates_a_paid_ticket_and_moves_one_copy() {
        let (coordinator, mut catalog, mut patrons) = fixture(true);
        let patron_id = patrons.register("Alice Smith", "alice@example.com").id;
        let book = catalog.get_by_isbn(ISBN).unwrap().clone();

        let ticket = coordinator
            .issue(&mut catalog, &mut patrons, &book, patron_id)
            .unwrap();

        assert_eq!(ticket.payment_status, PaymentStatus::Paid);
        assert_eq!(ticket.due_date - ticket.issue_date, Duration::days(14));
        assert_eq!(ticket.price, Decimal::new(500, 2));
        assert_eq!(catalog.available_copies(ISBN), 1);
        assert_eq!(catalog.borrowed_copies(ISBN), 1);
        assert_eq!(patrons.active_tickets_of(patron_id).len(), 1);
    }

    #[test]
    fn declined_payment_leaves_no_trace() {
        let (coordinator, mut catalog, mut patrons) = fixture(false);
        let patron_id = patrons.register("Alice Smith", "alice@example.com").id;
        let book = catalog.get_by_isbn(ISBN).unwrap().clone();

        let err = coordinator
            .issue(&mut catalog, &mut patrons, &book, patron_id)
            .unwrap_err();

        assert!(matches!(err, AppError::PaymentDeclined(_)));
        assert_eq!(catalog.available_copies(ISBN), 2);
        assert_eq!(catalog.borrowed_copies(ISBN), 0);
        assert!(patrons.active_tickets_of(patron_id).is_empty());
    }

    #[test]
    fn exhausted_inventory_fails_before_charging() {
        let mut authorizer = MockPaymentAuthorizer::new();
        authorizer.expect_charge().never();
        let coordinator =
            LendingCoordinator::new(Box::new(authorizer), 14, Decimal::new(500, 2));

        let mut catalog = BookCatalog::new();
        let mut patrons = PatronRegistry::new();
        let patron_id = patrons.register("Alice Smith", "alice@example.com").id;
        let book = Book::new("1984", "George Orwell", ISBN, 1949);

        let err = coordinator
            .issue(&mut catalog, &mut patrons, &book, patron_id)
            .unwrap_err();
        assert!(matches!(err, AppError::BookUnavailable(_)));
    }

    #[test]
    fn return_reverses_a_previous_issue() {
        let (coordinator, mut catalog, mut patrons) = fixture(true);
        let patron_id = patrons.register("Alice Smith", "alice@example.com").id;
        let book = catalog.get_by_isbn(ISBN).unwrap().clone();

        coordinator
            .issue(&mut catalog, &mut patrons, &book, patron_id)
            .unwrap();
        coordinator
            .return_book(&mut catalog, &mut patrons, ISBN, patron_id)
            .unwrap();

        assert_eq!(catalog.available_copies(ISBN), 2);
        assert_eq!(catalog.borrowed_copies(ISBN), 0);
        assert!(patrons.active_tickets_of(patron_id).is_empty());
    }

    #[test]
    fn return_without_an_active_loan_changes_nothing() {
        let (coordinator, mut catalog, mut patrons) = fixture(true);
        let patron_id = patrons.register("Alice Smith", "alice@example.com").id;

        let err = coordinator
            .return_book(&mut catalog, &mut patrons, ISBN, patron_id)
            .unwrap_err();

        assert!(matches!(err, AppError::NoActiveLoan { .. }));
        assert_eq!(catalog.available_copies(ISBN), 2);
        assert_eq!(catalog.borrowed_copies(ISBN), 0);
    }

    #[test]
    fn same_isbn_may_be_issued_twice_to_one_patron() {
        let (coordinator, mut catalog, mut patrons) = fixture(true);
        let patron_id = patrons.register("Alice Smith", "alice@example.com").id;
        let book = catalog.get_by_isbn(ISBN).unwrap().clone();

        coordinator
            .issue(&mut catalog, &mut patrons, &book, patron_id)
            .unwrap();
        coordinator
            .issue(&mut catalog, &mut patrons, &book, patron_id)
            .unwrap();

        assert_eq!(patrons.active_tickets_of(patron_id).len(), 2);
        assert_eq!(catalog.available_copies(ISBN), 0);
        assert_eq!(
            coordinator.borrowed_books_of(&patrons, patron_id).len(),
            2
        );
    }
}
