//! Patron registry and active-ticket bookkeeping

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{LendingTicket, Patron};

/// Registered patrons and, per patron, the ordered list of active lending
/// tickets.
///
/// Ticket lists are insertion-ordered and may hold two tickets for the same
/// ISBN if the same book was issued twice without a return in between.
/// Mutation of the lists is reserved to the lending coordinator.
#[derive(Debug, Default)]
pub struct PatronRegistry {
    patrons: HashMap<Uuid, Patron>,
    active_tickets: HashMap<Uuid, Vec<LendingTicket>>,
}

impl PatronRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new patron. Always succeeds; the generated id is returned
    /// through the stored record.
    pub fn register(&mut self, name: impl Into<String>, email: impl Into<String>) -> &Patron {
        let patron = Patron::new(name, email);
        let id = patron.id;
        self.active_tickets.insert(id, Vec::new());
        tracing::debug!(patron_id = %id, "registered patron '{}'", patron.name);
        self.patrons.entry(id).or_insert(patron)
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<&Patron> {
        self.patrons.get(&id)
    }

    pub fn update_name(&mut self, id: Uuid, name: impl Into<String>) -> bool {
        match self.patrons.get_mut(&id) {
            Some(patron) => {
                patron.set_name(name);
                true
            }
            None => false,
        }
    }

    pub fn update_email(&mut self, id: Uuid, email: impl Into<String>) -> bool {
        match self.patrons.get_mut(&id) {
            Some(patron) => {
                patron.set_email(email);
                true
            }
            None => false,
        }
    }

    /// Active tickets for a patron, issue order. Unknown ids yield an empty
    /// slice rather than an error.
    pub fn active_tickets_of(&self, id: Uuid) -> &[LendingTicket] {
        self.active_tickets.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Append a ticket to the patron's active list
    pub(crate) fn add_ticket(&mut self, ticket: LendingTicket) {
        self.active_tickets
            .entry(ticket.patron_id)
            .or_default()
            .push(ticket);
    }

    /// Remove and return the first active ticket of `patron_id` referencing
    /// `isbn`, in list order
    pub(crate) fn remove_ticket(&mut self, patron_id: Uuid, isbn: &str) -> Option<LendingTicket> {
        let tickets = self.active_tickets.get_mut(&patron_id)?;
        let pos = tickets.iter().position(|t| t.book.isbn == isbn)?;
        Some(tickets.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Book;
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;

    fn ticket(patron_id: Uuid, isbn: &str) -> LendingTicket {
        let issue = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        LendingTicket::new(
            Book::new("t", "a", isbn, 2000),
            patron_id,
            issue,
            issue + Duration::days(14),
            Decimal::new(500, 2),
        )
    }

    #[test]
    fn register_allocates_unique_ids() {
        let mut registry = PatronRegistry::new();
        let a = registry.register("Alice Smith", "alice@example.com").id;
        let b = registry.register("Bob Johnson", "bob@example.com").id;
        assert_ne!(a, b);
        assert!(registry.get_by_id(a).is_some());
        assert!(registry.active_tickets_of(a).is_empty());
    }

    #[test]
    fn unknown_patron_has_no_tickets() {
        let registry = PatronRegistry::new();
        assert!(registry.active_tickets_of(Uuid::new_v4()).is_empty());
    }

    #[test]
    fn remove_ticket_takes_first_match_in_list_order() {
        let mut registry = PatronRegistry::new();
        let id = registry.register("Alice Smith", "alice@example.com").id;

        let first = ticket(id, "dup");
        let first_id = first.id;
        registry.add_ticket(first);
        registry.add_ticket(ticket(id, "other"));
        registry.add_ticket(ticket(id, "dup"));

        let removed = registry.remove_ticket(id, "dup").unwrap();
        assert_eq!(removed.id, first_id);
        assert_eq!(registry.active_tickets_of(id).len(), 2);
        assert!(registry.remove_ticket(id, "missing").is_none());
    }

    #[test]
    fn edits_refresh_updated_at() {
        let mut registry = PatronRegistry::new();
        let id = registry.register("Alice Smith", "alice@example.com").id;
        let before = registry.get_by_id(id).unwrap().updated_at;

        assert!(registry.update_email(id, "alice@new.example.com"));
        let patron = registry.get_by_id(id).unwrap();
        assert_eq!(patron.email, "alice@new.example.com");
        assert!(patron.updated_at >= before);
        assert!(!registry.update_name(Uuid::new_v4(), "nobody"));
    }
}
