//! Lending ticket model and related types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::book::Book;

/// Payment state of a lending ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

/// Record of one issue transaction.
///
/// Alive while the copy is out; discarded on return, never archived. Carries
/// the book record and the patron id as back-references for lookup only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LendingTicket {
    pub id: Uuid,
    pub book: Book,
    pub patron_id: Uuid,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub price: Decimal,
    pub payment_status: PaymentStatus,
}

impl LendingTicket {
    /// Create a ticket awaiting payment confirmation
    pub fn new(
        book: Book,
        patron_id: Uuid,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            book,
            patron_id,
            issue_date,
            due_date,
            price,
            payment_status: PaymentStatus::Pending,
        }
    }

    /// True when `today` falls strictly after the due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        today > self.due_date
    }
}
