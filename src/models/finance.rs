use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::enums::{EntryKind, PaymentStatus};

/// A ledger entry. Income entries may point back at the appointment
/// that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceEntry {
    pub id: i64,
    pub kind: EntryKind,
    pub description: String,
    pub amount: f64,
    pub due_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub category: Option<String>,
    pub appointment_id: Option<i64>,
    pub created_at: NaiveDateTime,
}
