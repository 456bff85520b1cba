use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::{CommunicationKind, DeliveryStatus};

/// An outbound message to a patient (reminder, free-form message or
/// system notification).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Communication {
    pub id: i64,
    pub patient_id: i64,
    pub kind: CommunicationKind,
    pub subject: Option<String>,
    pub body: String,
    pub sent_at: Option<NaiveDateTime>,
    pub status: DeliveryStatus,
    pub created_at: NaiveDateTime,
}
