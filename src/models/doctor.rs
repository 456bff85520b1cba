use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A doctor on the clinic's roster.
///
/// `crm` is stored in its canonical uppercase form (`CRM/UF NNNNNN`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub full_name: String,
    pub crm: String,
    pub specialty: String,
    pub phone: String,
    pub email: Option<String>,
    pub consultation_fee: Option<f64>,
    pub consultation_minutes: Option<i32>,
    pub schedule: Option<String>,
    pub accepted_insurances: Option<String>,
    pub notes: Option<String>,
    pub registered_at: NaiveDateTime,
    pub active: bool,
}
