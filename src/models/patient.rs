use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::enums::{Gender, MaritalStatus};

/// A registered patient.
///
/// `cpf` is stored cleaned (digits only); the punctuated form is a
/// display concern. Required fields that arrive as free text stay
/// `String`, where empty after trimming means missing and the validator
/// reports it. Fields that are optional in the registry are `Option`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub full_name: String,
    pub cpf: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub insurance: Option<String>,
    pub insurance_number: Option<String>,
    pub notes: Option<String>,
    pub registered_at: NaiveDateTime,
    pub active: bool,
}
