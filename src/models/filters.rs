use chrono::{NaiveDate, NaiveDateTime};

use super::enums::{AppointmentStatus, EntryKind, PaymentStatus};

#[derive(Debug, Default)]
pub struct PatientFilter {
    /// Substring match against name, CPF or phone
    pub search: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Default)]
pub struct DoctorFilter {
    /// Substring match against name or CRM
    pub search: Option<String>,
    pub specialty: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Default)]
pub struct AppointmentFilter {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub status: Option<AppointmentStatus>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

#[derive(Debug, Default)]
pub struct FinanceFilter {
    pub kind: Option<EntryKind>,
    pub status: Option<PaymentStatus>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
}
