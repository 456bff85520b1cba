use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A clinical note taken during (or outside) an appointment.
/// `doctor_id` identifies the treating doctor when one was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalRecord {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: Option<i64>,
    pub appointment_id: Option<i64>,
    pub anamnesis: Option<String>,
    pub physical_exam: Option<String>,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub created_at: NaiveDateTime,
}
