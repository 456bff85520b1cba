//! Per-submission validation for patient and doctor forms.
//!
//! Every applicable check runs; errors accumulate instead of
//! short-circuiting so the UI can show the full list at once. Order per
//! field: presence, then natural-key format, then uniqueness (skipped
//! when the format already failed), then the optional email.

use std::sync::LazyLock;

use regex::Regex;
use rusqlite::Connection;
use serde::Serialize;

use crate::models::{Doctor, Patient};

use super::cpf::is_valid_cpf;
use super::crm::is_valid_crm;
use super::uniqueness::{cpf_status, crm_status, KeyStatus};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Outcome of a validation pass. `valid` holds iff `errors` is empty.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self { valid: errors.is_empty(), errors }
    }
}

/// Validate a patient submission against field rules and the registry.
///
/// `exclude_id` is the record's own id on edit, so the stored value does
/// not count as a duplicate. Read-only; nothing is written.
pub fn validate_patient(
    conn: &Connection,
    patient: &Patient,
    exclude_id: Option<i64>,
) -> ValidationReport {
    let mut errors = Vec::new();

    require(&patient.full_name, "Full name", &mut errors);
    require(&patient.cpf, "CPF", &mut errors);
    require_present(patient.birth_date.is_some(), "Date of birth", &mut errors);
    require_present(patient.gender.is_some(), "Gender", &mut errors);
    require(&patient.phone, "Phone", &mut errors);

    if !patient.cpf.trim().is_empty() {
        if !is_valid_cpf(&patient.cpf) {
            errors.push("CPF is invalid.".into());
        } else {
            match cpf_status(conn, &patient.cpf, exclude_id) {
                KeyStatus::Available => {}
                KeyStatus::Taken => errors.push("CPF is already registered.".into()),
                KeyStatus::Unverified => {
                    errors.push("CPF could not be verified against the registry; try again.".into())
                }
            }
        }
    }

    check_email(patient.email.as_deref(), &mut errors);

    ValidationReport::from_errors(errors)
}

/// Validate a doctor submission. Same contract as [`validate_patient`].
pub fn validate_doctor(
    conn: &Connection,
    doctor: &Doctor,
    exclude_id: Option<i64>,
) -> ValidationReport {
    let mut errors = Vec::new();

    require(&doctor.full_name, "Full name", &mut errors);
    require(&doctor.crm, "CRM", &mut errors);
    require(&doctor.specialty, "Specialty", &mut errors);
    require(&doctor.phone, "Phone", &mut errors);

    if !doctor.crm.trim().is_empty() {
        if !is_valid_crm(&doctor.crm) {
            errors.push("CRM is invalid, expected format CRM/UF 123456.".into());
        } else {
            match crm_status(conn, &doctor.crm, exclude_id) {
                KeyStatus::Available => {}
                KeyStatus::Taken => errors.push("CRM is already registered.".into()),
                KeyStatus::Unverified => {
                    errors.push("CRM could not be verified against the registry; try again.".into())
                }
            }
        }
    }

    check_email(doctor.email.as_deref(), &mut errors);

    ValidationReport::from_errors(errors)
}

fn require(value: &str, label: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{label} is required."));
    }
}

fn require_present(present: bool, label: &str, errors: &mut Vec<String>) {
    if !present {
        errors.push(format!("{label} is required."));
    }
}

fn check_email(email: Option<&str>, errors: &mut Vec<String>) {
    if let Some(email) = email {
        if !email.trim().is_empty() && !EMAIL_PATTERN.is_match(email.trim()) {
            errors.push("Email address is invalid.".into());
        }
    }
}
