//! Entity-scoped database operations.
//!
//! Free functions over a borrowed `Connection`, one sub-module per
//! entity. All public functions are re-exported here.

mod appointment;
mod clinical_record;
mod communication;
mod doctor;
mod finance;
mod patient;

use chrono::NaiveDateTime;

use super::DatabaseError;

pub use appointment::*;
pub use clinical_record::*;
pub use communication::*;
pub use doctor::*;
pub use finance::*;
pub use patient::*;

/// Map a UNIQUE-constraint failure on a natural key to the domain error;
/// everything else passes through as a plain SQLite error.
pub(crate) fn unique_violation(e: rusqlite::Error, key: &str) -> DatabaseError {
    if let rusqlite::Error::SqliteFailure(inner, _) = &e {
        if inner.code == rusqlite::ErrorCode::ConstraintViolation {
            return DatabaseError::ConstraintViolation(format!("{key} already registered"));
        }
    }
    e.into()
}

pub(crate) fn parse_datetime(idx: usize, value: String) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub(crate) fn parse_enum<T>(idx: usize, value: &str) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = DatabaseError>,
{
    value.parse().map_err(|e: DatabaseError| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
