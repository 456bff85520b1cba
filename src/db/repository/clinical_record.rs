use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::ClinicalRecord;

use super::parse_datetime;

const RECORD_COLUMNS: &str = "id, patient_id, doctor_id, appointment_id, anamnesis, \
     physical_exam, diagnosis, prescription, created_at";

pub fn insert_clinical_record(
    conn: &Connection,
    record: &ClinicalRecord,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO clinical_records (patient_id, doctor_id, appointment_id, anamnesis,
         physical_exam, diagnosis, prescription, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.patient_id,
            record.doctor_id,
            record.appointment_id,
            record.anamnesis,
            record.physical_exam,
            record.diagnosis,
            record.prescription,
            record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_clinical_record(
    conn: &Connection,
    id: i64,
) -> Result<Option<ClinicalRecord>, DatabaseError> {
    let mut stmt = conn
        .prepare(&format!("SELECT {RECORD_COLUMNS} FROM clinical_records WHERE id = ?1"))?;

    match stmt.query_row(params![id], record_from_row) {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// A patient's chart, newest entry first.
pub fn list_patient_records(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<ClinicalRecord>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM clinical_records
         WHERE patient_id = ?1 ORDER BY created_at DESC"
    ))?;

    let rows = stmt.query_map(params![patient_id], record_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

fn record_from_row(row: &Row) -> rusqlite::Result<ClinicalRecord> {
    Ok(ClinicalRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        doctor_id: row.get(2)?,
        appointment_id: row.get(3)?,
        anamnesis: row.get(4)?,
        physical_exam: row.get(5)?,
        diagnosis: row.get(6)?,
        prescription: row.get(7)?,
        created_at: parse_datetime(8, row.get(8)?)?,
    })
}
