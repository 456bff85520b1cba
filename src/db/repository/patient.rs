use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, ToSql};

use crate::db::DatabaseError;
use crate::integrity::cpf::clean_cpf;
use crate::models::{Patient, PatientFilter};

use super::{parse_datetime, unique_violation};

const PATIENT_COLUMNS: &str = "id, full_name, cpf, birth_date, gender, phone, email, address, \
     marital_status, insurance, insurance_number, notes, registered_at, active";

/// Insert a patient and return the new row id. The CPF is stored
/// cleaned; a duplicate surfaces as `ConstraintViolation`.
pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (full_name, cpf, birth_date, gender, phone, email, address,
         marital_status, insurance, insurance_number, notes, registered_at, active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            patient.full_name,
            clean_cpf(&patient.cpf),
            patient.birth_date.map(|d| d.to_string()),
            patient.gender.map(|g| g.as_str()),
            patient.phone,
            patient.email,
            patient.address,
            patient.marital_status.map(|m| m.as_str()),
            patient.insurance,
            patient.insurance_number,
            patient.notes,
            patient.registered_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            patient.active,
        ],
    )
    .map_err(|e| unique_violation(e, "CPF"))?;
    Ok(conn.last_insert_rowid())
}

pub fn update_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE patients SET full_name = ?1, cpf = ?2, birth_date = ?3, gender = ?4,
             phone = ?5, email = ?6, address = ?7, marital_status = ?8, insurance = ?9,
             insurance_number = ?10, notes = ?11, active = ?12
             WHERE id = ?13",
            params![
                patient.full_name,
                clean_cpf(&patient.cpf),
                patient.birth_date.map(|d| d.to_string()),
                patient.gender.map(|g| g.as_str()),
                patient.phone,
                patient.email,
                patient.address,
                patient.marital_status.map(|m| m.as_str()),
                patient.insurance,
                patient.insurance_number,
                patient.notes,
                patient.active,
                patient.id,
            ],
        )
        .map_err(|e| unique_violation(e, "CPF"))?;

    if changed == 0 {
        return Err(DatabaseError::NotFound { entity: "patient", id: patient.id });
    }
    Ok(())
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn
        .prepare(&format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1"))?;

    match stmt.query_row(params![id], patient_from_row) {
        Ok(patient) => Ok(Some(patient)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List patients ordered by name, with optional active flag and
/// name/CPF/phone substring filters.
pub fn list_patients(conn: &Connection, filter: &PatientFilter) -> Result<Vec<Patient>, DatabaseError> {
    let mut sql = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE 1=1");
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(active) = filter.active {
        sql.push_str(" AND active = ?");
        args.push(Box::new(active));
    }
    if let Some(search) = &filter.search {
        sql.push_str(" AND (full_name LIKE ? OR cpf LIKE ? OR phone LIKE ?)");
        let pattern = format!("%{search}%");
        args.push(Box::new(pattern.clone()));
        args.push(Box::new(pattern.clone()));
        args.push(Box::new(pattern));
    }
    sql.push_str(" ORDER BY full_name");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
        patient_from_row,
    )?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Hard delete. Callers are expected to have consulted
/// `integrity::can_delete_patient` first.
pub fn delete_patient(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(DatabaseError::NotFound { entity: "patient", id });
    }
    Ok(())
}

fn patient_from_row(row: &Row) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        full_name: row.get(1)?,
        cpf: row.get(2)?,
        birth_date: row
            .get::<_, Option<String>>(3)?
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        gender: row.get::<_, Option<String>>(4)?.and_then(|g| g.parse().ok()),
        phone: row.get(5)?,
        email: row.get(6)?,
        address: row.get(7)?,
        marital_status: row.get::<_, Option<String>>(8)?.and_then(|m| m.parse().ok()),
        insurance: row.get(9)?,
        insurance_number: row.get(10)?,
        notes: row.get(11)?,
        registered_at: parse_datetime(12, row.get(12)?)?,
        active: row.get(13)?,
    })
}
