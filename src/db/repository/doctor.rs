use rusqlite::{params, Connection, Row, ToSql};

use crate::db::DatabaseError;
use crate::integrity::crm::normalize_crm;
use crate::models::{Doctor, DoctorFilter};

use super::{parse_datetime, unique_violation};

const DOCTOR_COLUMNS: &str = "id, full_name, crm, specialty, phone, email, consultation_fee, \
     consultation_minutes, schedule, accepted_insurances, notes, registered_at, active";

/// Insert a doctor and return the new row id. The CRM is stored in its
/// canonical uppercase form; a duplicate surfaces as
/// `ConstraintViolation`.
pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (full_name, crm, specialty, phone, email, consultation_fee,
         consultation_minutes, schedule, accepted_insurances, notes, registered_at, active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            doctor.full_name,
            normalize_crm(&doctor.crm),
            doctor.specialty,
            doctor.phone,
            doctor.email,
            doctor.consultation_fee,
            doctor.consultation_minutes,
            doctor.schedule,
            doctor.accepted_insurances,
            doctor.notes,
            doctor.registered_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            doctor.active,
        ],
    )
    .map_err(|e| unique_violation(e, "CRM"))?;
    Ok(conn.last_insert_rowid())
}

pub fn update_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE doctors SET full_name = ?1, crm = ?2, specialty = ?3, phone = ?4,
             email = ?5, consultation_fee = ?6, consultation_minutes = ?7, schedule = ?8,
             accepted_insurances = ?9, notes = ?10, active = ?11
             WHERE id = ?12",
            params![
                doctor.full_name,
                normalize_crm(&doctor.crm),
                doctor.specialty,
                doctor.phone,
                doctor.email,
                doctor.consultation_fee,
                doctor.consultation_minutes,
                doctor.schedule,
                doctor.accepted_insurances,
                doctor.notes,
                doctor.active,
                doctor.id,
            ],
        )
        .map_err(|e| unique_violation(e, "CRM"))?;

    if changed == 0 {
        return Err(DatabaseError::NotFound { entity: "doctor", id: doctor.id });
    }
    Ok(())
}

pub fn get_doctor(conn: &Connection, id: i64) -> Result<Option<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE id = ?1"))?;

    match stmt.query_row(params![id], doctor_from_row) {
        Ok(doctor) => Ok(Some(doctor)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List doctors ordered by name, with optional active flag, specialty
/// and name/CRM substring filters.
pub fn list_doctors(conn: &Connection, filter: &DoctorFilter) -> Result<Vec<Doctor>, DatabaseError> {
    let mut sql = format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE 1=1");
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(active) = filter.active {
        sql.push_str(" AND active = ?");
        args.push(Box::new(active));
    }
    if let Some(specialty) = &filter.specialty {
        sql.push_str(" AND specialty = ?");
        args.push(Box::new(specialty.clone()));
    }
    if let Some(search) = &filter.search {
        sql.push_str(" AND (full_name LIKE ? OR crm LIKE ?)");
        let pattern = format!("%{search}%");
        args.push(Box::new(pattern.clone()));
        args.push(Box::new(pattern));
    }
    sql.push_str(" ORDER BY full_name");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
        doctor_from_row,
    )?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Hard delete. Callers are expected to have consulted
/// `integrity::can_delete_doctor` first.
pub fn delete_doctor(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM doctors WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(DatabaseError::NotFound { entity: "doctor", id });
    }
    Ok(())
}

fn doctor_from_row(row: &Row) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(0)?,
        full_name: row.get(1)?,
        crm: row.get(2)?,
        specialty: row.get(3)?,
        phone: row.get(4)?,
        email: row.get(5)?,
        consultation_fee: row.get(6)?,
        consultation_minutes: row.get(7)?,
        schedule: row.get(8)?,
        accepted_insurances: row.get(9)?,
        notes: row.get(10)?,
        registered_at: parse_datetime(11, row.get(11)?)?,
        active: row.get(12)?,
    })
}
