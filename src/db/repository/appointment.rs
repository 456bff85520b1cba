use rusqlite::{params, Connection, Row, ToSql};

use crate::db::DatabaseError;
use crate::models::enums::AppointmentStatus;
use crate::models::{Appointment, AppointmentFilter};

use super::{parse_datetime, parse_enum};

const APPOINTMENT_COLUMNS: &str =
    "id, patient_id, doctor_id, scheduled_at, status, fee, notes, created_at";

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (patient_id, doctor_id, scheduled_at, status, fee, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            appt.patient_id,
            appt.doctor_id,
            appt.scheduled_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            appt.status.as_str(),
            appt.fee,
            appt.notes,
            appt.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_appointment(conn: &Connection, id: i64) -> Result<Option<Appointment>, DatabaseError> {
    let mut stmt = conn
        .prepare(&format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"))?;

    match stmt.query_row(params![id], appointment_from_row) {
        Ok(appt) => Ok(Some(appt)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List appointments in schedule order, narrowed by any combination of
/// patient, doctor, status and time window.
pub fn list_appointments(
    conn: &Connection,
    filter: &AppointmentFilter,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut sql = format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE 1=1");
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(patient_id) = filter.patient_id {
        sql.push_str(" AND patient_id = ?");
        args.push(Box::new(patient_id));
    }
    if let Some(doctor_id) = filter.doctor_id {
        sql.push_str(" AND doctor_id = ?");
        args.push(Box::new(doctor_id));
    }
    if let Some(status) = filter.status {
        sql.push_str(" AND status = ?");
        args.push(Box::new(status.as_str()));
    }
    if let Some(from) = filter.from {
        sql.push_str(" AND scheduled_at >= ?");
        args.push(Box::new(from.format("%Y-%m-%d %H:%M:%S").to_string()));
    }
    if let Some(to) = filter.to {
        sql.push_str(" AND scheduled_at <= ?");
        args.push(Box::new(to.format("%Y-%m-%d %H:%M:%S").to_string()));
    }
    sql.push_str(" ORDER BY scheduled_at");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
        appointment_from_row,
    )?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_appointment_status(
    conn: &Connection,
    id: i64,
    status: AppointmentStatus,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound { entity: "appointment", id });
    }
    Ok(())
}

fn appointment_from_row(row: &Row) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        doctor_id: row.get(2)?,
        scheduled_at: parse_datetime(3, row.get(3)?)?,
        status: parse_enum(4, &row.get::<_, String>(4)?)?,
        fee: row.get(5)?,
        notes: row.get(6)?,
        created_at: parse_datetime(7, row.get(7)?)?,
    })
}
