use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

use crate::db::DatabaseError;
use crate::models::Communication;

use super::{parse_datetime, parse_enum};

const COMMUNICATION_COLUMNS: &str =
    "id, patient_id, kind, subject, body, sent_at, status, created_at";

pub fn insert_communication(
    conn: &Connection,
    comm: &Communication,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO communications (patient_id, kind, subject, body, sent_at, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            comm.patient_id,
            comm.kind.as_str(),
            comm.subject,
            comm.body,
            comm.sent_at.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
            comm.status.as_str(),
            comm.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_patient_communications(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<Communication>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COMMUNICATION_COLUMNS} FROM communications
         WHERE patient_id = ?1 ORDER BY created_at DESC"
    ))?;

    let rows = stmt.query_map(params![patient_id], communication_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Messages still waiting to go out, oldest first.
pub fn list_pending_communications(conn: &Connection) -> Result<Vec<Communication>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COMMUNICATION_COLUMNS} FROM communications
         WHERE status = 'pending' ORDER BY created_at"
    ))?;

    let rows = stmt.query_map([], communication_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn mark_communication_sent(
    conn: &Connection,
    id: i64,
    sent_at: NaiveDateTime,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE communications SET status = 'sent', sent_at = ?1 WHERE id = ?2",
        params![sent_at.format("%Y-%m-%d %H:%M:%S").to_string(), id],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound { entity: "communication", id });
    }
    Ok(())
}

fn communication_from_row(row: &Row) -> rusqlite::Result<Communication> {
    Ok(Communication {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        kind: parse_enum(2, &row.get::<_, String>(2)?)?,
        subject: row.get(3)?,
        body: row.get(4)?,
        sent_at: row
            .get::<_, Option<String>>(5)?
            .and_then(|t| NaiveDateTime::parse_from_str(&t, "%Y-%m-%d %H:%M:%S").ok()),
        status: parse_enum(6, &row.get::<_, String>(6)?)?,
        created_at: parse_datetime(7, row.get(7)?)?,
    })
}
