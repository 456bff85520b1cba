use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, ToSql};
use serde::Serialize;

use crate::db::DatabaseError;
use crate::models::{FinanceEntry, FinanceFilter};

use super::{parse_datetime, parse_enum};

const ENTRY_COLUMNS: &str = "id, kind, description, amount, due_date, paid_date, status, \
     category, appointment_id, created_at";

/// Income and expense sums over a period (the dashboard KPIs).
#[derive(Debug, Clone, Serialize)]
pub struct FinanceTotals {
    pub income: f64,
    pub expense: f64,
}

impl FinanceTotals {
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

pub fn insert_finance_entry(conn: &Connection, entry: &FinanceEntry) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO finance_entries (kind, description, amount, due_date, paid_date, status,
         category, appointment_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            entry.kind.as_str(),
            entry.description,
            entry.amount,
            entry.due_date.map(|d| d.to_string()),
            entry.paid_date.map(|d| d.to_string()),
            entry.status.as_str(),
            entry.category,
            entry.appointment_id,
            entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_finance_entries(
    conn: &Connection,
    filter: &FinanceFilter,
) -> Result<Vec<FinanceEntry>, DatabaseError> {
    let mut sql = format!("SELECT {ENTRY_COLUMNS} FROM finance_entries WHERE 1=1");
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(kind) = filter.kind {
        sql.push_str(" AND kind = ?");
        args.push(Box::new(kind.as_str()));
    }
    if let Some(status) = filter.status {
        sql.push_str(" AND status = ?");
        args.push(Box::new(status.as_str()));
    }
    if let Some(from) = filter.due_from {
        sql.push_str(" AND due_date >= ?");
        args.push(Box::new(from.to_string()));
    }
    if let Some(to) = filter.due_to {
        sql.push_str(" AND due_date <= ?");
        args.push(Box::new(to.to_string()));
    }
    sql.push_str(" ORDER BY due_date, id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
        entry_from_row,
    )?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn mark_entry_paid(
    conn: &Connection,
    id: i64,
    paid_date: NaiveDate,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE finance_entries SET status = 'paid', paid_date = ?1 WHERE id = ?2",
        params![paid_date.to_string(), id],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound { entity: "finance entry", id });
    }
    Ok(())
}

/// Paid income vs paid expense between two dates, inclusive.
pub fn finance_totals(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<FinanceTotals, DatabaseError> {
    let (income, expense) = conn.query_row(
        "SELECT
            COALESCE(SUM(CASE WHEN kind = 'income' THEN amount END), 0.0),
            COALESCE(SUM(CASE WHEN kind = 'expense' THEN amount END), 0.0)
         FROM finance_entries
         WHERE status = 'paid' AND paid_date BETWEEN ?1 AND ?2",
        params![from.to_string(), to.to_string()],
        |row| Ok((row.get::<_, f64>(0)?, row.get::<_, f64>(1)?)),
    )?;
    Ok(FinanceTotals { income, expense })
}

fn entry_from_row(row: &Row) -> rusqlite::Result<FinanceEntry> {
    Ok(FinanceEntry {
        id: row.get(0)?,
        kind: parse_enum(1, &row.get::<_, String>(1)?)?,
        description: row.get(2)?,
        amount: row.get(3)?,
        due_date: row
            .get::<_, Option<String>>(4)?
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        paid_date: row
            .get::<_, Option<String>>(5)?
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        status: parse_enum(6, &row.get::<_, String>(6)?)?,
        category: row.get(7)?,
        appointment_id: row.get(8)?,
        created_at: parse_datetime(9, row.get(9)?)?,
    })
}
