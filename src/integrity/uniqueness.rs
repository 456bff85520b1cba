//! Natural-key uniqueness against the persisted registry.

use rusqlite::{params, Connection};

use super::cpf::clean_cpf;
use super::crm::normalize_crm;

/// Outcome of a natural-key lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    /// No other record holds the key.
    Available,
    /// Another record already holds the key.
    Taken,
    /// The lookup itself failed; treated as a conflict (fail closed).
    Unverified,
}

impl KeyStatus {
    /// Fail-closed boolean view: only a confirmed `Available` counts as
    /// unique.
    pub fn is_unique(self) -> bool {
        matches!(self, KeyStatus::Available)
    }
}

/// Is this CPF free among patients? `exclude_id` skips the record being
/// edited so it does not conflict with its own stored value.
pub fn cpf_status(conn: &Connection, cpf: &str, exclude_id: Option<i64>) -> KeyStatus {
    key_status(conn, "patients", "cpf", &clean_cpf(cpf), exclude_id)
}

/// Is this CRM free among doctors? Compared in canonical uppercase form.
pub fn crm_status(conn: &Connection, crm: &str, exclude_id: Option<i64>) -> KeyStatus {
    key_status(conn, "doctors", "crm", &normalize_crm(crm), exclude_id)
}

fn key_status(
    conn: &Connection,
    table: &str,
    column: &str,
    key: &str,
    exclude_id: Option<i64>,
) -> KeyStatus {
    let count = match exclude_id {
        Some(id) => conn.query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1 AND id != ?2"),
            params![key, id],
            |row| row.get::<_, i64>(0),
        ),
        None => conn.query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1"),
            params![key],
            |row| row.get::<_, i64>(0),
        ),
    };

    match count {
        Ok(0) => KeyStatus::Available,
        Ok(_) => KeyStatus::Taken,
        Err(e) => {
            tracing::warn!(table, column, error = %e, "uniqueness lookup failed, reporting conflict");
            KeyStatus::Unverified
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{insert_doctor, insert_patient};
    use crate::db::sqlite::open_memory_database;

    fn seed_patient(conn: &Connection, cpf: &str) -> i64 {
        conn.execute(
            "INSERT INTO patients (full_name, cpf) VALUES ('Ana Souza', ?1)",
            params![clean_cpf(cpf)],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    #[test]
    fn unseen_cpf_is_available() {
        let conn = open_memory_database().unwrap();
        assert_eq!(cpf_status(&conn, "529.982.247-25", None), KeyStatus::Available);
    }

    #[test]
    fn stored_cpf_is_taken_even_when_punctuated_differently() {
        let conn = open_memory_database().unwrap();
        seed_patient(&conn, "52998224725");
        assert_eq!(cpf_status(&conn, "529.982.247-25", None), KeyStatus::Taken);
    }

    #[test]
    fn editing_record_does_not_conflict_with_itself() {
        let conn = open_memory_database().unwrap();
        let id = seed_patient(&conn, "52998224725");
        assert_eq!(cpf_status(&conn, "529.982.247-25", Some(id)), KeyStatus::Available);
        // A different record still conflicts
        assert_eq!(cpf_status(&conn, "529.982.247-25", Some(id + 1)), KeyStatus::Taken);
    }

    #[test]
    fn crm_comparison_is_case_insensitive() {
        let conn = open_memory_database().unwrap();
        conn.execute(
            "INSERT INTO doctors (full_name, crm) VALUES ('Dr. Carlos Lima', 'CRM/SP 123456')",
            [],
        )
        .unwrap();
        assert_eq!(crm_status(&conn, "crm/sp 123456", None), KeyStatus::Taken);
        assert_eq!(crm_status(&conn, "CRM/RJ 98765", None), KeyStatus::Available);
    }

    #[test]
    fn lookup_failure_reports_unverified_not_available() {
        let conn = open_memory_database().unwrap();
        conn.execute_batch("DROP TABLE patients").unwrap();
        let status = cpf_status(&conn, "529.982.247-25", None);
        assert_eq!(status, KeyStatus::Unverified);
        assert!(!status.is_unique());
    }

    #[test]
    fn repository_inserts_are_visible_to_the_checker() {
        use chrono::NaiveDateTime;
        use crate::models::{Doctor, Patient};

        let conn = open_memory_database().unwrap();
        let at = NaiveDateTime::parse_from_str("2024-01-10 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();

        insert_patient(
            &conn,
            &Patient {
                id: 0,
                full_name: "Ana Souza".into(),
                cpf: "111.444.777-35".into(),
                birth_date: None,
                gender: None,
                phone: "(11) 98877-1234".into(),
                email: None,
                address: None,
                marital_status: None,
                insurance: None,
                insurance_number: None,
                notes: None,
                registered_at: at,
                active: true,
            },
        )
        .unwrap();
        assert_eq!(cpf_status(&conn, "11144477735", None), KeyStatus::Taken);

        insert_doctor(
            &conn,
            &Doctor {
                id: 0,
                full_name: "Dr. Carlos Lima".into(),
                crm: "crm/sp 123456".into(),
                specialty: "Cardiology".into(),
                phone: "(11) 97777-0001".into(),
                email: None,
                consultation_fee: None,
                consultation_minutes: None,
                schedule: None,
                accepted_insurances: None,
                notes: None,
                registered_at: at,
                active: true,
            },
        )
        .unwrap();
        assert_eq!(crm_status(&conn, "CRM/SP 123456", None), KeyStatus::Taken);
    }
}
