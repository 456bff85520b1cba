//! Deletion gating: an entity with referencing records cannot be
//! removed, and the caller gets told exactly what is in the way.

use rusqlite::{params, Connection};
use serde::Serialize;

use crate::db::DatabaseError;

/// Outcome of a deletion-dependency check. `dependencies` holds one
/// `"<count> <label>"` entry per blocking record class, in check order.
#[derive(Debug, Clone, Serialize)]
pub struct DeletionCheck {
    pub can_delete: bool,
    pub dependencies: Vec<String>,
    pub message: String,
}

const PATIENT_DEPENDENCIES: &[(&str, &str)] = &[
    ("SELECT COUNT(*) FROM appointments WHERE patient_id = ?1", "appointment(s)"),
    ("SELECT COUNT(*) FROM clinical_records WHERE patient_id = ?1", "clinical record(s)"),
    ("SELECT COUNT(*) FROM communications WHERE patient_id = ?1", "communication(s)"),
];

const DOCTOR_DEPENDENCIES: &[(&str, &str)] = &[
    ("SELECT COUNT(*) FROM appointments WHERE doctor_id = ?1", "appointment(s)"),
    ("SELECT COUNT(*) FROM clinical_records WHERE doctor_id = ?1", "clinical record(s)"),
];

/// May this patient be hard-deleted? Counts appointments, clinical
/// records and communications that still point at the record.
pub fn can_delete_patient(conn: &Connection, patient_id: i64) -> DeletionCheck {
    check_dependencies(conn, "patient", patient_id, PATIENT_DEPENDENCIES)
}

/// May this doctor be hard-deleted? Counts appointments and clinical
/// records that still point at the record.
pub fn can_delete_doctor(conn: &Connection, doctor_id: i64) -> DeletionCheck {
    check_dependencies(conn, "doctor", doctor_id, DOCTOR_DEPENDENCIES)
}

fn check_dependencies(
    conn: &Connection,
    entity: &str,
    id: i64,
    classes: &[(&str, &str)],
) -> DeletionCheck {
    match count_references(conn, id, classes) {
        Ok(dependencies) if dependencies.is_empty() => DeletionCheck {
            can_delete: true,
            dependencies,
            message: format!("The {entity} can be safely deleted."),
        },
        Ok(dependencies) => {
            let joined = dependencies.join(", ");
            DeletionCheck {
                can_delete: false,
                message: format!("The {entity} cannot be deleted: linked to {joined}."),
                dependencies,
            }
        }
        // Fail closed: an unverifiable count blocks the deletion.
        Err(e) => {
            tracing::warn!(entity, id, error = %e, "dependency check failed, blocking deletion");
            DeletionCheck {
                can_delete: false,
                dependencies: Vec::new(),
                message: format!("Dependency check failed: {e}. Deletion blocked."),
            }
        }
    }
}

fn count_references(
    conn: &Connection,
    id: i64,
    classes: &[(&str, &str)],
) -> Result<Vec<String>, DatabaseError> {
    let mut dependencies = Vec::new();
    for (sql, label) in classes {
        let count: i64 = conn.query_row(sql, params![id], |row| row.get(0))?;
        if count > 0 {
            dependencies.push(format!("{count} {label}"));
        }
    }
    Ok(dependencies)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn seed_patient(conn: &Connection) -> i64 {
        conn.execute(
            "INSERT INTO patients (full_name, cpf) VALUES ('Ana Souza', '52998224725')",
            [],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn seed_doctor(conn: &Connection) -> i64 {
        conn.execute(
            "INSERT INTO doctors (full_name, crm) VALUES ('Dr. Carlos Lima', 'CRM/SP 123456')",
            [],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn seed_appointment(conn: &Connection, patient_id: i64, doctor_id: i64) {
        conn.execute(
            "INSERT INTO appointments (patient_id, doctor_id, scheduled_at)
             VALUES (?1, ?2, '2024-03-01 09:00:00')",
            params![patient_id, doctor_id],
        )
        .unwrap();
    }

    #[test]
    fn unreferenced_patient_is_deletable() {
        let conn = open_memory_database().unwrap();
        let patient_id = seed_patient(&conn);

        let check = can_delete_patient(&conn, patient_id);
        assert!(check.can_delete);
        assert!(check.dependencies.is_empty());
        assert_eq!(check.message, "The patient can be safely deleted.");
    }

    #[test]
    fn appointments_block_patient_deletion() {
        let conn = open_memory_database().unwrap();
        let patient_id = seed_patient(&conn);
        let doctor_id = seed_doctor(&conn);
        seed_appointment(&conn, patient_id, doctor_id);
        seed_appointment(&conn, patient_id, doctor_id);

        let check = can_delete_patient(&conn, patient_id);
        assert!(!check.can_delete);
        assert_eq!(check.dependencies, vec!["2 appointment(s)"]);
        assert!(check.message.contains("linked to 2 appointment(s)"));
    }

    #[test]
    fn all_blocking_classes_are_listed_in_order() {
        let conn = open_memory_database().unwrap();
        let patient_id = seed_patient(&conn);
        let doctor_id = seed_doctor(&conn);
        seed_appointment(&conn, patient_id, doctor_id);
        conn.execute(
            "INSERT INTO clinical_records (patient_id) VALUES (?1)",
            params![patient_id],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO communications (patient_id, kind, body)
             VALUES (?1, 'reminder', 'See you at 09:00.')",
            params![patient_id],
        )
        .unwrap();

        let check = can_delete_patient(&conn, patient_id);
        assert!(!check.can_delete);
        assert_eq!(
            check.dependencies,
            vec!["1 appointment(s)", "1 clinical record(s)", "1 communication(s)"]
        );
        assert!(check
            .message
            .contains("linked to 1 appointment(s), 1 clinical record(s), 1 communication(s)"));
    }

    #[test]
    fn doctor_blocked_by_clinical_records() {
        let conn = open_memory_database().unwrap();
        let patient_id = seed_patient(&conn);
        let doctor_id = seed_doctor(&conn);
        conn.execute(
            "INSERT INTO clinical_records (patient_id, doctor_id) VALUES (?1, ?2)",
            params![patient_id, doctor_id],
        )
        .unwrap();

        let check = can_delete_doctor(&conn, doctor_id);
        assert!(!check.can_delete);
        assert_eq!(check.dependencies, vec!["1 clinical record(s)"]);
    }

    #[test]
    fn unreferenced_doctor_is_deletable() {
        let conn = open_memory_database().unwrap();
        let doctor_id = seed_doctor(&conn);

        let check = can_delete_doctor(&conn, doctor_id);
        assert!(check.can_delete);
        assert_eq!(check.message, "The doctor can be safely deleted.");
    }

    #[test]
    fn count_failure_blocks_deletion_instead_of_erroring() {
        let conn = open_memory_database().unwrap();
        let patient_id = seed_patient(&conn);
        conn.execute_batch("DROP TABLE communications").unwrap();

        let check = can_delete_patient(&conn, patient_id);
        assert!(!check.can_delete);
        assert!(check.dependencies.is_empty());
        assert!(check.message.starts_with("Dependency check failed:"), "got: {}", check.message);
    }
}
