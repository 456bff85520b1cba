//! Referential-integrity and validation engine.
//!
//! Everything here is synchronous and read-only. The UI layer calls in
//! once per user action (save a form, ask to delete a record) and
//! renders the returned report; persistence errors never escape this
//! boundary. Safety checks that cannot complete degrade to their
//! restrictive outcome instead of failing open: an unverifiable natural
//! key reads as a conflict, an unverifiable dependency count blocks the
//! deletion.

pub mod cpf;
pub mod crm;
pub mod deletion;
pub mod uniqueness;
pub mod validate;

pub use cpf::{clean_cpf, format_cpf, is_valid_cpf};
pub use crm::{is_valid_crm, normalize_crm};
pub use deletion::{can_delete_doctor, can_delete_patient, DeletionCheck};
pub use uniqueness::{cpf_status, crm_status, KeyStatus};
pub use validate::{validate_doctor, validate_patient, ValidationReport};
