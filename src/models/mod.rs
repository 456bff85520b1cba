pub mod enums;
pub mod filters;

mod appointment;
mod clinical_record;
mod communication;
mod doctor;
mod finance;
mod patient;

pub use appointment::Appointment;
pub use clinical_record::ClinicalRecord;
pub use communication::Communication;
pub use doctor::Doctor;
pub use filters::*;
pub use finance::FinanceEntry;
pub use patient::Patient;
