//! Backend domain models
//!
//! All of these are read-only on the client; field names follow the
//! backend's camelCase JSON.

pub mod appointment;
pub mod doctor;
pub mod page;
pub mod payment;
pub mod profile;
pub mod slots;
pub mod specialty;

pub use appointment::{Appointment, AppointmentDetail, AppointmentStatus};
pub use doctor::{Doctor, DoctorDetail, Gender, TimeSlot};
pub use page::Page;
pub use payment::{PaymentOutcome, PendingAppointment};
pub use profile::UserProfile;
pub use slots::{BulkSlotGenerationRequest, BulkSlotGenerationResponse, DoctorSlotResult};
pub use specialty::Specialty;
