//! Repositories over the CRM tables.

pub mod participant;
pub mod participant_sql;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use participant::RegistrationStore;
pub use participant_sql::SqlParticipantRepository;

#[cfg(any(test, feature = "mock"))]
pub use mock::InMemoryRegistrationStore;
