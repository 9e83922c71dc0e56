//! CRM participant storage for webinarsync
//!
//! Database access goes through SQLx's `Any` driver so the same code runs on
//! sqlite (the default feature, used in tests and development) and on the
//! database the CRM runs on.
//!
//! ```rust,no_run
//! use webinarsync_db::{DbClient, RegistrationStore, SqlParticipantRepository};
//!
//! async fn attendees() -> Result<(), webinarsync_db::error::DbError> {
//!     let client = DbClient::from_url("sqlite://crm.db").await?;
//!     let repo = SqlParticipantRepository::new(client);
//!     let event = repo.find_event_by_custom_field("custom_12", "81234567890").await?;
//!     println!("{event:?}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;
pub use repositories::{RegistrationStore, SqlParticipantRepository};

#[cfg(any(test, feature = "mock"))]
pub use repositories::InMemoryRegistrationStore;
