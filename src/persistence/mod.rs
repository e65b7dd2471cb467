//! Persistence layer: chart snapshots and the event log.
//!
//! [`ChartStore`] abstracts durable storage. [`PostgresStore`] is the
//! production backend over `sqlx::PgPool`; [`MemoryStore`] backs tests and
//! ephemeral deployments. The persister task in [`persister`] keeps the
//! store in step with the event bus.

pub mod memory;
pub mod models;
pub mod persister;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use models::{ChartSnapshot, StoredEvent};
pub use persister::{restore_into, spawn_persister};
pub use postgres::PostgresStore;
pub use store::ChartStore;
