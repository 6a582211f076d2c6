// Storage module - PERSISTENCE
// Sled-backed storage for the ledger snapshot and the CLI identity

mod store;

pub use store::{StorageStats, StoreError, TicketStore};
