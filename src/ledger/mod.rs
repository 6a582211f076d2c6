// Ledger module - THE INVENTORY AND OWNERSHIP RECORD
// Fixed supply, fixed price, at most one active ticket per account

mod config;
mod event;
mod handle;
mod state;

pub use config::LedgerConfig;
pub use event::{EventKind, LedgerEvent};
pub use handle::LedgerHandle;
pub use state::{LedgerError, Ownership, TicketLedger};
