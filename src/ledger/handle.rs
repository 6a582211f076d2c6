use crate::identity::Address;
use crate::ledger::state::{LedgerError, Ownership, TicketLedger};
use crate::ticket::{TicketAttributes, TicketId};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

/// Shared, thread-safe handle to a ticket ledger
///
/// The single mutual-exclusion boundary of the system: mutations take
/// the write lock, queries the read lock, so every operation observes
/// and produces fully-applied state. Cheap to clone; all clones refer
/// to the same ledger.
#[derive(Clone)]
pub struct LedgerHandle {
    inner: Arc<RwLock<TicketLedger>>,
}

impl LedgerHandle {
    /// Wrap a ledger in a shared handle
    pub fn new(ledger: TicketLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Validate parameters and create a fresh shared ledger
    pub fn with_parameters(unit_price: u64, total_supply: u64) -> Result<Self, LedgerError> {
        Ok(Self::new(TicketLedger::with_parameters(
            unit_price,
            total_supply,
        )?))
    }

    // Ledger mutations never panic while holding the lock, so a
    // poisoned lock still guards consistent state; recover it.
    fn read(&self) -> RwLockReadGuard<'_, TicketLedger> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, TicketLedger> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Sell the next ticket to `buyer` for exactly the unit price
    pub fn purchase(
        &self,
        buyer: Address,
        remitted: u64,
        attributes: Option<TicketAttributes>,
    ) -> Result<TicketId, LedgerError> {
        let ticket_id = self.write().purchase(buyer, remitted, attributes)?;
        info!(%buyer, %ticket_id, "ticket purchased");
        Ok(ticket_id)
    }

    /// Move a ticket from its current owner to another account
    pub fn transfer(
        &self,
        caller: Address,
        ticket_id: TicketId,
        recipient: Address,
    ) -> Result<(), LedgerError> {
        self.write().transfer(caller, ticket_id, recipient)?;
        info!(%caller, %ticket_id, %recipient, "ticket transferred");
        Ok(())
    }

    /// Cancel the caller's ticket, freeing one supply slot
    pub fn remove_my_ticket(&self, caller: Address) -> Result<TicketId, LedgerError> {
        let ticket_id = self.write().remove_my_ticket(caller)?;
        info!(%caller, %ticket_id, "ticket removed");
        Ok(ticket_id)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Report whether an address owns a ticket, and which
    pub fn verify_ownership(&self, address: &Address) -> Ownership {
        self.read().verify_ownership(address)
    }

    /// Same as `verify_ownership`, scoped to the caller's own account
    pub fn my_ticket(&self, caller: &Address) -> Ownership {
        self.read().my_ticket(caller)
    }

    pub fn unit_price(&self) -> u64 {
        self.read().unit_price()
    }

    pub fn total_supply(&self) -> u64 {
        self.read().total_supply()
    }

    pub fn sold_count(&self) -> u64 {
        self.read().sold_count()
    }

    pub fn remaining(&self) -> u64 {
        self.read().remaining()
    }

    pub fn is_sold_out(&self) -> bool {
        self.read().is_sold_out()
    }

    pub fn proceeds(&self) -> u64 {
        self.read().proceeds()
    }

    /// Run a closure against the ledger under the read lock
    ///
    /// For callers that need a consistent multi-field view (e.g. the
    /// CLI's info screen) without racing interleaved mutations.
    pub fn with_ledger<R>(&self, f: impl FnOnce(&TicketLedger) -> R) -> R {
        f(&self.read())
    }

    /// Take a serialized snapshot of the current state
    pub fn snapshot(&self) -> Vec<u8> {
        self.read().to_bytes()
    }
}
