use crate::identity::Address;
use crate::ticket::TicketId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened in a successful mutation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A ticket was issued to a buyer for the unit price
    Purchased {
        ticket_id: TicketId,
        buyer: Address,
        price: u64,
    },

    /// Ownership of a ticket moved between accounts
    Transferred {
        ticket_id: TicketId,
        from: Address,
        to: Address,
    },

    /// An owner cancelled their ticket, freeing one supply slot
    Removed { ticket_id: TicketId, owner: Address },
}

/// One entry in the ledger's append-only history
///
/// Informational only: preconditions never consult the history, and
/// replaying it is not how state is reconstructed. It exists so the
/// calling layer can show what happened and when.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    seq: u64,
    timestamp: DateTime<Utc>,
    kind: EventKind,
}

impl LedgerEvent {
    /// Create an event stamped with the current time
    pub(crate) fn now(seq: u64, kind: EventKind) -> Self {
        Self {
            seq,
            timestamp: Utc::now(),
            kind,
        }
    }

    /// Position in the history (0-based, dense)
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// When the mutation committed
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// What the mutation was
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }
}
