use crate::identity::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Issuance id of a ticket - monotonically assigned, never reused
///
/// Ids survive the ticket they name: removing a ticket retires its id
/// forever, it is never handed to a later buyer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketId(u64);

impl TicketId {
    /// Create a ticket id from its raw value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What was bought, as supplied by the buyer
///
/// Stored verbatim: the ledger does not validate these strings against
/// a catalog of events, showtimes, or seat maps. Whatever the buyer
/// submitted at purchase time is what verification reports later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketAttributes {
    /// What the ticket admits to (e.g. a movie title)
    category: String,
    /// Which occurrence (e.g. a showtime)
    slot: String,
    /// Which place within the occurrence (e.g. a seat label)
    seat: String,
}

impl TicketAttributes {
    /// Create attributes from their three parts
    pub fn new(
        category: impl Into<String>,
        slot: impl Into<String>,
        seat: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            slot: slot.into(),
            seat: seat.into(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn seat(&self) -> &str {
        &self.seat
    }
}

impl fmt::Display for TicketAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.category, self.slot, self.seat)
    }
}

/// An active ticket: its permanent id, current owner, and what it is for
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    owner: Address,
    attributes: Option<TicketAttributes>,
}

impl Ticket {
    /// Create a freshly issued ticket
    pub fn new(id: TicketId, owner: Address, attributes: Option<TicketAttributes>) -> Self {
        Self {
            id,
            owner,
            attributes,
        }
    }

    /// Get the issuance id
    pub fn id(&self) -> TicketId {
        self.id
    }

    /// Get the current owner
    pub fn owner(&self) -> &Address {
        &self.owner
    }

    /// Get the purchase-time attributes, if any were supplied
    pub fn attributes(&self) -> Option<&TicketAttributes> {
        self.attributes.as_ref()
    }

    /// Reassign the owner (transfer)
    pub(crate) fn set_owner(&mut self, owner: Address) {
        self.owner = owner;
    }
}
