// Ticket ledger - the authoritative inventory and ownership state machine
//
// Every operation is a single atomic transition: all preconditions are
// checked before any field is touched, so a failed call leaves no trace.

use crate::identity::Address;
use crate::ledger::config::LedgerConfig;
use crate::ledger::event::{EventKind, LedgerEvent};
use crate::ticket::{Ticket, TicketAttributes, TicketId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Errors that can occur during ledger operations
///
/// Except for `InvalidConfiguration` (fatal at construction) and
/// `DeserializationFailed` (corrupt snapshot), every variant is a
/// precondition violation: state is unchanged and the caller may retry
/// with corrected input.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Sold out: all {total_supply} tickets are currently sold")]
    SoldOut { total_supply: u64 },

    #[error("Incorrect payment: remitted {remitted}, ticket price is {expected}")]
    IncorrectPayment { remitted: u64, expected: u64 },

    #[error("Account {owner} already owns ticket {ticket_id}")]
    AlreadyOwnsTicket { owner: Address, ticket_id: TicketId },

    #[error("Ticket {ticket_id} not found")]
    TicketNotFound { ticket_id: TicketId },

    #[error("Account {caller} is not the owner of ticket {ticket_id}")]
    NotOwner { caller: Address, ticket_id: TicketId },

    #[error("Invalid recipient: the null address cannot own a ticket")]
    InvalidRecipient,

    #[error("Recipient {recipient} already owns ticket {ticket_id}")]
    RecipientAlreadyOwnsTicket {
        recipient: Address,
        ticket_id: TicketId,
    },

    #[error("Account {caller} owns no ticket")]
    NoTicketOwned { caller: Address },

    #[error("Deserialization failed")]
    DeserializationFailed,
}

/// Answer to an ownership query
///
/// Owning nothing is a normal outcome, not an error, so it gets its
/// own variant instead of a sentinel id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ownership {
    /// The address owns no active ticket
    None,
    /// The address owns this ticket
    Owned(Ticket),
}

impl Ownership {
    /// Whether the queried address owns a ticket
    pub fn owns(&self) -> bool {
        matches!(self, Ownership::Owned(_))
    }

    /// The owned ticket, if any
    pub fn ticket(&self) -> Option<&Ticket> {
        match self {
            Ownership::None => None,
            Ownership::Owned(ticket) => Some(ticket),
        }
    }
}

/// The ticket ledger - fixed supply, fixed price, tracked ownership
///
/// Sole owner of all ticket records and the ownership index; mutation
/// happens only through `purchase`, `transfer`, and `remove_my_ticket`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketLedger {
    /// Immutable price and supply parameters
    config: LedgerConfig,
    /// Active tickets by issuance id
    tickets: BTreeMap<TicketId, Ticket>,
    /// Index: owner address -> their single active ticket
    #[serde(skip)]
    owners: HashMap<Address, TicketId>,
    /// Number of currently sold tickets (0..=total_supply)
    sold_count: u64,
    /// Next issuance id; ids start at 1 and are never reused
    next_ticket_id: u64,
    /// Running total of retained payments (accounting only)
    proceeds: u64,
    /// Append-only record of successful mutations
    events: Vec<LedgerEvent>,
}

impl TicketLedger {
    /// Create an empty ledger with the given parameters
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            tickets: BTreeMap::new(),
            owners: HashMap::new(),
            sold_count: 0,
            next_ticket_id: 1,
            proceeds: 0,
            events: Vec::new(),
        }
    }

    /// Validate parameters and create an empty ledger in one step
    pub fn with_parameters(unit_price: u64, total_supply: u64) -> Result<Self, LedgerError> {
        Ok(Self::new(LedgerConfig::new(unit_price, total_supply)?))
    }

    // ========================================================================
    // READ ACCESSORS
    // ========================================================================

    /// Price every purchase must remit exactly
    pub fn unit_price(&self) -> u64 {
        self.config.unit_price()
    }

    /// Maximum number of simultaneously sold tickets
    pub fn total_supply(&self) -> u64 {
        self.config.total_supply()
    }

    /// Number of currently sold tickets
    pub fn sold_count(&self) -> u64 {
        self.sold_count
    }

    /// Supply slots still purchasable
    pub fn remaining(&self) -> u64 {
        self.config.total_supply() - self.sold_count
    }

    /// Whether every supply slot is taken
    pub fn is_sold_out(&self) -> bool {
        self.sold_count >= self.config.total_supply()
    }

    /// Total payments retained so far (removals do not refund)
    pub fn proceeds(&self) -> u64 {
        self.proceeds
    }

    /// Look up an active ticket by id
    pub fn ticket(&self, ticket_id: TicketId) -> Option<&Ticket> {
        self.tickets.get(&ticket_id)
    }

    /// All active tickets in issuance order
    pub fn all_tickets(&self) -> Vec<&Ticket> {
        self.tickets.values().collect()
    }

    /// The append-only mutation history, oldest first
    pub fn history(&self) -> &[LedgerEvent] {
        &self.events
    }

    // ========================================================================
    // PURCHASE
    // ========================================================================

    /// Sell the next ticket to `buyer` for exactly the unit price
    ///
    /// The remitted amount is the already-settled payment reported by
    /// the calling layer; the ledger only checks it and accounts for it.
    pub fn purchase(
        &mut self,
        buyer: Address,
        remitted: u64,
        attributes: Option<TicketAttributes>,
    ) -> Result<TicketId, LedgerError> {
        if self.is_sold_out() {
            return Err(LedgerError::SoldOut {
                total_supply: self.config.total_supply(),
            });
        }

        // Exact payment only: over- and underpayment are both rejected
        // rather than partially refunded.
        if remitted != self.config.unit_price() {
            return Err(LedgerError::IncorrectPayment {
                remitted,
                expected: self.config.unit_price(),
            });
        }

        if let Some(&ticket_id) = self.owners.get(&buyer) {
            return Err(LedgerError::AlreadyOwnsTicket {
                owner: buyer,
                ticket_id,
            });
        }

        let ticket_id = TicketId::new(self.next_ticket_id);
        self.next_ticket_id += 1;

        self.tickets
            .insert(ticket_id, Ticket::new(ticket_id, buyer, attributes));
        self.owners.insert(buyer, ticket_id);
        self.sold_count += 1;
        self.proceeds += self.config.unit_price();

        self.record(EventKind::Purchased {
            ticket_id,
            buyer,
            price: self.config.unit_price(),
        });

        Ok(ticket_id)
    }

    // ========================================================================
    // TRANSFER
    // ========================================================================

    /// Move a ticket from its current owner to another account
    ///
    /// Transfers to an account that already owns a ticket are rejected;
    /// allowing them would orphan the recipient's old index entry and
    /// break the one-ticket-per-account invariant.
    pub fn transfer(
        &mut self,
        caller: Address,
        ticket_id: TicketId,
        recipient: Address,
    ) -> Result<(), LedgerError> {
        if !self.tickets.contains_key(&ticket_id) {
            return Err(LedgerError::TicketNotFound { ticket_id });
        }

        if self.owners.get(&caller) != Some(&ticket_id) {
            return Err(LedgerError::NotOwner { caller, ticket_id });
        }

        if recipient.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }

        if let Some(&owned) = self.owners.get(&recipient) {
            return Err(LedgerError::RecipientAlreadyOwnsTicket {
                recipient,
                ticket_id: owned,
            });
        }

        self.owners.remove(&caller);
        self.owners.insert(recipient, ticket_id);
        if let Some(ticket) = self.tickets.get_mut(&ticket_id) {
            ticket.set_owner(recipient);
        }

        self.record(EventKind::Transferred {
            ticket_id,
            from: caller,
            to: recipient,
        });

        Ok(())
    }

    // ========================================================================
    // OWNERSHIP QUERIES
    // ========================================================================

    /// Report whether any address owns a ticket, and which
    ///
    /// Safe for any address, including ones that never transacted.
    pub fn verify_ownership(&self, address: &Address) -> Ownership {
        match self.owners.get(address) {
            Some(ticket_id) => match self.tickets.get(ticket_id) {
                Some(ticket) => Ownership::Owned(ticket.clone()),
                None => Ownership::None,
            },
            None => Ownership::None,
        }
    }

    /// Same as `verify_ownership`, scoped to the caller's own account
    pub fn my_ticket(&self, caller: &Address) -> Ownership {
        self.verify_ownership(caller)
    }

    // ========================================================================
    // REMOVAL
    // ========================================================================

    /// Cancel the caller's ticket, freeing one supply slot
    ///
    /// No refund: the purchase price stays in the proceeds. The freed
    /// slot becomes purchasable again under a brand-new issuance id.
    pub fn remove_my_ticket(&mut self, caller: Address) -> Result<TicketId, LedgerError> {
        let ticket_id = match self.owners.get(&caller) {
            Some(&id) => id,
            None => return Err(LedgerError::NoTicketOwned { caller }),
        };

        self.tickets.remove(&ticket_id);
        self.owners.remove(&caller);
        self.sold_count -= 1;

        self.record(EventKind::Removed {
            ticket_id,
            owner: caller,
        });

        Ok(ticket_id)
    }

    // ========================================================================
    // SERIALIZATION
    // ========================================================================

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        postcard::to_allocvec(self).unwrap_or_default()
    }

    /// Deserialize from bytes, rebuilding the ownership index
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        let mut ledger: TicketLedger =
            postcard::from_bytes(bytes).map_err(|_| LedgerError::DeserializationFailed)?;
        ledger.rebuild_index();
        Ok(ledger)
    }

    /// Rebuild the owner index from the ticket map (after deserialization)
    fn rebuild_index(&mut self) {
        self.owners.clear();
        for (id, ticket) in &self.tickets {
            self.owners.insert(*ticket.owner(), *id);
        }
    }

    fn record(&mut self, kind: EventKind) {
        let seq = self.events.len() as u64;
        self.events.push(LedgerEvent::now(seq, kind));
    }
}
