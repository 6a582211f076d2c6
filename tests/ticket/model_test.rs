// Ticket model tests

use ticketbooth::identity::{Address, Keypair};
use ticketbooth::ticket::{Ticket, TicketAttributes, TicketId};

fn addr() -> Address {
    Address::from_public_key(&Keypair::generate().public_key())
}

#[test]
fn test_ticket_id_ordering_follows_issuance() {
    assert!(TicketId::new(1) < TicketId::new(2));
    assert_eq!(TicketId::new(5).value(), 5);
}

#[test]
fn test_ticket_without_attributes() {
    let ticket = Ticket::new(TicketId::new(1), addr(), None);
    assert!(ticket.attributes().is_none());
}

#[test]
fn test_ticket_with_attributes() {
    let owner = addr();
    let attrs = TicketAttributes::new("Interstellar", "22:00", "D9");
    let ticket = Ticket::new(TicketId::new(3), owner, Some(attrs.clone()));

    assert_eq!(ticket.id(), TicketId::new(3));
    assert_eq!(ticket.owner(), &owner);
    assert_eq!(ticket.attributes(), Some(&attrs));
}

#[test]
fn test_attributes_display() {
    let attrs = TicketAttributes::new("Interstellar", "22:00", "D9");
    assert_eq!(attrs.to_string(), "Interstellar / 22:00 / D9");
}
