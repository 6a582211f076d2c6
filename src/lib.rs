// ticketbooth - Fixed-inventory ticket vending ledger
//
// A bounded pool of numbered tickets is sold for a fixed unit price.
// The ledger is the authoritative record of who owns what: purchase,
// transfer, verify, remove. Everything else (UI, payment settlement,
// wallets) lives outside and calls in through the operations here.

pub mod identity;
pub mod ledger;
pub mod storage;
pub mod ticket;
