// booth - CLI front door for the ticket ledger
//
// Plays the role the deployment script and web UI play in a full
// installation: bootstrap the ledger once with its immutable
// parameters, then drive purchase/transfer/verify/remove against the
// persisted state. The caller's address always comes from the stored
// identity keypair and is passed to the ledger explicitly.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use ticketbooth::identity::{Address, Keypair};
use ticketbooth::ledger::{EventKind, LedgerHandle, Ownership, TicketLedger};
use ticketbooth::storage::TicketStore;
use ticketbooth::ticket::{TicketAttributes, TicketId};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "booth", about = "Fixed-inventory ticket vending ledger")]
struct Cli {
    /// Path to the data directory
    #[arg(long, default_value = ".booth", global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a fresh ledger with its immutable parameters
    Init {
        /// Price of every ticket
        #[arg(long)]
        price: u64,
        /// Maximum number of simultaneously sold tickets
        #[arg(long)]
        supply: u64,
    },

    /// Show price, supply, and sales counters
    Info,

    /// Buy a ticket with an exact payment
    Buy {
        /// Amount remitted (must equal the ticket price)
        #[arg(long)]
        pay: u64,
        /// What the ticket is for (e.g. a movie title)
        #[arg(long, requires = "slot", requires = "seat")]
        category: Option<String>,
        /// Which occurrence (e.g. a showtime)
        #[arg(long, requires = "category")]
        slot: Option<String>,
        /// Which place (e.g. a seat label)
        #[arg(long, requires = "category")]
        seat: Option<String>,
    },

    /// Transfer an owned ticket to another account
    Transfer {
        /// Id of the ticket to transfer
        #[arg(long)]
        ticket: u64,
        /// Recipient account address (0x...)
        #[arg(long)]
        to: String,
    },

    /// Check whether an address owns a ticket
    Verify {
        /// Account address to check (0x...)
        address: String,
    },

    /// Show the ticket owned by this booth's identity
    Mine,

    /// Cancel the ticket owned by this booth's identity (no refund)
    Remove,

    /// Print the ledger's mutation history
    History,

    /// Manage the local account identity
    Identity {
        #[command(subcommand)]
        command: IdentityCommand,
    },
}

#[derive(Subcommand)]
enum IdentityCommand {
    /// Generate and store a new keypair, replacing any existing one
    New,
    /// Show the current account address
    Show,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = TicketStore::open(&cli.store)?;
    debug!(store = %cli.store.display(), "store opened");

    match cli.command {
        Command::Init { price, supply } => {
            if store.load_ledger()?.is_some() {
                return Err("ledger already initialized; refusing to overwrite it".into());
            }

            let ledger = TicketLedger::with_parameters(price, supply)?;
            store.save_ledger(&ledger)?;
            store.flush()?;

            println!("Ledger created: price {price}, supply {supply}");
            Ok(())
        }

        Command::Info => {
            let handle = open_ledger(&store)?;
            handle.with_ledger(|ledger| {
                println!("Ticket price:  {}", ledger.unit_price());
                println!("Total tickets: {}", ledger.total_supply());
                println!("Tickets sold:  {}", ledger.sold_count());
                println!("Remaining:     {}", ledger.remaining());
                println!("Proceeds:      {}", ledger.proceeds());
            });
            Ok(())
        }

        Command::Buy {
            pay,
            category,
            slot,
            seat,
        } => {
            let handle = open_ledger(&store)?;
            let buyer = caller_address(&store)?;

            let attributes = match (category, slot, seat) {
                (Some(category), Some(slot), Some(seat)) => {
                    Some(TicketAttributes::new(category, slot, seat))
                }
                _ => None,
            };

            let ticket_id = handle.purchase(buyer, pay, attributes)?;
            save_ledger(&store, &handle)?;

            println!("Ticket purchased: {ticket_id}");
            println!("Tickets sold: {}/{}", handle.sold_count(), handle.total_supply());
            Ok(())
        }

        Command::Transfer { ticket, to } => {
            let handle = open_ledger(&store)?;
            let caller = caller_address(&store)?;
            let recipient = Address::parse(&to)?;

            handle.transfer(caller, TicketId::new(ticket), recipient)?;
            save_ledger(&store, &handle)?;

            println!("Ticket {} transferred to {recipient}", TicketId::new(ticket));
            Ok(())
        }

        Command::Verify { address } => {
            let handle = open_ledger(&store)?;
            let address = Address::parse(&address)?;

            match handle.verify_ownership(&address) {
                Ownership::Owned(ticket) => {
                    println!("{address} owns ticket {}", ticket.id());
                    if let Some(attrs) = ticket.attributes() {
                        println!("  {attrs}");
                    }
                }
                Ownership::None => println!("{address} does NOT own a ticket"),
            }
            Ok(())
        }

        Command::Mine => {
            let handle = open_ledger(&store)?;
            let caller = caller_address(&store)?;

            match handle.my_ticket(&caller) {
                Ownership::Owned(ticket) => {
                    println!("Your ticket is {}", ticket.id());
                    if let Some(attrs) = ticket.attributes() {
                        println!("  {attrs}");
                    }
                }
                Ownership::None => println!("You don't own a ticket."),
            }
            Ok(())
        }

        Command::Remove => {
            let handle = open_ledger(&store)?;
            let caller = caller_address(&store)?;

            let ticket_id = handle.remove_my_ticket(caller)?;
            save_ledger(&store, &handle)?;

            println!("Ticket {ticket_id} removed (no refund)");
            println!("Tickets sold: {}/{}", handle.sold_count(), handle.total_supply());
            Ok(())
        }

        Command::History => {
            let handle = open_ledger(&store)?;
            handle.with_ledger(|ledger| {
                for event in ledger.history() {
                    let when = event.timestamp().format("%Y-%m-%d %H:%M:%S");
                    match event.kind() {
                        EventKind::Purchased {
                            ticket_id,
                            buyer,
                            price,
                        } => println!("[{when}] {buyer} purchased {ticket_id} for {price}"),
                        EventKind::Transferred {
                            ticket_id,
                            from,
                            to,
                        } => println!("[{when}] {from} transferred {ticket_id} to {to}"),
                        EventKind::Removed { ticket_id, owner } => {
                            println!("[{when}] {owner} removed {ticket_id}")
                        }
                    }
                }
            });
            Ok(())
        }

        Command::Identity { command } => match command {
            IdentityCommand::New => {
                let keypair = Keypair::generate();
                store.save_keypair(&keypair)?;
                store.flush()?;
                println!("New identity: {}", Address::from_public_key(&keypair.public_key()));
                Ok(())
            }
            IdentityCommand::Show => {
                println!("{}", caller_address(&store)?);
                Ok(())
            }
        },
    }
}

/// Load the persisted ledger into a shared handle
fn open_ledger(store: &TicketStore) -> Result<LedgerHandle, Box<dyn std::error::Error>> {
    let ledger = store
        .load_ledger()?
        .ok_or("no ledger found; run `booth init` first")?;
    Ok(LedgerHandle::new(ledger))
}

/// Derive the caller's address from the stored keypair, creating one on first use
fn caller_address(store: &TicketStore) -> Result<Address, Box<dyn std::error::Error>> {
    let keypair = store.get_or_create_keypair()?;
    Ok(Address::from_public_key(&keypair.public_key()))
}

/// Persist the handle's current state
fn save_ledger(store: &TicketStore, handle: &LedgerHandle) -> Result<(), Box<dyn std::error::Error>> {
    handle.with_ledger(|ledger| store.save_ledger(ledger))?;
    store.flush()?;
    Ok(())
}
