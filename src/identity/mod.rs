// Identity module - Ed25519 keypair management and account addresses

mod address;
mod keypair;

pub use address::*;
pub use keypair::*;
