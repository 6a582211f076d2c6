// Ticket module - The inventory item being sold

mod model;

pub use model::*;
