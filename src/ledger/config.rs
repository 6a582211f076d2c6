use crate::ledger::LedgerError;
use serde::{Deserialize, Serialize};

/// Immutable parameters of a ticket ledger, fixed at construction
///
/// Mirrors what the deployment step decides once and never revisits:
/// what a ticket costs and how many may ever be sold at the same time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    unit_price: u64,
    total_supply: u64,
}

impl LedgerConfig {
    /// Validate and create a configuration
    ///
    /// Both parameters must be strictly positive; a free ticket or an
    /// empty inventory is a deployment mistake, not a degenerate case.
    pub fn new(unit_price: u64, total_supply: u64) -> Result<Self, LedgerError> {
        if unit_price == 0 {
            return Err(LedgerError::InvalidConfiguration {
                reason: "unit price must be positive".into(),
            });
        }

        if total_supply == 0 {
            return Err(LedgerError::InvalidConfiguration {
                reason: "total supply must be positive".into(),
            });
        }

        Ok(Self {
            unit_price,
            total_supply,
        })
    }

    /// Price every purchase must remit exactly
    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    /// Maximum number of simultaneously sold tickets
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }
}
