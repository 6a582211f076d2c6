// TicketStore - Persistent key-value storage using sled
//
// Provides typed access for storing:
// - The ledger snapshot (counters, tickets, history)
// - The local identity keypair driving the CLI

use crate::identity::Keypair;
use crate::ledger::{LedgerError, TicketLedger};
use std::path::Path;
use thiserror::Error;

/// Key prefixes for organizing data
mod keys {
    pub const LEDGER_SNAPSHOT: &[u8] = b"ledger:snapshot";
    pub const IDENTITY_KEYPAIR: &[u8] = b"identity:keypair";
    pub const IDENTITY_KEYPAIR_PREFIX: &[u8] = b"identity:keypair:";
}

/// Errors from storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open database: {0}")]
    OpenFailed(String),

    #[error("Database operation failed: {0}")]
    DatabaseError(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Flush failed: {0}")]
    FlushFailed(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::DatabaseError(err.to_string())
    }
}

/// Statistics about the storage
#[derive(Clone, Debug)]
pub struct StorageStats {
    /// Number of keys in the database
    pub key_count: usize,
    /// Approximate disk size in bytes
    pub disk_size_bytes: u64,
}

/// Persistent key-value store for booth data
///
/// Uses sled for crash-safe, embedded storage.
/// All writes are atomic and durable after flush.
pub struct TicketStore {
    db: sled::Db,
}

impl TicketStore {
    /// Open or create a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path).map_err(|e| StoreError::OpenFailed(e.to_string()))?;
        Ok(Self { db })
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.db.is_empty())
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::FlushFailed(e.to_string()))?;
        Ok(())
    }

    /// Get storage statistics
    pub fn stats(&self) -> Result<StorageStats, StoreError> {
        Ok(StorageStats {
            key_count: self.db.len(),
            disk_size_bytes: self.db.size_on_disk().unwrap_or(0),
        })
    }

    // ========================================================================
    // RAW KEY-VALUE OPERATIONS
    // ========================================================================

    /// Put raw bytes
    pub fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.db.insert(key, value)?;
        Ok(())
    }

    /// Get raw bytes
    pub fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    /// Delete a key
    pub fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        self.db.remove(key)?;
        Ok(())
    }

    // ========================================================================
    // LEDGER PERSISTENCE
    // ========================================================================

    /// Save a ledger snapshot
    pub fn save_ledger(&self, ledger: &TicketLedger) -> Result<(), StoreError> {
        let bytes = ledger.to_bytes();
        self.put_raw(keys::LEDGER_SNAPSHOT, &bytes)
    }

    /// Load the ledger snapshot, if one was ever saved
    pub fn load_ledger(&self) -> Result<Option<TicketLedger>, StoreError> {
        match self.get_raw(keys::LEDGER_SNAPSHOT)? {
            Some(bytes) => {
                let ledger = TicketLedger::from_bytes(&bytes)
                    .map_err(|e: LedgerError| StoreError::DeserializationFailed(e.to_string()))?;
                Ok(Some(ledger))
            }
            None => Ok(None),
        }
    }

    // ========================================================================
    // IDENTITY PERSISTENCE
    // ========================================================================

    /// Save the primary keypair
    pub fn save_keypair(&self, keypair: &Keypair) -> Result<(), StoreError> {
        let bytes = keypair.to_bytes();
        self.put_raw(keys::IDENTITY_KEYPAIR, &bytes)
    }

    /// Load the primary keypair
    pub fn load_keypair(&self) -> Result<Option<Keypair>, StoreError> {
        match self.get_raw(keys::IDENTITY_KEYPAIR)? {
            Some(bytes) => {
                let keypair = Keypair::from_bytes(&bytes)
                    .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;
                Ok(Some(keypair))
            }
            None => Ok(None),
        }
    }

    /// Get the primary keypair, generating and saving one if absent
    pub fn get_or_create_keypair(&self) -> Result<Keypair, StoreError> {
        if let Some(keypair) = self.load_keypair()? {
            return Ok(keypair);
        }

        let keypair = Keypair::generate();
        self.save_keypair(&keypair)?;
        Ok(keypair)
    }

    /// Save a keypair with a label
    pub fn save_keypair_with_label(&self, keypair: &Keypair, label: &str) -> Result<(), StoreError> {
        let key = [keys::IDENTITY_KEYPAIR_PREFIX, label.as_bytes()].concat();
        let bytes = keypair.to_bytes();
        self.put_raw(&key, &bytes)
    }

    /// Load a keypair by label
    pub fn load_keypair_with_label(&self, label: &str) -> Result<Option<Keypair>, StoreError> {
        let key = [keys::IDENTITY_KEYPAIR_PREFIX, label.as_bytes()].concat();
        match self.get_raw(&key)? {
            Some(bytes) => {
                let keypair = Keypair::from_bytes(&bytes)
                    .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;
                Ok(Some(keypair))
            }
            None => Ok(None),
        }
    }
}
