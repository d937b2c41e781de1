use super::*;

/// Result of a ledger operation.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Class ("denom") identifier, unique across the whole ledger.
pub type ClassId = String;

/// Token identifier, unique within its class.
pub type TokenId = String;
