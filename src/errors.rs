use super::*;

/// The errors the ledger can produce. All of them are terminal for the
/// operation that raised them.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum LedgerError {
    /// Failed parsing a stored record (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Class does not exist (Error code: -2).
    ClassNotFound,
    /// Class id is already taken (Error code: -3).
    DuplicateClassId,
    /// Class name is already taken (Error code: -4).
    DuplicateClassName,
    /// Token does not exist (Error code: -5).
    TokenNotFound,
    /// Token id is already taken within its class (Error code: -6).
    DuplicateTokenId,
    /// Caller is not the owner of the record (Error code: -7).
    Unauthorized,
    /// The class forbids token edits (Error code: -8).
    UpdateRestricted,
    /// Account address failed to parse (Error code: -9).
    InvalidAddress,
    /// Store key does not follow the expected layout (Error code: -10).
    MalformedKey,
    /// The underlying store rejected the operation (Error code: -11).
    StoreError,
}

/// Mapping store level failures to LedgerError.
impl From<StateError> for LedgerError {
    fn from(_se: StateError) -> Self {
        Self::StoreError
    }
}
