//! The ownership index is purely derived from token records. Entries are only
//! written and removed from the ledger's token write paths, in the same atomic
//! unit as the token mutation they mirror.

use super::*;

/// Add the index entry for a token.
pub(crate) fn add_owner_entry<S: HasStateApi>(
    state: &mut S,
    owner: &AccountAddress,
    class_id: &str,
    token_id: &str,
) -> LedgerResult<()> {
    write_value(state, &owner_key(owner, class_id, token_id), &())
}

/// Remove the index entry for a token.
pub(crate) fn remove_owner_entry<S: HasStateApi>(
    state: &mut S,
    owner: &AccountAddress,
    class_id: &str,
    token_id: &str,
) -> LedgerResult<()> {
    delete_key(state, &owner_key(owner, class_id, token_id))?;
    Ok(())
}

/// `(class_id, token_id)` pairs held by `owner` in ascending key order. An
/// empty `class_id` scans across all classes.
pub(crate) fn scan_owner<S: HasStateApi>(
    state: &S,
    owner: &AccountAddress,
    class_id: &str,
    page: &PageRequest,
) -> LedgerResult<Paged<(ClassId, TokenId)>> {
    scan_prefix(state, &owner_key(owner, class_id, ""), page, |key, _| {
        let (_, class_id, token_id) = decode_owner_key(key)?;
        Ok((class_id, token_id))
    })
}

/// Number of tokens of a class held by `owner`, counted from the index.
pub(crate) fn owner_supply<S: HasStateApi>(
    state: &S,
    owner: &AccountAddress,
    class_id: &str,
) -> u64 {
    count_prefix(state, &owner_key(owner, class_id, ""))
}
