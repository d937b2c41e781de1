use super::*;

/// True when an edit input actually carries a new value. The empty string is
/// the "no change" sentinel, so an edit can never set a field to the empty
/// string.
pub(crate) fn modified(field: &str) -> bool {
    !field.is_empty()
}

/// Parse an account address stored as a hex string by the legacy layout.
pub(crate) fn parse_account(value: &str) -> LedgerResult<AccountAddress> {
    let raw = hex::decode(value).map_err(|_| LedgerError::InvalidAddress)?;
    ensure!(raw.len() == ACCOUNT_ADDRESS_SIZE, LedgerError::InvalidAddress);
    let mut address = [0u8; ACCOUNT_ADDRESS_SIZE];
    address.copy_from_slice(&raw);
    Ok(AccountAddress(address))
}

pub(crate) fn has_key<S: HasStateApi>(state: &S, key: &[u8]) -> bool {
    state.lookup_entry(key).is_some()
}

pub(crate) fn read_value<S: HasStateApi, V: Deserial>(
    state: &S,
    key: &[u8],
) -> LedgerResult<Option<V>> {
    match state.lookup_entry(key) {
        Some(mut entry) => Ok(Some(V::deserial(&mut entry)?)),
        None => Ok(None),
    }
}

/// Write a value under `key`, replacing any previous value.
pub(crate) fn write_value<S: HasStateApi, V: Serial>(
    state: &mut S,
    key: &[u8],
    value: &V,
) -> LedgerResult<()> {
    let mut entry = state.create_entry(key)?;
    value.serial(&mut entry).map_err(|_| LedgerError::StoreError)
}

/// Delete a key if present. Reports whether an entry was removed.
pub(crate) fn delete_key<S: HasStateApi>(state: &mut S, key: &[u8]) -> LedgerResult<bool> {
    match state.lookup_entry(key) {
        Some(entry) => {
            state.delete_entry(entry)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Ordered scan of every entry under `prefix`, applying the page cursor.
/// `read` maps one raw `(key, entry)` pair into an item. The iterator is
/// released before returning, since the store forbids structural writes under
/// an actively iterated prefix.
pub(crate) fn scan_prefix<S, T, F>(
    state: &S,
    prefix: &[u8],
    page: &PageRequest,
    mut read: F,
) -> LedgerResult<Paged<T>>
where
    S: HasStateApi,
    F: FnMut(&[u8], &mut S::EntryType) -> LedgerResult<T>,
{
    let mut store = state.clone();
    let mut iter = match store.iterator(prefix) {
        Ok(iter) => iter,
        // Nothing stored under this prefix.
        Err(_) => {
            return Ok(Paged {
                items: Vec::new(),
                has_more: false,
            })
        }
    };

    let mut items = Vec::new();
    let mut has_more = false;
    let mut failure = None;
    for mut entry in &mut iter {
        let key = entry.get_key().to_vec();
        if let Some(after) = &page.start_after {
            if key.as_slice() <= after.as_slice() {
                continue;
            }
        }
        if page.limit != 0 && items.len() as u32 >= page.limit {
            has_more = true;
            break;
        }
        match read(&key, &mut entry) {
            Ok(item) => items.push(item),
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }
    store.delete_iterator(iter);

    match failure {
        Some(err) => Err(err),
        None => Ok(Paged { items, has_more }),
    }
}

/// Count every entry under `prefix`.
pub(crate) fn count_prefix<S: HasStateApi>(state: &S, prefix: &[u8]) -> u64 {
    let mut store = state.clone();
    match store.iterator(prefix) {
        Ok(mut iter) => {
            let count = (&mut iter).count() as u64;
            store.delete_iterator(iter);
            count
        }
        Err(_) => 0,
    }
}
