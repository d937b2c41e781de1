use super::*;

/// Storage key of a class record.
pub fn class_key(id: &str) -> Vec<u8> {
    family_key(CLASS_FAMILY, id)
}

/// Storage key of the class name uniqueness index entry for `name`.
pub fn class_name_key(name: &str) -> Vec<u8> {
    family_key(CLASS_NAME_FAMILY, name)
}

/// Storage key of a token under its class.
///
/// Empty trailing components truncate the key to the enclosing scan prefix:
/// `token_key(class, "")` is the prefix of exactly the tokens of `class`, and
/// `token_key("", "")` covers the whole family.
pub fn token_key(class_id: &str, token_id: &str) -> Vec<u8> {
    nested_key(TOKEN_FAMILY, class_id, token_id)
}

/// Storage key of an ownership index entry.
///
/// The owner address is a fixed width segment since raw address bytes may
/// contain the delimiter. Class and token ids must not contain it; that is a
/// caller side invariant, not enforced here. As with [`token_key`], empty
/// trailing components yield the scan prefix of the enclosing group.
pub fn owner_key(owner: &AccountAddress, class_id: &str, token_id: &str) -> Vec<u8> {
    let mut key = vec![OWNER_FAMILY];
    key.extend_from_slice(KEY_DELIMITER);
    key.extend_from_slice(&owner.0);
    key.extend_from_slice(KEY_DELIMITER);
    push_nested(&mut key, class_id, token_id);
    key
}

/// Extract `(class_id, token_id)` back out of a token key.
pub fn decode_token_key(key: &[u8]) -> LedgerResult<(ClassId, TokenId)> {
    let rest = strip_family(key, TOKEN_FAMILY)?;
    match split_segments(rest).as_slice() {
        &[class_id, token_id] => Ok((decode_segment(class_id)?, decode_segment(token_id)?)),
        _ => Err(LedgerError::MalformedKey),
    }
}

/// Extract `(owner, class_id, token_id)` back out of an ownership index key.
pub fn decode_owner_key(key: &[u8]) -> LedgerResult<(AccountAddress, ClassId, TokenId)> {
    let rest = strip_family(key, OWNER_FAMILY)?;
    ensure!(
        rest.len() > ACCOUNT_ADDRESS_SIZE + KEY_DELIMITER.len(),
        LedgerError::MalformedKey
    );
    let (raw_address, rest) = rest.split_at(ACCOUNT_ADDRESS_SIZE);
    ensure!(rest.starts_with(KEY_DELIMITER), LedgerError::MalformedKey);

    let mut address = [0u8; ACCOUNT_ADDRESS_SIZE];
    address.copy_from_slice(raw_address);

    match split_segments(&rest[KEY_DELIMITER.len()..]).as_slice() {
        &[class_id, token_id] => Ok((
            AccountAddress(address),
            decode_segment(class_id)?,
            decode_segment(token_id)?,
        )),
        _ => Err(LedgerError::MalformedKey),
    }
}

/// Storage key of a class record in the legacy flat layout.
pub fn legacy_class_key(id: &str) -> Vec<u8> {
    family_key(LEGACY_CLASS_FAMILY, id)
}

/// Storage key of a class name index entry in the legacy flat layout.
pub fn legacy_class_name_key(name: &str) -> Vec<u8> {
    family_key(LEGACY_CLASS_NAME_FAMILY, name)
}

/// Storage key of the legacy per class supply counter.
pub fn legacy_collection_key(id: &str) -> Vec<u8> {
    family_key(LEGACY_COLLECTION_FAMILY, id)
}

/// Storage key of a token record in the legacy flat layout.
pub fn legacy_token_key(class_id: &str, token_id: &str) -> Vec<u8> {
    nested_key(LEGACY_TOKEN_FAMILY, class_id, token_id)
}

/// Storage key of an ownership entry in the legacy flat layout. The owner is
/// the hex string stored in the legacy record.
pub fn legacy_owner_key(owner: &str, class_id: &str, token_id: &str) -> Vec<u8> {
    let mut key = vec![LEGACY_OWNER_FAMILY];
    key.extend_from_slice(KEY_DELIMITER);
    if !owner.is_empty() {
        key.extend_from_slice(owner.as_bytes());
        key.extend_from_slice(KEY_DELIMITER);
        push_nested(&mut key, class_id, token_id);
    }
    key
}

fn family_key(family: u8, component: &str) -> Vec<u8> {
    let mut key = vec![family];
    key.extend_from_slice(KEY_DELIMITER);
    key.extend_from_slice(component.as_bytes());
    key
}

fn nested_key(family: u8, class_id: &str, token_id: &str) -> Vec<u8> {
    let mut key = vec![family];
    key.extend_from_slice(KEY_DELIMITER);
    push_nested(&mut key, class_id, token_id);
    key
}

fn push_nested(key: &mut Vec<u8>, class_id: &str, token_id: &str) {
    if !class_id.is_empty() {
        key.extend_from_slice(class_id.as_bytes());
        key.extend_from_slice(KEY_DELIMITER);
        if !token_id.is_empty() {
            key.extend_from_slice(token_id.as_bytes());
        }
    }
}

fn strip_family(key: &[u8], family: u8) -> LedgerResult<&[u8]> {
    ensure!(
        key.len() > 1 + KEY_DELIMITER.len() && key[0] == family && key[1..].starts_with(KEY_DELIMITER),
        LedgerError::MalformedKey
    );
    Ok(&key[1 + KEY_DELIMITER.len()..])
}

fn split_segments(rest: &[u8]) -> Vec<&[u8]> {
    rest.split(|byte| *byte == KEY_DELIMITER[0]).collect()
}

fn decode_segment(segment: &[u8]) -> LedgerResult<String> {
    core::str::from_utf8(segment)
        .map(String::from)
        .map_err(|_| LedgerError::MalformedKey)
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    const OWNER: AccountAddress = AccountAddress([7u8; 32]);

    #[concordium_test]
    fn token_key_round_trips() {
        let key = token_key("kitties", "cat1");
        let (class_id, token_id) = decode_token_key(&key).expect_report("token key decodes");
        claim_eq!(class_id, "kitties");
        claim_eq!(token_id, "cat1");
    }

    #[concordium_test]
    fn owner_key_round_trips() {
        let key = owner_key(&OWNER, "kitties", "cat1");
        let (owner, class_id, token_id) =
            decode_owner_key(&key).expect_report("owner key decodes");
        claim_eq!(owner, OWNER);
        claim_eq!(class_id, "kitties");
        claim_eq!(token_id, "cat1");
    }

    #[concordium_test]
    fn class_prefix_covers_only_its_own_tokens() {
        let prefix = token_key("kit", "");
        claim!(token_key("kit", "cat1").starts_with(&prefix));
        // "kit" is a prefix of "kitties" as a string, but the trailing
        // delimiter keeps the scan ranges apart.
        claim!(!token_key("kitties", "cat1").starts_with(&prefix));
    }

    #[concordium_test]
    fn owner_prefix_narrows_by_class() {
        let all = owner_key(&OWNER, "", "");
        let by_class = owner_key(&OWNER, "kitties", "");
        let full = owner_key(&OWNER, "kitties", "cat1");
        claim!(by_class.starts_with(&all));
        claim!(full.starts_with(&by_class));
        claim!(!owner_key(&AccountAddress([8u8; 32]), "kitties", "cat1").starts_with(&all));
    }

    #[concordium_test]
    fn malformed_keys_are_rejected() {
        // One segment where two are expected.
        claim_eq!(
            decode_token_key(b"\x01/kitties"),
            Err(LedgerError::MalformedKey)
        );
        // Wrong family tag.
        claim_eq!(
            decode_owner_key(&token_key("kitties", "cat1")),
            Err(LedgerError::MalformedKey)
        );
        // Too short to carry an address.
        claim_eq!(
            decode_owner_key(&[OWNER_FAMILY, b'/']),
            Err(LedgerError::MalformedKey)
        );
        // A delimiter inside a component shifts the segment count.
        claim_eq!(
            decode_token_key(&token_key("kit/ties", "cat1")),
            Err(LedgerError::MalformedKey)
        );
    }
}
