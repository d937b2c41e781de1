use super::*;

pub(crate) fn read_token<S: HasStateApi>(
    state: &S,
    class_id: &str,
    token_id: &str,
) -> LedgerResult<Option<Token>> {
    read_value(state, &token_key(class_id, token_id))
}

pub(crate) fn write_token<S: HasStateApi>(state: &mut S, token: &Token) -> LedgerResult<()> {
    write_value(state, &token_key(&token.class_id, &token.token_id), token)
}

/// Load a token or fail, and check the acting owner against the stored owner.
pub(crate) fn authorize<S: HasStateApi>(
    state: &S,
    class_id: &str,
    token_id: &str,
    owner: &AccountAddress,
) -> LedgerResult<Token> {
    let token = read_token(state, class_id, token_id)?.ok_or(LedgerError::TokenNotFound)?;
    ensure!(token.owner == *owner, LedgerError::Unauthorized);
    Ok(token)
}

/// Tokens of one class in ascending token id order.
pub(crate) fn scan_class_tokens<S: HasStateApi>(
    state: &S,
    class_id: &str,
    page: &PageRequest,
) -> LedgerResult<Paged<Token>> {
    scan_prefix(state, &token_key(class_id, ""), page, |_, entry| {
        Ok(Token::deserial(entry)?)
    })
}

/// Number of tokens minted under a class, counted from the token family.
pub(crate) fn class_supply<S: HasStateApi>(state: &S, class_id: &str) -> u64 {
    count_prefix(state, &token_key(class_id, ""))
}
