use super::*;

/// Issue a new class. No token or ownership entries are touched.
///
/// It rejects if:
/// - The class id is already taken (`DuplicateClassId`).
/// - The class name is already taken (`DuplicateClassName`).
pub fn issue_class<S: HasStateApi>(state: &mut S, class: Class) -> LedgerResult<()> {
    ensure!(
        !has_key(state, &class_key(&class.id)),
        LedgerError::DuplicateClassId
    );
    ensure!(
        !has_key(state, &class_name_key(&class.name)),
        LedgerError::DuplicateClassName
    );
    write_class(state, &class)
}

/// Look up a single class.
pub fn get_class<S: HasStateApi>(state: &S, id: &str) -> LedgerResult<Class> {
    read_class(state, id)?.ok_or(LedgerError::ClassNotFound)
}

pub fn has_class<S: HasStateApi>(state: &S, id: &str) -> bool {
    has_key(state, &class_key(id))
}

/// All classes in ascending id order.
pub fn list_classes<S: HasStateApi>(state: &S, page: &PageRequest) -> LedgerResult<Paged<Class>> {
    scan_classes(state, page)
}

/// Hand the class over to a new creator. Token ownership is untouched and the
/// name index needs no rewrite since the name is immutable.
///
/// It rejects if:
/// - The class does not exist (`ClassNotFound`).
/// - The stored creator differs from `expected_creator` (`Unauthorized`).
pub fn transfer_class_owner<S: HasStateApi>(
    state: &mut S,
    id: &str,
    expected_creator: &AccountAddress,
    new_creator: &AccountAddress,
) -> LedgerResult<()> {
    let mut class = get_class(state, id)?;
    ensure!(class.creator == *expected_creator, LedgerError::Unauthorized);
    class.creator = *new_creator;
    write_value(state, &class_key(id), &class)
}

/// Mint a token. The token record and its ownership index entry are written in
/// the same atomic unit, so a reader can never observe one without the other.
///
/// It rejects if:
/// - The class does not exist (`ClassNotFound`).
/// - The token id is already taken within the class (`DuplicateTokenId`).
pub fn mint<S: HasStateApi>(state: &mut S, params: MintParams) -> LedgerResult<()> {
    ensure!(
        has_class(state, &params.class_id),
        LedgerError::ClassNotFound
    );
    ensure!(
        !has_key(state, &token_key(&params.class_id, &params.token_id)),
        LedgerError::DuplicateTokenId
    );

    let token = Token {
        class_id: params.class_id,
        token_id: params.token_id,
        uri: params.uri,
        data: params.data,
        owner: params.owner,
    };
    write_token(state, &token)?;
    add_owner_entry(state, &token.owner, &token.class_id, &token.token_id)
}

/// Update the mutable fields of a token. A field whose input is the empty
/// string is left untouched, so an edit cannot clear a field.
///
/// It rejects if:
/// - The token does not exist (`TokenNotFound`).
/// - The class forbids edits for everyone (`UpdateRestricted`).
/// - `owner` is not the current owner of the token (`Unauthorized`).
pub fn edit<S: HasStateApi>(
    state: &mut S,
    params: EditParams,
    owner: &AccountAddress,
) -> LedgerResult<()> {
    let mut token =
        read_token(state, &params.class_id, &params.token_id)?.ok_or(LedgerError::TokenNotFound)?;
    let class = get_class(state, &params.class_id)?;
    ensure!(!class.update_restricted, LedgerError::UpdateRestricted);
    ensure!(token.owner == *owner, LedgerError::Unauthorized);

    if modified(&params.uri) {
        token.uri = params.uri;
    }
    if modified(&params.data) {
        token.data = TokenData::Text(params.data);
    }
    write_token(state, &token)
}

/// Transfer a token to a new owner. The owner field and the ownership index
/// entry move in the same atomic unit, remove then insert.
///
/// It rejects if:
/// - The token does not exist (`TokenNotFound`).
/// - `from` is not the current owner of the token (`Unauthorized`).
pub fn transfer<S: HasStateApi>(
    state: &mut S,
    class_id: &str,
    token_id: &str,
    from: &AccountAddress,
    to: &AccountAddress,
) -> LedgerResult<()> {
    let mut token = authorize(state, class_id, token_id, from)?;
    token.owner = *to;
    write_token(state, &token)?;
    remove_owner_entry(state, from, class_id, token_id)?;
    add_owner_entry(state, to, class_id, token_id)
}

/// Destroy a token. The token record and its ownership index entry are
/// removed in the same atomic unit.
///
/// It rejects if:
/// - The token does not exist (`TokenNotFound`).
/// - `owner` is not the current owner of the token (`Unauthorized`).
pub fn burn<S: HasStateApi>(
    state: &mut S,
    class_id: &str,
    token_id: &str,
    owner: &AccountAddress,
) -> LedgerResult<()> {
    authorize(state, class_id, token_id, owner)?;
    delete_key(state, &token_key(class_id, token_id))?;
    remove_owner_entry(state, owner, class_id, token_id)
}

/// Look up a single token.
pub fn get_token<S: HasStateApi>(
    state: &S,
    class_id: &str,
    token_id: &str,
) -> LedgerResult<Token> {
    read_token(state, class_id, token_id)?.ok_or(LedgerError::TokenNotFound)
}

pub fn has_token<S: HasStateApi>(state: &S, class_id: &str, token_id: &str) -> bool {
    has_key(state, &token_key(class_id, token_id))
}

/// Tokens of one class in ascending token id order. Empty when the class is
/// unknown or has no tokens.
pub fn list_by_class<S: HasStateApi>(
    state: &S,
    class_id: &str,
    page: &PageRequest,
) -> LedgerResult<Paged<Token>> {
    scan_class_tokens(state, class_id, page)
}

/// `(class_id, token_id)` pairs held by `owner` in ascending key order.
pub fn list_by_owner<S: HasStateApi>(
    state: &S,
    owner: &AccountAddress,
    page: &PageRequest,
) -> LedgerResult<Paged<(ClassId, TokenId)>> {
    scan_owner(state, owner, "", page)
}

/// Like [`list_by_owner`], narrowed to one class.
pub fn list_by_owner_and_class<S: HasStateApi>(
    state: &S,
    owner: &AccountAddress,
    class_id: &str,
    page: &PageRequest,
) -> LedgerResult<Paged<(ClassId, TokenId)>> {
    scan_owner(state, owner, class_id, page)
}

/// Number of tokens minted under a class. Counted by index scan, there is no
/// stored counter.
pub fn total_supply<S: HasStateApi>(state: &S, class_id: &str) -> u64 {
    class_supply(state, class_id)
}

/// Number of tokens of a class held by one account.
pub fn total_supply_of_owner<S: HasStateApi>(
    state: &S,
    class_id: &str,
    owner: &AccountAddress,
) -> u64 {
    owner_supply(state, owner, class_id)
}

/// One page of an account's holdings grouped by class. Groups appear in the
/// order their class first shows up within the scanned page, not globally
/// sorted.
pub fn owner_summary<S: HasStateApi>(
    state: &S,
    owner: &AccountAddress,
    page: &PageRequest,
) -> LedgerResult<Owner> {
    let paged = list_by_owner(state, owner, page)?;
    let mut collections: Vec<IdCollection> = Vec::new();
    for (class_id, token_id) in paged.items {
        match collections
            .iter_mut()
            .find(|collection| collection.class_id == class_id)
        {
            Some(collection) => collection.token_ids.push(token_id),
            None => collections.push(IdCollection {
                class_id,
                token_ids: vec![token_id],
            }),
        }
    }
    Ok(Owner {
        address: *owner,
        collections,
    })
}

/// A class together with one page of its tokens.
///
/// It rejects if the class does not exist (`ClassNotFound`); a class without
/// tokens yields an empty page.
pub fn get_collection<S: HasStateApi>(
    state: &S,
    class_id: &str,
    page: &PageRequest,
) -> LedgerResult<Collection> {
    let class = get_class(state, class_id)?;
    let tokens = list_by_class(state, class_id, page)?;
    Ok(Collection {
        class,
        tokens: tokens.items,
        has_more: tokens.has_more,
    })
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const ALICE: AccountAddress = AccountAddress([1u8; 32]);
    const BOB: AccountAddress = AccountAddress([2u8; 32]);
    const CAROL: AccountAddress = AccountAddress([3u8; 32]);

    fn class(id: &str, name: &str, update_restricted: bool) -> Class {
        Class {
            id: id.into(),
            name: name.into(),
            schema: "".into(),
            symbol: "TST".into(),
            creator: ALICE,
            mint_restricted: false,
            update_restricted,
        }
    }

    fn mint_params(class_id: &str, token_id: &str, owner: AccountAddress) -> MintParams {
        MintParams {
            class_id: class_id.into(),
            token_id: token_id.into(),
            uri: "ipfs://x".into(),
            data: TokenData::Text("meta".into()),
            owner,
        }
    }

    /// The ownership index read back for each account must equal exactly the
    /// owner fields of the token records.
    fn claim_index_consistent(state: &TestStateApi, class_ids: &[&str]) {
        let mut expected: Vec<(AccountAddress, String, String)> = Vec::new();
        for class_id in class_ids {
            let tokens = list_by_class(state, class_id, &PageRequest::all())
                .expect_report("list_by_class");
            for token in tokens.items {
                expected.push((token.owner, token.class_id, token.token_id));
            }
        }
        for owner in [ALICE, BOB, CAROL].iter() {
            let mut wanted: Vec<(String, String)> = expected
                .iter()
                .filter(|(account, _, _)| account == owner)
                .map(|(_, class_id, token_id)| (class_id.clone(), token_id.clone()))
                .collect();
            wanted.sort();
            let listed = list_by_owner(state, owner, &PageRequest::all())
                .expect_report("list_by_owner")
                .items;
            claim_eq!(listed, wanted);
        }
    }

    #[concordium_test]
    fn issue_class_enforces_unique_id_and_name() {
        let mut state = TestStateApi::new();
        issue_class(&mut state, class("kitties", "Kitties", false)).expect_report("issue");

        claim!(has_class(&state, "kitties"));
        let stored = get_class(&state, "kitties").expect_report("get_class");
        claim_eq!(stored, class("kitties", "Kitties", false));

        claim_eq!(
            issue_class(&mut state, class("kitties", "Other", false)),
            Err(LedgerError::DuplicateClassId)
        );
        claim_eq!(
            issue_class(&mut state, class("doggies", "Kitties", false)),
            Err(LedgerError::DuplicateClassName)
        );
        claim_eq!(
            get_class(&state, "doggies"),
            Err(LedgerError::ClassNotFound)
        );
    }

    #[concordium_test]
    fn list_classes_is_ordered_by_id() {
        let mut state = TestStateApi::new();
        issue_class(&mut state, class("beta", "Beta", false)).expect_report("issue beta");
        issue_class(&mut state, class("alpha", "Alpha", false)).expect_report("issue alpha");

        let listed = list_classes(&state, &PageRequest::all()).expect_report("list_classes");
        let ids: Vec<&str> = listed.items.iter().map(|class| class.id.as_str()).collect();
        claim_eq!(ids, vec!["alpha", "beta"]);
        claim!(!listed.has_more);
    }

    #[concordium_test]
    fn transfer_class_owner_checks_the_stored_creator() {
        let mut state = TestStateApi::new();
        claim_eq!(
            transfer_class_owner(&mut state, "kitties", &ALICE, &BOB),
            Err(LedgerError::ClassNotFound)
        );

        issue_class(&mut state, class("kitties", "Kitties", false)).expect_report("issue");
        mint(&mut state, mint_params("kitties", "cat1", ALICE)).expect_report("mint");

        claim_eq!(
            transfer_class_owner(&mut state, "kitties", &BOB, &CAROL),
            Err(LedgerError::Unauthorized)
        );
        transfer_class_owner(&mut state, "kitties", &ALICE, &BOB).expect_report("transfer class");

        let stored = get_class(&state, "kitties").expect_report("get_class");
        claim_eq!(stored.creator, BOB);
        // Token ownership is untouched by a class handover.
        claim_eq!(
            get_token(&state, "kitties", "cat1").expect_report("get_token").owner,
            ALICE
        );
    }

    #[concordium_test]
    fn mint_requires_class_and_fresh_token_id() {
        let mut state = TestStateApi::new();
        claim_eq!(
            mint(&mut state, mint_params("kitties", "cat1", ALICE)),
            Err(LedgerError::ClassNotFound)
        );

        issue_class(&mut state, class("kitties", "Kitties", false)).expect_report("issue");
        mint(&mut state, mint_params("kitties", "cat1", ALICE)).expect_report("mint");
        claim_eq!(
            mint(&mut state, mint_params("kitties", "cat1", BOB)),
            Err(LedgerError::DuplicateTokenId)
        );
        claim_index_consistent(&state, &["kitties"]);
    }

    #[concordium_test]
    fn ownership_follows_transfer_and_burn() {
        let mut state = TestStateApi::new();
        issue_class(&mut state, class("kitties", "Kitties", false)).expect_report("issue");
        mint(&mut state, mint_params("kitties", "cat1", ALICE)).expect_report("mint");

        transfer(&mut state, "kitties", "cat1", &ALICE, &BOB).expect_report("transfer");
        claim!(list_by_owner(&state, &ALICE, &PageRequest::all())
            .expect_report("list alice")
            .items
            .is_empty());
        claim_eq!(
            list_by_owner(&state, &BOB, &PageRequest::all())
                .expect_report("list bob")
                .items,
            vec![("kitties".to_string(), "cat1".to_string())]
        );
        claim_index_consistent(&state, &["kitties"]);

        // The previous owner lost every right over the token.
        claim_eq!(
            burn(&mut state, "kitties", "cat1", &ALICE),
            Err(LedgerError::Unauthorized)
        );
        burn(&mut state, "kitties", "cat1", &BOB).expect_report("burn");

        claim_eq!(total_supply(&state, "kitties"), 0);
        claim_eq!(
            get_token(&state, "kitties", "cat1"),
            Err(LedgerError::TokenNotFound)
        );
        claim!(!has_token(&state, "kitties", "cat1"));
        claim_index_consistent(&state, &["kitties"]);
    }

    #[concordium_test]
    fn supply_counts_follow_the_records() {
        let mut state = TestStateApi::new();
        issue_class(&mut state, class("kitties", "Kitties", false)).expect_report("issue");
        issue_class(&mut state, class("doggies", "Doggies", false)).expect_report("issue");
        mint(&mut state, mint_params("kitties", "cat1", ALICE)).expect_report("mint");
        mint(&mut state, mint_params("kitties", "cat2", ALICE)).expect_report("mint");
        mint(&mut state, mint_params("kitties", "cat3", BOB)).expect_report("mint");
        mint(&mut state, mint_params("doggies", "dog1", ALICE)).expect_report("mint");

        claim_eq!(total_supply(&state, "kitties"), 3);
        claim_eq!(total_supply(&state, "doggies"), 1);
        claim_eq!(total_supply(&state, "birdies"), 0);
        claim_eq!(total_supply_of_owner(&state, "kitties", &ALICE), 2);
        claim_eq!(total_supply_of_owner(&state, "kitties", &BOB), 1);
        claim_eq!(total_supply_of_owner(&state, "doggies", &BOB), 0);

        transfer(&mut state, "kitties", "cat1", &ALICE, &BOB).expect_report("transfer");
        claim_eq!(total_supply(&state, "kitties"), 3);
        claim_eq!(total_supply_of_owner(&state, "kitties", &ALICE), 1);
        claim_eq!(total_supply_of_owner(&state, "kitties", &BOB), 2);
        claim_index_consistent(&state, &["kitties", "doggies"]);
    }

    #[concordium_test]
    fn edit_leaves_sentinel_fields_untouched() {
        let mut state = TestStateApi::new();
        issue_class(&mut state, class("kitties", "Kitties", false)).expect_report("issue");
        mint(&mut state, mint_params("kitties", "cat1", ALICE)).expect_report("mint");

        edit(
            &mut state,
            EditParams {
                class_id: "kitties".into(),
                token_id: "cat1".into(),
                uri: "".into(),
                data: "richer meta".into(),
            },
            &ALICE,
        )
        .expect_report("edit data");
        let token = get_token(&state, "kitties", "cat1").expect_report("get_token");
        claim_eq!(token.uri(), "ipfs://x");
        claim_eq!(token.data(), &TokenData::Text("richer meta".into()));

        // Both fields on the sentinel: a full no-op.
        edit(
            &mut state,
            EditParams {
                class_id: "kitties".into(),
                token_id: "cat1".into(),
                uri: "".into(),
                data: "".into(),
            },
            &ALICE,
        )
        .expect_report("edit nothing");
        claim_eq!(
            get_token(&state, "kitties", "cat1").expect_report("get_token"),
            token
        );

        claim_eq!(
            edit(
                &mut state,
                EditParams {
                    class_id: "kitties".into(),
                    token_id: "cat1".into(),
                    uri: "ipfs://y".into(),
                    data: "".into(),
                },
                &BOB,
            ),
            Err(LedgerError::Unauthorized)
        );
        claim_eq!(
            edit(
                &mut state,
                EditParams {
                    class_id: "kitties".into(),
                    token_id: "cat9".into(),
                    uri: "ipfs://y".into(),
                    data: "".into(),
                },
                &ALICE,
            ),
            Err(LedgerError::TokenNotFound)
        );
    }

    #[concordium_test]
    fn update_restricted_blocks_edit_but_not_transfer_or_burn() {
        let mut state = TestStateApi::new();
        issue_class(&mut state, class("sealed", "Sealed", true)).expect_report("issue");
        mint(&mut state, mint_params("sealed", "t1", ALICE)).expect_report("mint");

        // Nobody can edit, the owner included.
        claim_eq!(
            edit(
                &mut state,
                EditParams {
                    class_id: "sealed".into(),
                    token_id: "t1".into(),
                    uri: "ipfs://y".into(),
                    data: "".into(),
                },
                &ALICE,
            ),
            Err(LedgerError::UpdateRestricted)
        );

        transfer(&mut state, "sealed", "t1", &ALICE, &BOB).expect_report("transfer");
        burn(&mut state, "sealed", "t1", &BOB).expect_report("burn");
        claim_eq!(total_supply(&state, "sealed"), 0);
    }

    #[concordium_test]
    fn pagination_walks_a_class_in_stable_order() {
        let mut state = TestStateApi::new();
        issue_class(&mut state, class("kitties", "Kitties", false)).expect_report("issue");
        for token_id in ["cat1", "cat2", "cat3", "cat4", "cat5"] {
            mint(&mut state, mint_params("kitties", token_id, ALICE)).expect_report("mint");
        }

        let mut collected: Vec<String> = Vec::new();
        let mut page = PageRequest::first(2);
        loop {
            let result =
                list_by_class(&state, "kitties", &page).expect_report("list_by_class page");
            for token in &result.items {
                collected.push(token.token_id.clone());
            }
            if !result.has_more {
                break;
            }
            let last = result.items.last().expect_report("non-empty page");
            page = PageRequest::after(token_key("kitties", &last.token_id), 2);
        }
        claim_eq!(collected, vec!["cat1", "cat2", "cat3", "cat4", "cat5"]);
    }

    #[concordium_test]
    fn owner_summary_groups_by_first_appearance() {
        let mut state = TestStateApi::new();
        issue_class(&mut state, class("alpha", "Alpha", false)).expect_report("issue");
        issue_class(&mut state, class("beta", "Beta", false)).expect_report("issue");
        mint(&mut state, mint_params("beta", "b1", ALICE)).expect_report("mint");
        mint(&mut state, mint_params("alpha", "a2", ALICE)).expect_report("mint");
        mint(&mut state, mint_params("alpha", "a1", ALICE)).expect_report("mint");

        let summary =
            owner_summary(&state, &ALICE, &PageRequest::all()).expect_report("owner_summary");
        claim_eq!(summary.address, ALICE);
        claim_eq!(
            summary.collections,
            vec![
                IdCollection {
                    class_id: "alpha".into(),
                    token_ids: vec!["a1".into(), "a2".into()],
                },
                IdCollection {
                    class_id: "beta".into(),
                    token_ids: vec!["b1".into()],
                },
            ]
        );
    }

    #[concordium_test]
    fn get_collection_pairs_the_class_with_its_tokens() {
        let mut state = TestStateApi::new();
        claim_eq!(
            get_collection(&state, "kitties", &PageRequest::all()),
            Err(LedgerError::ClassNotFound)
        );

        issue_class(&mut state, class("kitties", "Kitties", false)).expect_report("issue");
        let empty =
            get_collection(&state, "kitties", &PageRequest::all()).expect_report("collection");
        claim!(empty.tokens.is_empty());

        mint(&mut state, mint_params("kitties", "cat1", ALICE)).expect_report("mint");
        let collection =
            get_collection(&state, "kitties", &PageRequest::all()).expect_report("collection");
        claim_eq!(collection.class.id, "kitties");
        claim_eq!(collection.tokens.len(), 1);
        claim!(!collection.has_more);
    }
}
