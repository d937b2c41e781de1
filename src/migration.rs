use super::*;

/// One shot rewrite of the legacy flat layout into the class partitioned
/// layout.
///
/// Phase 1 walks every legacy class record in ascending key order, deletes its
/// legacy class, class name and supply counter keys, parses the stored
/// creator string and re-issues the class through [`issue_class`]. Phase 2
/// walks the legacy tokens of every migrated class, deletes the legacy token
/// and ownership keys and re-mints through [`mint`], re-boxing the bare
/// metadata string into the tagged envelope. The legacy display name has no
/// slot in the new layout and is dropped.
///
/// The whole run is one atomic unit: the caller must discard the transaction
/// on any error, so a record is either fully rewritten or untouched. A second
/// run over a fully migrated store finds no legacy keys and performs zero
/// writes and deletes. A new layout class id that already exists while its
/// legacy record is still present fails fast with `DuplicateClassId` instead
/// of overwriting.
///
/// It rejects if:
/// - A stored creator or owner string fails to parse (`InvalidAddress`).
/// - A class or token already exists under the new layout
///   (`DuplicateClassId` / `DuplicateTokenId`).
/// - A legacy record fails to decode (`ParseParams`).
pub fn migrate_legacy_store<S: HasStateApi>(state: &mut S) -> LedgerResult<MigrationSummary> {
    let mut summary = MigrationSummary::default();

    let legacy_classes = scan_prefix(state, &legacy_class_key(""), &PageRequest::all(), |_, entry| {
        Ok(LegacyClass::deserial(entry)?)
    })?;

    let mut class_ids = Vec::new();
    for legacy in legacy_classes.items {
        let creator = parse_account(&legacy.creator)?;
        delete_key(state, &legacy_class_key(&legacy.id))?;
        delete_key(state, &legacy_class_name_key(&legacy.name))?;
        delete_key(state, &legacy_collection_key(&legacy.id))?;
        issue_class(
            state,
            Class {
                id: legacy.id.clone(),
                name: legacy.name,
                schema: legacy.schema,
                symbol: legacy.symbol,
                creator,
                mint_restricted: legacy.mint_restricted,
                update_restricted: legacy.update_restricted,
            },
        )?;
        class_ids.push(legacy.id);
        summary.classes += 1;
    }

    for class_id in class_ids {
        let legacy_tokens = scan_prefix(
            state,
            &legacy_token_key(&class_id, ""),
            &PageRequest::all(),
            |_, entry| Ok(LegacyToken::deserial(entry)?),
        )?;
        for legacy in legacy_tokens.items {
            let owner = parse_account(&legacy.owner)?;
            delete_key(state, &legacy_token_key(&class_id, &legacy.token_id))?;
            delete_key(
                state,
                &legacy_owner_key(&legacy.owner, &class_id, &legacy.token_id),
            )?;
            mint(
                state,
                MintParams {
                    class_id: class_id.clone(),
                    token_id: legacy.token_id,
                    uri: legacy.uri,
                    data: TokenData::Text(legacy.data),
                    owner,
                },
            )?;
            summary.tokens += 1;
        }
    }

    Ok(summary)
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const ADDR1: AccountAddress = AccountAddress([1u8; 32]);
    const ADDR2: AccountAddress = AccountAddress([2u8; 32]);

    fn seed_legacy_class(state: &mut TestStateApi, id: &str, name: &str, creator: &AccountAddress) {
        seed_legacy_class_raw(state, id, name, &hex::encode(creator.0));
    }

    fn seed_legacy_class_raw(state: &mut TestStateApi, id: &str, name: &str, creator: &str) {
        let legacy = LegacyClass {
            id: id.into(),
            name: name.into(),
            schema: "{}".into(),
            symbol: "LGC".into(),
            creator: creator.into(),
            mint_restricted: true,
            update_restricted: false,
        };
        write_value(state, &legacy_class_key(id), &legacy).expect_report("seed class");
        write_value(state, &legacy_class_name_key(name), &String::from(id))
            .expect_report("seed name");
        write_value(state, &legacy_collection_key(id), &0u64).expect_report("seed counter");
    }

    fn seed_legacy_token(
        state: &mut TestStateApi,
        class_id: &str,
        token_id: &str,
        owner: &AccountAddress,
    ) {
        let owner_hex = hex::encode(owner.0);
        let legacy = LegacyToken {
            token_id: token_id.into(),
            name: "old display name".into(),
            uri: "ipfs://legacy".into(),
            data: "legacy meta".into(),
            owner: owner_hex.clone(),
        };
        write_value(state, &legacy_token_key(class_id, token_id), &legacy)
            .expect_report("seed token");
        write_value(state, &legacy_owner_key(&owner_hex, class_id, token_id), &())
            .expect_report("seed owner entry");
        let counter_key = legacy_collection_key(class_id);
        let count: u64 = read_value(state, &counter_key)
            .expect_report("read counter")
            .unwrap_or(0);
        write_value(state, &counter_key, &(count + 1)).expect_report("bump counter");
    }

    fn claim_no_legacy_keys(state: &TestStateApi) {
        claim_eq!(count_prefix(state, &legacy_class_key("")), 0);
        claim_eq!(count_prefix(state, &legacy_class_name_key("")), 0);
        claim_eq!(count_prefix(state, &legacy_collection_key("")), 0);
        claim_eq!(count_prefix(state, &legacy_token_key("", "")), 0);
        claim_eq!(count_prefix(state, &legacy_owner_key("", "", "")), 0);
    }

    #[concordium_test]
    fn migrates_the_flat_layout_in_one_pass() {
        let mut state = TestStateApi::new();
        seed_legacy_class(&mut state, "d1", "Denom One", &ADDR1);
        seed_legacy_token(&mut state, "d1", "t1", &ADDR1);
        seed_legacy_token(&mut state, "d1", "t2", &ADDR2);

        let summary = migrate_legacy_store(&mut state).expect_report("migrate");
        claim_eq!(
            summary,
            MigrationSummary {
                classes: 1,
                tokens: 2,
            }
        );

        let class = get_class(&state, "d1").expect_report("migrated class");
        claim_eq!(class.name, "Denom One");
        claim_eq!(class.creator, ADDR1);
        claim!(class.mint_restricted);

        let t1 = get_token(&state, "d1", "t1").expect_report("migrated t1");
        claim_eq!(t1.owner, ADDR1);
        claim_eq!(t1.uri(), "ipfs://legacy");
        claim_eq!(t1.data(), &TokenData::Text("legacy meta".into()));
        let t2 = get_token(&state, "d1", "t2").expect_report("migrated t2");
        claim_eq!(t2.owner, ADDR2);

        claim_eq!(total_supply(&state, "d1"), 2);
        claim_eq!(
            list_by_owner(&state, &ADDR2, &PageRequest::all())
                .expect_report("list addr2")
                .items,
            vec![("d1".to_string(), "t2".to_string())]
        );

        claim_no_legacy_keys(&state);
    }

    #[concordium_test]
    fn second_run_is_a_no_op() {
        let mut state = TestStateApi::new();
        seed_legacy_class(&mut state, "d1", "Denom One", &ADDR1);
        seed_legacy_token(&mut state, "d1", "t1", &ADDR1);
        migrate_legacy_store(&mut state).expect_report("first run");

        let summary = migrate_legacy_store(&mut state).expect_report("second run");
        claim_eq!(summary, MigrationSummary::default());
        claim_eq!(total_supply(&state, "d1"), 1);
        claim_no_legacy_keys(&state);
    }

    #[concordium_test]
    fn migrates_classes_in_ascending_key_order() {
        let mut state = TestStateApi::new();
        seed_legacy_class(&mut state, "zeta", "Zeta", &ADDR1);
        seed_legacy_class(&mut state, "alpha", "Alpha", &ADDR1);
        seed_legacy_token(&mut state, "zeta", "z1", &ADDR2);

        let summary = migrate_legacy_store(&mut state).expect_report("migrate");
        claim_eq!(summary.classes, 2);
        claim_eq!(summary.tokens, 1);

        let listed = list_classes(&state, &PageRequest::all()).expect_report("list");
        let ids: Vec<&str> = listed.items.iter().map(|class| class.id.as_str()).collect();
        claim_eq!(ids, vec!["alpha", "zeta"]);
    }

    #[concordium_test]
    fn bad_legacy_address_aborts_the_run() {
        let mut state = TestStateApi::new();
        seed_legacy_class_raw(&mut state, "d1", "Denom One", "not-hex-at-all");
        claim_eq!(
            migrate_legacy_store(&mut state),
            Err(LedgerError::InvalidAddress)
        );
    }

    #[concordium_test]
    fn short_legacy_address_aborts_the_run() {
        let mut state = TestStateApi::new();
        // Valid hex, wrong length.
        seed_legacy_class_raw(&mut state, "d1", "Denom One", "deadbeef");
        claim_eq!(
            migrate_legacy_store(&mut state),
            Err(LedgerError::InvalidAddress)
        );
    }

    #[concordium_test]
    fn conflicting_new_layout_class_fails_fast() {
        let mut state = TestStateApi::new();
        issue_class(
            &mut state,
            Class {
                id: "d1".into(),
                name: "Already Here".into(),
                schema: "".into(),
                symbol: "X".into(),
                creator: ADDR1,
                mint_restricted: false,
                update_restricted: false,
            },
        )
        .expect_report("pre-existing class");
        seed_legacy_class(&mut state, "d1", "Denom One", &ADDR1);

        claim_eq!(
            migrate_legacy_store(&mut state),
            Err(LedgerError::DuplicateClassId)
        );
    }
}
