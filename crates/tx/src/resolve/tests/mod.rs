// Path: crates/tx/src/resolve/tests/mod.rs
use super::*;
use cryptonym_test_utils::fixtures::test_identity;
use cryptonym_test_utils::mock::MockChain;
use std::sync::atomic::Ordering;

fn table_with(name: &str, ty: &str, mode: GenerationMode) -> FieldSpecTable {
    let t = FieldSpecTable::new("fio.token", "trnsfiopubky");
    t.append(name, ty);
    t.update_mode(name, mode);
    t
}

async fn resolve_one(t: &FieldSpecTable, name: &str) -> Result<FieldSpec, PayloadError> {
    let chain = MockChain::with_test_identity();
    generate_payloads(t, &test_identity(), &chain).await?;
    Ok(t.get(name).unwrap())
}

#[tokio::test]
async fn fio_to_suf_strips_separators() {
    let t = table_with("amount", "int64", GenerationMode::FormValue(FormVariant::FioToSuf));
    t.update_input("amount", "1,000.5");
    let f = resolve_one(&t, "amount").await.unwrap();
    assert_eq!(f.value, Some(FieldValue::Uint(1_000_500_000_000)));
    assert!(f.emit_raw);

    t.update_input("amount", "10_000");
    let f = resolve_one(&t, "amount").await.unwrap();
    assert_eq!(f.value, Some(FieldValue::Uint(10_000_000_000_000)));
}

#[tokio::test]
async fn as_is_parses_by_declared_type() {
    let t = table_with("n", "uint64", GenerationMode::FormValue(FormVariant::AsIs));
    t.update_input("n", "18446744073709551615");
    let f = resolve_one(&t, "n").await.unwrap();
    assert_eq!(f.value, Some(FieldValue::Uint(u64::MAX)));

    t.update_input("n", "not a number");
    let err = resolve_one(&t, "n").await.unwrap_err();
    assert_eq!(err.field(), "n");

    let t = table_with("memo", "string", GenerationMode::FormValue(FormVariant::AsIs));
    t.update_input("memo", "say \"hi\"");
    let f = resolve_one(&t, "memo").await.unwrap();
    assert_eq!(f.value.unwrap().to_json_fragment(f.emit_raw), r#""say \"hi\"""#);
}

#[tokio::test]
async fn slice_input_is_split_and_trimmed() {
    let t = table_with("owners", "name[]", GenerationMode::FormValue(FormVariant::AsIs));
    t.update_input("owners", " alice, bob ,carol");
    let f = resolve_one(&t, "owners").await.unwrap();
    assert!(f.is_slice);
    assert_eq!(f.values, vec!["alice", "bob", "carol"]);
}

#[tokio::test]
async fn json_to_struct_is_emitted_whole() {
    let t = table_with(
        "public_addresses",
        "tokenpubaddr[]",
        GenerationMode::FormValue(FormVariant::JsonToStruct),
    );
    t.update_input("public_addresses", r#"[{"token_code":"FIO"}]"#);
    let f = resolve_one(&t, "public_addresses").await.unwrap();
    assert!(!f.is_slice);
    assert!(f.emit_raw);
    assert_eq!(f.value, Some(FieldValue::Raw(r#"[{"token_code":"FIO"}]"#.into())));
}

#[tokio::test]
async fn bad_hex_is_a_field_error() {
    let t = table_with("data", "bytes", GenerationMode::FormValue(FormVariant::HexToBytes));
    t.update_input("data", "zz");
    assert_eq!(resolve_one(&t, "data").await.unwrap_err().field(), "data");

    t.update_input("data", "c0ffee");
    let f = resolve_one(&t, "data").await.unwrap();
    assert_eq!(f.value, Some(FieldValue::Bytes(vec![0xc0, 0xff, 0xee])));
}

#[tokio::test]
async fn identity_modes_use_the_signer() {
    let id = test_identity();
    let t = table_with("actor", "name", GenerationMode::ActorDerived(IdentityVariant::Mine));
    t.append("payee_public_key", "string");
    t.update_mode(
        "payee_public_key",
        GenerationMode::PubKeyDerived(IdentityVariant::Mine),
    );
    let chain = MockChain::with_test_identity();
    generate_payloads(&t, &id, &chain).await.unwrap();
    assert_eq!(t.get("actor").unwrap().value, Some(FieldValue::Text(id.actor.clone())));
    assert_eq!(
        t.get("payee_public_key").unwrap().value,
        Some(FieldValue::Text(id.public_key.clone()))
    );
}

#[tokio::test]
async fn numeric_width_is_required() {
    let t = table_with("n", "int32", GenerationMode::NumericGenerator(NumericVariant::RandomInt));
    let err = resolve_one(&t, "n").await.unwrap_err();
    assert_eq!(err, PayloadError::MissingWidth { field: "n".into() });
    assert_eq!(err.to_string(), "n: no number specified");

    t.update_length("n", Some(LengthSelector::Count(16)));
    let f = resolve_one(&t, "n").await.unwrap();
    assert_eq!(f.effective_type(), "int16");
    assert!(f.emit_raw);
}

#[tokio::test]
async fn random_int_follows_declared_signedness() {
    let t = table_with("n", "uint32", GenerationMode::NumericGenerator(NumericVariant::RandomInt));
    t.update_length("n", Some(LengthSelector::Count(32)));
    let f = resolve_one(&t, "n").await.unwrap();
    assert_eq!(f.effective_type(), "uint32");
    assert!(matches!(f.value, Some(FieldValue::Uint(v)) if v >= 1 && v < u64::from(u32::MAX)));

    t.update_declared_type("n", "int32");
    let f = resolve_one(&t, "n").await.unwrap();
    assert_eq!(f.effective_type(), "int32");
    assert!(matches!(f.value, Some(FieldValue::Int(v)) if v >= 1));
}

#[tokio::test]
async fn int128_is_sent_as_a_string() {
    let t = table_with("big", "int128", GenerationMode::NumericGenerator(NumericVariant::RandomInt));
    t.update_length("big", Some(LengthSelector::Count(128)));
    let f = resolve_one(&t, "big").await.unwrap();
    assert_eq!(f.effective_type(), "string");
    assert!(!f.emit_raw);
    assert!(matches!(f.value, Some(FieldValue::Text(ref s)) if s.parse::<i128>().is_ok()));
}

#[tokio::test]
async fn numbers_targeting_strings_are_quoted() {
    let t = table_with("memo", "string", GenerationMode::NumericGenerator(NumericVariant::Mixed));
    let f = resolve_one(&t, "memo").await.unwrap();
    assert_eq!(f.effective_type(), "string");
    let fragment = f.value.unwrap().to_json_fragment(f.emit_raw);
    assert!(fragment.starts_with('"'), "{fragment}");
}

#[tokio::test]
async fn overflow_int_follows_signedness() {
    let t = table_with("n", "int8", GenerationMode::NumericGenerator(NumericVariant::OverflowInt));
    t.update_length("n", Some(LengthSelector::Count(8)));
    let f = resolve_one(&t, "n").await.unwrap();
    assert_eq!(f.value, Some(FieldValue::Uint(128)));
    assert_eq!(f.effective_type(), "uint64");

    t.update_declared_type("n", "uint8");
    let f = resolve_one(&t, "n").await.unwrap();
    assert_eq!(f.value, Some(FieldValue::Uint(256)));

    t.update_length("n", Some(LengthSelector::Count(64)));
    assert!(matches!(
        resolve_one(&t, "n").await,
        Err(PayloadError::InvalidLength { .. })
    ));
}

#[tokio::test]
async fn max_int_defaults_to_int32() {
    let t = table_with("n", "int64", GenerationMode::NumericGenerator(NumericVariant::MaxInt));
    let f = resolve_one(&t, "n").await.unwrap();
    assert_eq!(f.value, Some(FieldValue::Int(i64::from(i32::MAX))));
    assert_eq!(f.effective_type(), "int32");
}

#[tokio::test]
async fn bytes_need_a_length_except_checksums() {
    let t = table_with("memo", "string", GenerationMode::BytesGenerator(BytesVariant::Text));
    let err = resolve_one(&t, "memo").await.unwrap_err();
    assert_eq!(err.to_string(), "memo: no length specified for random payload");

    t.update_length("memo", Some(LengthSelector::Count(12)));
    let f = resolve_one(&t, "memo").await.unwrap();
    assert!(matches!(f.value, Some(FieldValue::Text(ref s)) if s.len() == 12));

    t.update_mode("memo", GenerationMode::BytesGenerator(BytesVariant::Checksum));
    t.update_length("memo", None);
    let f = resolve_one(&t, "memo").await.unwrap();
    assert!(matches!(f.value, Some(FieldValue::Text(ref s)) if s.len() == 64));
}

#[tokio::test]
async fn vote_producers_come_from_the_chain() {
    let t = table_with(
        "producers",
        "string[]",
        GenerationMode::FioTypeGenerator(FioVariant::MaxVoteProducers),
    );
    let f = resolve_one(&t, "producers").await.unwrap();
    assert!(!f.is_slice);
    assert_eq!(f.effective_type(), "string[]");
    assert!(matches!(f.value, Some(FieldValue::List(ref l)) if l.len() == 30));
}

#[tokio::test]
async fn failed_producer_query_names_the_field() {
    let t = table_with(
        "producers",
        "string[]",
        GenerationMode::FioTypeGenerator(FioVariant::MaxVoteProducers),
    );
    let chain = MockChain::with_test_identity();
    chain.fail_producers.store(true, Ordering::SeqCst);
    let err = generate_payloads(&t, &test_identity(), &chain).await.unwrap_err();
    assert!(matches!(err, PayloadError::Query { ref field, .. } if field == "producers"));
}

#[tokio::test]
async fn existing_address_comes_from_the_names_table() {
    let t = table_with(
        "fio_address",
        "string",
        GenerationMode::FioTypeGenerator(FioVariant::ExistingAddress),
    );
    let chain = MockChain::with_test_identity();
    chain.set_table_rows(
        "fio.address",
        "fio.address",
        "fionames",
        vec![
            serde_json::json!({"name": "alice@dapix"}),
            serde_json::json!({"name": "bob@dapix"}),
        ],
    );
    generate_payloads(&t, &test_identity(), &chain).await.unwrap();
    let f = t.get("fio_address").unwrap();
    assert!(
        matches!(f.value, Some(FieldValue::Text(ref s)) if s == "alice@dapix" || s == "bob@dapix"),
        "{:?}",
        f.value
    );
    assert!(!f.emit_raw);
}

#[tokio::test]
async fn existing_address_degrades_to_empty() {
    let t = table_with(
        "fio_address",
        "string",
        GenerationMode::FioTypeGenerator(FioVariant::ExistingAddress),
    );
    // No rows registered.
    let f = resolve_one(&t, "fio_address").await.unwrap();
    assert_eq!(f.value, Some(FieldValue::Text(String::new())));

    // The query itself fails.
    let chain = MockChain::with_test_identity();
    chain.fail_tables.store(true, Ordering::SeqCst);
    generate_payloads(&t, &test_identity(), &chain).await.unwrap();
    assert_eq!(
        t.get("fio_address").unwrap().value,
        Some(FieldValue::Text(String::new()))
    );
}

#[tokio::test]
async fn variable_address_count_defaults_to_one() {
    let t = table_with(
        "public_addresses",
        "tokenpubaddr[]",
        GenerationMode::FioTypeGenerator(FioVariant::VariableAddAddress),
    );
    let f = resolve_one(&t, "public_addresses").await.unwrap();
    let Some(FieldValue::Raw(json)) = f.value else {
        panic!("expected raw json");
    };
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 1);

    t.update_length("public_addresses", Some(LengthSelector::Count(3)));
    let f = resolve_one(&t, "public_addresses").await.unwrap();
    let Some(FieldValue::Raw(json)) = f.value else {
        panic!("expected raw json");
    };
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn first_error_stops_the_pass_and_keeps_earlier_values() {
    let t = FieldSpecTable::new("fio.token", "trnsfiopubky");
    t.append("amount", "int64");
    t.update_input("amount", "5");
    t.append("bad", "int64");
    t.update_input("bad", "five");
    t.append("later", "string");
    t.update_input("later", "x");

    let chain = MockChain::with_test_identity();
    let err = generate_payloads(&t, &test_identity(), &chain).await.unwrap_err();
    assert_eq!(err.field(), "bad");
    assert_eq!(t.get("amount").unwrap().value, Some(FieldValue::Int(5)));
    assert_eq!(t.get("later").unwrap().value, None);
}

#[tokio::test]
async fn signature_variant_signs_with_the_identity() {
    let t = table_with("sig", "string", GenerationMode::FormValue(FormVariant::Signature));
    t.update_input("sig", "hello");
    let f = resolve_one(&t, "sig").await.unwrap();
    assert!(matches!(f.value, Some(FieldValue::Text(ref s)) if s.starts_with("SIG_K1_")));
}
