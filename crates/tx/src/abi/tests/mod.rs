// Path: crates/tx/src/abi/tests/mod.rs
use super::*;
use cryptonym_test_utils::fixtures::token_abi;
use serde_json::json;

fn abi_with(structs: Value, types: Value) -> AbiDef {
    serde_json::from_value(json!({
        "version": "eosio::abi/1.1",
        "types": types,
        "structs": structs,
        "actions": []
    }))
    .unwrap()
}

#[test]
fn encodes_the_transfer_action() {
    let abi = token_abi();
    let data = AbiEncoder
        .encode_action(
            &abi,
            "trnsfiopubky",
            &json!({
                "payee_public_key": "PUB",
                "amount": 1_000_000_000u64,
                "max_fee": "2000000000",
                "actor": "eosio",
                "tpid": ""
            }),
        )
        .unwrap();

    let mut expected = vec![3, b'P', b'U', b'B'];
    expected.extend_from_slice(&1_000_000_000i64.to_le_bytes());
    expected.extend_from_slice(&2_000_000_000i64.to_le_bytes());
    expected.extend_from_slice(&0x5530_ea00_0000_0000u64.to_le_bytes());
    expected.push(0);
    assert_eq!(data, expected);
}

#[test]
fn unknown_action_is_rejected() {
    let err = AbiEncoder
        .encode_action(&token_abi(), "nosuchaction", &json!({}))
        .unwrap_err();
    assert_eq!(err, EncodeError::UnknownAction("nosuchaction".into()));
}

#[test]
fn missing_field_is_named() {
    let err = AbiEncoder
        .encode_action(&token_abi(), "trnsfiopubky", &json!({"payee_public_key": "x"}))
        .unwrap_err();
    assert_eq!(
        err,
        EncodeError::MissingField {
            structure: "trnsfiopubky".into(),
            field: "amount".into()
        }
    );
}

#[test]
fn out_of_range_and_mismatch() {
    let abi = AbiDef::default();
    assert!(matches!(
        AbiEncoder.encode_type(&abi, "uint8", &json!(256)),
        Err(EncodeError::OutOfRange { .. })
    ));
    assert!(matches!(
        AbiEncoder.encode_type(&abi, "int8", &json!("-129")),
        Err(EncodeError::OutOfRange { .. })
    ));
    assert!(matches!(
        AbiEncoder.encode_type(&abi, "int64", &json!(1.5)),
        Err(EncodeError::TypeMismatch { .. })
    ));
    assert!(matches!(
        AbiEncoder.encode_type(&abi, "string", &json!(5)),
        Err(EncodeError::TypeMismatch { .. })
    ));
    assert_eq!(AbiEncoder.encode_type(&abi, "uint64", &json!(u64::MAX)).unwrap(), vec![0xff; 8]);
}

#[test]
fn arrays_optionals_and_aliases() {
    let abi = abi_with(
        json!([
            {"name": "pair", "base": "", "fields": [
                {"name": "k", "type": "account"},
                {"name": "v", "type": "uint16?"}
            ]}
        ]),
        json!([{"new_type_name": "account", "type": "name"}]),
    );
    let out = AbiEncoder
        .encode_type(&abi, "pair[]", &json!([{"k": "", "v": null}, {"k": "", "v": 2}]))
        .unwrap();
    assert_eq!(
        out,
        vec![2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 0]
    );
}

#[test]
fn struct_base_is_encoded_first() {
    let abi = abi_with(
        json!([
            {"name": "base", "base": "", "fields": [{"name": "a", "type": "uint8"}]},
            {"name": "child", "base": "base", "fields": [{"name": "b", "type": "uint8"}]}
        ]),
        json!([]),
    );
    let out = AbiEncoder
        .encode_type(&abi, "child", &json!({"b": 2, "a": 1}))
        .unwrap();
    assert_eq!(out, vec![1, 2]);
}

#[test]
fn missing_binary_extension_ends_the_struct() {
    let abi = abi_with(
        json!([{"name": "s", "base": "", "fields": [
            {"name": "a", "type": "uint8"},
            {"name": "b", "type": "uint8$"}
        ]}]),
        json!([]),
    );
    assert_eq!(AbiEncoder.encode_type(&abi, "s", &json!({"a": 7})).unwrap(), vec![7]);
    assert_eq!(AbiEncoder.encode_type(&abi, "s", &json!({"a": 7, "b": 8})).unwrap(), vec![7, 8]);
}

#[test]
fn checksums_bytes_bools_and_times() {
    let abi = AbiDef::default();
    let hash = "ab".repeat(32);
    assert_eq!(AbiEncoder.encode_type(&abi, "checksum256", &json!(hash)).unwrap(), vec![0xab; 32]);
    assert!(AbiEncoder.encode_type(&abi, "checksum256", &json!("abcd")).is_err());
    assert_eq!(AbiEncoder.encode_type(&abi, "bytes", &json!("0102")).unwrap(), vec![2, 1, 2]);
    assert_eq!(AbiEncoder.encode_type(&abi, "bool", &json!("true")).unwrap(), vec![1]);
    assert_eq!(AbiEncoder.encode_type(&abi, "bool", &json!(0)).unwrap(), vec![0]);
    assert_eq!(
        AbiEncoder
            .encode_type(&abi, "time_point_sec", &json!("2023-11-14T22:13:20"))
            .unwrap(),
        1_700_000_000u32.to_le_bytes().to_vec()
    );
}

#[test]
fn unsupported_and_unknown_types() {
    let abi = AbiDef::default();
    assert_eq!(
        AbiEncoder.encode_type(&abi, "int128", &json!("1")),
        Err(EncodeError::UnsupportedType("int128".into()))
    );
    assert_eq!(
        AbiEncoder.encode_type(&abi, "mystery", &json!(1)),
        Err(EncodeError::UnknownType("mystery".into()))
    );
}

#[test]
fn self_referential_types_stop() {
    let abi = abi_with(
        json!([{"name": "node", "base": "", "fields": [{"name": "next", "type": "node"}]}]),
        json!([]),
    );
    let mut v = json!({});
    for _ in 0..40 {
        v = json!({ "next": v });
    }
    assert!(matches!(
        AbiEncoder.encode_type(&abi, "node", &v),
        Err(EncodeError::TooDeep(_))
    ));
}
