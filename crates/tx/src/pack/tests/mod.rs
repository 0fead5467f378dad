// Path: crates/tx/src/pack/tests/mod.rs
use super::*;
use crate::resolve::generate_payloads;
use cryptonym_test_utils::fixtures::test_identity;
use cryptonym_test_utils::mock::MockChain;
use cryptonym_types::config::ProposalName;
use cryptonym_types::field::{FormVariant, GenerationMode, IdentityVariant, NumericVariant};
use cryptonym_types::msig::{MSIG_CONTRACT, PROPOSE_ACTION};
use serde_json::json;

fn resolved(name: &str, value: FieldValue, emit_raw: bool, order: usize) -> FieldSpec {
    let mut f = FieldSpec::new(name, "string", order);
    f.value = Some(value);
    f.emit_raw = emit_raw;
    f
}

fn transfer_table() -> FieldSpecTable {
    let t = FieldSpecTable::new("fio.token", "trnsfiopubky");
    for (name, ty) in [
        ("payee_public_key", "string"),
        ("amount", "int64"),
        ("max_fee", "int64"),
        ("actor", "name"),
        ("tpid", "string"),
    ] {
        t.append(name, ty);
    }
    t.update_mode("payee_public_key", GenerationMode::PubKeyDerived(IdentityVariant::Mine));
    t.update_mode("amount", GenerationMode::FormValue(FormVariant::FioToSuf));
    t.update_input("amount", "1,000.00");
    t.update_mode("max_fee", GenerationMode::FormValue(FormVariant::FioToSuf));
    t.update_input("max_fee", "10,000.00");
    t.update_mode("actor", GenerationMode::ActorDerived(IdentityVariant::Mine));
    t
}

#[test]
fn assembles_in_field_order() {
    let fields = vec![
        resolved("b", FieldValue::Int(7), true, 1),
        resolved("a", FieldValue::Text("x\"y".into()), false, 0),
        resolved("c", FieldValue::Raw(r#"[{"k":1}]"#.into()), true, 2),
    ];
    let out = assemble_json(&fields).unwrap();
    assert_eq!(out, r#"{"a":"x\"y","b":7,"c":[{"k":1}]}"#);
}

#[test]
fn slice_fields_render_their_elements() {
    let mut f = FieldSpec::new("owners", "name[]", 0);
    f.values = vec!["alice".into(), "bob".into()];
    f.value = Some(FieldValue::List(f.values.clone()));
    assert_eq!(assemble_json(&[f]).unwrap(), r#"{"owners":["alice","bob"]}"#);
}

#[test]
fn oversized_payloads_are_refused() {
    let big = resolved("memo", FieldValue::Text("a".repeat(MAX_PAYLOAD_BYTES)), false, 0);
    let err = assemble_json(&[big]).unwrap_err();
    assert!(matches!(err, EncodeError::PayloadTooLarge { size, limit } if size > limit));

    let marker: serde_json::Value = serde_json::from_str(&too_large_marker(600_000)).unwrap();
    assert_eq!(marker["message"], "Not showing request: 600000 bytes is too large");
}

#[test]
fn derived_struct_uses_effective_types() {
    let mut f = FieldSpec::new("n", "uint8", 0);
    f.type_override = Some("uint64".into());
    let s = derive_struct("act", &[f, FieldSpec::new("m", "string", 1)]);
    assert_eq!(s.name, "act");
    assert_eq!(s.fields[0], FieldDef::new("n", "uint64"));
    assert_eq!(s.fields[1], FieldDef::new("m", "string"));
}

#[test]
fn actor_field_overrides_the_signer() {
    let fields = vec![resolved("actor", FieldValue::Text("someoneelse".into()), false, 0)];
    assert_eq!(signing_actor(&fields, "me"), "someoneelse");
    assert_eq!(signing_actor(&[], "me"), "me");
}

#[tokio::test]
async fn packs_and_signs_the_transfer() {
    let id = test_identity();
    let chain = MockChain::with_test_identity();
    let t = transfer_table();
    generate_payloads(&t, &id, &chain).await.unwrap();

    let opts = PackOptions {
        delay_secs: 30,
        ..PackOptions::default()
    };
    let signed = pack_and_sign(&t, &id, &chain, &opts).await.unwrap();

    let encoded = chain.encoded();
    assert_eq!(
        encoded[0],
        json!({
            "payee_public_key": id.public_key,
            "amount": 1_000_000_000_000u64,
            "max_fee": 10_000_000_000_000u64,
            "actor": id.actor,
            "tpid": ""
        })
    );
    let tx = &chain.signed()[0];
    assert_eq!(tx.actions[0].authorization, vec![PermissionLevel::active(&id.actor)]);
    assert_eq!(tx.delay_sec, 30);
    assert_eq!(tx.expiration, chain.context().head_block_time + DEFAULT_EXPIRATION_SECS);
    assert!(signed.envelope.is_none());
    assert_eq!(signed.packed.signatures.len(), 1);
}

#[tokio::test]
async fn type_overrides_reach_the_schema() {
    let id = test_identity();
    let chain = MockChain::with_test_identity();
    let t = transfer_table();
    t.update_mode("tpid", GenerationMode::NumericGenerator(NumericVariant::MaxInt));
    generate_payloads(&t, &id, &chain).await.unwrap();
    pack_and_sign(&t, &id, &chain, &PackOptions::default()).await.unwrap();
    // tpid is declared `string`, so the number is sent quoted.
    assert_eq!(chain.encoded()[0]["tpid"], json!("2147483647"));
}

#[tokio::test]
async fn empty_table_is_an_error() {
    let chain = MockChain::with_test_identity();
    let t = FieldSpecTable::new("fio.token", "trnsfiopubky");
    let err = pack_and_sign(&t, &test_identity(), &chain, &PackOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err, PackError::EmptyTable("fio.token::trnsfiopubky".into()));
}

#[tokio::test]
async fn invalid_raw_json_is_an_encode_error() {
    let id = test_identity();
    let chain = MockChain::with_test_identity();
    let t = transfer_table();
    t.update_mode("tpid", GenerationMode::FormValue(FormVariant::JsonToStruct));
    t.update_input("tpid", "{not json");
    generate_payloads(&t, &id, &chain).await.unwrap();
    let err = pack_and_sign(&t, &id, &chain, &PackOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PackError::Encode(EncodeError::Json(_))));
}

#[tokio::test]
async fn msig_signs_a_proposal_instead() {
    let id = test_identity();
    let chain = MockChain::with_test_identity();
    let t = transfer_table();
    generate_payloads(&t, &id, &chain).await.unwrap();
    let opts = PackOptions {
        msig: Some(MsigConfig {
            account: "multisigacct".into(),
            signers: "bob,alice".into(),
            proposal_name: ProposalName::Fixed("prop".into()),
            wrap_actor: None,
            propose_fee: 40.0,
        }),
        ..PackOptions::default()
    };
    let signed = pack_and_sign(&t, &id, &chain, &opts).await.unwrap();
    let tx = &chain.signed()[0];
    assert_eq!(tx.actions[0].account, MSIG_CONTRACT);
    assert_eq!(tx.actions[0].name, PROPOSE_ACTION);
    let envelope = signed.envelope.unwrap();
    assert_eq!(envelope.propose().proposal_name, "prop");
    assert_eq!(envelope.propose().proposer, id.actor);
}

#[tokio::test]
async fn msig_proposer_is_the_identity_not_the_inner_actor() {
    let id = test_identity();
    let chain = MockChain::with_test_identity();
    let t = transfer_table();
    t.update_mode("actor", GenerationMode::ActorDerived(IdentityVariant::Random));
    generate_payloads(&t, &id, &chain).await.unwrap();
    let Some(FieldValue::Text(inner_actor)) = t.get("actor").unwrap().value else {
        panic!("expected a text actor");
    };
    assert_ne!(inner_actor, id.actor);

    let opts = PackOptions {
        msig: Some(MsigConfig {
            account: "multisigacct".into(),
            signers: "bob".into(),
            proposal_name: ProposalName::Fixed("prop".into()),
            wrap_actor: None,
            propose_fee: 40.0,
        }),
        ..PackOptions::default()
    };
    let signed = pack_and_sign(&t, &id, &chain, &opts).await.unwrap();
    let tx = &chain.signed()[0];
    assert_eq!(tx.actions[0].authorization, vec![PermissionLevel::active(&id.actor)]);
    let envelope = signed.envelope.unwrap();
    assert_eq!(envelope.propose().proposer, id.actor);
    assert_eq!(
        envelope.propose().trx.actions[0].authorization,
        vec![PermissionLevel::active("multisigacct")]
    );
    assert_eq!(chain.encoded()[0]["actor"], json!(inner_actor));
}

#[tokio::test]
async fn schema_failures_propagate() {
    let id = test_identity();
    let chain = MockChain::with_test_identity();
    let t = transfer_table();
    generate_payloads(&t, &id, &chain).await.unwrap();
    chain
        .fail_schema
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let err = pack_and_sign(&t, &id, &chain, &PackOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PackError::Chain(_)));
}
