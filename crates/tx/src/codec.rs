// Path: crates/tx/src/codec.rs
//! Canonical binary encoding of transactions and multisig action data.

use crate::abi::ByteWriter;
use cryptonym_api::error::EncodeError;
use cryptonym_types::chain::{Action, PermissionLevel, Transaction};
use cryptonym_types::msig::{MsigPropose, WrapExecute};
use serde_json::Value;

fn name_err(path: &str, e: String) -> EncodeError {
    EncodeError::OutOfRange {
        path: path.to_string(),
        ty: "name".to_string(),
        value: e,
    }
}

fn len_u32(path: &str, n: usize) -> Result<u32, EncodeError> {
    u32::try_from(n).map_err(|_| EncodeError::OutOfRange {
        path: path.to_string(),
        ty: "varuint32".to_string(),
        value: n.to_string(),
    })
}

fn write_permission(w: &mut ByteWriter, p: &PermissionLevel) -> Result<(), EncodeError> {
    w.name(&p.actor).map_err(|e| name_err("authorization.actor", e))?;
    w.name(&p.permission)
        .map_err(|e| name_err("authorization.permission", e))
}

fn write_permissions(w: &mut ByteWriter, levels: &[PermissionLevel]) -> Result<(), EncodeError> {
    w.varuint32(len_u32("authorization", levels.len())?);
    levels.iter().try_for_each(|p| write_permission(w, p))
}

fn write_action(w: &mut ByteWriter, a: &Action) -> Result<(), EncodeError> {
    w.name(&a.account).map_err(|e| name_err("action.account", e))?;
    w.name(&a.name).map_err(|e| name_err("action.name", e))?;
    write_permissions(w, &a.authorization)?;
    w.bytes(&a.data).map_err(|e| EncodeError::OutOfRange {
        path: "action.data".into(),
        ty: "bytes".into(),
        value: e,
    })
}

fn write_extension(w: &mut ByteWriter, ext: &Value) -> Result<(), EncodeError> {
    let mismatch = || EncodeError::TypeMismatch {
        path: "transaction_extensions".into(),
        expected: "{type, data}".into(),
        got: ext.to_string(),
    };
    let ty = ext
        .get("type")
        .and_then(Value::as_u64)
        .and_then(|t| u16::try_from(t).ok())
        .ok_or_else(mismatch)?;
    let data = ext
        .get("data")
        .and_then(Value::as_str)
        .and_then(|d| hex::decode(d).ok())
        .ok_or_else(mismatch)?;
    w.u16(ty);
    w.bytes(&data).map_err(|_| mismatch())
}

fn write_transaction(w: &mut ByteWriter, tx: &Transaction) -> Result<(), EncodeError> {
    w.u32(tx.expiration);
    w.u16(tx.ref_block_num);
    w.u32(tx.ref_block_prefix);
    w.varuint32(tx.max_net_usage_words);
    w.u8(tx.max_cpu_usage_ms);
    w.varuint32(tx.delay_sec);
    w.varuint32(len_u32("context_free_actions", tx.context_free_actions.len())?);
    tx.context_free_actions
        .iter()
        .try_for_each(|a| write_action(w, a))?;
    w.varuint32(len_u32("actions", tx.actions.len())?);
    tx.actions.iter().try_for_each(|a| write_action(w, a))?;
    w.varuint32(len_u32("transaction_extensions", tx.transaction_extensions.len())?);
    tx.transaction_extensions
        .iter()
        .try_for_each(|e| write_extension(w, e))
}

/// The packed form of `tx`, as signed and pushed.
pub fn transaction_bytes(tx: &Transaction) -> Result<Vec<u8>, EncodeError> {
    let mut w = ByteWriter::default();
    write_transaction(&mut w, tx)?;
    Ok(w.into_bytes())
}

/// The data of an `eosio.msig::propose` action.
pub fn propose_bytes(p: &MsigPropose) -> Result<Vec<u8>, EncodeError> {
    let mut w = ByteWriter::default();
    w.name(&p.proposer).map_err(|e| name_err("proposer", e))?;
    w.name(&p.proposal_name)
        .map_err(|e| name_err("proposal_name", e))?;
    write_permissions(&mut w, &p.requested)?;
    w.u64(p.max_fee);
    write_transaction(&mut w, &p.trx)?;
    Ok(w.into_bytes())
}

/// The data of an `eosio.wrap::exec` action.
pub fn wrap_bytes(x: &WrapExecute) -> Result<Vec<u8>, EncodeError> {
    let mut w = ByteWriter::default();
    w.name(&x.executer).map_err(|e| name_err("executer", e))?;
    write_transaction(&mut w, &x.trx)?;
    Ok(w.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action() -> Action {
        Action {
            account: "fio.token".into(),
            name: "trnsfiopubky".into(),
            authorization: vec![PermissionLevel::active("eosio")],
            data: vec![9, 9],
        }
    }

    #[test]
    fn transaction_layout() {
        let mut tx = Transaction::with_action(action());
        tx.expiration = 1;
        tx.ref_block_num = 2;
        tx.ref_block_prefix = 3;
        tx.delay_sec = 300;
        let b = transaction_bytes(&tx).unwrap();
        // header: 4 + 2 + 4 + 1 (net) + 1 (cpu) + 2 (delay varuint)
        assert_eq!(&b[..4], &1u32.to_le_bytes());
        assert_eq!(&b[4..6], &2u16.to_le_bytes());
        assert_eq!(&b[6..10], &3u32.to_le_bytes());
        assert_eq!(&b[10..14], &[0, 0, 0xac, 0x02]);
        // no context-free actions, one action
        assert_eq!(&b[14..16], &[0, 1]);
        // account + name + 1 permission (16) + data
        let action_len = 8 + 8 + 1 + 16 + 1 + 2;
        assert_eq!(b.len(), 16 + action_len + 1);
        assert_eq!(b.last(), Some(&0));
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut a = action();
        a.account = "Not.Valid".into();
        assert!(transaction_bytes(&Transaction::with_action(a)).is_err());
    }

    #[test]
    fn extensions_need_type_and_hex() {
        let mut tx = Transaction::with_action(action());
        tx.transaction_extensions = vec![serde_json::json!({"type": 1, "data": "ff"})];
        assert!(transaction_bytes(&tx).is_ok());
        tx.transaction_extensions = vec![serde_json::json!({"data": "zz"})];
        assert!(transaction_bytes(&tx).is_err());
    }

    #[test]
    fn propose_embeds_the_transaction() {
        let trx = Transaction::with_action(action());
        let inner = transaction_bytes(&trx).unwrap();
        let p = MsigPropose {
            proposer: "alice".into(),
            proposal_name: "abcdefghijkl".into(),
            requested: vec![PermissionLevel::active("bob")],
            max_fee: 7,
            trx,
        };
        let b = propose_bytes(&p).unwrap();
        assert_eq!(b.len(), 8 + 8 + 1 + 16 + 8 + inner.len());
        assert!(b.ends_with(&inner));
    }
}
