// Path: crates/tx/src/pack/mod.rs
//! Assembles resolved fields into action JSON, encodes it against the
//! contract's schema and signs the resulting transaction.

use crate::msig;
use crate::table::FieldSpecTable;
use cryptonym_api::chain::ChainConnection;
use cryptonym_api::error::{EncodeError, PackError};
use cryptonym_api::identity::SignerIdentity;
use cryptonym_types::abi::{FieldDef, StructDef};
use cryptonym_types::chain::{Action, Compression, PackedTransaction, PermissionLevel, Transaction};
use cryptonym_types::config::{BatchConfig, ChainConfig, MsigConfig, DEFAULT_EXPIRATION_SECS};
use cryptonym_types::field::{FieldSpec, FieldValue};
use cryptonym_types::msig::MultisigEnvelope;
use cryptonym_types::MAX_PAYLOAD_BYTES;

/// The field whose value, when present, names the signing account.
pub const ACTOR_FIELD: &str = "actor";

/// Per-attempt transaction options.
#[derive(Debug, Clone, PartialEq)]
pub struct PackOptions {
    /// Packed transaction compression.
    pub compression: Compression,
    /// Deferral delay in seconds.
    pub delay_secs: u32,
    /// Seconds from head block time until expiry.
    pub expiration_secs: u32,
    /// Multisig reshaping.
    pub msig: Option<MsigConfig>,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            compression: Compression::None,
            delay_secs: 0,
            expiration_secs: DEFAULT_EXPIRATION_SECS,
            msig: None,
        }
    }
}

impl PackOptions {
    /// Options for every attempt of a batch run.
    pub fn from_batch(batch: &BatchConfig, chain: &ChainConfig) -> Self {
        Self {
            compression: batch.compression,
            delay_secs: batch.delay_secs,
            expiration_secs: chain.expiration_secs,
            msig: batch.msig.clone(),
        }
    }
}

/// A signed action ready to submit.
#[derive(Debug, Clone)]
pub struct SignedAction {
    /// The assembled action JSON.
    pub payload: String,
    /// The signer's rendering of the signed request.
    pub request: serde_json::Value,
    /// The packed transaction.
    pub packed: PackedTransaction,
    /// The multisig envelope, when one was applied.
    pub envelope: Option<MultisigEnvelope>,
}

/// The display shown instead of a payload that is too large to keep.
pub fn too_large_marker(size: usize) -> String {
    serde_json::json!({ "message": format!("Not showing request: {size} bytes is too large") })
        .to_string()
}

fn sorted(fields: &[FieldSpec]) -> Vec<&FieldSpec> {
    let mut out: Vec<_> = fields.iter().collect();
    out.sort_by_key(|f| f.order);
    out
}

fn fragment(f: &FieldSpec) -> String {
    if f.is_slice {
        return FieldValue::List(f.values.clone()).to_json_fragment(false);
    }
    match &f.value {
        Some(v) => v.to_json_fragment(f.emit_raw),
        None => "null".to_string(),
    }
}

/// Assembles `fields` into a JSON object in field order.
///
/// Values are spliced in as fragments, so raw fields can carry numbers and
/// whole JSON structures. Output larger than [`MAX_PAYLOAD_BYTES`] is refused.
pub fn assemble_json(fields: &[FieldSpec]) -> Result<String, EncodeError> {
    let mut out = String::from("{");
    for (i, f) in sorted(fields).into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&serde_json::Value::String(f.name.clone()).to_string());
        out.push(':');
        out.push_str(&fragment(f));
    }
    out.push('}');
    if out.len() > MAX_PAYLOAD_BYTES {
        return Err(EncodeError::PayloadTooLarge {
            size: out.len(),
            limit: MAX_PAYLOAD_BYTES,
        });
    }
    Ok(out)
}

/// A struct definition describing `fields` as they will be encoded.
pub fn derive_struct(action: &str, fields: &[FieldSpec]) -> StructDef {
    StructDef {
        name: action.to_string(),
        base: String::new(),
        fields: sorted(fields)
            .into_iter()
            .map(|f| FieldDef::new(&f.name, f.effective_type()))
            .collect(),
    }
}

/// The signing account: the resolved `actor` field if there is one, else
/// `default`.
pub fn signing_actor(fields: &[FieldSpec], default: &str) -> String {
    fields
        .iter()
        .find(|f| f.name == ACTOR_FIELD)
        .and_then(|f| f.value.as_ref())
        .map(FieldValue::display_text)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Assembles, encodes and signs the table's current values.
///
/// The schema is fetched fresh, and the derived struct replaces the action's
/// struct so that type overrides chosen during resolution are honoured.
pub async fn pack_and_sign<C>(
    table: &FieldSpecTable,
    identity: &SignerIdentity,
    conn: &C,
    opts: &PackOptions,
) -> Result<SignedAction, PackError>
where
    C: ChainConnection + ?Sized,
{
    let fields = table.snapshot();
    if fields.is_empty() {
        return Err(PackError::EmptyTable(format!(
            "{}::{}",
            table.contract(),
            table.action()
        )));
    }
    let payload = assemble_json(&fields)?;
    let json: serde_json::Value = serde_json::from_str(&payload).map_err(EncodeError::from)?;

    let mut abi = conn.fetch_schema(table.contract()).await?;
    abi.merge_action_struct(table.action(), derive_struct(table.action(), &fields));
    let data = conn.encode_action(&abi, table.action(), &json)?;

    let actor = signing_actor(&fields, &identity.actor);
    let mut tx = Transaction::with_action(Action {
        account: table.contract().to_string(),
        name: table.action().to_string(),
        authorization: vec![PermissionLevel::active(&actor)],
        data,
    });
    tx.delay_sec = opts.delay_secs;

    let ctx = conn.chain_context().await?;
    tx.set_reference(&ctx, opts.expiration_secs);

    let (tx, envelope) = match &opts.msig {
        Some(cfg) => {
            let (envelope, propose) = msig::build_envelope(tx, &identity.actor, cfg, &ctx)?;
            let mut outer = Transaction::with_action(propose);
            outer.set_reference(&ctx, opts.expiration_secs);
            (outer, Some(envelope))
        }
        None => (tx, None),
    };

    let (request, packed) = conn.sign(&tx, &ctx, opts.compression).await?;
    tracing::debug!(
        target: "pack",
        contract = table.contract(),
        action = table.action(),
        payload_bytes = payload.len(),
        packed_bytes = packed.packed_len(),
        msig = envelope.is_some(),
        "signed action"
    );
    Ok(SignedAction {
        payload,
        request,
        packed,
        envelope,
    })
}

#[cfg(test)]
mod tests;
