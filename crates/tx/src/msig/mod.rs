// Path: crates/tx/src/msig/mod.rs
//! Reshapes a transaction into a multisig proposal, optionally wrapped in a
//! privileged `eosio.wrap::exec`.

use crate::codec;
use cryptonym_api::error::EncodeError;
use cryptonym_fuzzer::text::random_string;
use cryptonym_types::chain::{Action, ChainContext, PermissionLevel, Transaction};
use cryptonym_types::config::{MsigConfig, ProposalName};
use cryptonym_types::msig::{
    MsigPropose, MultisigEnvelope, WrapExecute, MSIG_CONTRACT, PROPOSAL_NAME_LEN, PROPOSE_ACTION,
    WRAP_CONTRACT, WRAP_EXEC_ACTION,
};
use cryptonym_types::SUF_PER_FIO;

/// Seconds a proposed transaction stays valid.
pub const PROPOSAL_EXPIRATION_SECS: u32 = 3_600;

/// The requested approvals, one `active` level per signer, sorted by actor.
pub fn requested_signers(cfg: &MsigConfig) -> Vec<PermissionLevel> {
    let mut levels: Vec<_> = cfg
        .signer_list()
        .into_iter()
        .map(PermissionLevel::active)
        .collect();
    levels.sort();
    levels
}

/// The configured proposal name, or a fresh random one.
pub fn proposal_name(cfg: &MsigConfig) -> String {
    match &cfg.proposal_name {
        ProposalName::Fixed(name) => name.clone(),
        ProposalName::Random => random_string(PROPOSAL_NAME_LEN),
    }
}

/// The proposal's fee ceiling in SUF: the per-kilobyte propose fee times
/// whole kilobytes of packed transaction, plus one FIO.
pub fn max_fee(propose_fee_fio: f64, packed_len: usize) -> u64 {
    let per_kb = (propose_fee_fio * SUF_PER_FIO) as u64;
    per_kb
        .saturating_mul((packed_len / 1000) as u64)
        .saturating_add(SUF_PER_FIO as u64)
}

fn authorize(tx: &mut Transaction, actor: &str) {
    for action in &mut tx.actions {
        action.authorization = vec![PermissionLevel::active(actor)];
    }
}

/// Builds the proposal carrying `inner`.
///
/// Returns the envelope and the `eosio.msig::propose` action to sign in its
/// place, authorized by `proposer`.
pub fn build_envelope(
    mut inner: Transaction,
    proposer: &str,
    cfg: &MsigConfig,
    ctx: &ChainContext,
) -> Result<(MultisigEnvelope, Action), EncodeError> {
    let expiration = ctx.head_block_time.saturating_add(PROPOSAL_EXPIRATION_SECS);
    let (trx, wrap) = match &cfg.wrap_actor {
        Some(wrap_actor) => {
            inner.clear_reference();
            authorize(&mut inner, wrap_actor);
            let wrap = WrapExecute {
                executer: proposer.to_string(),
                trx: inner,
            };
            let mut outer = Transaction::with_action(Action {
                account: WRAP_CONTRACT.to_string(),
                name: WRAP_EXEC_ACTION.to_string(),
                authorization: vec![PermissionLevel::active(WRAP_CONTRACT)],
                data: codec::wrap_bytes(&wrap)?,
            });
            outer.expiration = expiration;
            (outer, Some(wrap))
        }
        None => {
            authorize(&mut inner, &cfg.account);
            inner.expiration = expiration;
            (inner, None)
        }
    };

    let packed_len = codec::transaction_bytes(&trx)?.len();
    let propose = MsigPropose {
        proposer: proposer.to_string(),
        proposal_name: proposal_name(cfg),
        requested: requested_signers(cfg),
        max_fee: max_fee(cfg.propose_fee, packed_len),
        trx,
    };
    let action = Action {
        account: MSIG_CONTRACT.to_string(),
        name: PROPOSE_ACTION.to_string(),
        authorization: vec![PermissionLevel::active(proposer)],
        data: codec::propose_bytes(&propose)?,
    };
    let envelope = match wrap {
        Some(wrap) => MultisigEnvelope::Wrapped { propose, wrap },
        None => MultisigEnvelope::Propose(propose),
    };
    Ok((envelope, action))
}
