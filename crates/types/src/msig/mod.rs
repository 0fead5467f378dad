// Path: crates/types/src/msig/mod.rs
//! Multisig proposal and wrap-execute envelopes.

use crate::chain::{PermissionLevel, Transaction};
use serde::{Deserialize, Serialize};

/// The multisig contract account.
pub const MSIG_CONTRACT: &str = "eosio.msig";
/// The multisig propose action.
pub const PROPOSE_ACTION: &str = "propose";
/// The privileged wrap contract account.
pub const WRAP_CONTRACT: &str = "eosio.wrap";
/// The wrap execute action.
pub const WRAP_EXEC_ACTION: &str = "exec";
/// Length of a generated proposal name.
pub const PROPOSAL_NAME_LEN: usize = 12;

/// Data of an `eosio.msig::propose` action.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MsigPropose {
    /// The proposing account.
    pub proposer: String,
    /// The proposal name.
    pub proposal_name: String,
    /// The permission levels requested to approve, sorted by actor.
    pub requested: Vec<PermissionLevel>,
    /// The maximum fee in SUF.
    pub max_fee: u64,
    /// The proposed transaction.
    pub trx: Transaction,
}

/// Data of an `eosio.wrap::exec` action.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WrapExecute {
    /// The account executing the wrapped transaction.
    pub executer: String,
    /// The wrapped transaction.
    pub trx: Transaction,
}

/// A transient reshaping of a transaction before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultisigEnvelope {
    /// A plain proposal.
    Propose(MsigPropose),
    /// A proposal whose transaction is a wrap-execute of the original.
    Wrapped {
        /// The outer proposal.
        propose: MsigPropose,
        /// The wrap-execute carried by the proposal.
        wrap: WrapExecute,
    },
}

impl MultisigEnvelope {
    /// The outer proposal.
    pub fn propose(&self) -> &MsigPropose {
        match self {
            Self::Propose(p) | Self::Wrapped { propose: p, .. } => p,
        }
    }
}
