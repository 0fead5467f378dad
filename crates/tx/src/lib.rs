// Path: crates/tx/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Cryptonym Transactions
//!
//! The payload pipeline: a field specification table is resolved into values,
//! assembled into action JSON, encoded against the contract's schema, signed
//! and, for batch runs, submitted by a pool of workers.

/// Schema-driven binary encoding of action data.
pub mod abi;
/// The batch submission supervisor.
pub mod batch;
/// Canonical binary encoding of transactions and multisig action data.
pub mod codec;
/// zlib helpers.
pub mod compress;
/// Default field inputs and schema-derived tables.
pub mod defaults;
/// Multisig proposal reshaping.
pub mod msig;
/// Payload assembly, encoding and signing.
pub mod pack;
/// Payload resolution.
pub mod resolve;
/// Local transaction signing.
pub mod signer;
/// The field specification table.
pub mod table;

pub use abi::AbiEncoder;
pub use batch::BatchSupervisor;
pub use pack::{pack_and_sign, PackOptions, SignedAction};
pub use resolve::generate_payloads;
pub use signer::LocalSigner;
pub use table::FieldSpecTable;
