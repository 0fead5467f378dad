// Path: crates/client/src/lib.rs
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

//! # Cryptonym Client
//!
//! Talks to a node's HTTP API. [`HttpChainClient`] covers the read endpoints
//! and transaction push; [`HttpConnection`] pairs it with local encoding and
//! signing so a batch worker has everything it needs.

mod connection;
mod rpc;

pub use connection::{HttpConnection, HttpConnectionFactory};
pub use rpc::{context_from_info, HttpChainClient, InfoResponse};
