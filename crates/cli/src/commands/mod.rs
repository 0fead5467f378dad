// Path: crates/cli/src/commands/mod.rs

pub mod keys;
pub mod preview;
pub mod schema;
pub mod send;
