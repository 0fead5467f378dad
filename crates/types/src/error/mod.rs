// Path: crates/types/src/error/mod.rs
//! Core error types for Cryptonym.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Field-named input errors raised while resolving a payload.
///
/// Every variant carries the offending field's name so the operator can fix the
/// input and re-run the pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The literal input could not be parsed or decoded for the selected variant.
    #[error("{field}: {reason}")]
    InvalidInput {
        /// The name of the field whose input was rejected.
        field: String,
        /// The parser's description of the problem.
        reason: String,
    },
    /// The variant needs a length selector but none was set.
    #[error("{field}: no length specified for random payload")]
    MissingLength {
        /// The name of the field missing a length.
        field: String,
    },
    /// The numeric variant needs a bit width but none was set.
    #[error("{field}: no number specified")]
    MissingWidth {
        /// The name of the field missing a width.
        field: String,
    },
    /// The length selector does not make sense for the selected variant.
    #[error("{field}: invalid length selector '{value}'")]
    InvalidLength {
        /// The name of the field.
        field: String,
        /// The rejected selector text.
        value: String,
    },
    /// A live chain query needed by a generator failed.
    #[error("{field}: chain query failed: {reason}")]
    Query {
        /// The name of the field being generated.
        field: String,
        /// The underlying failure.
        reason: String,
    },
}

impl PayloadError {
    /// Returns the name of the field that caused the error.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidInput { field, .. }
            | Self::MissingLength { field }
            | Self::MissingWidth { field }
            | Self::InvalidLength { field, .. }
            | Self::Query { field, .. } => field,
        }
    }

    /// Convenience constructor for `InvalidInput`.
    pub fn invalid(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

impl ErrorCode for PayloadError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "PAYLOAD_INVALID_INPUT",
            Self::MissingLength { .. } => "PAYLOAD_MISSING_LENGTH",
            Self::MissingWidth { .. } => "PAYLOAD_MISSING_WIDTH",
            Self::InvalidLength { .. } => "PAYLOAD_INVALID_LENGTH",
            Self::Query { .. } => "PAYLOAD_QUERY_FAILED",
        }
    }
}

/// Errors raised while assembling or binary-encoding an action payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The assembled JSON payload exceeded the size limit.
    #[error("payload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge {
        /// The assembled size in bytes.
        size: usize,
        /// The configured limit in bytes.
        limit: usize,
    },
    /// The assembled payload was not valid JSON.
    #[error("could not marshal new data into json: {0}")]
    Json(String),
    /// The schema has no struct for the requested action.
    #[error("unknown action '{0}' in schema")]
    UnknownAction(String),
    /// A type name could not be resolved against the schema or builtins.
    #[error("unknown type '{0}'")]
    UnknownType(String),
    /// A builtin type exists but the local encoder does not support it.
    #[error("unsupported type '{0}'")]
    UnsupportedType(String),
    /// A struct field was absent from the JSON payload.
    #[error("missing field '{field}' in struct '{structure}'")]
    MissingField {
        /// The struct being encoded.
        structure: String,
        /// The field that was absent.
        field: String,
    },
    /// A JSON value did not match the declared type.
    #[error("type mismatch at '{path}': expected {expected}, got {got}")]
    TypeMismatch {
        /// A dotted path to the offending value.
        path: String,
        /// The declared wire type.
        expected: String,
        /// A short description of the supplied value.
        got: String,
    },
    /// A value was outside the representable range of its wire type.
    #[error("value at '{path}' out of range for {ty}: {value}")]
    OutOfRange {
        /// A dotted path to the offending value.
        path: String,
        /// The declared wire type.
        ty: String,
        /// The supplied value.
        value: String,
    },
    /// Type definitions recursed deeper than allowed.
    #[error("type nesting too deep at '{0}'")]
    TooDeep(String),
}

impl ErrorCode for EncodeError {
    fn code(&self) -> &'static str {
        match self {
            Self::PayloadTooLarge { .. } => "ENCODE_PAYLOAD_TOO_LARGE",
            Self::Json(_) => "ENCODE_JSON",
            Self::UnknownAction(_) => "ENCODE_UNKNOWN_ACTION",
            Self::UnknownType(_) => "ENCODE_UNKNOWN_TYPE",
            Self::UnsupportedType(_) => "ENCODE_UNSUPPORTED_TYPE",
            Self::MissingField { .. } => "ENCODE_MISSING_FIELD",
            Self::TypeMismatch { .. } => "ENCODE_TYPE_MISMATCH",
            Self::OutOfRange { .. } => "ENCODE_OUT_OF_RANGE",
            Self::TooDeep(_) => "ENCODE_TOO_DEEP",
        }
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(e: serde_json::Error) -> Self {
        EncodeError::Json(e.to_string())
    }
}

/// Network and remote errors from chain collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The request could not be delivered.
    #[error("transport error: {0}")]
    Transport(String),
    /// The request did not complete before its deadline.
    #[error("request timed out after {0} ms")]
    Timeout(u64),
    /// The remote node rejected the request.
    #[error("remote rejected request with status {status}: {body}")]
    Rejected {
        /// The HTTP status code returned by the node.
        status: u16,
        /// The raw response body.
        body: String,
    },
    /// The response could not be decoded.
    #[error("could not decode response: {0}")]
    Decode(String),
    /// Signing the transaction failed.
    #[error("signing failed: {0}")]
    Signing(String),
}

impl ChainError {
    /// Returns the raw response body for remote rejections, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl ErrorCode for ChainError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "CHAIN_TRANSPORT",
            Self::Timeout(_) => "CHAIN_TIMEOUT",
            Self::Rejected { .. } => "CHAIN_REJECTED",
            Self::Decode(_) => "CHAIN_DECODE",
            Self::Signing(_) => "CHAIN_SIGNING",
        }
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(e: serde_json::Error) -> Self {
        ChainError::Decode(e.to_string())
    }
}

/// Errors from cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature failed cryptographic verification.
    #[error("Signature verification failed")]
    VerificationFailed,
    /// The provided key material is malformed or invalid.
    #[error("Invalid cryptographic key: {0}")]
    InvalidKey(String),
    /// The provided signature material is malformed or invalid.
    #[error("Invalid signature format: {0}")]
    InvalidSignature(String),
    /// A hash digest had an unexpected length.
    #[error("Invalid hash length: expected {expected}, got {got}")]
    InvalidHashLength {
        /// The expected length in bytes.
        expected: usize,
        /// The actual length in bytes.
        got: usize,
    },
    /// A generic failure in an underlying cryptographic library.
    #[error("Cryptographic operation failed: {0}")]
    OperationFailed(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::VerificationFailed => "CRYPTO_VERIFICATION_FAILED",
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::InvalidSignature(_) => "CRYPTO_INVALID_SIGNATURE",
            Self::InvalidHashLength { .. } => "CRYPTO_INVALID_HASH_LENGTH",
            Self::OperationFailed(_) => "CRYPTO_OPERATION_FAILED",
        }
    }
}

impl From<CryptoError> for ChainError {
    fn from(e: CryptoError) -> Self {
        ChainError::Signing(e.to_string())
    }
}

/// Errors from a single `pack_and_sign` attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackError {
    /// The table has no fields to encode.
    #[error("no fields to encode for {0}")]
    EmptyTable(String),
    /// Payload resolution failed.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// Assembling or encoding the payload failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// A chain collaborator failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
    /// A cryptographic operation failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl ErrorCode for PackError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyTable(_) => "PACK_EMPTY_TABLE",
            Self::Payload(e) => e.code(),
            Self::Encode(e) => e.code(),
            Self::Chain(e) => e.code(),
            Self::Crypto(e) => e.code(),
        }
    }
}

/// Errors related to the batch submission supervisor lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// A run was requested while workers from a previous run are still alive.
    #[error("a batch run is already in progress")]
    AlreadyRunning,
    /// The batch configuration is invalid.
    #[error("invalid batch configuration: {0}")]
    InvalidConfig(String),
    /// A worker could not obtain its connection context.
    #[error("worker {worker} could not connect: {source}")]
    Connect {
        /// The index of the worker.
        worker: usize,
        /// The underlying chain error.
        source: ChainError,
    },
}

impl ErrorCode for BatchError {
    fn code(&self) -> &'static str {
        match self {
            Self::AlreadyRunning => "BATCH_ALREADY_RUNNING",
            Self::InvalidConfig(_) => "BATCH_INVALID_CONFIG",
            Self::Connect { .. } => "BATCH_CONNECT_FAILED",
        }
    }
}
