// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Inkwire.
//
// Four conditions matter to callers of the IPP client: the request could not
// be built, the transport failed, the reply was not valid IPP, or the reply
// was valid IPP carrying a non-successful status.  Each gets its own variant
// so callers can match instead of string-sniffing.

use std::time::Duration;

use thiserror::Error;

use crate::types::{Operation, StatusCode};

/// Top-level error type for all Inkwire operations.
#[derive(Debug, Error)]
pub enum InkwireError {
    // -- Protocol errors --
    #[error("cannot build IPP request: {0}")]
    Build(#[from] BuildError),

    #[error("{operation} transport failed: {source}")]
    TransportFailed {
        operation: Operation,
        #[source]
        source: TransportError,
    },

    #[error("malformed IPP response: {0}")]
    MalformedResponse(#[from] MalformedResponse),

    #[error("{operation} returned {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    ServerStatus {
        operation: Operation,
        status: StatusCode,
        message: Option<String>,
    },

    #[error("invalid URI '{0}'")]
    InvalidUri(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InkwireError {
    /// The IPP status code, when the server answered with one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::ServerStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A request that cannot be serialized.  Always a caller bug; nothing has
/// been sent when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("no operation set")]
    MissingOperation,

    #[error("{operation} requires the '{attribute}' operation attribute")]
    MissingAttribute {
        operation: Operation,
        attribute: &'static str,
    },

    #[error("attribute with an empty name (a zero-length name marks an additional value)")]
    EmptyName,

    #[error("attribute name '{name}' is {len} bytes (limit 65535)")]
    NameTooLong { name: String, len: usize },

    #[error("value of '{name}' is {len} bytes (limit 65535)")]
    ValueTooLong { name: String, len: usize },

    #[error("value cannot be encoded: {0}")]
    ValueOutOfRange(String),

    #[error("end-of-attributes cannot be added as an attribute group")]
    ReservedGroup,

    #[error("invalid page range {start}-{end}")]
    InvalidPageRange { start: i32, end: i32 },
}

/// Bytes that do not decode as an IPP message.
///
/// `offset` is the position in the buffer where decoding gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {offset}")]
pub struct MalformedResponse {
    pub offset: usize,
    pub kind: MalformedKind,
}

impl MalformedResponse {
    pub fn new(offset: usize, kind: MalformedKind) -> Self {
        Self { offset, kind }
    }
}

/// What exactly was wrong with a malformed message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedKind {
    #[error("message header is {0} bytes (minimum 8)")]
    ShortHeader(usize),

    #[error("truncated {field}: need {needed} bytes, {remaining} remain")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("reserved delimiter tag 0x{0:02X}")]
    ReservedDelimiter(u8),

    #[error("attribute with tag 0x{0:02X} outside of any group")]
    AttributeOutsideGroup(u8),

    #[error("additional value with no preceding attribute name")]
    OrphanContinuation,

    #[error("'{name}' has a {len}-byte value, expected {expected}")]
    BadValueLength {
        name: String,
        len: usize,
        expected: usize,
    },

    #[error("'{name}' has an invalid value: {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("missing end-of-attributes tag")]
    MissingEndTag,
}

/// Failure reported by a transport collaborator.  The client propagates
/// these unchanged and never retries.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("invalid endpoint: {0}")]
    Endpoint(String),

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, InkwireError>;
