//! Crate-wide error taxonomy.
//!
//! Every fallible operation in `auris` returns a [`Result`] carrying an
//! [`Error`] that names both a `kind` and the byte `offset` of the
//! offending octet, so callers get precise diagnostics without walking
//! the input a second time.

use thiserror::Error;

/// The crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// A single error condition raised while parsing, decoding, or editing
/// a URI reference.
///
/// `offset` is relative to the start of the buffer passed to the
/// failing call, not to any enclosing parse.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct Error {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl Error {
    pub fn new(kind: ErrorKind, offset: usize) -> Self {
        Error { kind, offset }
    }
}

/// Flat enumeration of failure kinds, matching the taxonomy a careful
/// parser needs: structural failures, component-specific grammar
/// failures, percent-encoding failures, path-shape failures, and
/// operational failures (resolve, truncated output, capacity).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("grammar mismatch")]
    Mismatch,
    #[error("unexpected end of input")]
    EndOfInput,
    #[error("leftover input after parse")]
    LeftoverInput,
    #[error("invalid input")]
    Invalid,

    #[error("scheme must start with an ALPHA")]
    BadSchemeStart,
    #[error("invalid character in scheme")]
    BadSchemeChar,
    #[error("invalid character in port")]
    BadPortChar,
    #[error("port number exceeds 65535")]
    PortOverflow,
    #[error("invalid IPv4 address")]
    BadIpv4,
    #[error("invalid IPv6 address")]
    BadIpv6,
    #[error("invalid authority")]
    BadAuthority,

    #[error("incomplete percent-encoding escape")]
    IncompleteEncoding,
    #[error("invalid hex digit in percent-encoding")]
    BadHexDigit,
    #[error("decoded NUL byte not allowed")]
    IllegalNull,
    #[error("reserved character outside permitted set")]
    IllegalReservedChar,

    #[error("empty path segment not allowed here")]
    EmptyPathSegment,
    #[error("path is missing a required segment")]
    MissingPathSegment,
    #[error("path is missing a required separator")]
    MissingPathSeparator,

    #[error("reference has no base to resolve against")]
    NotABase,
    #[error("destination buffer has no space")]
    NoSpace,
    #[error("buffer capacity growth failed")]
    LengthError,
}
