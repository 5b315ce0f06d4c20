//! PFCP Error Types
//!
//! Error types for PFCP encoding and decoding.

use thiserror::Error;

/// PFCP Error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PfcpError {
    /// Fewer than four bytes left where an IE or message header was expected
    #[error("Truncated header: needed {needed} bytes, available {available}")]
    TruncatedHeader { needed: usize, available: usize },

    /// IE header promised more value bytes than the buffer holds
    #[error("Truncated value of IE {ie_type}: length {length}, available {available}")]
    TruncatedValue {
        ie_type: u16,
        length: usize,
        available: usize,
    },

    /// A field flagged as present could not be read from an IE value
    #[error("Unexpected end of value: needed {needed} bytes, available {available}")]
    UnexpectedEndOfValue { needed: usize, available: usize },

    /// Fixed-size IE value with the wrong length
    #[error("Invalid length for IE {ie_type}: expected {expected}, got {actual}")]
    InvalidLength {
        ie_type: u16,
        expected: usize,
        actual: usize,
    },

    /// Cause value outside the accepted set
    #[error("Invalid cause value: {0}")]
    InvalidCauseValue(u8),

    /// Flag set violating the IE's combination rules
    #[error("Illegal flag combination: {0}")]
    IllegalFlagCombination(&'static str),

    /// FQDN longer than 255 bytes
    #[error("FQDN too long: {0} bytes (max 255)")]
    FqdnTooLong(usize),

    /// FQDN that cannot be used as a Node ID
    #[error("Invalid FQDN: {0}")]
    InvalidFqdn(String),

    /// Node ID type nibble not assigned
    #[error("Invalid node ID type: {0}")]
    InvalidNodeIdType(u8),

    /// Interface value outside the 4-bit field
    #[error("Invalid interface value: {0}")]
    InvalidInterfaceValue(u8),

    /// Version not supported
    #[error("PFCP version not supported: {0}")]
    UnsupportedVersion(u8),

    /// No decoder registered for this message type
    #[error("Unknown message type: {0}")]
    UnknownMessageType(u8),

    /// Missing mandatory IE
    #[error("Missing mandatory IE: {0}")]
    MissingMandatoryIe(&'static str),

    /// IE value too long for the 16-bit length field
    #[error("IE {ie_type} too long: {length} value bytes (max 65535)")]
    IeTooLong { ie_type: u16, length: usize },

    /// S flag disagrees with the level of the message type
    #[error("SEID flag mismatch for message type {message_type}: S={seid_present}")]
    SeidFlagMismatch { message_type: u8, seid_present: bool },

    /// Message exceeds the configured or encodable size
    #[error("Message too long: {length} bytes (max {max})")]
    MessageTooLong { length: usize, max: usize },

    /// Header message length disagrees with the received buffer
    #[error("Message length mismatch: header says {declared}, buffer holds {available}")]
    LengthMismatch { declared: usize, available: usize },
}

/// PFCP Result type
pub type PfcpResult<T> = Result<T, PfcpError>;

impl PfcpError {
    /// True for the errors caused by a buffer shorter than its length fields promise
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Self::TruncatedHeader { .. }
                | Self::TruncatedValue { .. }
                | Self::UnexpectedEndOfValue { .. }
        )
    }
}
