//! PFCP Header
//!
//! PFCP message header as specified in 3GPP TS 29.244 Section 7.2.2.

use bytes::{Buf, BufMut, BytesMut};
use crate::error::{PfcpError, PfcpResult};
use crate::types::PFCP_VERSION;

/// Node-level header: flags, type, length, sequence number, spare
pub const PFCP_HEADER_LEN: usize = 8;

/// Session-level header, with the 8-octet SEID
pub const PFCP_HEADER_LEN_WITH_SEID: usize = 16;

/// Octets before the part counted by the message length field
pub const PFCP_MANDATORY_HEADER_LEN: usize = 4;

/// Largest sequence number the 24-bit field holds
pub const MAX_SEQUENCE_NUMBER: u32 = 0x00FF_FFFF;

const FLAG_FO: u8 = 0x04;
const FLAG_MP: u8 = 0x02;
const FLAG_S: u8 = 0x01;

/// Declare [`PfcpMessageType`] with its code and display name in one table
macro_rules! message_types {
    ($($name:ident = $code:literal => $text:literal,)+) => {
        /// Message type codes (TS 29.244 Table 7.3-1)
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum PfcpMessageType {
            $($name = $code,)+
        }

        impl PfcpMessageType {
            /// Every defined message type, in code order
            pub const ALL: &'static [PfcpMessageType] = &[$(Self::$name,)+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$name => $text,)+
                }
            }
        }

        impl TryFrom<u8> for PfcpMessageType {
            type Error = PfcpError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($code => Ok(Self::$name),)+
                    _ => Err(PfcpError::UnknownMessageType(value)),
                }
            }
        }
    };
}

message_types! {
    HeartbeatRequest = 1 => "Heartbeat Request",
    HeartbeatResponse = 2 => "Heartbeat Response",
    PfdManagementRequest = 3 => "PFD Management Request",
    PfdManagementResponse = 4 => "PFD Management Response",
    AssociationSetupRequest = 5 => "Association Setup Request",
    AssociationSetupResponse = 6 => "Association Setup Response",
    AssociationUpdateRequest = 7 => "Association Update Request",
    AssociationUpdateResponse = 8 => "Association Update Response",
    AssociationReleaseRequest = 9 => "Association Release Request",
    AssociationReleaseResponse = 10 => "Association Release Response",
    VersionNotSupportedResponse = 11 => "Version Not Supported Response",
    NodeReportRequest = 12 => "Node Report Request",
    NodeReportResponse = 13 => "Node Report Response",
    SessionSetDeletionRequest = 14 => "Session Set Deletion Request",
    SessionSetDeletionResponse = 15 => "Session Set Deletion Response",
    SessionSetModificationRequest = 16 => "Session Set Modification Request",
    SessionSetModificationResponse = 17 => "Session Set Modification Response",
    SessionEstablishmentRequest = 50 => "Session Establishment Request",
    SessionEstablishmentResponse = 51 => "Session Establishment Response",
    SessionModificationRequest = 52 => "Session Modification Request",
    SessionModificationResponse = 53 => "Session Modification Response",
    SessionDeletionRequest = 54 => "Session Deletion Request",
    SessionDeletionResponse = 55 => "Session Deletion Response",
    SessionReportRequest = 56 => "Session Report Request",
    SessionReportResponse = 57 => "Session Report Response",
}

impl PfcpMessageType {
    /// Session-level messages (codes 50 and up) carry a SEID in the header
    pub fn has_seid(&self) -> bool {
        (*self as u8) >= 50
    }
}

/// Message header
///
/// Node-level layout:
/// ```text
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// |   Version (1)         | Spare | FO  | MP  |  S  |   octet 1   |
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// |                    Message Type                               |
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// |                    Message Length (2 bytes)                   |
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// |                    Sequence Number (3 bytes)                  |
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// |  Priority (if MP)     |  Spare                                |
/// +-------+-------+-------+-------+-------+-------+-------+-------+
/// ```
///
/// With S set, an 8-byte SEID sits between the length and the sequence
/// number, giving 16 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfcpHeader {
    /// Always 1 once decoded
    pub version: u8,
    /// Follow On flag (FO bit)
    pub follow_on: bool,
    pub message_type: PfcpMessageType,
    /// Octets after the first four
    pub length: u16,
    /// Session Endpoint Identifier; S bit set iff present
    pub seid: Option<u64>,
    /// Sequence number (24 bits)
    pub sequence_number: u32,
    /// Message priority (4 bits); MP bit set iff present
    pub priority: Option<u8>,
}

impl PfcpHeader {
    /// Node-level header
    pub fn new(message_type: PfcpMessageType, sequence_number: u32) -> Self {
        Self {
            version: PFCP_VERSION,
            follow_on: false,
            message_type,
            length: 0,
            seid: None,
            sequence_number: sequence_number & MAX_SEQUENCE_NUMBER,
            priority: None,
        }
    }

    /// Session-level header
    pub fn new_with_seid(message_type: PfcpMessageType, seid: u64, sequence_number: u32) -> Self {
        Self {
            seid: Some(seid),
            ..Self::new(message_type, sequence_number)
        }
    }

    /// Header for `message_type` with the SEID its level calls for
    ///
    /// Session-level types without a SEID get SEID 0; node-level types drop it.
    pub fn for_message(
        message_type: PfcpMessageType,
        sequence_number: u32,
        seid: Option<u64>,
    ) -> Self {
        if message_type.has_seid() {
            Self::new_with_seid(message_type, seid.unwrap_or(0), sequence_number)
        } else {
            Self::new(message_type, sequence_number)
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority & 0x0F);
        self
    }

    /// 8 or 16 depending on the S flag
    pub fn header_len(&self) -> usize {
        if self.seid.is_some() {
            PFCP_HEADER_LEN_WITH_SEID
        } else {
            PFCP_HEADER_LEN
        }
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        let mut first_byte = (self.version & 0x07) << 5;
        if self.follow_on {
            first_byte |= FLAG_FO;
        }
        if self.priority.is_some() {
            first_byte |= FLAG_MP;
        }
        if self.seid.is_some() {
            first_byte |= FLAG_S;
        }
        buf.put_u8(first_byte);
        buf.put_u8(self.message_type as u8);
        buf.put_u16(self.length);

        if let Some(seid) = self.seid {
            buf.put_u64(seid);
        }

        let seq_bytes = (self.sequence_number & MAX_SEQUENCE_NUMBER).to_be_bytes();
        buf.put_slice(&seq_bytes[1..4]);

        buf.put_u8(self.priority.map_or(0, |p| (p & 0x0F) << 4));
    }

    /// Decode the header at the start of `buf`; the body is left alone
    pub fn decode(mut buf: &[u8]) -> PfcpResult<Self> {
        if buf.len() < PFCP_MANDATORY_HEADER_LEN {
            return Err(PfcpError::TruncatedHeader {
                needed: PFCP_MANDATORY_HEADER_LEN,
                available: buf.len(),
            });
        }

        let available = buf.len();
        let first_byte = buf.get_u8();
        let version = (first_byte >> 5) & 0x07;
        if version != PFCP_VERSION {
            return Err(PfcpError::UnsupportedVersion(version));
        }

        let seid_presence = first_byte & FLAG_S != 0;
        let needed = if seid_presence {
            PFCP_HEADER_LEN_WITH_SEID
        } else {
            PFCP_HEADER_LEN
        };
        if available < needed {
            return Err(PfcpError::TruncatedHeader { needed, available });
        }

        let message_type = PfcpMessageType::try_from(buf.get_u8())?;
        if seid_presence != message_type.has_seid() {
            return Err(PfcpError::SeidFlagMismatch {
                message_type: message_type as u8,
                seid_present: seid_presence,
            });
        }
        let length = buf.get_u16();
        let seid = seid_presence.then(|| buf.get_u64());

        let mut seq_bytes = [0u8; 4];
        buf.copy_to_slice(&mut seq_bytes[1..4]);
        let sequence_number = u32::from_be_bytes(seq_bytes);

        let last_byte = buf.get_u8();
        let priority = (first_byte & FLAG_MP != 0).then_some(last_byte >> 4);

        Ok(Self {
            version,
            follow_on: first_byte & FLAG_FO != 0,
            message_type,
            length,
            seid,
            sequence_number,
            priority,
        })
    }
}
