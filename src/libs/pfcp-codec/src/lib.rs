//! PFCP Codec Library
//!
//! Wire codec for PFCP (Packet Forwarding Control Protocol, 3GPP TS 29.244):
//! information elements, message headers and typed messages.
//!
//! PFCP is used between the Control Plane (SMF, SGW-C, PGW-C) and the User Plane
//! (UPF) to install packet detection, forwarding and reporting rules.
//!
//! # Features
//!
//! - PFCP header encoding/decoding (node and session level)
//! - Information Element (IE) encoding/decoding, including grouped IEs
//! - Message registry mapping message type codes to typed decoders
//! - Decode limits configurable from YAML
//!
//! # Example
//!
//! ```rust
//! use pfcp_codec::message::{build_message, parse_message, HeartbeatRequest, PfcpMessage};
//! use pfcp_codec::types::RecoveryTimeStamp;
//!
//! let ts = RecoveryTimeStamp::from_unix_seconds(1_700_000_000);
//! let msg = PfcpMessage::HeartbeatRequest(HeartbeatRequest::new(ts));
//!
//! // Header length is patched once the IEs are written
//! let buf = build_message(&msg, 1, None).unwrap();
//!
//! let (header, decoded) = parse_message(&buf).unwrap();
//! assert_eq!(header.sequence_number, 1);
//! assert_eq!(decoded, msg);
//! ```

pub mod address;
pub mod config;
pub mod error;
pub mod grouped;
pub mod header;
pub mod ie;
pub mod message;
pub mod types;


pub use config::{CodecConfig, ConfigError, PfcpCodec};
pub use error::{PfcpError, PfcpResult};
pub use header::{PfcpHeader, PfcpMessageType, PFCP_HEADER_LEN, PFCP_HEADER_LEN_WITH_SEID};
pub use ie::{parse_ies, InformationElement};
pub use message::{build_message, decode_message, parse_message, DecodedMessage, PfcpMessage};
pub use types::PFCP_UDP_PORT;

/// Everything needed to build and read messages, in one import
pub mod prelude {
    pub use crate::address::{
        FSeid, FTeid, Fqdn, IpAllocation, NodeId, SourceIpAddress, UeIpAddress,
    };
    pub use crate::config::{CodecConfig, PfcpCodec};
    pub use crate::error::{PfcpError, PfcpResult};
    pub use crate::grouped::{
        CreateFar, CreatePdr, CreatedPdr, DownlinkDataReport, Far, ForwardingParameters, Pdi,
        Pdr, RemoveFar, RemovePdr, UpdateFar, UpdateForwardingParameters, UpdatePdr,
    };
    pub use crate::header::{PfcpHeader, PfcpMessageType};
    pub use crate::ie::{IeHeader, IeType, InformationElement, RawIe, UnknownIe};
    pub use crate::message::{
        build, build_message, decode_message, parse_message, AssociationReleaseRequest,
        AssociationReleaseResponse, AssociationSetupRequest, AssociationSetupResponse,
        DecodedMessage, HeartbeatRequest, HeartbeatResponse, MessageBody, NodeReportRequest,
        NodeReportResponse, PfcpMessage, SessionDeletionRequest, SessionDeletionResponse,
        SessionEstablishmentRequest, SessionEstablishmentResponse, SessionModificationRequest,
        SessionModificationResponse, SessionReportRequest, SessionReportResponse,
    };
    pub use crate::types::{
        ApplyAction, ApplyActionFlags, CpFunctionFeatures, DestinationInterface, FarId,
        NetworkInstance, NodeReportType, OffendingIe, PdrId, PfcpCause, Precedence,
        PrimaryAction, RecoveryTimeStamp, ReportType, SourceInterface, UpFunctionFeatures,
    };
}
