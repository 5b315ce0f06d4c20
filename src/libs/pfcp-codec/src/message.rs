//! PFCP Messages
//!
//! PFCP message structures, the message registry and complete message
//! encoding/decoding as specified in 3GPP TS 29.244 Section 7.

use bytes::BytesMut;
use crate::address::{FSeid, NodeId, SourceIpAddress};
use crate::config::{CodecConfig, PFCP_MAX_MESSAGE_LEN};
use crate::error::{PfcpError, PfcpResult};
use crate::grouped::{
    CreateFar, CreatePdr, CreatedPdr, DownlinkDataReport, RemoveFar, RemovePdr, UpdateFar,
    UpdatePdr,
};
use crate::header::{PfcpHeader, PfcpMessageType, PFCP_MANDATORY_HEADER_LEN};
use crate::ie::{collect_ies, IeType, InformationElement, RawIe, UnknownIe};
use crate::types::{
    CpFunctionFeatures, NodeReportType, OffendingIe, PfcpCause, RecoveryTimeStamp, ReportType,
    UpFunctionFeatures,
};

/// Body of one PFCP message type
pub trait MessageBody: Sized + Into<PfcpMessage> {
    const MESSAGE_TYPE: PfcpMessageType;

    /// IEs this message carries, in the order they are encoded
    const EXPECTED_IES: &'static [IeType];

    /// Append the IEs (without header)
    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()>;

    /// Bind the message fields from its parsed IEs
    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self>;
}

fn mandatory<T>(value: Option<T>, ie_type: IeType) -> PfcpResult<T> {
    value.ok_or(PfcpError::MissingMandatoryIe(ie_type.name()))
}

fn skip_ie(message_type: PfcpMessageType, ie: &RawIe<'_>) {
    log::trace!(
        "{}: skipping IE {} ({} bytes)",
        message_type.name(),
        ie.ie_type,
        ie.length
    );
}

fn encode_optional<T: InformationElement>(ie: &Option<T>, buf: &mut BytesMut) -> PfcpResult<()> {
    match ie {
        Some(ie) => ie.encode(buf),
        None => Ok(()),
    }
}

fn encode_all<T: InformationElement>(ies: &[T], buf: &mut BytesMut) -> PfcpResult<()> {
    ies.iter().try_for_each(|ie| ie.encode(buf))
}

/// Heartbeat Request message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatRequest {
    pub recovery_time_stamp: RecoveryTimeStamp,
    pub source_ip_address: Option<SourceIpAddress>,
}

impl HeartbeatRequest {
    pub fn new(recovery_time_stamp: RecoveryTimeStamp) -> Self {
        Self {
            recovery_time_stamp,
            source_ip_address: None,
        }
    }
}

impl MessageBody for HeartbeatRequest {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::HeartbeatRequest;
    const EXPECTED_IES: &'static [IeType] = &[IeType::RecoveryTimeStamp, IeType::SourceIpAddress];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.recovery_time_stamp.encode(buf)?;
        encode_optional(&self.source_ip_address, buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut recovery_time_stamp = None;
        let mut source_ip_address = None;

        for ie in ies {
            match ie.known_type() {
                Some(IeType::RecoveryTimeStamp) => recovery_time_stamp = Some(ie.decode_as()?),
                Some(IeType::SourceIpAddress) => source_ip_address = Some(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            recovery_time_stamp: mandatory(recovery_time_stamp, IeType::RecoveryTimeStamp)?,
            source_ip_address,
        })
    }
}

/// Heartbeat Response message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatResponse {
    pub recovery_time_stamp: RecoveryTimeStamp,
}

impl HeartbeatResponse {
    pub fn new(recovery_time_stamp: RecoveryTimeStamp) -> Self {
        Self { recovery_time_stamp }
    }
}

impl MessageBody for HeartbeatResponse {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::HeartbeatResponse;
    const EXPECTED_IES: &'static [IeType] = &[IeType::RecoveryTimeStamp];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.recovery_time_stamp.encode(buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut recovery_time_stamp = None;

        for ie in ies {
            match ie.known_type() {
                Some(IeType::RecoveryTimeStamp) => recovery_time_stamp = Some(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            recovery_time_stamp: mandatory(recovery_time_stamp, IeType::RecoveryTimeStamp)?,
        })
    }
}

/// Association Setup Request message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationSetupRequest {
    pub node_id: NodeId,
    pub recovery_time_stamp: RecoveryTimeStamp,
    pub up_function_features: Option<UpFunctionFeatures>,
    pub cp_function_features: Option<CpFunctionFeatures>,
}

impl AssociationSetupRequest {
    pub fn new(node_id: NodeId, recovery_time_stamp: RecoveryTimeStamp) -> Self {
        Self {
            node_id,
            recovery_time_stamp,
            up_function_features: None,
            cp_function_features: None,
        }
    }
}

impl MessageBody for AssociationSetupRequest {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::AssociationSetupRequest;
    const EXPECTED_IES: &'static [IeType] = &[
        IeType::NodeId,
        IeType::RecoveryTimeStamp,
        IeType::UpFunctionFeatures,
        IeType::CpFunctionFeatures,
    ];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.node_id.encode(buf)?;
        self.recovery_time_stamp.encode(buf)?;
        encode_optional(&self.up_function_features, buf)?;
        encode_optional(&self.cp_function_features, buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut node_id = None;
        let mut recovery_time_stamp = None;
        let mut up_function_features = None;
        let mut cp_function_features = None;

        for ie in ies {
            match ie.known_type() {
                Some(IeType::NodeId) => node_id = Some(ie.decode_as()?),
                Some(IeType::RecoveryTimeStamp) => recovery_time_stamp = Some(ie.decode_as()?),
                Some(IeType::UpFunctionFeatures) => up_function_features = Some(ie.decode_as()?),
                Some(IeType::CpFunctionFeatures) => cp_function_features = Some(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            node_id: mandatory(node_id, IeType::NodeId)?,
            recovery_time_stamp: mandatory(recovery_time_stamp, IeType::RecoveryTimeStamp)?,
            up_function_features,
            cp_function_features,
        })
    }
}

/// Association Setup Response message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationSetupResponse {
    pub node_id: NodeId,
    pub cause: PfcpCause,
    pub recovery_time_stamp: RecoveryTimeStamp,
    pub up_function_features: Option<UpFunctionFeatures>,
    pub cp_function_features: Option<CpFunctionFeatures>,
}

impl AssociationSetupResponse {
    pub fn new(node_id: NodeId, cause: PfcpCause, recovery_time_stamp: RecoveryTimeStamp) -> Self {
        Self {
            node_id,
            cause,
            recovery_time_stamp,
            up_function_features: None,
            cp_function_features: None,
        }
    }
}

impl MessageBody for AssociationSetupResponse {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::AssociationSetupResponse;
    const EXPECTED_IES: &'static [IeType] = &[
        IeType::NodeId,
        IeType::Cause,
        IeType::RecoveryTimeStamp,
        IeType::UpFunctionFeatures,
        IeType::CpFunctionFeatures,
    ];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.node_id.encode(buf)?;
        self.cause.encode(buf)?;
        self.recovery_time_stamp.encode(buf)?;
        encode_optional(&self.up_function_features, buf)?;
        encode_optional(&self.cp_function_features, buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut node_id = None;
        let mut cause = None;
        let mut recovery_time_stamp = None;
        let mut up_function_features = None;
        let mut cp_function_features = None;

        for ie in ies {
            match ie.known_type() {
                Some(IeType::NodeId) => node_id = Some(ie.decode_as()?),
                Some(IeType::Cause) => cause = Some(ie.decode_as()?),
                Some(IeType::RecoveryTimeStamp) => recovery_time_stamp = Some(ie.decode_as()?),
                Some(IeType::UpFunctionFeatures) => up_function_features = Some(ie.decode_as()?),
                Some(IeType::CpFunctionFeatures) => cp_function_features = Some(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            node_id: mandatory(node_id, IeType::NodeId)?,
            cause: mandatory(cause, IeType::Cause)?,
            recovery_time_stamp: mandatory(recovery_time_stamp, IeType::RecoveryTimeStamp)?,
            up_function_features,
            cp_function_features,
        })
    }
}

/// Association Release Request message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationReleaseRequest {
    pub node_id: NodeId,
}

impl AssociationReleaseRequest {
    pub fn new(node_id: NodeId) -> Self {
        Self { node_id }
    }
}

impl MessageBody for AssociationReleaseRequest {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::AssociationReleaseRequest;
    const EXPECTED_IES: &'static [IeType] = &[IeType::NodeId];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.node_id.encode(buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut node_id = None;

        for ie in ies {
            match ie.known_type() {
                Some(IeType::NodeId) => node_id = Some(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            node_id: mandatory(node_id, IeType::NodeId)?,
        })
    }
}

/// Association Release Response message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationReleaseResponse {
    pub node_id: NodeId,
    pub cause: PfcpCause,
}

impl AssociationReleaseResponse {
    pub fn new(node_id: NodeId, cause: PfcpCause) -> Self {
        Self { node_id, cause }
    }
}

impl MessageBody for AssociationReleaseResponse {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::AssociationReleaseResponse;
    const EXPECTED_IES: &'static [IeType] = &[IeType::NodeId, IeType::Cause];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.node_id.encode(buf)?;
        self.cause.encode(buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut node_id = None;
        let mut cause = None;

        for ie in ies {
            match ie.known_type() {
                Some(IeType::NodeId) => node_id = Some(ie.decode_as()?),
                Some(IeType::Cause) => cause = Some(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            node_id: mandatory(node_id, IeType::NodeId)?,
            cause: mandatory(cause, IeType::Cause)?,
        })
    }
}

/// Node Report Request message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReportRequest {
    pub node_id: NodeId,
    pub node_report_type: NodeReportType,
}

impl NodeReportRequest {
    pub fn new(node_id: NodeId, node_report_type: NodeReportType) -> Self {
        Self {
            node_id,
            node_report_type,
        }
    }
}

impl MessageBody for NodeReportRequest {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::NodeReportRequest;
    const EXPECTED_IES: &'static [IeType] = &[IeType::NodeId, IeType::NodeReportType];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.node_id.encode(buf)?;
        self.node_report_type.encode(buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut node_id = None;
        let mut node_report_type = None;

        for ie in ies {
            match ie.known_type() {
                Some(IeType::NodeId) => node_id = Some(ie.decode_as()?),
                Some(IeType::NodeReportType) => node_report_type = Some(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            node_id: mandatory(node_id, IeType::NodeId)?,
            node_report_type: mandatory(node_report_type, IeType::NodeReportType)?,
        })
    }
}

/// Node Report Response message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReportResponse {
    pub node_id: NodeId,
    pub cause: PfcpCause,
    pub offending_ie: Option<OffendingIe>,
}

impl NodeReportResponse {
    pub fn new(node_id: NodeId, cause: PfcpCause) -> Self {
        Self {
            node_id,
            cause,
            offending_ie: None,
        }
    }
}

impl MessageBody for NodeReportResponse {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::NodeReportResponse;
    const EXPECTED_IES: &'static [IeType] = &[IeType::NodeId, IeType::Cause, IeType::OffendingIe];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.node_id.encode(buf)?;
        self.cause.encode(buf)?;
        encode_optional(&self.offending_ie, buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut node_id = None;
        let mut cause = None;
        let mut offending_ie = None;

        for ie in ies {
            match ie.known_type() {
                Some(IeType::NodeId) => node_id = Some(ie.decode_as()?),
                Some(IeType::Cause) => cause = Some(ie.decode_as()?),
                Some(IeType::OffendingIe) => offending_ie = Some(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            node_id: mandatory(node_id, IeType::NodeId)?,
            cause: mandatory(cause, IeType::Cause)?,
            offending_ie,
        })
    }
}

/// Session Establishment Request message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEstablishmentRequest {
    pub node_id: NodeId,
    pub cp_f_seid: FSeid,
    pub create_pdrs: Vec<CreatePdr>,
    pub create_fars: Vec<CreateFar>,
}

impl SessionEstablishmentRequest {
    pub fn new(node_id: NodeId, cp_f_seid: FSeid) -> Self {
        Self {
            node_id,
            cp_f_seid,
            create_pdrs: Vec::new(),
            create_fars: Vec::new(),
        }
    }
}

impl MessageBody for SessionEstablishmentRequest {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::SessionEstablishmentRequest;
    const EXPECTED_IES: &'static [IeType] = &[
        IeType::NodeId,
        IeType::FSeid,
        IeType::CreatePdr,
        IeType::CreateFar,
    ];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.node_id.encode(buf)?;
        self.cp_f_seid.encode(buf)?;
        encode_all(&self.create_pdrs, buf)?;
        encode_all(&self.create_fars, buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut node_id = None;
        let mut cp_f_seid = None;
        let mut create_pdrs = Vec::new();
        let mut create_fars = Vec::new();

        for ie in ies {
            match ie.known_type() {
                Some(IeType::NodeId) => node_id = Some(ie.decode_as()?),
                Some(IeType::FSeid) => cp_f_seid = Some(ie.decode_as()?),
                Some(IeType::CreatePdr) => create_pdrs.push(ie.decode_as()?),
                Some(IeType::CreateFar) => create_fars.push(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            node_id: mandatory(node_id, IeType::NodeId)?,
            cp_f_seid: mandatory(cp_f_seid, IeType::FSeid)?,
            create_pdrs,
            create_fars,
        })
    }
}

/// Session Establishment Response message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEstablishmentResponse {
    pub node_id: NodeId,
    pub cause: PfcpCause,
    pub offending_ie: Option<OffendingIe>,
    pub up_f_seid: Option<FSeid>,
    pub created_pdrs: Vec<CreatedPdr>,
}

impl SessionEstablishmentResponse {
    pub fn new(node_id: NodeId, cause: PfcpCause) -> Self {
        Self {
            node_id,
            cause,
            offending_ie: None,
            up_f_seid: None,
            created_pdrs: Vec::new(),
        }
    }
}

impl MessageBody for SessionEstablishmentResponse {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::SessionEstablishmentResponse;
    const EXPECTED_IES: &'static [IeType] = &[
        IeType::NodeId,
        IeType::Cause,
        IeType::OffendingIe,
        IeType::FSeid,
        IeType::CreatedPdr,
    ];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.node_id.encode(buf)?;
        self.cause.encode(buf)?;
        encode_optional(&self.offending_ie, buf)?;
        encode_optional(&self.up_f_seid, buf)?;
        encode_all(&self.created_pdrs, buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut node_id = None;
        let mut cause = None;
        let mut offending_ie = None;
        let mut up_f_seid = None;
        let mut created_pdrs = Vec::new();

        for ie in ies {
            match ie.known_type() {
                Some(IeType::NodeId) => node_id = Some(ie.decode_as()?),
                Some(IeType::Cause) => cause = Some(ie.decode_as()?),
                Some(IeType::OffendingIe) => offending_ie = Some(ie.decode_as()?),
                Some(IeType::FSeid) => up_f_seid = Some(ie.decode_as()?),
                Some(IeType::CreatedPdr) => created_pdrs.push(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            node_id: mandatory(node_id, IeType::NodeId)?,
            cause: mandatory(cause, IeType::Cause)?,
            offending_ie,
            up_f_seid,
            created_pdrs,
        })
    }
}

/// Session Modification Request message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionModificationRequest {
    pub cp_f_seid: Option<FSeid>,
    pub remove_pdrs: Vec<RemovePdr>,
    pub remove_fars: Vec<RemoveFar>,
    pub create_pdrs: Vec<CreatePdr>,
    pub create_fars: Vec<CreateFar>,
    pub update_pdrs: Vec<UpdatePdr>,
    pub update_fars: Vec<UpdateFar>,
}

impl SessionModificationRequest {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageBody for SessionModificationRequest {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::SessionModificationRequest;
    const EXPECTED_IES: &'static [IeType] = &[
        IeType::FSeid,
        IeType::RemovePdr,
        IeType::RemoveFar,
        IeType::CreatePdr,
        IeType::CreateFar,
        IeType::UpdatePdr,
        IeType::UpdateFar,
    ];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        encode_optional(&self.cp_f_seid, buf)?;
        encode_all(&self.remove_pdrs, buf)?;
        encode_all(&self.remove_fars, buf)?;
        encode_all(&self.create_pdrs, buf)?;
        encode_all(&self.create_fars, buf)?;
        encode_all(&self.update_pdrs, buf)?;
        encode_all(&self.update_fars, buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut msg = Self::default();

        for ie in ies {
            match ie.known_type() {
                Some(IeType::FSeid) => msg.cp_f_seid = Some(ie.decode_as()?),
                Some(IeType::RemovePdr) => msg.remove_pdrs.push(ie.decode_as()?),
                Some(IeType::RemoveFar) => msg.remove_fars.push(ie.decode_as()?),
                Some(IeType::CreatePdr) => msg.create_pdrs.push(ie.decode_as()?),
                Some(IeType::CreateFar) => msg.create_fars.push(ie.decode_as()?),
                Some(IeType::UpdatePdr) => msg.update_pdrs.push(ie.decode_as()?),
                Some(IeType::UpdateFar) => msg.update_fars.push(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(msg)
    }
}

/// Session Modification Response message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionModificationResponse {
    pub cause: PfcpCause,
    pub offending_ie: Option<OffendingIe>,
    pub created_pdrs: Vec<CreatedPdr>,
}

impl SessionModificationResponse {
    pub fn new(cause: PfcpCause) -> Self {
        Self {
            cause,
            offending_ie: None,
            created_pdrs: Vec::new(),
        }
    }
}

impl MessageBody for SessionModificationResponse {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::SessionModificationResponse;
    const EXPECTED_IES: &'static [IeType] =
        &[IeType::Cause, IeType::OffendingIe, IeType::CreatedPdr];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.cause.encode(buf)?;
        encode_optional(&self.offending_ie, buf)?;
        encode_all(&self.created_pdrs, buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut cause = None;
        let mut offending_ie = None;
        let mut created_pdrs = Vec::new();

        for ie in ies {
            match ie.known_type() {
                Some(IeType::Cause) => cause = Some(ie.decode_as()?),
                Some(IeType::OffendingIe) => offending_ie = Some(ie.decode_as()?),
                Some(IeType::CreatedPdr) => created_pdrs.push(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            cause: mandatory(cause, IeType::Cause)?,
            offending_ie,
            created_pdrs,
        })
    }
}

/// Session Deletion Request message; the SEID in the header names the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionDeletionRequest;

impl MessageBody for SessionDeletionRequest {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::SessionDeletionRequest;
    const EXPECTED_IES: &'static [IeType] = &[];

    fn encode(&self, _buf: &mut BytesMut) -> PfcpResult<()> {
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        for ie in ies {
            skip_ie(Self::MESSAGE_TYPE, ie);
        }
        Ok(Self)
    }
}

/// Session Deletion Response message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDeletionResponse {
    pub cause: PfcpCause,
    pub offending_ie: Option<OffendingIe>,
}

impl SessionDeletionResponse {
    pub fn new(cause: PfcpCause) -> Self {
        Self {
            cause,
            offending_ie: None,
        }
    }
}

impl MessageBody for SessionDeletionResponse {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::SessionDeletionResponse;
    const EXPECTED_IES: &'static [IeType] = &[IeType::Cause, IeType::OffendingIe];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.cause.encode(buf)?;
        encode_optional(&self.offending_ie, buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut cause = None;
        let mut offending_ie = None;

        for ie in ies {
            match ie.known_type() {
                Some(IeType::Cause) => cause = Some(ie.decode_as()?),
                Some(IeType::OffendingIe) => offending_ie = Some(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            cause: mandatory(cause, IeType::Cause)?,
            offending_ie,
        })
    }
}

/// Session Report Request message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReportRequest {
    pub report_type: ReportType,
    pub downlink_data_report: Option<DownlinkDataReport>,
}

impl SessionReportRequest {
    pub fn new(report_type: ReportType) -> Self {
        Self {
            report_type,
            downlink_data_report: None,
        }
    }
}

impl MessageBody for SessionReportRequest {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::SessionReportRequest;
    const EXPECTED_IES: &'static [IeType] = &[IeType::ReportType, IeType::DownlinkDataReport];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.report_type.encode(buf)?;
        encode_optional(&self.downlink_data_report, buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut report_type = None;
        let mut downlink_data_report = None;

        for ie in ies {
            match ie.known_type() {
                Some(IeType::ReportType) => report_type = Some(ie.decode_as()?),
                Some(IeType::DownlinkDataReport) => downlink_data_report = Some(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            report_type: mandatory(report_type, IeType::ReportType)?,
            downlink_data_report,
        })
    }
}

/// Session Report Response message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReportResponse {
    pub cause: PfcpCause,
    pub offending_ie: Option<OffendingIe>,
}

impl SessionReportResponse {
    pub fn new(cause: PfcpCause) -> Self {
        Self {
            cause,
            offending_ie: None,
        }
    }
}

impl MessageBody for SessionReportResponse {
    const MESSAGE_TYPE: PfcpMessageType = PfcpMessageType::SessionReportResponse;
    const EXPECTED_IES: &'static [IeType] = &[IeType::Cause, IeType::OffendingIe];

    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.cause.encode(buf)?;
        encode_optional(&self.offending_ie, buf)?;
        Ok(())
    }

    fn decode(ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let mut cause = None;
        let mut offending_ie = None;

        for ie in ies {
            match ie.known_type() {
                Some(IeType::Cause) => cause = Some(ie.decode_as()?),
                Some(IeType::OffendingIe) => offending_ie = Some(ie.decode_as()?),
                _ => skip_ie(Self::MESSAGE_TYPE, ie),
            }
        }

        Ok(Self {
            cause: mandatory(cause, IeType::Cause)?,
            offending_ie,
        })
    }
}

/// Registry entry: how to decode one message type
#[derive(Clone, Copy)]
pub struct MessageDescriptor {
    pub message_type: PfcpMessageType,
    /// IEs in encoding order
    pub expected_ies: &'static [IeType],
    pub decode: fn(&[RawIe<'_>]) -> PfcpResult<PfcpMessage>,
}

impl std::fmt::Debug for MessageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageDescriptor")
            .field("message_type", &self.message_type)
            .field("expected_ies", &self.expected_ies)
            .finish_non_exhaustive()
    }
}

fn decode_registered<M: MessageBody>(ies: &[RawIe<'_>]) -> PfcpResult<PfcpMessage> {
    M::decode(ies).map(Into::into)
}

/// Generate [`PfcpMessage`] and the registry from the list of message bodies
macro_rules! pfcp_messages {
    ($($name:ident),+ $(,)?) => {
        /// PFCP Message enum containing all registered message types
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum PfcpMessage {
            $($name($name),)+
        }

        $(
            impl From<$name> for PfcpMessage {
                fn from(msg: $name) -> Self {
                    Self::$name(msg)
                }
            }
        )+

        impl PfcpMessage {
            /// Get the message type
            pub fn message_type(&self) -> PfcpMessageType {
                match self {
                    $(Self::$name(_) => <$name as MessageBody>::MESSAGE_TYPE,)+
                }
            }

            /// Encode the message body (without header)
            pub fn encode_body(&self, buf: &mut BytesMut) -> PfcpResult<()> {
                match self {
                    $(Self::$name(msg) => msg.encode(buf),)+
                }
            }
        }

        static REGISTRY: &[MessageDescriptor] = &[
            $(MessageDescriptor {
                message_type: <$name as MessageBody>::MESSAGE_TYPE,
                expected_ies: <$name as MessageBody>::EXPECTED_IES,
                decode: decode_registered::<$name>,
            },)+
        ];
    };
}

pfcp_messages! {
    HeartbeatRequest,
    HeartbeatResponse,
    AssociationSetupRequest,
    AssociationSetupResponse,
    AssociationReleaseRequest,
    AssociationReleaseResponse,
    NodeReportRequest,
    NodeReportResponse,
    SessionEstablishmentRequest,
    SessionEstablishmentResponse,
    SessionModificationRequest,
    SessionModificationResponse,
    SessionDeletionRequest,
    SessionDeletionResponse,
    SessionReportRequest,
    SessionReportResponse,
}

impl PfcpMessage {
    /// Decode message body based on message type
    pub fn decode_body(message_type: PfcpMessageType, ies: &[RawIe<'_>]) -> PfcpResult<Self> {
        let descriptor = message_descriptor(message_type as u8)
            .ok_or(PfcpError::UnknownMessageType(message_type as u8))?;
        (descriptor.decode)(ies)
    }
}

/// All registered message types
pub fn registry() -> &'static [MessageDescriptor] {
    REGISTRY
}

/// Look up the decoder for a message type code
pub fn message_descriptor(message_type: u8) -> Option<&'static MessageDescriptor> {
    REGISTRY
        .iter()
        .find(|d| d.message_type as u8 == message_type)
}

/// A decoded message with the IEs this crate does not model
///
/// A known IE that the message type does not expect lands in neither a
/// typed field nor `unknown_ies`; it is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    pub header: PfcpHeader,
    pub message: PfcpMessage,
    /// IEs with codes outside [`IeType`], in arrival order
    pub unknown_ies: Vec<UnknownIe>,
}

/// Build a complete PFCP message with header
///
/// Session-level messages always carry a SEID (0 when `seid` is `None`);
/// node-level messages never do. Fails with [`PfcpError::IeTooLong`] or
/// [`PfcpError::MessageTooLong`] when a length field would overflow.
pub fn build_message(
    message: &PfcpMessage,
    sequence_number: u32,
    seid: Option<u64>,
) -> PfcpResult<BytesMut> {
    let header = PfcpHeader::for_message(message.message_type(), sequence_number, seid);

    let mut buf = BytesMut::with_capacity(header.header_len() + 64);
    header.encode(&mut buf);
    message.encode_body(&mut buf)?;
    patch_message_length(&mut buf)?;

    log::debug!(
        "Built {} (seq={}, {} bytes)",
        header.message_type.name(),
        header.sequence_number,
        buf.len()
    );
    Ok(buf)
}

/// Build a message from any registered body
pub fn build<M: MessageBody>(
    body: M,
    sequence_number: u32,
    seid: Option<u64>,
) -> PfcpResult<BytesMut> {
    build_message(&body.into(), sequence_number, seid)
}

/// Message length counts everything after the first four octets
fn patch_message_length(buf: &mut BytesMut) -> PfcpResult<()> {
    let length = u16::try_from(buf.len() - PFCP_MANDATORY_HEADER_LEN).map_err(|_| {
        PfcpError::MessageTooLong {
            length: buf.len(),
            max: PFCP_MAX_MESSAGE_LEN,
        }
    })?;
    buf[2..4].copy_from_slice(&length.to_be_bytes());
    Ok(())
}

/// Parse a complete PFCP message
pub fn parse_message(buf: &[u8]) -> PfcpResult<(PfcpHeader, PfcpMessage)> {
    let decoded = decode_message(buf)?;
    Ok((decoded.header, decoded.message))
}

/// Parse a complete PFCP message, keeping unknown IEs
pub fn decode_message(buf: &[u8]) -> PfcpResult<DecodedMessage> {
    decode_message_with(buf, &CodecConfig::default())
}

pub(crate) fn decode_message_with(buf: &[u8], config: &CodecConfig) -> PfcpResult<DecodedMessage> {
    let result = decode_framed(buf, config);
    if let Err(e) = &result {
        log::debug!("Failed to decode PFCP message ({} bytes): {}", buf.len(), e);
    }
    result
}

fn decode_framed(buf: &[u8], config: &CodecConfig) -> PfcpResult<DecodedMessage> {
    let header = PfcpHeader::decode(buf)?;

    let total = PFCP_MANDATORY_HEADER_LEN + header.length as usize;
    if total > config.max_message_len {
        return Err(PfcpError::MessageTooLong {
            length: total,
            max: config.max_message_len,
        });
    }
    if total < header.header_len() || total > buf.len() {
        return Err(PfcpError::LengthMismatch {
            declared: total,
            available: buf.len(),
        });
    }
    if total < buf.len() {
        if !config.allow_trailing_bytes {
            return Err(PfcpError::LengthMismatch {
                declared: total,
                available: buf.len(),
            });
        }
        log::debug!("Ignoring {} bytes after PFCP message", buf.len() - total);
    }

    let ies = collect_ies(&buf[header.header_len()..total])?;
    let message = PfcpMessage::decode_body(header.message_type, &ies)?;
    let unknown_ies = ies
        .iter()
        .filter(|ie| ie.known_type().is_none())
        .map(RawIe::to_unknown)
        .collect();

    Ok(DecodedMessage {
        header,
        message,
        unknown_ies,
    })
}

/// Append an opaque IE to an encoded message, keeping the length field in step
///
/// `buf` must hold a message produced by [`build_message`]. On error `buf` is
/// left unchanged.
pub fn append_unknown_ie(buf: &mut BytesMut, ie: &UnknownIe) -> PfcpResult<()> {
    let end = buf.len();
    ie.encode(buf)?;
    patch_message_length(buf).map_err(|e| {
        buf.truncate(end);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::FTeid;
    use crate::grouped::{ForwardingParameters, Pdi};
    use crate::header::{PFCP_HEADER_LEN, PFCP_HEADER_LEN_WITH_SEID};
    use crate::types::{ApplyAction, DestinationInterface, FarId, PdrId, SourceInterface};
    use bytes::Bytes;
    use std::net::Ipv4Addr;

    fn node_id() -> NodeId {
        NodeId::Ipv4(Ipv4Addr::new(10, 0, 0, 1))
    }

    #[test]
    fn test_build_heartbeat_bytes() {
        let msg = HeartbeatRequest::new(RecoveryTimeStamp::new(0x01020304));
        let buf = build(msg, 1, None).unwrap();

        assert_eq!(
            buf.as_ref(),
            &[
                0x20, 0x01, 0x00, 0x0c, 0x00, 0x00, 0x01, 0x00, // header
                0x00, 0x60, 0x00, 0x04, 0x01, 0x02, 0x03, 0x04, // Recovery Time Stamp
            ]
        );
    }

    #[test]
    fn test_build_parse_heartbeat() {
        let ts = RecoveryTimeStamp::from_unix_seconds(1_700_000_000);
        let msg = PfcpMessage::HeartbeatRequest(HeartbeatRequest::new(ts));
        let buf = build_message(&msg, 1, None).unwrap();

        let (header, decoded) = parse_message(&buf).unwrap();

        assert_eq!(header.message_type, PfcpMessageType::HeartbeatRequest);
        assert_eq!(header.sequence_number, 1);
        assert_eq!(header.seid, None);

        if let PfcpMessage::HeartbeatRequest(req) = decoded {
            assert_eq!(req.recovery_time_stamp, ts);
            assert_eq!(req.recovery_time_stamp.unix_seconds(), 1_700_000_000);
        } else {
            panic!("Wrong message type");
        }
    }

    #[test]
    fn test_heartbeat_response_with_source_ip() {
        let mut req = HeartbeatRequest::new(RecoveryTimeStamp::new(100));
        req.source_ip_address = Some(SourceIpAddress::new(Some(Ipv4Addr::new(10, 0, 0, 9)), None));
        let buf = build(req.clone(), 7, None).unwrap();
        assert_eq!(parse_message(&buf).unwrap().1, PfcpMessage::HeartbeatRequest(req));

        let rsp = HeartbeatResponse::new(RecoveryTimeStamp::new(200));
        let buf = build(rsp.clone(), 7, None).unwrap();
        assert_eq!(parse_message(&buf).unwrap().1, PfcpMessage::HeartbeatResponse(rsp));
    }

    #[test]
    fn test_length_field_matches_buffer() {
        let mut msg = SessionEstablishmentRequest::new(node_id(), FSeid::new(1, Some(Ipv4Addr::LOCALHOST), None));
        msg.create_pdrs.push(CreatePdr::new(1, 100, Pdi::new(SourceInterface::ACCESS)));
        let buf = build(msg, 3, Some(5)).unwrap();

        let length = u16::from_be_bytes([buf[2], buf[3]]) as usize;
        assert_eq!(length, buf.len() - 4);
    }

    #[test]
    fn test_association_setup_roundtrip() {
        let mut req = AssociationSetupRequest::new(
            NodeId::new("smf.example.org").unwrap(),
            RecoveryTimeStamp::new(3_900_000_000),
        );
        req.cp_function_features = Some(CpFunctionFeatures::LOAD);
        let buf = build(req.clone(), 10, None).unwrap();
        assert_eq!(parse_message(&buf).unwrap().1, PfcpMessage::AssociationSetupRequest(req));

        let mut rsp = AssociationSetupResponse::new(
            node_id(),
            PfcpCause::RequestAccepted,
            RecoveryTimeStamp::new(3_900_000_001),
        );
        rsp.up_function_features = Some(UpFunctionFeatures::FTUP | UpFunctionFeatures::UEIP);
        let buf = build(rsp.clone(), 10, None).unwrap();
        assert_eq!(parse_message(&buf).unwrap().1, PfcpMessage::AssociationSetupResponse(rsp));
    }

    #[test]
    fn test_association_release_roundtrip() {
        let req = AssociationReleaseRequest::new(node_id());
        let buf = build(req.clone(), 11, None).unwrap();
        assert_eq!(parse_message(&buf).unwrap().1, PfcpMessage::AssociationReleaseRequest(req));

        let rsp = AssociationReleaseResponse::new(node_id(), PfcpCause::RequestAccepted);
        let buf = build(rsp.clone(), 11, None).unwrap();
        assert_eq!(parse_message(&buf).unwrap().1, PfcpMessage::AssociationReleaseResponse(rsp));
    }

    #[test]
    fn test_node_report_roundtrip() {
        let req = NodeReportRequest::new(node_id(), NodeReportType::UPFR);
        let buf = build(req.clone(), 12, None).unwrap();
        assert_eq!(parse_message(&buf).unwrap().1, PfcpMessage::NodeReportRequest(req));

        let mut rsp = NodeReportResponse::new(node_id(), PfcpCause::MandatoryIeMissing);
        rsp.offending_ie = Some(OffendingIe(IeType::NodeReportType as u16));
        let buf = build(rsp.clone(), 12, None).unwrap();
        assert_eq!(parse_message(&buf).unwrap().1, PfcpMessage::NodeReportResponse(rsp));
    }

    #[test]
    fn test_session_establishment_with_grouped_ies() {
        let cp_f_seid = FSeid::new(0x1234, Some(Ipv4Addr::new(10, 0, 0, 1)), None);
        let mut msg = SessionEstablishmentRequest::new(node_id(), cp_f_seid);

        let pdi = Pdi::new(SourceInterface::ACCESS).with_local_f_teid(FTeid::choose(true, false, None));
        msg.create_pdrs.push(CreatePdr::new(1, 100, pdi).with_far_id(1));
        msg.create_pdrs.push(CreatePdr::new(2, 200, Pdi::new(SourceInterface::CORE)).with_far_id(2));
        msg.create_fars.push(
            CreateFar::new(1, ApplyAction::forward())
                .with_forwarding_parameters(ForwardingParameters::new(DestinationInterface::CORE)),
        );
        msg.create_fars.push(CreateFar::new(2, ApplyAction::buffer()));

        let buf = build(msg, 42, Some(0x1234)).unwrap();
        let (header, decoded) = parse_message(&buf).unwrap();

        assert_eq!(header.message_type, PfcpMessageType::SessionEstablishmentRequest);
        assert_eq!(header.seid, Some(0x1234));

        if let PfcpMessage::SessionEstablishmentRequest(req) = decoded {
            assert_eq!(req.node_id, node_id());
            assert_eq!(req.cp_f_seid, cp_f_seid);
            assert_eq!(req.create_pdrs.len(), 2);
            assert_eq!(req.create_pdrs[0].pdr_id, PdrId(1));
            assert_eq!(req.create_pdrs[0].precedence.0, 100);
            assert_eq!(req.create_pdrs[0].far_id, Some(FarId(1)));
            assert_eq!(req.create_pdrs[1].pdi.source_interface, SourceInterface::CORE);
            assert_eq!(req.create_fars.len(), 2);
            assert_eq!(req.create_fars[0].apply_action, ApplyAction::forward());
            assert!(req.create_fars[0].forwarding_parameters.is_some());
            assert_eq!(req.create_fars[1].apply_action, ApplyAction::buffer());
        } else {
            panic!("Wrong message type");
        }
    }

    #[test]
    fn test_session_establishment_response_roundtrip() {
        let mut rsp = SessionEstablishmentResponse::new(node_id(), PfcpCause::RequestAccepted);
        rsp.up_f_seid = Some(FSeid::new(0x99, Some(Ipv4Addr::new(10, 0, 0, 2)), None));
        rsp.created_pdrs.push(CreatedPdr::new(
            1,
            Some(FTeid::new(0xABCD, Some(Ipv4Addr::new(10, 0, 0, 2)), None)),
        ));
        let buf = build(rsp.clone(), 42, Some(0x1234)).unwrap();
        assert_eq!(
            parse_message(&buf).unwrap().1,
            PfcpMessage::SessionEstablishmentResponse(rsp)
        );
    }

    #[test]
    fn test_session_modification_request_roundtrip() {
        let mut msg = SessionModificationRequest::new();
        msg.remove_pdrs.push(RemovePdr::new(1));
        msg.remove_fars.push(RemoveFar::new(1));
        msg.create_pdrs.push(CreatePdr::new(3, 30, Pdi::new(SourceInterface::CORE)));
        msg.create_fars.push(CreateFar::new(3, ApplyAction::drop()));
        let mut update_far = UpdateFar::new(2);
        update_far.apply_action = Some(ApplyAction::forward());
        msg.update_fars.push(update_far);
        msg.update_pdrs.push(UpdatePdr::new(2));

        let buf = build(msg.clone(), 5, Some(0x55)).unwrap();
        let (header, decoded) = parse_message(&buf).unwrap();
        assert_eq!(header.seid, Some(0x55));
        assert_eq!(decoded, PfcpMessage::SessionModificationRequest(msg));
    }

    #[test]
    fn test_session_modification_response_roundtrip() {
        let mut rsp = SessionModificationResponse::new(PfcpCause::RuleCreationModificationFailure);
        rsp.offending_ie = Some(OffendingIe(IeType::CreatePdr as u16));
        let buf = build(rsp.clone(), 5, Some(0x55)).unwrap();
        assert_eq!(
            parse_message(&buf).unwrap().1,
            PfcpMessage::SessionModificationResponse(rsp)
        );
    }

    #[test]
    fn test_session_deletion_roundtrip() {
        let buf = build(SessionDeletionRequest, 9, Some(0x77)).unwrap();
        assert_eq!(buf.len(), PFCP_HEADER_LEN_WITH_SEID);
        let (header, decoded) = parse_message(&buf).unwrap();
        assert_eq!(header.seid, Some(0x77));
        assert_eq!(decoded, PfcpMessage::SessionDeletionRequest(SessionDeletionRequest));

        let rsp = SessionDeletionResponse::new(PfcpCause::SessionContextNotFound);
        let buf = build(rsp.clone(), 9, Some(0x77)).unwrap();
        assert_eq!(parse_message(&buf).unwrap().1, PfcpMessage::SessionDeletionResponse(rsp));
    }

    #[test]
    fn test_session_report_roundtrip() {
        let mut req = SessionReportRequest::new(ReportType::DLDR);
        req.downlink_data_report = Some(DownlinkDataReport::new(1));
        let buf = build(req.clone(), 20, Some(0x88)).unwrap();
        assert_eq!(parse_message(&buf).unwrap().1, PfcpMessage::SessionReportRequest(req));

        let rsp = SessionReportResponse::new(PfcpCause::RequestAccepted);
        let buf = build(rsp.clone(), 20, Some(0x88)).unwrap();
        assert_eq!(parse_message(&buf).unwrap().1, PfcpMessage::SessionReportResponse(rsp));
    }

    #[test]
    fn test_session_message_without_seid_gets_zero() {
        let buf = build(SessionDeletionRequest, 1, None).unwrap();
        let (header, _) = parse_message(&buf).unwrap();
        assert_eq!(header.seid, Some(0));

        let buf = build(HeartbeatResponse::new(RecoveryTimeStamp::new(1)), 1, Some(3)).unwrap();
        assert_eq!(buf.len(), PFCP_HEADER_LEN + 8);
    }

    #[test]
    fn test_missing_mandatory_ie() {
        let buf = build(SessionDeletionRequest, 1, None).unwrap();
        let mut raw = BytesMut::from(&buf[..]);
        raw[1] = PfcpMessageType::SessionDeletionResponse as u8;

        assert_eq!(
            parse_message(&raw),
            Err(PfcpError::MissingMandatoryIe("Cause"))
        );
    }

    #[test]
    fn test_duplicate_ie_last_wins() {
        let mut buf = build(SessionReportResponse::new(PfcpCause::RequestRejected), 1, Some(1)).unwrap();
        append_unknown_ie(&mut buf, &UnknownIe::new(IeType::Cause as u16, Bytes::from_static(&[1]))).unwrap();

        if let PfcpMessage::SessionReportResponse(rsp) = parse_message(&buf).unwrap().1 {
            assert_eq!(rsp.cause, PfcpCause::RequestAccepted);
        } else {
            panic!("Wrong message type");
        }
    }

    #[test]
    fn test_unknown_ies_preserved() {
        let mut buf = build(HeartbeatRequest::new(RecoveryTimeStamp::new(5)), 1, None).unwrap();
        let vendor = UnknownIe::new(0x8001, Bytes::from_static(&[0x00, 0x0a, 0xff]));
        append_unknown_ie(&mut buf, &vendor).unwrap();
        // Known IE that Heartbeat Request does not carry
        append_unknown_ie(&mut buf, &UnknownIe::new(IeType::Cause as u16, Bytes::from_static(&[1]))).unwrap();

        let decoded = decode_message(&buf).unwrap();
        assert_eq!(decoded.unknown_ies, vec![vendor]);
        if let PfcpMessage::HeartbeatRequest(req) = decoded.message {
            assert_eq!(req.recovery_time_stamp.ntp_seconds, 5);
        } else {
            panic!("Wrong message type");
        }
    }

    #[test]
    fn test_unregistered_message_type() {
        let mut buf = build(HeartbeatRequest::new(RecoveryTimeStamp::new(5)), 1, None).unwrap();
        buf[1] = PfcpMessageType::PfdManagementRequest as u8;
        assert_eq!(parse_message(&buf), Err(PfcpError::UnknownMessageType(3)));

        buf[1] = 200;
        assert_eq!(parse_message(&buf), Err(PfcpError::UnknownMessageType(200)));
    }

    #[test]
    fn test_truncated_message() {
        let buf = build(
            AssociationSetupRequest::new(node_id(), RecoveryTimeStamp::new(1)),
            1,
            None,
        )
        .unwrap();
        for len in 0..buf.len() {
            assert!(parse_message(&buf[..len]).is_err(), "prefix of {} bytes", len);
        }
    }

    #[test]
    fn test_session_message_without_seid_rejected() {
        assert_eq!(
            parse_message(&[0x20, 54, 0, 4, 0, 0, 1, 0]),
            Err(PfcpError::SeidFlagMismatch { message_type: 54, seid_present: false })
        );
    }

    #[test]
    fn test_length_smaller_than_header() {
        let buf = [0x21, 0x36, 0x00, 0x04, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0];
        assert_eq!(
            parse_message(&buf),
            Err(PfcpError::LengthMismatch { declared: 8, available: 16 })
        );
    }

    #[test]
    fn test_trailing_bytes() {
        let mut raw = build(SessionDeletionRequest, 1, Some(2)).unwrap().to_vec();
        raw.extend_from_slice(&[0xde, 0xad]);
        assert!(parse_message(&raw).is_ok());

        let strict = CodecConfig {
            allow_trailing_bytes: false,
            ..Default::default()
        };
        assert_eq!(
            decode_message_with(&raw, &strict),
            Err(PfcpError::LengthMismatch { declared: 16, available: 18 })
        );
    }

    fn oversized_establishment(pdrs: u16) -> SessionEstablishmentRequest {
        let mut msg = SessionEstablishmentRequest::new(node_id(), FSeid::new(1, None, None));
        for id in 1..=pdrs {
            msg.create_pdrs
                .push(CreatePdr::new(id, 100, Pdi::new(SourceInterface::ACCESS)).with_far_id(1));
        }
        msg
    }

    #[test]
    fn test_build_rejects_message_over_length_field() {
        // 3000 PDRs of 35 bytes each overflow the 16-bit message length
        let result = build(oversized_establishment(3000), 1, Some(1));
        assert!(matches!(
            result,
            Err(PfcpError::MessageTooLong { length, max: PFCP_MAX_MESSAGE_LEN }) if length > PFCP_MAX_MESSAGE_LEN
        ));

        let result = crate::PfcpCodec::default().encode(&oversized_establishment(3000).into(), 1, Some(1));
        assert!(matches!(result, Err(PfcpError::MessageTooLong { .. })));

        // Largest body that still fits is accepted and parses back
        let buf = build(oversized_establishment(1800), 1, Some(1)).unwrap();
        assert!(buf.len() <= PFCP_MAX_MESSAGE_LEN);
        assert!(parse_message(&buf).is_ok());
    }

    #[test]
    fn test_build_rejects_grouped_ie_over_length_field() {
        let mut req = SessionReportRequest::new(ReportType::DLDR);
        req.downlink_data_report = Some(DownlinkDataReport {
            pdr_ids: (0..11000).map(PdrId).collect(),
        });
        assert_eq!(
            build(req, 1, Some(1)),
            Err(PfcpError::IeTooLong {
                ie_type: IeType::DownlinkDataReport as u16,
                length: 66000,
            })
        );
    }

    #[test]
    fn test_append_unknown_ie_overflow_leaves_buffer() {
        let mut buf = build(oversized_establishment(1800), 1, Some(1)).unwrap();
        let before = buf.clone();
        let blob = UnknownIe::new(0x8001, Bytes::from(vec![0u8; 4000]));
        assert!(matches!(
            append_unknown_ie(&mut buf, &blob),
            Err(PfcpError::MessageTooLong { .. })
        ));
        assert_eq!(buf, before);
        assert!(parse_message(&buf).is_ok());
    }

    #[test]
    fn test_registry() {
        assert_eq!(registry().len(), 16);
        let descriptor = message_descriptor(50).unwrap();
        assert_eq!(descriptor.message_type, PfcpMessageType::SessionEstablishmentRequest);
        assert_eq!(descriptor.expected_ies[0], IeType::NodeId);
        assert!(message_descriptor(3).is_none());

        for descriptor in registry() {
            assert!(message_descriptor(descriptor.message_type as u8).is_some());
        }
    }
}
