//! PFCP Types
//!
//! Scalar and flag-set Information Elements (TS 29.244 Section 8.2).

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bitflags::bitflags;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use crate::error::{PfcpError, PfcpResult};
use crate::ie::{exact_len, need, IeType, InformationElement};

/// PFCP Version
pub const PFCP_VERSION: u8 = 1;

/// PFCP UDP port (8805)
pub const PFCP_UDP_PORT: u16 = 8805;

/// Seconds between the NTP epoch (1900-01-01) and the Unix epoch (1970-01-01)
pub const NTP_UNIX_OFFSET: u64 = 2_208_988_800;

/// PFCP Cause Values (TS 29.244 Section 8.2.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PfcpCause {
    RequestAccepted = 1,
    MoreUsageReportToSend = 2,
    RequestRejected = 64,
    SessionContextNotFound = 65,
    MandatoryIeMissing = 66,
    ConditionalIeMissing = 67,
    InvalidLength = 68,
    MandatoryIeIncorrect = 69,
    InvalidForwardingPolicy = 70,
    InvalidFTeidAllocationOption = 71,
    NoEstablishedPfcpAssociation = 72,
    RuleCreationModificationFailure = 73,
    PfcpEntityInCongestion = 74,
    NoResourcesAvailable = 75,
    ServiceNotSupported = 76,
    SystemFailure = 77,
    RedirectionRequested = 78,
}

impl TryFrom<u8> for PfcpCause {
    type Error = PfcpError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::RequestAccepted),
            2 => Ok(Self::MoreUsageReportToSend),
            64 => Ok(Self::RequestRejected),
            65 => Ok(Self::SessionContextNotFound),
            66 => Ok(Self::MandatoryIeMissing),
            67 => Ok(Self::ConditionalIeMissing),
            68 => Ok(Self::InvalidLength),
            69 => Ok(Self::MandatoryIeIncorrect),
            70 => Ok(Self::InvalidForwardingPolicy),
            71 => Ok(Self::InvalidFTeidAllocationOption),
            72 => Ok(Self::NoEstablishedPfcpAssociation),
            73 => Ok(Self::RuleCreationModificationFailure),
            74 => Ok(Self::PfcpEntityInCongestion),
            75 => Ok(Self::NoResourcesAvailable),
            76 => Ok(Self::ServiceNotSupported),
            77 => Ok(Self::SystemFailure),
            78 => Ok(Self::RedirectionRequested),
            _ => Err(PfcpError::InvalidCauseValue(value)),
        }
    }
}

impl PfcpCause {
    /// Get the name of the cause
    pub fn name(&self) -> &'static str {
        match self {
            Self::RequestAccepted => "Request Accepted",
            Self::MoreUsageReportToSend => "More Usage Report to send",
            Self::RequestRejected => "Request Rejected",
            Self::SessionContextNotFound => "Session Context Not Found",
            Self::MandatoryIeMissing => "Mandatory IE Missing",
            Self::ConditionalIeMissing => "Conditional IE Missing",
            Self::InvalidLength => "Invalid Length",
            Self::MandatoryIeIncorrect => "Mandatory IE Incorrect",
            Self::InvalidForwardingPolicy => "Invalid Forwarding Policy",
            Self::InvalidFTeidAllocationOption => "Invalid F-TEID Allocation Option",
            Self::NoEstablishedPfcpAssociation => "No Established PFCP Association",
            Self::RuleCreationModificationFailure => "Rule Creation/Modification Failure",
            Self::PfcpEntityInCongestion => "PFCP Entity in Congestion",
            Self::NoResourcesAvailable => "No Resources Available",
            Self::ServiceNotSupported => "Service Not Supported",
            Self::SystemFailure => "System Failure",
            Self::RedirectionRequested => "Redirection Requested",
        }
    }

    /// Check if cause indicates success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::RequestAccepted | Self::MoreUsageReportToSend)
    }
}

impl InformationElement for PfcpCause {
    const IE_TYPE: IeType = IeType::Cause;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u8(*self as u8);
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        need(value, 1)?;
        Self::try_from(value[0])
    }
}

/// PDR ID (IE 56)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct PdrId(pub u16);

impl InformationElement for PdrId {
    const IE_TYPE: IeType = IeType::PdrId;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u16(self.0);
        Ok(())
    }

    fn deserialize(mut value: &[u8]) -> PfcpResult<Self> {
        exact_len(Self::IE_TYPE, value, 2)?;
        Ok(Self(value.get_u16()))
    }
}

/// FAR ID (IE 108)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct FarId(pub u32);

impl InformationElement for FarId {
    const IE_TYPE: IeType = IeType::FarId;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u32(self.0);
        Ok(())
    }

    fn deserialize(mut value: &[u8]) -> PfcpResult<Self> {
        exact_len(Self::IE_TYPE, value, 4)?;
        Ok(Self(value.get_u32()))
    }
}

/// Precedence (IE 29); lower values match first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Precedence(pub u32);

impl InformationElement for Precedence {
    const IE_TYPE: IeType = IeType::Precedence;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u32(self.0);
        Ok(())
    }

    fn deserialize(mut value: &[u8]) -> PfcpResult<Self> {
        exact_len(Self::IE_TYPE, value, 4)?;
        Ok(Self(value.get_u32()))
    }
}

/// Offending IE (IE 40): type code of the IE that caused a rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffendingIe(pub u16);

impl InformationElement for OffendingIe {
    const IE_TYPE: IeType = IeType::OffendingIe;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u16(self.0);
        Ok(())
    }

    fn deserialize(mut value: &[u8]) -> PfcpResult<Self> {
        need(value, 2)?;
        Ok(Self(value.get_u16()))
    }
}

fn interface_value(value: u8) -> PfcpResult<u8> {
    if value > 0x0F {
        return Err(PfcpError::InvalidInterfaceValue(value));
    }
    Ok(value)
}

/// Source Interface (IE 20, TS 29.244 Section 8.2.2)
///
/// A 4-bit value; 5..=15 are spare but still carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceInterface(u8);

impl SourceInterface {
    pub const ACCESS: Self = Self(0);
    pub const CORE: Self = Self(1);
    pub const SGI_LAN_N6_LAN: Self = Self(2);
    pub const CP_FUNCTION: Self = Self(3);
    pub const FIVEG_VN_INTERNAL: Self = Self(4);

    pub fn new(value: u8) -> PfcpResult<Self> {
        interface_value(value).map(Self)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl InformationElement for SourceInterface {
    const IE_TYPE: IeType = IeType::SourceInterface;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u8(self.0 & 0x0F);
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        need(value, 1)?;
        Ok(Self(value[0] & 0x0F))
    }
}

/// Destination Interface (IE 42, TS 29.244 Section 8.2.24)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DestinationInterface(u8);

impl DestinationInterface {
    pub const ACCESS: Self = Self(0);
    pub const CORE: Self = Self(1);
    pub const SGI_LAN_N6_LAN: Self = Self(2);
    pub const CP_FUNCTION: Self = Self(3);
    pub const LI_FUNCTION: Self = Self(4);
    pub const FIVEG_VN_INTERNAL: Self = Self(5);

    pub fn new(value: u8) -> PfcpResult<Self> {
        interface_value(value).map(Self)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl InformationElement for DestinationInterface {
    const IE_TYPE: IeType = IeType::DestinationInterface;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u8(self.0 & 0x0F);
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        need(value, 1)?;
        Ok(Self(value[0] & 0x0F))
    }
}

/// Network Instance (IE 22)
///
/// Octets are kept as received; peers may send DNS labels or other
/// non-UTF-8 encodings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NetworkInstance(Bytes);

impl NetworkInstance {
    pub fn new(name: &str) -> Self {
        Self(Bytes::copy_from_slice(name.as_bytes()))
    }

    pub fn from_bytes(raw: impl Into<Bytes>) -> Self {
        Self(raw.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The name as text, if it is valid UTF-8
    pub fn to_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }
}

impl InformationElement for NetworkInstance {
    const IE_TYPE: IeType = IeType::NetworkInstance;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_slice(&self.0);
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        Ok(Self(Bytes::copy_from_slice(value)))
    }
}

/// Recovery Time Stamp (IE 96)
///
/// Carried as seconds since the NTP epoch (1900-01-01 00:00 UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct RecoveryTimeStamp {
    pub ntp_seconds: u32,
}

impl RecoveryTimeStamp {
    pub fn new(ntp_seconds: u32) -> Self {
        Self { ntp_seconds }
    }

    /// Convert Unix seconds; NTP era wrap-around is modulo 2^32
    pub fn from_unix_seconds(unix_seconds: u64) -> Self {
        Self {
            ntp_seconds: unix_seconds.wrapping_add(NTP_UNIX_OFFSET) as u32,
        }
    }

    pub fn from_system_time(time: SystemTime) -> Self {
        let unix = time
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        Self::from_unix_seconds(unix)
    }

    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Unix seconds, assuming era 0 before 2036-02-07 and era 1 after
    pub fn unix_seconds(&self) -> u64 {
        let ntp = self.ntp_seconds as u64;
        if ntp >= NTP_UNIX_OFFSET {
            ntp - NTP_UNIX_OFFSET
        } else {
            ntp + (1u64 << 32) - NTP_UNIX_OFFSET
        }
    }

    pub fn to_system_time(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.unix_seconds())
    }
}

impl InformationElement for RecoveryTimeStamp {
    const IE_TYPE: IeType = IeType::RecoveryTimeStamp;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u32(self.ntp_seconds);
        Ok(())
    }

    fn deserialize(mut value: &[u8]) -> PfcpResult<Self> {
        need(value, 4)?;
        Ok(Self::new(value.get_u32()))
    }
}

bitflags! {
    /// Apply Action bits as the 16-bit big-endian value of both octets
    ///
    /// Octet 5: DFRT IPMD IPMA DUPL NOCP BUFF FORW DROP (MSB to LSB).
    /// Octet 6: spare x5, DDPN BDPN EDRT.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ApplyActionFlags: u16 {
        const DROP = 0x0100;
        const FORW = 0x0200;
        const BUFF = 0x0400;
        const NOCP = 0x0800;
        const DUPL = 0x1000;
        const IPMA = 0x2000;
        const IPMD = 0x4000;
        const DFRT = 0x8000;
        const EDRT = 0x0001;
        const BDPN = 0x0002;
        const DDPN = 0x0004;
    }
}

impl ApplyActionFlags {
    /// Flags that select what happens to the packet; exactly one is set
    pub const PRIMARY: Self = Self::DROP
        .union(Self::FORW)
        .union(Self::BUFF)
        .union(Self::IPMA)
        .union(Self::IPMD);
}

/// The action an Apply Action applies to matched packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimaryAction {
    Drop,
    Forward,
    Buffer,
    IpMulticastAccept,
    IpMulticastDeny,
}

impl PrimaryAction {
    pub fn flag(&self) -> ApplyActionFlags {
        match self {
            Self::Drop => ApplyActionFlags::DROP,
            Self::Forward => ApplyActionFlags::FORW,
            Self::Buffer => ApplyActionFlags::BUFF,
            Self::IpMulticastAccept => ApplyActionFlags::IPMA,
            Self::IpMulticastDeny => ApplyActionFlags::IPMD,
        }
    }

    fn from_flags(flags: ApplyActionFlags) -> Option<Self> {
        let primary = flags & ApplyActionFlags::PRIMARY;
        [
            Self::Drop,
            Self::Forward,
            Self::Buffer,
            Self::IpMulticastAccept,
            Self::IpMulticastDeny,
        ]
        .into_iter()
        .find(|action| action.flag() == primary)
    }
}

/// Apply Action (IE 44, TS 29.244 Section 8.2.26)
///
/// The default value has no flags set and fails [`ApplyAction::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ApplyAction {
    flags: ApplyActionFlags,
}

impl ApplyAction {
    /// Build from a primary action and extra flags, enforcing the combination rules
    pub fn new(primary: PrimaryAction, extra: ApplyActionFlags) -> PfcpResult<Self> {
        if extra.intersects(ApplyActionFlags::PRIMARY) {
            return Err(PfcpError::IllegalFlagCombination(
                "primary action flags cannot be given as extra flags",
            ));
        }
        check_apply_action(primary, extra)?;
        Ok(Self {
            flags: primary.flag() | extra,
        })
    }

    /// Create DROP action
    pub fn drop() -> Self {
        Self { flags: ApplyActionFlags::DROP }
    }

    /// Create FORWARD action
    pub fn forward() -> Self {
        Self { flags: ApplyActionFlags::FORW }
    }

    /// Create BUFFER action
    pub fn buffer() -> Self {
        Self { flags: ApplyActionFlags::BUFF }
    }

    pub fn flags(&self) -> ApplyActionFlags {
        self.flags
    }

    pub fn contains(&self, flag: ApplyActionFlags) -> bool {
        self.flags.contains(flag)
    }

    /// `None` when zero or several primary flags are set
    pub fn primary(&self) -> Option<PrimaryAction> {
        PrimaryAction::from_flags(self.flags)
    }

    /// Check a decoded value against the rules [`ApplyAction::new`] enforces
    pub fn validate(&self) -> PfcpResult<()> {
        let primary = self.primary().ok_or(PfcpError::IllegalFlagCombination(
            "exactly one of DROP, FORW, BUFF, IPMA, IPMD must be set",
        ))?;
        check_apply_action(primary, self.flags - ApplyActionFlags::PRIMARY)
    }
}

fn check_apply_action(primary: PrimaryAction, extra: ApplyActionFlags) -> PfcpResult<()> {
    let buffer_only = ApplyActionFlags::NOCP | ApplyActionFlags::BDPN | ApplyActionFlags::DDPN;
    if extra.intersects(buffer_only) && primary != PrimaryAction::Buffer {
        return Err(PfcpError::IllegalFlagCombination(
            "NOCP, BDPN and DDPN require BUFF",
        ));
    }
    if extra.contains(ApplyActionFlags::DUPL) && primary == PrimaryAction::IpMulticastAccept {
        return Err(PfcpError::IllegalFlagCombination(
            "DUPL cannot be combined with IPMA",
        ));
    }
    let forward_only = ApplyActionFlags::DFRT | ApplyActionFlags::EDRT;
    if extra.intersects(forward_only) && primary != PrimaryAction::Forward {
        return Err(PfcpError::IllegalFlagCombination(
            "DFRT and EDRT require FORW",
        ));
    }
    Ok(())
}

impl InformationElement for ApplyAction {
    const IE_TYPE: IeType = IeType::ApplyAction;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u16(self.flags.bits());
        Ok(())
    }

    /// Older peers send a single octet; the second one defaults to zero
    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        need(value, 1)?;
        let second = value.get(1).copied().unwrap_or(0);
        let bits = u16::from_be_bytes([value[0], second]);
        Ok(Self {
            flags: ApplyActionFlags::from_bits_truncate(bits),
        })
    }
}

bitflags! {
    /// Node Report Type (IE 101, TS 29.244 Section 8.2.69)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeReportType: u8 {
        /// User Plane Path Failure Report
        const UPFR = 1 << 0;
        /// User Plane Path Recovery Report
        const UPRR = 1 << 1;
        /// Clock Drift Report
        const CKDR = 1 << 2;
        /// GTP-U Path QoS Report
        const GPQR = 1 << 3;
    }
}

impl InformationElement for NodeReportType {
    const IE_TYPE: IeType = IeType::NodeReportType;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u8(self.bits());
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        need(value, 1)?;
        Ok(Self::from_bits_retain(value[0]))
    }
}

bitflags! {
    /// Report Type (IE 39, TS 29.244 Section 8.2.21)
    ///
    /// Bits without a name are kept so newer report kinds survive a round trip.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ReportType: u8 {
        /// Downlink Data Report
        const DLDR = 1 << 0;
        /// Usage Report
        const USAR = 1 << 1;
        /// Error Indication Report
        const ERIR = 1 << 2;
        /// User Plane Inactivity Report
        const UPIR = 1 << 3;
        /// TSC Management Information Report
        const TMIR = 1 << 4;
        /// Session Report
        const SESR = 1 << 5;
        /// UE IP address Usage Information Report
        const UISR = 1 << 6;
    }
}

impl InformationElement for ReportType {
    const IE_TYPE: IeType = IeType::ReportType;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u8(self.bits());
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        need(value, 1)?;
        Ok(Self::from_bits_retain(value[0]))
    }
}

/// Feature bitmaps put feature `n` at octet `n / 8`, bit `n % 8`
fn encode_feature_octets(bits: u64, min_octets: usize, buf: &mut BytesMut) {
    let used = (u64::BITS - bits.leading_zeros()).div_ceil(8) as usize;
    for i in 0..used.max(min_octets) {
        buf.put_u8((bits >> (8 * i)) as u8);
    }
}

fn decode_feature_octets(ie_type: IeType, value: &[u8]) -> PfcpResult<u64> {
    need(value, 1)?;
    if value.len() > 8 {
        log::trace!(
            "{}: ignoring {} extension octets",
            ie_type.name(),
            value.len() - 8
        );
    }
    Ok(value
        .iter()
        .take(8)
        .enumerate()
        .fold(0u64, |bits, (i, octet)| bits | (*octet as u64) << (8 * i)))
}

bitflags! {
    /// UP Function Features (IE 43, TS 29.244 Section 8.2.25)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UpFunctionFeatures: u64 {
        // Octet 5
        const BUCP = 1 << 0;   // Downlink Data Buffering in CP function
        const DDND = 1 << 1;   // Buffered Downlink Data Notification Delay
        const DLBD = 1 << 2;   // DL Buffering Duration
        const TRST = 1 << 3;   // Traffic Steering
        const FTUP = 1 << 4;   // F-TEID allocation/release in the UP function
        const PFDM = 1 << 5;   // PFD Management procedure
        const HEEU = 1 << 6;   // Header Enrichment of Uplink traffic
        const TREU = 1 << 7;   // Traffic Redirection Enforcement in the UP function
        // Octet 6
        const EMPU = 1 << 8;   // Sending of End Marker packets
        const PDIU = 1 << 9;   // PDI optimised signalling
        const UDBC = 1 << 10;  // UL/DL Buffering Control
        const QUOAC = 1 << 11; // Quota Action
        const TRACE = 1 << 12; // Trace
        const FRRT = 1 << 13;  // Framed Routing
        const PFDE = 1 << 14;  // PFD for Ethernet
        const EPFAR = 1 << 15; // Extended PDR for Ethernet
        // Octet 7
        const DPDRA = 1 << 16; // Deferred PDR Activation
        const ADPDP = 1 << 17; // Activation and Deactivation of Pre-defined PDRs
        const UEIP = 1 << 18;  // UE IP address allocation
        const SSET = 1 << 19;  // Sessions successively controlled by different SMFs
        const MNOP = 1 << 20;  // Measurement of Number of Packets
        const MTE = 1 << 21;   // Measurement of Time
        const BUNDL = 1 << 22; // PFCP Session Bundling
        const GCOM = 1 << 23;  // 5G VN Group Communication
        // Octet 8
        const MPAS = 1 << 24;  // Multiple PFCP Associations
        const RTTL = 1 << 25;  // Redundant Transmission at Transport Layer
        const VTIME = 1 << 26; // Quota Validity Time
        const NORP = 1 << 27;  // Number of Reports
        const IPTV = 1 << 28;  // IPTV
        const IP6PL = 1 << 29; // IPv6 prefix length
        const TSCU = 1 << 30;  // Time Sensitive Communication
        const MPTCP = 1 << 31; // MPTCP Proxy
        // Octet 9
        const ATSSS_LL = 1 << 32; // ATSSS-LL steering
        const QFQM = 1 << 33;  // Per QoS flow per UE QoS monitoring
        const GPQM = 1 << 34;  // Per GTP-U Path QoS monitoring
        const MT_EDT = 1 << 35; // MT-EDT
        const CIOT = 1 << 36;  // CIoT
        const ETHAR = 1 << 37; // Ethernet Address Reporting
        const DDDS = 1 << 38;  // Downlink Data Delivery Status
        const RDS = 1 << 39;   // Reliable Data Service
        // Octet 10
        const RTTWP = 1 << 40; // RTT measurement without PMF
        const QUASF = 1 << 41; // Quota Action when the SMF is restored
        const NSPOC = 1 << 42; // Notify Start of Pause of Charging
        const L2TP = 1 << 43;  // L2TP
        const UPBER = 1 << 44; // Buffer Error Report
        const RESPS = 1 << 45; // Restoration of PFCP Sessions
        const IPREP = 1 << 46; // IP Address and Port number Replacement
        const DNSTS = 1 << 47; // DNS Server Address Reporting
        // Octet 11
        const DRQOS = 1 << 48; // Direct Reporting of QoS monitoring events
        const MBSN4 = 1 << 49; // MBS N4
        const PSUPRM = 1 << 50; // Per Slice UP Resource Management
        const EPPI = 1 << 51;  // Enhanced PDI for Paging Policy Indication
        const RATP = 1 << 52;  // Redirection Address Types
        const UPIDP = 1 << 53; // UE IP Address Usage Reporting
    }
}

impl InformationElement for UpFunctionFeatures {
    const IE_TYPE: IeType = IeType::UpFunctionFeatures;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        encode_feature_octets(self.bits(), 2, buf);
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        decode_feature_octets(Self::IE_TYPE, value).map(Self::from_bits_retain)
    }
}

bitflags! {
    /// CP Function Features (IE 89, TS 29.244 Section 8.2.58)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CpFunctionFeatures: u64 {
        const LOAD = 1 << 0;  // Load Control
        const OVRL = 1 << 1;  // Overload Control
        const EPFAR = 1 << 2; // Extended PDR for Ethernet
        const SSET = 1 << 3;  // Sessions successively controlled by different SMFs
        const BUNDL = 1 << 4; // PFCP Session Bundling
        const MPAS = 1 << 5;  // Multiple PFCP Associations
        const ARDR = 1 << 6;  // Additional Redundant Transmission
        const UIAUR = 1 << 7; // UE IP Address Usage Reporting
        const PSUCC = 1 << 8; // PFCP Session Update Continuation
    }
}

impl InformationElement for CpFunctionFeatures {
    const IE_TYPE: IeType = IeType::CpFunctionFeatures;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        encode_feature_octets(self.bits(), 1, buf);
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        decode_feature_octets(Self::IE_TYPE, value).map(Self::from_bits_retain)
    }
}
