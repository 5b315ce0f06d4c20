//! PFCP Grouped IEs
//!
//! Grouped IEs carry a sequence of child TLVs as their value. Children are
//! written in a fixed order and accepted in any order; unknown children are
//! skipped and a repeated single-valued child keeps its last occurrence.

use bytes::BytesMut;
use crate::address::{FTeid, UeIpAddress};
use crate::error::PfcpResult;
use crate::ie::{parse_ies, IeType, InformationElement, RawIe};
use crate::types::{
    ApplyAction, DestinationInterface, FarId, NetworkInstance, PdrId, Precedence,
    SourceInterface,
};

/// Declare the closed set of children a grouped IE accepts
///
/// Generates an enum with one variant per child plus `Unknown(code)`, and a
/// `decode` that routes a raw child by type code.
macro_rules! child_ies {
    ($(#[$meta:meta])* enum $name:ident { $($variant:ident($ty:ty)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        enum $name {
            $($variant($ty),)+
            Unknown(u16),
        }

        impl $name {
            fn decode(ie: &RawIe<'_>) -> PfcpResult<Self> {
                $(
                    if ie.is::<$ty>() {
                        return ie.decode_as::<$ty>().map(Self::$variant);
                    }
                )+
                Ok(Self::Unknown(ie.ie_type))
            }
        }
    };
}

fn skip_child(parent: IeType, ie_type: u16) {
    log::trace!("{}: skipping unexpected child IE {}", parent.name(), ie_type);
}

child_ies! {
    enum PdiChild {
        SourceInterface(SourceInterface),
        LocalFTeid(FTeid),
        NetworkInstance(NetworkInstance),
        UeIpAddress(UeIpAddress),
    }
}

/// PDI - Packet Detection Information (IE 2)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pdi {
    pub source_interface: SourceInterface,
    pub local_f_teid: Option<FTeid>,
    pub network_instance: Option<NetworkInstance>,
    pub ue_ip_address: Option<UeIpAddress>,
}

impl Pdi {
    pub fn new(source_interface: SourceInterface) -> Self {
        Self {
            source_interface,
            ..Default::default()
        }
    }

    pub fn with_local_f_teid(mut self, f_teid: FTeid) -> Self {
        self.local_f_teid = Some(f_teid);
        self
    }

    pub fn with_network_instance(mut self, name: &str) -> Self {
        self.network_instance = Some(NetworkInstance::new(name));
        self
    }

    pub fn with_ue_ip_address(mut self, ue_ip_address: UeIpAddress) -> Self {
        self.ue_ip_address = Some(ue_ip_address);
        self
    }
}

impl InformationElement for Pdi {
    const IE_TYPE: IeType = IeType::Pdi;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.source_interface.encode(buf)?;
        if let Some(f_teid) = &self.local_f_teid {
            f_teid.encode(buf)?;
        }
        if let Some(ni) = &self.network_instance {
            ni.encode(buf)?;
        }
        if let Some(ue_ip) = &self.ue_ip_address {
            ue_ip.encode(buf)?;
        }
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        let mut pdi = Self::default();
        for ie in parse_ies(value) {
            match PdiChild::decode(&ie?)? {
                PdiChild::SourceInterface(v) => pdi.source_interface = v,
                PdiChild::LocalFTeid(v) => pdi.local_f_teid = Some(v),
                PdiChild::NetworkInstance(v) => pdi.network_instance = Some(v),
                PdiChild::UeIpAddress(v) => pdi.ue_ip_address = Some(v),
                PdiChild::Unknown(t) => skip_child(Self::IE_TYPE, t),
            }
        }
        Ok(pdi)
    }
}

child_ies! {
    enum CreatePdrChild {
        PdrId(PdrId),
        Precedence(Precedence),
        Pdi(Pdi),
        FarId(FarId),
    }
}

/// Create PDR (IE 1)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreatePdr {
    pub pdr_id: PdrId,
    pub precedence: Precedence,
    pub pdi: Pdi,
    pub far_id: Option<FarId>,
}

/// A Packet Detection Rule is carried as a Create PDR
pub type Pdr = CreatePdr;

impl CreatePdr {
    pub fn new(pdr_id: u16, precedence: u32, pdi: Pdi) -> Self {
        Self {
            pdr_id: PdrId(pdr_id),
            precedence: Precedence(precedence),
            pdi,
            far_id: None,
        }
    }

    pub fn with_far_id(mut self, far_id: u32) -> Self {
        self.far_id = Some(FarId(far_id));
        self
    }
}

impl InformationElement for CreatePdr {
    const IE_TYPE: IeType = IeType::CreatePdr;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.pdr_id.encode(buf)?;
        self.precedence.encode(buf)?;
        self.pdi.encode(buf)?;
        if let Some(far_id) = &self.far_id {
            far_id.encode(buf)?;
        }
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        let mut pdr = Self::default();
        for ie in parse_ies(value) {
            match CreatePdrChild::decode(&ie?)? {
                CreatePdrChild::PdrId(v) => pdr.pdr_id = v,
                CreatePdrChild::Precedence(v) => pdr.precedence = v,
                CreatePdrChild::Pdi(v) => pdr.pdi = v,
                CreatePdrChild::FarId(v) => pdr.far_id = Some(v),
                CreatePdrChild::Unknown(t) => skip_child(Self::IE_TYPE, t),
            }
        }
        Ok(pdr)
    }
}

child_ies! {
    enum ForwardingParametersChild {
        DestinationInterface(DestinationInterface),
        NetworkInstance(NetworkInstance),
    }
}

/// Forwarding Parameters (IE 4)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForwardingParameters {
    pub destination_interface: DestinationInterface,
    pub network_instance: Option<NetworkInstance>,
}

impl ForwardingParameters {
    pub fn new(destination_interface: DestinationInterface) -> Self {
        Self {
            destination_interface,
            network_instance: None,
        }
    }

    pub fn with_network_instance(mut self, name: &str) -> Self {
        self.network_instance = Some(NetworkInstance::new(name));
        self
    }
}

impl InformationElement for ForwardingParameters {
    const IE_TYPE: IeType = IeType::ForwardingParameters;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.destination_interface.encode(buf)?;
        if let Some(ni) = &self.network_instance {
            ni.encode(buf)?;
        }
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        let mut params = Self::default();
        for ie in parse_ies(value) {
            match ForwardingParametersChild::decode(&ie?)? {
                ForwardingParametersChild::DestinationInterface(v) => {
                    params.destination_interface = v
                }
                ForwardingParametersChild::NetworkInstance(v) => {
                    params.network_instance = Some(v)
                }
                ForwardingParametersChild::Unknown(t) => skip_child(Self::IE_TYPE, t),
            }
        }
        Ok(params)
    }
}

child_ies! {
    enum CreateFarChild {
        FarId(FarId),
        ApplyAction(ApplyAction),
        ForwardingParameters(ForwardingParameters),
    }
}

/// Create FAR (IE 3)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateFar {
    pub far_id: FarId,
    pub apply_action: ApplyAction,
    pub forwarding_parameters: Option<ForwardingParameters>,
}

/// A Forwarding Action Rule is carried as a Create FAR
pub type Far = CreateFar;

impl CreateFar {
    pub fn new(far_id: u32, apply_action: ApplyAction) -> Self {
        Self {
            far_id: FarId(far_id),
            apply_action,
            forwarding_parameters: None,
        }
    }

    pub fn with_forwarding_parameters(mut self, params: ForwardingParameters) -> Self {
        self.forwarding_parameters = Some(params);
        self
    }
}

impl InformationElement for CreateFar {
    const IE_TYPE: IeType = IeType::CreateFar;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.far_id.encode(buf)?;
        self.apply_action.encode(buf)?;
        if let Some(params) = &self.forwarding_parameters {
            params.encode(buf)?;
        }
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        let mut far = Self::default();
        for ie in parse_ies(value) {
            match CreateFarChild::decode(&ie?)? {
                CreateFarChild::FarId(v) => far.far_id = v,
                CreateFarChild::ApplyAction(v) => far.apply_action = v,
                CreateFarChild::ForwardingParameters(v) => far.forwarding_parameters = Some(v),
                CreateFarChild::Unknown(t) => skip_child(Self::IE_TYPE, t),
            }
        }
        Ok(far)
    }
}

child_ies! {
    enum CreatedPdrChild {
        PdrId(PdrId),
        LocalFTeid(FTeid),
    }
}

/// Created PDR (IE 8): the F-TEID the UP function allocated for a PDR
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreatedPdr {
    pub pdr_id: PdrId,
    pub local_f_teid: Option<FTeid>,
}

impl CreatedPdr {
    pub fn new(pdr_id: u16, local_f_teid: Option<FTeid>) -> Self {
        Self {
            pdr_id: PdrId(pdr_id),
            local_f_teid,
        }
    }
}

impl InformationElement for CreatedPdr {
    const IE_TYPE: IeType = IeType::CreatedPdr;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.pdr_id.encode(buf)?;
        if let Some(f_teid) = &self.local_f_teid {
            f_teid.encode(buf)?;
        }
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        let mut created = Self::default();
        for ie in parse_ies(value) {
            match CreatedPdrChild::decode(&ie?)? {
                CreatedPdrChild::PdrId(v) => created.pdr_id = v,
                CreatedPdrChild::LocalFTeid(v) => created.local_f_teid = Some(v),
                CreatedPdrChild::Unknown(t) => skip_child(Self::IE_TYPE, t),
            }
        }
        Ok(created)
    }
}

child_ies! {
    enum UpdatePdrChild {
        PdrId(PdrId),
        Precedence(Precedence),
        Pdi(Pdi),
        FarId(FarId),
    }
}

/// Update PDR (IE 9); only the changed fields are present
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdatePdr {
    pub pdr_id: PdrId,
    pub precedence: Option<Precedence>,
    pub pdi: Option<Pdi>,
    pub far_id: Option<FarId>,
}

impl UpdatePdr {
    pub fn new(pdr_id: u16) -> Self {
        Self {
            pdr_id: PdrId(pdr_id),
            ..Default::default()
        }
    }
}

impl InformationElement for UpdatePdr {
    const IE_TYPE: IeType = IeType::UpdatePdr;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.pdr_id.encode(buf)?;
        if let Some(precedence) = &self.precedence {
            precedence.encode(buf)?;
        }
        if let Some(pdi) = &self.pdi {
            pdi.encode(buf)?;
        }
        if let Some(far_id) = &self.far_id {
            far_id.encode(buf)?;
        }
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        let mut update = Self::default();
        for ie in parse_ies(value) {
            match UpdatePdrChild::decode(&ie?)? {
                UpdatePdrChild::PdrId(v) => update.pdr_id = v,
                UpdatePdrChild::Precedence(v) => update.precedence = Some(v),
                UpdatePdrChild::Pdi(v) => update.pdi = Some(v),
                UpdatePdrChild::FarId(v) => update.far_id = Some(v),
                UpdatePdrChild::Unknown(t) => skip_child(Self::IE_TYPE, t),
            }
        }
        Ok(update)
    }
}

child_ies! {
    enum UpdateForwardingParametersChild {
        DestinationInterface(DestinationInterface),
        NetworkInstance(NetworkInstance),
    }
}

/// Update Forwarding Parameters (IE 11)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateForwardingParameters {
    pub destination_interface: Option<DestinationInterface>,
    pub network_instance: Option<NetworkInstance>,
}

impl InformationElement for UpdateForwardingParameters {
    const IE_TYPE: IeType = IeType::UpdateForwardingParameters;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        if let Some(iface) = &self.destination_interface {
            iface.encode(buf)?;
        }
        if let Some(ni) = &self.network_instance {
            ni.encode(buf)?;
        }
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        let mut params = Self::default();
        for ie in parse_ies(value) {
            match UpdateForwardingParametersChild::decode(&ie?)? {
                UpdateForwardingParametersChild::DestinationInterface(v) => {
                    params.destination_interface = Some(v)
                }
                UpdateForwardingParametersChild::NetworkInstance(v) => {
                    params.network_instance = Some(v)
                }
                UpdateForwardingParametersChild::Unknown(t) => skip_child(Self::IE_TYPE, t),
            }
        }
        Ok(params)
    }
}

child_ies! {
    enum UpdateFarChild {
        FarId(FarId),
        ApplyAction(ApplyAction),
        UpdateForwardingParameters(UpdateForwardingParameters),
    }
}

/// Update FAR (IE 10)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateFar {
    pub far_id: FarId,
    pub apply_action: Option<ApplyAction>,
    pub update_forwarding_parameters: Option<UpdateForwardingParameters>,
}

impl UpdateFar {
    pub fn new(far_id: u32) -> Self {
        Self {
            far_id: FarId(far_id),
            ..Default::default()
        }
    }
}

impl InformationElement for UpdateFar {
    const IE_TYPE: IeType = IeType::UpdateFar;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.far_id.encode(buf)?;
        if let Some(action) = &self.apply_action {
            action.encode(buf)?;
        }
        if let Some(params) = &self.update_forwarding_parameters {
            params.encode(buf)?;
        }
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        let mut update = Self::default();
        for ie in parse_ies(value) {
            match UpdateFarChild::decode(&ie?)? {
                UpdateFarChild::FarId(v) => update.far_id = v,
                UpdateFarChild::ApplyAction(v) => update.apply_action = Some(v),
                UpdateFarChild::UpdateForwardingParameters(v) => {
                    update.update_forwarding_parameters = Some(v)
                }
                UpdateFarChild::Unknown(t) => skip_child(Self::IE_TYPE, t),
            }
        }
        Ok(update)
    }
}

child_ies! {
    enum PdrIdChild {
        PdrId(PdrId),
    }
}

child_ies! {
    enum FarIdChild {
        FarId(FarId),
    }
}

/// Remove PDR (IE 15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemovePdr {
    pub pdr_id: PdrId,
}

impl RemovePdr {
    pub fn new(pdr_id: u16) -> Self {
        Self { pdr_id: PdrId(pdr_id) }
    }
}

impl InformationElement for RemovePdr {
    const IE_TYPE: IeType = IeType::RemovePdr;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.pdr_id.encode(buf)?;
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        let mut remove = Self::default();
        for ie in parse_ies(value) {
            match PdrIdChild::decode(&ie?)? {
                PdrIdChild::PdrId(v) => remove.pdr_id = v,
                PdrIdChild::Unknown(t) => skip_child(Self::IE_TYPE, t),
            }
        }
        Ok(remove)
    }
}

/// Remove FAR (IE 16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoveFar {
    pub far_id: FarId,
}

impl RemoveFar {
    pub fn new(far_id: u32) -> Self {
        Self { far_id: FarId(far_id) }
    }
}

impl InformationElement for RemoveFar {
    const IE_TYPE: IeType = IeType::RemoveFar;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        self.far_id.encode(buf)?;
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        let mut remove = Self::default();
        for ie in parse_ies(value) {
            match FarIdChild::decode(&ie?)? {
                FarIdChild::FarId(v) => remove.far_id = v,
                FarIdChild::Unknown(t) => skip_child(Self::IE_TYPE, t),
            }
        }
        Ok(remove)
    }
}

/// Downlink Data Report (IE 83)
///
/// PDR ID may repeat; every occurrence is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownlinkDataReport {
    pub pdr_ids: Vec<PdrId>,
}

impl DownlinkDataReport {
    pub fn new(pdr_id: u16) -> Self {
        Self {
            pdr_ids: vec![PdrId(pdr_id)],
        }
    }
}

impl InformationElement for DownlinkDataReport {
    const IE_TYPE: IeType = IeType::DownlinkDataReport;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        for pdr_id in &self.pdr_ids {
            pdr_id.encode(buf)?;
        }
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        let mut report = Self::default();
        for ie in parse_ies(value) {
            match PdrIdChild::decode(&ie?)? {
                PdrIdChild::PdrId(v) => report.pdr_ids.push(v),
                PdrIdChild::Unknown(t) => skip_child(Self::IE_TYPE, t),
            }
        }
        Ok(report)
    }
}
