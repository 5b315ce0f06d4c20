//! PFCP Address IEs
//!
//! Information Elements whose layout is selected by a type nibble or a flags
//! octet: Node ID, F-SEID, F-TEID, Source IP Address and UE IP Address.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use bitflags::bitflags;
use bytes::{Buf, BufMut, BytesMut};
use crate::error::{PfcpError, PfcpResult};
use crate::ie::{exact_len, need, IeType, InformationElement};

/// Longest FQDN a Node ID may carry, in bytes
pub const MAX_FQDN_LEN: usize = 255;

fn read_u8(value: &mut &[u8]) -> PfcpResult<u8> {
    need(value, 1)?;
    Ok(value.get_u8())
}

fn read_ipv4(value: &mut &[u8]) -> PfcpResult<Ipv4Addr> {
    need(value, 4)?;
    Ok(Ipv4Addr::from(value.get_u32()))
}

fn read_ipv6(value: &mut &[u8]) -> PfcpResult<Ipv6Addr> {
    need(value, 16)?;
    Ok(Ipv6Addr::from(value.get_u128()))
}

/// Node ID type (TS 29.244 Section 8.2.38)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeIdType {
    Ipv4 = 0,
    Ipv6 = 1,
    Fqdn = 2,
}

impl TryFrom<u8> for NodeIdType {
    type Error = PfcpError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Ipv4),
            1 => Ok(Self::Ipv6),
            2 => Ok(Self::Fqdn),
            _ => Err(PfcpError::InvalidNodeIdType(value)),
        }
    }
}

/// FQDN carried by a Node ID: 1 to 255 bytes of UTF-8
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fqdn(String);

impl Fqdn {
    pub fn new(name: &str) -> PfcpResult<Self> {
        if name.is_empty() {
            return Err(PfcpError::InvalidFqdn(name.to_string()));
        }
        if name.len() > MAX_FQDN_LEN {
            return Err(PfcpError::FqdnTooLong(name.len()));
        }
        Ok(Self(name.to_string()))
    }

    /// Validate the bytes of a received FQDN
    pub fn from_bytes(raw: &[u8]) -> PfcpResult<Self> {
        let name = std::str::from_utf8(raw)
            .map_err(|_| PfcpError::InvalidFqdn(String::from_utf8_lossy(raw).into_owned()))?;
        Self::new(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Fqdn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fqdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Node ID (IE 60)
///
/// The FQDN is carried as raw bytes, not as DNS labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeId {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Fqdn(Fqdn),
}

impl NodeId {
    /// Classify `name` as an IPv4 address, an IPv6 address or an FQDN
    pub fn new(name: &str) -> PfcpResult<Self> {
        if let Ok(addr) = name.parse::<Ipv4Addr>() {
            return Ok(Self::Ipv4(addr));
        }
        if let Ok(addr) = name.parse::<Ipv6Addr>() {
            return Ok(Self::Ipv6(addr));
        }
        Self::fqdn(name)
    }

    /// FQDN Node ID without address classification
    pub fn fqdn(name: &str) -> PfcpResult<Self> {
        Ok(Self::Fqdn(Fqdn::new(name)?))
    }

    pub fn node_id_type(&self) -> NodeIdType {
        match self {
            Self::Ipv4(_) => NodeIdType::Ipv4,
            Self::Ipv6(_) => NodeIdType::Ipv6,
            Self::Fqdn(_) => NodeIdType::Fqdn,
        }
    }
}

impl FromStr for NodeId {
    type Err = PfcpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Ipv4Addr> for NodeId {
    fn from(addr: Ipv4Addr) -> Self {
        Self::Ipv4(addr)
    }
}

impl From<Ipv6Addr> for NodeId {
    fn from(addr: Ipv6Addr) -> Self {
        Self::Ipv6(addr)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4(addr) => write!(f, "{addr}"),
            Self::Ipv6(addr) => write!(f, "{addr}"),
            Self::Fqdn(name) => write!(f, "{name}"),
        }
    }
}

impl InformationElement for NodeId {
    const IE_TYPE: IeType = IeType::NodeId;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u8(self.node_id_type() as u8);
        match self {
            Self::Ipv4(addr) => buf.put_slice(&addr.octets()),
            Self::Ipv6(addr) => buf.put_slice(&addr.octets()),
            Self::Fqdn(name) => buf.put_slice(name.as_str().as_bytes()),
        }
        Ok(())
    }

    fn deserialize(value: &[u8]) -> PfcpResult<Self> {
        need(value, 1)?;
        let mut rest = &value[1..];
        match NodeIdType::try_from(value[0] & 0x0F)? {
            NodeIdType::Ipv4 => {
                exact_len(Self::IE_TYPE, value, 5)?;
                Ok(Self::Ipv4(read_ipv4(&mut rest)?))
            }
            NodeIdType::Ipv6 => {
                exact_len(Self::IE_TYPE, value, 17)?;
                Ok(Self::Ipv6(read_ipv6(&mut rest)?))
            }
            NodeIdType::Fqdn => Ok(Self::Fqdn(Fqdn::from_bytes(rest)?)),
        }
    }
}

bitflags! {
    /// F-SEID flags octet
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FSeidFlags: u8 {
        const V6 = 1 << 0;
        const V4 = 1 << 1;
    }
}

/// F-SEID (IE 57, TS 29.244 Section 8.2.37)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FSeid {
    pub seid: u64,
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
}

impl FSeid {
    pub fn new(seid: u64, ipv4: Option<Ipv4Addr>, ipv6: Option<Ipv6Addr>) -> Self {
        Self { seid, ipv4, ipv6 }
    }

    pub fn flags(&self) -> FSeidFlags {
        let mut flags = FSeidFlags::empty();
        flags.set(FSeidFlags::V4, self.ipv4.is_some());
        flags.set(FSeidFlags::V6, self.ipv6.is_some());
        flags
    }
}

impl InformationElement for FSeid {
    const IE_TYPE: IeType = IeType::FSeid;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u8(self.flags().bits());
        buf.put_u64(self.seid);
        if let Some(addr) = self.ipv4 {
            buf.put_slice(&addr.octets());
        }
        if let Some(addr) = self.ipv6 {
            buf.put_slice(&addr.octets());
        }
        Ok(())
    }

    fn deserialize(mut value: &[u8]) -> PfcpResult<Self> {
        let flags = FSeidFlags::from_bits_truncate(read_u8(&mut value)?);
        need(value, 8)?;
        let seid = value.get_u64();
        let ipv4 = if flags.contains(FSeidFlags::V4) {
            Some(read_ipv4(&mut value)?)
        } else {
            None
        };
        let ipv6 = if flags.contains(FSeidFlags::V6) {
            Some(read_ipv6(&mut value)?)
        } else {
            None
        };
        Ok(Self { seid, ipv4, ipv6 })
    }
}

bitflags! {
    /// F-TEID flags octet
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FTeidFlags: u8 {
        const V4 = 1 << 0;
        const V6 = 1 << 1;
        const CH = 1 << 2;
        const CHID = 1 << 3;
    }
}

/// F-TEID (IE 21, TS 29.244 Section 8.2.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FTeid {
    /// TEID and addresses assigned by the sender
    Assigned {
        teid: u32,
        ipv4: Option<Ipv4Addr>,
        ipv6: Option<Ipv6Addr>,
    },
    /// The UP function picks the TEID; `choose_id` links PDRs sharing one F-TEID
    Choose {
        ipv4: bool,
        ipv6: bool,
        choose_id: Option<u8>,
    },
}

impl FTeid {
    pub fn new(teid: u32, ipv4: Option<Ipv4Addr>, ipv6: Option<Ipv6Addr>) -> Self {
        Self::Assigned { teid, ipv4, ipv6 }
    }

    pub fn choose(ipv4: bool, ipv6: bool, choose_id: Option<u8>) -> Self {
        Self::Choose {
            ipv4,
            ipv6,
            choose_id,
        }
    }

    pub fn teid(&self) -> Option<u32> {
        match self {
            Self::Assigned { teid, .. } => Some(*teid),
            Self::Choose { .. } => None,
        }
    }

    pub fn flags(&self) -> FTeidFlags {
        let mut flags = FTeidFlags::empty();
        match self {
            Self::Assigned { ipv4, ipv6, .. } => {
                flags.set(FTeidFlags::V4, ipv4.is_some());
                flags.set(FTeidFlags::V6, ipv6.is_some());
            }
            Self::Choose {
                ipv4,
                ipv6,
                choose_id,
            } => {
                flags.insert(FTeidFlags::CH);
                flags.set(FTeidFlags::V4, *ipv4);
                flags.set(FTeidFlags::V6, *ipv6);
                flags.set(FTeidFlags::CHID, choose_id.is_some());
            }
        }
        flags
    }
}

impl InformationElement for FTeid {
    const IE_TYPE: IeType = IeType::FTeid;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u8(self.flags().bits());
        match self {
            Self::Assigned { teid, ipv4, ipv6 } => {
                buf.put_u32(*teid);
                if let Some(addr) = ipv4 {
                    buf.put_slice(&addr.octets());
                }
                if let Some(addr) = ipv6 {
                    buf.put_slice(&addr.octets());
                }
            }
            Self::Choose { choose_id, .. } => {
                if let Some(id) = choose_id {
                    buf.put_u8(*id);
                }
            }
        }
        Ok(())
    }

    fn deserialize(mut value: &[u8]) -> PfcpResult<Self> {
        let flags = FTeidFlags::from_bits_truncate(read_u8(&mut value)?);

        if flags.contains(FTeidFlags::CH) {
            let choose_id = if flags.contains(FTeidFlags::CHID) {
                Some(read_u8(&mut value)?)
            } else {
                None
            };
            return Ok(Self::Choose {
                ipv4: flags.contains(FTeidFlags::V4),
                ipv6: flags.contains(FTeidFlags::V6),
                choose_id,
            });
        }

        need(value, 4)?;
        let teid = value.get_u32();
        let ipv4 = if flags.contains(FTeidFlags::V4) {
            Some(read_ipv4(&mut value)?)
        } else {
            None
        };
        let ipv6 = if flags.contains(FTeidFlags::V6) {
            Some(read_ipv6(&mut value)?)
        } else {
            None
        };
        Ok(Self::Assigned { teid, ipv4, ipv6 })
    }
}

bitflags! {
    /// Source IP Address flags octet
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SourceIpAddressFlags: u8 {
        const V6 = 1 << 0;
        const V4 = 1 << 1;
        const MPL = 1 << 2;
    }
}

/// Source IP Address (IE 192, TS 29.244 Section 8.2.138)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceIpAddress {
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
    pub mask_prefix_length: Option<u8>,
}

impl SourceIpAddress {
    pub fn new(ipv4: Option<Ipv4Addr>, ipv6: Option<Ipv6Addr>) -> Self {
        Self {
            ipv4,
            ipv6,
            mask_prefix_length: None,
        }
    }

    pub fn with_mask_prefix_length(mut self, length: u8) -> Self {
        self.mask_prefix_length = Some(length);
        self
    }

    pub fn flags(&self) -> SourceIpAddressFlags {
        let mut flags = SourceIpAddressFlags::empty();
        flags.set(SourceIpAddressFlags::V4, self.ipv4.is_some());
        flags.set(SourceIpAddressFlags::V6, self.ipv6.is_some());
        flags.set(SourceIpAddressFlags::MPL, self.mask_prefix_length.is_some());
        flags
    }
}

impl InformationElement for SourceIpAddress {
    const IE_TYPE: IeType = IeType::SourceIpAddress;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u8(self.flags().bits());
        if let Some(addr) = self.ipv4 {
            buf.put_slice(&addr.octets());
        }
        if let Some(addr) = self.ipv6 {
            buf.put_slice(&addr.octets());
        }
        if let Some(length) = self.mask_prefix_length {
            buf.put_u8(length);
        }
        Ok(())
    }

    fn deserialize(mut value: &[u8]) -> PfcpResult<Self> {
        let flags = SourceIpAddressFlags::from_bits_truncate(read_u8(&mut value)?);
        let ipv4 = if flags.contains(SourceIpAddressFlags::V4) {
            Some(read_ipv4(&mut value)?)
        } else {
            None
        };
        let ipv6 = if flags.contains(SourceIpAddressFlags::V6) {
            Some(read_ipv6(&mut value)?)
        } else {
            None
        };
        let mask_prefix_length = if flags.contains(SourceIpAddressFlags::MPL) {
            Some(read_u8(&mut value)?)
        } else {
            None
        };
        Ok(Self {
            ipv4,
            ipv6,
            mask_prefix_length,
        })
    }
}

bitflags! {
    /// UE IP Address flags octet
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UeIpAddressFlags: u8 {
        const V6 = 1 << 0;
        const V4 = 1 << 1;
        /// Source/Destination: set when the address is a destination address
        const SD = 1 << 2;
        const IPV6D = 1 << 3;
        const CHV4 = 1 << 4;
        const CHV6 = 1 << 5;
        const IP6PL = 1 << 6;
    }
}

/// An address given by the sender, or a request for the UP function to pick one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpAllocation<A> {
    Address(A),
    Choose,
}

/// UE IP Address (IE 93, TS 29.244 Section 8.2.62)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UeIpAddress {
    pub ipv4: Option<IpAllocation<Ipv4Addr>>,
    pub ipv6: Option<IpAllocation<Ipv6Addr>>,
    pub is_destination: bool,
    pub ipv6_prefix_delegation_bits: Option<u8>,
    pub ipv6_prefix_length: Option<u8>,
}

impl UeIpAddress {
    pub fn ipv4(addr: Ipv4Addr) -> Self {
        Self {
            ipv4: Some(IpAllocation::Address(addr)),
            ..Default::default()
        }
    }

    pub fn ipv6(addr: Ipv6Addr) -> Self {
        Self {
            ipv6: Some(IpAllocation::Address(addr)),
            ..Default::default()
        }
    }

    pub fn flags(&self) -> UeIpAddressFlags {
        let mut flags = UeIpAddressFlags::empty();
        flags.set(UeIpAddressFlags::V4, self.ipv4.is_some());
        flags.set(
            UeIpAddressFlags::CHV4,
            matches!(self.ipv4, Some(IpAllocation::Choose)),
        );
        flags.set(UeIpAddressFlags::V6, self.ipv6.is_some());
        flags.set(
            UeIpAddressFlags::CHV6,
            matches!(self.ipv6, Some(IpAllocation::Choose)),
        );
        flags.set(UeIpAddressFlags::SD, self.is_destination);
        flags.set(
            UeIpAddressFlags::IPV6D,
            self.ipv6_prefix_delegation_bits.is_some(),
        );
        flags.set(UeIpAddressFlags::IP6PL, self.ipv6_prefix_length.is_some());
        flags
    }
}

impl InformationElement for UeIpAddress {
    const IE_TYPE: IeType = IeType::UeIpAddress;

    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        buf.put_u8(self.flags().bits());
        if let Some(IpAllocation::Address(addr)) = self.ipv4 {
            buf.put_slice(&addr.octets());
        }
        if let Some(IpAllocation::Address(addr)) = self.ipv6 {
            buf.put_slice(&addr.octets());
        }
        if let Some(bits) = self.ipv6_prefix_delegation_bits {
            buf.put_u8(bits);
        }
        if let Some(length) = self.ipv6_prefix_length {
            buf.put_u8(length);
        }
        Ok(())
    }

    fn deserialize(mut value: &[u8]) -> PfcpResult<Self> {
        let flags = UeIpAddressFlags::from_bits_truncate(read_u8(&mut value)?);

        let ipv4 = if flags.contains(UeIpAddressFlags::CHV4) {
            Some(IpAllocation::Choose)
        } else if flags.contains(UeIpAddressFlags::V4) {
            Some(IpAllocation::Address(read_ipv4(&mut value)?))
        } else {
            None
        };
        let ipv6 = if flags.contains(UeIpAddressFlags::CHV6) {
            Some(IpAllocation::Choose)
        } else if flags.contains(UeIpAddressFlags::V6) {
            Some(IpAllocation::Address(read_ipv6(&mut value)?))
        } else {
            None
        };
        let ipv6_prefix_delegation_bits = if flags.contains(UeIpAddressFlags::IPV6D) {
            Some(read_u8(&mut value)?)
        } else {
            None
        };
        let ipv6_prefix_length = if flags.contains(UeIpAddressFlags::IP6PL) {
            Some(read_u8(&mut value)?)
        } else {
            None
        };

        Ok(Self {
            ipv4,
            ipv6,
            is_destination: flags.contains(UeIpAddressFlags::SD),
            ipv6_prefix_delegation_bits,
            ipv6_prefix_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_classification() {
        assert_eq!(
            NodeId::new("10.0.0.1").unwrap(),
            NodeId::Ipv4(Ipv4Addr::new(10, 0, 0, 1))
        );
        assert_eq!(
            "2001:db8::1".parse::<NodeId>().unwrap(),
            NodeId::Ipv6("2001:db8::1".parse().unwrap())
        );
        assert_eq!(
            NodeId::new("upf.example.com").unwrap(),
            NodeId::Fqdn(Fqdn::new("upf.example.com").unwrap())
        );
        assert!(matches!(NodeId::new(""), Err(PfcpError::InvalidFqdn(_))));
    }

    #[test]
    fn test_node_id_ipv4_encoding() {
        let node_id = NodeId::Ipv4(Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(
            node_id.serialize().unwrap().as_ref(),
            &[0x00, 0x3c, 0x00, 0x05, 0x00, 192, 168, 1, 1]
        );
        assert_eq!(NodeId::deserialize(&node_id.serialize_value().unwrap()).unwrap(), node_id);
    }

    #[test]
    fn test_node_id_fqdn_is_raw_bytes() {
        let node_id = NodeId::new("smf.5gc").unwrap();
        let value = node_id.serialize_value().unwrap();
        assert_eq!(value[0], 2);
        assert_eq!(&value[1..], b"smf.5gc");
        assert_eq!(NodeId::deserialize(&value).unwrap(), node_id);
    }

    #[test]
    fn test_node_id_fqdn_length_boundary() {
        let name = "a".repeat(255);
        let node_id = NodeId::new(&name).unwrap();
        assert_eq!(node_id.serialize().unwrap().len(), 4 + 1 + 255);

        let name = "a".repeat(256);
        assert_eq!(NodeId::new(&name), Err(PfcpError::FqdnTooLong(256)));
    }

    #[test]
    fn test_node_id_decode_errors() {
        assert!(NodeId::deserialize(&[]).unwrap_err().is_truncation());
        assert!(NodeId::deserialize(&[0, 10, 0, 0]).unwrap_err().is_truncation());
        assert_eq!(
            NodeId::deserialize(&[0, 10, 0, 0, 1, 9]),
            Err(PfcpError::InvalidLength { ie_type: 60, expected: 5, actual: 6 })
        );
        assert!(NodeId::deserialize(&[1; 16]).unwrap_err().is_truncation());
        assert_eq!(
            NodeId::deserialize(&[3, 1, 2, 3, 4]),
            Err(PfcpError::InvalidNodeIdType(3))
        );
        assert!(matches!(
            NodeId::deserialize(&[2]),
            Err(PfcpError::InvalidFqdn(_))
        ));
    }

    #[test]
    fn test_node_id_fqdn_must_be_utf8() {
        assert_eq!(
            NodeId::deserialize(&[0x02, 0x75, 0xff, 0x66]),
            Err(PfcpError::InvalidFqdn("u\u{fffd}f".to_string()))
        );
        assert_eq!(
            Fqdn::from_bytes(b"u\xc3"),
            Err(PfcpError::InvalidFqdn("u\u{fffd}".to_string()))
        );

        let node_id = NodeId::deserialize(&[0x02, 0x75, 0x66]).unwrap();
        assert_eq!(node_id.to_string(), "uf");
        assert_eq!(node_id.serialize_value().unwrap().as_ref(), &[0x02, 0x75, 0x66]);
    }

    #[test]
    fn test_node_id_fqdn_decode_length_limit() {
        let mut value = vec![0x02];
        value.extend(std::iter::repeat(b'a').take(255));
        let node_id = NodeId::deserialize(&value).unwrap();
        assert_eq!(node_id.serialize_value().unwrap().as_ref(), value.as_slice());

        value.push(b'a');
        assert_eq!(NodeId::deserialize(&value), Err(PfcpError::FqdnTooLong(256)));
    }

    #[test]
    fn test_fqdn_accessors() {
        let fqdn = Fqdn::new("upf.example.com").unwrap();
        assert_eq!(fqdn.as_str(), "upf.example.com");
        assert_eq!(fqdn.as_ref(), "upf.example.com");
        assert_eq!(fqdn.to_string(), "upf.example.com");
        assert_eq!(Fqdn::new(""), Err(PfcpError::InvalidFqdn(String::new())));
        assert_eq!(Fqdn::new(&"b".repeat(256)), Err(PfcpError::FqdnTooLong(256)));
    }

    #[test]
    fn test_node_id_spare_nibble_ignored() {
        let node_id = NodeId::deserialize(&[0xF0, 127, 0, 0, 1]).unwrap();
        assert_eq!(node_id, NodeId::Ipv4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_f_seid_encoding() {
        let fseid = FSeid::new(0x1122334455667788, Some(Ipv4Addr::new(10, 0, 0, 1)), None);
        let value = fseid.serialize_value().unwrap();
        assert_eq!(
            value.as_ref(),
            &[0x02, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 10, 0, 0, 1]
        );
        assert_eq!(FSeid::deserialize(&value).unwrap(), fseid);
    }

    #[test]
    fn test_f_seid_dual_stack() {
        let fseid = FSeid::new(
            42,
            Some(Ipv4Addr::new(10, 0, 0, 1)),
            Some("2001:db8::1".parse().unwrap()),
        );
        let value = fseid.serialize_value().unwrap();
        assert_eq!(value[0], 0x03);
        assert_eq!(value.len(), 1 + 8 + 4 + 16);
        assert_eq!(FSeid::deserialize(&value).unwrap(), fseid);
    }

    #[test]
    fn test_f_seid_truncated() {
        assert!(FSeid::deserialize(&[0x00, 0, 0, 0]).unwrap_err().is_truncation());
        // V4 flagged but no address
        let value = [0x02, 0, 0, 0, 0, 0, 0, 0, 1];
        assert!(FSeid::deserialize(&value).unwrap_err().is_truncation());
    }

    #[test]
    fn test_f_teid_assigned() {
        let fteid = FTeid::new(0x12345678, Some(Ipv4Addr::new(10, 1, 1, 1)), None);
        let value = fteid.serialize_value().unwrap();
        assert_eq!(value.as_ref(), &[0x01, 0x12, 0x34, 0x56, 0x78, 10, 1, 1, 1]);
        assert_eq!(FTeid::deserialize(&value).unwrap(), fteid);
        assert_eq!(fteid.teid(), Some(0x12345678));
    }

    #[test]
    fn test_f_teid_choose() {
        let fteid = FTeid::choose(true, false, Some(5));
        let value = fteid.serialize_value().unwrap();
        assert_eq!(value.as_ref(), &[0x0D, 0x05]);
        assert_eq!(FTeid::deserialize(&value).unwrap(), fteid);
        assert_eq!(fteid.teid(), None);

        let fteid = FTeid::choose(true, true, None);
        assert_eq!(fteid.serialize_value().unwrap().as_ref(), &[0x07]);
        assert!(FTeid::deserialize(&[0x0C]).unwrap_err().is_truncation());
    }

    #[test]
    fn test_source_ip_address() {
        let addr = SourceIpAddress::new(Some(Ipv4Addr::new(10, 0, 0, 0)), None)
            .with_mask_prefix_length(24);
        let value = addr.serialize_value().unwrap();
        assert_eq!(value.as_ref(), &[0x06, 10, 0, 0, 0, 24]);
        assert_eq!(SourceIpAddress::deserialize(&value).unwrap(), addr);

        // MPL flagged but missing
        assert!(SourceIpAddress::deserialize(&[0x06, 10, 0, 0, 0])
            .unwrap_err()
            .is_truncation());
    }

    #[test]
    fn test_ue_ip_address_ipv4() {
        let ue_ip = UeIpAddress::ipv4(Ipv4Addr::new(10, 45, 0, 2));
        let value = ue_ip.serialize_value().unwrap();
        assert_eq!(value.as_ref(), &[0x02, 10, 45, 0, 2]);
        assert_eq!(UeIpAddress::deserialize(&value).unwrap(), ue_ip);
    }

    #[test]
    fn test_ue_ip_address_choose() {
        let ue_ip = UeIpAddress {
            ipv4: Some(IpAllocation::Choose),
            ipv6: Some(IpAllocation::Choose),
            ipv6_prefix_length: Some(64),
            ..Default::default()
        };
        let value = ue_ip.serialize_value().unwrap();
        assert_eq!(value.as_ref(), &[0x73, 64]);
        assert_eq!(UeIpAddress::deserialize(&value).unwrap(), ue_ip);
    }

    #[test]
    fn test_ue_ip_address_all_fields() {
        let ue_ip = UeIpAddress {
            ipv4: Some(IpAllocation::Address(Ipv4Addr::new(10, 45, 0, 2))),
            ipv6: Some(IpAllocation::Address("2001:db8::".parse().unwrap())),
            is_destination: true,
            ipv6_prefix_delegation_bits: Some(8),
            ipv6_prefix_length: Some(56),
        };
        let value = ue_ip.serialize_value().unwrap();
        assert_eq!(value[0], 0x4F);
        assert_eq!(value.len(), 1 + 4 + 16 + 1 + 1);
        assert_eq!(UeIpAddress::deserialize(&value).unwrap(), ue_ip);
    }

    #[test]
    fn test_ue_ip_address_truncated() {
        assert!(UeIpAddress::deserialize(&[]).unwrap_err().is_truncation());
        assert!(UeIpAddress::deserialize(&[0x01, 0x20, 0x01])
            .unwrap_err()
            .is_truncation());
        // IPv6D flagged but missing
        assert!(UeIpAddress::deserialize(&[0x0A, 10, 0, 0, 1])
            .unwrap_err()
            .is_truncation());
    }
}
