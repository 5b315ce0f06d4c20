//! PFCP Information Elements
//!
//! IE type codes, the TLV header, the IE stream parser and the
//! [`InformationElement`] trait every typed IE implements (TS 29.244 Section 8.1).

use bytes::{BufMut, Bytes, BytesMut};
use crate::error::{PfcpError, PfcpResult};

/// PFCP IE Type values (TS 29.244 Section 8.1.2)
///
/// Only the codes this crate decodes into typed values are listed; every other
/// code is carried as an [`UnknownIe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum IeType {
    CreatePdr = 1,
    Pdi = 2,
    CreateFar = 3,
    ForwardingParameters = 4,
    CreatedPdr = 8,
    UpdatePdr = 9,
    UpdateFar = 10,
    UpdateForwardingParameters = 11,
    RemovePdr = 15,
    RemoveFar = 16,
    Cause = 19,
    SourceInterface = 20,
    FTeid = 21,
    NetworkInstance = 22,
    Precedence = 29,
    ReportType = 39,
    OffendingIe = 40,
    DestinationInterface = 42,
    UpFunctionFeatures = 43,
    ApplyAction = 44,
    PdrId = 56,
    FSeid = 57,
    NodeId = 60,
    DownlinkDataReport = 83,
    CpFunctionFeatures = 89,
    UeIpAddress = 93,
    RecoveryTimeStamp = 96,
    NodeReportType = 101,
    FarId = 108,
    SourceIpAddress = 192,
}

impl TryFrom<u16> for IeType {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::CreatePdr),
            2 => Ok(Self::Pdi),
            3 => Ok(Self::CreateFar),
            4 => Ok(Self::ForwardingParameters),
            8 => Ok(Self::CreatedPdr),
            9 => Ok(Self::UpdatePdr),
            10 => Ok(Self::UpdateFar),
            11 => Ok(Self::UpdateForwardingParameters),
            15 => Ok(Self::RemovePdr),
            16 => Ok(Self::RemoveFar),
            19 => Ok(Self::Cause),
            20 => Ok(Self::SourceInterface),
            21 => Ok(Self::FTeid),
            22 => Ok(Self::NetworkInstance),
            29 => Ok(Self::Precedence),
            39 => Ok(Self::ReportType),
            40 => Ok(Self::OffendingIe),
            42 => Ok(Self::DestinationInterface),
            43 => Ok(Self::UpFunctionFeatures),
            44 => Ok(Self::ApplyAction),
            56 => Ok(Self::PdrId),
            57 => Ok(Self::FSeid),
            60 => Ok(Self::NodeId),
            83 => Ok(Self::DownlinkDataReport),
            89 => Ok(Self::CpFunctionFeatures),
            93 => Ok(Self::UeIpAddress),
            96 => Ok(Self::RecoveryTimeStamp),
            101 => Ok(Self::NodeReportType),
            108 => Ok(Self::FarId),
            192 => Ok(Self::SourceIpAddress),
            other => Err(other),
        }
    }
}

impl IeType {
    /// Name used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreatePdr => "Create PDR",
            Self::Pdi => "PDI",
            Self::CreateFar => "Create FAR",
            Self::ForwardingParameters => "Forwarding Parameters",
            Self::CreatedPdr => "Created PDR",
            Self::UpdatePdr => "Update PDR",
            Self::UpdateFar => "Update FAR",
            Self::UpdateForwardingParameters => "Update Forwarding Parameters",
            Self::RemovePdr => "Remove PDR",
            Self::RemoveFar => "Remove FAR",
            Self::Cause => "Cause",
            Self::SourceInterface => "Source Interface",
            Self::FTeid => "F-TEID",
            Self::NetworkInstance => "Network Instance",
            Self::Precedence => "Precedence",
            Self::ReportType => "Report Type",
            Self::OffendingIe => "Offending IE",
            Self::DestinationInterface => "Destination Interface",
            Self::UpFunctionFeatures => "UP Function Features",
            Self::ApplyAction => "Apply Action",
            Self::PdrId => "PDR ID",
            Self::FSeid => "F-SEID",
            Self::NodeId => "Node ID",
            Self::DownlinkDataReport => "Downlink Data Report",
            Self::CpFunctionFeatures => "CP Function Features",
            Self::UeIpAddress => "UE IP Address",
            Self::RecoveryTimeStamp => "Recovery Time Stamp",
            Self::NodeReportType => "Node Report Type",
            Self::FarId => "FAR ID",
            Self::SourceIpAddress => "Source IP Address",
        }
    }
}

/// PFCP IE Header (4 bytes)
///
/// `length` counts the value bytes only, never the header itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeHeader {
    pub ie_type: u16,
    pub length: u16,
}

impl IeHeader {
    pub const LEN: usize = 4;

    pub fn new(ie_type: u16, length: u16) -> Self {
        Self { ie_type, length }
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u16(self.ie_type);
        buf.put_u16(self.length);
    }

    pub fn decode(buf: &[u8]) -> PfcpResult<Self> {
        if buf.len() < Self::LEN {
            return Err(PfcpError::TruncatedHeader {
                needed: Self::LEN,
                available: buf.len(),
            });
        }
        Ok(Self {
            ie_type: u16::from_be_bytes([buf[0], buf[1]]),
            length: u16::from_be_bytes([buf[2], buf[3]]),
        })
    }
}

/// One (type, length, value) record borrowed from a parsed buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawIe<'a> {
    pub ie_type: u16,
    pub length: u16,
    pub value: &'a [u8],
}

impl<'a> RawIe<'a> {
    /// The typed code, or `None` when this crate does not model the IE
    pub fn known_type(&self) -> Option<IeType> {
        IeType::try_from(self.ie_type).ok()
    }

    /// Whether this record carries IE `T`
    pub fn is<T: InformationElement>(&self) -> bool {
        self.ie_type == T::IE_TYPE as u16
    }

    /// Decode the value as IE `T`
    pub fn decode_as<T: InformationElement>(&self) -> PfcpResult<T> {
        T::deserialize(self.value)
    }

    /// Copy into an owned opaque IE
    pub fn to_unknown(&self) -> UnknownIe {
        UnknownIe::new(self.ie_type, Bytes::copy_from_slice(self.value))
    }
}

/// IE stream parser over a flat buffer
///
/// Yields one [`RawIe`] per TLV. After the first error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct IeIter<'a> {
    buf: &'a [u8],
    failed: bool,
}

impl<'a> Iterator for IeIter<'a> {
    type Item = PfcpResult<RawIe<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.buf.is_empty() {
            return None;
        }

        let header = match IeHeader::decode(self.buf) {
            Ok(header) => header,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };

        let rest = &self.buf[IeHeader::LEN..];
        let length = header.length as usize;
        if rest.len() < length {
            self.failed = true;
            return Some(Err(PfcpError::TruncatedValue {
                ie_type: header.ie_type,
                length,
                available: rest.len(),
            }));
        }

        let (value, remaining) = rest.split_at(length);
        self.buf = remaining;
        Some(Ok(RawIe {
            ie_type: header.ie_type,
            length: header.length,
            value,
        }))
    }
}

impl std::iter::FusedIterator for IeIter<'_> {}

/// Walk `buf` as a sequence of IEs
pub fn parse_ies(buf: &[u8]) -> IeIter<'_> {
    IeIter { buf, failed: false }
}

/// Parse the whole buffer eagerly, failing on the first malformed IE
pub fn collect_ies(buf: &[u8]) -> PfcpResult<Vec<RawIe<'_>>> {
    parse_ies(buf).collect()
}

/// IE this crate does not model, carried as raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIe {
    pub ie_type: u16,
    pub data: Bytes,
}

impl UnknownIe {
    pub fn new(ie_type: u16, data: Bytes) -> Self {
        Self { ie_type, data }
    }

    pub fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        let length = value_length(self.ie_type, self.data.len())?;
        IeHeader::new(self.ie_type, length).encode(buf);
        buf.put_slice(&self.data);
        Ok(())
    }
}

/// Value length as written in the IE header
fn value_length(ie_type: u16, length: usize) -> PfcpResult<u16> {
    u16::try_from(length).map_err(|_| PfcpError::IeTooLong { ie_type, length })
}

/// Typed PFCP Information Element
///
/// Implementors provide the value codec; the TLV framing is shared.
pub trait InformationElement: Sized {
    /// IE type code written in the header
    const IE_TYPE: IeType;

    /// Append the value (without the 4-byte header)
    fn encode_value(&self, buf: &mut BytesMut) -> PfcpResult<()>;

    /// Decode from the value bytes (without the 4-byte header)
    fn deserialize(value: &[u8]) -> PfcpResult<Self>;

    fn type_code(&self) -> u16 {
        Self::IE_TYPE as u16
    }

    /// Append the complete TLV, patching the length once the value is written
    ///
    /// A value too long for the 16-bit length field fails with
    /// [`PfcpError::IeTooLong`] and leaves `buf` as it was.
    fn encode(&self, buf: &mut BytesMut) -> PfcpResult<()> {
        let start = buf.len();
        IeHeader::new(Self::IE_TYPE as u16, 0).encode(buf);
        let length = self
            .encode_value(buf)
            .and_then(|()| value_length(Self::IE_TYPE as u16, buf.len() - start - IeHeader::LEN));
        match length {
            Ok(length) => {
                buf[start + 2..start + 4].copy_from_slice(&length.to_be_bytes());
                Ok(())
            }
            Err(e) => {
                buf.truncate(start);
                Err(e)
            }
        }
    }

    /// Complete TLV encoding
    fn serialize(&self) -> PfcpResult<Bytes> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Value encoding only
    fn serialize_value(&self) -> PfcpResult<Bytes> {
        let mut buf = BytesMut::new();
        self.encode_value(&mut buf)?;
        Ok(buf.freeze())
    }
}

/// Fail with `UnexpectedEndOfValue` unless `buf` holds `needed` more bytes
pub(crate) fn need(buf: &[u8], needed: usize) -> PfcpResult<()> {
    if buf.len() < needed {
        return Err(PfcpError::UnexpectedEndOfValue {
            needed,
            available: buf.len(),
        });
    }
    Ok(())
}

/// Fail unless `value` is exactly `expected` bytes long
pub(crate) fn exact_len(ie_type: IeType, value: &[u8], expected: usize) -> PfcpResult<()> {
    need(value, expected)?;
    if value.len() != expected {
        return Err(PfcpError::InvalidLength {
            ie_type: ie_type as u16,
            expected,
            actual: value.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ie_header_encode_decode() {
        let header = IeHeader::new(IeType::Cause as u16, 1);
        let mut buf = BytesMut::new();
        header.encode(&mut buf);

        assert_eq!(buf.as_ref(), &[0x00, 0x13, 0x00, 0x01]);
        let decoded = IeHeader::decode(&buf).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_parse_ies_walks_whole_buffer() {
        let buf = [
            0x00, 0x13, 0x00, 0x01, 0x01, // Cause
            0x00, 0x38, 0x00, 0x02, 0x00, 0x07, // PDR ID
            0x00, 0x16, 0x00, 0x00, // empty Network Instance
        ];
        let ies = collect_ies(&buf).unwrap();

        assert_eq!(ies.len(), 3);
        assert_eq!(ies[0].known_type(), Some(IeType::Cause));
        assert_eq!(ies[0].value, &[0x01]);
        assert_eq!(ies[1].ie_type, 56);
        assert_eq!(ies[1].length, 2);
        assert_eq!(ies[1].value, &[0x00, 0x07]);
        assert!(ies[2].value.is_empty());
    }

    #[test]
    fn test_parse_ies_empty_buffer() {
        assert_eq!(parse_ies(&[]).count(), 0);
    }

    #[test]
    fn test_parse_ies_truncated_header() {
        let buf = [0x00, 0x13, 0x00, 0x01, 0x01, 0x00, 0x38, 0x00];
        let mut iter = parse_ies(&buf);

        assert!(iter.next().unwrap().is_ok());
        assert_eq!(
            iter.next().unwrap(),
            Err(PfcpError::TruncatedHeader { needed: 4, available: 3 })
        );
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_parse_ies_truncated_value() {
        let buf = [0x00, 0x38, 0x00, 0x02, 0x00];
        let err = collect_ies(&buf).unwrap_err();

        assert_eq!(
            err,
            PfcpError::TruncatedValue { ie_type: 56, length: 2, available: 1 }
        );
        assert!(err.is_truncation());
    }

    #[test]
    fn test_unknown_type_is_kept_raw() {
        let buf = [0x7f, 0x00, 0x00, 0x02, 0xaa, 0xbb];
        let ies = collect_ies(&buf).unwrap();

        assert_eq!(ies[0].known_type(), None);
        let unknown = ies[0].to_unknown();
        assert_eq!(unknown.ie_type, 0x7f00);

        let mut out = BytesMut::new();
        unknown.encode(&mut out).unwrap();
        assert_eq!(out.as_ref(), &buf);
    }

    #[test]
    fn test_unknown_ie_too_long() {
        let unknown = UnknownIe::new(0x8001, Bytes::from(vec![0u8; 65536]));
        let mut out = BytesMut::from(&[0xaa][..]);
        assert_eq!(
            unknown.encode(&mut out),
            Err(PfcpError::IeTooLong { ie_type: 0x8001, length: 65536 })
        );
        assert_eq!(out.as_ref(), &[0xaa]);

        let unknown = UnknownIe::new(0x8001, Bytes::from(vec![0u8; 65535]));
        unknown.encode(&mut out).unwrap();
        assert_eq!(&out[1..5], &[0x80, 0x01, 0xff, 0xff]);
    }

    #[test]
    fn test_ie_type_codes() {
        assert_eq!(IeType::CreatePdr as u16, 1);
        assert_eq!(IeType::Pdi as u16, 2);
        assert_eq!(IeType::CreateFar as u16, 3);
        assert_eq!(IeType::Cause as u16, 19);
        assert_eq!(IeType::SourceInterface as u16, 20);
        assert_eq!(IeType::Precedence as u16, 29);
        assert_eq!(IeType::ReportType as u16, 39);
        assert_eq!(IeType::UpFunctionFeatures as u16, 43);
        assert_eq!(IeType::ApplyAction as u16, 44);
        assert_eq!(IeType::PdrId as u16, 56);
        assert_eq!(IeType::FSeid as u16, 57);
        assert_eq!(IeType::NodeId as u16, 60);
        assert_eq!(IeType::UeIpAddress as u16, 93);
        assert_eq!(IeType::RecoveryTimeStamp as u16, 96);
        assert_eq!(IeType::NodeReportType as u16, 101);
        assert_eq!(IeType::FarId as u16, 108);
        assert_eq!(IeType::SourceIpAddress as u16, 192);

        for code in 0..=u16::MAX {
            if let Ok(ie_type) = IeType::try_from(code) {
                assert_eq!(ie_type as u16, code, "{}", ie_type.name());
            }
        }
    }
}
