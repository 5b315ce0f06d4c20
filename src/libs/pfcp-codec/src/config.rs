//! Codec Configuration
//!
//! Decode limits for [`PfcpCodec`], loadable from the `pfcp` section of a
//! YAML configuration file.

use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{PfcpError, PfcpResult};
use crate::header::{PfcpHeader, PFCP_HEADER_LEN, PFCP_MANDATORY_HEADER_LEN};
use crate::message::{build_message, decode_message_with, DecodedMessage, PfcpMessage};

/// Largest message the 16-bit length field can describe
pub const PFCP_MAX_MESSAGE_LEN: usize = PFCP_MANDATORY_HEADER_LEN + u16::MAX as usize;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Codec limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Largest accepted message, header included
    pub max_message_len: usize,
    /// Accept datagrams with bytes after the declared message length
    pub allow_trailing_bytes: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_message_len: PFCP_MAX_MESSAGE_LEN,
            allow_trailing_bytes: true,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    pfcp: CodecConfig,
}

impl CodecConfig {
    /// Parse from YAML; the settings live under a top-level `pfcp` key
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        file.pfcp.validate()?;
        Ok(file.pfcp)
    }

    /// Load from a YAML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_message_len < PFCP_HEADER_LEN {
            return Err(ConfigError::ValidationError(format!(
                "`max_message_len` {} is shorter than a PFCP header",
                self.max_message_len
            )));
        }
        if self.max_message_len > PFCP_MAX_MESSAGE_LEN {
            return Err(ConfigError::ValidationError(format!(
                "`max_message_len` {} exceeds {}",
                self.max_message_len, PFCP_MAX_MESSAGE_LEN
            )));
        }
        Ok(())
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Message codec bound to a [`CodecConfig`]
#[derive(Debug, Clone, Default)]
pub struct PfcpCodec {
    config: CodecConfig,
}

impl PfcpCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Build a message, rejecting it if it exceeds `max_message_len`
    pub fn encode(
        &self,
        message: &PfcpMessage,
        sequence_number: u32,
        seid: Option<u64>,
    ) -> PfcpResult<BytesMut> {
        let buf = build_message(message, sequence_number, seid)?;
        if buf.len() > self.config.max_message_len {
            return Err(PfcpError::MessageTooLong {
                length: buf.len(),
                max: self.config.max_message_len,
            });
        }
        Ok(buf)
    }

    /// Decode a datagram, keeping unknown IEs
    pub fn decode(&self, buf: &[u8]) -> PfcpResult<DecodedMessage> {
        decode_message_with(buf, &self.config)
    }

    /// Decode a datagram into its header and typed message
    pub fn parse(&self, buf: &[u8]) -> PfcpResult<(PfcpHeader, PfcpMessage)> {
        let decoded = self.decode(buf)?;
        Ok((decoded.header, decoded.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouped::{CreatePdr, Pdi};
    use crate::message::{SessionEstablishmentRequest, SessionDeletionRequest};
    use crate::address::{FSeid, NodeId};
    use crate::types::SourceInterface;

    #[test]
    fn test_default_config() {
        let config = CodecConfig::default();
        assert_eq!(config.max_message_len, 65539);
        assert!(config.allow_trailing_bytes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
pfcp:
  max_message_len: 4096
  allow_trailing_bytes: false
"#;
        let config = CodecConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.max_message_len, 4096);
        assert!(!config.allow_trailing_bytes);
    }

    #[test]
    fn test_config_partial_yaml_uses_defaults() {
        let config = CodecConfig::from_yaml_str("pfcp:\n  max_message_len: 1500\n").unwrap();
        assert_eq!(config.max_message_len, 1500);
        assert!(config.allow_trailing_bytes);

        let config = CodecConfig::from_yaml_str("logger:\n  level: info\n").unwrap();
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn test_config_errors() {
        let result = CodecConfig::from_yaml_str("pfcp: [1, 2");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));

        let result = CodecConfig::from_yaml_str("pfcp:\n  max_message_len: 4\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let result = CodecConfig::from_yaml_str("pfcp:\n  max_message_len: 70000\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let config = CodecConfig {
            max_message_len: 2048,
            allow_trailing_bytes: false,
        };
        let yaml = format!("pfcp:\n{}", indent(&config.to_yaml_string().unwrap()));
        assert_eq!(CodecConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    fn indent(text: &str) -> String {
        text.lines().map(|line| format!("  {}\n", line)).collect()
    }

    #[test]
    fn test_codec_max_message_len() {
        let codec = PfcpCodec::new(CodecConfig {
            max_message_len: 64,
            allow_trailing_bytes: true,
        });

        let mut msg = SessionEstablishmentRequest::new(
            NodeId::new("10.0.0.1").unwrap(),
            FSeid::new(1, None, None),
        );
        for id in 1..=4 {
            msg.create_pdrs.push(CreatePdr::new(id, id as u32, Pdi::new(SourceInterface::ACCESS)));
        }
        let msg = PfcpMessage::from(msg);

        assert!(matches!(
            codec.encode(&msg, 1, Some(1)),
            Err(PfcpError::MessageTooLong { max: 64, .. })
        ));

        let buf = PfcpCodec::default().encode(&msg, 1, Some(1)).unwrap();
        assert!(matches!(
            codec.decode(&buf),
            Err(PfcpError::MessageTooLong { max: 64, .. })
        ));
        assert_eq!(PfcpCodec::default().parse(&buf).unwrap().1, msg);
    }

    #[test]
    fn test_codec_rejects_trailing_bytes_when_strict() {
        let codec = PfcpCodec::new(CodecConfig {
            allow_trailing_bytes: false,
            ..Default::default()
        });
        let msg = PfcpMessage::from(SessionDeletionRequest);
        let mut raw = codec.encode(&msg, 1, Some(9)).unwrap().to_vec();
        assert!(codec.parse(&raw).is_ok());

        raw.push(0);
        assert!(matches!(
            codec.parse(&raw),
            Err(PfcpError::LengthMismatch { .. })
        ));
    }
}
