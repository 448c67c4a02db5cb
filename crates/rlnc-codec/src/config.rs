use rlnc_core::{
    RlncError, RlncResult, BYTE_FIELD_EXPONENT, DEFAULT_SEGMENT_PACKETS, MAX_FIELD_EXPONENT,
};

/// Default payload size per packet, in bytes.
pub const DEFAULT_PAYLOAD_LEN: usize = 1024;

/// Shape of one coding generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// m in GF(2^m). The packet path needs 4 or 8.
    pub field_exponent: u8,
    /// Original packets per generation; also the coding vector length.
    pub max_packets: usize,
    /// Payload bytes per packet.
    pub payload_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            field_exponent: BYTE_FIELD_EXPONENT,
            max_packets: DEFAULT_SEGMENT_PACKETS,
            payload_len: DEFAULT_PAYLOAD_LEN,
        }
    }
}

impl CodecConfig {
    pub fn validate(&self) -> RlncResult<()> {
        if self.field_exponent == 0 || self.field_exponent > MAX_FIELD_EXPONENT {
            return Err(RlncError::UnsupportedField { exponent: self.field_exponent });
        }
        if !matches!(self.field_exponent, 4 | 8) {
            return Err(RlncError::UnsupportedPacking { cardinality: 1 << self.field_exponent });
        }
        if self.max_packets == 0 {
            return Err(RlncError::InvalidConfig("max_packets must be positive"));
        }
        if self.payload_len == 0 {
            return Err(RlncError::InvalidConfig("payload_len must be positive"));
        }
        Ok(())
    }

    /// Bytes taken by the coding vector on the wire.
    pub fn header_len(&self) -> usize {
        if self.field_exponent == 4 {
            (self.max_packets + 1) / 2
        } else {
            self.max_packets
        }
    }

    /// Full wire size of one coded packet.
    pub fn packet_len(&self) -> usize {
        self.header_len() + self.payload_len
    }
}
