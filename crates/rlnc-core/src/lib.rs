#![no_std]
#[cfg(feature = "std")]
extern crate std;

/// Largest supported characteristic exponent m for GF(2^m).
pub const MAX_FIELD_EXPONENT: u8 = 16;

/// Field used by the byte-oriented wire path (one coefficient per byte).
pub const BYTE_FIELD_EXPONENT: u8 = 8;

/// Default number of blocks in a segment.
pub const DEFAULT_SEGMENT_PACKETS: usize = 32;

pub type RlncResult<T> = Result<T, RlncError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlncError {
    /// No primitive polynomial for GF(2^m).
    UnsupportedField { exponent: u8 },
    /// Byte conversion is only defined for q = 16 and q = 256.
    UnsupportedPacking { cardinality: usize },
    LengthMismatch { expected: usize, actual: usize },
    FieldMismatch,
    IndexOutOfRange { index: usize, len: usize },
    ElementOutOfRange { value: u32, cardinality: usize },
    /// The decoder already holds `capacity` accepted rows.
    CapacityExceeded { capacity: usize },
    WireFormatError,
    InvalidConfig(&'static str),
    InvalidState,
    SingularMatrix,
}

impl core::fmt::Display for RlncError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RlncError::UnsupportedField { exponent } => {
                write!(f, "unsupported field GF(2^{})", exponent)
            }
            RlncError::UnsupportedPacking { cardinality } => {
                write!(f, "byte packing not defined for q = {}", cardinality)
            }
            RlncError::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {}, got {}", expected, actual)
            }
            RlncError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
            RlncError::ElementOutOfRange { value, cardinality } => {
                write!(f, "{} is not an element of a field of size {}", value, cardinality)
            }
            RlncError::CapacityExceeded { capacity } => {
                write!(f, "decoder capacity of {} vectors exceeded", capacity)
            }
            RlncError::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
            _ => write!(f, "{:?}", self),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RlncError {}
