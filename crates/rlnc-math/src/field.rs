use alloc::sync::Arc;
use alloc::vec::Vec;
use log::debug;
use rlnc_core::{RlncError, RlncResult, BYTE_FIELD_EXPONENT, MAX_FIELD_EXPONENT};

use crate::tables::{Tables, DENSE_MAX_EXPONENT, PRIMITIVE_POLYNOMIALS};
use crate::vector::Vector;

/// A field element. Wide enough for GF(2^16).
pub type Element = u16;

/// GF(2^m), immutable after construction and shared behind an `Arc`
/// by every vector, packet and decoder defined over it.
pub struct FiniteField {
    exponent: u8,
    cardinality: usize,
    tables: Tables,
}

impl FiniteField {
    /// Builds GF(2^exponent). Fails for exponents without a primitive polynomial.
    pub fn new(exponent: u8) -> RlncResult<Arc<Self>> {
        if exponent == 0 || exponent > MAX_FIELD_EXPONENT {
            return Err(RlncError::UnsupportedField { exponent });
        }
        Ok(Arc::new(Self::build(exponent)))
    }

    /// GF(256), the field of the byte wire path.
    pub fn gf256() -> Arc<Self> {
        Arc::new(Self::build(BYTE_FIELD_EXPONENT))
    }

    /// GF(16), two coordinates per byte.
    pub fn gf16() -> Arc<Self> {
        Arc::new(Self::build(4))
    }

    fn build(exponent: u8) -> Self {
        let poly = PRIMITIVE_POLYNOMIALS[(exponent - 1) as usize];
        let tables = if exponent <= DENSE_MAX_EXPONENT {
            Tables::dense(exponent, poly)
        } else {
            Tables::logarithmic(exponent, poly)
        };
        debug!("GF(2^{}) ready, primitive polynomial {}", exponent, poly);
        Self { exponent, cardinality: 1usize << exponent, tables }
    }

    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    pub fn exponent(&self) -> u8 {
        self.exponent
    }

    /// Returns `value` as an element, or an error if it is not below q.
    pub fn element(&self, value: u32) -> RlncResult<Element> {
        if (value as usize) < self.cardinality {
            Ok(value as Element)
        } else {
            Err(RlncError::ElementOutOfRange { value, cardinality: self.cardinality })
        }
    }

    #[inline(always)]
    pub fn add(&self, a: Element, b: Element) -> Element {
        a ^ b
    }

    #[inline(always)]
    pub fn sub(&self, a: Element, b: Element) -> Element {
        a ^ b
    }

    #[inline]
    pub fn mul(&self, a: Element, b: Element) -> Element {
        debug_assert!((a as usize) < self.cardinality && (b as usize) < self.cardinality);
        match &self.tables {
            Tables::Dense { mul, .. } => mul[a as usize * self.cardinality + b as usize],
            Tables::Log { log, exp } => {
                if a == 0 || b == 0 {
                    return 0;
                }
                exp[log[a as usize] as usize + log[b as usize] as usize]
            }
        }
    }

    /// `a / b`. Division by zero yields 0.
    #[inline]
    pub fn div(&self, a: Element, b: Element) -> Element {
        debug_assert!((a as usize) < self.cardinality && (b as usize) < self.cardinality);
        match &self.tables {
            Tables::Dense { div, .. } => div[a as usize * self.cardinality + b as usize],
            Tables::Log { log, exp } => {
                if a == 0 || b == 0 {
                    return 0;
                }
                let order = self.cardinality - 1;
                exp[log[a as usize] as usize + order - log[b as usize] as usize]
            }
        }
    }

    /// Multiplicative inverse; `inv(0)` is 0.
    #[inline]
    pub fn inv(&self, a: Element) -> Element {
        self.div(1, a)
    }

    /// The precomputed row `c * x` for every x, when dense tables are kept.
    #[inline]
    pub fn mul_row(&self, c: Element) -> Option<&[Element]> {
        match &self.tables {
            Tables::Dense { mul, .. } => {
                let start = c as usize * self.cardinality;
                mul.get(start..start + self.cardinality)
            }
            Tables::Log { .. } => None,
        }
    }

    /// Byte packing is only defined for q = 16 and q = 256.
    pub fn supports_bytes(&self) -> bool {
        matches!(self.cardinality, 16 | 256)
    }

    fn packing_error(&self) -> RlncError {
        RlncError::UnsupportedPacking { cardinality: self.cardinality }
    }

    /// Number of coordinates needed to hold `byte_len` bytes.
    pub fn coordinates_for_bytes(&self, byte_len: usize) -> RlncResult<usize> {
        match self.cardinality {
            256 => Ok(byte_len),
            16 => Ok(byte_len * 2),
            _ => Err(self.packing_error()),
        }
    }

    /// Number of bytes needed to hold `coordinates` coordinates.
    pub fn bytes_for_coordinates(&self, coordinates: usize) -> RlncResult<usize> {
        match self.cardinality {
            256 => Ok(coordinates),
            16 => Ok((coordinates + 1) / 2),
            _ => Err(self.packing_error()),
        }
    }

    /// Unpacks `bytes` into a vector over this field.
    /// For GF(16) coordinate 2i is the low nibble of byte i, 2i+1 the high nibble.
    pub fn bytes_to_vector(self: &Arc<Self>, bytes: &[u8]) -> RlncResult<Vector> {
        let coordinates = match self.cardinality {
            256 => bytes.iter().map(|&b| b as Element).collect(),
            16 => {
                let mut out = Vec::with_capacity(bytes.len() * 2);
                for &b in bytes {
                    out.push((b & 0x0F) as Element);
                    out.push((b >> 4) as Element);
                }
                out
            }
            _ => return Err(self.packing_error()),
        };
        Ok(Vector::from_raw(self.clone(), coordinates))
    }

    /// Packs `vector` into bytes; the inverse of [`FiniteField::bytes_to_vector`].
    pub fn vector_to_bytes(&self, vector: &Vector) -> RlncResult<Vec<u8>> {
        if **vector.field() != *self {
            return Err(RlncError::FieldMismatch);
        }
        let coords = vector.as_slice();
        match self.cardinality {
            256 => Ok(coords.iter().map(|&c| c as u8).collect()),
            16 => Ok(coords
                .chunks(2)
                .map(|pair| {
                    let low = pair[0] as u8;
                    let high = pair.get(1).copied().unwrap_or(0) as u8;
                    (high << 4) | low
                })
                .collect()),
            _ => Err(self.packing_error()),
        }
    }
}

impl PartialEq for FiniteField {
    fn eq(&self, other: &Self) -> bool {
        self.exponent == other.exponent
    }
}

impl Eq for FiniteField {}

impl core::fmt::Debug for FiniteField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "GF(2^{})", self.exponent)
    }
}
