#![forbid(unsafe_code)]

use alloc::sync::Arc;
use alloc::vec::Vec;
use rlnc_core::{RlncError, RlncResult};
use rlnc_math::{Element, FiniteField, Vector};
use zeroize::Zeroize;

/// An original packet: its index in the generation and its bytes.
/// Ordered by id first.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Zeroize)]
pub struct UncodedPacket {
    pub id: usize,
    pub payload: Vec<u8>,
}

impl UncodedPacket {
    pub fn new(id: usize, payload: Vec<u8>) -> Self {
        Self { id, payload }
    }
}

/// A coded packet: the coding vector and the matching combination of payloads.
/// Wire format: [ coding vector bytes | payload bytes ]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodedPacket {
    coding_vector: Vector,
    payload: Vector,
}

impl CodedPacket {
    pub fn new(coding_vector: Vector, payload: Vector) -> RlncResult<Self> {
        if coding_vector.field() != payload.field() {
            return Err(RlncError::FieldMismatch);
        }
        Ok(Self { coding_vector, payload })
    }

    /// Wraps an original packet under the elementary vector `e_id`.
    pub fn from_uncoded(
        packet: &UncodedPacket,
        max_packets: usize,
        field: &Arc<FiniteField>,
    ) -> RlncResult<Self> {
        if packet.id >= max_packets {
            return Err(RlncError::IndexOutOfRange { index: packet.id, len: max_packets });
        }
        let coding_vector = Vector::unit(max_packets, packet.id, field)?;
        let payload = field.bytes_to_vector(&packet.payload)?;
        Ok(Self { coding_vector, payload })
    }

    /// Zero coding vector and zero payload.
    pub fn zero(
        max_packets: usize,
        payload_len: usize,
        field: &Arc<FiniteField>,
    ) -> RlncResult<Self> {
        let coordinates = field.coordinates_for_bytes(payload_len)?;
        Ok(Self {
            coding_vector: Vector::zero(max_packets, field),
            payload: Vector::zero(coordinates, field),
        })
    }

    /// Zero packet with the same shape as `other`.
    pub fn zero_like(other: &CodedPacket) -> Self {
        let field = other.field();
        Self {
            coding_vector: Vector::zero(other.coding_vector.len(), field),
            payload: Vector::zero(other.payload.len(), field),
        }
    }

    /// Parses the wire format. Everything after the coding vector is payload.
    pub fn from_bytes(
        max_packets: usize,
        data: &[u8],
        field: &Arc<FiniteField>,
    ) -> RlncResult<Self> {
        let header_len = field.bytes_for_coordinates(max_packets)?;
        if data.len() <= header_len {
            return Err(RlncError::WireFormatError);
        }
        let (header, body) = data.split_at(header_len);

        let unpacked = field.bytes_to_vector(header)?;
        // GF(16) with odd max_packets: the last header nibble is padding.
        let coordinates = unpacked.as_slice();
        if coordinates[max_packets..].iter().any(|&c| c != 0) {
            return Err(RlncError::WireFormatError);
        }
        let coding_vector = Vector::from_slice(field, &coordinates[..max_packets])?;
        let payload = field.bytes_to_vector(body)?;
        Ok(Self { coding_vector, payload })
    }

    pub fn to_bytes(&self) -> RlncResult<Vec<u8>> {
        let mut out = self.coding_vector.to_bytes()?;
        out.extend_from_slice(&self.payload.to_bytes()?);
        Ok(out)
    }

    pub fn field(&self) -> &Arc<FiniteField> {
        self.coding_vector.field()
    }

    pub fn coding_vector(&self) -> &Vector {
        &self.coding_vector
    }

    pub fn payload(&self) -> &Vector {
        &self.payload
    }

    /// Coordinates in the concatenated view `[ coding vector | payload ]`.
    pub fn len(&self) -> usize {
        self.coding_vector.len() + self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Element> {
        let split = self.coding_vector.len();
        if index < split {
            self.coding_vector.get(index)
        } else {
            self.payload.get(index - split)
        }
    }

    pub fn set(&mut self, index: usize, value: Element) -> RlncResult<()> {
        let split = self.coding_vector.len();
        if index < split {
            self.coding_vector.set(index, value)
        } else if index - split < self.payload.len() {
            self.payload.set(index - split, value)
        } else {
            Err(RlncError::IndexOutOfRange { index, len: self.len() })
        }
    }

    pub fn add(&self, other: &CodedPacket) -> RlncResult<CodedPacket> {
        let mut out = self.clone();
        out.add_assign_scaled(other, 1)?;
        Ok(out)
    }

    pub fn scalar_multiply(&self, c: Element) -> RlncResult<CodedPacket> {
        Ok(Self {
            coding_vector: self.coding_vector.scalar_multiply(c)?,
            payload: self.payload.scalar_multiply(c)?,
        })
    }

    /// In place: `self += c * other`, over both halves.
    pub fn add_assign_scaled(&mut self, other: &CodedPacket, c: Element) -> RlncResult<()> {
        self.coding_vector.check_compatible(&other.coding_vector)?;
        self.payload.check_compatible(&other.payload)?;
        self.coding_vector.add_assign_scaled(&other.coding_vector, c)?;
        self.payload.add_assign_scaled(&other.payload, c)
    }
}

impl Zeroize for CodedPacket {
    fn zeroize(&mut self) {
        self.coding_vector.zeroize();
        self.payload.zeroize();
    }
}
