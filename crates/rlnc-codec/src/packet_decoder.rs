#![forbid(unsafe_code)]

use alloc::sync::Arc;
use alloc::vec::Vec;
use log::{debug, info};
use rand_core::{CryptoRng, RngCore};
use rlnc_core::{RlncError, RlncResult};
use rlnc_math::{row_add_scaled, Element, FiniteField, Matrix, Vector};
use zeroize::Zeroize;

use crate::config::CodecConfig;
use crate::decoder::{CodingVectorDecoder, Insertion};
use crate::packet::{CodedPacket, UncodedPacket};
use crate::recoder::recode_rows;

/// Result of offering one coded packet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reception {
    pub innovative: bool,
    /// Originals recovered by this packet, in row order.
    pub decoded: Vec<UncodedPacket>,
}

/// Recovers original packets from coded ones and relays fresh combinations.
///
/// Keeps every innovative coded packet it accepted as a row
/// `[ coding vector | payload ]` of a store sized once for `max_packets`;
/// the coding-vector decoder says which weighted sum of those rows yields
/// each original payload.
#[derive(Debug)]
pub struct PacketDecoder {
    field: Arc<FiniteField>,
    payload_len: usize,
    payload_coordinates: usize,
    decoder: CodingVectorDecoder,
    store: Matrix,
    recovered: Vec<UncodedPacket>,
    // block id -> index into `recovered`
    by_id: Vec<Option<usize>>,
}

impl PacketDecoder {
    pub fn new(field: &Arc<FiniteField>, max_packets: usize, payload_len: usize) -> RlncResult<Self> {
        if payload_len == 0 {
            return Err(RlncError::InvalidConfig("payload_len must be positive"));
        }
        let payload_coordinates = field.coordinates_for_bytes(payload_len)?;
        let decoder = CodingVectorDecoder::new(max_packets, field)?;
        debug!(
            "PacketDecoder over {:?}: {} packets of {} bytes",
            field, max_packets, payload_len
        );
        Ok(Self {
            field: field.clone(),
            payload_len,
            payload_coordinates,
            decoder,
            store: Matrix::new(max_packets, max_packets + payload_coordinates),
            recovered: Vec::with_capacity(max_packets),
            by_id: alloc::vec![None; max_packets],
        })
    }

    pub fn with_config(config: &CodecConfig) -> RlncResult<Self> {
        config.validate()?;
        let field = FiniteField::new(config.field_exponent)?;
        Self::new(&field, config.max_packets, config.payload_len)
    }

    pub fn field(&self) -> &Arc<FiniteField> {
        &self.field
    }

    pub fn max_packets(&self) -> usize {
        self.decoder.max_packets()
    }

    pub fn payload_len(&self) -> usize {
        self.payload_len
    }

    pub fn rank(&self) -> usize {
        self.decoder.rank()
    }

    pub fn is_complete(&self) -> bool {
        self.decoder.is_complete()
    }

    /// Offers one coded packet.
    pub fn add_packet(&mut self, packet: &CodedPacket) -> RlncResult<Reception> {
        if packet.field() != &self.field {
            return Err(RlncError::FieldMismatch);
        }
        self.decoder.check_vector(packet.coding_vector())?;
        if packet.payload().len() != self.payload_coordinates {
            return Err(RlncError::LengthMismatch {
                expected: self.payload_coordinates,
                actual: packet.payload().len(),
            });
        }

        // Nothing left to learn.
        if self.decoder.is_complete() {
            return Ok(Reception::default());
        }

        let slot = self.decoder.rank();
        let entries = match self.decoder.add_vector(packet.coding_vector())? {
            Insertion::Rejected => return Ok(Reception::default()),
            Insertion::Accepted(entries) => entries,
        };

        let split = self.max_packets();
        let row = self.store.row_mut(slot)?;
        row[..split].copy_from_slice(packet.coding_vector().as_slice());
        row[split..].copy_from_slice(packet.payload().as_slice());

        let mut decoded = Vec::with_capacity(entries.len());
        for entry in entries {
            let payload = self.combine_payloads(&entry.coefficients)?;
            let bytes = self.field.vector_to_bytes(&payload)?;
            let original = UncodedPacket::new(entry.coordinate, bytes);
            let index = self
                .by_id
                .get_mut(entry.coordinate)
                .ok_or(RlncError::InvalidState)?;
            *index = Some(self.recovered.len());
            self.recovered.push(original.clone());
            decoded.push(original);
        }

        if self.is_complete() {
            info!("Generation complete: {} packets recovered", self.recovered.len());
        }
        Ok(Reception { innovative: true, decoded })
    }

    /// sum( w_k * payload_k ) over the stored rows.
    fn combine_payloads(&self, weights: &Vector) -> RlncResult<Vector> {
        let split = self.max_packets();
        let mut out = alloc::vec![0 as Element; self.payload_coordinates];
        for (k, &w) in weights.as_slice().iter().enumerate() {
            if w == 0 {
                continue;
            }
            if k >= self.rank() {
                return Err(RlncError::InvalidState);
            }
            row_add_scaled(&self.field, &mut out, &self.store.row(k)?[split..], w);
        }
        Vector::from_slice(&self.field, &out)
    }

    pub fn decoded_count(&self) -> usize {
        self.recovered.len()
    }

    /// Recovered originals in the order they were decoded.
    pub fn decoded_packets(&self) -> &[UncodedPacket] {
        &self.recovered
    }

    pub fn decoded_packet(&self, index: usize) -> Option<&UncodedPacket> {
        self.recovered.get(index)
    }

    pub fn decoded_by_id(&self, id: usize) -> Option<&UncodedPacket> {
        let index = (*self.by_id.get(id)?)?;
        self.recovered.get(index)
    }

    /// The `index`-th innovative packet accepted, in arrival order.
    pub fn coded_packet(&self, index: usize) -> RlncResult<CodedPacket> {
        if index >= self.rank() {
            return Err(RlncError::IndexOutOfRange { index, len: self.rank() });
        }
        let (coding, payload) = self.store.row(index)?.split_at(self.max_packets());
        CodedPacket::new(
            Vector::from_slice(&self.field, coding)?,
            Vector::from_slice(&self.field, payload)?,
        )
    }

    /// All innovative packets accepted so far, in arrival order.
    pub fn coded_packets(&self) -> RlncResult<Vec<CodedPacket>> {
        (0..self.rank()).map(|i| self.coded_packet(i)).collect()
    }

    /// A random combination of the held packets.
    pub fn recoded_packet<R: RngCore + CryptoRng>(&self, rng: &mut R) -> RlncResult<CodedPacket> {
        recode_rows(&self.field, &self.store, self.rank(), self.max_packets(), rng)
    }
}

impl Drop for PacketDecoder {
    fn drop(&mut self) {
        self.store.zeroize();
        for p in self.recovered.iter_mut() {
            p.zeroize();
        }
    }
}
