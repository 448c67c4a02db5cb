#![forbid(unsafe_code)]

use alloc::sync::Arc;
use alloc::vec::Vec;
use log::{debug, warn};
use rand_core::{CryptoRng, RngCore};
use rlnc_core::{RlncError, RlncResult, BYTE_FIELD_EXPONENT};
use rlnc_math::FiniteField;

use crate::config::CodecConfig;
use crate::packet::{CodedPacket, UncodedPacket};
use crate::packet_decoder::PacketDecoder;
use crate::recoder::recode;

/// Block size for a segment of `segment_len` bytes cut into `k` blocks.
/// The last block is zero-padded.
fn segment_config(segment_len: usize, k: usize) -> RlncResult<CodecConfig> {
    if segment_len == 0 {
        return Err(RlncError::InvalidConfig("segment is empty"));
    }
    if k == 0 {
        return Err(RlncError::InvalidConfig("packets_per_segment must be positive"));
    }
    let config = CodecConfig {
        field_exponent: BYTE_FIELD_EXPONENT,
        max_packets: k,
        payload_len: (segment_len + k - 1) / k,
    };
    config.validate()?;
    Ok(config)
}

/// Source side of the byte-oriented codec. GF(256), one coefficient per byte.
pub struct SegmentEncoder {
    config: CodecConfig,
    sources: Vec<CodedPacket>,
}

impl SegmentEncoder {
    pub fn new(segment: &[u8], packets_per_segment: usize) -> RlncResult<Self> {
        let config = segment_config(segment.len(), packets_per_segment)?;
        let field = FiniteField::gf256();
        let block = config.payload_len;

        let mut sources = Vec::with_capacity(packets_per_segment);
        for id in 0..packets_per_segment {
            let mut payload = alloc::vec![0u8; block];
            let start = id * block;
            if start < segment.len() {
                let end = core::cmp::min(start + block, segment.len());
                payload[..end - start].copy_from_slice(&segment[start..end]);
            }
            sources.push(CodedPacket::from_uncoded(
                &UncodedPacket::new(id, payload),
                packets_per_segment,
                &field,
            )?);
        }
        debug!(
            "SegmentEncoder: {} bytes as {} blocks of {}",
            segment.len(),
            packets_per_segment,
            block
        );
        Ok(Self { config, sources })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn packet_len(&self) -> usize {
        self.config.packet_len()
    }

    /// Block `id` under its elementary coding vector.
    pub fn systematic_packet(&self, id: usize) -> RlncResult<Vec<u8>> {
        self.sources
            .get(id)
            .ok_or(RlncError::IndexOutOfRange { index: id, len: self.sources.len() })?
            .to_bytes()
    }

    pub fn coded_packet<R: RngCore + CryptoRng>(&self, rng: &mut R) -> RlncResult<CodedPacket> {
        recode(&self.sources, rng)
    }

    /// Wire bytes of a fresh random combination of all blocks.
    pub fn next_packet<R: RngCore + CryptoRng>(&self, rng: &mut R) -> RlncResult<Vec<u8>> {
        self.coded_packet(rng)?.to_bytes()
    }
}

/// Sink side of the byte-oriented codec. Also relays recoded packets.
pub struct SegmentDecoder {
    segment_len: usize,
    config: CodecConfig,
    inner: PacketDecoder,
}

impl SegmentDecoder {
    pub fn new(segment_len: usize, packets_per_segment: usize) -> RlncResult<Self> {
        let config = segment_config(segment_len, packets_per_segment)?;
        let inner = PacketDecoder::with_config(&config)?;
        Ok(Self { segment_len, config, inner })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn packet_len(&self) -> usize {
        self.config.packet_len()
    }

    fn field(&self) -> &Arc<FiniteField> {
        self.inner.field()
    }

    /// Process wire bytes. Returns true if innovative.
    pub fn add_packet(&mut self, packet: &[u8]) -> RlncResult<bool> {
        if packet.len() != self.packet_len() {
            warn!("Dropping packet of {} bytes, expected {}", packet.len(), self.packet_len());
            return Err(RlncError::WireFormatError);
        }
        let coded = CodedPacket::from_bytes(self.config.max_packets, packet, self.field())?;
        Ok(self.inner.add_packet(&coded)?.innovative)
    }

    pub fn rank(&self) -> usize {
        self.inner.rank()
    }

    pub fn decoded_count(&self) -> usize {
        self.inner.decoded_count()
    }

    pub fn is_decoded(&self) -> bool {
        self.inner.decoded_count() == self.config.max_packets
    }

    /// The `index`-th recovered block, in decode order, with its block id.
    pub fn decoded_packet(&self, index: usize) -> Option<(usize, &[u8])> {
        self.inner
            .decoded_packet(index)
            .map(|p| (p.id, p.payload.as_slice()))
    }

    pub fn recoded_packet<R: RngCore + CryptoRng>(&self, rng: &mut R) -> RlncResult<Vec<u8>> {
        self.inner.recoded_packet(rng)?.to_bytes()
    }

    /// Reassembles the segment once every block is recovered.
    pub fn segment(&self) -> RlncResult<Vec<u8>> {
        if !self.is_decoded() {
            return Err(RlncError::InvalidState);
        }
        let mut out = Vec::with_capacity(self.config.max_packets * self.config.payload_len);
        for id in 0..self.config.max_packets {
            let block = self.inner.decoded_by_id(id).ok_or(RlncError::InvalidState)?;
            out.extend_from_slice(&block.payload);
        }
        out.truncate(self.segment_len);
        Ok(out)
    }
}
