#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

mod config;
mod decoder;
mod packet;
mod packet_decoder;
mod recoder;
mod segment;
mod space;

pub use config::{CodecConfig, DEFAULT_PAYLOAD_LEN};
pub use decoder::{CodingVectorDecoder, DecodedEntry, Insertion};
pub use packet::{CodedPacket, UncodedPacket};
pub use packet_decoder::{PacketDecoder, Reception};
pub use recoder::{random_coefficients, random_element, recode};
pub use segment::{SegmentDecoder, SegmentEncoder};
pub use space::VectorSpace;

pub use rlnc_math::{Element, FiniteField, Vector};
