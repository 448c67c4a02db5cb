#![forbid(unsafe_code)]

use alloc::sync::Arc;
use alloc::vec::Vec;
use log::trace;
use rand_core::{CryptoRng, RngCore};
use rlnc_core::{RlncError, RlncResult};
use rlnc_math::{row_add_scaled, Element, FiniteField, Matrix, Vector};

use crate::packet::CodedPacket;

/// Uniform element of `field`.
pub fn random_element<R: RngCore + CryptoRng>(field: &FiniteField, rng: &mut R) -> Element {
    // q is a power of two, so masking is uniform.
    (rng.next_u32() & (field.cardinality() as u32 - 1)) as Element
}

/// Fresh local coefficients, one per basis slot.
pub fn random_coefficients<R: RngCore + CryptoRng>(
    field: &FiniteField,
    count: usize,
    rng: &mut R,
) -> Vec<Element> {
    (0..count).map(|_| random_element(field, rng)).collect()
}

/// P_out = sum( alpha_i * basis_i ) with fresh random alpha_i.
///
/// The result always lies in the span of `basis`, so it never carries
/// information the holder does not have.
pub fn recode<R: RngCore + CryptoRng>(basis: &[CodedPacket], rng: &mut R) -> RlncResult<CodedPacket> {
    let first = basis.first().ok_or(RlncError::InvalidState)?;
    let coefficients = random_coefficients(first.field(), basis.len(), rng);

    let mut out = CodedPacket::zero_like(first);
    for (slot, &alpha) in basis.iter().zip(&coefficients) {
        if alpha == 0 {
            continue;
        }
        out.add_assign_scaled(slot, alpha)?;
    }
    trace!("Recoded packet from {} basis slots", basis.len());
    Ok(out)
}

/// Same mix over the first `count` rows of a `[ coding vector | payload ]`
/// store; `split` is the coding vector length.
pub fn recode_rows<R: RngCore + CryptoRng>(
    field: &Arc<FiniteField>,
    store: &Matrix,
    count: usize,
    split: usize,
    rng: &mut R,
) -> RlncResult<CodedPacket> {
    if count == 0 {
        return Err(RlncError::InvalidState);
    }
    let coefficients = random_coefficients(field, count, rng);

    let mut out = alloc::vec![0 as Element; store.cols()];
    for (r, &alpha) in coefficients.iter().enumerate() {
        row_add_scaled(field, &mut out, store.row(r)?, alpha);
    }
    trace!("Recoded packet from {} stored rows", count);

    let (coding, payload) = out.split_at(split);
    CodedPacket::new(Vector::from_slice(field, coding)?, Vector::from_slice(field, payload)?)
}
