#![forbid(unsafe_code)]

use alloc::sync::Arc;
use alloc::vec::Vec;
use log::{debug, trace, warn};
use rlnc_core::{RlncError, RlncResult};
use rlnc_math::{row_add_scaled, row_scale, Element, FiniteField, Matrix, Vector};
use zeroize::Zeroize;

/// An original coordinate that became recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntry {
    pub coordinate: usize,
    /// Weights over the accepted vectors, indexed by acceptance order.
    pub coefficients: Vector,
}

/// Outcome of offering a coding vector to the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// Linearly dependent on what was already accepted. State is unchanged.
    Rejected,
    /// Innovative. Carries every coordinate that became decodable with it,
    /// possibly none.
    Accepted(Vec<DecodedEntry>),
}

impl Insertion {
    pub fn is_innovative(&self) -> bool {
        matches!(self, Insertion::Accepted(_))
    }

    pub fn decoded(&self) -> &[DecodedEntry] {
        match self {
            Insertion::Rejected => &[],
            Insertion::Accepted(entries) => entries,
        }
    }
}

/// Online Gauss-Jordan decoder over coding vectors.
///
/// Row `i` of the working matrix is `[ reduced vector | combination ]`:
/// the left half lives in coding-vector space, the right half records which
/// weighted sum of accepted inputs produced it. Both halves are kept in
/// reduced row echelon form after every insertion, so a row whose left half
/// is a single nonzero entry names a decoded coordinate and its right half
/// is the recipe.
#[derive(Clone, Debug)]
pub struct CodingVectorDecoder {
    field: Arc<FiniteField>,
    max_packets: usize,
    matrix: Matrix,
    pivot_column: Vec<usize>,
    column_claimed: Vec<bool>,
    decoded: Vec<bool>,
    decoded_count: usize,
    accepted: usize,
}

impl CodingVectorDecoder {
    pub fn new(max_packets: usize, field: &Arc<FiniteField>) -> RlncResult<Self> {
        if max_packets == 0 {
            return Err(RlncError::InvalidConfig("max_packets must be positive"));
        }
        Ok(Self {
            field: field.clone(),
            max_packets,
            matrix: Matrix::new(max_packets, 2 * max_packets),
            pivot_column: Vec::with_capacity(max_packets),
            column_claimed: alloc::vec![false; max_packets],
            decoded: alloc::vec![false; max_packets],
            decoded_count: 0,
            accepted: 0,
        })
    }

    pub fn field(&self) -> &Arc<FiniteField> {
        &self.field
    }

    pub fn max_packets(&self) -> usize {
        self.max_packets
    }

    /// Number of accepted vectors, i.e. the dimension of their span.
    pub fn rank(&self) -> usize {
        self.accepted
    }

    pub fn is_complete(&self) -> bool {
        self.accepted == self.max_packets
    }

    pub fn decoded_count(&self) -> usize {
        self.decoded_count
    }

    pub fn is_coordinate_decoded(&self, coordinate: usize) -> bool {
        (0..self.accepted).any(|i| self.decoded[i] && self.pivot_column[i] == coordinate)
    }

    /// Errors unless `v` lives in this decoder's coding-vector space.
    pub fn check_vector(&self, v: &Vector) -> RlncResult<()> {
        if v.field() != &self.field {
            return Err(RlncError::FieldMismatch);
        }
        if v.len() != self.max_packets {
            return Err(RlncError::LengthMismatch { expected: self.max_packets, actual: v.len() });
        }
        Ok(())
    }

    /// Reduced form of accepted vector slot `i` (left half of its row).
    pub fn reduced_row(&self, i: usize) -> RlncResult<Vector> {
        if i >= self.accepted {
            return Err(RlncError::IndexOutOfRange { index: i, len: self.accepted });
        }
        Vector::from_slice(&self.field, &self.matrix.row(i)?[..self.max_packets])
    }

    /// Offers one coding vector.
    pub fn add_vector(&mut self, v: &Vector) -> RlncResult<Insertion> {
        self.check_vector(v)?;
        if self.is_complete() {
            warn!("Decoder at capacity ({} vectors), insert refused", self.max_packets);
            return Err(RlncError::CapacityExceeded { capacity: self.max_packets });
        }

        let n = self.max_packets;
        let width = 2 * n;
        let r = self.accepted;
        let field: &FiniteField = &self.field;

        let (done, row) = self.matrix.split_at_row_mut(r)?;

        // Candidate row: [ v | e_r ]
        row[..n].copy_from_slice(v.as_slice());
        row[n..].fill(0);
        row[n + r] = 1;

        // Clear every claimed pivot column from the candidate.
        for i in 0..r {
            let factor = row[self.pivot_column[i]];
            if factor != 0 {
                row_add_scaled(field, row, &done[i * width..(i + 1) * width], factor);
            }
        }
        trace!("Candidate reduced against {} rows", r);

        let Some(pivot) = (0..n).find(|&c| !self.column_claimed[c] && row[c] != 0) else {
            row.fill(0);
            debug!("Vector rejected: dependent on {} accepted", r);
            return Ok(Insertion::Rejected);
        };

        let lead = row[pivot];
        if lead != 1 {
            row_scale(field, row, field.inv(lead));
        }

        // Back-substitute the new pivot out of the accepted rows.
        for i in 0..r {
            let factor = done[i * width + pivot];
            if factor != 0 {
                row_add_scaled(field, &mut done[i * width..(i + 1) * width], row, factor);
            }
        }

        self.pivot_column.push(pivot);
        self.column_claimed[pivot] = true;
        self.accepted += 1;
        debug!("Vector accepted as slot {} with pivot column {}", r, pivot);

        // Any undecoded row may have collapsed to a single nonzero entry.
        let mut entries = Vec::new();
        for i in 0..self.accepted {
            if self.decoded[i] {
                continue;
            }
            let row = self.matrix.row(i)?;
            let Some(coordinate) = single_nonzero(&row[..n]) else {
                continue;
            };
            let coefficients = Vector::from_slice(&self.field, &row[n..])?;
            self.decoded[i] = true;
            self.decoded_count += 1;
            trace!("Coordinate {} decodable from row {}", coordinate, i);
            entries.push(DecodedEntry { coordinate, coefficients });
        }

        Ok(Insertion::Accepted(entries))
    }
}

impl Drop for CodingVectorDecoder {
    fn drop(&mut self) {
        self.matrix.zeroize();
    }
}

fn single_nonzero(row: &[Element]) -> Option<usize> {
    let mut found = None;
    for (c, &x) in row.iter().enumerate() {
        if x != 0 {
            if found.is_some() {
                return None;
            }
            found = Some(c);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::single_nonzero;

    #[test]
    fn test_single_nonzero() {
        assert_eq!(single_nonzero(&[0, 0, 5, 0]), Some(2));
        assert_eq!(single_nonzero(&[1, 0, 5]), None);
        assert_eq!(single_nonzero(&[0, 0]), None);
    }
}
