#![forbid(unsafe_code)]

use alloc::sync::Arc;
use alloc::vec::Vec;
use rlnc_core::{RlncError, RlncResult};
use rlnc_math::{FiniteField, Matrix, Vector};

use crate::decoder::CodingVectorDecoder;

/// A subspace of GF(q)^len, held as a canonical RREF basis.
#[derive(Clone, Debug)]
pub struct VectorSpace {
    field: Arc<FiniteField>,
    len: usize,
    basis: Matrix,
    probe: CodingVectorDecoder,
}

impl VectorSpace {
    /// Span of `generators`. Dependent generators are skipped.
    pub fn new(field: &Arc<FiniteField>, len: usize, generators: &[Vector]) -> RlncResult<Self> {
        if len == 0 {
            return Err(RlncError::InvalidConfig("vector length must be positive"));
        }
        let mut probe = CodingVectorDecoder::new(len, field)?;
        let mut independent = Vec::new();
        for v in generators {
            probe.check_vector(v)?;
            if probe.is_complete() {
                continue;
            }
            if probe.add_vector(v)?.is_innovative() {
                independent.push(v.clone());
            }
        }
        let (basis, _rank) = Matrix::from_rows(len, &independent)?.to_reduced_row_echelon_form(field);
        Ok(Self { field: field.clone(), len, basis, probe })
    }

    pub fn field(&self) -> &Arc<FiniteField> {
        &self.field
    }

    /// Length of the ambient vectors.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn dimension(&self) -> usize {
        self.probe.rank()
    }

    pub fn is_trivial(&self) -> bool {
        self.dimension() == 0
    }

    /// RREF basis, sorted by pivot column.
    pub fn basis(&self) -> RlncResult<Vec<Vector>> {
        (0..self.basis.rows())
            .map(|r| self.basis.row_vector(r, &self.field))
            .collect()
    }

    pub fn contains(&self, v: &Vector) -> RlncResult<bool> {
        self.probe.check_vector(v)?;
        if self.probe.is_complete() {
            return Ok(true);
        }
        let mut probe = self.probe.clone();
        Ok(!probe.add_vector(v)?.is_innovative())
    }

    /// True if every vector of `other` lies in this space.
    pub fn contains_space(&self, other: &VectorSpace) -> RlncResult<bool> {
        self.check_compatible(other)?;
        for v in other.basis()? {
            if !self.contains(&v)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// A complement W with self + W = whole space and self ∩ W = {0},
    /// spanned by elementary vectors.
    pub fn complement(&self) -> RlncResult<VectorSpace> {
        let mut probe = self.probe.clone();
        let mut extra = Vec::new();
        for i in 0..self.len {
            if probe.is_complete() {
                break;
            }
            let e = Vector::unit(self.len, i, &self.field)?;
            if probe.add_vector(&e)?.is_innovative() {
                extra.push(e);
            }
        }
        VectorSpace::new(&self.field, self.len, &extra)
    }

    fn check_compatible(&self, other: &VectorSpace) -> RlncResult<()> {
        if self.field != other.field {
            return Err(RlncError::FieldMismatch);
        }
        if self.len != other.len {
            return Err(RlncError::LengthMismatch { expected: self.len, actual: other.len });
        }
        Ok(())
    }

    pub fn sum(&self, other: &VectorSpace) -> RlncResult<VectorSpace> {
        self.check_compatible(other)?;
        let mut generators = self.basis()?;
        generators.extend(other.basis()?);
        VectorSpace::new(&self.field, self.len, &generators)
    }

    /// Zassenhaus: reduce rows [u | u] and [w | 0]; rows with a zero left
    /// half span the intersection in their right half.
    pub fn intersection(&self, other: &VectorSpace) -> RlncResult<VectorSpace> {
        self.check_compatible(other)?;
        let n = self.len;
        let rows = self.basis.rows() + other.basis.rows();
        let mut block = Matrix::new(rows, 2 * n);

        for r in 0..self.basis.rows() {
            let u = self.basis.row(r)?;
            let dest = block.row_mut(r)?;
            dest[..n].copy_from_slice(u);
            dest[n..].copy_from_slice(u);
        }
        for r in 0..other.basis.rows() {
            let w = other.basis.row(r)?;
            block.row_mut(self.basis.rows() + r)?[..n].copy_from_slice(w);
        }

        let (reduced, _rank) = block.to_reduced_row_echelon_form(&self.field);
        let mut common = Vec::new();
        for r in 0..reduced.rows() {
            let row = reduced.row(r)?;
            let (left, right) = row.split_at(n);
            if left.iter().all(|&x| x == 0) && right.iter().any(|&x| x != 0) {
                common.push(Vector::from_slice(&self.field, right)?);
            }
        }
        VectorSpace::new(&self.field, n, &common)
    }
}

impl PartialEq for VectorSpace {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.len == other.len && self.basis == other.basis
    }
}

impl Eq for VectorSpace {}
