use alloc::sync::Arc;
use alloc::vec::Vec;
use rlnc_core::{RlncError, RlncResult};
use zeroize::Zeroize;

use crate::scalar::{row_add_scaled, row_scale};
use crate::{Element, FiniteField};

/// A fixed-length vector of elements of one finite field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vector {
    field: Arc<FiniteField>,
    coordinates: Vec<Element>,
}

impl Vector {
    /// The all-zero vector of the given length.
    pub fn zero(len: usize, field: &Arc<FiniteField>) -> Self {
        Self { field: field.clone(), coordinates: alloc::vec![0; len] }
    }

    /// The elementary vector with a 1 at `index`.
    pub fn unit(len: usize, index: usize, field: &Arc<FiniteField>) -> RlncResult<Self> {
        let mut v = Self::zero(len, field);
        v.set(index, 1)?;
        Ok(v)
    }

    /// Builds a vector from raw values, checking each is a field element.
    pub fn from_elements(field: &Arc<FiniteField>, values: &[u32]) -> RlncResult<Self> {
        let coordinates = values
            .iter()
            .map(|&v| field.element(v))
            .collect::<RlncResult<Vec<_>>>()?;
        Ok(Self { field: field.clone(), coordinates })
    }

    /// Builds a vector from elements, checking each is below q.
    pub fn from_slice(field: &Arc<FiniteField>, values: &[Element]) -> RlncResult<Self> {
        for &v in values {
            field.element(v as u32)?;
        }
        Ok(Self { field: field.clone(), coordinates: values.to_vec() })
    }

    pub(crate) fn from_raw(field: Arc<FiniteField>, coordinates: Vec<Element>) -> Self {
        Self { field, coordinates }
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn field(&self) -> &Arc<FiniteField> {
        &self.field
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.coordinates
    }

    pub fn get(&self, index: usize) -> Option<Element> {
        self.coordinates.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: Element) -> RlncResult<()> {
        let len = self.coordinates.len();
        let value = self.field.element(value as u32)?;
        let slot = self
            .coordinates
            .get_mut(index)
            .ok_or(RlncError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    pub fn set_to_zero(&mut self) {
        self.coordinates.fill(0);
    }

    pub fn is_zero(&self) -> bool {
        self.coordinates.iter().all(|&c| c == 0)
    }

    /// Errors unless `other` has the same field and length.
    pub fn check_compatible(&self, other: &Vector) -> RlncResult<()> {
        if self.field != other.field {
            return Err(RlncError::FieldMismatch);
        }
        if self.len() != other.len() {
            return Err(RlncError::LengthMismatch { expected: self.len(), actual: other.len() });
        }
        Ok(())
    }

    /// Element-wise sum, as a new vector.
    pub fn add(&self, other: &Vector) -> RlncResult<Vector> {
        let mut out = self.clone();
        out.add_assign_scaled(other, 1)?;
        Ok(out)
    }

    /// Scalar multiple, as a new vector. `c` must be a field element.
    pub fn scalar_multiply(&self, c: Element) -> RlncResult<Vector> {
        let c = self.field.element(c as u32)?;
        let mut out = self.clone();
        row_scale(&self.field, &mut out.coordinates, c);
        Ok(out)
    }

    /// In place: `self += c * other`.
    pub fn add_assign_scaled(&mut self, other: &Vector, c: Element) -> RlncResult<()> {
        self.check_compatible(other)?;
        let c = self.field.element(c as u32)?;
        row_add_scaled(&self.field, &mut self.coordinates, &other.coordinates, c);
        Ok(())
    }

    /// Dot product over the field.
    pub fn dot(&self, other: &Vector) -> RlncResult<Element> {
        self.check_compatible(other)?;
        Ok(self
            .coordinates
            .iter()
            .zip(&other.coordinates)
            .fold(0, |acc, (&a, &b)| acc ^ self.field.mul(a, b)))
    }

    pub fn to_bytes(&self) -> RlncResult<Vec<u8>> {
        self.field.vector_to_bytes(self)
    }
}

impl Zeroize for Vector {
    fn zeroize(&mut self) {
        self.coordinates.as_mut_slice().zeroize();
    }
}
