use alloc::sync::Arc;
use alloc::vec::Vec;
use rlnc_core::{RlncError, RlncResult};
use zeroize::Zeroize;

use crate::scalar::{row_add_scaled, row_scale};
use crate::{Element, FiniteField, Vector};

/// Row-major `rows x cols` matrix of field elements.
/// Field arithmetic is supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Element>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: alloc::vec![0; rows * cols] }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1;
        }
        m
    }

    /// Stacks vectors of equal length as rows.
    pub fn from_rows(cols: usize, rows: &[Vector]) -> RlncResult<Self> {
        let mut m = Self::new(rows.len(), cols);
        for (r, v) in rows.iter().enumerate() {
            if v.len() != cols {
                return Err(RlncError::LengthMismatch { expected: cols, actual: v.len() });
            }
            m.row_mut(r)?.copy_from_slice(v.as_slice());
        }
        Ok(m)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, r: usize, c: usize) -> Option<Element> {
        if r >= self.rows || c >= self.cols {
            return None;
        }
        Some(self.data[r * self.cols + c])
    }

    pub fn set(&mut self, r: usize, c: usize, val: Element) -> RlncResult<()> {
        if r >= self.rows {
            return Err(RlncError::IndexOutOfRange { index: r, len: self.rows });
        }
        if c >= self.cols {
            return Err(RlncError::IndexOutOfRange { index: c, len: self.cols });
        }
        self.data[r * self.cols + c] = val;
        Ok(())
    }

    pub fn row(&self, r: usize) -> RlncResult<&[Element]> {
        if r >= self.rows {
            return Err(RlncError::IndexOutOfRange { index: r, len: self.rows });
        }
        Ok(&self.data[r * self.cols..(r + 1) * self.cols])
    }

    pub fn row_mut(&mut self, r: usize) -> RlncResult<&mut [Element]> {
        if r >= self.rows {
            return Err(RlncError::IndexOutOfRange { index: r, len: self.rows });
        }
        Ok(&mut self.data[r * self.cols..(r + 1) * self.cols])
    }

    /// Splits the storage at row `r`: rows `0..r` (flat) and row `r` itself.
    pub fn split_at_row_mut(&mut self, r: usize) -> RlncResult<(&mut [Element], &mut [Element])> {
        if r >= self.rows {
            return Err(RlncError::IndexOutOfRange { index: r, len: self.rows });
        }
        let (head, tail) = self.data.split_at_mut(r * self.cols);
        Ok((head, &mut tail[..self.cols]))
    }

    /// Copies row `r` into a vector over `field`.
    pub fn row_vector(&self, r: usize, field: &Arc<FiniteField>) -> RlncResult<Vector> {
        Ok(Vector::from_raw(field.clone(), self.row(r)?.to_vec()))
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b || a >= self.rows || b >= self.rows {
            return;
        }
        for c in 0..self.cols {
            self.data.swap(a * self.cols + c, b * self.cols + c);
        }
    }

    /// `row[dest] += factor * row[src]`, `dest != src`.
    fn add_scaled_row(&mut self, field: &FiniteField, dest: usize, src: usize, factor: Element) {
        let cols = self.cols;
        if dest < src {
            let (head, tail) = self.data.split_at_mut(src * cols);
            row_add_scaled(field, &mut head[dest * cols..(dest + 1) * cols], &tail[..cols], factor);
        } else {
            let (head, tail) = self.data.split_at_mut(dest * cols);
            row_add_scaled(field, &mut tail[..cols], &head[src * cols..(src + 1) * cols], factor);
        }
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::new(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                t.data[c * self.rows + r] = self.data[r * self.cols + c];
            }
        }
        t
    }

    /// Matrix-vector product `y = A x`.
    pub fn mul_vec(&self, field: &FiniteField, x: &[Element]) -> RlncResult<Vec<Element>> {
        if x.len() != self.cols {
            return Err(RlncError::LengthMismatch { expected: self.cols, actual: x.len() });
        }
        let mut y = alloc::vec![0; self.rows];
        for (r, out) in y.iter_mut().enumerate() {
            let row = &self.data[r * self.cols..(r + 1) * self.cols];
            *out = row.iter().zip(x).fold(0, |acc, (&a, &b)| acc ^ field.mul(a, b));
        }
        Ok(y)
    }

    /// Matrix product `self * other`.
    pub fn multiply(&self, field: &FiniteField, other: &Matrix) -> RlncResult<Matrix> {
        if self.cols != other.rows {
            return Err(RlncError::LengthMismatch { expected: self.cols, actual: other.rows });
        }
        let mut out = Matrix::new(self.rows, other.cols);
        for r in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[r * self.cols + k];
                if a == 0 {
                    continue;
                }
                let src = &other.data[k * other.cols..(k + 1) * other.cols];
                let dest = &mut out.data[r * other.cols..(r + 1) * other.cols];
                row_add_scaled(field, dest, src, a);
            }
        }
        Ok(out)
    }

    /// Gauss-Jordan elimination in place. Returns the rank.
    pub fn reduce_row_echelon(&mut self, field: &FiniteField) -> usize {
        let mut pivot_row = 0;
        for col in 0..self.cols {
            if pivot_row >= self.rows {
                break;
            }

            let Some(found) = (pivot_row..self.rows).find(|&r| self.data[r * self.cols + col] != 0)
            else {
                continue;
            };
            self.swap_rows(pivot_row, found);

            let p = self.data[pivot_row * self.cols + col];
            let inv = field.inv(p);
            let cols = self.cols;
            row_scale(field, &mut self.data[pivot_row * cols..(pivot_row + 1) * cols], inv);

            for r in 0..self.rows {
                if r == pivot_row {
                    continue;
                }
                let factor = self.data[r * self.cols + col];
                if factor != 0 {
                    self.add_scaled_row(field, r, pivot_row, factor);
                }
            }
            pivot_row += 1;
        }
        pivot_row
    }

    /// Reduced row echelon form as a new matrix, with its rank.
    pub fn to_reduced_row_echelon_form(&self, field: &FiniteField) -> (Matrix, usize) {
        let mut m = self.clone();
        let rank = m.reduce_row_echelon(field);
        (m, rank)
    }

    /// Inverts a square matrix.
    pub fn inverse(&self, field: &FiniteField) -> RlncResult<Matrix> {
        if self.rows != self.cols {
            return Err(RlncError::LengthMismatch { expected: self.rows, actual: self.cols });
        }
        let n = self.rows;

        // [A | I] -> [I | A^-1]
        let mut aug = Matrix::new(n, 2 * n);
        for r in 0..n {
            aug.data[r * 2 * n..r * 2 * n + n].copy_from_slice(&self.data[r * n..(r + 1) * n]);
            aug.data[r * 2 * n + n + r] = 1;
        }

        let rank = aug.reduce_row_echelon(field);
        if rank < n || (0..n).any(|i| aug.data[i * 2 * n + i] != 1) {
            return Err(RlncError::SingularMatrix);
        }

        let mut inv = Matrix::new(n, n);
        for r in 0..n {
            inv.data[r * n..(r + 1) * n].copy_from_slice(&aug.data[r * 2 * n + n..(r + 1) * 2 * n]);
        }
        Ok(inv)
    }
}
