use crate::{Element, FiniteField};

/// Row kernel: `dest[i] += factor * src[i]`.
/// Subtraction is the same operation in characteristic 2, so elimination
/// steps go through here as well.
#[inline]
pub fn row_add_scaled(field: &FiniteField, dest: &mut [Element], src: &[Element], factor: Element) {
    if factor == 0 || dest.is_empty() {
        return;
    }

    if factor == 1 {
        for (d, s) in dest.iter_mut().zip(src) {
            *d ^= *s;
        }
        return;
    }

    // Fast path: one table row lookup per coordinate.
    match field.mul_row(factor) {
        Some(row) => {
            for (d, s) in dest.iter_mut().zip(src) {
                *d ^= row[*s as usize];
            }
        }
        None => {
            for (d, s) in dest.iter_mut().zip(src) {
                *d ^= field.mul(*s, factor);
            }
        }
    }
}

/// Row kernel: `row[i] *= factor`.
#[inline]
pub fn row_scale(field: &FiniteField, row: &mut [Element], factor: Element) {
    if factor == 1 {
        return;
    }
    if factor == 0 {
        row.fill(0);
        return;
    }
    match field.mul_row(factor) {
        Some(table) => {
            for x in row.iter_mut() {
                *x = table[*x as usize];
            }
        }
        None => {
            for x in row.iter_mut() {
                *x = field.mul(*x, factor);
            }
        }
    }
}
