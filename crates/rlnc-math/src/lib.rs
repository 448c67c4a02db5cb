#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod tables;
pub mod field;
pub mod scalar;
pub mod vector;
pub mod matrix;

pub use field::{Element, FiniteField};
pub use matrix::Matrix;
pub use scalar::{row_add_scaled, row_scale};
pub use vector::Vector;
