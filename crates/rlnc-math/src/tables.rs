use alloc::vec::Vec;

use crate::Element;

/// Primitive polynomials for GF(2^m), indexed by m - 1.
/// 285 (0x11D) is the GF(2^8) polynomial used on the byte wire path.
pub const PRIMITIVE_POLYNOMIALS: [u32; 16] = [
    3, 7, 11, 19, 37, 67, 137, 285, 529, 1033, 2053, 4179, 8219, 17475, 32771, 69643,
];

/// Largest exponent for which full q x q mul/div tables are kept.
/// Above this the tables would need up to 2^32 entries.
pub const DENSE_MAX_EXPONENT: u8 = 8;

/// Russian-peasant multiplication in GF(2^m) modulo `poly`.
pub const fn peasant_mul(a: u32, b: u32, exponent: u8, poly: u32) -> u32 {
    let q = 1u32 << exponent;
    let reduce = poly ^ q;
    let high_bit = 1u32 << (exponent - 1);

    let mut a = a;
    let mut b = b;
    let mut p = 0u32;
    let mut k = 0;
    while k < exponent {
        if b & 1 != 0 {
            p ^= a;
        }
        let carry = (a & high_bit) != 0;
        a = (a << 1) & (q - 1);
        if carry {
            a ^= reduce;
        }
        b >>= 1;
        k += 1;
    }
    p
}

/// Precomputed multiplication data for one field.
pub(crate) enum Tables {
    /// `mul[a * q + b]`, `div[a * q + b]`.
    Dense { mul: Vec<Element>, div: Vec<Element> },
    /// `exp` is doubled to avoid a modulo in `mul`/`div`.
    Log { log: Vec<Element>, exp: Vec<Element> },
}

impl Tables {
    pub(crate) fn dense(exponent: u8, poly: u32) -> Self {
        let q = 1usize << exponent;
        let mut mul = alloc::vec![0 as Element; q * q];
        let mut div = alloc::vec![0 as Element; q * q];

        for a in 0..q {
            for b in 0..q {
                mul[a * q + b] = peasant_mul(a as u32, b as u32, exponent, poly) as Element;
            }
        }

        // div[mul(a, b), a] = b and div[mul(a, b), b] = a
        for a in 0..q {
            for b in 0..q {
                let p = mul[a * q + b] as usize;
                div[p * q + a] = b as Element;
                div[p * q + b] = a as Element;
            }
        }
        // Division by zero is pinned to 0.
        for a in 0..q {
            div[a * q] = 0;
        }

        Tables::Dense { mul, div }
    }

    pub(crate) fn logarithmic(exponent: u8, poly: u32) -> Self {
        let q = 1usize << exponent;
        let order = q - 1;
        let mut log = alloc::vec![0 as Element; q];
        let mut exp = alloc::vec![0 as Element; 2 * order];

        // x is a generator because the polynomial is primitive.
        let mut x = 1u32;
        for i in 0..order {
            exp[i] = x as Element;
            exp[i + order] = x as Element;
            log[x as usize] = i as Element;
            x = peasant_mul(x, 2, exponent, poly);
        }

        Tables::Log { log, exp }
    }
}
