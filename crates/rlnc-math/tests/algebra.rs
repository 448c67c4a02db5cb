use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};
use rlnc_core::RlncError;
use rlnc_math::FiniteField;

#[test]
fn test_dense_table_invariants() {
    for m in 1..=8u8 {
        let ff = FiniteField::new(m).unwrap();
        let q = ff.cardinality() as u16;
        assert_eq!(q as usize, 1 << m);

        for a in 0..q {
            assert_eq!(ff.mul(a, 0), 0);
            assert_eq!(ff.mul(a, 1), a);
            assert_eq!(ff.add(a, a), 0);
            for b in 0..q {
                assert_eq!(ff.mul(a, b), ff.mul(b, a), "mul not symmetric in GF(2^{})", m);
                if b != 0 {
                    assert_eq!(ff.div(ff.mul(a, b), b), a);
                }
            }
        }
    }
}

#[test]
fn test_known_gf256_products() {
    let ff = FiniteField::gf256();
    // x * x^7 = x^8 = x^4 + x^3 + x^2 + 1 under 0x11D
    assert_eq!(ff.mul(0x02, 0x80), 0x1D);
    assert_eq!(ff.mul(ff.inv(0x53), 0x53), 1);
}

#[test]
fn test_generator_validity() {
    // x (= 2) spans the multiplicative group when the polynomial is primitive.
    let ff = FiniteField::gf256();
    let mut x = 1u16;
    for k in 1..=255 {
        x = ff.mul(x, 2);
        if k < 255 {
            assert_ne!(x, 1, "2 has order {} < 255", k);
        }
    }
    assert_eq!(x, 1, "Generator 2 does not span the group");
}

#[test]
fn test_log_tables_for_wide_fields() {
    let mut rng = ChaCha8Rng::seed_from_u64(16);
    for m in [9u8, 12, 16] {
        let ff = FiniteField::new(m).unwrap();
        let mask = (ff.cardinality() - 1) as u32;
        assert!(ff.mul_row(3).is_none());

        for _ in 0..2000 {
            let a = (rng.next_u32() & mask) as u16;
            let b = (rng.next_u32() & mask) as u16;
            let c = (rng.next_u32() & mask) as u16;
            assert_eq!(ff.mul(a, b), ff.mul(b, a));
            // distributive over XOR
            assert_eq!(ff.mul(a, ff.add(b, c)), ff.add(ff.mul(a, b), ff.mul(a, c)));
            if b != 0 {
                assert_eq!(ff.div(ff.mul(a, b), b), a);
                assert_eq!(ff.mul(b, ff.inv(b)), 1);
            }
        }
    }
}

#[test]
fn test_unsupported_exponents() {
    assert_eq!(FiniteField::new(0).unwrap_err(), RlncError::UnsupportedField { exponent: 0 });
    assert_eq!(FiniteField::new(17).unwrap_err(), RlncError::UnsupportedField { exponent: 17 });
}

#[test]
fn test_division_by_zero_is_zero() {
    let ff = FiniteField::gf256();
    assert_eq!(ff.div(7, 0), 0);
    assert_eq!(ff.inv(0), 0);
    let wide = FiniteField::new(10).unwrap();
    assert_eq!(wide.div(7, 0), 0);
}

#[test]
fn test_gf256_byte_packing() {
    let ff = FiniteField::gf256();
    let bytes = [0x00, 0x7F, 0x80, 0xFF];
    let v = ff.bytes_to_vector(&bytes).unwrap();
    assert_eq!(v.as_slice(), &[0x00, 0x7F, 0x80, 0xFF]);
    assert_eq!(ff.vector_to_bytes(&v).unwrap(), bytes);
    assert_eq!(ff.coordinates_for_bytes(10).unwrap(), 10);
    assert_eq!(ff.bytes_for_coordinates(10).unwrap(), 10);
}

#[test]
fn test_gf16_nibble_layout() {
    let ff = FiniteField::gf16();
    let v = ff.bytes_to_vector(&[0xAB, 0x10]).unwrap();
    // low nibble first
    assert_eq!(v.as_slice(), &[0xB, 0xA, 0x0, 0x1]);
    assert_eq!(v.to_bytes().unwrap(), vec![0xAB, 0x10]);

    assert_eq!(ff.coordinates_for_bytes(3).unwrap(), 6);
    assert_eq!(ff.bytes_for_coordinates(5).unwrap(), 3);
}

#[test]
fn test_packing_rejected_for_other_fields() {
    let ff = FiniteField::new(3).unwrap();
    assert!(!ff.supports_bytes());
    let err = RlncError::UnsupportedPacking { cardinality: 8 };
    assert_eq!(ff.coordinates_for_bytes(4).unwrap_err(), err);
    assert_eq!(ff.bytes_to_vector(&[1, 2]).unwrap_err(), err);
}

#[test]
fn test_field_identity_by_exponent() {
    let a = FiniteField::gf256();
    let b = FiniteField::new(8).unwrap();
    assert_eq!(*a, *b);
    assert_ne!(*a, *FiniteField::gf16());
    assert_eq!(a.element(255).unwrap(), 255);
    assert_eq!(
        a.element(256).unwrap_err(),
        RlncError::ElementOutOfRange { value: 256, cardinality: 256 }
    );
}
