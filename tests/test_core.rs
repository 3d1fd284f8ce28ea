use mcsim::core::error::SimError;
use mcsim::core::spins::{Spin, SpinField};
use crate::common::{assert_close, rng, TOL};

mod common;

fn assert_unit(field: &SpinField) {
    for m in field.magnitudes() {
        assert_close(m, 1.0, TOL);
    }
}

#[test]
fn test_uniform_construction() {
    let field = SpinField::uniform(5, 3).unwrap();
    assert_eq!(field.dims(), (5, 3));
    assert_eq!(field.len(), 15);
    assert_unit(&field);
    assert_eq!(field.get(4, 2), Spin::new(0.0, 0.0, 1.0));
}

#[test]
fn test_non_unit_value_is_normalized() {
    let field = SpinField::new(&[3, 4], &[1.0, 2.0, -2.0]).unwrap();
    assert_unit(&field);
    let s = field.get(1, 1);
    assert_close(s.x, 1.0 / 3.0, TOL);
    assert_close(s.y, 2.0 / 3.0, TOL);
    assert_close(s.z, -2.0 / 3.0, TOL);
}

#[test]
fn test_near_unit_value_is_normalized() {
    let field = SpinField::new(&[2, 2], &[0.0, 0.0, 1.000001]).unwrap();
    assert_unit(&field);
    assert_close(field.get(0, 0).z, 1.0, TOL);

    let field = SpinField::new(&[3, 1], &[0.6, 0.0, 0.79999]).unwrap();
    assert_unit(&field);
}

#[test]
fn test_invalid_dimensions() {
    assert!(matches!(
        SpinField::new(&[3], &[0.0, 0.0, 1.0]),
        Err(SimError::InvalidDimensions(_))
    ));
    assert!(matches!(
        SpinField::new(&[3, 3, 3], &[0.0, 0.0, 1.0]),
        Err(SimError::InvalidDimensions(_))
    ));
    assert!(matches!(
        SpinField::new(&[0, 3], &[0.0, 0.0, 1.0]),
        Err(SimError::InvalidDimensions(_))
    ));
    assert!(matches!(
        SpinField::uniform(4, 0),
        Err(SimError::InvalidDimensions(_))
    ));
}

#[test]
fn test_invalid_value() {
    assert!(matches!(
        SpinField::new(&[2, 2], &[0.0, 1.0]),
        Err(SimError::InvalidValue(_))
    ));
    assert!(matches!(
        SpinField::new(&[2, 2], &[0.0, f64::NAN, 1.0]),
        Err(SimError::InvalidValue(_))
    ));
    assert!(matches!(
        SpinField::new(&[2, 2], &[f64::INFINITY, 0.0, 0.0]),
        Err(SimError::InvalidValue(_))
    ));
    assert!(matches!(
        SpinField::new(&[2, 2], &[0.0, 0.0, 0.0]),
        Err(SimError::InvalidValue(_))
    ));
}

#[test]
fn test_mean_of_uniform_field_is_exact() {
    let field = SpinField::uniform(7, 9).unwrap();
    let mean = field.mean();
    assert_eq!(mean.x, 0.0);
    assert_eq!(mean.y, 0.0);
    assert_eq!(mean.z, 1.0);
}

#[test]
fn test_mean_is_not_renormalized() {
    let mut field = SpinField::uniform(2, 1).unwrap();
    field.set(1, 0, Spin::new(1.0, 0.0, 0.0));
    let mean = field.mean();
    assert_close(mean.x, 0.5, TOL);
    assert_close(mean.z, 0.5, TOL);
    assert_close(mean.norm(), 0.5f64.sqrt(), TOL);
}

#[test]
fn test_set_stores_unit_spin() {
    let mut field = SpinField::uniform(2, 2).unwrap();
    field.set(0, 1, Spin::new(3.0, 4.0, 0.0));
    field.set(1, 1, Spin::new(0.0, 0.0, -0.25));
    assert_unit(&field);
    let s = field.get(0, 1);
    assert_close(s.x, 0.6, TOL);
    assert_close(s.y, 0.8, TOL);
    assert_close(field.get(1, 1).z, -1.0, TOL);
}

#[test]
fn test_normalize_keeps_unit_field_unchanged() {
    let mut field = SpinField::uniform(3, 3).unwrap();
    field.randomize(&mut rng(12));
    let once = field.clone();
    field.normalize();
    for (a, b) in once.spins().iter().zip(field.spins()) {
        assert!((a - b).norm() < TOL);
    }
}

#[test]
fn test_randomize_yields_unit_spins() {
    for &(nx, ny) in &[(1, 1), (1, 17), (8, 8), (31, 5)] {
        let mut field = SpinField::uniform(nx, ny).unwrap();
        field.randomize(&mut rng(nx as u64 * 100 + ny as u64));
        assert_unit(&field);
    }
}

#[test]
fn test_randomize_is_seed_reproducible() {
    let mut a = SpinField::uniform(6, 6).unwrap();
    let mut b = SpinField::uniform(6, 6).unwrap();
    a.randomize(&mut rng(42));
    b.randomize(&mut rng(42));
    assert_eq!(a, b);

    let mut c = SpinField::uniform(6, 6).unwrap();
    c.randomize(&mut rng(43));
    assert_ne!(a, c);
}

#[test]
fn test_randomize_covers_all_directions() {
    let mut field = SpinField::uniform(40, 40).unwrap();
    field.randomize(&mut rng(5));
    let mean = field.mean();
    // Mean of a symmetric distribution over 1600 sites.
    assert!(mean.norm() < 0.1, "mean {:?}", mean);
    assert!(field.spins().iter().any(|s| s.z < -0.5));
    assert!(field.spins().iter().any(|s| s.x > 0.5));
}
