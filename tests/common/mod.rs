#![allow(dead_code)]

use std::collections::VecDeque;

use mcsim::core::domain::Interactions;
use mcsim::core::spins::{Spin, SpinField};
use nalgebra::Vector3;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const TOL: f64 = 1e-9;

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Replays a fixed list of `u64` outputs and panics once it runs dry.
///
/// With rand 0.8, `gen::<f64>()` maps `1 << 63` to 0.5 and `3 << 62` to 0.75,
/// and `gen_range(0..2)` maps `0` to 0 and `1 << 63` to 1.
pub struct ScriptedRng {
    values: VecDeque<u64>,
}

impl ScriptedRng {
    pub fn new(values: &[u64]) -> Self {
        Self { values: values.iter().copied().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.values.pop_front().expect("scripted rng exhausted")
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Interactions with every term switched off.
pub fn no_interactions() -> Interactions {
    Interactions {
        b: Vector3::zeros(),
        k: 0.0,
        u: Vector3::new(0.0, 0.0, 1.0),
        j: 0.0,
        d: 0.0,
    }
}

/// A skyrmion-favouring parameter set.
pub fn skyrmion_interactions() -> Interactions {
    Interactions {
        b: Vector3::new(0.0, 0.0, 0.2),
        k: 0.1,
        u: Vector3::new(0.0, 0.0, 1.0),
        j: 1.0,
        d: 0.8,
    }
}

/// Lattice with explicit (already unit) spins, listed row-major in `i`.
pub fn field_from(nx: usize, ny: usize, spins: &[[f64; 3]]) -> SpinField {
    assert_eq!(spins.len(), nx * ny);
    let mut field = SpinField::uniform(nx, ny).unwrap();
    for (idx, s) in spins.iter().enumerate() {
        let (i, j) = field.geometry().coords(idx);
        field.set(i, j, Spin::new(s[0], s[1], s[2]).normalize());
    }
    field
}

pub fn random_field(nx: usize, ny: usize, seed: u64) -> SpinField {
    let mut field = SpinField::uniform(nx, ny).unwrap();
    field.randomize(&mut rng(seed));
    field
}

pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {} within {}, got {}",
        expected,
        tol,
        actual
    );
}
