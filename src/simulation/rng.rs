use glam::Vec3;
use rand::{RngCore, SeedableRng};
use std::f64::consts::TAU;

const WEYL_INCREMENT: u32 = 0x6D2B_79F5;
const UNIT_SCALE: f64 = 4_294_967_296.0; // 2^32

/// Mulberry32: a 32-bit counter with a mixing step.
///
/// Reproduces the same stream on every platform, which keeps the seeded
/// orbit and embedded-electron layouts identical between runs for the same
/// element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seeds from an atomic number, treating 0 as 1.
    pub fn for_atomic_number(atomic_number: u8) -> Self {
        Self::new(u32::from(atomic_number.max(1)))
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / UNIT_SCALE
    }

    /// Direction uniformly distributed on the unit sphere.
    pub fn unit_vector(&mut self) -> Vec3 {
        let u = self.next_unit();
        let v = self.next_unit();
        let theta = u * TAU;
        let phi = (2.0 * v - 1.0).acos();
        let sin_phi = phi.sin();
        Vec3::new(
            (sin_phi * theta.cos()) as f32,
            phi.cos() as f32,
            (sin_phi * theta.sin()) as f32,
        )
    }

    /// Point uniformly distributed inside a ball of `radius`.
    pub fn point_in_ball(&mut self, radius: f32) -> Vec3 {
        let direction = self.unit_vector();
        let r = self.next_unit().cbrt() as f32 * radius;
        direction * r
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(WEYL_INCREMENT);
        let mut z = self.state;
        z = (z ^ (z >> 15)).wrapping_mul(z | 1);
        z ^= z.wrapping_add((z ^ (z >> 7)).wrapping_mul(z | 61));
        z ^ (z >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}
