//! Jittered sampling for anti-aliasing.
//!
//! The unit square is split into a `side x side` grid and one uniformly
//! random point is drawn inside every cell. Several independent sets are
//! generated up front; the pool is read-only afterwards, so one sampler can be
//! shared by every render thread. Per-thread iteration state lives in
//! [`SampleCursor`].

use crate::error::{RenderError, RenderResult};
use poly_math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A pool of stratified, jittered sample sets over [0, 1)².
#[derive(Debug, Clone)]
pub struct JitteredSampler {
    samples_per_pixel: u32,
    sets: u32,
    side: u32,
    /// Set-major: set `s` occupies `pool[s * samples_per_pixel..][..samples_per_pixel]`.
    pool: Vec<Vec2>,
}

impl JitteredSampler {
    /// Generate `sets` sets of `samples_per_pixel` points using `rng`.
    ///
    /// `samples_per_pixel` must be a non-zero perfect square.
    pub fn new(samples_per_pixel: u32, sets: u32, rng: &mut dyn RngCore) -> RenderResult<Self> {
        let side = perfect_square_side(samples_per_pixel)
            .ok_or(RenderError::InvalidSampleCount(samples_per_pixel))?;
        if sets == 0 {
            return Err(RenderError::NoSampleSets);
        }

        let inv_side = 1.0 / side as f32;
        let mut pool = Vec::with_capacity(samples_per_pixel as usize * sets as usize);
        for _ in 0..sets {
            for row in 0..side {
                for col in 0..side {
                    let x = jitter(col, inv_side, rng);
                    let y = jitter(row, inv_side, rng);
                    pool.push(Vec2::new(x, y));
                }
            }
        }

        Ok(Self {
            samples_per_pixel,
            sets,
            side,
            pool,
        })
    }

    /// Generate a sampler from a fixed seed, for reproducible renders.
    pub fn from_seed(samples_per_pixel: u32, sets: u32, seed: u64) -> RenderResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(samples_per_pixel, sets, &mut rng)
    }

    /// Generate a sampler seeded from OS entropy.
    pub fn from_entropy(samples_per_pixel: u32, sets: u32) -> RenderResult<Self> {
        let mut rng = StdRng::from_entropy();
        Self::new(samples_per_pixel, sets, &mut rng)
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    pub fn sets(&self) -> u32 {
        self.sets
    }

    /// Number of strata along each axis.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// All points of one set, in cell order (row-major over the grid).
    pub fn set(&self, index: u32) -> &[Vec2] {
        let n = self.samples_per_pixel as usize;
        let start = (index % self.sets) as usize * n;
        &self.pool[start..start + n]
    }

    /// Start iterating samples at a set chosen by hashing `key`.
    ///
    /// The same key always yields the same sequence, whichever thread asks.
    pub fn cursor(&self, key: u64) -> SampleCursor<'_> {
        let set = (splitmix64(key) % u64::from(self.sets)) as u32;
        SampleCursor {
            sampler: self,
            set,
            index: 0,
        }
    }
}

/// Per-thread read position into a [`JitteredSampler`].
///
/// Yields one sample per call; after the current set is exhausted it wraps
/// to the next set, round-robin.
#[derive(Debug, Clone)]
pub struct SampleCursor<'s> {
    sampler: &'s JitteredSampler,
    set: u32,
    index: u32,
}

impl SampleCursor<'_> {
    /// Fetch the next sample point.
    pub fn next_sample(&mut self) -> Vec2 {
        if self.index == self.sampler.samples_per_pixel {
            self.index = 0;
            self.set = (self.set + 1) % self.sampler.sets;
        }
        let sample = self.sampler.set(self.set)[self.index as usize];
        self.index += 1;
        sample
    }
}

impl Iterator for SampleCursor<'_> {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        Some(self.next_sample())
    }
}

/// Side length of the stratification grid, if `n` is a non-zero perfect square.
fn perfect_square_side(n: u32) -> Option<u32> {
    if n == 0 {
        return None;
    }
    let side = f64::from(n).sqrt().round() as u32;
    (u64::from(side) * u64::from(side) == u64::from(n)).then_some(side)
}

/// A random coordinate inside stratum `cell`, kept strictly below the next stratum.
fn jitter(cell: u32, inv_side: f32, rng: &mut dyn RngCore) -> f32 {
    let lo = cell as f32 * inv_side;
    let hi = (cell + 1) as f32 * inv_side;
    let below_hi = f32::from_bits(hi.to_bits() - 1);
    (lo + rng.gen::<f32>() * inv_side).clamp(lo, below_hi)
}

fn splitmix64(key: u64) -> u64 {
    let mut z = key.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
