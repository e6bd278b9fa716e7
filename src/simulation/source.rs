//! Random sources for the trade loop

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform draws on `[0, 1)`
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Adapter over any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source - same seed, same draws
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed, non-empty list of draws, wrapping around at the end
#[derive(Debug, Clone)]
pub struct FixedDraws {
    draws: Vec<f64>,
    pos: usize,
}

impl FixedDraws {
    /// `None` for an empty list, which has nothing to replay
    pub fn new(draws: Vec<f64>) -> Option<Self> {
        if draws.is_empty() {
            return None;
        }
        Some(Self { draws, pos: 0 })
    }

    /// Every draw is `value`
    pub fn constant(value: f64) -> Self {
        Self {
            draws: vec![value],
            pos: 0,
        }
    }
}

impl UniformSource for FixedDraws {
    fn next_uniform(&mut self) -> f64 {
        let draw = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        draw
    }
}
