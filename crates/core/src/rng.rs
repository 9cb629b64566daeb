//! RNG module - explicit, seedable randomness for grid initialization
//!
//! Sessions never touch an ambient random source. Every draw goes through a
//! [`RandomSource`] owned by the session, so the same seed always produces the
//! same sequence of grids (useful for tests and reproducible bug reports).
//!
//! [`SimpleRng`] is the default source: a small LCG with Numerical Recipes
//! constants. LCG low bits have short periods, so the derived draws below
//! always consume the high bits.

/// Source of uniformly distributed 32-bit words.
///
/// Implementors only provide [`RandomSource::next_u32`]; the derived draws
/// used by the grid are provided methods.
pub trait RandomSource {
    /// Generate the next random u32
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, max)` (multiply-shift, uses the high bits)
    fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Fair coin flip (top bit)
    fn next_bool(&mut self) -> bool {
        self.next_u32() >> 31 == 1
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state (a new `SimpleRng` built from it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
