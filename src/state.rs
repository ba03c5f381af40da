#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::modmath::{mat_vec_mod_m, Matrix};
use super::{SeedError, A12, A13N, A21, A23N, DEFAULT_SEED, M1, M2, NORM};

/// The six components of the combined generator.
/// Components 0..3 are in [0, M1) and not all zero,
/// components 3..6 are in [0, M2) and not all zero.
/// Values are exact integers held in f64 so the recurrence runs without conversions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[u64; 6]", into = "[u64; 6]"))]
#[derive(Clone, Copy, PartialEq)]
pub struct GeneratorState {
    s: [f64; 6],
}

impl core::fmt::Debug for GeneratorState {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_tuple("GeneratorState").field(&self.components()).finish()
    }
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Checks bounds and non-degeneracy of a seed.
pub fn validate_seed(seed: &[u64]) -> Result<(), SeedError> {
    if seed.len() != 6 {
        return Err(SeedError::WrongLength(seed.len()));
    }
    for (index, &value) in seed.iter().enumerate() {
        let modulus = if index < 3 { M1 as u64 } else { M2 as u64 };
        if value >= modulus {
            return Err(SeedError::OutOfRange { index, value, modulus });
        }
    }
    if seed[0 .. 3].iter().all(|&x| x == 0) {
        return Err(SeedError::AllZero { group: 1 });
    }
    if seed[3 .. 6].iter().all(|&x| x == 0) {
        return Err(SeedError::AllZero { group: 2 });
    }
    Ok(())
}

impl GeneratorState {

    pub const DEFAULT: GeneratorState = GeneratorState { s: [DEFAULT_SEED[0] as f64; 6] };

    /// Creates a state from six components, validating them.
    pub fn new(seed: [u64; 6]) -> Result<Self, SeedError> {
        Self::from_slice(&seed)
    }

    /// Creates a state from a slice, which must hold exactly six valid components.
    pub fn from_slice(seed: &[u64]) -> Result<Self, SeedError> {
        validate_seed(seed)?;
        let mut s = [0.0; 6];
        for (x, &value) in s.iter_mut().zip(seed.iter()) {
            *x = value as f64;
        }
        Ok(GeneratorState { s })
    }

    /// Returns the six components.
    pub fn components(&self) -> [u64; 6] {
        self.s.map(|x| x as u64)
    }

    /// Advances the recurrence one step and returns the combined output in (0, 1).
    #[inline]
    pub(crate) fn step(&mut self) -> f64 {
        let s = &mut self.s;

        // Component A.
        let mut p1 = A12 * s[1] - A13N * s[0];
        p1 -= (p1 / M1).trunc() * M1;
        if p1 < 0.0 {
            p1 += M1;
        }
        s[0] = s[1];
        s[1] = s[2];
        s[2] = p1;

        // Component B.
        let mut p2 = A21 * s[5] - A23N * s[3];
        p2 -= (p2 / M2).trunc() * M2;
        if p2 < 0.0 {
            p2 += M2;
        }
        s[3] = s[4];
        s[4] = s[5];
        s[5] = p2;

        if p1 > p2 {
            (p1 - p2) * NORM
        } else {
            (p1 - p2 + M1) * NORM
        }
    }

    /// Returns the state with `a1` applied to component A and `a2` to component B.
    pub(crate) fn transform(&self, a1: &Matrix, a2: &Matrix) -> Self {
        let a = mat_vec_mod_m(a1, &[self.s[0], self.s[1], self.s[2]], M1);
        let b = mat_vec_mod_m(a2, &[self.s[3], self.s[4], self.s[5]], M2);
        GeneratorState { s: [a[0], a[1], a[2], b[0], b[1], b[2]] }
    }
}

impl TryFrom<[u64; 6]> for GeneratorState {
    type Error = SeedError;

    fn try_from(seed: [u64; 6]) -> Result<Self, SeedError> {
        Self::new(seed)
    }
}

impl TryFrom<&[u64]> for GeneratorState {
    type Error = SeedError;

    fn try_from(seed: &[u64]) -> Result<Self, SeedError> {
        Self::from_slice(seed)
    }
}

impl From<GeneratorState> for [u64; 6] {
    fn from(state: GeneratorState) -> Self {
        state.components()
    }
}

/// Position of a stream: where the stream starts (Ig), where the active substream
/// starts (Bg), and the current state (Cg).
/// `current` is reachable from `substream_start` by draws, and `substream_start`
/// from `initial` by substream jumps.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamState {
    initial: GeneratorState,
    substream_start: GeneratorState,
    current: GeneratorState,
}

impl StreamState {

    /// All three levels start at `seed`.
    pub fn new(seed: GeneratorState) -> Self {
        StreamState { initial: seed, substream_start: seed, current: seed }
    }

    /// Start of the stream.
    #[inline]
    pub fn initial(&self) -> &GeneratorState {
        &self.initial
    }

    /// Start of the active substream.
    #[inline]
    pub fn substream_start(&self) -> &GeneratorState {
        &self.substream_start
    }

    /// Current state.
    #[inline]
    pub fn current(&self) -> &GeneratorState {
        &self.current
    }

    #[inline]
    pub(crate) fn current_mut(&mut self) -> &mut GeneratorState {
        &mut self.current
    }

    pub(crate) fn reset_start_stream(&mut self) {
        self.substream_start = self.initial;
        self.reset_start_substream();
    }

    pub(crate) fn reset_start_substream(&mut self) {
        self.current = self.substream_start;
    }

    pub(crate) fn advance_substream(&mut self, a1: &Matrix, a2: &Matrix) {
        self.substream_start = self.substream_start.transform(a1, a2);
        self.reset_start_substream();
    }
}
