//! Capabilities a random number stream offers to its consumers.
//!
//! Variate generators usually need only [`UniformSource`]; replication control needs
//! [`StreamControl`] and [`AntitheticControl`]. [`RandomStream`] bundles everything.

use super::StreamError;

/// Source of uniform random numbers.
pub trait UniformSource {
    /// Returns the next uniform value in [0, 1).
    fn rand_u01(&mut self) -> f64;

    /// Returns the value most recently returned by `rand_u01`.
    fn previous_u(&self) -> f64;

    /// Returns 1 - `previous_u()`.
    #[inline]
    fn antithetic_value(&self) -> f64 {
        1.0 - self.previous_u()
    }

    /// Returns a uniform integer in [lo, hi].
    fn rand_int(&mut self, lo: i64, hi: i64) -> Result<i64, StreamError> {
        if lo > hi {
            return Err(StreamError::InvalidRange { lo, hi });
        }
        let width = (hi as i128 - lo as i128 + 1) as f64;
        let offset = (self.rand_u01() * width) as i128;
        // Rounding in very wide ranges could land on hi + 1.
        Ok((lo as i128 + offset).min(hi as i128) as i64)
    }
}

/// Repositioning within the stream hierarchy.
pub trait StreamControl {
    /// Moves to the start of the stream, which is also the start of its first substream.
    fn reset_start_stream(&mut self);

    /// Moves to the start of the active substream.
    fn reset_start_substream(&mut self);

    /// Moves to the start of the next substream.
    fn advance_to_next_substream(&mut self);
}

/// Antithetic option: when on, every value u is returned as 1 - u.
pub trait AntitheticControl {
    fn set_antithetic_option(&mut self, flag: bool);

    fn antithetic_option(&self) -> bool;
}

/// Identity of a stream.
pub trait StreamIdentity {
    /// Index of the stream in minting order.
    fn id(&self) -> u64;

    fn name(&self) -> &str;
}

/// Forking streams at their current position.
pub trait NewInstance: Sized {
    /// Returns an independent copy positioned identically to `self`.
    fn new_instance(&self, name: Option<&str>) -> Self;

    /// Returns a copy with the antithetic option inverted.
    /// When `self` is not antithetic, the copy returns exactly 1 - u for each u `self` returns.
    /// When `self` is antithetic, the copy returns the canonical values; `self` returns their
    /// rounded complements, so the law holds only up to rounding.
    fn new_antithetic_instance(&self, name: Option<&str>) -> Self;
}

/// Everything a stream can do.
pub trait RandomStream: UniformSource + StreamControl + AntitheticControl + StreamIdentity {}

impl<T: UniformSource + StreamControl + AntitheticControl + StreamIdentity> RandomStream for T {}
