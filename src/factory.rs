use tracing::debug;

use super::jump::{A1P127, A2P127};
use super::modmath::mat_pow_mod_m;
use super::{GeneratorState, Stream, StreamError, StreamIdentity, M1, M2};

/// Mints streams that occupy disjoint segments of 2^127 steps.
///
/// The factory holds the seed of the next stream. Create one per process (or one per
/// worker after reserving ranges with [`advance_seeds`](StreamFactory::advance_seeds))
/// and pass it by `&mut` wherever streams are created.
///
/// ```
/// use rand_mrg::*;
///
/// let mut factory = StreamFactory::new();
/// let a = factory.next_stream();
/// let b = factory.next_stream();
/// assert_eq!(a.id() + 1, b.id());
/// assert_ne!(a.state().initial(), b.state().initial());
/// ```
#[derive(Debug)]
pub struct StreamFactory {
    /// Seed of the next stream.
    next_seed: GeneratorState,
    /// Number of streams minted so far, also the id of the next one.
    minted: u64,
}

impl Default for StreamFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamFactory {

    /// Creates a factory with the default seed.
    pub fn new() -> Self {
        StreamFactory { next_seed: GeneratorState::DEFAULT, minted: 0 }
    }

    /// Creates a factory whose first stream starts at `seed`.
    pub fn with_seed(seed: &[u64]) -> Result<Self, StreamError> {
        let mut factory = Self::new();
        factory.set_seed(seed)?;
        Ok(factory)
    }

    /// Sets the seed of the next stream. Fails if the seed is malformed,
    /// in which case the factory is unchanged.
    pub fn set_seed(&mut self, seed: &[u64]) -> Result<(), StreamError> {
        self.next_seed = GeneratorState::from_slice(seed)?;
        debug!(seed = ?self.next_seed, "factory seed set");
        Ok(())
    }

    /// Returns the seed of the next stream.
    pub fn seed(&self) -> [u64; 6] {
        self.next_seed.components()
    }

    /// Restores the default seed. The stream counter is not reset.
    pub fn reset_seed(&mut self) {
        self.next_seed = GeneratorState::DEFAULT;
        debug!("factory seed reset to default");
    }

    /// Skips the next `n` streams without creating them.
    pub fn advance_seeds(&mut self, n: u64) {
        if n == 0 {
            return;
        }
        let j1 = mat_pow_mod_m(&A1P127, M1, n);
        let j2 = mat_pow_mod_m(&A2P127, M2, n);
        self.next_seed = self.next_seed.transform(&j1, &j2);
        debug!(n, seed = ?self.next_seed, "factory seeds advanced");
    }

    /// Number of streams minted by this factory.
    #[inline]
    pub fn streams_minted(&self) -> u64 {
        self.minted
    }

    /// Mints the next stream, named `stream-<id>`.
    pub fn next_stream(&mut self) -> Stream {
        let name = format!("stream-{}", self.minted);
        self.next_stream_named(name)
    }

    /// Mints the next stream with the given name.
    pub fn next_stream_named(&mut self, name: impl Into<String>) -> Stream {
        let stream = Stream::new(self.minted, name, self.next_seed);
        debug!(id = self.minted, name = %stream.name(), seed = ?self.next_seed, "stream minted");
        self.minted += 1;
        self.next_seed = self.next_seed.transform(&A1P127, &A2P127);
        stream
    }
}
