#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};
use tracing::trace;

use super::jump::{A1P0, A1P76, A2P0, A2P76, INV_A1, INV_A2};
use super::modmath::{mat_mat_mod_m, mat_pow_mod_m, mat_two_pow_mod_m, IDENTITY};
use super::{
    AntitheticControl, GeneratorState, NewInstance, StreamControl, StreamError, StreamIdentity,
    StreamState, UniformSource, FACT, M1, M2, MAX_JUMP_EXPONENT,
};

/// MRG32k3a random number stream.
///
/// Streams are minted by a [`StreamFactory`](crate::StreamFactory), which places each one
/// 2^127 steps after the previous. A stream is split into substreams of 2^76 steps.
///
/// Antithetic streams return 1 - u for every value u of the canonical sequence.
/// The state always follows the canonical sequence and [`previous_u`](UniformSource::previous_u)
/// holds the value actually returned, so on an antithetic stream
/// [`antithetic_value`](UniformSource::antithetic_value) yields the canonical value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq)]
pub struct Stream {
    /// Index in minting order.
    id: u64,
    name: String,
    position: StreamState,
    antithetic: bool,
    /// Draw two steps per value for 53 bits of resolution.
    increased_precision: bool,
    /// Last value returned.
    previous_u: f64,
}

// As with other generators, Debug does not expose internal state.
impl core::fmt::Debug for Stream {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Stream {{ id: {}, name: {:?} }}", self.id, self.name)
    }
}

impl Stream {

    /// Creates a stream positioned at `seed`.
    /// Streams created this way are not guaranteed to be disjoint from others;
    /// use a [`StreamFactory`](crate::StreamFactory) for that.
    pub fn new(id: u64, name: impl Into<String>, seed: GeneratorState) -> Self {
        Stream {
            id,
            name: name.into(),
            position: StreamState::new(seed),
            antithetic: false,
            increased_precision: false,
            previous_u: 0.0,
        }
    }

    /// Sets the start of the stream and moves there.
    /// The seed is validated the same way as factory seeds.
    pub fn set_seed(&mut self, seed: &[u64]) -> Result<(), StreamError> {
        let seed = GeneratorState::from_slice(seed)?;
        trace!(id = self.id, name = %self.name, ?seed, "stream seed set");
        self.position = StreamState::new(seed);
        Ok(())
    }

    /// Returns a copy of the three position levels.
    #[inline]
    pub fn state(&self) -> StreamState {
        self.position
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn increased_precision(&self) -> bool {
        self.increased_precision
    }

    /// When on, each value combines two steps of the recurrence.
    pub fn set_increased_precision(&mut self, flag: bool) {
        self.increased_precision = flag;
    }

    /// Moves the current state by 2^e + c steps if e > 0, by -2^-e + c steps if e < 0,
    /// or by c steps if e = 0. Negative step counts go backward.
    /// Substream and stream starts are unchanged.
    /// Fails with `InvalidJump` if |e| exceeds [`MAX_JUMP_EXPONENT`], leaving the state as is.
    pub fn advance_state(&mut self, e: i32, c: i64) -> Result<(), StreamError> {
        if e.unsigned_abs() > MAX_JUMP_EXPONENT {
            return Err(StreamError::InvalidJump { e, max: MAX_JUMP_EXPONENT });
        }

        let (c1, c2) = if c >= 0 {
            (mat_pow_mod_m(&A1P0, M1, c as u64), mat_pow_mod_m(&A2P0, M2, c as u64))
        } else {
            (mat_pow_mod_m(&INV_A1, M1, c.unsigned_abs()), mat_pow_mod_m(&INV_A2, M2, c.unsigned_abs()))
        };

        let (b1, b2) = if e > 0 {
            (mat_two_pow_mod_m(&A1P0, M1, e as u32), mat_two_pow_mod_m(&A2P0, M2, e as u32))
        } else if e < 0 {
            (mat_two_pow_mod_m(&INV_A1, M1, e.unsigned_abs()), mat_two_pow_mod_m(&INV_A2, M2, e.unsigned_abs()))
        } else {
            (IDENTITY, IDENTITY)
        };

        let j1 = mat_mat_mod_m(&b1, &c1, M1);
        let j2 = mat_mat_mod_m(&b2, &c2, M2);

        trace!(id = self.id, e, c, "stream state advanced");
        let current = self.position.current().transform(&j1, &j2);
        *self.position.current_mut() = current;
        Ok(())
    }

    /// Next canonical value, two steps combined when increased precision is on.
    #[inline]
    fn next_canonical(&mut self) -> f64 {
        let current = self.position.current_mut();
        let u = current.step();
        if !self.increased_precision {
            return u;
        }
        let u = u + current.step() * FACT;
        if u < 1.0 {
            u
        } else {
            u - 1.0
        }
    }
}

impl UniformSource for Stream {

    fn rand_u01(&mut self) -> f64 {
        let u = self.next_canonical();
        let u = if self.antithetic {
            // Rounds up to 1 only for u below 2^-53, which needs increased precision.
            let v = 1.0 - u;
            if v < 1.0 {
                v
            } else {
                v - 1.0
            }
        } else {
            u
        };
        self.previous_u = u;
        u
    }

    #[inline]
    fn previous_u(&self) -> f64 {
        self.previous_u
    }
}

impl StreamControl for Stream {

    fn reset_start_stream(&mut self) {
        self.position.reset_start_stream();
    }

    fn reset_start_substream(&mut self) {
        self.position.reset_start_substream();
    }

    fn advance_to_next_substream(&mut self) {
        self.position.advance_substream(&A1P76, &A2P76);
        trace!(id = self.id, name = %self.name, start = ?self.position.substream_start(), "advanced to next substream");
    }
}

impl AntitheticControl for Stream {

    fn set_antithetic_option(&mut self, flag: bool) {
        self.antithetic = flag;
    }

    #[inline]
    fn antithetic_option(&self) -> bool {
        self.antithetic
    }
}

impl StreamIdentity for Stream {

    #[inline]
    fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    fn name(&self) -> &str {
        &self.name
    }
}

impl NewInstance for Stream {

    fn new_instance(&self, name: Option<&str>) -> Self {
        let mut stream = self.clone();
        if let Some(name) = name {
            stream.name = name.to_string();
        }
        stream
    }

    fn new_antithetic_instance(&self, name: Option<&str>) -> Self {
        let mut stream = self.new_instance(name);
        stream.antithetic = !self.antithetic;
        stream
    }
}

use rand_core::{Error, RngCore};

impl RngCore for Stream {
    fn next_u32(&mut self) -> u32 {
        // u < 1 so the product is below 2^32.
        (self.rand_u01() * 4294967296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = self.next_u32() as u64;
        let low = self.next_u32() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = dest.len();
        let mut i = 0;
        while i < bytes {
            let x = self.next_u32();
            let j = bytes.min(i + 4);
            // Always use Little-Endian.
            dest[i .. j].copy_from_slice(&x.to_le_bytes()[0 .. (j - i)]);
            i = j;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)] mod tests {
    use super::*;
    use super::super::*;

    fn default_stream() -> Stream {
        Stream::new(0, "test", GeneratorState::DEFAULT)
    }

    #[test] pub fn first_values_from_default_seed() {
        let mut stream = default_stream();
        assert_eq!(stream.rand_u01(), 0.12701112204657714);
        assert_eq!(stream.rand_u01(), 0.3185275653967945);
        assert_eq!(stream.rand_u01(), 0.3091860155832701);
        assert_eq!(
            stream.state().current().components(),
            [3023790853, 3023790853, 3385359573, 2478282264, 1655725443, 2057415812]
        );
        assert_eq!(stream.previous_u(), 0.3091860155832701);
    }

    #[test] pub fn increased_precision_combines_two_steps() {
        let mut stream = default_stream();
        stream.set_increased_precision(true);
        assert!(stream.increased_precision());
        assert_eq!(stream.rand_u01(), 0.12701112204657714 + 0.3185275653967945 * FACT);

        let mut plain = default_stream();
        plain.rand_u01();
        plain.rand_u01();
        assert_eq!(stream.state().current(), plain.state().current());
    }

    #[test] pub fn substream_round_trip() {
        let mut stream = default_stream();
        let u = stream.rand_u01();
        stream.reset_start_substream();
        assert_eq!(u, stream.rand_u01());

        stream.advance_to_next_substream();
        let v = stream.rand_u01();
        assert_eq!(v, 0.07939898979733463);
        stream.rand_u01();
        stream.reset_start_substream();
        assert_eq!(v, stream.rand_u01());

        stream.reset_start_stream();
        assert_eq!(u, stream.rand_u01());
    }

    #[test] pub fn reset_start_stream_reproduces_sequence() {
        let mut stream = default_stream();
        let first: Vec<f64> = (0 .. 1000).map(|_| stream.rand_u01()).collect();
        stream.advance_to_next_substream();
        stream.advance_to_next_substream();
        stream.rand_u01();
        stream.reset_start_stream();
        let second: Vec<f64> = (0 .. 1000).map(|_| stream.rand_u01()).collect();
        assert_eq!(first, second);
    }

    #[test] pub fn antithetic_instance_complements() {
        let mut stream = default_stream();
        stream.rand_u01();
        let mut anti = stream.new_antithetic_instance(Some("anti"));
        assert!(anti.antithetic_option());
        assert_eq!(anti.name(), "anti");
        assert_eq!(anti.id(), stream.id());
        for _ in 0 .. 1000 {
            let u = stream.rand_u01();
            let v = anti.rand_u01();
            assert_eq!(v, 1.0 - u);
            assert!((anti.antithetic_value() - u).abs() < 1e-15);
        }
    }

    #[test] pub fn antithetic_instance_complements_with_increased_precision() {
        let mut stream = default_stream();
        stream.set_increased_precision(true);
        for _ in 0 .. 7 { stream.rand_u01(); }
        let mut anti = stream.new_antithetic_instance(None);
        assert!(anti.increased_precision());
        for _ in 0 .. 10000 {
            let u = stream.rand_u01();
            assert_eq!(anti.rand_u01(), 1.0 - u);
        }
    }

    #[test] pub fn antithetic_fork_of_antithetic_source_is_canonical() {
        let mut stream = default_stream();
        stream.set_antithetic_option(true);
        let mut fork = stream.new_antithetic_instance(None);
        assert!(!fork.antithetic_option());
        let mut canonical = default_stream();
        for _ in 0 .. 1000 {
            let c = canonical.rand_u01();
            assert_eq!(fork.rand_u01(), c);
            let a = stream.rand_u01();
            assert_eq!(a, 1.0 - c);
            // Complementing twice is only exact up to rounding.
            assert!((1.0 - a - c).abs() < 1e-15);
        }
    }

    #[test] pub fn advance_state_rejects_huge_exponents() {
        let mut stream = default_stream();
        stream.rand_u01();
        let before = stream.state();
        assert_eq!(
            stream.advance_state(i32::MAX, 0),
            Err(StreamError::InvalidJump { e: i32::MAX, max: MAX_JUMP_EXPONENT })
        );
        assert_eq!(
            stream.advance_state(i32::MIN, 5),
            Err(StreamError::InvalidJump { e: i32::MIN, max: MAX_JUMP_EXPONENT })
        );
        assert_eq!(stream.state(), before);
        assert!(stream.advance_state(MAX_JUMP_EXPONENT as i32, 0).is_ok());
        assert!(stream.advance_state(-(MAX_JUMP_EXPONENT as i32), 0).is_ok());
        // 2^191 forward then back returns to the same state.
        assert_eq!(stream.state(), before);
    }

    #[test] pub fn antithetic_flag_does_not_change_trajectory() {
        let mut stream = default_stream();
        stream.set_antithetic_option(true);
        assert_eq!(stream.rand_u01(), 1.0 - 0.12701112204657714);
        stream.set_antithetic_option(false);
        assert_eq!(stream.rand_u01(), 0.3185275653967945);
    }

    #[test] pub fn new_instance_is_independent_fork() {
        let mut stream = default_stream();
        stream.rand_u01();
        let mut fork = stream.new_instance(None);
        assert_eq!(fork.name(), "test");
        assert_eq!(fork.previous_u(), stream.previous_u());
        assert_eq!(fork.rand_u01(), stream.rand_u01());
        fork.rand_u01();
        assert_ne!(fork.state().current(), stream.state().current());

        // Inverting twice restores the flag.
        let anti = stream.new_antithetic_instance(None).new_antithetic_instance(None);
        assert!(!anti.antithetic_option());
    }

    #[test] pub fn rand_int_range() {
        let mut stream = default_stream();
        let mut seen = [false; 3];
        for _ in 0 .. 1000 {
            let x = stream.rand_int(1, 3).unwrap();
            assert!((1 ..= 3).contains(&x));
            seen[(x - 1) as usize] = true;
        }
        assert_eq!(seen, [true; 3]);

        assert_eq!(stream.rand_int(5, 5), Ok(5));
        assert_eq!(stream.rand_int(3, 1), Err(StreamError::InvalidRange { lo: 3, hi: 1 }));
        for _ in 0 .. 100 {
            let x = stream.rand_int(i64::MIN, i64::MAX);
            assert!(x.is_ok());
        }
    }

    #[test] pub fn advance_state_matches_stepping() {
        let mut jumped = default_stream();
        let mut stepped = default_stream();
        jumped.advance_state(0, 1000).unwrap();
        for _ in 0 .. 1000 { stepped.rand_u01(); }
        assert_eq!(jumped.state().current(), stepped.state().current());

        jumped.advance_state(0, -1000).unwrap();
        assert_eq!(*jumped.state().current(), GeneratorState::DEFAULT);

        // 2^76 steps lands on the next substream.
        let mut next = default_stream();
        next.advance_to_next_substream();
        jumped.advance_state(76, 0).unwrap();
        assert_eq!(jumped.state().current(), next.state().current());

        // -2^76 + 3 steps from there is 3 steps into the first substream.
        jumped.advance_state(-76, 3).unwrap();
        stepped.reset_start_stream();
        for _ in 0 .. 3 { stepped.rand_u01(); }
        assert_eq!(jumped.state().current(), stepped.state().current());
        assert_eq!(*jumped.state().substream_start(), GeneratorState::DEFAULT);
    }

    #[test] pub fn set_seed_validates() {
        let mut stream = default_stream();
        assert_eq!(
            stream.set_seed(&[0, 0, 0, 1, 1, 1]),
            Err(StreamError::InvalidSeed(SeedError::AllZero { group: 1 }))
        );
        stream.set_seed(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(stream.state().initial().components(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(stream.state().current().components(), [1, 2, 3, 4, 5, 6]);
    }

    #[test] pub fn rng_core_fill_matches_next_u32() {
        let mut a = default_stream();
        let mut b = default_stream();
        let mut buffer = [0u8; 11];
        a.fill_bytes(&mut buffer);
        let mut expected = Vec::new();
        for _ in 0 .. 3 {
            expected.extend_from_slice(&b.next_u32().to_le_bytes());
        }
        assert_eq!(&buffer[..], &expected[0 .. 11]);
    }
}
