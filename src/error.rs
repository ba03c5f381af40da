use thiserror::Error;

/// Reasons a seed is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("seed must have 6 components, got {0}")]
    WrongLength(usize),

    #[error("seed component {index} is {value}, must be less than {modulus}")]
    OutOfRange { index: usize, value: u64, modulus: u64 },

    /// Group 1 is components 0..3, group 2 is components 3..6.
    #[error("seed component group {group} is all zero")]
    AllZero { group: usize },
}

/// Errors raised by factories and streams.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("invalid seed: {0}")]
    InvalidSeed(#[from] SeedError),

    #[error("invalid range: lo ({lo}) is greater than hi ({hi})")]
    InvalidRange { lo: i64, hi: i64 },

    #[error("invalid jump: exponent {e} is outside -{max}..={max}")]
    InvalidJump { e: i32, max: u32 },
}
