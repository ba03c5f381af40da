//! Transition matrices of the two generator components.
//!
//! The jump tables are the one-step matrices raised to 2^76 (substream length) and
//! 2^127 (stream length). They fix where stream and substream boundaries fall, so they
//! must stay bit-for-bit identical to the published values.

use super::modmath::Matrix;
use super::{A12, A13N, A21, A23N, M1, M2};

/// One step of component A.
pub const A1P0: Matrix = [
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [M1 - A13N, A12, 0.0],
];

/// One step of component B.
pub const A2P0: Matrix = [
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [M2 - A23N, 0.0, A21],
];

/// Inverse of `A1P0` modulo M1: one step backward.
pub const INV_A1: Matrix = [
    [184888585.0, 0.0, 1945170933.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
];

/// Inverse of `A2P0` modulo M2: one step backward.
pub const INV_A2: Matrix = [
    [0.0, 360363334.0, 4225571728.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
];

/// Component A advanced by 2^76 steps.
pub const A1P76: Matrix = [
    [82758667.0, 1871391091.0, 4127413238.0],
    [3672831523.0, 69195019.0, 1871391091.0],
    [3672091415.0, 3528743235.0, 69195019.0],
];

/// Component B advanced by 2^76 steps.
pub const A2P76: Matrix = [
    [1511326704.0, 3759209742.0, 1610795712.0],
    [4292754251.0, 1511326704.0, 3889917532.0],
    [3859662829.0, 4292754251.0, 3708466080.0],
];

/// Component A advanced by 2^127 steps.
pub const A1P127: Matrix = [
    [2427906178.0, 3580155704.0, 949770784.0],
    [226153695.0, 1230515664.0, 3580155704.0],
    [1988835001.0, 986791581.0, 1230515664.0],
];

/// Component B advanced by 2^127 steps.
pub const A2P127: Matrix = [
    [1464411153.0, 277697599.0, 1610723613.0],
    [32183930.0, 1464411153.0, 1022607788.0],
    [2824425944.0, 32183930.0, 2093834863.0],
];
