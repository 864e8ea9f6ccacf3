//! Discrete Morse matching over a face poset.
//!
//! The matcher destructively reduces a [`FacePoset`](crate::poset::FacePoset)
//! by repeatedly collapsing free faces (cells with exactly one regular parent
//! and no irregular parents) into matched pairs, promoting a cell to critical
//! whenever no free face remains, until the poset is empty.

pub mod matching;

pub use matching::{
    CriticalSelector, FirstInScan, MorseMatching, UniformRandom, randomized_morse_matching,
    randomized_morse_matching_with,
};
