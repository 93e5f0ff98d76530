//! Bit-level primitives for spin-basis manipulation.
//!
//! `bitlat` provides the storage and arithmetic that the symmetry and basis
//! layers are built on:
//!
//! - [`Bits512`]: a 64-byte-aligned 512-bit word with full bitwise arithmetic,
//!   wide shifts, and unsigned ordering. Basis states of more than 64 spins
//!   are stored in this type.
//! - [`word`]: single-bit helpers on plain `u64` words.
//! - [`hamming`]: iteration over the integers of a fixed population count,
//!   used to walk fixed-magnetization sectors in increasing order.
//! - [`AlignedBuf`]: a heap buffer whose data is 64-byte aligned (cache line
//!   and widest SIMD lane), backing kernel-facing snapshots.

pub mod aligned;
pub mod hamming;
pub mod wide;
pub mod word;

pub use aligned::AlignedBuf;
pub use hamming::{closest_with_weight, next_with_same_weight};
pub use wide::{Bits512, WORD_COUNT};
