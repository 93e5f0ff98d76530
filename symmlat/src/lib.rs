//! Lattice-symmetry representation for quantum spin bases.
//!
//! A finite group of lattice symmetries acts on the computational basis of an
//! `N`-spin system by permuting bits. `symmlat` represents such a group and
//! answers the central per-state question: given a basis state, what is the
//! smallest state in its orbit, which eigenvalue carries it there, and does
//! the state survive in the chosen symmetry sector at all?
//!
//! # Overview
//!
//! - [`Permutation`] and [`Symmetry`]: validated group elements. A symmetry
//!   pairs a permutation with the sector label of an irreducible
//!   representation; its character is `exp(2πi · sector / periodicity)`.
//! - [`SmallNetwork`] / [`BigNetwork`]: permutations compiled into Beneš-style
//!   layered `(mask, shift)` programs with a fixed shift schedule per width,
//!   so applying a permutation is a handful of shift/xor/and operations
//!   instead of a bit-by-bit scatter.
//! - [`SmallSymmetryTable`]: groups acting on at most 64 spins, stored in
//!   batches of eight with lane-interleaved masks so one pass evaluates eight
//!   group elements ([`SymmetryBatch::apply`]).
//! - [`BigSymmetryTable`]: groups acting on up to 512 spins
//!   ([`bitlat::Bits512`] states), unbatched.
//! - [`state_info_64`] / [`state_info_512`]: the per-state engine, with
//!   [`is_representative_64`] / [`is_representative_512`] short-circuit
//!   variants used by basis enumeration.
//! - [`FlatGroup`] / [`FlatBasisView`]: self-contained, 64-byte-aligned
//!   column-major snapshots consumed by vectorized kernels.
//!
//! # Quick Start
//!
//! ```
//! use symmlat::{state_info_64, Permutation, SmallSymmetryTable, SpinInversion, Symmetry};
//!
//! // The cyclic translation group of a 4-spin chain, zero-momentum sector.
//! let translation = Permutation::shift(4, 1);
//! let group: Vec<Symmetry> = (0..4)
//!     .map(|power| Symmetry::new(translation.pow(power), 0).unwrap())
//!     .collect();
//! let table = SmallSymmetryTable::new(&group, 4).unwrap();
//!
//! // 0b0100 is carried onto its orbit minimum 0b0001.
//! let info = state_info_64(&table, SpinInversion::Off, 0b0100);
//! assert_eq!(info.representative, 0b0001);
//! assert_eq!(info.character.re, 1.0);
//! assert!(info.norm > 0.0);
//! ```

pub mod batch;
mod benes;
pub mod error;
pub mod flat;
pub mod network;
pub mod permutation;
pub mod state_info;
pub mod symmetry;
pub mod table;

pub use batch::{LaneMasks, SymmetryBatch, BATCH_SIZE};
pub use error::SymmetryError;
pub use flat::{FlatBasisView, FlatGroup};
pub use network::{BigNetwork, SmallNetwork};
pub use permutation::{Permutation, MAX_WIDTH};
pub use state_info::{
    is_representative_512, is_representative_64, state_info_512, state_info_64, SpinInversion,
    StateInfo,
};
pub use symmetry::Symmetry;
pub use table::{BigSymmetry, BigSymmetryTable, SmallSymmetryTable, REAL_TOLERANCE};
