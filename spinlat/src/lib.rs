//! Symmetry-adapted bases for quantum spin systems.
//!
//! `spinlat` enumerates and indexes the basis of a spin system reduced by a
//! group of lattice symmetries, an optional fixed magnetization (Hamming
//! weight), and an optional global spin-inversion constraint. Each symmetry
//! orbit is represented by its smallest member; the basis is the sorted list
//! of representatives with non-zero norm in the chosen sector.
//!
//! # Overview
//!
//! - [`SpinBasis`]: the handle. Construct it from the full symmetry group and
//!   the sector constraints, [`build`](SpinBasis::build) the representative
//!   cache (the only parallel section: the scan over all states fans out over
//!   a rayon pool, deterministically), then query.
//! - Per-state reads ([`state_info`](SpinBasis::state_info),
//!   [`is_representative`](SpinBasis::is_representative)) need no cache and
//!   work on bases of up to 512 spins.
//! - Indexed reads ([`index`](SpinBasis::index),
//!   [`states`](SpinBasis::states),
//!   [`number_states`](SpinBasis::number_states)) answer "where in the basis
//!   is this state" in sub-linear time and require a built cache on a basis
//!   of at most 64 spins.
//! - [`save_cache`](SpinBasis::save_cache) /
//!   [`load_cache`](SpinBasis::load_cache) persist the representative list to
//!   any byte stream and restore it bit-identically.
//! - [`to_flat`](SpinBasis::to_flat) snapshots the symmetry data into the
//!   aligned column-major layout consumed by vectorized kernels.
//!
//! # Quick Start
//!
//! ```
//! use spinlat::{Permutation, SpinBasis, SpinInversion, Symmetry};
//!
//! // A 4-site ring with its translation group, no further constraints.
//! let group: Vec<Symmetry> = (0..4)
//!     .map(|power| Symmetry::new(Permutation::shift(4, 1).pow(power), 0).unwrap())
//!     .collect();
//! let basis = SpinBasis::new(group, 4, None, SpinInversion::Off).unwrap();
//! basis.build().unwrap();
//!
//! // Six orbits survive out of sixteen product states.
//! assert_eq!(basis.number_states().unwrap(), 6);
//! assert_eq!(basis.states().unwrap().as_slice(), &[0, 1, 3, 5, 7, 15]);
//!
//! // 0b0100 belongs to the orbit of 0b0001.
//! let info = basis.state_info_64(0b0100).unwrap();
//! assert_eq!(info.representative, 0b0001);
//! assert_eq!(basis.index(info.representative).unwrap(), 1);
//! ```
//!
//! # Concurrency
//!
//! A [`SpinBasis`] is immutable apart from its one-shot cache, so handles may
//! be cloned and shared freely. Concurrent `build` calls are single-flight:
//! exactly one constructs, the rest block and observe the finished cache.
//! Enumeration blocks the calling thread until the worker pool drains; no
//! operation suspends or retries internally.

mod basis;
mod cache;
mod error;
mod io;

pub use basis::{BasisStates, SpinBasis};
pub use error::BasisError;

pub use bitlat::Bits512;
pub use symmlat::{
    FlatBasisView, FlatGroup, Permutation, SpinInversion, StateInfo, Symmetry, SymmetryError,
};
