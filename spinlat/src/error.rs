use symmlat::SymmetryError;
use thiserror::Error;

/// Everything that can go wrong constructing or querying a basis.
///
/// Construction errors are reported once and never resurface; querying errors
/// (`WrongBasisType`, `CacheNotBuilt`) are returned synchronously;
/// [`BasisError::NotARepresentative`] is an expected, non-fatal outcome of an
/// index lookup. I/O failures during cache persistence pass through as
/// [`BasisError::Io`].
#[derive(Debug, Error)]
pub enum BasisError {
    #[error("invalid number of spins: {0} (expected 1..=512)")]
    InvalidNumberSpins(u32),
    #[error("invalid Hamming weight {weight} for {number_spins} spins")]
    InvalidHammingWeight { number_spins: u32, weight: u32 },
    #[error("spin inversion requires half filling, got Hamming weight {weight} for {number_spins} spins")]
    InvalidSpinInversion { number_spins: u32, weight: u32 },
    #[error("operation requires a basis of at most 64 spins")]
    WrongBasisType,
    #[error("representative cache has not been built")]
    CacheNotBuilt,
    #[error("state is not a representative")]
    NotARepresentative,
    #[error(transparent)]
    Symmetry(#[from] SymmetryError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
