use thiserror::Error;

/// Errors reported while compiling symmetries into a table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymmetryError {
    #[error("permutation is not a bijection on 0..{length}")]
    InvalidPermutation { length: usize },
    #[error("permutation acts on {length} spins, more than the supported {limit}")]
    UnsupportedWidth { length: usize, limit: usize },
    #[error("sector {sector} is out of range for periodicity {periodicity}")]
    InvalidSector { sector: u32, periodicity: u32 },
    #[error("permutation periodicity {periodicity} does not fit in 32 bits")]
    PeriodicityOverflow { periodicity: u128 },
    #[error("symmetry acts on {actual} spins but the table is for {expected}")]
    WidthMismatch { expected: u32, actual: usize },
}
