//! User-facing symmetry records.

use crate::error::SymmetryError;
use crate::permutation::Permutation;
use num_complex::Complex64;
use std::f64::consts::TAU;

/// One element of the symmetry group: a lattice permutation together with the
/// sector label selecting an irreducible representation.
///
/// The periodicity `p` is the order of the permutation; the character of the
/// element is `exp(2πi · sector / p)`, a unit-modulus eigenvalue.
///
/// # Example
///
/// ```
/// use symmlat::{Permutation, Symmetry};
///
/// let translation = Symmetry::new(Permutation::shift(4, 1), 1).unwrap();
/// assert_eq!(translation.periodicity(), 4);
/// let character = translation.character();
/// assert!((character.re).abs() < 1e-15 && (character.im - 1.0).abs() < 1e-15);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Symmetry {
    permutation: Permutation,
    sector: u32,
    periodicity: u32,
}

impl Symmetry {
    /// Builds a symmetry, deriving the periodicity from the permutation.
    /// Fails when `sector` is not below the periodicity.
    pub fn new(permutation: Permutation, sector: u32) -> Result<Self, SymmetryError> {
        let periodicity = permutation.periodicity();
        let periodicity = u32::try_from(periodicity)
            .map_err(|_| SymmetryError::PeriodicityOverflow { periodicity })?;
        if sector >= periodicity {
            return Err(SymmetryError::InvalidSector {
                sector,
                periodicity,
            });
        }
        Ok(Self {
            permutation,
            sector,
            periodicity,
        })
    }

    #[must_use]
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    #[must_use]
    pub fn sector(&self) -> u32 {
        self.sector
    }

    #[must_use]
    pub fn periodicity(&self) -> u32 {
        self.periodicity
    }

    /// Number of spins the symmetry acts on.
    #[must_use]
    pub fn number_spins(&self) -> usize {
        self.permutation.len()
    }

    /// The eigenvalue `exp(2πi · sector / periodicity)`.
    #[must_use]
    pub fn character(&self) -> Complex64 {
        Complex64::from_polar(
            1.0,
            TAU * f64::from(self.sector) / f64::from(self.periodicity),
        )
    }
}
