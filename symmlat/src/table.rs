//! Immutable symmetry tables in the two storage widths.

use crate::batch::{SmallSymmetry, SymmetryBatch, BATCH_SIZE};
use crate::error::SymmetryError;
use crate::network::{BigNetwork, SmallNetwork};
use crate::symmetry::Symmetry;
use num_complex::Complex64;

/// Characters whose imaginary part is at most this are treated as real.
pub const REAL_TOLERANCE: f64 = 1e-13;

/// Symmetry group compiled for states of at most 64 spins, stored in batches
/// of [`BATCH_SIZE`] for the lane-parallel kernel.
#[derive(Clone, Debug)]
pub struct SmallSymmetryTable {
    number_spins: u32,
    full: Vec<SymmetryBatch>,
    tail: Option<SymmetryBatch>,
    tail_count: usize,
}

impl SmallSymmetryTable {
    /// Compiles `symmetries` for a basis of `number_spins <= 64` spins.
    pub fn new(symmetries: &[Symmetry], number_spins: u32) -> Result<Self, SymmetryError> {
        if number_spins == 0 || number_spins > 64 {
            return Err(SymmetryError::UnsupportedWidth {
                length: number_spins as usize,
                limit: 64,
            });
        }
        let compiled = compile_small(symmetries, number_spins)?;

        let mut chunks = compiled.chunks_exact(BATCH_SIZE);
        let full: Vec<SymmetryBatch> = chunks.by_ref().map(SymmetryBatch::new).collect();
        let remainder = chunks.remainder();
        let tail_count = remainder.len();
        let tail = if remainder.is_empty() {
            None
        } else {
            // Pad the partial batch by repeating its last symmetry so every
            // lane is safe to evaluate; the padding can never win the orbit
            // minimum because it duplicates a real lane.
            let mut padded = remainder.to_vec();
            let last = padded[padded.len() - 1].clone();
            while padded.len() < BATCH_SIZE {
                padded.push(last.clone());
            }
            Some(SymmetryBatch::new(&padded))
        };
        Ok(Self {
            number_spins,
            full,
            tail,
            tail_count,
        })
    }

    /// Number of real symmetries (padding lanes excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.full.len() * BATCH_SIZE + self.tail_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full.is_empty() && self.tail.is_none()
    }

    #[must_use]
    pub fn number_spins(&self) -> u32 {
        self.number_spins
    }

    /// Depth shared by every compiled network in the table.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.full
            .first()
            .or(self.tail.as_ref())
            .map_or(0, SymmetryBatch::depth)
    }

    /// Total number of lanes including tail padding.
    #[must_use]
    pub fn lanes(&self) -> usize {
        (self.full.len() + usize::from(self.tail.is_some())) * BATCH_SIZE
    }

    /// Iterates the batches together with their real-lane counts.
    pub fn batches(&self) -> impl Iterator<Item = (&SymmetryBatch, usize)> {
        self.full
            .iter()
            .map(|batch| (batch, BATCH_SIZE))
            .chain(self.tail.iter().map(|batch| (batch, self.tail_count)))
    }

    /// The characters of the real lanes, in table order.
    pub fn characters(&self) -> impl Iterator<Item = Complex64> + '_ {
        self.batches()
            .flat_map(|(batch, count)| (0..count).map(move |lane| batch.character(lane)))
    }

    /// Whether every character is real within [`REAL_TOLERANCE`].
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.characters()
            .all(|character| character.im.abs() <= REAL_TOLERANCE)
    }
}

fn compile_small(
    symmetries: &[Symmetry],
    number_spins: u32,
) -> Result<Vec<SmallSymmetry>, SymmetryError> {
    symmetries
        .iter()
        .map(|symmetry| {
            if symmetry.number_spins() != number_spins as usize {
                return Err(SymmetryError::WidthMismatch {
                    expected: number_spins,
                    actual: symmetry.number_spins(),
                });
            }
            Ok(SmallSymmetry {
                network: SmallNetwork::compile(symmetry.permutation()),
                character: symmetry.character(),
                sector: symmetry.sector(),
                periodicity: symmetry.periodicity(),
            })
        })
        .collect()
}

/// One compiled full-width symmetry of a big table.
#[derive(Clone, Debug)]
pub struct BigSymmetry {
    network: BigNetwork,
    character: Complex64,
    sector: u32,
    periodicity: u32,
}

impl BigSymmetry {
    #[must_use]
    pub fn network(&self) -> &BigNetwork {
        &self.network
    }

    #[must_use]
    pub fn character(&self) -> Complex64 {
        self.character
    }

    #[must_use]
    pub fn sector(&self) -> u32 {
        self.sector
    }

    #[must_use]
    pub fn periodicity(&self) -> u32 {
        self.periodicity
    }
}

/// Symmetry group compiled for states of up to 512 spins. No batching: each
/// record keeps its full-width network and a scalar character.
#[derive(Clone, Debug)]
pub struct BigSymmetryTable {
    number_spins: u32,
    symmetries: Vec<BigSymmetry>,
}

impl BigSymmetryTable {
    /// Compiles `symmetries` for a basis of `number_spins <= 512` spins.
    pub fn new(symmetries: &[Symmetry], number_spins: u32) -> Result<Self, SymmetryError> {
        if number_spins == 0 || number_spins > 512 {
            return Err(SymmetryError::UnsupportedWidth {
                length: number_spins as usize,
                limit: 512,
            });
        }
        let compiled = symmetries
            .iter()
            .map(|symmetry| {
                if symmetry.number_spins() != number_spins as usize {
                    return Err(SymmetryError::WidthMismatch {
                        expected: number_spins,
                        actual: symmetry.number_spins(),
                    });
                }
                Ok(BigSymmetry {
                    network: BigNetwork::compile(symmetry.permutation()),
                    character: symmetry.character(),
                    sector: symmetry.sector(),
                    periodicity: symmetry.periodicity(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            number_spins,
            symmetries: compiled,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symmetries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symmetries.is_empty()
    }

    #[must_use]
    pub fn number_spins(&self) -> u32 {
        self.number_spins
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.symmetries
            .first()
            .map_or(0, |symmetry| symmetry.network.depth())
    }

    #[must_use]
    pub fn symmetries(&self) -> &[BigSymmetry] {
        &self.symmetries
    }

    /// Whether every character is real within [`REAL_TOLERANCE`].
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.symmetries
            .iter()
            .all(|symmetry| symmetry.character.im.abs() <= REAL_TOLERANCE)
    }
}
