//! Contiguous snapshots of a symmetry table for vectorized kernels.

use crate::state_info::SpinInversion;
use crate::table::{BigSymmetryTable, SmallSymmetryTable};
use bitlat::{AlignedBuf, WORD_COUNT};

/// Column-major snapshot of a symmetry table.
///
/// Shape is `(depth, lanes, words)`: masks are laid out in
/// `(layer, lane, word)` row-major order, one word per mask for small tables
/// and [`WORD_COUNT`] little-endian words for big tables. `lanes` counts all
/// lanes *including* tail padding (padding duplicates the last real symmetry;
/// [`FlatGroup::real_lanes`] tells kernels how many lanes carry distinct
/// data). Shifts have one entry per layer; character parts, sectors and
/// periodicities one entry per lane. Every buffer is 64-byte aligned.
///
/// A snapshot borrows nothing from its source table.
#[derive(Clone, Debug)]
pub struct FlatGroup {
    shape: [u32; 3],
    real_lanes: u32,
    masks: AlignedBuf<u64>,
    shifts: AlignedBuf<u64>,
    characters_re: AlignedBuf<f64>,
    characters_im: AlignedBuf<f64>,
    sectors: AlignedBuf<u32>,
    periodicities: AlignedBuf<u32>,
}

impl FlatGroup {
    /// Snapshots a batched 64-bit table. One word per mask.
    #[must_use]
    pub fn from_small(table: &SmallSymmetryTable) -> Self {
        let depth = table.depth();
        let lanes = table.lanes();
        let batches: Vec<_> = table.batches().map(|(batch, _)| batch).collect();

        let mut masks = Vec::with_capacity(depth * lanes);
        for layer in 0..depth {
            for batch in &batches {
                for lane in 0..crate::batch::BATCH_SIZE {
                    masks.push(batch.mask(layer, lane));
                }
            }
        }
        let shifts: Vec<u64> = (0..depth)
            .map(|layer| u64::from(batches[0].shift(layer)))
            .collect();

        let mut characters_re = Vec::with_capacity(lanes);
        let mut characters_im = Vec::with_capacity(lanes);
        let mut sectors = Vec::with_capacity(lanes);
        let mut periodicities = Vec::with_capacity(lanes);
        for batch in &batches {
            for lane in 0..crate::batch::BATCH_SIZE {
                let character = batch.character(lane);
                characters_re.push(character.re);
                characters_im.push(character.im);
                sectors.push(batch.sector(lane));
                periodicities.push(batch.periodicity(lane));
            }
        }

        Self {
            shape: [depth as u32, lanes as u32, 1],
            real_lanes: table.len() as u32,
            masks: AlignedBuf::from_slice(&masks),
            shifts: AlignedBuf::from_slice(&shifts),
            characters_re: AlignedBuf::from_slice(&characters_re),
            characters_im: AlignedBuf::from_slice(&characters_im),
            sectors: AlignedBuf::from_slice(&sectors),
            periodicities: AlignedBuf::from_slice(&periodicities),
        }
    }

    /// Snapshots a full-width table. [`WORD_COUNT`] little-endian words per
    /// mask, one lane per symmetry.
    #[must_use]
    pub fn from_big(table: &BigSymmetryTable) -> Self {
        let depth = table.depth();
        let lanes = table.len();

        let mut masks = Vec::with_capacity(depth * lanes * WORD_COUNT);
        for layer in 0..depth {
            for symmetry in table.symmetries() {
                masks.extend_from_slice(&symmetry.network().mask(layer).words);
            }
        }
        let shifts: Vec<u64> = table
            .symmetries()
            .first()
            .map(|symmetry| {
                (0..depth)
                    .map(|layer| u64::from(symmetry.network().shift(layer)))
                    .collect()
            })
            .unwrap_or_default();

        let mut characters_re = Vec::with_capacity(lanes);
        let mut characters_im = Vec::with_capacity(lanes);
        let mut sectors = Vec::with_capacity(lanes);
        let mut periodicities = Vec::with_capacity(lanes);
        for symmetry in table.symmetries() {
            characters_re.push(symmetry.character().re);
            characters_im.push(symmetry.character().im);
            sectors.push(symmetry.sector());
            periodicities.push(symmetry.periodicity());
        }

        Self {
            shape: [depth as u32, lanes as u32, WORD_COUNT as u32],
            real_lanes: lanes as u32,
            masks: AlignedBuf::from_slice(&masks),
            shifts: AlignedBuf::from_slice(&shifts),
            characters_re: AlignedBuf::from_slice(&characters_re),
            characters_im: AlignedBuf::from_slice(&characters_im),
            sectors: AlignedBuf::from_slice(&sectors),
            periodicities: AlignedBuf::from_slice(&periodicities),
        }
    }

    /// `[depth, lanes, words_per_mask]`.
    #[must_use]
    pub fn shape(&self) -> [u32; 3] {
        self.shape
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.shape[0]
    }

    /// Total lanes including tail padding.
    #[must_use]
    pub fn lanes(&self) -> u32 {
        self.shape[1]
    }

    #[must_use]
    pub fn words_per_mask(&self) -> u32 {
        self.shape[2]
    }

    /// Lanes that carry distinct symmetries.
    #[must_use]
    pub fn real_lanes(&self) -> u32 {
        self.real_lanes
    }

    /// Masks in `(layer, lane, word)` row-major order.
    #[must_use]
    pub fn masks(&self) -> &[u64] {
        &self.masks
    }

    #[must_use]
    pub fn shifts(&self) -> &[u64] {
        &self.shifts
    }

    #[must_use]
    pub fn characters_re(&self) -> &[f64] {
        &self.characters_re
    }

    #[must_use]
    pub fn characters_im(&self) -> &[f64] {
        &self.characters_im
    }

    #[must_use]
    pub fn sectors(&self) -> &[u32] {
        &self.sectors
    }

    #[must_use]
    pub fn periodicities(&self) -> &[u32] {
        &self.periodicities
    }
}

/// A flat snapshot of a whole basis: group data plus basis metadata.
#[derive(Clone, Debug)]
pub struct FlatBasisView {
    number_spins: u32,
    hamming_weight: Option<u32>,
    spin_inversion: SpinInversion,
    group: FlatGroup,
}

impl FlatBasisView {
    #[must_use]
    pub fn new(
        number_spins: u32,
        hamming_weight: Option<u32>,
        spin_inversion: SpinInversion,
        group: FlatGroup,
    ) -> Self {
        Self {
            number_spins,
            hamming_weight,
            spin_inversion,
            group,
        }
    }

    #[must_use]
    pub fn number_spins(&self) -> u32 {
        self.number_spins
    }

    #[must_use]
    pub fn hamming_weight(&self) -> Option<u32> {
        self.hamming_weight
    }

    #[must_use]
    pub fn spin_inversion(&self) -> SpinInversion {
        self.spin_inversion
    }

    #[must_use]
    pub fn group(&self) -> &FlatGroup {
        &self.group
    }
}
