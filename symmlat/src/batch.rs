//! Eight symmetries evaluated in lockstep.

use crate::network::SmallNetwork;
use num_complex::Complex64;

/// Number of symmetries evaluated together by the batched kernel.
pub const BATCH_SIZE: usize = 8;

/// One compiled 64-bit symmetry, the unit the batched layout is built from.
#[derive(Clone, Debug)]
pub(crate) struct SmallSymmetry {
    pub network: SmallNetwork,
    pub character: Complex64,
    pub sector: u32,
    pub periodicity: u32,
}

/// The eight masks of one network layer, lane-interleaved.
#[repr(C, align(64))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LaneMasks(pub [u64; BATCH_SIZE]);

/// Eight symmetries in transposed layout: per layer, the eight masks sit in
/// one aligned [`LaneMasks`] block under a single shared shift, so one pass of
/// [`SymmetryBatch::apply`] permutes a state through all eight networks with
/// straight-line lane-parallel code. Characters, sectors and periodicities
/// are stored in lane-major parallel arrays.
///
/// A batch always holds eight lanes; a table whose symmetry count is not a
/// multiple of eight pads its final batch by repeating the last symmetry, and
/// remembers how many lanes are real.
#[derive(Clone, Debug)]
pub struct SymmetryBatch {
    masks: Vec<LaneMasks>,
    shifts: Vec<u32>,
    character_re: [f64; BATCH_SIZE],
    character_im: [f64; BATCH_SIZE],
    sectors: [u32; BATCH_SIZE],
    periodicities: [u32; BATCH_SIZE],
}

impl SymmetryBatch {
    /// Transposes exactly [`BATCH_SIZE`] symmetries into batched layout. All
    /// lanes must share the same depth and shift schedule, which holds for
    /// networks compiled for one table width.
    pub(crate) fn new(lanes: &[SmallSymmetry]) -> Self {
        assert_eq!(lanes.len(), BATCH_SIZE);
        let depth = lanes[0].network.depth();
        debug_assert!(lanes
            .iter()
            .all(|lane| lane.network.shifts() == lanes[0].network.shifts()));

        let mut masks = vec![LaneMasks::default(); depth];
        let mut shifts = vec![0u32; depth];
        for layer in 0..depth {
            shifts[layer] = lanes[0].network.shift(layer);
            for (lane, symmetry) in lanes.iter().enumerate() {
                masks[layer].0[lane] = symmetry.network.mask(layer);
            }
        }
        let mut batch = Self {
            masks,
            shifts,
            character_re: [0.0; BATCH_SIZE],
            character_im: [0.0; BATCH_SIZE],
            sectors: [0; BATCH_SIZE],
            periodicities: [0; BATCH_SIZE],
        };
        for (lane, symmetry) in lanes.iter().enumerate() {
            batch.character_re[lane] = symmetry.character.re;
            batch.character_im[lane] = symmetry.character.im;
            batch.sectors[lane] = symmetry.sector;
            batch.periodicities[lane] = symmetry.periodicity;
        }
        batch
    }

    /// Applies all eight networks to `x`, producing one image per lane.
    #[must_use]
    #[inline]
    pub fn apply(&self, x: u64) -> [u64; BATCH_SIZE] {
        let mut lanes = [x; BATCH_SIZE];
        for (masks, &shift) in self.masks.iter().zip(&self.shifts) {
            for (lane, mask) in lanes.iter_mut().zip(masks.0) {
                let y = ((*lane >> shift) ^ *lane) & mask;
                *lane ^= y ^ (y << shift);
            }
        }
        lanes
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.masks.len()
    }

    #[must_use]
    pub fn mask(&self, layer: usize, lane: usize) -> u64 {
        self.masks[layer].0[lane]
    }

    #[must_use]
    pub fn shift(&self, layer: usize) -> u32 {
        self.shifts[layer]
    }

    #[must_use]
    #[inline]
    pub fn character(&self, lane: usize) -> Complex64 {
        Complex64::new(self.character_re[lane], self.character_im[lane])
    }

    #[must_use]
    pub fn sector(&self, lane: usize) -> u32 {
        self.sectors[lane]
    }

    #[must_use]
    pub fn periodicity(&self, lane: usize) -> u32 {
        self.periodicities[lane]
    }
}
