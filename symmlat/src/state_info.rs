//! The per-state engine: orbit representative, character, and norm.
//!
//! For a state `x` the engine scans every group element `g` (and, with spin
//! inversion enabled, the composition of `g` with the global flip), tracking
//!
//! - the smallest image of `x` (the orbit representative),
//! - the conjugate of the character that produced the smallest image (the
//!   eigenvalue carrying `x` onto its representative), and
//! - the sum of characters over elements fixing `x`, which determines the
//!   norm of the symmetrized state: `sqrt(|sum| / order)`, zeroed below
//!   tolerance. A zero norm marks a symmetry-forbidden state.
//!
//! The engine exists in two specialized forms: the 64-bit form walks the
//! batched table eight lanes at a time, the 512-bit form walks full-width
//! records one by one. Both produce identical numerics on the same group.

use crate::table::{BigSymmetryTable, SmallSymmetryTable};
use bitlat::{word, Bits512};
use derive_more::TryFrom;
use num_complex::Complex64;

/// Norms with `|sum| / order` below this are treated as exactly zero.
const NORM_TOLERANCE: f64 = 1e-8;

/// Global spin-inversion constraint of a basis: `Even`/`Odd` select the
/// symmetric/antisymmetric sector of the flip that inverts every spin.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, TryFrom)]
#[try_from(repr)]
#[repr(i32)]
pub enum SpinInversion {
    Odd = -1,
    Off = 0,
    Even = 1,
}

impl SpinInversion {
    #[must_use]
    pub fn is_off(self) -> bool {
        self == SpinInversion::Off
    }

    /// The sign the flip contributes to characters, `None` when disabled.
    #[must_use]
    pub fn sign(self) -> Option<f64> {
        match self {
            SpinInversion::Odd => Some(-1.0),
            SpinInversion::Off => None,
            SpinInversion::Even => Some(1.0),
        }
    }
}

/// Result of a per-state query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateInfo<Bits> {
    pub representative: Bits,
    pub character: Complex64,
    pub norm: f64,
}

fn norm_from_fixed_sum(fixed_sum: Complex64, order: usize) -> f64 {
    let weight = fixed_sum.norm() / order as f64;
    if weight >= NORM_TOLERANCE {
        weight.sqrt()
    } else {
        0.0
    }
}

fn effective_order(symmetries: usize, spin_inversion: SpinInversion) -> usize {
    if spin_inversion.is_off() {
        symmetries
    } else {
        2 * symmetries
    }
}

/// Representative, character, and norm of a 64-bit state.
#[must_use]
pub fn state_info_64(
    table: &SmallSymmetryTable,
    spin_inversion: SpinInversion,
    bits: u64,
) -> StateInfo<u64> {
    debug_assert!(!table.is_empty() || spin_inversion.is_off());
    if table.is_empty() {
        return StateInfo {
            representative: bits,
            character: Complex64::new(1.0, 0.0),
            norm: 1.0,
        };
    }
    let flip_mask = word::low_mask(table.number_spins());
    let sign = spin_inversion.sign();

    let mut representative = bits;
    let mut character = Complex64::new(1.0, 0.0);
    let mut fixed_sum = Complex64::new(0.0, 0.0);
    for (batch, count) in table.batches() {
        let images = batch.apply(bits);
        for (lane, &image) in images.iter().enumerate().take(count) {
            let eigenvalue = batch.character(lane);
            if image == bits {
                fixed_sum += eigenvalue;
            } else if image < representative {
                representative = image;
                character = eigenvalue.conj();
            }
            if let Some(sign) = sign {
                let flipped = image ^ flip_mask;
                let eigenvalue = eigenvalue.scale(sign);
                if flipped == bits {
                    fixed_sum += eigenvalue;
                } else if flipped < representative {
                    representative = flipped;
                    character = eigenvalue.conj();
                }
            }
        }
    }
    StateInfo {
        representative,
        character,
        norm: norm_from_fixed_sum(fixed_sum, effective_order(table.len(), spin_inversion)),
    }
}

/// Whether a 64-bit state is the minimum of its orbit with non-zero norm.
/// Short-circuits as soon as a smaller image is seen.
#[must_use]
pub fn is_representative_64(
    table: &SmallSymmetryTable,
    spin_inversion: SpinInversion,
    bits: u64,
) -> bool {
    debug_assert!(!table.is_empty() || spin_inversion.is_off());
    if table.is_empty() {
        return true;
    }
    let flip_mask = word::low_mask(table.number_spins());
    let sign = spin_inversion.sign();

    let mut fixed_sum = Complex64::new(0.0, 0.0);
    for (batch, count) in table.batches() {
        let images = batch.apply(bits);
        for (lane, &image) in images.iter().enumerate().take(count) {
            if image < bits {
                return false;
            }
            if image == bits {
                fixed_sum += batch.character(lane);
            }
            if let Some(sign) = sign {
                let flipped = image ^ flip_mask;
                if flipped < bits {
                    return false;
                }
                if flipped == bits {
                    fixed_sum += batch.character(lane).scale(sign);
                }
            }
        }
    }
    norm_from_fixed_sum(fixed_sum, effective_order(table.len(), spin_inversion)) > 0.0
}

/// Representative, character, and norm of a 512-bit state.
#[must_use]
pub fn state_info_512(
    table: &BigSymmetryTable,
    spin_inversion: SpinInversion,
    bits: &Bits512,
) -> StateInfo<Bits512> {
    debug_assert!(!table.is_empty() || spin_inversion.is_off());
    if table.is_empty() {
        return StateInfo {
            representative: *bits,
            character: Complex64::new(1.0, 0.0),
            norm: 1.0,
        };
    }
    let flip_mask = Bits512::low_mask(table.number_spins());
    let sign = spin_inversion.sign();

    let mut representative = *bits;
    let mut character = Complex64::new(1.0, 0.0);
    let mut fixed_sum = Complex64::new(0.0, 0.0);
    for symmetry in table.symmetries() {
        let image = symmetry.network().apply(bits);
        let eigenvalue = symmetry.character();
        if image == *bits {
            fixed_sum += eigenvalue;
        } else if image < representative {
            representative = image;
            character = eigenvalue.conj();
        }
        if let Some(sign) = sign {
            let flipped = image ^ flip_mask;
            let eigenvalue = eigenvalue.scale(sign);
            if flipped == *bits {
                fixed_sum += eigenvalue;
            } else if flipped < representative {
                representative = flipped;
                character = eigenvalue.conj();
            }
        }
    }
    StateInfo {
        representative,
        character,
        norm: norm_from_fixed_sum(fixed_sum, effective_order(table.len(), spin_inversion)),
    }
}

/// Whether a 512-bit state is the minimum of its orbit with non-zero norm.
#[must_use]
pub fn is_representative_512(
    table: &BigSymmetryTable,
    spin_inversion: SpinInversion,
    bits: &Bits512,
) -> bool {
    debug_assert!(!table.is_empty() || spin_inversion.is_off());
    if table.is_empty() {
        return true;
    }
    let flip_mask = Bits512::low_mask(table.number_spins());
    let sign = spin_inversion.sign();

    let mut fixed_sum = Complex64::new(0.0, 0.0);
    for symmetry in table.symmetries() {
        let image = symmetry.network().apply(bits);
        if image < *bits {
            return false;
        }
        if image == *bits {
            fixed_sum += symmetry.character();
        }
        if let Some(sign) = sign {
            let flipped = image ^ flip_mask;
            if flipped < *bits {
                return false;
            }
            if flipped == *bits {
                fixed_sum += symmetry.character().scale(sign);
            }
        }
    }
    norm_from_fixed_sum(fixed_sum, effective_order(table.len(), spin_inversion)) > 0.0
}
