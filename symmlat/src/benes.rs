//! Beneš routing: compiles a permutation into layered butterfly exchanges.
//!
//! The compiled program has `2*log2(w) - 1` layers for width
//! `w = len.next_power_of_two()`, with the fixed shift schedule
//! `w/2, w/4, ..., 2, 1, 2, ..., w/4, w/2`. Layer `(mask, shift)` swaps the
//! bit pairs `(i, i + shift)` for every set mask bit `i`, so applying a layer
//! to a word `x` is
//!
//! ```text
//! y = ((x >> shift) ^ x) & mask;  x ^= y ^ (y << shift);
//! ```
//!
//! The fixed schedule means every permutation of the same width compiles to
//! the same depth with the same shifts, which is what lets the table batch
//! eight masks per layer under one shared shift.

use crate::permutation::Permutation;
use bitlat::Bits512;

/// Masks and shared shifts of the compiled network, outermost layer first.
pub(crate) struct Layers {
    pub masks: Vec<Bits512>,
    pub shifts: Vec<u32>,
}

/// Routes `permutation` through a Beneš network of width
/// `len.next_power_of_two()`. Sites past `len` are routed as fixed points.
pub(crate) fn route(permutation: &Permutation) -> Layers {
    let width = permutation.len().next_power_of_two();
    let log = width.trailing_zeros();
    if log == 0 {
        return Layers {
            masks: Vec::new(),
            shifts: Vec::new(),
        };
    }
    let depth = (2 * log - 1) as usize;
    let mut masks = vec![Bits512::zeros(); depth];
    let mut shifts = vec![0u32; depth];
    for level in 0..log as usize {
        let shift = (width >> (level + 1)) as u32;
        shifts[level] = shift;
        shifts[depth - 1 - level] = shift;
    }

    let mut current: Vec<usize> = (0..width).collect();
    current[..permutation.len()].copy_from_slice(permutation.as_slice());

    // Level l splits every block of size w >> l into two independent
    // half-size subnetworks, emitting the front layer l and the back layer
    // depth-1-l. Targets in `current` are kept relative to the block size of
    // the level being processed.
    for level in 0..log as usize {
        let size = width >> level;
        let half = size / 2;

        if size == 2 {
            // Innermost level: front and back coincide in the middle layer.
            for base in (0..width).step_by(2) {
                if current[base] == 1 {
                    masks[level].set_bit(base as u32);
                }
            }
            break;
        }

        let front = level;
        let back = depth - 1 - level;
        let mut next = vec![0usize; width];
        for base in (0..width).step_by(size) {
            let block = &current[base..base + size];
            let mut source = vec![0usize; size];
            for (element, &target) in block.iter().enumerate() {
                source[target] = element;
            }

            // Two-color the elements of the block: `true` routes through the
            // upper subnetwork. Input pairs (i, i^half) and output pairs
            // (source[t], source[t^half]) must receive opposite colors; the
            // constraint cycles alternate between the two pair kinds and have
            // even length, so a greedy walk colors them.
            let mut color: Vec<Option<bool>> = vec![None; size];
            for start in 0..size {
                if color[start].is_some() {
                    continue;
                }
                let mut element = start;
                let through_upper = false;
                loop {
                    color[element] = Some(through_upper);
                    let partner = element ^ half;
                    if color[partner].is_some() {
                        break;
                    }
                    color[partner] = Some(!through_upper);
                    let successor = source[block[partner] ^ half];
                    if color[successor].is_some() {
                        break;
                    }
                    element = successor;
                }
            }

            for pair in 0..half {
                if color[pair] == Some(true) {
                    masks[front].set_bit((base + pair) as u32);
                }
                if color[source[pair]] == Some(true) {
                    masks[back].set_bit((base + pair) as u32);
                }
            }
            for (element, &target) in block.iter().enumerate() {
                let upper = color[element] == Some(true);
                let slot = (element % half) + if upper { half } else { 0 };
                next[base + slot] = target % half;
            }
        }
        current = next;
    }

    Layers { masks, shifts }
}
