//! Parallel representative enumeration and the indexed cache.
//!
//! Enumeration scans the whole magnetization sector in increasing state
//! order, split into ranges whose endpoints are valid sequence members so
//! that adjacent ranges meet on a Hamming successor. Each range is scanned by
//! one worker into a private vector; concatenating the outputs in range order
//! yields the strictly increasing representative list without any sorting.
//!
//! Lookup goes through a bucket table over the top [`BUCKET_BITS`] bits of
//! the state. Because the list is sorted numerically, all entries sharing a
//! top-bit key are adjacent, so each bucket is one `(start, length)` run and
//! a query is a bucket fetch plus a binary search within the run.

use bitlat::{closest_with_weight, next_with_same_weight};
use rayon::prelude::*;
use symmlat::{is_representative_64, SmallSymmetryTable, SpinInversion};

/// Number of leading state bits used as the bucket key.
const BUCKET_BITS: u32 = 16;
const BUCKET_COUNT: usize = 1 << BUCKET_BITS;

/// Pre-allocation for each worker's private output, in bytes.
const TASK_RESERVE_BYTES: usize = 1 << 20;

const EMPTY_BUCKET: (u64, u64) = (u64::MAX, 0);

/// The sorted representative list of a small basis plus its bucket index.
/// Built once, immutable afterwards.
#[derive(Clone, Debug)]
pub(crate) struct RepresentativeCache {
    states: Vec<u64>,
    buckets: Vec<(u64, u64)>,
    key_shift: u32,
}

impl RepresentativeCache {
    /// Enumerates all representatives of the sector and indexes them.
    pub(crate) fn build(
        table: &SmallSymmetryTable,
        number_spins: u32,
        hamming_weight: Option<u32>,
        spin_inversion: SpinInversion,
    ) -> Self {
        let states = generate_states(table, number_spins, hamming_weight, spin_inversion);
        Self::from_states(states, number_spins)
    }

    /// Indexes a caller-supplied representative list without re-deriving it.
    /// The list must be strictly increasing.
    pub(crate) fn from_trusted(states: Vec<u64>, number_spins: u32) -> Self {
        debug_assert!(states.windows(2).all(|pair| pair[0] < pair[1]));
        Self::from_states(states, number_spins)
    }

    fn from_states(states: Vec<u64>, number_spins: u32) -> Self {
        let key_shift = number_spins.saturating_sub(BUCKET_BITS);
        let mut buckets = vec![EMPTY_BUCKET; BUCKET_COUNT];
        let mut start = 0usize;
        while start < states.len() {
            let key = states[start] >> key_shift;
            let mut stop = start + 1;
            while stop < states.len() && states[stop] >> key_shift == key {
                stop += 1;
            }
            debug_assert_eq!(buckets[key as usize], EMPTY_BUCKET);
            buckets[key as usize] = (start as u64, (stop - start) as u64);
            start = stop;
        }
        Self {
            states,
            buckets,
            key_shift,
        }
    }

    /// Position of `x` in the representative list, `None` when absent.
    pub(crate) fn index(&self, x: u64) -> Option<u64> {
        let key = x >> self.key_shift;
        if key >= BUCKET_COUNT as u64 {
            return None;
        }
        let (start, length) = self.buckets[key as usize];
        if start == u64::MAX {
            return None;
        }
        let run = &self.states[start as usize..(start + length) as usize];
        run.binary_search(&x)
            .ok()
            .map(|offset| start + offset as u64)
    }

    pub(crate) fn states(&self) -> &[u64] {
        &self.states
    }

    pub(crate) fn number_states(&self) -> u64 {
        self.states.len() as u64
    }
}

/// First and last states of the sector scan, both inclusive.
fn search_bounds(number_spins: u32, hamming_weight: Option<u32>) -> (u64, u64) {
    match hamming_weight {
        Some(0) => (0, 0),
        Some(64) => (u64::MAX, u64::MAX),
        Some(weight) => {
            let first = u64::MAX >> (64 - weight);
            let last = if number_spins > weight {
                first << (number_spins - weight)
            } else {
                first
            };
            (first, last)
        }
        None => (0, u64::MAX >> (64 - number_spins)),
    }
}

fn next_state(state: u64, fixed_weight: bool) -> u64 {
    if fixed_weight {
        next_with_same_weight(state)
    } else {
        state + 1
    }
}

/// Splits the monotone scan `[first, last]` into inclusive ranges of at most
/// `chunk_size` states each. Every range endpoint is a valid member of the
/// scan sequence; the next range starts on its successor.
fn split_into_tasks(
    mut current: u64,
    last: u64,
    chunk_size: u64,
    fixed_weight: bool,
) -> Vec<(u64, u64)> {
    debug_assert!(chunk_size > 0);
    let span = chunk_size - 1;
    let weight = current.count_ones();
    let mut ranges = Vec::new();
    loop {
        if last - current <= span {
            ranges.push((current, last));
            break;
        }
        let stop = if fixed_weight {
            closest_with_weight(current + span, weight)
        } else {
            current + span
        };
        debug_assert!(stop >= current);
        if stop >= last {
            ranges.push((current, last));
            break;
        }
        ranges.push((current, stop));
        current = next_state(stop, fixed_weight);
    }
    ranges
}

/// Scans one inclusive range, collecting the representatives it contains.
fn scan_range(
    table: &SmallSymmetryTable,
    spin_inversion: SpinInversion,
    first: u64,
    last: u64,
    fixed_weight: bool,
) -> Vec<u64> {
    let reserve = (last - first)
        .saturating_add(1)
        .min((TASK_RESERVE_BYTES / size_of::<u64>()) as u64) as usize;
    let mut states = Vec::with_capacity(reserve);
    let mut current = first;
    loop {
        debug_assert!(current <= last);
        if is_representative_64(table, spin_inversion, current) {
            states.push(current);
        }
        if current >= last {
            break;
        }
        current = next_state(current, fixed_weight);
    }
    states
}

fn generate_states(
    table: &SmallSymmetryTable,
    number_spins: u32,
    hamming_weight: Option<u32>,
    spin_inversion: SpinInversion,
) -> Vec<u64> {
    let (first, last) = search_bounds(number_spins, hamming_weight);
    let parallelism = rayon::current_num_threads().max(1) as u64;
    let chunk_size = ((last - first) / (100 * parallelism)).max(1);
    let ranges = split_into_tasks(first, last, chunk_size, hamming_weight.is_some());

    let chunks: Vec<Vec<u64>> = ranges
        .par_iter()
        .map(|&(range_first, range_last)| {
            scan_range(
                table,
                spin_inversion,
                range_first,
                range_last,
                hamming_weight.is_some(),
            )
        })
        .collect();

    let mut states = Vec::with_capacity(chunks.iter().map(Vec::len).sum());
    for chunk in chunks {
        states.extend(chunk);
    }
    states
}
