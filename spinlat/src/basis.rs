//! The basis handle.

use crate::cache::RepresentativeCache;
use crate::error::BasisError;
use crate::io;
use bitlat::Bits512;
use std::io::{Read, Write};
use std::ops::Deref;
use std::sync::{Arc, OnceLock};
use symmlat::{
    is_representative_64, state_info_512, state_info_64, BigSymmetryTable, FlatBasisView,
    FlatGroup, Permutation, SmallSymmetryTable, SpinInversion, StateInfo, Symmetry,
};

struct SmallPayload {
    table: SmallSymmetryTable,
    cache: OnceLock<RepresentativeCache>,
}

struct BigPayload {
    table: BigSymmetryTable,
}

enum Payload {
    Small(SmallPayload),
    Big(BigPayload),
}

struct BasisInner {
    number_spins: u32,
    hamming_weight: Option<u32>,
    spin_inversion: SpinInversion,
    has_symmetries: bool,
    payload: Payload,
}

/// A symmetry-adapted spin basis.
///
/// The handle is cheap to clone (clones share the symmetry table and the
/// representative cache) and safe to share across threads. A basis of at most
/// 64 spins is a *small* basis: it supports building the representative
/// cache, indexed lookup, and batch representative checks. Bases of up to 512
/// spins answer per-state queries only.
///
/// The cache is built at most once: concurrent [`SpinBasis::build`] calls
/// serialize so that a single caller constructs while the rest observe the
/// finished result, and the basis never returns to the unbuilt state.
///
/// # Example
///
/// ```
/// use spinlat::{Permutation, SpinBasis, SpinInversion, Symmetry};
///
/// // Half filling on a 4-site ring, full translation group.
/// let group: Vec<Symmetry> = (0..4)
///     .map(|power| Symmetry::new(Permutation::shift(4, 1).pow(power), 0).unwrap())
///     .collect();
/// let basis = SpinBasis::new(group, 4, Some(2), SpinInversion::Off).unwrap();
/// basis.build().unwrap();
/// assert_eq!(basis.states().unwrap().as_slice(), &[0b0011, 0b0101]);
/// assert_eq!(basis.index(0b0101).unwrap(), 1);
/// ```
#[derive(Clone)]
pub struct SpinBasis {
    inner: Arc<BasisInner>,
}

impl SpinBasis {
    /// Builds a basis over `number_spins` spins from an explicit symmetry
    /// group, an optional magnetization (Hamming weight) constraint, and an
    /// optional global spin-inversion constraint.
    ///
    /// The group is taken as given: every element of the group, not only
    /// generators. An empty group with spin inversion enabled is promoted to
    /// the trivial group so the flip has something to compose with.
    pub fn new(
        symmetries: Vec<Symmetry>,
        number_spins: u32,
        hamming_weight: Option<u32>,
        spin_inversion: SpinInversion,
    ) -> Result<Self, BasisError> {
        if number_spins == 0 || number_spins > 512 {
            return Err(BasisError::InvalidNumberSpins(number_spins));
        }
        if let Some(weight) = hamming_weight {
            if weight > number_spins {
                return Err(BasisError::InvalidHammingWeight {
                    number_spins,
                    weight,
                });
            }
            // The flip maps weight w onto N - w, so a magnetization sector is
            // only inversion-invariant at half filling.
            if !spin_inversion.is_off() && 2 * weight != number_spins {
                return Err(BasisError::InvalidSpinInversion {
                    number_spins,
                    weight,
                });
            }
        }

        let mut symmetries = symmetries;
        if symmetries.is_empty() && !spin_inversion.is_off() {
            symmetries.push(Symmetry::new(
                Permutation::identity(number_spins as usize),
                0,
            )?);
        }
        let has_symmetries = symmetries.len() > 1 || !spin_inversion.is_off();

        let payload = if number_spins <= 64 {
            Payload::Small(SmallPayload {
                table: SmallSymmetryTable::new(&symmetries, number_spins)?,
                cache: OnceLock::new(),
            })
        } else {
            Payload::Big(BigPayload {
                table: BigSymmetryTable::new(&symmetries, number_spins)?,
            })
        };
        Ok(Self {
            inner: Arc::new(BasisInner {
                number_spins,
                hamming_weight,
                spin_inversion,
                has_symmetries,
                payload,
            }),
        })
    }

    // ========== Metadata ==========

    #[must_use]
    pub fn number_spins(&self) -> u32 {
        self.inner.number_spins
    }

    /// Storage width of one state: 64 for small bases, 512 for big ones.
    #[must_use]
    pub fn number_bits(&self) -> u32 {
        match self.inner.payload {
            Payload::Small(_) => 64,
            Payload::Big(_) => 512,
        }
    }

    #[must_use]
    pub fn hamming_weight(&self) -> Option<u32> {
        self.inner.hamming_weight
    }

    #[must_use]
    pub fn spin_inversion(&self) -> SpinInversion {
        self.inner.spin_inversion
    }

    /// Whether any non-trivial symmetry constrains the basis.
    #[must_use]
    pub fn has_symmetries(&self) -> bool {
        self.inner.has_symmetries
    }

    /// Whether every character of the group is real.
    #[must_use]
    pub fn is_real(&self) -> bool {
        match &self.inner.payload {
            Payload::Small(payload) => payload.table.is_real(),
            Payload::Big(payload) => payload.table.is_real(),
        }
    }

    // ========== Cache lifecycle ==========

    fn small(&self) -> Result<&SmallPayload, BasisError> {
        match &self.inner.payload {
            Payload::Small(payload) => Ok(payload),
            Payload::Big(_) => Err(BasisError::WrongBasisType),
        }
    }

    fn built(&self) -> Result<&RepresentativeCache, BasisError> {
        self.small()?.cache.get().ok_or(BasisError::CacheNotBuilt)
    }

    /// Enumerates the representatives of the sector and builds the lookup
    /// index. One-shot and idempotent; later calls return immediately.
    pub fn build(&self) -> Result<(), BasisError> {
        let payload = self.small()?;
        payload.cache.get_or_init(|| {
            RepresentativeCache::build(
                &payload.table,
                self.inner.number_spins,
                self.inner.hamming_weight,
                self.inner.spin_inversion,
            )
        });
        Ok(())
    }

    /// Installs a caller-supplied representative list instead of enumerating.
    /// The list must be strictly increasing and complete for the sector; no
    /// validation is performed. A no-op when the cache already exists.
    pub fn build_unsafe(&self, representatives: Vec<u64>) -> Result<(), BasisError> {
        let payload = self.small()?;
        payload
            .cache
            .get_or_init(|| RepresentativeCache::from_trusted(representatives, self.inner.number_spins));
        Ok(())
    }

    /// Number of representatives. Requires a built cache.
    pub fn number_states(&self) -> Result<u64, BasisError> {
        Ok(self.built()?.number_states())
    }

    /// Position of `x` in the representative list.
    ///
    /// Returns [`BasisError::NotARepresentative`] when `x` is not in the
    /// list; that is an expected outcome, not a failure of the basis.
    pub fn index(&self, x: u64) -> Result<u64, BasisError> {
        self.built()?.index(x).ok_or(BasisError::NotARepresentative)
    }

    /// The sorted representative list. The returned accessor keeps the basis
    /// (and with it the list) alive for as long as it is held.
    pub fn states(&self) -> Result<BasisStates, BasisError> {
        self.built()?;
        Ok(BasisStates {
            basis: self.clone(),
        })
    }

    // ========== Per-state queries ==========

    /// Representative, character, and norm of a state of any width.
    #[must_use]
    pub fn state_info(&self, bits: &Bits512) -> StateInfo<Bits512> {
        if !self.inner.has_symmetries {
            return StateInfo {
                representative: *bits,
                character: num_complex::Complex64::new(1.0, 0.0),
                norm: 1.0,
            };
        }
        match &self.inner.payload {
            Payload::Small(payload) => {
                let info = state_info_64(&payload.table, self.inner.spin_inversion, bits.words[0]);
                StateInfo {
                    representative: Bits512::from(info.representative),
                    character: info.character,
                    norm: info.norm,
                }
            }
            Payload::Big(payload) => {
                state_info_512(&payload.table, self.inner.spin_inversion, bits)
            }
        }
    }

    /// 64-bit convenience form of [`SpinBasis::state_info`] for small bases.
    pub fn state_info_64(&self, bits: u64) -> Result<StateInfo<u64>, BasisError> {
        let payload = self.small()?;
        if !self.inner.has_symmetries {
            return Ok(StateInfo {
                representative: bits,
                character: num_complex::Complex64::new(1.0, 0.0),
                norm: 1.0,
            });
        }
        Ok(state_info_64(
            &payload.table,
            self.inner.spin_inversion,
            bits,
        ))
    }

    /// Marks, for every input state, whether it is the representative of its
    /// orbit with non-zero norm. Small bases only.
    pub fn is_representative(&self, states: &[u64]) -> Result<Vec<bool>, BasisError> {
        let payload = self.small()?;
        if !self.inner.has_symmetries {
            return Ok(vec![true; states.len()]);
        }
        Ok(states
            .iter()
            .map(|&x| is_representative_64(&payload.table, self.inner.spin_inversion, x))
            .collect())
    }

    // ========== Persistence ==========

    /// Writes the built representative list to `writer`.
    pub fn save_cache(&self, writer: &mut impl Write) -> Result<(), BasisError> {
        let cache = self.built()?;
        io::save_states(cache.states(), writer)?;
        Ok(())
    }

    /// Reads a representative list previously written by
    /// [`SpinBasis::save_cache`] and installs it as the cache. A no-op when
    /// the cache already exists.
    pub fn load_cache(&self, reader: &mut impl Read) -> Result<(), BasisError> {
        let payload = self.small()?;
        if payload.cache.get().is_some() {
            return Ok(());
        }
        let states = io::load_states(reader)?;
        payload
            .cache
            .get_or_init(|| RepresentativeCache::from_trusted(states, self.inner.number_spins));
        Ok(())
    }

    // ========== Snapshots ==========

    /// A self-contained, kernel-ready snapshot of the basis.
    #[must_use]
    pub fn to_flat(&self) -> FlatBasisView {
        let group = match &self.inner.payload {
            Payload::Small(payload) => FlatGroup::from_small(&payload.table),
            Payload::Big(payload) => FlatGroup::from_big(&payload.table),
        };
        FlatBasisView::new(
            self.inner.number_spins,
            self.inner.hamming_weight,
            self.inner.spin_inversion,
            group,
        )
    }
}

/// Shared view of a basis' representative list.
///
/// Holds a clone of the basis handle, so the list outlives any other handle
/// the caller may drop.
pub struct BasisStates {
    basis: SpinBasis,
}

impl BasisStates {
    #[must_use]
    pub fn as_slice(&self) -> &[u64] {
        match &self.basis.inner.payload {
            Payload::Small(payload) => payload.cache.get().map_or(&[], |cache| cache.states()),
            Payload::Big(_) => &[],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl Deref for BasisStates {
    type Target = [u64];
    fn deref(&self) -> &[u64] {
        self.as_slice()
    }
}

impl AsRef<[u64]> for BasisStates {
    fn as_ref(&self) -> &[u64] {
        self.as_slice()
    }
}
