use num_complex::Complex64;
use rand::prelude::*;
use spinlat::{BasisError, Permutation, SpinBasis, SpinInversion, Symmetry};
use std::collections::BTreeSet;
use std::io::Cursor;

fn translation_group(number_spins: usize) -> Vec<Symmetry> {
    (0..number_spins)
        .map(|power| Symmetry::new(Permutation::shift(number_spins, 1).pow(power), 0).unwrap())
        .collect()
}

/// Brute-force representative set: orbit minima (computed one permutation at
/// a time) with a non-vanishing stabilizer character sum.
fn brute_force_representatives(
    group: &[Symmetry],
    number_spins: u32,
    hamming_weight: Option<u32>,
    inversion: SpinInversion,
) -> Vec<u64> {
    let flip_mask = (1u64 << number_spins) - 1;
    (0u64..1 << number_spins)
        .filter(|&x| hamming_weight.map_or(true, |weight| x.count_ones() == weight))
        .filter(|&x| {
            if group.is_empty() {
                return true;
            }
            let mut fixed_sum = Complex64::new(0.0, 0.0);
            for symmetry in group {
                let image = symmetry.permutation().permute_word(x);
                if image < x {
                    return false;
                }
                if image == x {
                    fixed_sum += symmetry.character();
                }
                if let Some(sign) = inversion.sign() {
                    let flipped = image ^ flip_mask;
                    if flipped < x {
                        return false;
                    }
                    if flipped == x {
                        fixed_sum += symmetry.character().scale(sign);
                    }
                }
            }
            let order = if inversion.is_off() {
                group.len()
            } else {
                2 * group.len()
            };
            fixed_sum.norm() / order as f64 >= 1e-8
        })
        .collect()
}

// ========== The end-to-end scenarios ==========

#[test]
fn trivial_basis_enumerates_every_state() {
    let basis = SpinBasis::new(Vec::new(), 4, None, SpinInversion::Off).unwrap();
    basis.build().unwrap();
    assert_eq!(basis.number_states().unwrap(), 16);
    assert_eq!(basis.states().unwrap().as_slice(), (0u64..16).collect::<Vec<_>>().as_slice());
    for x in 0..16u64 {
        let info = basis.state_info_64(x).unwrap();
        assert_eq!(info.representative, x);
        assert_eq!(info.character, Complex64::new(1.0, 0.0));
        assert_eq!(info.norm, 1.0);
        assert_eq!(basis.index(x).unwrap(), x);
    }
}

#[test]
fn translation_ring_of_four() {
    let basis = SpinBasis::new(translation_group(4), 4, None, SpinInversion::Off).unwrap();
    basis.build().unwrap();
    assert_eq!(basis.states().unwrap().as_slice(), &[0, 1, 3, 5, 7, 15]);

    let info = basis.state_info_64(0b0100).unwrap();
    assert_eq!(info.representative, 0b0001);
    assert_eq!(info.character, Complex64::new(1.0, 0.0));
    assert!((info.norm - 0.5).abs() < 1e-12);
}

#[test]
fn spin_inversion_alone() {
    let basis = SpinBasis::new(Vec::new(), 2, None, SpinInversion::Even).unwrap();
    basis.build().unwrap();
    assert_eq!(basis.states().unwrap().as_slice(), &[0b00, 0b01]);

    let info = basis.state_info_64(0b11).unwrap();
    assert_eq!(info.representative, 0b00);
    assert_eq!(info.character, Complex64::new(1.0, 0.0));
    assert!((info.norm - 0.5f64.sqrt()).abs() < 1e-12);

    let info = basis.state_info_64(0b10).unwrap();
    assert_eq!(info.representative, 0b01);
    assert_eq!(info.character, Complex64::new(1.0, 0.0));
    assert!((info.norm - 0.5f64.sqrt()).abs() < 1e-12);
}

#[test]
fn half_filled_ring_of_four() {
    let basis = SpinBasis::new(translation_group(4), 4, Some(2), SpinInversion::Off).unwrap();
    basis.build().unwrap();
    assert_eq!(basis.states().unwrap().as_slice(), &[0b0011, 0b0101]);

    let info = basis.state_info_64(0b1100).unwrap();
    assert_eq!(info.representative, 0b0011);
    assert_eq!(info.character, Complex64::new(1.0, 0.0));
    assert!(info.norm > 0.0);
}

#[test]
fn enumeration_is_deterministic_across_pool_sizes() {
    let reference = {
        let basis = SpinBasis::new(translation_group(16), 16, None, SpinInversion::Off).unwrap();
        basis.build().unwrap();
        basis.states().unwrap().to_vec()
    };
    for workers in [1usize, 4, 16] {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .unwrap();
        let basis = SpinBasis::new(translation_group(16), 16, None, SpinInversion::Off).unwrap();
        pool.install(|| basis.build()).unwrap();
        assert_eq!(basis.states().unwrap().as_slice(), reference.as_slice());
    }
}

#[test]
fn cache_survives_a_save_load_round_trip() {
    let basis = SpinBasis::new(Vec::new(), 20, Some(10), SpinInversion::Off).unwrap();
    basis.build().unwrap();

    let mut stream = Vec::new();
    basis.save_cache(&mut stream).unwrap();

    let restored = SpinBasis::new(Vec::new(), 20, Some(10), SpinInversion::Off).unwrap();
    restored.load_cache(&mut Cursor::new(&stream)).unwrap();

    assert_eq!(
        basis.states().unwrap().as_slice(),
        restored.states().unwrap().as_slice(),
    );

    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..10_000 {
        let x = rng.gen::<u64>() & ((1u64 << 20) - 1);
        match (basis.index(x), restored.index(x)) {
            (Ok(left), Ok(right)) => assert_eq!(left, right),
            (Err(BasisError::NotARepresentative), Err(BasisError::NotARepresentative)) => {}
            (left, right) => panic!("index disagreement at {x}: {left:?} vs {right:?}"),
        }
    }
}

// ========== Quantified invariants ==========

#[test]
fn representatives_never_exceed_the_input() {
    let basis = SpinBasis::new(translation_group(10), 10, None, SpinInversion::Off).unwrap();
    for x in 0..(1u64 << 10) {
        let info = basis.state_info_64(x).unwrap();
        assert!(info.representative <= x);
        // Representatives are fixed points.
        let again = basis.state_info_64(info.representative).unwrap();
        assert_eq!(again.representative, info.representative);
    }
}

#[test]
fn the_representative_list_is_strictly_increasing_and_indexable() {
    let basis = SpinBasis::new(translation_group(12), 12, Some(6), SpinInversion::Off).unwrap();
    basis.build().unwrap();
    let states = basis.states().unwrap();

    assert!(states.windows(2).all(|pair| pair[0] < pair[1]));
    for (position, &state) in states.iter().enumerate() {
        assert_eq!(basis.index(state).unwrap(), position as u64);
    }

    let members: BTreeSet<u64> = states.iter().copied().collect();
    for x in 0..(1u64 << 12) {
        if !members.contains(&x) {
            assert!(matches!(basis.index(x), Err(BasisError::NotARepresentative)));
        }
    }
}

#[test]
fn enumeration_matches_brute_force() {
    let cases: Vec<(Vec<Symmetry>, u32, Option<u32>, SpinInversion)> = vec![
        (translation_group(10), 10, None, SpinInversion::Off),
        (translation_group(12), 12, Some(6), SpinInversion::Off),
        (translation_group(8), 8, Some(4), SpinInversion::Even),
        (translation_group(8), 8, None, SpinInversion::Odd),
        (Vec::new(), 9, Some(4), SpinInversion::Off),
    ];
    for (group, number_spins, hamming_weight, inversion) in cases {
        let expected =
            brute_force_representatives(&group, number_spins, hamming_weight, inversion);
        let basis = SpinBasis::new(group, number_spins, hamming_weight, inversion).unwrap();
        basis.build().unwrap();
        assert_eq!(basis.states().unwrap().as_slice(), expected.as_slice());
    }
}

#[test]
fn enumeration_is_idempotent() {
    let basis = SpinBasis::new(translation_group(10), 10, None, SpinInversion::Off).unwrap();
    basis.build().unwrap();
    let first = basis.states().unwrap().to_vec();
    basis.build().unwrap();
    assert_eq!(basis.states().unwrap().as_slice(), first.as_slice());

    let rebuilt = SpinBasis::new(translation_group(10), 10, None, SpinInversion::Off).unwrap();
    rebuilt.build().unwrap();
    assert_eq!(rebuilt.states().unwrap().as_slice(), first.as_slice());
}

#[test]
fn representative_checks_agree_with_membership_inside_the_sector() {
    let basis = SpinBasis::new(translation_group(12), 12, Some(6), SpinInversion::Off).unwrap();
    basis.build().unwrap();
    let members: BTreeSet<u64> = basis.states().unwrap().iter().copied().collect();

    let sector: Vec<u64> = (0..(1u64 << 12)).filter(|x| x.count_ones() == 6).collect();
    let mask = basis.is_representative(&sector).unwrap();
    for (&x, &is_representative) in sector.iter().zip(&mask) {
        assert_eq!(is_representative, members.contains(&x));
        let info = basis.state_info_64(x).unwrap();
        assert_eq!(is_representative, info.representative == x && info.norm > 0.0);
    }
}

// ========== Boundaries ==========

#[test]
fn one_spin_and_no_symmetries() {
    let basis = SpinBasis::new(Vec::new(), 1, None, SpinInversion::Off).unwrap();
    basis.build().unwrap();
    assert_eq!(basis.states().unwrap().as_slice(), &[0, 1]);
    for x in 0..2u64 {
        let info = basis.state_info_64(x).unwrap();
        assert_eq!(info.representative, x);
        assert_eq!(info.character, Complex64::new(1.0, 0.0));
        assert_eq!(info.norm, 1.0);
    }
}

#[test]
fn empty_and_full_magnetization_sectors() {
    let empty = SpinBasis::new(Vec::new(), 6, Some(0), SpinInversion::Off).unwrap();
    empty.build().unwrap();
    assert_eq!(empty.states().unwrap().as_slice(), &[0]);

    let full = SpinBasis::new(Vec::new(), 6, Some(6), SpinInversion::Off).unwrap();
    full.build().unwrap();
    assert_eq!(full.states().unwrap().as_slice(), &[0b11_1111]);
}

#[test]
fn symmetry_reduction_shrinks_the_half_filled_sector() {
    // 12 spins at half filling under the full translation group: the basis
    // shrinks from C(12,6) = 924 raw states to the 80 binary necklaces.
    let basis = SpinBasis::new(translation_group(12), 12, Some(6), SpinInversion::Off).unwrap();
    basis.build().unwrap();
    assert_eq!(basis.number_states().unwrap(), 80);
}

// ========== Cache lifecycle details ==========

#[test]
fn build_unsafe_installs_a_trusted_list() {
    let reference = SpinBasis::new(translation_group(8), 8, None, SpinInversion::Off).unwrap();
    reference.build().unwrap();
    let states = reference.states().unwrap().to_vec();

    let basis = SpinBasis::new(translation_group(8), 8, None, SpinInversion::Off).unwrap();
    basis.build_unsafe(states.clone()).unwrap();
    assert_eq!(basis.states().unwrap().as_slice(), states.as_slice());
    for (position, &state) in states.iter().enumerate() {
        assert_eq!(basis.index(state).unwrap(), position as u64);
    }
}

#[test]
fn loading_into_a_built_basis_is_a_no_op() {
    let basis = SpinBasis::new(Vec::new(), 8, Some(4), SpinInversion::Off).unwrap();
    basis.build().unwrap();
    let before = basis.states().unwrap().to_vec();

    // The stream is not even inspected.
    basis.load_cache(&mut Cursor::new(b"garbage".to_vec())).unwrap();
    assert_eq!(basis.states().unwrap().as_slice(), before.as_slice());
}

#[test]
fn states_accessor_keeps_the_basis_alive() {
    let states = {
        let basis = SpinBasis::new(translation_group(8), 8, None, SpinInversion::Off).unwrap();
        basis.build().unwrap();
        basis.states().unwrap()
    };
    assert!(!states.is_empty());
    assert_eq!(states[0], 0);
}

#[test]
fn concurrent_builds_are_single_flight() {
    let basis = SpinBasis::new(translation_group(14), 14, None, SpinInversion::Off).unwrap();
    std::thread::scope(|scope| {
        for _ in 0..8 {
            let basis = basis.clone();
            scope.spawn(move || basis.build().unwrap());
        }
    });
    let states = basis.states().unwrap();
    assert!(states.windows(2).all(|pair| pair[0] < pair[1]));
}
