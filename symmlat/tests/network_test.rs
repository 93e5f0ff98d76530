use bitlat::Bits512;
use proptest::prelude::*;
use symmlat::{BigNetwork, Permutation, SmallNetwork};

proptest! {
    #[test]
    fn small_network_matches_direct_application(
        permutation in arbitrary_permutation(64),
        x in any::<u64>(),
    ) {
        let mask = if permutation.len() == 64 { u64::MAX } else { (1u64 << permutation.len()) - 1 };
        let x = x & mask;
        let network = SmallNetwork::compile(&permutation);
        prop_assert_eq!(network.apply(x), permutation.permute_word(x));
    }

    #[test]
    fn big_network_matches_direct_application(
        (permutation, state) in arbitrary_permutation(512).prop_flat_map(|p| {
            let len = p.len();
            (Just(p), prop::collection::vec(any::<bool>(), len))
        }),
    ) {
        let mut x = Bits512::zeros();
        for (index, &bit) in state.iter().enumerate() {
            if bit {
                x.set_bit(index as u32);
            }
        }
        let network = BigNetwork::compile(&permutation);
        prop_assert_eq!(network.apply(&x), permutation.permute_bits(&x));
    }

    #[test]
    fn network_depth_follows_width(permutation in arbitrary_permutation(64)) {
        let width = permutation.len().next_power_of_two();
        let expected = if width == 1 { 0 } else { 2 * width.trailing_zeros() as usize - 1 };
        prop_assert_eq!(SmallNetwork::compile(&permutation).depth(), expected);
    }

    #[test]
    fn periodicity_many_applications_is_identity(
        permutation in arbitrary_permutation(16),
        x in any::<u64>(),
    ) {
        let mask = (1u64 << permutation.len()) - 1;
        let x = x & mask;
        let network = SmallNetwork::compile(&permutation);
        let mut image = x;
        for _ in 0..permutation.periodicity() {
            image = network.apply(image);
        }
        prop_assert_eq!(image, x);
    }

    #[test]
    fn shift_schedule_is_shared_across_permutations(
        left in arbitrary_permutation_of_len(32),
        right in arbitrary_permutation_of_len(32),
    ) {
        let left = SmallNetwork::compile(&left);
        let right = SmallNetwork::compile(&right);
        prop_assert_eq!(left.depth(), right.depth());
        for layer in 0..left.depth() {
            prop_assert_eq!(left.shift(layer), right.shift(layer));
        }
    }
}

#[test]
fn identity_network_has_empty_masks() {
    let network = SmallNetwork::compile(&Permutation::identity(16));
    for layer in 0..network.depth() {
        assert_eq!(network.mask(layer), 0);
    }
    assert_eq!(network.apply(0xDEAD), 0xDEAD);
}

#[test]
fn single_site_network_is_trivial() {
    let network = SmallNetwork::compile(&Permutation::identity(1));
    assert_eq!(network.depth(), 0);
    assert_eq!(network.apply(1), 1);
}

#[test]
fn translation_moves_every_bit() {
    let network = SmallNetwork::compile(&Permutation::shift(12, 5));
    for site in 0..12u32 {
        assert_eq!(network.apply(1 << site), 1 << ((site + 5) % 12));
    }
}

fn arbitrary_permutation(max_len: usize) -> impl Strategy<Value = Permutation> {
    (1..=max_len).prop_flat_map(arbitrary_permutation_of_len)
}

fn arbitrary_permutation_of_len(len: usize) -> impl Strategy<Value = Permutation> {
    Just((0..len).collect::<Vec<usize>>())
        .prop_shuffle()
        .prop_map(|targets| Permutation::new(targets).unwrap())
}
