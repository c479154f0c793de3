extern crate alloc;
extern crate std;

use crate::{element, Error, SmallIntSet, SortedSet, View};
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;
use std::collections::HashSet;

fn set_of(values: &[i32]) -> SmallIntSet {
    SmallIntSet::try_from_iter(values.iter().copied()).unwrap()
}

fn full() -> SmallIntSet {
    SmallIntSet::try_from_iter(0..=63).unwrap()
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_view_kinds() {
    let set = SmallIntSet::new();
    assert!(matches!(set.sub_set(5, 5), Ok(View::Empty)));
    assert!(matches!(set.sub_set(0, 64), Ok(View::Whole(_))));
    assert!(matches!(set.sub_set(0, 10), Ok(View::Head(_))));
    assert!(matches!(set.sub_set(10, 64), Ok(View::Tail(_))));
    assert!(matches!(set.sub_set(10, 20), Ok(View::Bounded(_))));
    assert!(matches!(set.head_set(64), Ok(View::Whole(_))));
    assert!(matches!(set.tail_set(0), Ok(View::Whole(_))));
}

#[test]
fn test_range_view_bounds() {
    let set = SmallIntSet::new();
    match set.sub_set(11, 13).unwrap() {
        View::Bounded(range) => {
            assert_eq!(range.start(), 11);
            assert_eq!(range.end(), 13);
            assert_eq!(range.mask(), 0b11 << 11);
            assert!(core::ptr::eq(range.owner(), &set));
        }
        _ => panic!("expected a bounded view"),
    }
    match set.tail_set(60).unwrap() {
        View::Tail(range) => assert_eq!((range.start(), range.end()), (60, 64)),
        _ => panic!("expected a tail view"),
    }
}

#[test]
fn test_whole_view_is_the_owner() {
    let set = set_of(&[1, 2]);
    let view = set.head_set(64).unwrap();
    let owner = view.owner().unwrap();
    assert!(core::ptr::eq(owner, &set));
}

#[test]
fn test_invalid_bounds() {
    let set = SmallIntSet::new();
    assert_eq!(
        set.sub_set(-1, 5).map(|v| v.len()),
        Err(Error::InvalidRange { from: -1, to: 5 })
    );
    assert!(set.sub_set(0, 65).is_err());
    assert!(set.sub_set(10, 5).is_err());
    assert!(set.head_set(65).is_err());
    assert!(set.head_set(-1).is_err());
    assert!(set.tail_set(65).is_err());
    assert!(set.tail_set(-1).is_err());
}

#[test]
fn test_empty_sub_set() {
    let set = set_of(&[1]);
    let empty = set.sub_set(1, 1).unwrap();
    assert_eq!(empty.len(), 0);
    assert!(!empty.contains(1));
    assert_eq!(empty.insert(1), Err(Error::OutOfRange(1)));
    assert!(!empty.remove(1));
    assert_eq!(empty.first(), Err(Error::Empty));
    assert!(empty.owner().is_none());

    let single = set.sub_set(1, 2).unwrap();
    assert_eq!(single.len(), 1);
    assert!(single.contains(1));
}

// =============================================================================
// Head / Tail Tests
// =============================================================================

#[test]
fn test_head_set() {
    let set = set_of(&[1, 3, 5]);
    assert_eq!(set.head_set(6).unwrap().to_vec(), vec![1, 3, 5]);
    assert_eq!(set.head_set(5).unwrap().to_vec(), vec![1, 3]);
    assert_eq!(set.head_set(2).unwrap().to_vec(), vec![1]);
    assert!(set.head_set(0).unwrap().is_empty());
}

#[test]
fn test_head_set_edge_cases() {
    let set = full();
    assert_eq!(set.head_set(1).unwrap().len(), 1);
    assert_eq!(set.head_set(63).unwrap().len(), 63);
    assert_eq!(set.head_set(64).unwrap().len(), 64);
}

#[test]
fn test_tail_set() {
    let set = set_of(&[1, 3, 5]);
    assert_eq!(set.tail_set(1).unwrap().to_vec(), vec![1, 3, 5]);
    assert_eq!(set.tail_set(2).unwrap().to_vec(), vec![3, 5]);
    assert_eq!(set.tail_set(5).unwrap().to_vec(), vec![5]);
    assert_eq!(set.tail_set(63).unwrap().to_vec(), Vec::<u8>::new());
}

#[test]
fn test_lower_bound_must_be_a_position() {
    let set = full();
    assert_eq!(
        set.tail_set(64).map(|v| v.len()),
        Err(Error::InvalidRange { from: 64, to: 64 })
    );
    assert_eq!(
        set.sub_set(64, 64).map(|v| v.len()),
        Err(Error::InvalidRange { from: 64, to: 64 })
    );
    assert!(matches!(set.sub_set(63, 63), Ok(View::Empty)));
    assert!(matches!(set.head_set(0), Ok(View::Empty)));

    let view = set.sub_set(1, 10).unwrap();
    assert_eq!(
        view.sub_set(10, 10).map(|v| v.len()),
        Err(Error::InvalidRange { from: 10, to: 10 })
    );
    assert!(view.tail_set(10).is_err());
    assert!(matches!(view.sub_set(9, 9), Ok(View::Empty)));
    assert_eq!(view.tail_set(9).unwrap().to_vec(), vec![9]);

    let empty = set.sub_set(7, 7).unwrap();
    assert!(empty.tail_set(64).is_err());
    assert!(matches!(empty.tail_set(63), Ok(View::Empty)));
}

#[test]
fn test_tail_set_edge_cases() {
    let set = full();
    assert_eq!(set.tail_set(1).unwrap().len(), 63);
    assert_eq!(set.tail_set(63).unwrap().len(), 1);
    assert_eq!(set.tail_set(0).unwrap().len(), 64);
}

#[test]
fn test_first_and_last_of_views() {
    let set = set_of(&[2, 10, 20, 40]);
    let view = set.sub_set(5, 30).unwrap();
    assert_eq!(view.first(), Ok(10));
    assert_eq!(view.last(), Ok(20));
    assert_eq!(set.sub_set(21, 39).unwrap().first(), Err(Error::Empty));
    assert_eq!(set.sub_set(21, 39).unwrap().last(), Err(Error::Empty));
}

// =============================================================================
// Shared Mutation Tests
// =============================================================================

#[test]
fn test_mutation_visible_both_ways() {
    let set = set_of(&[10, 11, 12, 13]);
    let view = set.sub_set(11, 13).unwrap();
    assert_eq!(view.to_vec(), vec![11, 12]);

    assert!(view.remove(11));
    assert_eq!(set.to_vec(), vec![10, 12, 13]);

    assert!(set.remove(12));
    assert!(view.is_empty());
    assert_eq!(view.to_string(), "[]");
}

#[test]
fn test_sibling_views_share_the_word() {
    let set = SmallIntSet::new();
    let low = set.head_set(32).unwrap();
    let wide = set.sub_set(16, 48).unwrap();

    low.insert(20).unwrap();
    assert!(wide.contains(20));
    assert!(set.contains(20));

    wide.clear();
    assert!(low.is_empty());
    assert!(set.is_empty());
}

#[test]
fn test_clear_sub_set() {
    let set = set_of(&[10, 11, 12, 13]);
    set.sub_set(11, 13).unwrap().clear();
    assert_eq!(set.to_vec(), vec![10, 13]);
}

#[test]
fn test_clear_only_removes_within_mask() {
    let set = full();
    set.sub_set(1, 63).unwrap().clear();
    assert_eq!(set.to_vec(), vec![0, 63]);
}

#[test]
fn test_insert_outside_view_fails() {
    let set = SmallIntSet::new();
    let view = set.sub_set(1, 10).unwrap();

    assert_eq!(view.insert(20), Err(Error::OutOfRange(20)));
    assert_eq!(view.insert(0), Err(Error::OutOfRange(0)));
    assert_eq!(view.insert(10), Err(Error::OutOfRange(10)));
    assert!(set.is_empty());

    assert_eq!(view.insert(5), Ok(true));
    assert!(set.contains(5));
}

#[test]
fn test_remove_outside_view_is_false() {
    let set = set_of(&[5, 20]);
    let view = set.sub_set(1, 10).unwrap();
    assert!(!view.remove(20));
    assert!(set.contains(20));
    assert!(!view.contains(20));
}

#[test]
fn test_view_bulk_operations_stay_in_range() {
    let set = set_of(&[1, 5, 20]);
    let view = set.sub_set(1, 10).unwrap();

    assert!(view.retain_all(&[5]));
    assert_eq!(set.to_vec(), vec![5, 20]);

    assert_eq!(view.remove_all(&[5, 20]), Ok(true));
    assert_eq!(set.to_vec(), vec![20]);

    assert_eq!(view.insert_all(&[2, 30]), Err(Error::OutOfRange(30)));
    assert_eq!(view.insert_all(&set_of(&[30])), Err(Error::OutOfRange(30)));
    assert_eq!(set.to_vec(), vec![20]);

    assert_eq!(view.insert_all(&set_of(&[2, 3])), Ok(true));
    assert_eq!(set.to_vec(), vec![2, 3, 20]);

    assert!(view.remove_if(|i| i == 3));
    assert_eq!(set.to_vec(), vec![2, 20]);
}

#[test]
fn test_view_as_bulk_argument() {
    let source = set_of(&[1, 2, 40, 50]);
    let low = source.head_set(10).unwrap();

    let target = SmallIntSet::new();
    assert_eq!(target.insert_all(&low), Ok(true));
    assert_eq!(target.to_vec(), vec![1, 2]);
    assert_eq!(source.contains_all(&low), Ok(true));
}

// =============================================================================
// Nested View Tests
// =============================================================================

#[test]
fn test_sub_set_of_sub_set() {
    let set = set_of(&[1, 2, 3]);
    let outer = set.sub_set(1, 3).unwrap();
    let inner = outer.sub_set(2, 3).unwrap();

    assert_eq!(inner.to_vec(), vec![2]);
    assert_eq!(inner.insert(3), Err(Error::OutOfRange(3)));
    assert_eq!(inner.insert(0), Err(Error::OutOfRange(0)));
    assert_eq!(inner.insert(1), Err(Error::OutOfRange(1)));

    assert!(outer.sub_set(0, 3).is_err());
    assert!(outer.sub_set(1, 4).is_err());
    assert!(outer.sub_set(2, 1).is_err());
}

#[test]
fn test_head_set_of_views() {
    let set = full();
    let head = set.head_set(20).unwrap();
    let narrower = head.head_set(10).unwrap();
    assert!(matches!(narrower, View::Head(_)));
    assert_eq!(narrower.len(), 10);
    assert!(head.head_set(21).is_err());

    let bounded = set.sub_set(5, 20).unwrap();
    let bounded_head = bounded.head_set(10).unwrap();
    assert!(matches!(bounded_head, View::Bounded(_)));
    assert_eq!(bounded_head.to_vec(), (5..10).collect::<Vec<u8>>());
    assert!(bounded.head_set(21).is_err());
    assert!(bounded.head_set(4).is_err());

    let tail = set.tail_set(30).unwrap();
    assert_eq!(tail.head_set(40).unwrap().to_vec(), (30..40).collect::<Vec<u8>>());
    assert!(tail.head_set(64).unwrap().set_eq(&tail));
}

#[test]
fn test_tail_set_of_views() {
    let set = full();
    let tail = set.tail_set(40).unwrap();
    let narrower = tail.tail_set(50).unwrap();
    assert!(matches!(narrower, View::Tail(_)));
    assert_eq!(narrower.len(), 14);
    assert!(tail.tail_set(39).is_err());

    let bounded = set.sub_set(5, 20).unwrap();
    let bounded_tail = bounded.tail_set(15).unwrap();
    assert!(matches!(bounded_tail, View::Bounded(_)));
    assert_eq!(bounded_tail.to_vec(), (15..20).collect::<Vec<u8>>());
    assert!(bounded.tail_set(4).is_err());

    let head = set.head_set(10).unwrap();
    assert_eq!(head.tail_set(5).unwrap().to_vec(), vec![5, 6, 7, 8, 9]);
    assert!(head.tail_set(0).unwrap().set_eq(&head));
}

#[test]
fn test_views_of_whole_and_empty() {
    let set = full();
    let whole = set.sub_set(0, 64).unwrap();
    assert_eq!(whole.sub_set(3, 5).unwrap().to_vec(), vec![3, 4]);

    let empty = set.sub_set(7, 7).unwrap();
    assert!(empty.sub_set(0, 64).unwrap().is_empty());
    assert!(empty.head_set(65).is_err());
}

#[test]
fn test_nested_view_writes_reach_owner() {
    let set = SmallIntSet::new();
    let inner = set.sub_set(10, 30).unwrap().tail_set(20).unwrap();
    inner.insert(25).unwrap();
    assert_eq!(set.to_vec(), vec![25]);
}

// =============================================================================
// Equality, Hashing and Formatting Tests
// =============================================================================

#[test]
fn test_sub_set_equals_same_type() {
    let set = set_of(&[10, 11, 12, 13]);
    let view = set.sub_set(11, 13).unwrap();
    let equal = set_of(&[11, 12]);

    assert_eq!(equal, view);
    assert_eq!(view, equal);
    assert_eq!(view, view);
}

#[test]
fn test_sub_set_equals_sub_set() {
    let first = set_of(&[10, 11, 12]);
    let second = set_of(&[11, 12, 13]);
    assert_eq!(first.sub_set(11, 13).unwrap(), second.sub_set(11, 13).unwrap());

    let third = set_of(&[11, 12, 13, 14]);
    assert_ne!(first.sub_set(11, 13).unwrap(), third.sub_set(11, 14).unwrap());
}

#[test]
fn test_sub_set_equals_other_sets() {
    let set = set_of(&[10, 11, 12]);
    let view = set.sub_set(11, 13).unwrap();

    let matching: HashSet<i32> = [11, 12].into_iter().collect();
    let too_many: HashSet<i32> = [10, 11, 12].into_iter().collect();
    let sorted: BTreeSet<u8> = [11, 12].into_iter().collect();

    assert!(view == matching);
    assert!(view != too_many);
    assert!(view == sorted);
    assert_eq!(view.hash_code(), element::hash_code(&matching));
}

#[test]
fn test_view_display_and_debug() {
    let set = set_of(&[10, 11, 12, 13]);
    let view = set.sub_set(11, 13).unwrap();
    assert_eq!(view.to_string(), "[11, 12]");

    let debug = format!("{:?}", view);
    assert!(debug.contains("View"));
    assert!(debug.contains("bounded"));
    assert!(debug.contains("[11, 12]"));
}

#[test]
fn test_view_comparator() {
    let set = SmallIntSet::new();
    assert!(set.sub_set(0, 11).unwrap().comparator().is_none());
}

// =============================================================================
// Property-Based Tests
// =============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sub_set_matches_btree_range(word in any::<u64>(), from in 0u8..64, len in 0u8..=64) {
            let to = from.saturating_add(len).min(64);
            let set = SmallIntSet::from_bits(word);
            let model: BTreeSet<u8> = set.to_vec().into_iter().collect();

            let view = set.sub_set(from, to).unwrap();
            let expected: Vec<u8> = model.range(from..to).copied().collect();
            prop_assert_eq!(view.to_vec(), expected.clone());
            prop_assert_eq!(view.len(), expected.len());
            for value in 0u8..64 {
                prop_assert_eq!(view.is_supported(value), value >= from && value < to);
            }
        }

        #[test]
        fn view_writes_never_leak(word in any::<u64>(), from in 0u8..64, len in 1u8..=64, value in 0u8..64) {
            let to = from.saturating_add(len).min(64);
            let set = SmallIntSet::from_bits(word);
            let view = set.sub_set(from, to).unwrap();
            let outside = word & !view.mask();

            let _ = view.insert(value);
            view.remove(value.wrapping_add(1) % 64);
            view.retain_all(&[value]);
            prop_assert_eq!(set.bits() & !view.mask(), outside);
        }
    }
}
