#![no_std]
#![doc = include_str!("../README.md")]
//!
//! # Quick Start
//!
//! ```rust
//! use small_int_set::{SmallIntSet, SortedSet};
//!
//! let set = SmallIntSet::new();
//! set.insert(3).unwrap();
//! set.insert(42).unwrap();
//! set.insert(7).unwrap();
//!
//! assert_eq!(set.len(), 3);
//! assert!(set.contains(42));
//! assert!(!set.contains(100)); // out of domain, never a member
//!
//! // Members come out in ascending order
//! assert_eq!(set.to_vec(), vec![3, 7, 42]);
//! assert_eq!(set.first(), Ok(3));
//! assert_eq!(set.last(), Ok(42));
//! ```
//!
//! # Range Views
//!
//! [`SmallIntSet::head_set`], [`SmallIntSet::tail_set`] and
//! [`SmallIntSet::sub_set`] return [`View`]s that share the set's word.
//! A view only ever sees and touches the positions in its range:
//!
//! ```rust
//! use small_int_set::{SmallIntSet, SortedSet};
//!
//! let set = SmallIntSet::try_from_iter([1, 5, 20]).unwrap();
//! let low = set.sub_set(1, 10).unwrap();
//!
//! assert_eq!(low.to_vec(), vec![1, 5]);
//! assert!(low.insert(20).is_err()); // fine for the set, outside the view
//!
//! low.insert(7).unwrap();
//! assert!(set.contains(7));
//!
//! low.clear();
//! assert_eq!(set.to_vec(), vec![20]);
//! ```
//!
//! # Value Semantics
//!
//! Equality and hashing agree with ordinary unordered collections:
//!
//! ```rust
//! use std::collections::{BTreeSet, HashSet};
//! use small_int_set::{element, SmallIntSet, SortedSet};
//!
//! let set = SmallIntSet::try_from_iter([9, 12]).unwrap();
//! let hashed: HashSet<i32> = [12, 9].into_iter().collect();
//! let sorted: BTreeSet<i32> = [9, 12].into_iter().collect();
//!
//! assert!(set == hashed);
//! assert!(set == sorted);
//! assert_eq!(set.hash_code(), element::hash_code(&hashed));
//! ```
//!
//! # Memory Footprint
//!
//! The whole set is one word:
//!
//! ```rust
//! use small_int_set::SmallIntSet;
//! use core::mem::size_of;
//!
//! assert_eq!(size_of::<SmallIntSet>(), size_of::<u64>());
//! ```

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod bits;
mod cursor;
pub mod element;
mod error;
mod small_int_set;
mod sorted_set;
mod view;

pub use cursor::Cursor;
pub use element::{Collection, Element};
pub use error::{Error, Result};
pub use small_int_set::SmallIntSet;
pub use sorted_set::SortedSet;
pub use view::{RangeView, View};

#[cfg(test)]
#[path = "tests/bits_tests.rs"]
mod bits_tests;

#[cfg(test)]
#[path = "tests/small_int_set_tests.rs"]
mod small_int_set_tests;

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod view_tests;

#[cfg(test)]
#[path = "tests/cursor_tests.rs"]
mod cursor_tests;
