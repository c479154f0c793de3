//! Boundary layer between the packed sets and arbitrary values and collections.

use alloc::collections::{BTreeSet, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;

use num_traits::ToPrimitive;

/// A value that may or may not be a set element.
///
/// Integers of every width are candidates, whatever their magnitude; an
/// out-of-domain integer is a perfectly valid argument that is simply never
/// a member. Anything else (floats, text, `None`) cannot be an element and
/// maps to `None`.
pub trait Element {
    /// The value as an integer, or `None` if it is not one.
    fn index(&self) -> Option<i128>;
}

macro_rules! impl_element_for_integers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                #[inline]
                fn index(&self) -> Option<i128> {
                    // only u128 can exceed i128, and then it is far out of domain anyway
                    Some(self.to_i128().unwrap_or(i128::MAX))
                }
            }
        )*
    };
}

impl_element_for_integers!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! impl_element_for_foreign {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                #[inline]
                fn index(&self) -> Option<i128> {
                    None
                }
            }
        )*
    };
}

impl_element_for_foreign!(f32, f64, bool, char, str, String);

impl<T: Element> Element for Option<T> {
    #[inline]
    fn index(&self) -> Option<i128> {
        self.as_ref().and_then(Element::index)
    }
}

impl<T: Element + ?Sized> Element for &T {
    #[inline]
    fn index(&self) -> Option<i128> {
        (**self).index()
    }
}

/// Anything a set can take as the argument of a bulk operation.
///
/// Packed sets and their views answer [`packed`](Collection::packed) with
/// their effective word, which unlocks the constant-time paths. Every other
/// collection is read element by element.
pub trait Collection {
    /// The effective word, when the collection is bit-backed.
    fn packed(&self) -> Option<u64> {
        None
    }

    /// Number of entries, duplicates included.
    fn size(&self) -> usize;

    /// Every entry classified through [`Element::index`].
    fn entries(&self) -> impl Iterator<Item = Option<i128>> + '_;

    /// Returns `true` if some entry is the integer `value`.
    fn contains_index(&self, value: i128) -> bool {
        self.entries().any(|entry| entry == Some(value))
    }
}

impl<E: Element> Collection for [E] {
    fn size(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> impl Iterator<Item = Option<i128>> + '_ {
        self.iter().map(Element::index)
    }
}

impl<E: Element, const N: usize> Collection for [E; N] {
    fn size(&self) -> usize {
        N
    }

    fn entries(&self) -> impl Iterator<Item = Option<i128>> + '_ {
        self.iter().map(Element::index)
    }
}

impl<E: Element> Collection for Vec<E> {
    fn size(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> impl Iterator<Item = Option<i128>> + '_ {
        self.iter().map(Element::index)
    }
}

impl<E: Element> Collection for VecDeque<E> {
    fn size(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> impl Iterator<Item = Option<i128>> + '_ {
        self.iter().map(Element::index)
    }
}

impl<E: Element> Collection for BTreeSet<E> {
    fn size(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> impl Iterator<Item = Option<i128>> + '_ {
        self.iter().map(Element::index)
    }
}

#[cfg(feature = "std")]
impl<E: Element, S> Collection for std::collections::HashSet<E, S> {
    fn size(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> impl Iterator<Item = Option<i128>> + '_ {
        self.iter().map(Element::index)
    }
}

/// Order-independent hash code of any collection: the wrapping sum of its
/// distinct integer entries. Agrees with [`SortedSet::hash_code`](crate::SortedSet::hash_code)
/// for collections holding the same elements, repeated or not.
pub fn hash_code<C: Collection + ?Sized>(collection: &C) -> i64 {
    if let Some(packed) = collection.packed() {
        return packed_hash_code(packed);
    }
    collection
        .entries()
        .flatten()
        .collect::<BTreeSet<i128>>()
        .into_iter()
        .fold(0i64, |acc, value| acc.wrapping_add(value as i64))
}

pub(crate) fn packed_hash_code(word: u64) -> i64 {
    crate::bits::positions(word).fold(0i64, |acc, position| acc.wrapping_add(position as i64))
}
