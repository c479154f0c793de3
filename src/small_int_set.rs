use core::cell::Cell;
use core::fmt;
use core::hash::{Hash, Hasher};

use alloc::collections::BTreeSet;
use num_traits::PrimInt;

use crate::bits::{self, positions, test_bit, END, MIN};
use crate::cursor::Cursor;
use crate::element::{Collection, Element};
use crate::error::Result;
use crate::sorted_set::{widen, write_members, SortedSet};
use crate::view::{self, View};

/// An ordered set of the integers `0..=63`, stored in a single `u64`.
///
/// The set owns its word in a [`Cell`], so every operation takes `&self`.
/// This is what lets any number of [`View`]s borrow the set and insert or
/// remove through it while the set itself stays usable: all of them read
/// and write the same word, and each change is visible everywhere at once.
/// The `Cell` also makes the set `!Sync`; wrap it in a lock to share it
/// between threads.
///
/// Membership, insertion and removal run in constant time, as do the bulk
/// operations when their argument is another packed set or view.
/// [`first`](SortedSet::first) and [`last`](SortedSet::last) are logarithmic.
///
/// # Examples
/// ```
/// use small_int_set::{SmallIntSet, SortedSet};
///
/// let set = SmallIntSet::new();
/// set.insert(9).unwrap();
/// set.insert(12).unwrap();
/// assert!(set.insert(64).is_err());
///
/// assert_eq!(set.first(), Ok(9));
/// assert_eq!(set.to_string(), "[9, 12]");
/// ```
#[derive(Clone, Default)]
pub struct SmallIntSet {
    word: Cell<u64>,
}

impl SmallIntSet {
    /// Smallest value the set can hold.
    pub const MIN_VALUE: u8 = bits::MIN as u8;

    /// Largest value the set can hold.
    pub const MAX_VALUE: u8 = bits::MAX as u8;

    /// Creates an empty set.
    #[inline]
    pub const fn new() -> Self {
        Self::from_bits(0)
    }

    /// Creates a set whose members are the set bits of `word`.
    #[inline]
    pub const fn from_bits(word: u64) -> Self {
        Self {
            word: Cell::new(word),
        }
    }

    /// Creates a set holding every value of `iter`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`](crate::Error::OutOfRange) for the first value outside `0..=63`.
    pub fn try_from_iter<I, T>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: PrimInt,
    {
        let set = Self::new();
        for value in iter {
            set.insert(value)?;
        }
        Ok(set)
    }

    /// Returns `true` if `value` lies in `0..=63`.
    #[inline]
    pub fn supports<I: PrimInt>(value: I) -> bool {
        bits::is_supported(widen(value))
    }

    /// View of the members in `from..to`.
    ///
    /// The whole domain yields [`View::Whole`], an empty range
    /// [`View::Empty`].
    ///
    /// # Errors
    /// [`Error::InvalidRange`](crate::Error::InvalidRange) if `from` lies outside `0..=63`,
    /// `to` outside `0..=64`, or `from > to`.
    pub fn sub_set<I: PrimInt>(&self, from: I, to: I) -> Result<View<'_>> {
        view::derive(self, widen(from), widen(to))
    }

    /// View of the members below `to`.
    ///
    /// # Errors
    /// [`Error::InvalidRange`](crate::Error::InvalidRange) if `to` lies outside `0..=64`.
    pub fn head_set<I: PrimInt>(&self, to: I) -> Result<View<'_>> {
        view::derive(self, MIN as i128, widen(to))
    }

    /// View of the members at or above `from`.
    ///
    /// # Errors
    /// [`Error::InvalidRange`](crate::Error::InvalidRange) if `from` lies outside `0..=63`.
    pub fn tail_set<I: PrimInt>(&self, from: I) -> Result<View<'_>> {
        view::derive(self, widen(from), END as i128)
    }
}

impl SortedSet for SmallIntSet {
    #[inline]
    fn bits(&self) -> u64 {
        self.word.get()
    }

    #[inline]
    fn mask(&self) -> u64 {
        bits::FULL
    }

    #[inline]
    fn update(&self, f: impl FnOnce(u64) -> u64) -> bool {
        let before = self.word.get();
        let after = f(before);
        self.word.set(after);
        before != after
    }
}

impl Collection for SmallIntSet {
    #[inline]
    fn packed(&self) -> Option<u64> {
        Some(self.bits())
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> impl Iterator<Item = Option<i128>> + '_ {
        positions(self.bits()).map(|position| Some(position as i128))
    }

    fn contains_index(&self, value: i128) -> bool {
        test_bit(self.bits(), value)
    }
}

impl PartialEq for SmallIntSet {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for SmallIntSet {}

impl PartialEq<View<'_>> for SmallIntSet {
    #[inline]
    fn eq(&self, other: &View<'_>) -> bool {
        self.bits() == other.bits()
    }
}

impl<E: Element> PartialEq<BTreeSet<E>> for SmallIntSet {
    fn eq(&self, other: &BTreeSet<E>) -> bool {
        self.set_eq(other)
    }
}

#[cfg(feature = "std")]
impl<E: Element, S> PartialEq<std::collections::HashSet<E, S>> for SmallIntSet {
    fn eq(&self, other: &std::collections::HashSet<E, S>) -> bool {
        self.set_eq(other)
    }
}

impl Hash for SmallIntSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(self.hash_code());
    }
}

impl fmt::Display for SmallIntSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_members(self.bits(), f)
    }
}

impl fmt::Debug for SmallIntSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a SmallIntSet {
    type Item = u8;
    type IntoIter = Cursor<'a, SmallIntSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
