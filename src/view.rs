//! Live range views over a [`SmallIntSet`].
//!
//! A view never stores members. It holds a reference to the set and a
//! contiguous mask; reads intersect the set's current word with the mask and
//! writes go straight to the set, restricted to the mask.

use core::fmt;
use core::hash::{Hash, Hasher};

use alloc::collections::BTreeSet;
use num_traits::PrimInt;
use tracing::trace;

use crate::bits::{self, head_mask, range_mask, tail_mask, END, MIN};
use crate::cursor::Cursor;
use crate::element::{Collection, Element};
use crate::error::{Error, Result};
use crate::small_int_set::SmallIntSet;
use crate::sorted_set::{widen, write_members, SortedSet};

/// Builds the view of `owner` covering `from..to`.
///
/// Prefixes and suffixes get their own variants so that narrower views can
/// be derived from them against the open end of the domain.
pub(crate) fn derive(owner: &SmallIntSet, from: i128, to: i128) -> Result<View<'_>> {
    check_bounds(MIN, END, from, to)?;
    let (from, to) = (from as u32, to as u32);
    let view = if from == to {
        View::Empty
    } else if from == MIN && to == END {
        View::Whole(owner)
    } else if from == MIN {
        View::Head(RangeView::new(owner, head_mask(to)))
    } else if to == END {
        View::Tail(RangeView::new(owner, tail_mask(from)))
    } else {
        View::Bounded(RangeView::new(owner, range_mask(from, to)))
    };
    trace!(from, to, kind = view.kind(), "derived view");
    Ok(view)
}

/// Accepts `from..to` only if `from` is a position in `start..end` and
/// `from <= to <= end`.
fn check_bounds(start: u32, end: u32, from: i128, to: i128) -> Result<()> {
    if start as i128 <= from && from < end as i128 && from <= to && to <= end as i128 {
        Ok(())
    } else {
        Err(Error::InvalidRange { from, to })
    }
}

/// A mask over a borrowed [`SmallIntSet`].
#[derive(Clone, Copy)]
pub struct RangeView<'a> {
    owner: &'a SmallIntSet,
    mask: u64,
}

impl<'a> RangeView<'a> {
    fn new(owner: &'a SmallIntSet, mask: u64) -> Self {
        debug_assert!(mask != 0, "range views are never empty");
        Self { owner, mask }
    }

    /// The set this view reads and writes.
    #[inline]
    pub fn owner(&self) -> &'a SmallIntSet {
        self.owner
    }

    /// First position covered by the mask.
    #[inline]
    pub fn start(&self) -> u32 {
        bits::index_of_single_bit(bits::lowest_bit(self.mask))
    }

    /// One past the last position covered by the mask.
    #[inline]
    pub fn end(&self) -> u32 {
        bits::index_of_single_bit(bits::highest_bit(self.mask)) + 1
    }

    fn check_within(&self, from: i128, to: i128) -> Result<()> {
        check_bounds(self.start(), self.end(), from, to)
    }
}

impl SortedSet for RangeView<'_> {
    #[inline]
    fn bits(&self) -> u64 {
        self.owner.bits() & self.mask
    }

    #[inline]
    fn mask(&self) -> u64 {
        self.mask
    }

    #[inline]
    fn update(&self, f: impl FnOnce(u64) -> u64) -> bool {
        let mask = self.mask;
        self.owner
            .update(|word| (word & !mask) | (f(word & mask) & mask))
    }
}

/// A live range of a [`SmallIntSet`], as returned by
/// [`sub_set`](SmallIntSet::sub_set), [`head_set`](SmallIntSet::head_set)
/// and [`tail_set`](SmallIntSet::tail_set).
///
/// Views are `Copy`; every copy aliases the same set. Inserting a value
/// outside the view's range fails even when the set itself would accept it.
///
/// # Examples
/// ```
/// use small_int_set::{SmallIntSet, SortedSet};
///
/// let set = SmallIntSet::try_from_iter([10, 11, 12, 13]).unwrap();
/// let view = set.sub_set(11, 13).unwrap();
///
/// view.remove(11);
/// assert_eq!(set.to_string(), "[10, 12, 13]");
///
/// set.remove(12);
/// assert!(view.is_empty());
/// ```
#[derive(Clone, Copy)]
pub enum View<'a> {
    /// An empty range. Holds nothing and accepts nothing.
    Empty,
    /// The whole domain: the set itself.
    Whole(&'a SmallIntSet),
    /// A prefix `0..to`.
    Head(RangeView<'a>),
    /// A suffix `from..64`.
    Tail(RangeView<'a>),
    /// A range closed at both ends.
    Bounded(RangeView<'a>),
}

impl<'a> View<'a> {
    fn kind(&self) -> &'static str {
        match self {
            View::Empty => "empty",
            View::Whole(_) => "whole",
            View::Head(_) => "head",
            View::Tail(_) => "tail",
            View::Bounded(_) => "bounded",
        }
    }

    /// The set behind this view, `None` for [`View::Empty`].
    pub fn owner(&self) -> Option<&'a SmallIntSet> {
        match self {
            View::Empty => None,
            View::Whole(owner) => Some(*owner),
            View::Head(range) | View::Tail(range) | View::Bounded(range) => Some(range.owner),
        }
    }

    /// View of the members in `from..to`, which must lie inside this view.
    ///
    /// # Errors
    /// [`Error::InvalidRange`] if `from..to` is reversed, not contained in
    /// this view's range, or `from` is not one of the view's positions.
    pub fn sub_set<I: PrimInt>(&self, from: I, to: I) -> Result<View<'a>> {
        let (from, to) = (widen(from), widen(to));
        match self {
            View::Empty => check_bounds(MIN, END, from, to).map(|()| View::Empty),
            View::Whole(owner) => derive(*owner, from, to),
            View::Head(range) | View::Tail(range) | View::Bounded(range) => {
                range.check_within(from, to)?;
                derive(range.owner, from, to)
            }
        }
    }

    /// View of the members below `to`, which must lie inside this view.
    ///
    /// # Errors
    /// [`Error::InvalidRange`] if `to` is outside this view's range.
    pub fn head_set<I: PrimInt>(&self, to: I) -> Result<View<'a>> {
        let to = widen(to);
        match self {
            View::Empty => check_bounds(MIN, END, MIN as i128, to).map(|()| View::Empty),
            View::Whole(owner) => derive(*owner, MIN as i128, to),
            View::Head(range) => {
                range.check_within(MIN as i128, to)?;
                derive(range.owner, MIN as i128, to)
            }
            View::Tail(range) | View::Bounded(range) => {
                let from = range.start() as i128;
                range.check_within(from, to)?;
                derive(range.owner, from, to)
            }
        }
    }

    /// View of the members at or above `from`, which must lie inside this view.
    ///
    /// # Errors
    /// [`Error::InvalidRange`] if `from` is not one of this view's positions.
    pub fn tail_set<I: PrimInt>(&self, from: I) -> Result<View<'a>> {
        let from = widen(from);
        match self {
            View::Empty => check_bounds(MIN, END, from, END as i128).map(|()| View::Empty),
            View::Whole(owner) => derive(*owner, from, END as i128),
            View::Tail(range) => {
                range.check_within(from, END as i128)?;
                derive(range.owner, from, END as i128)
            }
            View::Head(range) | View::Bounded(range) => {
                let to = range.end() as i128;
                range.check_within(from, to)?;
                derive(range.owner, from, to)
            }
        }
    }
}

impl SortedSet for View<'_> {
    #[inline]
    fn bits(&self) -> u64 {
        match self {
            View::Empty => 0,
            View::Whole(owner) => owner.bits(),
            View::Head(range) | View::Tail(range) | View::Bounded(range) => range.bits(),
        }
    }

    #[inline]
    fn mask(&self) -> u64 {
        match self {
            View::Empty => 0,
            View::Whole(owner) => owner.mask(),
            View::Head(range) | View::Tail(range) | View::Bounded(range) => range.mask(),
        }
    }

    #[inline]
    fn update(&self, f: impl FnOnce(u64) -> u64) -> bool {
        match self {
            View::Empty => false,
            View::Whole(owner) => owner.update(f),
            View::Head(range) | View::Tail(range) | View::Bounded(range) => range.update(f),
        }
    }
}

impl Collection for View<'_> {
    #[inline]
    fn packed(&self) -> Option<u64> {
        Some(self.bits())
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> impl Iterator<Item = Option<i128>> + '_ {
        bits::positions(self.bits()).map(|position| Some(position as i128))
    }

    fn contains_index(&self, value: i128) -> bool {
        bits::test_bit(self.bits(), value)
    }
}

impl PartialEq for View<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for View<'_> {}

impl PartialEq<SmallIntSet> for View<'_> {
    #[inline]
    fn eq(&self, other: &SmallIntSet) -> bool {
        self.bits() == other.bits()
    }
}

impl<E: Element> PartialEq<BTreeSet<E>> for View<'_> {
    fn eq(&self, other: &BTreeSet<E>) -> bool {
        self.set_eq(other)
    }
}

#[cfg(feature = "std")]
impl<E: Element, S> PartialEq<std::collections::HashSet<E, S>> for View<'_> {
    fn eq(&self, other: &std::collections::HashSet<E, S>) -> bool {
        self.set_eq(other)
    }
}

impl Hash for View<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(self.hash_code());
    }
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_members(self.bits(), f)
    }
}

impl fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("kind", &self.kind())
            .field("mask", &format_args!("{:#018x}", self.mask()))
            .field("members", &format_args!("{self}"))
            .finish()
    }
}

impl<'v, 'a> IntoIterator for &'v View<'a> {
    type Item = u8;
    type IntoIter = Cursor<'v, View<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
