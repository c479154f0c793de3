use core::cmp::Ordering;
use core::fmt;

use alloc::vec::Vec;
use num_traits::PrimInt;
use tracing::trace;

use crate::bits::{self, bit, is_supported_in, popcount, positions, test_bit};
use crate::cursor::Cursor;
use crate::element::{packed_hash_code, Collection, Element};
use crate::error::{Error, Result};

/// Widens any primitive integer without truncating it into the domain.
#[inline]
pub(crate) fn widen<I: PrimInt>(value: I) -> i128 {
    value.to_i128().unwrap_or(i128::MAX)
}

/// An ordered set of integers in `0..=63` backed by a single word.
///
/// Implementors provide three primitives: the effective membership word,
/// the mask of positions they may hold, and an update that writes back only
/// inside that mask. Everything else is derived from them, so the owner and
/// every view share one implementation of the collection contract.
pub trait SortedSet {
    /// The effective membership word.
    fn bits(&self) -> u64;

    /// Positions this set may hold.
    fn mask(&self) -> u64;

    /// Replaces the members inside the mask with `f(bits)`, restricted to the
    /// mask. Returns `true` if the backing word changed.
    fn update(&self, f: impl FnOnce(u64) -> u64) -> bool;

    /// Number of members.
    #[inline]
    fn len(&self) -> usize {
        popcount(self.bits()) as usize
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.bits() == 0
    }

    /// Returns `true` if `value` may be inserted into this set.
    #[inline]
    fn is_supported<I: PrimInt>(&self, value: I) -> bool {
        is_supported_in(self.mask(), widen(value))
    }

    /// Returns `true` if `value` is a member. Never fails, whatever the value.
    #[inline]
    fn contains<I: PrimInt>(&self, value: I) -> bool {
        test_bit(self.bits(), widen(value))
    }

    /// Inserts `value`, returning `true` if it was not yet a member.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `value` is outside the range this set covers.
    #[inline]
    fn insert<I: PrimInt>(&self, value: I) -> Result<bool> {
        insert_index(self, widen(value))
    }

    /// Removes `value`, returning `true` if it was a member. Values outside
    /// the covered range are simply not members.
    #[inline]
    fn remove<I: PrimInt>(&self, value: I) -> bool {
        remove_index(self, widen(value))
    }

    /// [`contains`](SortedSet::contains) for a value of unknown kind.
    ///
    /// # Errors
    /// [`Error::NotAnInteger`] if `value` cannot be an element.
    fn contains_element<E: Element + ?Sized>(&self, value: &E) -> Result<bool> {
        let index = value.index().ok_or(Error::NotAnInteger)?;
        Ok(test_bit(self.bits(), index))
    }

    /// [`insert`](SortedSet::insert) for a value of unknown kind.
    ///
    /// # Errors
    /// [`Error::NotAnInteger`] if `value` cannot be an element,
    /// [`Error::OutOfRange`] if it is an integer outside the covered range.
    fn insert_element<E: Element + ?Sized>(&self, value: &E) -> Result<bool> {
        let index = value.index().ok_or(Error::NotAnInteger)?;
        insert_index(self, index)
    }

    /// [`remove`](SortedSet::remove) for a value of unknown kind.
    ///
    /// # Errors
    /// [`Error::NotAnInteger`] if `value` cannot be an element.
    fn remove_element<E: Element + ?Sized>(&self, value: &E) -> Result<bool> {
        let index = value.index().ok_or(Error::NotAnInteger)?;
        Ok(remove_index(self, index))
    }

    /// Removes every member.
    #[inline]
    fn clear(&self) {
        self.update(|_| 0);
    }

    /// The smallest member, in logarithmic time.
    ///
    /// # Errors
    /// [`Error::Empty`] if there are no members.
    fn first(&self) -> Result<u8> {
        match self.bits() {
            0 => Err(Error::Empty),
            word => Ok(bits::index_of_single_bit(bits::lowest_bit(word)) as u8),
        }
    }

    /// The largest member, in logarithmic time.
    ///
    /// # Errors
    /// [`Error::Empty`] if there are no members.
    fn last(&self) -> Result<u8> {
        match self.bits() {
            0 => Err(Error::Empty),
            word => Ok(bits::index_of_single_bit(bits::highest_bit(word)) as u8),
        }
    }

    /// Inserts every element of `other`.
    ///
    /// Constant time when `other` is bit-backed. Otherwise every entry is
    /// validated before the word is touched, so on error nothing changes.
    ///
    /// # Errors
    /// [`Error::NotAnInteger`] or [`Error::OutOfRange`] for the first entry
    /// that cannot be inserted.
    fn insert_all<C: Collection + ?Sized>(&self, other: &C) -> Result<bool> {
        let mask = self.mask();
        let incoming = match other.packed() {
            Some(packed) => {
                trace!(path = "packed", "insert_all");
                let outside = packed & !mask;
                if outside != 0 {
                    let position = bits::index_of_single_bit(bits::lowest_bit(outside));
                    return Err(Error::OutOfRange(position as i128));
                }
                packed
            }
            None => {
                trace!(path = "elements", size = other.size(), "insert_all");
                let mut word = 0;
                for entry in other.entries() {
                    let index = entry.ok_or(Error::NotAnInteger)?;
                    if !is_supported_in(mask, index) {
                        return Err(Error::OutOfRange(index));
                    }
                    word |= bit(index as u32);
                }
                word
            }
        };
        Ok(self.update(|word| word | incoming))
    }

    /// Keeps only the members also present in `other`.
    fn retain_all<C: Collection + ?Sized>(&self, other: &C) -> bool {
        match other.packed() {
            Some(packed) => {
                trace!(path = "packed", "retain_all");
                self.update(|word| word & packed)
            }
            None => {
                trace!(path = "elements", size = other.size(), "retain_all");
                self.update(|word| {
                    positions(word)
                        .filter(|&position| other.contains_index(position as i128))
                        .fold(0, |kept, position| kept | bit(position))
                })
            }
        }
    }

    /// Removes every member present in `other`.
    ///
    /// # Errors
    /// [`Error::NotAnInteger`] if a generic `other` holds a non-integer
    /// entry; nothing is removed in that case.
    fn remove_all<C: Collection + ?Sized>(&self, other: &C) -> Result<bool> {
        let outgoing = match other.packed() {
            Some(packed) => {
                trace!(path = "packed", "remove_all");
                packed
            }
            None => {
                trace!(path = "elements", size = other.size(), "remove_all");
                let mask = self.mask();
                let mut word = 0;
                for entry in other.entries() {
                    let index = entry.ok_or(Error::NotAnInteger)?;
                    if is_supported_in(mask, index) {
                        word |= bit(index as u32);
                    }
                }
                word
            }
        };
        Ok(self.update(|word| word & !outgoing))
    }

    /// Returns `true` if every element of `other` is a member.
    ///
    /// # Errors
    /// [`Error::NotAnInteger`] if a generic `other` holds a non-integer
    /// entry before the first missing one.
    fn contains_all<C: Collection + ?Sized>(&self, other: &C) -> Result<bool> {
        let word = self.bits();
        if let Some(packed) = other.packed() {
            return Ok(word & packed == packed);
        }
        for entry in other.entries() {
            let index = entry.ok_or(Error::NotAnInteger)?;
            if !test_bit(word, index) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Structural equality against any collection.
    ///
    /// Bit-backed collections compare words. Anything else is folded into a
    /// word first, so repeated entries count once; a non-integer or
    /// out-of-domain entry makes the two unequal instead of failing.
    fn set_eq<C: Collection + ?Sized>(&self, other: &C) -> bool {
        let word = self.bits();
        if let Some(packed) = other.packed() {
            return word == packed;
        }
        let mut folded = 0;
        for entry in other.entries() {
            match entry {
                Some(index) if bits::is_supported(index) => folded |= bit(index as u32),
                _ => return false,
            }
        }
        word == folded
    }

    /// Sum of all members, the same value [`element::hash_code`](crate::element::hash_code)
    /// gives for any collection holding the same elements in any order.
    fn hash_code(&self) -> i64 {
        packed_hash_code(self.bits())
    }

    /// Calls `action` on every member in ascending order.
    fn for_each<F: FnMut(u8)>(&self, mut action: F) {
        positions(self.bits()).for_each(|position| action(position as u8));
    }

    /// Removes every member `predicate` accepts.
    fn remove_if<F: FnMut(u8) -> bool>(&self, mut predicate: F) -> bool {
        self.update(|word| {
            positions(word)
                .filter(|&position| predicate(position as u8))
                .fold(word, |kept, position| kept & !bit(position))
        })
    }

    /// Keeps only the members `predicate` accepts.
    fn retain<F: FnMut(u8) -> bool>(&self, mut predicate: F) -> bool {
        self.remove_if(|value| !predicate(value))
    }

    /// Members in ascending order.
    fn to_vec(&self) -> Vec<u8> {
        positions(self.bits()).map(|position| position as u8).collect()
    }

    /// Writes the members into `buf` if it is long enough, otherwise returns
    /// a fresh vector.
    ///
    /// When `buf` is longer than the set, the slot after the last member is
    /// set to `None`; the slots behind it keep their contents.
    fn to_array_in(&self, mut buf: Vec<Option<u8>>) -> Vec<Option<u8>> {
        let word = self.bits();
        let size = popcount(word) as usize;
        if buf.len() < size {
            return positions(word).map(|position| Some(position as u8)).collect();
        }
        for (slot, position) in buf.iter_mut().zip(positions(word)) {
            *slot = Some(position as u8);
        }
        if buf.len() > size {
            buf[size] = None;
        }
        buf
    }

    /// Always `None`: members are kept in natural numeric order.
    #[inline]
    fn comparator(&self) -> Option<fn(&u8, &u8) -> Ordering> {
        None
    }

    /// A cursor starting at the smallest member.
    #[inline]
    fn iter(&self) -> Cursor<'_, Self>
    where
        Self: Sized,
    {
        Cursor::new(self)
    }
}

fn insert_index<S: SortedSet + ?Sized>(set: &S, index: i128) -> Result<bool> {
    if !is_supported_in(set.mask(), index) {
        return Err(Error::OutOfRange(index));
    }
    Ok(set.update(|word| word | bit(index as u32)))
}

fn remove_index<S: SortedSet + ?Sized>(set: &S, index: i128) -> bool {
    if !is_supported_in(set.mask(), index) {
        return false;
    }
    set.update(|word| word & !bit(index as u32))
}

/// Renders `[a, b, c]` in ascending order, `[]` when empty.
pub(crate) fn write_members(word: u64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (n, position) in positions(word).enumerate() {
        if n > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{position}")?;
    }
    f.write_str("]")
}
