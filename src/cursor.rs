use core::convert::Infallible;
use core::iter::FusedIterator;

use crate::bits::{bit, next_set_from, test_bit_unchecked, END, MIN};
use crate::error::{Error, Result};
use crate::sorted_set::SortedSet;

/// Forward-only traversal over the members of a set or view.
///
/// Each step scans the live word for the member after the one it yields, so
/// changes made further ahead of the cursor are observed.
/// [`remove`](Cursor::remove) clears the last yielded member in the backing
/// word itself.
pub struct Cursor<'a, S: SortedSet + ?Sized> {
    set: &'a S,
    /// Position of the next member, `None` once exhausted.
    next: Option<u32>,
    /// Last yielded position, `None` if there is nothing to remove.
    last: Option<u32>,
}

impl<'a, S: SortedSet + ?Sized> Cursor<'a, S> {
    pub(crate) fn new(set: &'a S) -> Self {
        Self {
            set,
            next: next_set_from(set.bits(), MIN),
            last: None,
        }
    }

    /// Returns `true` if another member is ahead of the cursor.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Removes the member most recently returned by [`next`](Iterator::next).
    ///
    /// # Errors
    /// [`Error::IllegalState`] if nothing was yielded since the cursor was
    /// created or since the previous removal.
    pub fn remove(&mut self) -> Result<()> {
        let position = self.last.take().ok_or(Error::IllegalState)?;
        self.set.update(|word| word & !bit(position));
        Ok(())
    }

    /// Feeds every remaining member to `action` and exhausts the cursor.
    ///
    /// If `action` fails the error is returned and the cursor is left
    /// exactly where it was before the call.
    pub fn try_for_each_remaining<E, F>(&mut self, mut action: F) -> core::result::Result<(), E>
    where
        F: FnMut(u8) -> core::result::Result<(), E>,
    {
        let Some(start) = self.next else {
            return Ok(());
        };
        for position in start..END {
            if test_bit_unchecked(self.set.bits(), position) {
                action(position as u8)?;
            }
        }
        self.next = None;
        self.last = None;
        Ok(())
    }

    /// Infallible [`try_for_each_remaining`](Cursor::try_for_each_remaining).
    pub fn for_each_remaining<F: FnMut(u8)>(&mut self, mut action: F) {
        let _ = self.try_for_each_remaining(|value| {
            action(value);
            Ok::<(), Infallible>(())
        });
    }
}

impl<S: SortedSet + ?Sized> Iterator for Cursor<'_, S> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let position = self.next?;
        self.next = next_set_from(self.set.bits(), position + 1);
        self.last = Some(position);
        Some(position as u8)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            // members may still be inserted ahead of the cursor
            Some(position) => (1, Some((END - position) as usize)),
            None => (0, Some(0)),
        }
    }
}

impl<S: SortedSet + ?Sized> FusedIterator for Cursor<'_, S> {}
