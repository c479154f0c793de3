//! Pure functions over the 64-bit backing word.
//!
//! Position `i` of a word is the bit `1 << i`. Every function that takes an
//! index is bounds-checked against [`MIN`]..=[`MAX`] unless its name says
//! otherwise.

/// Smallest supported value.
pub const MIN: u32 = 0;

/// Largest supported value.
pub const MAX: u32 = 63;

/// One past [`MAX`]; the exclusive upper bound of the whole domain.
pub const END: u32 = MAX + 1;

/// Word with every supported position set.
pub const FULL: u64 = u64::MAX;

const SIGN: u64 = 1 << 63;

/// The 64 single-bit words, XORed with the sign bit so that signed
/// ordering of the entries matches unsigned ordering of the words.
static ONE_BIT_INDICES: [i64; 64] = one_bit_indices();

const fn one_bit_indices() -> [i64; 64] {
    let mut table = [0i64; 64];
    let mut i = 0;
    while i < 64 {
        table[i] = ((1u64 << i) ^ SIGN) as i64;
        i += 1;
    }
    table
}

/// Returns `true` if `value` lies in the domain.
#[inline]
pub fn is_supported(value: i128) -> bool {
    value >= MIN as i128 && value <= MAX as i128
}

/// Returns `true` if `value` lies in the domain and its position is set in `mask`.
#[inline]
pub fn is_supported_in(mask: u64, value: i128) -> bool {
    is_supported(value) && mask & (1 << value as u32) != 0
}

/// Number of members.
#[inline]
pub fn popcount(word: u64) -> u32 {
    word.count_ones()
}

/// Returns `true` if position `value` is set. Out-of-domain values are never set.
#[inline]
pub fn test_bit(word: u64, value: i128) -> bool {
    is_supported(value) && test_bit_unchecked(word, value as u32)
}

#[inline]
pub(crate) fn test_bit_unchecked(word: u64, position: u32) -> bool {
    debug_assert!(position <= MAX, "position outside the domain");
    word & (1 << position) != 0
}

/// Single-bit word for `position`.
#[inline]
pub(crate) fn bit(position: u32) -> u64 {
    debug_assert!(position <= MAX, "position outside the domain");
    1 << position
}

/// Isolates the lowest set bit. Zero stays zero.
#[inline]
pub fn lowest_bit(word: u64) -> u64 {
    word & word.wrapping_neg()
}

/// Isolates the highest set bit. Zero stays zero.
#[inline]
pub fn highest_bit(word: u64) -> u64 {
    if word == 0 {
        0
    } else {
        SIGN >> word.leading_zeros()
    }
}

/// Recovers the position of the only bit set in `single_bit`.
///
/// Binary search over the sentinel table, so at most six comparisons.
/// The argument must have exactly one bit set.
#[inline]
pub fn index_of_single_bit(single_bit: u64) -> u32 {
    debug_assert!(
        single_bit.is_power_of_two(),
        "word must have exactly one bit set"
    );
    let key = (single_bit ^ SIGN) as i64;
    match ONE_BIT_INDICES.binary_search(&key) {
        Ok(position) | Err(position) => position as u32,
    }
}

/// All positions strictly below `end_exclusive`.
#[inline]
pub fn head_mask(end_exclusive: u32) -> u64 {
    debug_assert!(end_exclusive <= END, "bound outside the domain");
    if end_exclusive >= END {
        FULL
    } else {
        (1 << end_exclusive) - 1
    }
}

/// All positions at or above `start`.
#[inline]
pub fn tail_mask(start: u32) -> u64 {
    !head_mask(start)
}

/// All positions in `start..end_exclusive`.
#[inline]
pub fn range_mask(start: u32, end_exclusive: u32) -> u64 {
    head_mask(end_exclusive) & tail_mask(start)
}

/// Next set position at or after `from`, scanning linearly up to [`MAX`].
#[inline]
pub(crate) fn next_set_from(word: u64, from: u32) -> Option<u32> {
    (from..END).find(|&position| test_bit_unchecked(word, position))
}

/// Ascending positions of every set bit.
pub(crate) fn positions(word: u64) -> impl Iterator<Item = u32> {
    (MIN..END).filter(move |&position| test_bit_unchecked(word, position))
}
