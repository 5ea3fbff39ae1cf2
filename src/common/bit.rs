//! Bit surgery over a packed modifier value.
//!
//! Every field of a layout is an `(offset, width)` window into one `u128`.
//! Offsets count from the least-significant bit:
//!
//! | bits above window | window              | bits below window |
//! |-------------------|---------------------|-------------------|
//! | `>= offset+width` | `offset..offset+width` | `< offset`     |
//!
//! All shifts saturate: shifting by 128 or more yields 0 instead of
//! overflowing, so a window that ends exactly at bit 128 is valid.

/// The packed modifier integer.
pub type ModifierValue = u128;

/// Total number of bits a `ModifierValue` can hold.
pub const CAPACITY: u32 = u128::BITS;

pub fn new() -> ModifierValue {
    0
}

fn shl(value: ModifierValue, by: u32) -> ModifierValue {
    value.checked_shl(by).unwrap_or(0)
}

fn shr(value: ModifierValue, by: u32) -> ModifierValue {
    value.checked_shr(by).unwrap_or(0)
}

/// Returns a mask of `n` low one-bits.
///
/// # Examples
///
/// ```
/// use modifier_engine::common::bit;
///
/// assert_eq!(bit::ones(0), 0);
/// assert_eq!(bit::ones(3), 0b111);
/// assert_eq!(bit::ones(128), u128::MAX);
/// ```
pub fn ones(n: u32) -> ModifierValue {
    if n >= CAPACITY {
        u128::MAX
    } else {
        (1u128 << n) - 1
    }
}

/// Number of bits needed to write `n` in binary. `0` needs none.
///
/// # Examples
///
/// ```
/// use modifier_engine::common::bit;
///
/// assert_eq!(bit::bit_length(0), 0);
/// assert_eq!(bit::bit_length(3), 2);
/// assert_eq!(bit::bit_length(36), 6);
/// ```
pub fn bit_length(n: u128) -> u32 {
    CAPACITY - n.leading_zeros()
}

/// Reads the `width` bits at `offset`, shifted down to the low end.
///
/// # Examples
///
/// ```
/// use modifier_engine::common::bit;
///
/// let v = 0b1011_0000u128;
/// assert_eq!(bit::extract(v, 4, 4), 0b1011);
/// assert_eq!(bit::extract(v, 0, 4), 0);
/// ```
pub fn extract(value: ModifierValue, offset: u32, width: u32) -> ModifierValue {
    shr(value, offset) & ones(width)
}

/// Replaces the `width` bits at `offset` with `bits`, keeping every bit
/// outside the window.
///
/// The value is cut into the part above the window and the part below it,
/// then recomposed around the new window bits. `bits` must fit in `width`.
///
/// # Examples
///
/// ```
/// use modifier_engine::common::bit;
///
/// let v = 0xFF_FFu128;
/// let v = bit::splice(v, 4, 8, 0x00);
/// assert_eq!(v, 0xF0_0F);
///
/// // adjacent windows are untouched
/// let v = bit::splice(v, 12, 4, 0b0101);
/// assert_eq!(v, 0x50_0F);
/// ```
pub fn splice(value: ModifierValue, offset: u32, width: u32, bits: ModifierValue) -> ModifierValue {
    debug_assert!(bits <= ones(width), "bits {:#x} wider than {} bits", bits, width);

    let end = offset.saturating_add(width);
    let left = shr(value, end);
    let right = value & ones(offset);

    shl(left, end) | shl(bits, offset) | right
}

/// Flips the single bit at `offset`.
pub fn flip(value: ModifierValue, offset: u32) -> ModifierValue {
    value ^ shl(1, offset)
}

/// Number of set bits in the window.
pub fn count(value: ModifierValue, offset: u32, width: u32) -> u32 {
    extract(value, offset, width).count_ones()
}
