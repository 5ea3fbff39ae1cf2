//! Field-scoped reads and writes over a modifier value.
//!
//! Every function here is pure: it takes the current value and returns a
//! new one. Bits outside the field's window are never touched.

use crate::common::bit::{self, ModifierValue};
use crate::field::{Field, FieldKind};
use crate::ports::provided::ModifierError;

/// Decodes a field.
///
/// Flags give 0 or 1 and enums their integer. A one-hot group gives the
/// index of its lowest set bit, or `width` when no bit is set.
///
/// # Examples
///
/// ```
/// use modifier_engine::{Field, get_field};
///
/// let unit = Field::onehot("angle-unit", 14, &["deg", "rad", "grad"]);
/// assert_eq!(get_field(1 << 15, &unit), 1);
/// assert_eq!(get_field(0, &unit), 3);
/// ```
pub fn get_field(value: ModifierValue, field: &Field) -> u128 {
    let raw = bit::extract(value, field.offset(), field.width());
    match field.kind() {
        FieldKind::OneHot if raw == 0 => field.width() as u128,
        FieldKind::OneHot => raw.trailing_zeros() as u128,
        _ => raw,
    }
}

/// Index of the set bit of a one-hot group, or `None` when the group has
/// no bit or more than one bit set.
pub fn onehot_index(value: ModifierValue, field: &Field) -> Option<u32> {
    let raw = bit::extract(value, field.offset(), field.width());
    if raw.count_ones() == 1 {
        Some(raw.trailing_zeros())
    } else {
        None
    }
}

/// Flips the flag bit.
///
/// # Examples
///
/// ```
/// use modifier_engine::{Field, toggle_flag};
///
/// let shift = Field::flag("shift", 0);
/// assert_eq!(toggle_flag(0x100, &shift), 0x101);
/// assert_eq!(toggle_flag(0x101, &shift), 0x100);
/// ```
pub fn toggle_flag(value: ModifierValue, field: &Field) -> ModifierValue {
    debug_assert_eq!(field.kind(), FieldKind::Flag, "'{}' is not a flag", field.name());
    bit::flip(value, field.offset())
}

/// Cycles a one-hot group to its next index, reading the current index
/// from the bits. A group with zero or several bits set starts over at 0.
///
/// Returns the new value and the index now set.
///
/// # Examples
///
/// ```
/// use modifier_engine::{Field, advance_one_hot, get_field};
///
/// let unit = Field::onehot("angle-unit", 14, &["deg", "rad", "grad"]);
/// let (v, i) = advance_one_hot(1 << 14, &unit);
/// assert_eq!(i, 1);
/// assert_eq!(v, 1 << 15);
///
/// // all-zero group starts at index 0
/// let (v, i) = advance_one_hot(0x100, &unit);
/// assert_eq!(i, 0);
/// assert_eq!(v, 0x100 | 1 << 14);
/// ```
pub fn advance_one_hot(value: ModifierValue, field: &Field) -> (ModifierValue, u32) {
    advance_one_hot_from(value, field, onehot_index(value, field))
}

/// Like [`advance_one_hot`], with the current index supplied by the caller.
/// `None` or an index past the group means "before the first index".
pub fn advance_one_hot_from(
    value: ModifierValue,
    field: &Field,
    current: Option<u32>,
) -> (ModifierValue, u32) {
    debug_assert_eq!(field.kind(), FieldKind::OneHot, "'{}' is not a one-hot group", field.name());

    let next = match current {
        Some(i) if i.saturating_add(1) < field.width() => i + 1,
        _ => 0,
    };
    // the whole group is rewritten, so stray bits are dropped
    (bit::splice(value, field.offset(), field.width(), 1u128 << next), next)
}

/// Selects one-hot index `index` directly.
pub fn set_one_hot(
    value: ModifierValue,
    field: &Field,
    index: u32,
) -> Result<ModifierValue, ModifierError> {
    if index >= field.width() {
        return Err(ModifierError::Range {
            field: field.name().to_string(),
            index: index as u128,
            limit: field.width() as u128,
        });
    }
    Ok(bit::splice(value, field.offset(), field.width(), 1u128 << index))
}

/// Writes `index` into an enum field.
///
/// Fails with `ModifierError::Range` when `index` does not fit in the
/// field's width; the value is left as it was.
///
/// # Examples
///
/// ```
/// use modifier_engine::{Field, set_enum, get_field};
///
/// let radix = Field::enumeration("radix", 12, 2);
/// let v = set_enum(0x60A010, &radix, 3).unwrap();
/// assert_eq!(get_field(v, &radix), 3);
/// assert_eq!(v, 0x60B010);
///
/// assert!(set_enum(v, &radix, 4).is_err());
/// ```
pub fn set_enum(
    value: ModifierValue,
    field: &Field,
    index: u128,
) -> Result<ModifierValue, ModifierError> {
    debug_assert_eq!(field.kind(), FieldKind::Enum, "'{}' is not an enum", field.name());

    if bit::bit_length(index) > field.width() {
        return Err(ModifierError::Range {
            field: field.name().to_string(),
            index,
            limit: field.limit(),
        });
    }
    Ok(bit::splice(value, field.offset(), field.width(), index))
}

/// Cycles an enum to its next value. Wraps to 0 after the last label, or
/// after the largest value the width holds when the field has no labels.
/// A value already past the last label also wraps to 0.
///
/// Returns the new value and the index now written.
///
/// # Examples
///
/// ```
/// use modifier_engine::Field;
/// use modifier_engine::modifier::advance_enum;
///
/// let shift_type = Field::enumeration("shift-type", 9, 2)
///     .with_labels(&["logical", "arithmetic", "rotate"]);
///
/// let (v, i) = advance_enum(1 << 9, &shift_type).unwrap();
/// assert_eq!((v, i), (2 << 9, 2));
///
/// // three labels in two bits: index 3 is never written
/// let (v, i) = advance_enum(v, &shift_type).unwrap();
/// assert_eq!((v, i), (0, 0));
/// ```
pub fn advance_enum(
    value: ModifierValue,
    field: &Field,
) -> Result<(ModifierValue, u128), ModifierError> {
    debug_assert_eq!(field.kind(), FieldKind::Enum, "'{}' is not an enum", field.name());

    let len = match field.labels().len() {
        0 => field.limit(),
        n => n as u128,
    };
    let current = get_field(value, field);
    let next = if current.saturating_add(1) >= len { 0 } else { current + 1 };
    Ok((set_enum(value, field, next)?, next))
}
