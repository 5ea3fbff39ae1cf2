// Field operation tests over the built-in layouts
use modifier_engine::common::bit;
use modifier_engine::modifier::{advance_one_hot, get_field, onehot_index, set_enum, toggle_flag};
use modifier_engine::{FieldKind, Layout, ModifierError};

#[test]
fn test_scientific_shift_toggle() {
    let sci = Layout::scientific();
    let shift = sci.field("shift").unwrap();
    assert_eq!(shift.offset(), 0);
    assert_eq!(shift.width(), 1);

    let v = toggle_flag(sci.default_value(), shift);
    assert_eq!(v, 0x101);
    let v = toggle_flag(v, shift);
    assert_eq!(v, 0x100);
}

#[test]
fn test_programmer_radix_set() {
    let pro = Layout::programmer();
    let radix = pro.field("radix").unwrap();
    assert_eq!((radix.offset(), radix.width()), (12, 2));

    let start = pro.default_value();
    assert_eq!(start, 0x60A010);
    assert_eq!(get_field(start, radix), 2);

    let v = set_enum(start, radix, 3).unwrap();
    assert_eq!(get_field(v, radix), 3);
    // only the radix window changed
    assert_eq!(v & !radix.mask(), start & !radix.mask());
    assert_eq!(radix.code(get_field(v, radix) as usize), Some(16));
}

#[test]
fn test_range_rejection_keeps_value() {
    let pro = Layout::programmer();
    let rep = pro.field("representation").unwrap();
    let v = pro.default_value();

    let result = set_enum(v, rep, 1 << rep.width());
    assert!(matches!(result, Err(ModifierError::Range { .. })));

    // the largest value still fits
    let ok = set_enum(v, rep, (1 << rep.width()) - 1).unwrap();
    assert_eq!(get_field(ok, rep), 7);
}

#[test]
fn test_onehot_four_wide_round_robin() {
    let sci = Layout::scientific();
    let edit = sci.field("edit-mode").unwrap();
    assert_eq!(edit.width(), 4);

    let mut v = bit::splice(sci.default_value(), edit.offset(), edit.width(), 0b0001);
    let mut visited = Vec::new();
    for _ in 0..4 {
        let (next_value, index) = advance_one_hot(v, edit);
        assert_eq!(bit::count(next_value, edit.offset(), edit.width()), 1);
        assert_eq!(onehot_index(next_value, edit), Some(index));
        visited.push(index);
        v = next_value;
    }
    assert_eq!(visited, vec![1, 2, 3, 0]);
}

#[test]
fn test_onehot_empty_group_goes_to_first() {
    let sci = Layout::scientific();
    let unit = sci.field("angle-unit").unwrap();
    assert_eq!(onehot_index(0x100, unit), None);

    let (v, index) = advance_one_hot(0x100, unit);
    assert_eq!(index, 0);
    assert_eq!(get_field(v, unit), 0);
    assert_eq!(v & !unit.mask(), 0x100);
}

#[test]
fn test_non_interference_every_pair() {
    for layout in [Layout::scientific(), Layout::programmer()] {
        // a busy value with bits set in every field
        let v = layout.default_value() | 0x5555_5555;
        for f1 in layout.fields() {
            let mutated = match f1.kind() {
                FieldKind::Flag => toggle_flag(v, f1),
                FieldKind::OneHot => advance_one_hot(v, f1).0,
                FieldKind::Enum => set_enum(v, f1, 1).unwrap(),
            };
            assert_eq!(mutated & !f1.mask(), v & !f1.mask(), "{} leaked", f1.name());
            for f2 in layout.fields().iter().filter(|f| f.name() != f1.name()) {
                assert_eq!(
                    get_field(mutated, f2),
                    get_field(v, f2),
                    "{}: mutating {} changed {}",
                    layout.name(),
                    f1.name(),
                    f2.name()
                );
            }
        }
    }
}

#[test]
fn test_high_bits_survive_on_wide_layout() {
    let pro = Layout::programmer();
    let radix = pro.field("radix").unwrap();
    let v = pro.default_value() | (1u128 << 127) | (1u128 << 64);

    let v2 = set_enum(v, radix, 0).unwrap();
    assert_eq!(v2 >> 64, v >> 64);
    assert_eq!(get_field(v2, radix), 0);
}
