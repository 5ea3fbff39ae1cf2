// Layout registry tests
use modifier_engine::{Field, FieldKind, Layout, LayoutError};

#[test]
fn test_scientific_fields_in_order() {
    let sci = Layout::scientific();
    let names: Vec<&str> = sci.fields().iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        vec![
            "shift", "hyp", "rcl", "caps-lock", "num-lock", "expr", "comp", "suffix",
            "result-type", "angle-unit", "edit-mode",
        ]
    );
    assert_eq!(sci.capacity(), 32);

    let offsets: Vec<u32> = sci.fields().iter().map(|f| f.offset()).collect();
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_programmer_is_wide() {
    let pro = Layout::programmer();
    assert_eq!(pro.capacity(), 128);
    assert_eq!(pro.field("bit-length").unwrap().kind(), FieldKind::OneHot);
    assert_eq!(pro.field("representation").unwrap().kind(), FieldKind::Enum);
    assert_eq!(pro.field("radix").unwrap().codes(), &[2, 8, 10, 16]);
}

#[test]
fn test_fields_never_overlap() {
    for layout in [Layout::scientific(), Layout::programmer()] {
        let fields = layout.fields();
        for (i, a) in fields.iter().enumerate() {
            for b in &fields[i + 1..] {
                assert!(!a.overlaps(b), "{} overlaps {}", a.name(), b.name());
            }
        }
    }
}

#[test]
fn test_overlap_detected_at_build() {
    let result = Layout::builder("broken", 32)
        .onehot("result-type", 8, &["dec", "frac", "mfrac", "fix", "sci", "eng"])
        .onehot("angle-unit", 12, &["deg", "rad", "grad"])
        .build();
    match result {
        Err(LayoutError::Overlap(msg)) => assert!(msg.contains("angle-unit")),
        other => panic!("expected overlap, got {:?}", other),
    }
}

#[test]
fn test_capacity_enforced() {
    let result = Layout::builder("narrow", 16)
        .field(Field::enumeration("radix", 14, 4))
        .build();
    assert!(matches!(result, Err(LayoutError::ExceedsCapacity(_))));
}

#[test]
fn test_describe_scientific_default() {
    let sci = Layout::scientific();
    let view = sci.describe(sci.default_value());
    let result_type = view.iter().find(|v| v.name == "result-type").unwrap();
    assert_eq!(result_type.value, 0);
    assert_eq!(result_type.label.as_deref(), Some("dec"));

    // unset groups decode past their last index and carry no label
    let unit = view.iter().find(|v| v.name == "angle-unit").unwrap();
    assert_eq!(unit.value, 3);
    assert_eq!(unit.label, None);
}

#[test]
fn test_error_display() {
    let err = LayoutError::Overlap("'b' overlaps 'a'".to_string());
    assert_eq!(err.to_string(), "Overlap: 'b' overlaps 'a'");
}
