// Session tests
use modifier_engine::{Layout, ModifierError, Modifiers, Session, get_field};
use crate::mocks::MockRenderer;

#[test]
fn test_sessions_are_independent() {
    let mut sci = Session::scientific();
    let mut pro = Session::programmer();

    sci.toggle("shift").unwrap();
    pro.set("radix", 3).unwrap();

    assert_eq!(sci.value(), 0x101);
    assert_eq!(pro.value(), 0x60B010);
    assert_eq!(sci.layout().name(), "sci");
    assert_eq!(pro.layout().name(), "pro");
}

#[test]
fn test_renderer_called_after_each_mutation() {
    let mut renderer = MockRenderer::new();
    {
        let mut session = Session::scientific().with_renderer(&mut renderer);
        session.toggle("shift").unwrap();
        session.advance("angle-unit").unwrap();
        session.toggle("shift").unwrap();
    }
    assert_eq!(renderer.values(), vec![0x101, 0x101 | 1 << 15, 0x100 | 1 << 15]);
    assert!(renderer.calls.iter().all(|(mode, _)| mode == "sci"));
}

#[test]
fn test_failed_mutation_does_not_render() {
    let mut renderer = MockRenderer::new();
    {
        let mut session = Session::programmer().with_renderer(&mut renderer);
        assert!(session.set("radix", 4).is_err());
        assert!(session.toggle("no-such-key").is_err());
    }
    assert!(renderer.calls.is_empty());
}

#[test]
fn test_render_first_paint() {
    let mut renderer = MockRenderer::new();
    {
        let mut session = Session::programmer().with_renderer(&mut renderer);
        assert!(session.render().is_some());
    }
    assert_eq!(renderer.last(), Some(0x60A010));

    let mut bare = Session::programmer();
    assert!(bare.render().is_none());
}

#[test]
fn test_result_type_cycle_labels() {
    let mut session = Session::scientific();
    let mut labels = Vec::new();
    for _ in 0..6 {
        session.advance("result-type").unwrap();
        labels.push(session.label("result-type").unwrap().to_string());
    }
    assert_eq!(labels, vec!["frac", "mfrac", "fix", "sci", "eng", "dec"]);
    assert_eq!(session.value(), 0x100);
}

#[test]
fn test_set_one_hot_by_index() {
    let mut session = Session::programmer();
    session.set("bit-length", 5).unwrap();
    assert_eq!(session.label("bit-length"), Some("unlimited"));
    assert_eq!(session.get("bit-length").unwrap(), 5);
    assert_eq!(session.index("bit-length"), Some(5));

    assert_eq!(session.advance("bit-length").unwrap(), 0);
    assert_eq!(session.label("bit-length"), Some("4"));
}

#[test]
fn test_unknown_field() {
    let mut session = Session::new(Layout::scientific());
    assert_eq!(
        session.advance("radix"),
        Err(ModifierError::UnknownField("radix".to_string()))
    );
}

#[test]
fn test_reset_renders_default() {
    let mut renderer = MockRenderer::new();
    {
        let mut session = Session::scientific().with_renderer(&mut renderer);
        session.toggle("comp").unwrap();
        session.reset();
        assert_eq!(session.value(), 0x100);
    }
    assert_eq!(renderer.last(), Some(0x100));
}

#[test]
fn test_radix_key_cycles_with_codes() {
    let mut session = Session::programmer();
    session.set("radix", 0).unwrap();

    let mut seen = Vec::new();
    for _ in 0..4 {
        session.advance("radix").unwrap();
        seen.push((session.label("radix").unwrap().to_string(), session.code("radix").unwrap()));
    }
    assert_eq!(
        seen,
        vec![
            ("oct".to_string(), 8),
            ("dec".to_string(), 10),
            ("hex".to_string(), 16),
            ("bin".to_string(), 2),
        ]
    );
}

#[test]
fn test_shift_type_skips_unlabelled_value() {
    let mut renderer = MockRenderer::new();
    {
        let mut session = Session::programmer().with_renderer(&mut renderer);
        let indices: Vec<u128> = (0..3).map(|_| session.advance("shift-type").unwrap()).collect();
        assert_eq!(indices, vec![1, 2, 0]);
    }
    let shift_type = Layout::programmer().field("shift-type").unwrap().clone();
    assert!(renderer.values().iter().all(|v| get_field(*v, &shift_type) != 3));
    // every other bit stays at the default
    assert!(renderer.values().iter().all(|v| v & !shift_type.mask() == 0x60A010));
}

#[test]
fn test_get_matches_index_on_unset_group() {
    let session = Session::scientific();
    let got = session.get("angle-unit").unwrap();
    assert_eq!(Some(got as u32), session.index("angle-unit"));
    assert_eq!(session.label("angle-unit"), Some("deg"));
}
