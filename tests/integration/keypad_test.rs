// Table-driven keypad rendering tests
use modifier_engine::keypad::{Glyph, KeyFace, KeyRule, KeypadTable, Section, TableRenderer};
use modifier_engine::{Modifiers, Session};

// first function row of the programmer keypad: shift swaps the pair,
// caps-lock shows letters
fn pro_table() -> KeypadTable {
    let row = [("sin", "asin", "M"), ("cos", "acos", "N"), ("tan", "atan", "O")];
    let mut table = KeypadTable::new();
    for (pri, sec, letter) in row {
        table = table.key(
            Section::Fn,
            KeyRule::new(0x7)
                .case(0, KeyFace::pair(pri, sec))
                .case(1, KeyFace::pair(sec, pri))
                .case(4, KeyFace::single(letter)),
        );
    }
    table.key(
        Section::Num,
        KeyRule::new(0x7)
            .case(0, KeyFace::pair("7", "A"))
            .case(1, KeyFace::pair("A", "7"))
            .case(2, KeyFace::single("Infin"))
            .case(4, KeyFace::single("7"))
            .case(5, KeyFace::single("7")),
    )
}

#[test]
fn test_shift_swaps_glyphs() {
    let mut renderer = TableRenderer::new(pro_table());
    {
        let mut session = Session::programmer().with_renderer(&mut renderer);
        session.toggle("shift").unwrap();
    }
    let grid = renderer.last().unwrap();
    assert_eq!(grid.face(Section::Fn, 0, 0), Some(&KeyFace::pair("asin", "sin")));
    assert_eq!(grid.face(Section::Num, 0, 0), Some(&KeyFace::pair("A", "7")));
}

#[test]
fn test_caps_lock_letters() {
    let mut renderer = TableRenderer::new(pro_table());
    {
        let mut session = Session::programmer().with_renderer(&mut renderer);
        session.toggle("caps-lock").unwrap();
    }
    let grid = renderer.last().unwrap();
    let letters: Vec<Option<Glyph>> = grid.section(Section::Fn)[..3]
        .iter()
        .map(|f| f.primary.clone())
        .collect();
    assert_eq!(
        letters,
        vec![Some(Glyph::text("M")), Some(Glyph::text("N")), Some(Glyph::text("O"))]
    );
    assert!(grid.section(Section::Fn)[0].secondary.is_none());
}

#[test]
fn test_unmatched_combination_is_blank() {
    let mut renderer = TableRenderer::new(pro_table());
    {
        let mut session = Session::programmer().with_renderer(&mut renderer);
        session.toggle("shift").unwrap();
        session.toggle("float-const").unwrap();
    }
    assert_eq!(renderer.renders(), 2);
    let grid = renderer.last().unwrap();
    assert!(grid.face(Section::Fn, 0, 0).unwrap().is_blank());
    // keys without rules stay blank too
    assert!(grid.face(Section::Ctrl, 2, 4).unwrap().is_blank());
}

#[test]
fn test_key_ids() {
    let ids: Vec<String> = (0..Section::Ctrl.len()).map(|n| Section::Ctrl.key_id("sci", n)).collect();
    assert_eq!(ids.first().map(|s| s.as_str()), Some("sci-ctrl-1"));
    assert_eq!(ids.last().map(|s| s.as_str()), Some("sci-ctrl-15"));
}
