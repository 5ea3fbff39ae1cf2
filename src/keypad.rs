use crate::common::bit::ModifierValue;
use crate::common::log_format::LogFormat;
use crate::layout::Layout;
use crate::ports::required::KeypadRenderer;
use crate::fn_log;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// Stroke settings for an icon glyph.
///
/// Defaults: stroke `#000000`, width `2.0`, round caps and joins, no fill.
///
/// # Examples
///
/// ```
/// use modifier_engine::keypad::{IconStyle, LineCap};
///
/// let style = IconStyle::default();
/// assert_eq!(style.stroke, "#000000");
/// assert_eq!(style.line_cap, LineCap::Round);
///
/// let thin = IconStyle { stroke_width: 1.0, ..IconStyle::default() };
/// assert_eq!(thin.stroke_width, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IconStyle {
    pub stroke: String,
    pub stroke_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub fill: Option<String>,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            stroke: "#000000".to_string(),
            stroke_width: 2.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            fill: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Glyph {
    /// Text or typeset markup shown as-is.
    Text(String),
    /// A named vector icon.
    Icon { name: String, style: IconStyle },
}

impl Glyph {
    pub fn text(s: &str) -> Self {
        Glyph::Text(s.to_string())
    }

    pub fn icon(name: &str) -> Self {
        Glyph::Icon { name: name.to_string(), style: IconStyle::default() }
    }
}

/// What one key shows: a primary glyph and an optional secondary one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyFace {
    pub primary: Option<Glyph>,
    pub secondary: Option<Glyph>,
}

impl KeyFace {
    pub fn new(primary: Option<Glyph>, secondary: Option<Glyph>) -> Self {
        Self { primary, secondary }
    }

    pub fn pair(primary: &str, secondary: &str) -> Self {
        Self::new(Some(Glyph::text(primary)), Some(Glyph::text(secondary)))
    }

    pub fn single(primary: &str) -> Self {
        Self::new(Some(Glyph::text(primary)), None)
    }

    pub fn is_blank(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }
}

/// The three key blocks of a keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Ctrl,
    Fn,
    Num,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Ctrl, Section::Fn, Section::Num];

    pub fn rows(&self) -> usize {
        match self {
            Section::Ctrl => 3,
            Section::Fn => 3,
            Section::Num => 4,
        }
    }

    pub fn columns(&self) -> usize {
        match self {
            Section::Ctrl => 5,
            Section::Fn => 6,
            Section::Num => 5,
        }
    }

    pub fn len(&self) -> usize {
        self.rows() * self.columns()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Ctrl => "ctrl",
            Section::Fn => "fn",
            Section::Num => "num",
        }
    }

    /// Element id of the `n`th key (0-based), e.g. `sci-fn-1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use modifier_engine::keypad::Section;
    ///
    /// assert_eq!(Section::Fn.key_id("sci", 0), "sci-fn-1");
    /// assert_eq!(Section::Num.key_id("pro", 19), "pro-num-20");
    /// ```
    pub fn key_id(&self, mode: &str, n: usize) -> String {
        format!("{}-{}-{}", mode, self.as_str(), n + 1)
    }
}

/// Faces for every key, per section, in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyGrid {
    ctrl: Vec<KeyFace>,
    fn_keys: Vec<KeyFace>,
    num: Vec<KeyFace>,
}

impl KeyGrid {
    /// A grid with every key blank.
    pub fn blank() -> Self {
        Self {
            ctrl: vec![KeyFace::default(); Section::Ctrl.len()],
            fn_keys: vec![KeyFace::default(); Section::Fn.len()],
            num: vec![KeyFace::default(); Section::Num.len()],
        }
    }

    pub fn section(&self, section: Section) -> &[KeyFace] {
        match section {
            Section::Ctrl => &self.ctrl,
            Section::Fn => &self.fn_keys,
            Section::Num => &self.num,
        }
    }

    fn section_mut(&mut self, section: Section) -> &mut Vec<KeyFace> {
        match section {
            Section::Ctrl => &mut self.ctrl,
            Section::Fn => &mut self.fn_keys,
            Section::Num => &mut self.num,
        }
    }

    pub fn face(&self, section: Section, row: usize, col: usize) -> Option<&KeyFace> {
        if col >= section.columns() {
            return None;
        }
        self.section(section).get(row * section.columns() + col)
    }

    pub fn set(&mut self, section: Section, n: usize, face: KeyFace) {
        if let Some(slot) = self.section_mut(section).get_mut(n) {
            *slot = face;
        }
    }
}

impl Default for KeyGrid {
    fn default() -> Self {
        Self::blank()
    }
}

/// Chooses a key's face from the modifier bits.
///
/// The value is masked and compared against each case in order; the first
/// match wins. No match leaves the key blank.
///
/// # Examples
///
/// ```
/// use modifier_engine::keypad::{KeyRule, KeyFace};
///
/// let sin = KeyRule::new(0x7)
///     .case(0, KeyFace::pair("sin", "asin"))
///     .case(1, KeyFace::pair("asin", "sin"))
///     .case(4, KeyFace::single("M"));
///
/// assert_eq!(sin.face(0x60A010), KeyFace::pair("sin", "asin"));
/// assert_eq!(sin.face(0x60A011), KeyFace::pair("asin", "sin"));
/// assert!(sin.face(0x60A013).is_blank());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRule {
    mask: ModifierValue,
    cases: Vec<(ModifierValue, KeyFace)>,
}

impl KeyRule {
    pub fn new(mask: ModifierValue) -> Self {
        Self { mask, cases: Vec::new() }
    }

    /// A key that shows the same face whatever the modifiers.
    pub fn fixed(face: KeyFace) -> Self {
        Self::new(0).case(0, face)
    }

    pub fn case(mut self, pattern: ModifierValue, face: KeyFace) -> Self {
        self.cases.push((pattern, face));
        self
    }

    pub fn face(&self, value: ModifierValue) -> KeyFace {
        let masked = value & self.mask;
        self.cases
            .iter()
            .find(|(pattern, _)| *pattern == masked)
            .map(|(_, face)| face.clone())
            .unwrap_or_default()
    }
}

/// Rules for every key of one mode. Keys without a rule stay blank.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeypadTable {
    ctrl: Vec<KeyRule>,
    fn_keys: Vec<KeyRule>,
    num: Vec<KeyRule>,
}

impl KeypadTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the next key's rule to `section`. Rules past the section's
    /// size are ignored when rendering.
    pub fn key(mut self, section: Section, rule: KeyRule) -> Self {
        match section {
            Section::Ctrl => self.ctrl.push(rule),
            Section::Fn => self.fn_keys.push(rule),
            Section::Num => self.num.push(rule),
        }
        self
    }

    pub fn rules(&self, section: Section) -> &[KeyRule] {
        match section {
            Section::Ctrl => &self.ctrl,
            Section::Fn => &self.fn_keys,
            Section::Num => &self.num,
        }
    }

    pub fn grid(&self, value: ModifierValue) -> KeyGrid {
        let mut grid = KeyGrid::blank();
        for section in Section::ALL {
            for (n, rule) in self.rules(section).iter().take(section.len()).enumerate() {
                grid.set(section, n, rule.face(value));
            }
        }
        grid
    }
}

/// Renders from a [`KeypadTable`] and keeps the last grid produced.
pub struct TableRenderer {
    table: KeypadTable,
    last: Option<KeyGrid>,
    renders: usize,
}

impl TableRenderer {
    pub fn new(table: KeypadTable) -> Self {
        Self { table, last: None, renders: 0 }
    }

    pub fn last(&self) -> Option<&KeyGrid> {
        self.last.as_ref()
    }

    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl KeypadRenderer for TableRenderer {
    fn render(&mut self, layout: &Layout, value: ModifierValue) -> KeyGrid {
        fn_log!("TableRenderer", "render", layout.name(), &LogFormat::format_value(value));

        let grid = self.table.grid(value);
        self.last = Some(grid.clone());
        self.renders += 1;
        grid
    }
}
