use crate::common::bit::ModifierValue;
use crate::field::{Field, FieldKind};
use crate::keypad::KeyGrid;
use crate::layout::Layout;
use crate::modifier;
use crate::ports::provided::{ModifierError, Modifiers};
use crate::ports::required::KeypadRenderer;
use crate::fn_log;
use crate::warn_log;
use std::collections::HashMap;

/// One calculator mode's live modifiers.
///
/// Owns the packed value, its layout, and the current index of every
/// one-hot field. The index is kept beside the bits on purpose: an all-zero
/// group has no index of its own, so the session remembers which entry the
/// keypad is showing.
pub struct Session<'a> {
    layout: Layout,
    value: ModifierValue,
    indices: HashMap<String, u32>,
    renderer: Option<&'a mut dyn KeypadRenderer>,
}

impl<'a> Session<'a> {
    /// # Examples
    ///
    /// ```
    /// use modifier_engine::{Layout, Session};
    ///
    /// let session = Session::new(Layout::scientific());
    /// assert_eq!(session.value(), 0x100);
    /// assert_eq!(session.index("angle-unit"), Some(0));
    /// ```
    pub fn new(layout: Layout) -> Self {
        let value = layout.default_value();
        let indices = seed_indices(&layout, value);
        Self {
            layout,
            value,
            indices,
            renderer: None,
        }
    }

    pub fn scientific() -> Self {
        Self::new(Layout::scientific())
    }

    pub fn programmer() -> Self {
        Self::new(Layout::programmer())
    }

    pub fn with_renderer(mut self, renderer: &'a mut dyn KeypadRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn value(&self) -> ModifierValue {
        self.value
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Current index of a one-hot field.
    pub fn index(&self, name: &str) -> Option<u32> {
        self.indices.get(name).copied()
    }

    /// Label of a one-hot or enum field's current entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use modifier_engine::{Session, Modifiers};
    ///
    /// let mut session = Session::programmer();
    /// assert_eq!(session.label("radix"), Some("dec"));
    ///
    /// session.set("radix", 3).unwrap();
    /// assert_eq!(session.label("radix"), Some("hex"));
    /// ```
    pub fn label(&self, name: &str) -> Option<&str> {
        let field = self.layout.field(name)?;
        match field.kind() {
            FieldKind::Flag => None,
            FieldKind::OneHot => field.label(self.index(name)? as usize),
            FieldKind::Enum => {
                let i = usize::try_from(modifier::get_field(self.value, field)).ok()?;
                field.label(i)
            }
        }
    }

    /// Presentation code of an enum field's current entry, e.g. 16 for hex.
    pub fn code(&self, name: &str) -> Option<u32> {
        let field = self.layout.field(name)?;
        let i = usize::try_from(modifier::get_field(self.value, field)).ok()?;
        field.code(i)
    }

    /// Back to the layout default, re-seeding one-hot indices.
    pub fn reset(&mut self) {
        fn_log!("Session", "reset", self.layout.name());

        self.value = self.layout.default_value();
        self.indices = seed_indices(&self.layout, self.value);
        self.refresh();
    }

    /// Renders the current value, e.g. for the first paint.
    pub fn render(&mut self) -> Option<KeyGrid> {
        let renderer = self.renderer.as_mut()?;
        Some(renderer.render(&self.layout, self.value))
    }

    fn refresh(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            let _ = renderer.render(&self.layout, self.value);
        }
    }

    fn field_of(&self, name: &str, expected: &[FieldKind]) -> Result<&Field, ModifierError> {
        let field = self
            .layout
            .field(name)
            .ok_or_else(|| ModifierError::UnknownField(name.to_string()))?;

        if !expected.contains(&field.kind()) {
            return Err(ModifierError::KindMismatch {
                field: name.to_string(),
                expected: expected
                    .first()
                    .map(|k| k.as_str())
                    .unwrap_or("field"),
                actual: field.kind().as_str(),
            });
        }
        Ok(field)
    }

    /// The index to advance from. Clean bits win over the stored index;
    /// an empty or malformed group falls back to it.
    fn current_index(&self, field: &Field) -> Option<u32> {
        let stored = self.index(field.name());
        match modifier::onehot_index(self.value, field) {
            Some(from_bits) => {
                if stored.is_some_and(|s| s != from_bits) {
                    warn_log!(
                        "Session",
                        "advance",
                        &format!(
                            "'{}' index {} disagrees with bits {}, using bits",
                            field.name(),
                            stored.unwrap_or_default(),
                            from_bits
                        )
                    );
                }
                Some(from_bits)
            }
            None => stored,
        }
    }
}

impl<'a> Modifiers for Session<'a> {
    /// # Examples
    ///
    /// ```
    /// use modifier_engine::{Session, Modifiers};
    ///
    /// let session = Session::programmer();
    /// assert_eq!(session.get("radix").unwrap(), 2);
    /// assert_eq!(session.get("shift").unwrap(), 0);
    /// assert!(session.get("nope").is_err());
    ///
    /// // an unset one-hot group reads as its stored index
    /// let sci = Session::scientific();
    /// assert_eq!(sci.get("angle-unit").unwrap(), 0);
    /// assert_eq!(sci.label("angle-unit"), Some("deg"));
    /// ```
    fn get(&self, name: &str) -> Result<u128, ModifierError> {
        let field = self.field_of(name, &[FieldKind::Flag, FieldKind::OneHot, FieldKind::Enum])?;
        // one-hot groups report the index the keypad shows, even when unset
        match (field.kind(), self.index(name)) {
            (FieldKind::OneHot, Some(i)) => Ok(i as u128),
            _ => Ok(modifier::get_field(self.value, field)),
        }
    }

    /// # Examples
    ///
    /// ```
    /// use modifier_engine::{Session, Modifiers};
    ///
    /// let mut session = Session::scientific();
    /// assert_eq!(session.toggle("shift").unwrap(), 0x101);
    /// assert_eq!(session.toggle("shift").unwrap(), 0x100);
    /// assert!(session.toggle("angle-unit").is_err());
    /// ```
    fn toggle(&mut self, name: &str) -> Result<ModifierValue, ModifierError> {
        fn_log!("Session", "toggle", name);

        let field = self.field_of(name, &[FieldKind::Flag])?;
        self.value = modifier::toggle_flag(self.value, field);
        self.refresh();
        Ok(self.value)
    }

    /// # Examples
    ///
    /// ```
    /// use modifier_engine::{Session, Modifiers};
    ///
    /// let mut session = Session::scientific();
    /// assert_eq!(session.advance("angle-unit").unwrap(), 1);
    /// assert_eq!(session.label("angle-unit"), Some("rad"));
    /// assert_eq!(session.advance("angle-unit").unwrap(), 2);
    /// assert_eq!(session.advance("angle-unit").unwrap(), 0);
    ///
    /// let mut pro = Session::programmer();
    /// assert_eq!(pro.advance("radix").unwrap(), 3);
    /// assert_eq!(pro.code("radix"), Some(16));
    /// ```
    fn advance(&mut self, name: &str) -> Result<u128, ModifierError> {
        fn_log!("Session", "advance", name);

        let field = self.field_of(name, &[FieldKind::OneHot, FieldKind::Enum])?;
        let next = match field.kind() {
            FieldKind::OneHot => {
                let current = self.current_index(field);
                let (value, next) = modifier::advance_one_hot_from(self.value, field, current);
                self.value = value;
                self.indices.insert(name.to_string(), next);
                next as u128
            }
            _ => {
                let (value, next) = modifier::advance_enum(self.value, field)?;
                self.value = value;
                next
            }
        };

        self.refresh();
        Ok(next)
    }

    fn set(&mut self, name: &str, index: u128) -> Result<ModifierValue, ModifierError> {
        fn_log!("Session", "set", name, &index.to_string());

        let field = self.field_of(name, &[FieldKind::Enum, FieldKind::OneHot])?;
        match field.kind() {
            FieldKind::OneHot => {
                let i = u32::try_from(index).map_err(|_| ModifierError::Range {
                    field: name.to_string(),
                    index,
                    limit: field.limit(),
                })?;
                self.value = modifier::set_one_hot(self.value, field, i)?;
                self.indices.insert(name.to_string(), i);
            }
            _ => {
                self.value = modifier::set_enum(self.value, field, index)?;
            }
        }

        self.refresh();
        Ok(self.value)
    }
}

fn seed_indices(layout: &Layout, value: ModifierValue) -> HashMap<String, u32> {
    layout
        .fields()
        .iter()
        .filter(|f| f.kind() == FieldKind::OneHot)
        .map(|f| {
            let index = modifier::onehot_index(value, f).unwrap_or(0);
            (f.name().to_string(), index)
        })
        .collect()
}
