use crate::common::bit::{self, ModifierValue};

/// How the bits of a field are read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One bit, toggled with XOR.
    Flag,
    /// `width` bits of which at most one is set. The value is the index of
    /// the set bit.
    OneHot,
    /// `width` bits read as an unsigned integer.
    Enum,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Flag => "flag",
            FieldKind::OneHot => "onehot",
            FieldKind::Enum => "enum",
        }
    }
}

/// A named window of bits inside a modifier value.
///
/// Fields are plain descriptors. They are validated against each other
/// when a [`Layout`](crate::layout::Layout) is built, not when used.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    offset: u32,
    width: u32,
    kind: FieldKind,
    labels: Vec<String>,
    codes: Vec<u32>,
}

impl Field {
    /// # Examples
    ///
    /// ```
    /// use modifier_engine::Field;
    ///
    /// let shift = Field::flag("shift", 0);
    /// assert_eq!(shift.width(), 1);
    /// assert_eq!(shift.mask(), 0b1);
    /// ```
    pub fn flag(name: &str, offset: u32) -> Self {
        Self::new(name, offset, 1, FieldKind::Flag)
    }

    /// A one-hot group with one bit per label.
    ///
    /// # Examples
    ///
    /// ```
    /// use modifier_engine::Field;
    ///
    /// let unit = Field::onehot("angle-unit", 14, &["deg", "rad", "grad"]);
    /// assert_eq!(unit.width(), 3);
    /// assert_eq!(unit.label(1), Some("rad"));
    /// ```
    pub fn onehot(name: &str, offset: u32, labels: &[&str]) -> Self {
        Self::new(name, offset, labels.len() as u32, FieldKind::OneHot).with_labels(labels)
    }

    pub fn enumeration(name: &str, offset: u32, width: u32) -> Self {
        Self::new(name, offset, width, FieldKind::Enum)
    }

    pub fn new(name: &str, offset: u32, width: u32, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            offset,
            width,
            kind,
            labels: Vec::new(),
            codes: Vec::new(),
        }
    }

    pub fn with_labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    /// Presentation codes per index, e.g. the numeric radix for each
    /// position of a radix selector. Codes are never written into the bits.
    pub fn with_codes(mut self, codes: &[u32]) -> Self {
        self.codes = codes.to_vec();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(|s| s.as_str())
    }

    pub fn code(&self, index: usize) -> Option<u32> {
        self.codes.get(index).copied()
    }

    /// First bit past the field.
    pub fn end(&self) -> u32 {
        self.offset.saturating_add(self.width)
    }

    /// The field's bits in place.
    pub fn mask(&self) -> ModifierValue {
        bit::ones(self.width).checked_shl(self.offset).unwrap_or(0)
    }

    /// Largest value an enum of this width can hold, plus one.
    /// Saturates at `u128::MAX` for a full-width field.
    pub fn limit(&self) -> u128 {
        match self.kind {
            FieldKind::OneHot => self.width as u128,
            _ => 1u128.checked_shl(self.width).unwrap_or(u128::MAX),
        }
    }

    pub fn overlaps(&self, other: &Field) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}
