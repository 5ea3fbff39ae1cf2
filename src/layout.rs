use crate::common::bit::{self, ModifierValue};
use crate::field::{Field, FieldKind};
use crate::modifier;
use crate::ports::provided::LayoutError;
use crate::fn_log;

/// Scientific keypad modifiers.
///
/// | offset | width | name        | kind   |
/// |--------|-------|-------------|--------|
/// | 0      | 1     | shift       | flag   |
/// | 1      | 1     | hyp         | flag   |
/// | 2      | 1     | rcl         | flag   |
/// | 3      | 1     | caps-lock   | flag   |
/// | 4      | 1     | num-lock    | flag   |
/// | 5      | 1     | expr        | flag   |
/// | 6      | 1     | comp        | flag   |
/// | 7      | 1     | suffix      | flag   |
/// | 8      | 6     | result-type | onehot |
/// | 14     | 3     | angle-unit  | onehot |
/// | 17     | 4     | edit-mode   | onehot |
pub const SCIENTIFIC: &str = "sci";
pub const SCIENTIFIC_CAPACITY: u32 = 32;
/// `dec` result type; angle unit and edit mode unset.
pub const SCIENTIFIC_DEFAULT: ModifierValue = 0x100;

/// Programmer keypad modifiers.
///
/// | offset | width | name           | kind   |
/// |--------|-------|----------------|--------|
/// | 0      | 1     | shift          | flag   |
/// | 1      | 1     | float-const    | flag   |
/// | 2      | 1     | caps-lock      | flag   |
/// | 3      | 1     | num-lock       | flag   |
/// | 4      | 2     | endian         | onehot |
/// | 6      | 3     | representation | enum   |
/// | 9      | 2     | shift-type     | enum   |
/// | 11     | 1     | (reserved)     |        |
/// | 12     | 2     | radix          | enum   |
/// | 14     | 6     | bit-length     | onehot |
/// | 20     | 2     | rounding       | onehot |
/// | 22     | 4     | edit-mode      | onehot |
pub const PROGRAMMER: &str = "pro";
pub const PROGRAMMER_CAPACITY: u32 = 128;
/// Big-endian, decimal radix, 8-bit, half-even rounding, insert.
pub const PROGRAMMER_DEFAULT: ModifierValue = 0x60A010;

pub const RESULT_TYPES: [&str; 6] = ["dec", "frac", "mfrac", "fix", "sci", "eng"];
pub const ANGLE_UNITS: [&str; 3] = ["deg", "rad", "grad"];
pub const EDIT_MODES: [&str; 4] = ["insert", "overwrite", "prepend", "append"];
pub const ENDIANNESS: [&str; 2] = ["big", "small"];
pub const REPRESENTATIONS: [&str; 8] = [
    "twos-c", "ones-c", "smr", "excess-k", "negabinary", "math", "unsigned", "float",
];
pub const SHIFT_TYPES: [&str; 3] = ["logical", "arithmetic", "rotate"];
pub const RADIXES: [&str; 4] = ["bin", "oct", "dec", "hex"];
pub const RADIX_CODES: [u32; 4] = [2, 8, 10, 16];
pub const BIT_LENGTHS: [&str; 6] = ["4", "8", "16", "32", "64", "unlimited"];
pub const ROUNDINGS: [&str; 2] = ["half-up", "half-even"];

/// A named, validated set of non-overlapping fields for one calculator mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    name: String,
    capacity: u32,
    default: ModifierValue,
    fields: Vec<Field>,
}

/// One decoded field, for logging and inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub name: String,
    pub value: u128,
    pub label: Option<String>,
}

impl Layout {
    /// # Examples
    ///
    /// ```
    /// use modifier_engine::Layout;
    ///
    /// let layout = Layout::builder("mini", 8)
    ///     .flag("shift", 0)
    ///     .onehot("unit", 1, &["deg", "rad"])
    ///     .default_value(0b010)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(layout.field("unit").unwrap().offset(), 1);
    /// assert!(layout.field("missing").is_none());
    /// ```
    pub fn builder(name: &str, capacity: u32) -> LayoutBuilder {
        LayoutBuilder::new(name, capacity)
    }

    pub fn scientific() -> Self {
        Self::builder(SCIENTIFIC, SCIENTIFIC_CAPACITY)
            .flag("shift", 0)
            .flag("hyp", 1)
            .flag("rcl", 2)
            .flag("caps-lock", 3)
            .flag("num-lock", 4)
            .flag("expr", 5)
            .flag("comp", 6)
            .flag("suffix", 7)
            .onehot("result-type", 8, &RESULT_TYPES)
            .onehot("angle-unit", 14, &ANGLE_UNITS)
            .onehot("edit-mode", 17, &EDIT_MODES)
            .default_value(SCIENTIFIC_DEFAULT)
            .build_static()
    }

    pub fn programmer() -> Self {
        Self::builder(PROGRAMMER, PROGRAMMER_CAPACITY)
            .flag("shift", 0)
            .flag("float-const", 1)
            .flag("caps-lock", 2)
            .flag("num-lock", 3)
            .onehot("endian", 4, &ENDIANNESS)
            .enumeration("representation", 6, 3, &REPRESENTATIONS)
            .enumeration("shift-type", 9, 2, &SHIFT_TYPES)
            .enumeration("radix", 12, 2, &RADIXES)
            .codes(&RADIX_CODES)
            .onehot("bit-length", 14, &BIT_LENGTHS)
            .onehot("rounding", 20, &ROUNDINGS)
            .onehot("edit-mode", 22, &EDIT_MODES)
            .default_value(PROGRAMMER_DEFAULT)
            .build_static()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn default_value(&self) -> ModifierValue {
        self.default
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Bits not covered by any field.
    pub fn reserved_mask(&self) -> ModifierValue {
        let used = self.fields.iter().fold(0, |acc, f| acc | f.mask());
        !used & bit::ones(self.capacity)
    }

    /// Decodes every field of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use modifier_engine::Layout;
    ///
    /// let sci = Layout::scientific();
    /// let view = sci.describe(0x101);
    /// assert_eq!(view[0].name, "shift");
    /// assert_eq!(view[0].value, 1);
    ///
    /// let result_type = view.iter().find(|v| v.name == "result-type").unwrap();
    /// assert_eq!(result_type.label.as_deref(), Some("dec"));
    /// ```
    pub fn describe(&self, value: ModifierValue) -> Vec<FieldView> {
        self.fields
            .iter()
            .map(|f| {
                let decoded = modifier::get_field(value, f);
                let label = match f.kind() {
                    FieldKind::Flag => None,
                    FieldKind::OneHot => modifier::onehot_index(value, f)
                        .and_then(|i| f.label(i as usize))
                        .map(|s| s.to_string()),
                    FieldKind::Enum => usize::try_from(decoded)
                        .ok()
                        .and_then(|i| f.label(i))
                        .map(|s| s.to_string()),
                };
                FieldView { name: f.name().to_string(), value: decoded, label }
            })
            .collect()
    }
}

/// Collects fields in bit order and validates them on [`build`](Self::build).
pub struct LayoutBuilder {
    name: String,
    capacity: u32,
    default: ModifierValue,
    fields: Vec<Field>,
    misuse: Option<LayoutError>,
}

impl LayoutBuilder {
    pub fn new(name: &str, capacity: u32) -> Self {
        Self {
            name: name.to_string(),
            capacity,
            default: bit::new(),
            fields: Vec::new(),
            misuse: None,
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn flag(self, name: &str, offset: u32) -> Self {
        self.field(Field::flag(name, offset))
    }

    pub fn onehot(self, name: &str, offset: u32, labels: &[&str]) -> Self {
        self.field(Field::onehot(name, offset, labels))
    }

    pub fn enumeration(self, name: &str, offset: u32, width: u32, labels: &[&str]) -> Self {
        self.field(Field::enumeration(name, offset, width).with_labels(labels))
    }

    /// Attaches presentation codes to the last field added. Codes given
    /// before any field make [`build`](Self::build) fail.
    pub fn codes(mut self, codes: &[u32]) -> Self {
        match self.fields.pop() {
            Some(last) => self.fields.push(last.with_codes(codes)),
            None if self.misuse.is_none() => {
                self.misuse = Some(LayoutError::InvalidLabels(format!(
                    "'{}': codes {:?} given before any field", self.name, codes
                )));
            }
            None => {}
        }
        self
    }

    pub fn default_value(mut self, value: ModifierValue) -> Self {
        self.default = value;
        self
    }

    pub fn build(self) -> Result<Layout, LayoutError> {
        fn_log!("LayoutBuilder", "build", &self.name);

        if let Some(err) = self.misuse {
            return Err(err);
        }

        if self.capacity == 0 || self.capacity > bit::CAPACITY {
            return Err(LayoutError::InvalidCapacity(format!(
                "'{}': capacity {} not in 1..={}",
                self.name, self.capacity, bit::CAPACITY
            )));
        }

        let mut previous: Option<&Field> = None;
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name() == field.name()) {
                return Err(LayoutError::DuplicateName(format!("'{}'", field.name())));
            }
            validate_shape(field)?;

            if field.end() > self.capacity {
                return Err(LayoutError::ExceedsCapacity(format!(
                    "'{}' ends at bit {}, capacity is {}",
                    field.name(), field.end(), self.capacity
                )));
            }

            if let Some(prev) = previous {
                if field.overlaps(prev) {
                    return Err(LayoutError::Overlap(format!(
                        "'{}' overlaps '{}'", field.name(), prev.name()
                    )));
                }
                if field.offset() < prev.offset() {
                    return Err(LayoutError::OutOfOrder(format!(
                        "'{}' at bit {} follows '{}' at bit {}",
                        field.name(), field.offset(), prev.name(), prev.offset()
                    )));
                }
            }
            previous = Some(field);
        }

        if self.default & !bit::ones(self.capacity) != 0 {
            return Err(LayoutError::DefaultOutOfRange(format!(
                "'{}': default {:#x} exceeds {} bits",
                self.name, self.default, self.capacity
            )));
        }

        Ok(Layout {
            name: self.name,
            capacity: self.capacity,
            default: self.default,
            fields: self.fields,
        })
    }

    // Built-in tables are fixed and covered by tests.
    fn build_static(self) -> Layout {
        match self.build() {
            Ok(layout) => layout,
            Err(e) => unreachable!("built-in layout is invalid: {}", e),
        }
    }
}

fn validate_shape(field: &Field) -> Result<(), LayoutError> {
    let name = field.name();
    let width = field.width();
    match field.kind() {
        FieldKind::Flag if width != 1 => {
            return Err(LayoutError::InvalidWidth(format!("flag '{}' has width {}", name, width)));
        }
        FieldKind::OneHot if width < 2 => {
            return Err(LayoutError::InvalidWidth(format!("onehot '{}' has width {}", name, width)));
        }
        FieldKind::Enum if width == 0 => {
            return Err(LayoutError::InvalidWidth(format!("enum '{}' has width 0", name)));
        }
        _ => {}
    }

    let labels = field.labels().len();
    match field.kind() {
        FieldKind::Flag if labels > 0 => Err(LayoutError::InvalidLabels(format!(
            "flag '{}' cannot carry labels", name
        ))),
        FieldKind::OneHot if labels > 0 && labels != width as usize => Err(LayoutError::InvalidLabels(format!(
            "onehot '{}' has {} labels for {} bits", name, labels, width
        ))),
        FieldKind::Enum if labels as u128 > field.limit() => Err(LayoutError::InvalidLabels(format!(
            "enum '{}' has {} labels for {} values", name, labels, field.limit()
        ))),
        _ if field.codes().len() as u128 > field.limit() => {
            Err(LayoutError::InvalidLabels(format!("'{}' has more codes than values", name)))
        }
        _ => Ok(()),
    }
}
