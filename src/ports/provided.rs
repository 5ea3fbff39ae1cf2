use crate::common::bit::ModifierValue;

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    InvalidCapacity(String),
    DuplicateName(String),
    InvalidWidth(String),
    InvalidLabels(String),
    ExceedsCapacity(String),
    OutOfOrder(String),
    Overlap(String),
    DefaultOutOfRange(String),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::InvalidCapacity(msg)   => write!(f, "InvalidCapacity: {}", msg),
            LayoutError::DuplicateName(msg)     => write!(f, "DuplicateName: {}", msg),
            LayoutError::InvalidWidth(msg)      => write!(f, "InvalidWidth: {}", msg),
            LayoutError::InvalidLabels(msg)     => write!(f, "InvalidLabels: {}", msg),
            LayoutError::ExceedsCapacity(msg)   => write!(f, "ExceedsCapacity: {}", msg),
            LayoutError::OutOfOrder(msg)        => write!(f, "OutOfOrder: {}", msg),
            LayoutError::Overlap(msg)           => write!(f, "Overlap: {}", msg),
            LayoutError::DefaultOutOfRange(msg) => write!(f, "DefaultOutOfRange: {}", msg),
        }
    }
}

impl std::error::Error for LayoutError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ModifierError {
    /// Index does not fit the field. Nothing was written.
    Range { field: String, index: u128, limit: u128 },
    UnknownField(String),
    KindMismatch { field: String, expected: &'static str, actual: &'static str },
}

impl std::fmt::Display for ModifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModifierError::Range { field, index, limit } => {
                write!(f, "Range: index {} out of range for '{}' (limit {})", index, field, limit)
            }
            ModifierError::UnknownField(name) => write!(f, "UnknownField: {}", name),
            ModifierError::KindMismatch { field, expected, actual } => {
                write!(f, "KindMismatch: '{}' is {}, expected {}", field, actual, expected)
            }
        }
    }
}

impl std::error::Error for ModifierError {}

#[derive(Debug, PartialEq)]
pub enum ManifestError {
    FileNotFound(String),
    AmbiguousFile(String),
    ReadError(String),
    ParseError(String),
    InvalidLayout(LayoutError),
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::FileNotFound(msg)  => write!(f, "FileNotFound: {}", msg),
            ManifestError::AmbiguousFile(msg) => write!(f, "AmbiguousFile: {}", msg),
            ManifestError::ReadError(msg)     => write!(f, "ReadError: {}", msg),
            ManifestError::ParseError(msg)    => write!(f, "ParseError: {}", msg),
            ManifestError::InvalidLayout(err) => write!(f, "InvalidLayout: {}", err),
        }
    }
}

impl std::error::Error for ManifestError {}

impl From<LayoutError> for ManifestError {
    fn from(err: LayoutError) -> Self {
        ManifestError::InvalidLayout(err)
    }
}

/// The primary interface for modifier-engine. Reads and mutates one
/// calculator mode's modifier value by field name.
pub trait Modifiers {
    /// Decoded value of the field: 0/1 for flags, the integer for enums,
    /// the current index for one-hot groups.
    fn get(&self, name: &str) -> Result<u128, ModifierError>;

    /// Flips a flag field. Returns the new value.
    fn toggle(&mut self, name: &str) -> Result<ModifierValue, ModifierError>;

    /// Cycles a one-hot or enum field to its next index, wrapping after
    /// the last one. Returns that index.
    fn advance(&mut self, name: &str) -> Result<u128, ModifierError>;

    /// Writes an enum value or selects a one-hot index. Returns the new value.
    fn set(&mut self, name: &str, index: u128) -> Result<ModifierValue, ModifierError>;
}
