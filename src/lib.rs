#[cfg(feature = "logging")]
#[doc(hidden)]
pub use log;

pub mod common;
pub mod field;
pub mod modifier;
pub mod layout;
pub mod keypad;
pub mod ports;
pub mod session;
#[cfg(feature = "builder")]
pub mod manifest;

pub use common::LogFormat;
pub use common::bit::ModifierValue;
pub use field::{Field, FieldKind};
pub use layout::{Layout, LayoutBuilder};
pub use session::Session;
pub use modifier::{advance_enum, advance_one_hot, get_field, set_enum, toggle_flag};
#[cfg(feature = "builder")]
pub use manifest::LayoutManifest;

pub use ports::provided::Modifiers;
pub use ports::required::KeypadRenderer;

pub use ports::provided::{LayoutError, ManifestError, ModifierError};
