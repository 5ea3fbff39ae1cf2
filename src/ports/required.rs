// Required Ports - interfaces the presentation layer implements
use crate::common::bit::ModifierValue;
use crate::keypad::KeyGrid;
use crate::layout::Layout;

/// Keypad renderer
/// Maps a modifier value to the glyphs shown on every key.
///
/// Called after each mutation of a `Session`. The session does not read
/// the returned grid; renderers that draw as a side effect may return it
/// for their own bookkeeping.
pub trait KeypadRenderer {
    fn render(&mut self, layout: &Layout, value: ModifierValue) -> KeyGrid;
}
