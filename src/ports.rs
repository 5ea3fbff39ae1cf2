// Ports - boundary between the engine and the presentation layer

pub mod provided;
pub mod required;

pub use provided::*;
pub use required::*;
