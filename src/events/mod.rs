mod keyboard;
mod picker;
mod pointer;

pub use keyboard::wire_global_keydown;
pub use picker::PickerTool;
pub use pointer::{wire_input_handlers, InputWiring};
