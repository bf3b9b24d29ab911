//! Keyboard and pointer bindings.

use crate::constants::PAN_BUTTON;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Turn the surface picker on or off.
    TogglePicker,
    /// Remove the picker's spheres and spoke.
    ClearPicks,
    ToggleAutoRotate,
    ToggleHint,
    /// Put the camera back where it started.
    ResetView,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "p" | "P" => Some(KeyAction::TogglePicker),
        "c" | "C" => Some(KeyAction::ClearPicks),
        "r" | "R" => Some(KeyAction::ToggleAutoRotate),
        "h" | "H" => Some(KeyAction::ToggleHint),
        "0" | "Home" => Some(KeyAction::ResetView),
        _ => None,
    }
}

/// Whether a drag starting with `button` pressed pans rather than rotates.
#[inline]
pub fn is_pan_drag(button: i16, shift: bool) -> bool {
    shift || button == PAN_BUTTON
}
