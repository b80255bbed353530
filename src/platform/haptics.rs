//! Vibration feedback

use crate::sim::{GameEvent, Side};

/// Vibration pattern (ms on/off) for an event, if it has one
pub fn pattern(event: &GameEvent) -> Option<&'static [u32]> {
    match event {
        GameEvent::WallHit => Some(&[10]),
        GameEvent::PaddleHit {
            side: Side::Left, ..
        } => Some(&[10]),
        GameEvent::PaddleHit {
            side: Side::Right, ..
        } => Some(&[8]),
        GameEvent::Score { .. } => Some(&[30, 20]),
        GameEvent::Serve { .. } => None,
    }
}

/// Vibrate the device for an event. Silently does nothing without support.
#[cfg(target_arch = "wasm32")]
pub fn vibrate(event: &GameEvent) {
    use wasm_bindgen::JsValue;

    let Some(pattern) = pattern(event) else { return };
    let Some(window) = web_sys::window() else { return };
    let array = js_sys::Array::new();
    for &ms in pattern {
        array.push(&JsValue::from(ms));
    }
    let _ = window.navigator().vibrate_with_pattern(&array);
}
