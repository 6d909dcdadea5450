//! Browser environment queries used by the shell: viewport size, wall clock and DOM focus.
//!
//! Off-wasm builds return fixed values so the state layers stay testable on the host.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::launcher::ClockReading;
use crate::model::{PointerPosition, Viewport};

/// Current browser window size, taskbar included.
pub fn desktop_viewport() -> Viewport {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(1024);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(768);
            return Viewport::new(width.max(320), height.max(320));
        }
    }

    Viewport::default()
}

/// Local time from the browser clock.
pub fn clock_now() -> ClockReading {
    #[cfg(target_arch = "wasm32")]
    {
        let date = js_sys::Date::new_0();
        return ClockReading {
            hour: date.get_hours(),
            minute: date.get_minutes(),
            month: date.get_month(),
            day: date.get_date(),
        };
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        ClockReading::default()
    }
}

pub fn pointer_from_mouse_event(ev: &web_sys::MouseEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

pub fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Focuses an element by id and reports whether a focusable HTML element was found.
pub fn focus_element_by_id(id: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return false;
        };
        let Some(element) = document.get_element_by_id(id) else {
            return false;
        };
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            return false;
        };
        let _ = element.focus();
        if let Ok(input) = element.dyn_into::<web_sys::HtmlInputElement>() {
            input.select();
        }
        return true;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = id;
        false
    }
}

/// Focuses the container `id` unless focus already sits inside it.
pub fn focus_container_by_id(id: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return false;
        };
        let Some(element) = document.get_element_by_id(id) else {
            return false;
        };
        if let Some(active) = document.active_element() {
            if element.contains(Some(active.as_ref())) {
                return true;
            }
        }
        return focus_element_by_id(id);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = id;
        false
    }
}
