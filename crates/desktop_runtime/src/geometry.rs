//! Window placement, drag clamping and maximize layout.
//!
//! Geometry is presentation-only state. It is computed once when a window is first created and
//! then only changes through drags; maximize is a view over it, so restoring returns to the last
//! normal rect.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{PointerPosition, Viewport, WindowKey, WindowRecord};

/// Space kept free around a new window.
pub const WINDOW_MARGIN: i32 = 40;
/// Minimum gap between a new window and the desktop edge.
pub const WINDOW_EDGE_GAP: i32 = 10;
pub const STAGGER_STEP: i32 = 25;
pub const STAGGER_SLOTS: u64 = 5;
/// Horizontal strip of a dragged window that must stay on screen.
pub const MIN_VISIBLE_WIDTH: i32 = 100;
/// Lowest a dragged title bar may go above the taskbar.
pub const TITLEBAR_GRAB_HEIGHT: i32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowGeometry {
    /// Inline CSS placing the window on the desktop.
    pub fn to_css(self) -> String {
        format!(
            "left:{}px;top:{}px;width:{}px;height:{}px;",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Centered, cascaded and clamped first placement for a window.
pub fn initial_layout(key: &WindowKey, preferred: (i32, i32), viewport: Viewport) -> WindowGeometry {
    let screen_w = viewport.width;
    let screen_h = viewport.usable_height();
    let width = preferred.0.min(screen_w - WINDOW_MARGIN).max(1);
    let height = preferred.1.min(screen_h - WINDOW_MARGIN).max(1);
    let stagger = (key.stagger_seed() % STAGGER_SLOTS) as i32 * STAGGER_STEP;

    let centered_x = (screen_w - width) / 2;
    let centered_y = (screen_h - height) / 2;
    // `min` before `max`: on tiny screens the edge gap wins.
    let x = (centered_x + stagger)
        .min(screen_w - width - WINDOW_EDGE_GAP)
        .max(WINDOW_EDGE_GAP);
    let y = (centered_y + stagger)
        .min(screen_h - height - WINDOW_EDGE_GAP)
        .max(WINDOW_EDGE_GAP);

    WindowGeometry {
        x,
        y,
        width,
        height,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    pub key: WindowKey,
    /// Pointer position relative to the window's top-left corner at grab time.
    pub offset: PointerPosition,
}

impl DragSession {
    /// Starts a title-bar drag. Maximized windows cannot be dragged.
    pub fn begin(
        key: WindowKey,
        geometry: WindowGeometry,
        pointer: PointerPosition,
        maximized: bool,
    ) -> Option<Self> {
        if maximized {
            return None;
        }
        Some(Self {
            key,
            offset: PointerPosition {
                x: pointer.x - geometry.x,
                y: pointer.y - geometry.y,
            },
        })
    }
}

/// Position for `geometry` after moving the pointer to `pointer`.
///
/// At least `MIN_VISIBLE_WIDTH` pixels stay on screen horizontally and the title bar never goes
/// above the top edge or under the taskbar.
pub fn drag_to(
    session: &DragSession,
    geometry: WindowGeometry,
    pointer: PointerPosition,
    viewport: Viewport,
) -> WindowGeometry {
    let x = (pointer.x - session.offset.x)
        .min(viewport.width - MIN_VISIBLE_WIDTH)
        .max(MIN_VISIBLE_WIDTH - geometry.width);
    let y = (pointer.y - session.offset.y)
        .min(viewport.usable_height() - TITLEBAR_GRAB_HEIGHT)
        .max(0);
    WindowGeometry { x, y, ..geometry }
}

/// Rect a window is drawn at.
pub fn presented_rect(geometry: WindowGeometry, maximized: bool, viewport: Viewport) -> WindowGeometry {
    if maximized {
        WindowGeometry {
            x: 0,
            y: 0,
            width: viewport.width,
            height: viewport.usable_height(),
        }
    } else {
        geometry
    }
}

/// Minimized windows keep their record but drop their app body.
pub fn window_body_mounted(record: &WindowRecord) -> bool {
    record.is_open && !record.is_minimized
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationState {
    geometries: BTreeMap<WindowKey, WindowGeometry>,
    dragging: Option<DragSession>,
}

impl PresentationState {
    pub fn geometry(&self, key: &WindowKey) -> Option<WindowGeometry> {
        self.geometries.get(key).copied()
    }

    /// Geometry for `key`, computing the first placement when there is none yet.
    pub fn ensure(&mut self, key: &WindowKey, preferred: (i32, i32), viewport: Viewport) -> WindowGeometry {
        *self
            .geometries
            .entry(key.clone())
            .or_insert_with(|| initial_layout(key, preferred, viewport))
    }

    pub fn forget(&mut self, key: &WindowKey) {
        self.geometries.remove(key);
        if self.dragging.as_ref().is_some_and(|drag| &drag.key == key) {
            self.dragging = None;
        }
    }

    pub fn dragging(&self) -> Option<&DragSession> {
        self.dragging.as_ref()
    }

    pub fn begin_move(&mut self, key: &WindowKey, pointer: PointerPosition, maximized: bool) -> bool {
        let Some(geometry) = self.geometry(key) else {
            return false;
        };
        self.dragging = DragSession::begin(key.clone(), geometry, pointer, maximized);
        self.dragging.is_some()
    }

    /// Applies a pointer move to the dragged window, returning its key.
    pub fn update_move(&mut self, pointer: PointerPosition, viewport: Viewport) -> Option<WindowKey> {
        let session = self.dragging.as_ref()?;
        let geometry = self.geometries.get_mut(&session.key)?;
        *geometry = drag_to(session, *geometry, pointer, viewport);
        Some(session.key.clone())
    }

    pub fn end_move(&mut self) -> Option<WindowKey> {
        self.dragging.take().map(|session| session.key)
    }
}
