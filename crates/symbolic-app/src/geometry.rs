// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Panel placement relative to its anchor.
//!
//! All coordinates are terminal cells measured from the top-left corner of
//! the scrollable content. Arithmetic saturates, so no input can panic.

use crate::HostId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Position and outer size of a laid-out element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub origin: Point,
    pub size: Size,
}

impl Bounds {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        let right = u32::from(self.origin.x) + u32::from(self.size.width);
        let bottom = u32::from(self.origin.y) + u32::from(self.size.height);
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && u32::from(point.x) < right
            && u32::from(point.y) < bottom
    }
}

/// Visible part of the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub size: Size,
    pub scroll: Point,
}

impl Viewport {
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            scroll: Point::new(0, 0),
        }
    }

    pub const fn scrolled(mut self, scroll: Point) -> Self {
        self.scroll = scroll;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelOffset {
    pub top: u16,
    pub left: u16,
}

impl PanelOffset {
    pub fn bounds(self, size: Size) -> Bounds {
        Bounds::new(self.left, self.top, size.width, size.height)
    }
}

/// Geometry queries answered by whatever draws the picker.
pub trait Surface {
    fn anchor_bounds(&self, host: HostId) -> Bounds;
    fn panel_size(&self, host: HostId) -> Size;
    fn viewport(&self) -> Viewport;
}

/// Places the panel directly below the anchor, then pulls it back inside
/// the visible viewport when it would overflow the right or bottom edge.
pub fn compute_offset(
    anchor_offset: Point,
    anchor_size: Size,
    panel_size: Size,
    viewport_size: Size,
    scroll_offset: Point,
) -> PanelOffset {
    let view_width = u32::from(viewport_size.width) + u32::from(scroll_offset.x);
    let view_height = u32::from(viewport_size.height) + u32::from(scroll_offset.y);
    let panel_width = u32::from(panel_size.width);
    let panel_height = u32::from(panel_size.height);

    let left = u32::from(anchor_offset.x);
    let top = u32::from(anchor_offset.y) + u32::from(anchor_size.height);

    let shift_x = if left + panel_width > view_width && view_width > panel_width {
        left + panel_width - view_width
    } else {
        0
    };
    // Flip above the anchor rather than sliding up by the overflow.
    let shift_y = if top + panel_height > view_height && view_height > panel_height {
        panel_height + u32::from(anchor_size.height)
    } else {
        0
    };

    PanelOffset {
        top: clamp_cell(top - shift_y.min(top)),
        left: clamp_cell(left - shift_x.min(left)),
    }
}

/// `compute_offset` with every input read from the surface.
pub fn offset_for<S: Surface + ?Sized>(surface: &S, host: HostId) -> PanelOffset {
    let anchor = surface.anchor_bounds(host);
    let viewport = surface.viewport();
    compute_offset(
        anchor.origin,
        anchor.size,
        surface.panel_size(host),
        viewport.size,
        viewport.scroll,
    )
}

fn clamp_cell(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
