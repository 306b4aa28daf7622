use serde::{Deserialize, Serialize};
use strum::Display;

/// Logical size of the rendering surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// None for a collapsed surface, so nobody divides by zero.
    pub fn aspect(&self) -> Option<f32> {
        (!self.is_empty()).then(|| self.width / self.height)
    }

    pub fn class(&self, mobile_breakpoint: f32) -> ViewportClass {
        ViewportClass::of_width(self.width, mobile_breakpoint)
    }
}

impl ViewportClass {
    pub fn of_width(width: f32, mobile_breakpoint: f32) -> Self {
        if width < mobile_breakpoint {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == ViewportClass::Mobile
    }
}

/// Where the showcase learns how much room it has
pub trait ViewportOracle {
    /// Size of the element the canvas mounts into, if there is one
    fn container_size(&self) -> Option<Viewport>;

    /// Size of the whole window, if there is one
    fn window_size(&self) -> Option<Viewport>;

    /// Container when it has area, otherwise the window.
    fn current(&self) -> Option<Viewport> {
        self.container_size()
            .filter(|viewport| !viewport.is_empty())
            .or_else(|| self.window_size())
    }
}

/// An oracle reporting sizes it was told about, for hosts without a window system
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedViewport {
    pub container: Option<Viewport>,
    pub window: Option<Viewport>,
}

impl FixedViewport {
    pub fn window(width: f32, height: f32) -> Self {
        Self {
            container: None,
            window: Some(Viewport::new(width, height)),
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        match &mut self.container {
            Some(container) => *container = viewport,
            None => self.window = Some(viewport),
        }
    }
}

impl ViewportOracle for FixedViewport {
    fn container_size(&self) -> Option<Viewport> {
        self.container
    }

    fn window_size(&self) -> Option<Viewport> {
        self.window
    }
}
