use serde::{Deserialize, Serialize};

/// Position within the pinned region, always inside [0,1]
#[derive(Clone, Copy, Default, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Progress(f32);

impl Progress {
    pub const START: Progress = Progress(0.0);
    pub const END: Progress = Progress(1.0);

    /// Upstream trackers glitch now and then, so anything is accepted and clamped.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn reached(self, threshold: f32) -> bool {
        self.0 >= threshold
    }
}

impl From<f32> for Progress {
    fn from(value: f32) -> Self {
        Progress::new(value)
    }
}

/// A section pinned while the page scrolls through a fixed distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinnedRegion {
    /// Scroll offset in pixels where the section top meets the viewport top
    pub start: f32,
    /// Pixels of scrolling the section stays pinned for
    pub length: f32,
}

/// The section stays pinned for ten viewport heights.
pub const PIN_LENGTH_IN_VIEWPORTS: f32 = 10.0;

impl PinnedRegion {
    pub fn new(start: f32, viewport_height: f32) -> Self {
        Self {
            start,
            length: viewport_height * PIN_LENGTH_IN_VIEWPORTS,
        }
    }

    pub fn end(&self) -> f32 {
        self.start + self.length
    }

    pub fn progress_at(&self, scroll_y: f32) -> Progress {
        if self.length <= 0.0 {
            return if scroll_y < self.start {
                Progress::START
            } else {
                Progress::END
            };
        }
        Progress::new((scroll_y - self.start) / self.length)
    }
}
