pub mod camera;
pub mod channel;
pub mod config;
pub mod error;
pub mod framing;
pub mod geometry;
pub mod loader;
pub mod model;
pub mod render;
pub mod rotation;
pub mod scroll;
pub mod showcase;
pub mod tween;
pub mod units;
pub mod viewport;

pub use config::ShowcaseConfig;
pub use error::{LoadError, ShowcaseError};
pub use scroll::Progress;
pub use showcase::Showcase;

/// Something that happened to the presentation, delivered on the render thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowcaseEvent {
    /// Progress through the pinned region, clamped on arrival
    Scroll(f32),
    Resize {
        width: f32,
        height: f32,
    },
    /// The section came into view from above
    SectionEntered,
    /// The section was scrolled back out above
    SectionLeftBack,
    /// Time to paint
    Frame,
}
