//! The boundary to whatever tweens DOM properties.
//!
//! The showcase computes target values and hands them over as [`Tween`]s. With
//! a duration of [`IMMEDIATE`] the engine just sets them; anything longer is an
//! eased, optionally staggered transition played by the engine on its own clock.

use std::fmt::{Display, Formatter};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::units::{Percent, Seconds, IMMEDIATE};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, Serialize, Deserialize)]
pub enum Ease {
    #[default]
    #[strum(serialize = "none")]
    Linear,
    #[strum(serialize = "power3.out")]
    Power3Out,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Property {
    XPercent(Percent),
    YPercent(Percent),
    /// `clip-path: circle(r% at 50% 50%)`
    ClipCircle(Percent),
    ScaleX(f32),
}

impl Display for Property {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Property::XPercent(percent) => write!(f, "xPercent: {}", percent.0),
            Property::YPercent(percent) => write!(f, "y: {percent}"),
            Property::ClipCircle(radius) => write!(f, "clipPath: circle({radius} at 50% 50%)"),
            Property::ScaleX(scale) => write!(f, "scaleX: {scale}"),
        }
    }
}

/// Timing shared by every element of a tween
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweenTiming {
    pub duration: Seconds,
    pub ease: Ease,
    /// Delay between consecutive elements
    pub stagger: Seconds,
}

impl TweenTiming {
    pub const IMMEDIATE: TweenTiming = TweenTiming {
        duration: IMMEDIATE,
        ease: Ease::Linear,
        stagger: IMMEDIATE,
    };

    /// Entrance used for split text: one second, decelerating, 25ms apart
    pub fn entrance() -> Self {
        Self {
            duration: Seconds(1.0),
            ease: Ease::Power3Out,
            stagger: Seconds::from_millis(25.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub targets: Vec<String>,
    pub properties: Vec<Property>,
    pub timing: TweenTiming,
    pub transform_origin: Option<String>,
}

impl Tween {
    pub fn set(target: &str, property: Property) -> Self {
        Self {
            targets: vec![target.to_string()],
            properties: vec![property],
            timing: TweenTiming::IMMEDIATE,
            transform_origin: None,
        }
    }

    pub fn animate(targets: &[String], property: Property, timing: TweenTiming) -> Self {
        Self {
            targets: targets.to_vec(),
            properties: vec![property],
            timing,
            transform_origin: None,
        }
    }

    pub fn with_origin(mut self, origin: &str) -> Self {
        self.transform_origin = Some(origin.to_string());
        self
    }

    pub fn is_immediate(&self) -> bool {
        self.timing.duration.is_immediate()
    }
}

impl Display for Tween {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let properties: Vec<String> = self.properties.iter().map(|p| p.to_string()).collect();
        write!(f, "{:?} {{ {} }}", self.targets, properties.join(", "))?;
        if !self.is_immediate() {
            write!(
                f,
                " over {} {} stagger {}",
                self.timing.duration, self.timing.ease, self.timing.stagger
            )?;
        }
        if let Some(origin) = &self.transform_origin {
            write!(f, " origin {origin}")?;
        }
        Ok(())
    }
}

pub trait TweenEngine {
    fn to(&mut self, tween: Tween);
}

/// Keeps every tween it is given, for inspection
#[derive(Debug, Default)]
pub struct TweenRecorder {
    pub tweens: Vec<Tween>,
}

impl TweenRecorder {
    pub fn take(&mut self) -> Vec<Tween> {
        std::mem::take(&mut self.tweens)
    }

    /// Latest tween aimed at `target`
    pub fn last_for(&self, target: &str) -> Option<&Tween> {
        self.tweens
            .iter()
            .rev()
            .find(|tween| tween.targets.iter().any(|t| t == target))
    }
}

impl TweenEngine for TweenRecorder {
    fn to(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }
}

/// Writes tweens to the log instead of a page
#[derive(Debug, Default)]
pub struct TweenLogger;

impl TweenEngine for TweenLogger {
    fn to(&mut self, tween: Tween) {
        debug!("tween {tween}");
    }
}
