use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::Lens;
use crate::channel::ChannelTable;
use crate::error::ShowcaseError;
use crate::framing::FramingConfig;
use crate::rotation::ROTATION_EPSILON;
use crate::tween::TweenTiming;

/// DOM selectors the tweens are aimed at
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub mount: String,
    pub header: String,
    pub header_chars: String,
    pub mask: String,
    pub secondary_header: String,
    pub divider: String,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            mount: ".modal-container".into(),
            header: ".header-1".into(),
            header_chars: ".header-1 h1 .char>span".into(),
            mask: ".circular-mask".into(),
            secondary_header: ".header-2".into(),
            divider: ".tooltip .divider".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub channels: ChannelTable,
    pub mobile_breakpoint: f32,
    pub lens: Lens,
    pub framing: FramingConfig,
    pub rotation_epsilon: f32,
    pub tooltip_timing: TweenTiming,
    pub header_reveal_timing: TweenTiming,
    pub targets: Targets,
    pub asset_url: String,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            channels: ChannelTable::default(),
            mobile_breakpoint: 1000.0,
            lens: Lens::default(),
            framing: FramingConfig::default(),
            rotation_epsilon: ROTATION_EPSILON,
            tooltip_timing: TweenTiming::entrance(),
            header_reveal_timing: TweenTiming::entrance(),
            targets: Targets::default(),
            asset_url: "shaker.glb".into(),
        }
    }
}

impl ShowcaseConfig {
    pub fn from_json(source: &str) -> Result<Self, ShowcaseError> {
        let config: ShowcaseConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShowcaseError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn to_json(&self) -> Result<String, ShowcaseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ShowcaseError> {
        self.channels.validate()
    }
}
