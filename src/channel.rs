//! Progress to presentation values.
//!
//! Every visual property driven by the pinned section is an [`AnimationChannel`]:
//! a table of breakpoints covering progress from 0 to 1. Mapping is pure, so
//! [`ChannelTable::map`] can be called on every scroll tick and in tests alike.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::{ChannelError, ShowcaseError};
use crate::scroll::Progress;
use crate::units::{Percent, Radians};

/// Total spin of the model across the rotation ramp
pub const MAX_ROTATION: f32 = PI * 3.0 * 4.0;

/// One linear piece of a channel, closed at both ends
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub start: f32,
    pub end: f32,
    pub from: f32,
    pub to: f32,
}

impl Breakpoint {
    pub fn new(start: f32, end: f32, from: f32, to: f32) -> Self {
        Self { start, end, from, to }
    }

    pub fn hold(start: f32, end: f32, value: f32) -> Self {
        Self::new(start, end, value, value)
    }

    /// Boundaries hit exactly, no rounding through the lerp.
    pub fn value_at(&self, progress: f32) -> f32 {
        if progress <= self.start {
            self.from
        } else if progress >= self.end {
            self.to
        } else {
            let nuance = (progress - self.start) / (self.end - self.start);
            self.from + (self.to - self.from) * nuance
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationChannel {
    breakpoints: Vec<Breakpoint>,
}

impl AnimationChannel {
    pub fn new(breakpoints: Vec<Breakpoint>) -> Result<Self, ChannelError> {
        let channel = Self { breakpoints };
        channel.validate()?;
        Ok(channel)
    }

    /// Holds `from` before `start`, ramps linearly, then holds `to` after `end`.
    pub fn ramp(start: f32, end: f32, from: f32, to: f32) -> Self {
        let mut breakpoints = Vec::with_capacity(3);
        if start > 0.0 {
            breakpoints.push(Breakpoint::hold(0.0, start, from));
        }
        breakpoints.push(Breakpoint::new(start, end, from, to));
        if end < 1.0 {
            breakpoints.push(Breakpoint::hold(end, 1.0, to));
        }
        Self { breakpoints }
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    pub fn validate(&self) -> Result<(), ChannelError> {
        let (Some(first), Some(last)) = (self.breakpoints.first(), self.breakpoints.last()) else {
            return Err(ChannelError::Empty);
        };
        if first.start != 0.0 || last.end != 1.0 {
            return Err(ChannelError::NotCovering);
        }
        for (index, breakpoint) in self.breakpoints.iter().enumerate() {
            if breakpoint.end < breakpoint.start {
                return Err(ChannelError::Reversed { index });
            }
        }
        for (index, pair) in self.breakpoints.windows(2).enumerate() {
            if pair[1].start != pair[0].end {
                return Err(ChannelError::NotContiguous { index: index + 1 });
            }
        }
        Ok(())
    }

    pub fn value_at(&self, progress: Progress) -> f32 {
        let p = progress.value();
        let breakpoint = self
            .breakpoints
            .iter()
            .find(|breakpoint| p <= breakpoint.end)
            .or(self.breakpoints.last());
        match breakpoint {
            Some(breakpoint) => breakpoint.value_at(p),
            None => 0.0,
        }
    }

    /// Lowest and highest value the channel can produce
    pub fn range(&self) -> (f32, f32) {
        self.breakpoints
            .iter()
            .flat_map(|breakpoint| [breakpoint.from, breakpoint.to])
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(low, high), value| {
                (low.min(value), high.max(value))
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum TooltipState {
    Hidden,
    Revealed,
}

/// A tooltip that flips on a single threshold, however far past it progress goes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TooltipChannel {
    pub trigger: f32,
    /// Selectors of the split lines and icon that slide in together
    pub elements: Vec<String>,
}

impl TooltipChannel {
    pub fn new(trigger: f32, elements: &[&str]) -> Self {
        Self {
            trigger,
            elements: elements.iter().map(|element| element.to_string()).collect(),
        }
    }

    pub fn state_at(&self, progress: Progress) -> TooltipState {
        if progress.reached(self.trigger) {
            TooltipState::Revealed
        } else {
            TooltipState::Hidden
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ChannelId {
    HeaderOffset,
    MaskRadius,
    SecondaryHeaderOffset,
    DividerScale,
    ModelRotation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelTable {
    pub header_offset: AnimationChannel,
    pub mask_radius: AnimationChannel,
    pub secondary_header_offset: AnimationChannel,
    pub divider_scale: AnimationChannel,
    pub model_rotation: AnimationChannel,
    pub tooltips: Vec<TooltipChannel>,
}

impl Default for ChannelTable {
    fn default() -> Self {
        Self {
            header_offset: AnimationChannel::ramp(0.05, 0.35, 0.0, -100.0),
            mask_radius: AnimationChannel::ramp(0.20, 0.30, 0.0, 100.0),
            secondary_header_offset: AnimationChannel::ramp(0.15, 0.50, 100.0, -200.0),
            divider_scale: AnimationChannel::ramp(0.45, 0.65, 0.0, 1.0),
            model_rotation: AnimationChannel::ramp(0.05, 1.0, 0.0, MAX_ROTATION),
            tooltips: vec![
                TooltipChannel::new(
                    0.65,
                    &[
                        ".tooltips .tooltip:nth-child(1) .icon ion-icon",
                        ".tooltips .tooltip:nth-child(1) .title .line > span",
                        ".tooltips .tooltip:nth-child(1) .description .line > span",
                    ],
                ),
                TooltipChannel::new(
                    0.85,
                    &[
                        ".tooltips .tooltip:nth-child(2) .icon ion-icon",
                        ".tooltips .tooltip:nth-child(2) .title .line > span",
                        ".tooltips .tooltip:nth-child(2) .description .line > span",
                    ],
                ),
            ],
        }
    }
}

/// Everything the pinned section shows for one progress value
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelValues {
    pub progress: Progress,
    pub header_offset: Percent,
    pub mask_radius: Percent,
    pub secondary_header_offset: Percent,
    pub divider_scale: f32,
    pub rotation: Radians,
    pub tooltips: Vec<TooltipState>,
}

impl ChannelTable {
    pub fn channel(&self, id: ChannelId) -> &AnimationChannel {
        match id {
            ChannelId::HeaderOffset => &self.header_offset,
            ChannelId::MaskRadius => &self.mask_radius,
            ChannelId::SecondaryHeaderOffset => &self.secondary_header_offset,
            ChannelId::DividerScale => &self.divider_scale,
            ChannelId::ModelRotation => &self.model_rotation,
        }
    }

    pub fn validate(&self) -> Result<(), ShowcaseError> {
        use strum::IntoEnumIterator;
        for id in ChannelId::iter() {
            self.channel(id).validate()?;
        }
        if let Some(tooltip) = self
            .tooltips
            .iter()
            .find(|tooltip| !(0.0..=1.0).contains(&tooltip.trigger))
        {
            return Err(ShowcaseError::InvalidTrigger(tooltip.trigger));
        }
        Ok(())
    }

    pub fn map(&self, progress: Progress) -> ChannelValues {
        ChannelValues {
            progress,
            header_offset: Percent(self.header_offset.value_at(progress)),
            mask_radius: Percent(self.mask_radius.value_at(progress)),
            secondary_header_offset: Percent(self.secondary_header_offset.value_at(progress)),
            divider_scale: self.divider_scale.value_at(progress),
            rotation: Radians(self.model_rotation.value_at(progress)),
            tooltips: self
                .tooltips
                .iter()
                .map(|tooltip| tooltip.state_at(progress))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn samples() -> impl Iterator<Item = Progress> {
        (0..=1000).map(|step| Progress::new(step as f32 / 1000.0))
    }

    #[test]
    fn test_default_table_is_valid() {
        assert!(ChannelTable::default().validate().is_ok());
    }

    #[test]
    fn test_values_stay_in_range() {
        let table = ChannelTable::default();
        for id in ChannelId::iter() {
            let channel = table.channel(id);
            let (low, high) = channel.range();
            for progress in samples() {
                let value = channel.value_at(progress);
                assert!(
                    value >= low && value <= high,
                    "{id} produced {value} at {progress:?}, outside [{low}, {high}]"
                );
            }
        }
    }

    #[test]
    fn test_ramp_boundaries_exact() {
        let table = ChannelTable::default();
        let cases = [
            (ChannelId::HeaderOffset, 0.05, 0.35, 0.0, -100.0),
            (ChannelId::MaskRadius, 0.20, 0.30, 0.0, 100.0),
            (ChannelId::SecondaryHeaderOffset, 0.15, 0.50, 100.0, -200.0),
            (ChannelId::DividerScale, 0.45, 0.65, 0.0, 1.0),
            (ChannelId::ModelRotation, 0.05, 1.0, 0.0, MAX_ROTATION),
        ];
        for (id, start, end, from, to) in cases {
            let channel = table.channel(id);
            assert_eq!(channel.value_at(Progress::new(start)), from, "{id} at start");
            assert_eq!(channel.value_at(Progress::new(end)), to, "{id} at end");
            assert_eq!(channel.value_at(Progress::new(start - 0.01)), from, "{id} below");
            if end < 1.0 {
                assert_eq!(channel.value_at(Progress::new(end + 0.01)), to, "{id} above");
            }
        }
    }

    #[test]
    fn test_ramps_are_monotonic() {
        let table = ChannelTable::default();
        for id in ChannelId::iter() {
            let channel = table.channel(id);
            let ramp = channel
                .breakpoints()
                .iter()
                .find(|breakpoint| breakpoint.from != breakpoint.to)
                .copied()
                .expect("every channel has a ramp");
            let direction = (ramp.to - ramp.from).signum();
            let steps = 50;
            let mut previous = channel.value_at(Progress::new(ramp.start));
            for step in 1..=steps {
                let p = ramp.start + (ramp.end - ramp.start) * step as f32 / steps as f32;
                let value = channel.value_at(Progress::new(p));
                assert!(
                    (value - previous) * direction > 0.0,
                    "{id} not moving toward its end at {p}"
                );
                previous = value;
            }
        }
    }

    #[test]
    fn test_midpoints() {
        let table = ChannelTable::default();
        let values = table.map(Progress::new(0.25));
        assert!((values.mask_radius.0 - 50.0).abs() < 1e-3);
        assert!((values.header_offset.0 - (-200.0 / 3.0)).abs() < 1e-3);
        let values = table.map(Progress::new(0.55));
        assert!((values.divider_scale - 0.5).abs() < 1e-4);
        assert_eq!(values.secondary_header_offset.0, -200.0);
    }

    #[test]
    fn test_tooltip_step() {
        let table = ChannelTable::default();
        for (index, trigger) in [0.65f32, 0.85].into_iter().enumerate() {
            let below = table.map(Progress::new(trigger - 1e-4));
            let at = table.map(Progress::new(trigger));
            let above = table.map(Progress::new(trigger + 0.1));
            assert_eq!(below.tooltips[index], TooltipState::Hidden);
            assert_eq!(at.tooltips[index], TooltipState::Revealed);
            assert_eq!(above.tooltips[index], TooltipState::Revealed);
        }
    }

    #[test]
    fn test_out_of_range_progress_clamps() {
        let table = ChannelTable::default();
        assert_eq!(table.map(Progress::new(-5.0)), table.map(Progress::START));
        assert_eq!(table.map(Progress::new(5.0)), table.map(Progress::END));
    }

    #[test]
    fn test_invalid_tables() {
        assert_eq!(AnimationChannel::new(vec![]), Err(ChannelError::Empty));
        assert_eq!(
            AnimationChannel::new(vec![Breakpoint::hold(0.0, 0.5, 1.0)]),
            Err(ChannelError::NotCovering)
        );
        assert_eq!(
            AnimationChannel::new(vec![
                Breakpoint::hold(0.0, 0.5, 1.0),
                Breakpoint::hold(0.4, 1.0, 1.0),
            ]),
            Err(ChannelError::NotContiguous { index: 1 })
        );
        assert_eq!(
            AnimationChannel::new(vec![
                Breakpoint::hold(0.0, 0.6, 1.0),
                Breakpoint::new(0.6, 0.5, 1.0, 2.0),
                Breakpoint::hold(0.5, 1.0, 2.0),
            ]),
            Err(ChannelError::Reversed { index: 1 })
        );
    }

    #[test]
    fn test_ramp_at_domain_edges() {
        let channel = AnimationChannel::ramp(0.0, 1.0, 2.0, 4.0);
        assert_eq!(channel.breakpoints().len(), 1);
        assert!(channel.validate().is_ok());
        assert_eq!(channel.value_at(Progress::new(0.5)), 3.0);
    }

    #[test]
    fn test_bad_trigger_rejected() {
        let mut table = ChannelTable::default();
        table.tooltips[1].trigger = 1.5;
        assert!(matches!(table.validate(), Err(ShowcaseError::InvalidTrigger(_))));
    }
}
