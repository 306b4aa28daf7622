use crate::units::Radians;

/// Smallest change worth a transform update, well below anything visible
pub const ROTATION_EPSILON: f32 = 0.001;

/// Remembers how much spin has been handed to the model so far.
///
/// Progress yields an absolute target angle. Only the difference to what was
/// already applied is passed on, so whichever object is on stage ends up at
/// the target no matter how many updates it took to get there. Differences
/// under the epsilon are held back rather than dropped: the baseline stays
/// put until the accumulated change is large enough.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationAccumulator {
    applied: f32,
    epsilon: f32,
}

impl Default for RotationAccumulator {
    fn default() -> Self {
        Self::new(ROTATION_EPSILON)
    }
}

impl RotationAccumulator {
    pub fn new(epsilon: f32) -> Self {
        Self {
            applied: 0.0,
            epsilon: epsilon.abs(),
        }
    }

    pub fn applied(&self) -> Radians {
        Radians(self.applied)
    }

    /// The delta to apply now, if any.
    pub fn update(&mut self, target: Radians) -> Option<f32> {
        let delta = target.0 - self.applied;
        if delta.abs() <= self.epsilon {
            return None;
        }
        self.applied = target.0;
        Some(delta)
    }
}
