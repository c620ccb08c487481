use crate::simulation::UpdateContext;
use std::time::Duration;

/// A one-shot timer measured against the simulation clock. Once started it
/// fires a single time when its deadline has passed, unless it is cancelled first.
pub struct OneShotTimer {
    delay: Duration,
    deadline: Option<Duration>,
}
impl OneShotTimer {
    pub fn new(delay: Duration) -> OneShotTimer {
        OneShotTimer {
            delay,
            deadline: None,
        }
    }

    /// Starts the timer, unless it is already pending. Returns whether a new deadline was set.
    pub fn start(&mut self, context: &UpdateContext) -> bool {
        if self.deadline.is_some() {
            false
        } else {
            self.deadline = Some(context.simulation_time + self.delay);
            true
        }
    }

    /// Clears the pending deadline. Returns whether a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Returns true exactly once: on the first update at or after the deadline.
    pub fn fire(&mut self, context: &UpdateContext) -> bool {
        match self.deadline {
            Some(deadline) if context.simulation_time >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Moves the current value the given fraction of the way towards the target.
pub(crate) fn low_pass_towards(current: f64, target: f64, gain: f64) -> f64 {
    current + ((target - current) * gain)
}

/// Moves the current value towards the target by a fixed step without overshooting it.
pub(crate) fn step_towards(current: f64, target: f64, step: f64) -> f64 {
    if current > target {
        (current - step).max(target)
    } else {
        (current + step).min(target)
    }
}

/// Approaches `limit` from `base` as `x` grows: `base + (limit - base) * (1 - e^(-constant * x))`.
pub(crate) fn exponential_approach(base: f64, limit: f64, constant: f64, x: f64) -> f64 {
    base + ((limit - base) * (1. - (-constant * x).exp()))
}

/// Linearly maps `x` from the `from` range onto the `to` range.
pub fn interpolate(x: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let (x0, x1) = from;
    let (y0, y1) = to;

    y0 + ((x - x0) / (x1 - x0)) * (y1 - y0)
}
