use crate::simulation::{SimulationElement, SimulatorWriter};
use log::debug;
use uom::si::{f64::*, ratio::ratio};

/// Meters fuel to the engine as a fraction of maximum delivery.
///
/// The idle lock stops a reduction from crossing below the idle fuel flow unless the
/// override is held at the moment of crossing. It only guards the crossing: once below
/// idle, the flow can be reduced further and increases are never restricted.
pub struct FuelControl {
    flow: f64,
    idle_lock_flow: f64,
    idle_lock_engaged: bool,
}
impl FuelControl {
    pub fn new(idle_lock_flow: Ratio) -> Self {
        Self {
            flow: 0.,
            idle_lock_flow: idle_lock_flow.get::<ratio>().max(0.).min(1.),
            idle_lock_engaged: false,
        }
    }

    /// Applies a relative change, as produced by a scroll wheel or drag step.
    pub fn adjust(&mut self, delta: Ratio, idle_lock_override: bool) {
        let delta = delta.get::<ratio>();
        if delta.is_nan() {
            return;
        }

        self.apply(self.flow + delta, idle_lock_override);
    }

    /// Applies an absolute value, as produced by directly positioning the lever.
    pub fn set(&mut self, value: Ratio, idle_lock_override: bool) {
        let value = value.get::<ratio>();
        if value.is_nan() {
            return;
        }

        self.apply(value, idle_lock_override);
    }

    /// Shuts off all fuel regardless of the idle lock.
    pub fn cut_off(&mut self) {
        self.flow = 0.;
        self.idle_lock_engaged = false;
    }

    pub fn flow(&self) -> Ratio {
        Ratio::new::<ratio>(self.flow)
    }

    /// Whether the most recent change was held at the idle fuel flow by the lock.
    pub fn idle_lock_engaged(&self) -> bool {
        self.idle_lock_engaged
    }

    fn apply(&mut self, requested: f64, idle_lock_override: bool) {
        let requested = requested.max(0.).min(1.);
        let crosses_idle = self.flow >= self.idle_lock_flow && requested < self.idle_lock_flow;

        self.idle_lock_engaged = crosses_idle && !idle_lock_override;
        self.flow = if self.idle_lock_engaged {
            debug!(
                "Idle lock holding fuel flow at {:.3} (requested {:.3})",
                self.idle_lock_flow, requested
            );
            self.idle_lock_flow
        } else {
            requested
        };
    }
}
impl SimulationElement for FuelControl {
    fn write(&self, writer: &mut SimulatorWriter) {
        writer.write_f64("FUEL_FLOW", self.flow);
        writer.write_bool("FUEL_IDLE_LOCK_ENGAGED", self.idle_lock_engaged);
    }
}
