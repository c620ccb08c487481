//! The single shaft gas turbine: a starter-assisted spin-up, a delayed light-off,
//! acceleration to a self-sustaining idle and shutdown with cooldown.
use crate::{
    electrical::Battery,
    shared::OneShotTimer,
    simulation::{SimulationElement, SimulationElementVisitor, SimulatorWriter, UpdateContext},
};
use log::{debug, info, warn};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::time::Duration;
use uom::si::{electric_potential::volt, f64::*, ratio::ratio};

mod core_speed;
mod outlet_temperature;
mod profile;
pub use core_speed::CoreSpeed;
pub use outlet_temperature::TurbineOutletTemperature;
pub use profile::{EngineProfile, ProfileError};

/// The operator's controls as seen by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlState {
    pub battery_on: bool,
    pub starter_engaged: bool,
    pub fuel_flow: Ratio,
    pub idle_lock_override: bool,
}
impl Default for ControlState {
    fn default() -> Self {
        Self {
            battery_on: false,
            starter_engaged: false,
            fuel_flow: Ratio::new::<ratio>(0.),
            idle_lock_override: false,
        }
    }
}

/// The engine's published state after a tick.
///
/// N1 and TOT are carried as the clamped model values, so they never read above
/// their ceilings after a unit conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineState {
    /// Percent of rated core speed, within [0, 110].
    pub n1: f64,
    /// Degrees Celsius, within [0, 1000].
    pub tot: f64,
    pub voltage: ElectricPotential,
    pub phase: EnginePhase,
    pub self_sustaining: bool,
    pub light_off_deadline: Option<Duration>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
pub enum EnginePhase {
    Off = 0,
    Cranking = 1,
    LightOffPending = 2,
    LightOff = 3,
    Accelerating = 4,
    SelfSustaining = 5,
    Decelerating = 6,
    Cooldown = 7,
}
impl EnginePhase {
    /// Decodes a phase as written to the bus.
    pub fn from_bus_value(value: f64) -> Option<EnginePhase> {
        EnginePhase::from_f64(value)
    }

    fn to_bus_value(self) -> f64 {
        self as u8 as f64
    }
}

/// Advisory events. Raising one never alters the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineWarning {
    Overtemperature { tot: ThermodynamicTemperature },
}

pub struct Turbine {
    profile: EngineProfile,
    battery: Battery,
    core_speed: CoreSpeed,
    outlet_temperature: TurbineOutletTemperature,
    light_off_timer: OneShotTimer,
    lit: bool,
    combustion: bool,
    phase: EnginePhase,
    overtemperature: bool,
    warnings: Vec<EngineWarning>,
}
impl Turbine {
    pub fn new(profile: EngineProfile) -> Self {
        Self {
            battery: Battery::new(
                ElectricPotential::new::<volt>(profile.nominal_potential_volts),
                ElectricPotential::new::<volt>(profile.starter_sag_potential_volts),
            ),
            core_speed: CoreSpeed::new(),
            outlet_temperature: TurbineOutletTemperature::new(),
            light_off_timer: OneShotTimer::new(profile.light_off_delay()),
            lit: false,
            combustion: false,
            phase: EnginePhase::Off,
            overtemperature: false,
            warnings: Vec::new(),
            profile,
        }
    }

    pub fn update(&mut self, context: &UpdateContext, controls: &ControlState) {
        if !controls.battery_on {
            self.reset();
            return;
        }

        let fuel_flow = controls.fuel_flow.get::<ratio>().max(0.).min(1.);
        let starter_engaged = controls.starter_engaged;

        self.battery.update(true, starter_engaged);
        self.update_ignition(context, fuel_flow, starter_engaged);

        self.combustion = fuel_flow > 0. && (self.lit || self.core_speed.is_self_sustaining());
        self.core_speed.update(
            &self.profile,
            fuel_flow,
            self.combustion,
            starter_engaged,
        );
        if self.core_speed.n1_percent() == 0. && !starter_engaged {
            self.lit = false;
        }

        self.outlet_temperature.update(
            &self.profile,
            self.core_speed.n1_percent(),
            fuel_flow,
            self.combustion,
        );
        self.update_overtemperature();
        self.update_phase(starter_engaged);
    }

    fn update_ignition(&mut self, context: &UpdateContext, fuel_flow: f64, starter_engaged: bool) {
        if fuel_flow == 0. {
            self.lit = false;
            if self.light_off_timer.cancel() {
                debug!("Light-off cancelled, fuel flow cut before ignition");
            }

            return;
        }

        if self.lit {
            return;
        }

        if self.core_speed.is_self_sustaining() {
            self.light_off_timer.cancel();
            self.light_off();
        } else if starter_engaged && self.light_off_timer.start(context) {
            debug!(
                "Light-off timer started, ignition at {:?}",
                self.light_off_timer.deadline()
            );
        }

        if self.light_off_timer.fire(context) {
            self.light_off();
        }
    }

    fn light_off(&mut self) {
        self.lit = true;
        info!("Light-off at {:.1}% N1", self.core_speed.n1_percent());
    }

    fn update_overtemperature(&mut self) {
        let tot = self.outlet_temperature.tot_celsius();
        let overtemperature = tot > self.profile.overtemperature_limit_celsius;

        if overtemperature && !self.overtemperature {
            warn!(
                "TOT {:.0} exceeds overtemperature limit {:.0}",
                tot, self.profile.overtemperature_limit_celsius
            );
            self.warnings.push(EngineWarning::Overtemperature {
                tot: self.outlet_temperature.tot(),
            });
        }

        self.overtemperature = overtemperature;
    }

    fn update_phase(&mut self, starter_engaged: bool) {
        let phase = self.derive_phase(starter_engaged);
        if phase != self.phase {
            debug!("Engine phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn derive_phase(&self, starter_engaged: bool) -> EnginePhase {
        let n1 = self.core_speed.n1_percent();

        if self.light_off_timer.is_pending() {
            EnginePhase::LightOffPending
        } else if self.combustion {
            if n1 < self.profile.light_off_n1_percent {
                EnginePhase::LightOff
            } else if n1 < self.profile.sustained_n1_percent
                || !self.core_speed.is_self_sustaining()
            {
                EnginePhase::Accelerating
            } else {
                EnginePhase::SelfSustaining
            }
        } else if starter_engaged {
            EnginePhase::Cranking
        } else if n1 > 0. {
            EnginePhase::Decelerating
        } else if self.outlet_temperature.is_above_ambient(&self.profile) {
            EnginePhase::Cooldown
        } else {
            EnginePhase::Off
        }
    }

    /// Returns the engine to rest immediately, as happens when its power is removed.
    fn reset(&mut self) {
        if self.phase != EnginePhase::Off || self.outlet_temperature.tot_celsius() > 0. {
            info!("Battery off, engine reset");
        }

        self.battery.update(false, false);
        self.core_speed.reset();
        self.outlet_temperature.reset();
        self.light_off_timer.cancel();
        self.lit = false;
        self.combustion = false;
        self.phase = EnginePhase::Off;
        self.overtemperature = false;
    }

    pub fn state(&self) -> EngineState {
        EngineState {
            n1: self.core_speed.n1_percent(),
            tot: self.outlet_temperature.tot_celsius(),
            voltage: self.battery.potential(),
            phase: self.phase,
            self_sustaining: self.core_speed.is_self_sustaining(),
            light_off_deadline: self.light_off_timer.deadline(),
        }
    }

    /// Drains the warnings raised since the previous call.
    pub fn take_warnings(&mut self) -> Vec<EngineWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn profile(&self) -> &EngineProfile {
        &self.profile
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
impl Default for Turbine {
    fn default() -> Self {
        Self::new(EngineProfile::default())
    }
}
impl SimulationElement for Turbine {
    fn accept<T: SimulationElementVisitor>(&mut self, visitor: &mut T) {
        self.battery.accept(visitor);

        visitor.visit(self);
    }

    fn write(&self, writer: &mut SimulatorWriter) {
        writer.write_f64("ENG_N1", self.core_speed.n1_percent());
        writer.write_f64("ENG_TOT", self.outlet_temperature.tot_celsius());
        writer.write_f64("ENG_PHASE", self.phase.to_bus_value());
        writer.write_bool("ENG_SELF_SUSTAINING", self.core_speed.is_self_sustaining());
        writer.write_bool("ENG_TOT_OVERTEMPERATURE", self.overtemperature);
    }
}
