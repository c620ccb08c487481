//! The engine start panel: a battery master switch, a starter button, a fuel
//! lever with idle lock and the turbine they control.
use log::debug;
use systems::{
    fuel::FuelControl,
    overhead::{MomentaryPushButton, OnOffSwitch},
    simulation::{Simulation, SimulationElement, SimulationElementVisitor, Trainer, UpdateContext},
    turbine::{ControlState, EngineProfile, EngineState, EngineWarning, ProfileError, Turbine},
};
use uom::si::{f64::*, ratio::ratio};

mod bus;
pub mod indication;
pub use bus::PanelBus;

pub type StartPanelSimulation = Simulation<StartPanel, PanelBus>;

pub fn new_simulation(profile: EngineProfile) -> StartPanelSimulation {
    Simulation::new(StartPanel::new(profile), PanelBus::new())
}

/// The operations available to input adapters. Each call applies immediately to
/// the controls; the engine responds on the next tick.
pub trait ControlInput {
    fn set_battery_on(&mut self, on: bool);
    fn press_starter(&mut self);
    fn release_starter(&mut self);
    /// Moves the fuel lever by a relative amount.
    fn adjust_fuel_flow(&mut self, delta: Ratio);
    /// Puts the fuel lever at an absolute position.
    fn set_fuel_flow(&mut self, value: Ratio);
    fn set_idle_lock_override(&mut self, held: bool);
}

pub struct StartPanel {
    battery: OnOffSwitch,
    starter: MomentaryPushButton,
    idle_lock_override: MomentaryPushButton,
    fuel_control: FuelControl,
    turbine: Turbine,
}
impl StartPanel {
    pub fn new(profile: EngineProfile) -> Self {
        Self {
            battery: OnOffSwitch::new_off("BAT_SW"),
            starter: MomentaryPushButton::new("STARTER"),
            idle_lock_override: MomentaryPushButton::new("IDLE_LOCK_OVERRIDE"),
            fuel_control: FuelControl::new(Ratio::new::<ratio>(profile.idle_lock_fuel_flow)),
            turbine: Turbine::new(profile),
        }
    }

    pub fn from_profile_json(json: &str) -> Result<Self, ProfileError> {
        Ok(Self::new(EngineProfile::from_json(json)?))
    }

    /// The controls as a single snapshot, as handed to the engine each tick.
    pub fn control_state(&self) -> ControlState {
        ControlState {
            battery_on: self.battery.is_on(),
            starter_engaged: self.starter.is_pressed(),
            fuel_flow: self.fuel_control.flow(),
            idle_lock_override: self.idle_lock_override.is_pressed(),
        }
    }

    pub fn engine_state(&self) -> EngineState {
        self.turbine.state()
    }

    pub fn take_warnings(&mut self) -> Vec<EngineWarning> {
        self.turbine.take_warnings()
    }

    pub fn profile(&self) -> &EngineProfile {
        self.turbine.profile()
    }
}
impl ControlInput for StartPanel {
    fn set_battery_on(&mut self, on: bool) {
        self.battery.set_on(on);

        if !on {
            self.fuel_control.cut_off();
            self.starter.release();
            self.idle_lock_override.release();
        }
    }

    fn press_starter(&mut self) {
        if self.battery.is_on() {
            self.starter.press();
        } else {
            debug!("Starter press ignored, battery is off");
        }
    }

    fn release_starter(&mut self) {
        self.starter.release();
    }

    fn adjust_fuel_flow(&mut self, delta: Ratio) {
        self.fuel_control
            .adjust(delta, self.idle_lock_override.is_pressed());
    }

    fn set_fuel_flow(&mut self, value: Ratio) {
        self.fuel_control
            .set(value, self.idle_lock_override.is_pressed());
    }

    fn set_idle_lock_override(&mut self, held: bool) {
        self.idle_lock_override.set_pressed(held);
    }
}
impl Trainer for StartPanel {
    fn update(&mut self, context: &UpdateContext) {
        let controls = self.control_state();
        self.turbine.update(context, &controls);
    }
}
impl SimulationElement for StartPanel {
    fn accept<T: SimulationElementVisitor>(&mut self, visitor: &mut T) {
        self.battery.accept(visitor);
        self.starter.accept(visitor);
        self.idle_lock_override.accept(visitor);
        self.fuel_control.accept(visitor);
        self.turbine.accept(visitor);

        visitor.visit(self);
    }
}
impl Default for StartPanel {
    fn default() -> Self {
        Self::new(EngineProfile::default())
    }
}
