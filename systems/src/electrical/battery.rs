use crate::simulation::{SimulationElement, SimulatorWriter};
use uom::si::{electric_potential::volt, f64::*};

/// The battery feeding the start panel bus. Its potential is a discrete state:
/// nominal while connected, sagging while the starter draws current and zero
/// when disconnected.
pub struct Battery {
    nominal_potential: ElectricPotential,
    starter_sag_potential: ElectricPotential,
    potential: ElectricPotential,
}
impl Battery {
    pub const MAX_POTENTIAL_VOLTS: f64 = 28.5;
    const NORMAL_POTENTIAL_RANGE_VOLTS: (f64, f64) = (22., Battery::MAX_POTENTIAL_VOLTS);

    pub fn new(
        nominal_potential: ElectricPotential,
        starter_sag_potential: ElectricPotential,
    ) -> Self {
        Self {
            nominal_potential,
            starter_sag_potential,
            potential: ElectricPotential::new::<volt>(0.),
        }
    }

    pub fn update(&mut self, connected: bool, starter_engaged: bool) {
        let potential = if !connected {
            ElectricPotential::new::<volt>(0.)
        } else if starter_engaged {
            self.starter_sag_potential
        } else {
            self.nominal_potential
        };

        self.potential = ElectricPotential::new::<volt>(
            potential
                .get::<volt>()
                .max(0.)
                .min(Battery::MAX_POTENTIAL_VOLTS),
        );
    }

    pub fn potential(&self) -> ElectricPotential {
        self.potential
    }

    pub fn potential_normal(&self) -> bool {
        let (low, high) = Battery::NORMAL_POTENTIAL_RANGE_VOLTS;
        (low..=high).contains(&self.potential.get::<volt>())
    }
}
impl SimulationElement for Battery {
    fn write(&self, writer: &mut SimulatorWriter) {
        writer.write_f64("ELEC_BAT_POTENTIAL", self.potential.get::<volt>());
        writer.write_bool("ELEC_BAT_POTENTIAL_NORMAL", self.potential_normal());
    }
}
