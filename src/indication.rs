//! Display adapters. Each gauge is a pure function of the one value it shows,
//! read from the output bus after a tick.
use itertools::Itertools;
use systems::{shared::interpolate, simulation::SimulatorReader, turbine::EnginePhase};
use uom::si::{
    electric_potential::volt, f64::*, ratio::percent, ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

/// N1 in percent against needle angle in degrees.
const N1_CALIBRATION: [(f64, f64); 12] = [
    (0., 151.),
    (10., 165.),
    (20., 179.),
    (30., 193.),
    (40., 207.),
    (50., 221.),
    (60., 249.),
    (70., 277.),
    (80., 305.),
    (90., 333.),
    (100., 361.),
    (110., 389.),
];
const N1_NORMAL_RANGE_PERCENT: (f64, f64) = (63., 105.);

/// TOT in degrees Celsius against needle angle in degrees.
const TOT_CALIBRATION: [(f64, f64); 24] = [
    (0., 158.),
    (50., 165.),
    (100., 172.),
    (150., 179.),
    (200., 186.),
    (250., 193.),
    (300., 200.),
    (350., 207.),
    (400., 214.),
    (450., 221.),
    (500., 228.),
    (550., 235.),
    (600., 242.),
    (650., 249.),
    (700., 256.),
    (725., 270.),
    (750., 284.),
    (775., 298.),
    (800., 312.),
    (825., 326.),
    (850., 340.),
    (875., 354.),
    (900., 368.),
    (1000., 382.),
];
const TOT_NORMAL_LIMIT_CELSIUS: f64 = 716.;
const TOT_CAUTION_LIMIT_CELSIUS: f64 = 768.;
pub const TOT_MARKERS_CELSIUS: [f64; 3] = [768., 826., 927.];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkingRange {
    Unmarked,
    Normal,
    Caution,
    Warning,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GaugeIndication {
    pub needle_angle_degrees: f64,
    pub readout: String,
    pub range: MarkingRange,
}

pub fn n1_indication(n1: Ratio) -> GaugeIndication {
    let n1 = n1.get::<percent>();
    let (normal_low, normal_high) = N1_NORMAL_RANGE_PERCENT;

    GaugeIndication {
        needle_angle_degrees: needle_angle(&N1_CALIBRATION, n1),
        readout: format!("{:.1}", n1),
        range: if n1 > normal_high {
            MarkingRange::Warning
        } else if n1 >= normal_low {
            MarkingRange::Normal
        } else {
            MarkingRange::Unmarked
        },
    }
}

pub fn tot_indication(tot: ThermodynamicTemperature) -> GaugeIndication {
    let tot = tot.get::<degree_celsius>();

    GaugeIndication {
        needle_angle_degrees: needle_angle(&TOT_CALIBRATION, tot),
        readout: format!("{:.0}", tot),
        range: if tot > TOT_CAUTION_LIMIT_CELSIUS {
            MarkingRange::Warning
        } else if tot > TOT_NORMAL_LIMIT_CELSIUS {
            MarkingRange::Caution
        } else {
            MarkingRange::Normal
        },
    }
}

/// The angles at which the TOT gauge's limit markers are drawn.
pub fn tot_marker_angles() -> Vec<f64> {
    TOT_MARKERS_CELSIUS
        .iter()
        .map(|&tot| needle_angle(&TOT_CALIBRATION, tot))
        .collect()
}

/// Colour band of the fuel lever, from the flow in percent of maximum delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FuelFlowBand {
    Green,
    Yellow,
    Orange,
    Red,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuelFlowIndication {
    pub readout: String,
    pub band: FuelFlowBand,
}

pub fn fuel_flow_indication(fuel_flow: Ratio) -> FuelFlowIndication {
    let fuel_flow = fuel_flow.get::<percent>();

    FuelFlowIndication {
        readout: format!("{:.0}%", fuel_flow),
        band: if fuel_flow > 75. {
            FuelFlowBand::Green
        } else if fuel_flow > 50. {
            FuelFlowBand::Yellow
        } else if fuel_flow > 25. {
            FuelFlowBand::Orange
        } else {
            FuelFlowBand::Red
        },
    }
}

pub fn voltage_readout(voltage: ElectricPotential) -> String {
    format!("{:.1} V", voltage.get::<volt>())
}

/// Interpolates the needle angle between calibration points. Values beyond the
/// table show the first or last angle.
fn needle_angle(calibration: &[(f64, f64)], value: f64) -> f64 {
    let (first, last) = match (calibration.first(), calibration.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return 0.,
    };

    if value <= first.0 {
        return first.1;
    }

    calibration
        .iter()
        .tuple_windows()
        .find(|(_, upper)| value <= upper.0)
        .map(|(lower, upper)| interpolate(value, (lower.0, upper.0), (lower.1, upper.1)))
        .unwrap_or(last.1)
}

/// Everything the panel displays, as read back from the output bus.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelIndications {
    pub n1: GaugeIndication,
    pub tot: GaugeIndication,
    pub voltage: String,
    pub fuel_flow: FuelFlowIndication,
    pub phase: Option<EnginePhase>,
    pub overtemperature: bool,
    pub idle_lock_engaged: bool,
}
impl PanelIndications {
    pub fn read(reader: &mut SimulatorReader) -> Self {
        Self {
            n1: n1_indication(Ratio::new::<percent>(reader.read_f64("ENG_N1"))),
            tot: tot_indication(ThermodynamicTemperature::new::<degree_celsius>(
                reader.read_f64("ENG_TOT"),
            )),
            voltage: voltage_readout(ElectricPotential::new::<volt>(
                reader.read_f64("ELEC_BAT_POTENTIAL"),
            )),
            fuel_flow: fuel_flow_indication(Ratio::new::<ratio>(reader.read_f64("FUEL_FLOW"))),
            phase: EnginePhase::from_bus_value(reader.read_f64("ENG_PHASE")),
            overtemperature: reader.read_bool("ENG_TOT_OVERTEMPERATURE"),
            idle_lock_engaged: reader.read_bool("FUEL_IDLE_LOCK_ENGAGED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntest::assert_about_eq;

    fn n1(value: f64) -> GaugeIndication {
        n1_indication(Ratio::new::<percent>(value))
    }

    fn tot(value: f64) -> GaugeIndication {
        tot_indication(ThermodynamicTemperature::new::<degree_celsius>(value))
    }

    #[test]
    fn n1_needle_is_at_calibration_points() {
        assert_about_eq!(n1(0.).needle_angle_degrees, 151.);
        assert_about_eq!(n1(50.).needle_angle_degrees, 221.);
        assert_about_eq!(n1(110.).needle_angle_degrees, 389.);
    }

    #[test]
    fn n1_needle_interpolates_between_calibration_points() {
        assert_about_eq!(n1(65.).needle_angle_degrees, 263.);
    }

    #[test]
    fn n1_needle_clamps_outside_the_table() {
        assert_about_eq!(n1(-5.).needle_angle_degrees, 151.);
        assert_about_eq!(n1(150.).needle_angle_degrees, 389.);
    }

    #[test]
    fn n1_readout_has_one_decimal() {
        assert_eq!(n1(69.166).readout, "69.2");
    }

    #[test]
    fn n1_ranges() {
        assert_eq!(n1(40.).range, MarkingRange::Unmarked);
        assert_eq!(n1(63.).range, MarkingRange::Normal);
        assert_eq!(n1(105.).range, MarkingRange::Normal);
        assert_eq!(n1(105.1).range, MarkingRange::Warning);
    }

    #[test]
    fn tot_needle_uses_finer_steps_above_700() {
        assert_about_eq!(tot(700.).needle_angle_degrees, 256.);
        assert_about_eq!(tot(712.5).needle_angle_degrees, 263.);
        assert_about_eq!(tot(950.).needle_angle_degrees, 375.);
    }

    #[test]
    fn tot_needle_clamps_outside_the_table() {
        assert_about_eq!(tot(-20.).needle_angle_degrees, 158.);
        assert_about_eq!(tot(1200.).needle_angle_degrees, 382.);
    }

    #[test]
    fn tot_readout_is_whole_degrees() {
        assert_eq!(tot(548.6).readout, "549");
    }

    #[test]
    fn tot_ranges() {
        assert_eq!(tot(700.).range, MarkingRange::Normal);
        assert_eq!(tot(716.).range, MarkingRange::Normal);
        assert_eq!(tot(740.).range, MarkingRange::Caution);
        assert_eq!(tot(768.).range, MarkingRange::Caution);
        assert_eq!(tot(800.).range, MarkingRange::Warning);
    }

    #[test]
    fn tot_markers_are_drawn_at_their_temperatures() {
        let angles = tot_marker_angles();

        assert_eq!(angles.len(), 3);
        assert_about_eq!(angles[0], 298. - (7. * 14. / 25.));
        assert_about_eq!(angles[1], 326. + (14. / 25.));
        assert_about_eq!(angles[2], 368. + (27. * 14. / 100.));
    }

    fn fuel_flow(value: f64) -> FuelFlowIndication {
        fuel_flow_indication(Ratio::new::<ratio>(value))
    }

    #[test]
    fn fuel_flow_readout_is_whole_percent() {
        assert_eq!(fuel_flow(0.).readout, "0%");
        assert_eq!(fuel_flow(0.403).readout, "40%");
        assert_eq!(fuel_flow(1.).readout, "100%");
    }

    #[test]
    fn fuel_flow_bands_change_above_each_quarter() {
        assert_eq!(fuel_flow(1.).band, FuelFlowBand::Green);
        assert_eq!(fuel_flow(0.76).band, FuelFlowBand::Green);
        assert_eq!(fuel_flow(0.74).band, FuelFlowBand::Yellow);
        assert_eq!(fuel_flow(0.51).band, FuelFlowBand::Yellow);
        assert_eq!(fuel_flow(0.49).band, FuelFlowBand::Orange);
        assert_eq!(fuel_flow(0.26).band, FuelFlowBand::Orange);
        assert_eq!(fuel_flow(0.24).band, FuelFlowBand::Red);
        assert_eq!(fuel_flow(0.).band, FuelFlowBand::Red);
    }

    #[test]
    fn voltage_readout_has_one_decimal_and_unit() {
        assert_eq!(voltage_readout(ElectricPotential::new::<volt>(24.)), "24.0 V");
        assert_eq!(voltage_readout(ElectricPotential::new::<volt>(18.5)), "18.5 V");
    }
}
