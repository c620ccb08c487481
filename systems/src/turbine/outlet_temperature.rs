use super::EngineProfile;
use crate::shared::{exponential_approach, low_pass_towards, step_towards};
use uom::si::{f64::*, thermodynamic_temperature::degree_celsius};

/// The turbine outlet temperature (TOT). It only climbs while there is combustion
/// and otherwise cools towards ambient.
pub struct TurbineOutletTemperature {
    tot: f64,
}
impl TurbineOutletTemperature {
    pub fn new() -> Self {
        Self { tot: 0. }
    }

    pub fn update(&mut self, profile: &EngineProfile, n1: f64, fuel_flow: f64, combustion: bool) {
        if combustion {
            self.tot = low_pass_towards(
                self.tot,
                target_tot(profile, n1, fuel_flow),
                profile.tot_response_gain,
            );
        } else if self.tot > profile.ambient_temperature_celsius {
            let step = if self.tot > profile.cooldown_breakpoint_celsius {
                profile.fast_cooldown_step_celsius
            } else {
                profile.slow_cooldown_step_celsius
            };

            self.tot = step_towards(self.tot, profile.ambient_temperature_celsius, step);
        }

        self.tot = self.tot.max(0.).min(EngineProfile::MAX_TOT_CELSIUS);
    }

    pub fn reset(&mut self) {
        self.tot = 0.;
    }

    pub fn tot(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.tot)
    }

    pub fn tot_celsius(&self) -> f64 {
        self.tot
    }

    pub fn is_above_ambient(&self, profile: &EngineProfile) -> bool {
        self.tot > profile.ambient_temperature_celsius
    }

    #[cfg(test)]
    fn set_tot(&mut self, tot: f64) {
        self.tot = tot;
    }
}
impl Default for TurbineOutletTemperature {
    fn default() -> Self {
        Self::new()
    }
}

/// The TOT combustion drives towards at the given N1 and fuel flow.
///
/// Below the light-off band's upper bound the light-off curve applies. Within the
/// acceleration band the target blends from the light-off curve to the normal
/// operating curve as N1 rises. At and above the sustained band the sustaining
/// curve applies.
pub(super) fn target_tot(profile: &EngineProfile, n1: f64, fuel_flow: f64) -> f64 {
    let ambient = profile.ambient_temperature_celsius;
    let light_off = exponential_approach(
        ambient,
        profile.light_off_peak_temperature_celsius,
        profile.light_off_constant,
        fuel_flow,
    );

    if n1 < profile.light_off_n1_percent {
        if profile.light_off_scales_with_n1 {
            let factor = (n1 / profile.light_off_n1_percent).max(0.).min(1.);
            ambient + (light_off - ambient) * factor
        } else {
            light_off
        }
    } else if n1 < profile.sustained_n1_percent {
        let normal = exponential_approach(
            ambient,
            profile.normal_operating_temperature_celsius,
            profile.light_off_constant,
            fuel_flow,
        );
        let blend = (profile.sustained_n1_percent - n1)
            / (profile.sustained_n1_percent - profile.light_off_n1_percent);

        normal + (light_off - normal) * blend
    } else {
        exponential_approach(
            ambient,
            profile.normal_operating_temperature_celsius,
            profile.sustaining_constant,
            fuel_flow,
        )
    }
}
