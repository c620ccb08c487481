use crate::{electrical::Battery, simulation::TICK_PERIOD};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised when an engine profile is loaded or checked.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// A parameter is out of its valid range or inconsistent with another parameter.
    #[error("invalid engine profile parameter `{parameter}`: {reason}")]
    Invalid {
        parameter: &'static str,
        reason: String,
    },

    #[error("malformed engine profile: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The tuning of a single engine. Rates and gains are expressed per tick of the
/// fixed simulation period, speeds in percent N1, temperatures in degrees Celsius.
///
/// Missing fields in a JSON profile take the [`EngineProfile::standard`] value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineProfile {
    /// N1 gained per tick while the starter spins a non-sustaining core.
    pub crank_rate_percent_per_tick: f64,
    /// N1 at which the core sustains itself without the starter.
    pub self_sustaining_n1_percent: f64,
    /// Time between fuel reaching a cranking core and light-off.
    pub light_off_delay_millis: u64,
    /// Upper bound of the light-off temperature band.
    pub light_off_n1_percent: f64,
    /// Lower bound of the sustained temperature band.
    pub sustained_n1_percent: f64,

    /// Breakpoint of the fuel flow to N1 governing curve.
    pub idle_fuel_flow: f64,
    pub idle_n1_percent: f64,
    pub max_n1_percent: f64,
    pub n1_response_gain: f64,
    /// N1 lost per tick by a core which is neither cranked nor sustaining.
    pub spool_down_rate_percent_per_tick: f64,
    /// Time a sustaining core takes to come to rest after its fuel is cut.
    pub deceleration_time_millis: u64,

    pub ambient_temperature_celsius: f64,
    pub light_off_peak_temperature_celsius: f64,
    pub light_off_constant: f64,
    pub normal_operating_temperature_celsius: f64,
    pub sustaining_constant: f64,
    pub tot_response_gain: f64,
    /// Scales the light-off target by N1 for a gentler ramp at low speed.
    pub light_off_scales_with_n1: bool,
    pub cooldown_breakpoint_celsius: f64,
    pub fast_cooldown_step_celsius: f64,
    pub slow_cooldown_step_celsius: f64,
    pub overtemperature_limit_celsius: f64,

    pub nominal_potential_volts: f64,
    pub starter_sag_potential_volts: f64,

    /// Fuel flow below which the idle lock guards reductions.
    pub idle_lock_fuel_flow: f64,
}
impl EngineProfile {
    pub const MAX_N1_PERCENT: f64 = 110.;
    pub const MAX_TOT_CELSIUS: f64 = 1000.;

    /// Mid-range tuning: self-sustaining at 50 % N1 with a 1.5 s light-off delay.
    pub fn standard() -> Self {
        Self {
            crank_rate_percent_per_tick: 0.5,
            self_sustaining_n1_percent: 50.,
            light_off_delay_millis: 1_500,
            light_off_n1_percent: 25.,
            sustained_n1_percent: 55.,
            idle_fuel_flow: 0.4,
            idle_n1_percent: 65.,
            max_n1_percent: 90.,
            n1_response_gain: 0.08,
            spool_down_rate_percent_per_tick: 0.25,
            deceleration_time_millis: 30_000,
            ambient_temperature_celsius: 20.,
            light_off_peak_temperature_celsius: 1000.,
            light_off_constant: 2.5,
            normal_operating_temperature_celsius: 700.,
            sustaining_constant: 3.,
            tot_response_gain: 0.03,
            light_off_scales_with_n1: false,
            cooldown_breakpoint_celsius: 250.,
            fast_cooldown_step_celsius: 1.,
            slow_cooldown_step_celsius: 0.1,
            overtemperature_limit_celsius: 900.,
            nominal_potential_volts: 24.,
            starter_sag_potential_volts: 20.,
            idle_lock_fuel_flow: 0.4,
        }
    }

    /// Low thresholds and a short light-off delay.
    pub fn quick_start() -> Self {
        Self {
            self_sustaining_n1_percent: 42.,
            light_off_delay_millis: 1_100,
            light_off_n1_percent: 15.,
            sustained_n1_percent: 40.,
            idle_n1_percent: 63.,
            max_n1_percent: 83.7,
            n1_response_gain: 0.1,
            spool_down_rate_percent_per_tick: 0.5,
            light_off_peak_temperature_celsius: 950.,
            normal_operating_temperature_celsius: 680.,
            tot_response_gain: 0.04,
            starter_sag_potential_volts: 18.5,
            ..Self::standard()
        }
    }

    /// High thresholds, a slow crank and a light-off temperature which grows with N1.
    pub fn smooth_start() -> Self {
        Self {
            crank_rate_percent_per_tick: 0.25,
            self_sustaining_n1_percent: 55.,
            light_off_delay_millis: 2_000,
            light_off_n1_percent: 32.,
            sustained_n1_percent: 66.,
            idle_n1_percent: 67.,
            max_n1_percent: 96.,
            spool_down_rate_percent_per_tick: 0.05,
            normal_operating_temperature_celsius: 720.,
            sustaining_constant: 3.5,
            tot_response_gain: 0.02,
            light_off_scales_with_n1: true,
            starter_sag_potential_volts: 22.,
            idle_lock_fuel_flow: 0.5,
            ..Self::standard()
        }
    }

    /// Parses a JSON profile and validates it.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let profile: EngineProfile = serde_json::from_str(json)?;
        profile.validate()?;

        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        positive("crank_rate_percent_per_tick", self.crank_rate_percent_per_tick)?;
        within(
            "self_sustaining_n1_percent",
            self.self_sustaining_n1_percent,
            0.,
            Self::MAX_N1_PERCENT,
        )?;
        positive("self_sustaining_n1_percent", self.self_sustaining_n1_percent)?;
        positive("light_off_n1_percent", self.light_off_n1_percent)?;
        within(
            "sustained_n1_percent",
            self.sustained_n1_percent,
            0.,
            Self::MAX_N1_PERCENT,
        )?;
        if self.light_off_n1_percent >= self.sustained_n1_percent {
            return Err(invalid(
                "light_off_n1_percent",
                format!(
                    "must be below sustained_n1_percent ({})",
                    self.sustained_n1_percent
                ),
            ));
        }

        fraction("idle_fuel_flow", self.idle_fuel_flow)?;
        if self.idle_fuel_flow == 0. || self.idle_fuel_flow == 1. {
            return Err(invalid(
                "idle_fuel_flow",
                "must lie strictly between 0 and 1".to_owned(),
            ));
        }
        within("max_n1_percent", self.max_n1_percent, 0., Self::MAX_N1_PERCENT)?;
        within("idle_n1_percent", self.idle_n1_percent, 0., self.max_n1_percent)?;
        gain("n1_response_gain", self.n1_response_gain)?;
        positive(
            "spool_down_rate_percent_per_tick",
            self.spool_down_rate_percent_per_tick,
        )?;
        if self.deceleration_time_millis < TICK_PERIOD.as_millis() as u64 {
            return Err(invalid(
                "deceleration_time_millis",
                format!("must span at least one tick of {:?}", TICK_PERIOD),
            ));
        }

        within(
            "ambient_temperature_celsius",
            self.ambient_temperature_celsius,
            0.,
            Self::MAX_TOT_CELSIUS,
        )?;
        within(
            "light_off_peak_temperature_celsius",
            self.light_off_peak_temperature_celsius,
            self.ambient_temperature_celsius,
            Self::MAX_TOT_CELSIUS,
        )?;
        within(
            "normal_operating_temperature_celsius",
            self.normal_operating_temperature_celsius,
            self.ambient_temperature_celsius,
            Self::MAX_TOT_CELSIUS,
        )?;
        positive("light_off_constant", self.light_off_constant)?;
        positive("sustaining_constant", self.sustaining_constant)?;
        gain("tot_response_gain", self.tot_response_gain)?;
        positive("cooldown_breakpoint_celsius", self.cooldown_breakpoint_celsius)?;
        positive("fast_cooldown_step_celsius", self.fast_cooldown_step_celsius)?;
        positive("slow_cooldown_step_celsius", self.slow_cooldown_step_celsius)?;
        within(
            "overtemperature_limit_celsius",
            self.overtemperature_limit_celsius,
            self.ambient_temperature_celsius,
            Self::MAX_TOT_CELSIUS,
        )?;

        within(
            "nominal_potential_volts",
            self.nominal_potential_volts,
            0.,
            Battery::MAX_POTENTIAL_VOLTS,
        )?;
        within(
            "starter_sag_potential_volts",
            self.starter_sag_potential_volts,
            0.,
            self.nominal_potential_volts,
        )?;

        fraction("idle_lock_fuel_flow", self.idle_lock_fuel_flow)
    }

    pub fn light_off_delay(&self) -> Duration {
        Duration::from_millis(self.light_off_delay_millis)
    }

    /// The number of ticks over which a sustaining core decelerates to rest.
    pub fn deceleration_ticks(&self) -> u32 {
        let ticks = self.deceleration_time_millis / TICK_PERIOD.as_millis() as u64;
        ticks.max(1) as u32
    }
}
impl Default for EngineProfile {
    fn default() -> Self {
        Self::standard()
    }
}

fn invalid(parameter: &'static str, reason: String) -> ProfileError {
    ProfileError::Invalid { parameter, reason }
}

fn within(parameter: &'static str, value: f64, low: f64, high: f64) -> Result<(), ProfileError> {
    if (low..=high).contains(&value) {
        Ok(())
    } else {
        Err(invalid(
            parameter,
            format!("{} is outside [{}, {}]", value, low, high),
        ))
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<(), ProfileError> {
    if value > 0. && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(parameter, format!("{} is not positive", value)))
    }
}

fn fraction(parameter: &'static str, value: f64) -> Result<(), ProfileError> {
    within(parameter, value, 0., 1.)
}

fn gain(parameter: &'static str, value: f64) -> Result<(), ProfileError> {
    if value > 0. && value <= 1. {
        Ok(())
    } else {
        Err(invalid(parameter, format!("{} is outside (0, 1]", value)))
    }
}
