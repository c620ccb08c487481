use super::EngineProfile;
use crate::shared::{interpolate, low_pass_towards, step_towards};
use log::info;

/// The core rotational speed (N1) of the engine.
pub struct CoreSpeed {
    n1: f64,
    self_sustaining: bool,
    remaining_deceleration_ticks: Option<u32>,
}
impl CoreSpeed {
    pub fn new() -> Self {
        Self {
            n1: 0.,
            self_sustaining: false,
            remaining_deceleration_ticks: None,
        }
    }

    /// Advances N1 by one tick.
    ///
    /// A sustaining core with combustion is governed towards the N1 its fuel flow
    /// supports. Without combustion it comes to rest over the profile's deceleration
    /// window, unless the starter keeps it turning. A core which is not sustaining
    /// gains speed while cranked and loses it at a fixed rate otherwise.
    pub fn update(
        &mut self,
        profile: &EngineProfile,
        fuel_flow: f64,
        combustion: bool,
        starter_engaged: bool,
    ) {
        if self.self_sustaining && combustion {
            self.remaining_deceleration_ticks = None;
            self.n1 = low_pass_towards(
                self.n1,
                governed_n1(profile, fuel_flow),
                profile.n1_response_gain,
            );
        } else if self.self_sustaining && !starter_engaged {
            self.decelerate(profile);
        } else if starter_engaged {
            if self.self_sustaining {
                // Motored by the starter without fuel.
                self.remaining_deceleration_ticks = None;
            } else {
                self.crank(profile);
            }
        } else {
            self.n1 = step_towards(self.n1, 0., profile.spool_down_rate_percent_per_tick);
        }

        self.n1 = self.n1.max(0.).min(EngineProfile::MAX_N1_PERCENT);
    }

    fn crank(&mut self, profile: &EngineProfile) {
        self.n1 += profile.crank_rate_percent_per_tick;

        if self.n1 >= profile.self_sustaining_n1_percent {
            self.self_sustaining = true;
            info!("Engine self-sustaining at {:.1}% N1", self.n1);
        }
    }

    /// Removes an equal share of the remaining speed each tick, so N1 reaches
    /// exactly zero at the end of the window.
    fn decelerate(&mut self, profile: &EngineProfile) {
        let remaining = self
            .remaining_deceleration_ticks
            .get_or_insert_with(|| profile.deceleration_ticks());
        self.n1 -= self.n1 / f64::from(*remaining);
        *remaining = remaining.saturating_sub(1);
        let window_elapsed = *remaining == 0;

        if window_elapsed {
            self.n1 = 0.;
        }

        if self.n1 <= 0. {
            self.n1 = 0.;
            self.self_sustaining = false;
            self.remaining_deceleration_ticks = None;
            info!("Engine spool down complete");
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn n1_percent(&self) -> f64 {
        self.n1
    }

    pub fn is_self_sustaining(&self) -> bool {
        self.self_sustaining
    }

    pub fn is_decelerating(&self) -> bool {
        self.remaining_deceleration_ticks.is_some()
    }

    #[cfg(test)]
    fn set_n1(&mut self, n1: f64, self_sustaining: bool) {
        self.n1 = n1;
        self.self_sustaining = self_sustaining;
    }
}
impl Default for CoreSpeed {
    fn default() -> Self {
        Self::new()
    }
}

/// The N1 a sustaining core settles at for the given fuel flow: linear from zero
/// to idle N1 up to the idle fuel flow, then linear from idle to maximum N1.
pub(super) fn governed_n1(profile: &EngineProfile, fuel_flow: f64) -> f64 {
    if fuel_flow <= profile.idle_fuel_flow {
        interpolate(
            fuel_flow,
            (0., profile.idle_fuel_flow),
            (0., profile.idle_n1_percent),
        )
    } else {
        interpolate(
            fuel_flow,
            (profile.idle_fuel_flow, 1.),
            (profile.idle_n1_percent, profile.max_n1_percent),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntest::assert_about_eq;

    fn profile() -> EngineProfile {
        EngineProfile::standard()
    }

    fn cranked_for(ticks: usize) -> CoreSpeed {
        let mut speed = CoreSpeed::new();
        for _ in 0..ticks {
            speed.update(&profile(), 0., false, true);
        }

        speed
    }

    #[test]
    fn governed_n1_is_zero_without_fuel() {
        assert_about_eq!(governed_n1(&profile(), 0.), 0.);
    }

    #[test]
    fn governed_n1_is_idle_at_idle_fuel_flow() {
        assert_about_eq!(governed_n1(&profile(), 0.4), 65.);
    }

    #[test]
    fn governed_n1_is_max_at_full_fuel_flow() {
        assert_about_eq!(governed_n1(&profile(), 1.), 90.);
    }

    #[test]
    fn governed_n1_scales_linearly_above_idle() {
        assert_about_eq!(governed_n1(&profile(), 0.7), 77.5);
    }

    #[test]
    fn governed_n1_scales_linearly_below_idle() {
        assert_about_eq!(governed_n1(&profile(), 0.2), 32.5);
    }

    #[test]
    fn cranking_adds_crank_rate_each_tick() {
        assert_about_eq!(cranked_for(10).n1_percent(), 5.);
    }

    #[test]
    fn when_cranked_to_threshold_becomes_self_sustaining() {
        let speed = cranked_for(99);
        assert!(!speed.is_self_sustaining());

        let speed = cranked_for(100);
        assert!(speed.is_self_sustaining());
        assert_about_eq!(speed.n1_percent(), 50.);
    }

    #[test]
    fn when_starter_released_before_sustaining_speed_decays_at_fixed_rate() {
        let mut speed = cranked_for(20);
        speed.update(&profile(), 0., false, false);

        assert_about_eq!(speed.n1_percent(), 9.75);
    }

    #[test]
    fn decay_stops_at_zero() {
        let mut speed = cranked_for(1);
        for _ in 0..5 {
            speed.update(&profile(), 0., false, false);
        }

        assert_eq!(speed.n1_percent(), 0.);
    }

    #[test]
    fn sustaining_core_with_combustion_moves_towards_governed_n1() {
        let mut speed = CoreSpeed::new();
        speed.set_n1(50., true);
        speed.update(&profile(), 0.7, true, false);

        assert_about_eq!(speed.n1_percent(), 50. + (27.5 * 0.08));
    }

    #[test]
    fn sustaining_core_without_combustion_reaches_zero_at_end_of_window() {
        let mut speed = CoreSpeed::new();
        speed.set_n1(70., true);

        for _ in 0..299 {
            speed.update(&profile(), 0., false, false);
            assert!(speed.n1_percent() > 0.);
        }
        speed.update(&profile(), 0., false, false);

        assert_eq!(speed.n1_percent(), 0.);
        assert!(!speed.is_self_sustaining());
        assert!(!speed.is_decelerating());
    }

    #[test]
    fn deceleration_removes_equal_share_each_tick() {
        let mut speed = CoreSpeed::new();
        speed.set_n1(60., true);
        speed.update(&profile(), 0., false, false);

        assert_about_eq!(speed.n1_percent(), 60. - (60. / 300.));
        assert!(speed.is_decelerating());
    }

    #[test]
    fn starter_holds_sustaining_core_without_fuel() {
        let mut speed = CoreSpeed::new();
        speed.set_n1(60., true);
        speed.update(&profile(), 0., false, true);

        assert_about_eq!(speed.n1_percent(), 60.);
        assert!(!speed.is_decelerating());
    }

    #[test]
    fn fuel_during_deceleration_resumes_governing() {
        let mut speed = CoreSpeed::new();
        speed.set_n1(60., true);
        speed.update(&profile(), 0., false, false);
        speed.update(&profile(), 0.5, true, false);

        assert!(!speed.is_decelerating());
        assert!(speed.is_self_sustaining());
    }

    #[test]
    fn n1_never_exceeds_ceiling() {
        let profile = EngineProfile {
            crank_rate_percent_per_tick: 50.,
            self_sustaining_n1_percent: 110.,
            ..EngineProfile::standard()
        };
        let mut speed = CoreSpeed::new();
        for _ in 0..5 {
            speed.update(&profile, 0., false, true);
        }

        assert_eq!(speed.n1_percent(), EngineProfile::MAX_N1_PERCENT);
    }

    #[test]
    fn reset_zeroes_the_core() {
        let mut speed = CoreSpeed::new();
        speed.set_n1(70., true);
        speed.reset();

        assert_eq!(speed.n1_percent(), 0.);
        assert!(!speed.is_self_sustaining());
    }
}
