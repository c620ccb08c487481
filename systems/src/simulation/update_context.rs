use std::time::Duration;

/// Provides data unowned by any system in the engine start simulation
/// for the purpose of handling an update frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateContext {
    pub delta: Duration,
    /// The time elapsed since the start of the session, including this frame.
    pub simulation_time: Duration,
}
impl UpdateContext {
    pub fn new(delta: Duration, simulation_time: Duration) -> UpdateContext {
        UpdateContext {
            delta,
            simulation_time,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    pub fn context_with() -> UpdateContextBuilder {
        UpdateContextBuilder::new()
    }

    pub struct UpdateContextBuilder {
        delta: Duration,
        simulation_time: Duration,
    }
    impl UpdateContextBuilder {
        fn new() -> UpdateContextBuilder {
            UpdateContextBuilder {
                delta: Duration::from_millis(100),
                simulation_time: Duration::from_millis(100),
            }
        }

        pub fn build(&self) -> UpdateContext {
            UpdateContext::new(self.delta, self.simulation_time)
        }

        pub fn and(self) -> UpdateContextBuilder {
            self
        }

        pub fn delta(mut self, delta: Duration) -> UpdateContextBuilder {
            self.delta = delta;
            self
        }

        pub fn simulation_time(mut self, simulation_time: Duration) -> UpdateContextBuilder {
            self.simulation_time = simulation_time;
            self
        }
    }
}
