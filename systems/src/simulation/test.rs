use std::{collections::HashMap, time::Duration};

use super::{
    from_bool, to_bool, update_and_write, SimulationElement, SimulationElementVisitor,
    SimulatorReaderWriter, Trainer, UpdateContext, TICK_PERIOD,
};

struct TestTrainer<'a, T: SimulationElement, U: Fn(&mut T, &UpdateContext)> {
    element: &'a mut T,
    update_fn: U,
}
impl<'a, T: SimulationElement, U: Fn(&mut T, &UpdateContext)> TestTrainer<'a, T, U> {
    fn new(element: &'a mut T, update_fn: U) -> Self {
        Self { element, update_fn }
    }
}
impl<'a, T: SimulationElement, U: Fn(&mut T, &UpdateContext)> Trainer for TestTrainer<'a, T, U> {
    fn update(&mut self, context: &UpdateContext) {
        (self.update_fn)(&mut self.element, context);
    }
}
impl<'a, T: SimulationElement, U: Fn(&mut T, &UpdateContext)> SimulationElement
    for TestTrainer<'a, T, U>
{
    fn accept<W: SimulationElementVisitor>(&mut self, visitor: &mut W) {
        self.element.accept(visitor);
    }
}

pub struct TestReaderWriter {
    variables: HashMap<String, f64>,
}
impl TestReaderWriter {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    pub fn contains_f64(&self, name: &str, value: f64) -> bool {
        if let Some(val) = self.variables.get(name) {
            (val - value).abs() < f64::EPSILON
        } else {
            false
        }
    }

    pub fn contains_bool(&self, name: &str, value: bool) -> bool {
        self.contains_f64(name, from_bool(value))
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    fn read_bool(&mut self, name: &str) -> bool {
        to_bool(self.read(name))
    }

    fn read_f64(&mut self, name: &str) -> f64 {
        self.read(name)
    }
}
impl SimulatorReaderWriter for TestReaderWriter {
    fn read(&mut self, name: &str) -> f64 {
        *self.variables.get(name).unwrap_or(&0.)
    }

    fn write(&mut self, name: &str, value: f64) {
        self.variables.insert(name.to_owned(), value);
    }
}
impl Default for TestReaderWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// The simulation test bed handles the testing of [`SimulationElement`]s
/// by running a full simulation tick on them.
///
/// [`SimulationElement`]: ../trait.SimulationElement.html
pub struct SimulationTestBed {
    reader_writer: TestReaderWriter,
    delta: Duration,
    simulation_time: Duration,
}
impl SimulationTestBed {
    pub fn new() -> Self {
        Self {
            reader_writer: TestReaderWriter::new(),
            delta: TICK_PERIOD,
            simulation_time: Duration::from_millis(0),
        }
    }

    pub fn run<T: SimulationElement, U: Fn(&mut T, &UpdateContext)>(
        &mut self,
        element: &mut T,
        update_fn: U,
    ) {
        self.simulation_time += self.delta;
        let context = UpdateContext::new(self.delta, self.simulation_time);

        let mut trainer = TestTrainer::new(element, update_fn);
        update_and_write(&mut trainer, &mut self.reader_writer, &context);
    }

    pub fn run_without_update<T: SimulationElement>(&mut self, element: &mut T) {
        self.run(element, |_, _| {});
    }

    pub fn and(self) -> Self {
        self
    }

    pub fn delta(mut self, delta: Duration) -> Self {
        self.delta = delta;
        self
    }

    pub fn read_bool(&mut self, name: &str) -> bool {
        self.reader_writer.read_bool(name)
    }

    pub fn read_f64(&mut self, name: &str) -> f64 {
        self.reader_writer.read_f64(name)
    }

    pub fn contains_f64(&self, name: &str, value: f64) -> bool {
        self.reader_writer.contains_f64(name, value)
    }

    pub fn contains_bool(&self, name: &str, value: bool) -> bool {
        self.reader_writer.contains_bool(name, value)
    }
}
impl Default for SimulationTestBed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulatorWriter;

    #[derive(Default)]
    struct ElementUnderTest {
        update_called: bool,
        updated_at: Option<Duration>,
    }
    impl ElementUnderTest {
        fn update(&mut self, context: &UpdateContext) {
            self.update_called = true;
            self.updated_at = Some(context.simulation_time);
        }
    }
    impl SimulationElement for ElementUnderTest {
        fn write(&self, writer: &mut SimulatorWriter) {
            writer.write_bool("UPDATE_CALLED", self.update_called);
        }
    }

    #[test]
    fn element_can_run_in_test_bed() {
        let mut element = ElementUnderTest::default();
        let mut bed = SimulationTestBed::new();
        bed.run(&mut element, |el, context| {
            el.update(context);
        });

        assert!(element.update_called);
        assert!(bed.read_bool("UPDATE_CALLED"));
    }

    #[test]
    fn simulation_time_accumulates_delta() {
        let mut element = ElementUnderTest::default();
        let mut bed = SimulationTestBed::new().delta(Duration::from_millis(250));
        bed.run(&mut element, |el, context| el.update(context));
        bed.run(&mut element, |el, context| el.update(context));

        assert_eq!(element.updated_at, Some(Duration::from_millis(500)));
    }

    #[test]
    fn unknown_variables_read_as_zero() {
        let mut bed = SimulationTestBed::new();

        assert_eq!(bed.read_f64("DOES_NOT_EXIST"), 0.);
    }
}
