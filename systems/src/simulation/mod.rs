//! Provides all the necessary types for driving the engine start simulation
//! and publishing its state to the display adapters.
use std::time::Duration;

pub mod test;
mod update_context;
#[cfg(test)]
pub use update_context::test_helpers;
pub use update_context::UpdateContext;

/// The fixed period at which the simulation advances.
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Trait for reading and writing named variables on the bus shared between
/// the simulation and its display adapters.
pub trait SimulatorReaderWriter {
    /// Reads a named variable. Unknown variables read as `0.`.
    fn read(&mut self, name: &str) -> f64;
    /// Writes a named variable.
    fn write(&mut self, name: &str, value: f64);
}

/// The top level of a simulated installation. Owns every element and is the
/// only place where engine state is advanced.
pub trait Trainer: SimulationElement {
    fn update(&mut self, context: &UpdateContext);
}

/// Orchestrates the:
/// 1. Updating of the trainer state for each fixed period tick.
/// 2. Writing of trainer state data to the bus.
pub struct Simulation<T: Trainer, U: SimulatorReaderWriter> {
    trainer: T,
    simulator_reader_writer: U,
    simulation_time: Duration,
}
impl<T: Trainer, U: SimulatorReaderWriter> Simulation<T, U> {
    pub fn new(trainer: T, simulator_reader_writer: U) -> Self {
        Simulation {
            trainer,
            simulator_reader_writer,
            simulation_time: Duration::from_millis(0),
        }
    }

    /// Advances the simulation by exactly one tick period.
    pub fn tick(&mut self) {
        self.simulation_time += TICK_PERIOD;
        let context = UpdateContext::new(TICK_PERIOD, self.simulation_time);

        update_and_write(
            &mut self.trainer,
            &mut self.simulator_reader_writer,
            &context,
        );
    }

    /// Advances the simulation by as many whole tick periods as fit in the given duration.
    pub fn run(&mut self, duration: Duration) {
        let ticks = duration.as_millis() / TICK_PERIOD.as_millis();
        for _ in 0..ticks {
            self.tick();
        }
    }

    pub fn simulation_time(&self) -> Duration {
        self.simulation_time
    }

    pub fn trainer(&self) -> &T {
        &self.trainer
    }

    /// Input adapters mutate the controls through here. Changes are picked up
    /// by the next tick.
    pub fn trainer_mut(&mut self) -> &mut T {
        &mut self.trainer
    }

    /// Display adapters read the most recently written state through here.
    pub fn reader(&mut self) -> SimulatorReader {
        SimulatorReader::new(&mut self.simulator_reader_writer)
    }

    pub fn simulator_reader_writer(&self) -> &U {
        &self.simulator_reader_writer
    }
}

pub(crate) fn update_and_write<T: Trainer, U: SimulatorReaderWriter>(
    trainer: &mut T,
    simulator_reader_writer: &mut U,
    context: &UpdateContext,
) {
    trainer.update(context);

    let mut writer = SimulatorWriter::new(simulator_reader_writer);
    let mut visitor = SimulationToSimulatorVisitor::new(&mut writer);
    trainer.accept(&mut visitor);
}

/// Trait for an element within the engine start simulation.
pub trait SimulationElement {
    /// Accepts a visitor, passing it to owned elements first and then to itself.
    fn accept<T: SimulationElementVisitor>(&mut self, visitor: &mut T)
    where
        Self: Sized,
    {
        visitor.visit(self);
    }

    /// Writes the element's published state to the bus.
    fn write(&self, _writer: &mut SimulatorWriter) {}
}

/// Trait for visitors that visit the simulation's elements.
pub trait SimulationElementVisitor {
    fn visit<T: SimulationElement>(&mut self, visited: &mut T);
}

/// Visits elements in order to pass their state to the bus.
struct SimulationToSimulatorVisitor<'a, 'b> {
    writer: &'a mut SimulatorWriter<'b>,
}
impl<'a, 'b> SimulationToSimulatorVisitor<'a, 'b> {
    fn new(writer: &'a mut SimulatorWriter<'b>) -> Self {
        SimulationToSimulatorVisitor { writer }
    }
}
impl SimulationElementVisitor for SimulationToSimulatorVisitor<'_, '_> {
    fn visit<T: SimulationElement>(&mut self, visited: &mut T) {
        visited.write(self.writer);
    }
}

pub struct SimulatorWriter<'a> {
    simulator_read_writer: &'a mut dyn SimulatorReaderWriter,
}
impl<'a> SimulatorWriter<'a> {
    pub fn new(simulator_read_writer: &'a mut dyn SimulatorReaderWriter) -> Self {
        Self {
            simulator_read_writer,
        }
    }

    pub fn write_f64(&mut self, name: &str, value: f64) {
        self.simulator_read_writer.write(name, value);
    }

    pub fn write_bool(&mut self, name: &str, value: bool) {
        self.simulator_read_writer.write(name, from_bool(value));
    }
}

pub struct SimulatorReader<'a> {
    simulator_read_writer: &'a mut dyn SimulatorReaderWriter,
}
impl<'a> SimulatorReader<'a> {
    pub fn new(simulator_read_writer: &'a mut dyn SimulatorReaderWriter) -> Self {
        Self {
            simulator_read_writer,
        }
    }

    pub fn read_f64(&mut self, name: &str) -> f64 {
        self.simulator_read_writer.read(name)
    }

    pub fn read_bool(&mut self, name: &str) -> bool {
        to_bool(self.simulator_read_writer.read(name))
    }
}

/// Converts a given `f64` representing a boolean value on the bus into an actual `bool` value.
pub fn to_bool(value: f64) -> bool {
    (value - 1.).abs() < f64::EPSILON
}

/// Converts a given `bool` value into an `f64` representing that boolean value on the bus.
pub fn from_bool(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
