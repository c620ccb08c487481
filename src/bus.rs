use std::collections::HashMap;
use systems::simulation::SimulatorReaderWriter;

/// The named variables shared between the start panel and its display adapters.
#[derive(Default)]
pub struct PanelBus {
    variables: HashMap<String, f64>,
}
impl PanelBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of every variable written so far, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variables.keys().map(String::as_str).collect();
        names.sort_unstable();

        names
    }
}
impl SimulatorReaderWriter for PanelBus {
    fn read(&mut self, name: &str) -> f64 {
        self.variables.get(name).copied().unwrap_or(0.)
    }

    fn write(&mut self, name: &str, value: f64) {
        self.variables.insert(name.to_owned(), value);
    }
}
