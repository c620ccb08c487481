use start_panel::{
    indication::PanelIndications, new_simulation, ControlInput, StartPanelSimulation,
};
use std::{env, fs, time::Duration};
use systems::turbine::EngineProfile;
use uom::si::{f64::*, ratio::ratio};

/// Runs a scripted start and shutdown, printing the panel once per second.
/// An optional argument names a JSON engine profile.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let profile = match env::args().nth(1) {
        Some(path) => EngineProfile::from_json(&fs::read_to_string(path)?)?,
        None => EngineProfile::standard(),
    };
    let mut simulation = new_simulation(profile);

    let panel = simulation.trainer_mut();
    panel.set_battery_on(true);
    panel.set_fuel_flow(Ratio::new::<ratio>(0.5));
    panel.press_starter();

    let mut elapsed = Duration::from_secs(0);
    while !simulation.trainer().engine_state().self_sustaining {
        run_and_print(&mut simulation, &mut elapsed);
    }
    simulation.trainer_mut().release_starter();

    for _ in 0..20 {
        run_and_print(&mut simulation, &mut elapsed);
    }

    let panel = simulation.trainer_mut();
    panel.set_idle_lock_override(true);
    panel.set_fuel_flow(Ratio::new::<ratio>(0.));
    panel.set_idle_lock_override(false);

    for _ in 0..40 {
        run_and_print(&mut simulation, &mut elapsed);
    }

    simulation.trainer_mut().set_battery_on(false);
    run_and_print(&mut simulation, &mut elapsed);

    Ok(())
}

fn run_and_print(simulation: &mut StartPanelSimulation, elapsed: &mut Duration) {
    let second = Duration::from_secs(1);
    simulation.run(second);
    *elapsed += second;

    let indications = PanelIndications::read(&mut simulation.reader());
    println!(
        "{:>4}s  N1 {:>5}%  TOT {:>4}  {:>6}  FUEL {:>4} {:?}  {:?}",
        elapsed.as_secs(),
        indications.n1.readout,
        indications.tot.readout,
        indications.voltage,
        indications.fuel_flow.readout,
        indications.fuel_flow.band,
        indications.phase
    );

    for warning in simulation.trainer_mut().take_warnings() {
        println!("       {:?}", warning);
    }
}
