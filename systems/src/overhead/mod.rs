use crate::simulation::{SimulationElement, SimulatorWriter};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OnOffSwitchState {
    On,
    Off,
}

/// A latching two position switch, such as the battery master switch.
pub struct OnOffSwitch {
    is_on_id: String,
    state: OnOffSwitchState,
}
impl OnOffSwitch {
    pub fn new_on(name: &str) -> Self {
        Self::new(name, OnOffSwitchState::On)
    }

    pub fn new_off(name: &str) -> Self {
        Self::new(name, OnOffSwitchState::Off)
    }

    fn new(name: &str, state: OnOffSwitchState) -> Self {
        Self {
            is_on_id: format!("OVHD_{}_IS_ON", name),
            state,
        }
    }

    pub fn set_on(&mut self, value: bool) {
        self.state = if value {
            OnOffSwitchState::On
        } else {
            OnOffSwitchState::Off
        };
    }

    pub fn turn_on(&mut self) {
        self.state = OnOffSwitchState::On;
    }

    pub fn is_on(&self) -> bool {
        self.state == OnOffSwitchState::On
    }

    pub fn is_off(&self) -> bool {
        self.state == OnOffSwitchState::Off
    }
}
impl SimulationElement for OnOffSwitch {
    fn write(&self, writer: &mut SimulatorWriter) {
        writer.write_bool(&self.is_on_id, self.is_on());
    }
}

/// A push button which is only active while held, such as the starter button.
pub struct MomentaryPushButton {
    is_pressed_id: String,
    pressed: bool,
}
impl MomentaryPushButton {
    pub fn new(name: &str) -> Self {
        Self {
            is_pressed_id: format!("OVHD_{}_PB_IS_PRESSED", name),
            pressed: false,
        }
    }

    pub fn press(&mut self) {
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_released(&self) -> bool {
        !self.pressed
    }
}
impl SimulationElement for MomentaryPushButton {
    fn write(&self, writer: &mut SimulatorWriter) {
        writer.write_bool(&self.is_pressed_id, self.pressed);
    }
}


#[cfg(test)]
mod momentary_push_button_tests {
    use super::*;
    use crate::simulation::test::SimulationTestBed;

    #[test]
    fn new_push_button_is_released() {
        assert!(MomentaryPushButton::new("STARTER").is_released());
    }

    #[test]
    fn pressed_push_button_is_pressed_until_released() {
        let mut pb = MomentaryPushButton::new("STARTER");
        pb.press();
        assert!(pb.is_pressed());

        pb.release();
        assert!(pb.is_released());
    }

    #[test]
    fn writes_its_state() {
        let mut pb = MomentaryPushButton::new("STARTER");
        pb.press();

        let mut test_bed = SimulationTestBed::new();
        test_bed.run_without_update(&mut pb);

        assert!(test_bed.contains_bool("OVHD_STARTER_PB_IS_PRESSED", true));
    }
}
