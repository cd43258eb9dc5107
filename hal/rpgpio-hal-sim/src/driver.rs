//! Simulated driver implementation

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use rpgpio_hal::driver::check_frequency;
use rpgpio_hal::{Direction, DriverError, GpioDriver, Level, NumberingScheme, PullMode};

use crate::bus::{SimBus, SimCall, SimPin, SimPwmState};
use crate::pwm::SimPwm;

/// Simulated GPIO controller
///
/// Cloning yields another handle onto the same simulated controller.
#[derive(Clone)]
pub struct SimDriver {
    bus: Rc<RefCell<SimBus>>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a controller with no pins claimed
    pub fn new() -> Self {
        Self {
            bus: Rc::new(RefCell::new(SimBus::new())),
        }
    }

    /// Mark a pin as held by another consumer
    ///
    /// Subsequent claims through this driver fail with
    /// [`DriverError::PinBusy`].
    pub fn claim_externally(&self, pin: u8) {
        // Capacity covers every header pin
        let _ = self.bus.borrow_mut().external.insert(pin);
    }

    /// Drop an external claim
    pub fn release_externally(&self, pin: u8) {
        self.bus.borrow_mut().external.remove(&pin);
    }

    /// Set the level an input pin will read
    pub fn set_input_level(&self, pin: u8, level: Level) {
        let _ = self.bus.borrow_mut().inputs.insert(pin, level);
    }

    /// All calls received so far, oldest first
    pub fn calls(&self) -> Vec<SimCall> {
        self.bus.borrow().calls.clone()
    }

    /// Forget the call log
    pub fn clear_calls(&self) {
        self.bus.borrow_mut().calls.clear();
    }

    /// Check if a pin is claimed through this driver
    pub fn is_claimed(&self, pin: u8) -> bool {
        self.bus.borrow().pins.contains_key(&pin)
    }

    /// Direction of a claimed pin
    pub fn direction(&self, pin: u8) -> Option<Direction> {
        self.bus.borrow().pins.get(&pin).map(|p| p.direction)
    }

    /// Pull mode of a claimed pin
    pub fn pull(&self, pin: u8) -> Option<PullMode> {
        self.bus.borrow().pins.get(&pin).map(|p| p.pull)
    }

    /// Last level written to a claimed pin
    pub fn level(&self, pin: u8) -> Option<Level> {
        self.bus.borrow().pins.get(&pin).map(|p| p.level)
    }

    /// Active PWM session on a pin
    pub fn pwm(&self, pin: u8) -> Option<SimPwmState> {
        self.bus.borrow().pins.get(&pin).and_then(|p| p.pwm)
    }

    /// Active numbering scheme
    pub fn mode(&self) -> NumberingScheme {
        self.bus.borrow().mode
    }

    /// Whether warnings are enabled
    pub fn warnings(&self) -> bool {
        self.bus.borrow().warnings
    }
}

impl GpioDriver for SimDriver {
    type Pwm = SimPwm;

    fn set_mode(&self, scheme: NumberingScheme) -> Result<(), DriverError> {
        let mut bus = self.bus.borrow_mut();
        bus.record(SimCall::SetMode(scheme));
        bus.mode = scheme;
        Ok(())
    }

    fn set_warnings(&self, enabled: bool) {
        let mut bus = self.bus.borrow_mut();
        bus.record(SimCall::SetWarnings(enabled));
        bus.warnings = enabled;
    }

    fn configure_pin(
        &self,
        pin: u8,
        direction: Direction,
        pull: PullMode,
    ) -> Result<(), DriverError> {
        let mut bus = self.bus.borrow_mut();
        bus.record(SimCall::Configure {
            pin,
            direction,
            pull,
        });
        bus.check_pin(pin)?;

        if bus.external.contains(&pin) || bus.pins.contains_key(&pin) {
            #[cfg(feature = "defmt")]
            defmt::debug!("sim: pin {} already claimed", pin);
            return Err(DriverError::PinBusy(pin));
        }

        let pull = match direction {
            Direction::Input => pull,
            Direction::Output => PullMode::Off,
        };
        bus.pins
            .insert(
                pin,
                SimPin {
                    direction,
                    pull,
                    level: Level::Low,
                    pwm: None,
                },
            )
            .map_err(|_| DriverError::InvalidPin(pin))?;
        Ok(())
    }

    fn read_pin(&self, pin: u8) -> Result<Level, DriverError> {
        let mut bus = self.bus.borrow_mut();
        bus.record(SimCall::Read { pin });
        let state = *bus.claimed(pin)?;

        let level = match state.direction {
            Direction::Output => state.level,
            Direction::Input => match bus.inputs.get(&pin) {
                Some(level) => *level,
                None => Level::from(state.pull == PullMode::Up),
            },
        };
        Ok(level)
    }

    fn write_pin(&self, pin: u8, level: Level) -> Result<(), DriverError> {
        let mut bus = self.bus.borrow_mut();
        bus.record(SimCall::Write { pin, level });
        let state = bus.claimed_mut(pin)?;
        if state.direction != Direction::Output {
            return Err(DriverError::WrongDirection(pin));
        }
        state.level = level;
        Ok(())
    }

    fn release_pin(&self, pin: u8) -> Result<(), DriverError> {
        let mut bus = self.bus.borrow_mut();
        bus.record(SimCall::Release { pin });
        bus.pins.remove(&pin);
        Ok(())
    }

    fn create_pwm(&self, pin: u8, frequency_hz: f32) -> Result<SimPwm, DriverError> {
        let session = {
            let mut bus = self.bus.borrow_mut();
            let session = bus.next_session;
            bus.record(SimCall::CreatePwm {
                pin,
                session,
                frequency_hz,
            });
            check_frequency(frequency_hz)?;

            let state = bus.claimed_mut(pin)?;
            if state.direction != Direction::Output {
                return Err(DriverError::WrongDirection(pin));
            }
            if state.pwm.is_some() {
                return Err(DriverError::PwmInUse(pin));
            }
            state.pwm = Some(SimPwmState {
                session,
                frequency_hz,
                duty_percent: 0.0,
                running: false,
            });
            bus.next_session += 1;
            session
        };

        Ok(SimPwm::new(self.bus.clone(), pin, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::BOARD_GPIO_POSITIONS;
    use rpgpio_hal::PwmChannel;

    #[test]
    fn test_claim_and_release() {
        let sim = SimDriver::new();

        assert!(sim.configure_pin(17, Direction::Output, PullMode::Up).is_ok());
        assert!(sim.is_claimed(17));
        assert_eq!(sim.direction(17), Some(Direction::Output));
        // Pull is ignored for outputs
        assert_eq!(sim.pull(17), Some(PullMode::Off));

        // Can't claim same pin twice
        assert_eq!(
            sim.configure_pin(17, Direction::Input, PullMode::Off),
            Err(DriverError::PinBusy(17))
        );

        // Release and re-claim
        sim.release_pin(17).unwrap();
        assert!(!sim.is_claimed(17));
        assert!(sim.configure_pin(17, Direction::Input, PullMode::Down).is_ok());
        assert_eq!(sim.pull(17), Some(PullMode::Down));
    }

    #[test]
    fn test_external_claim() {
        let sim = SimDriver::new();
        sim.claim_externally(4);

        assert_eq!(
            sim.configure_pin(4, Direction::Input, PullMode::Off),
            Err(DriverError::PinBusy(4))
        );

        sim.release_externally(4);
        assert!(sim.configure_pin(4, Direction::Input, PullMode::Off).is_ok());
    }

    #[test]
    fn test_invalid_pin_per_scheme() {
        let sim = SimDriver::new();
        assert_eq!(
            sim.configure_pin(28, Direction::Input, PullMode::Off),
            Err(DriverError::InvalidPin(28))
        );

        sim.set_mode(NumberingScheme::Board).unwrap();
        assert_eq!(
            sim.configure_pin(0, Direction::Input, PullMode::Off),
            Err(DriverError::InvalidPin(0))
        );
        assert!(sim.configure_pin(40, Direction::Input, PullMode::Off).is_ok());
    }

    #[test]
    fn test_board_rejects_power_and_ground() {
        let sim = SimDriver::new();
        sim.set_mode(NumberingScheme::Board).unwrap();

        // 3V3
        assert_eq!(
            sim.configure_pin(1, Direction::Output, PullMode::Off),
            Err(DriverError::InvalidPin(1))
        );
        for pos in [2, 4, 6, 9, 14, 17, 20, 25, 27, 28, 30, 34, 39] {
            assert_eq!(
                sim.configure_pin(pos, Direction::Input, PullMode::Off),
                Err(DriverError::InvalidPin(pos))
            );
        }
        for pos in BOARD_GPIO_POSITIONS {
            assert!(sim.configure_pin(pos, Direction::Input, PullMode::Off).is_ok());
        }
    }

    #[test]
    fn test_io_requires_claim() {
        let sim = SimDriver::new();
        assert_eq!(sim.read_pin(5), Err(DriverError::NotConfigured(5)));
        assert_eq!(
            sim.write_pin(5, Level::High),
            Err(DriverError::NotConfigured(5))
        );
    }

    #[test]
    fn test_write_needs_output() {
        let sim = SimDriver::new();
        sim.configure_pin(6, Direction::Input, PullMode::Off).unwrap();
        assert_eq!(
            sim.write_pin(6, Level::High),
            Err(DriverError::WrongDirection(6))
        );
    }

    #[test]
    fn test_input_levels() {
        let sim = SimDriver::new();
        sim.configure_pin(22, Direction::Input, PullMode::Up).unwrap();
        // Pull-up idles high
        assert_eq!(sim.read_pin(22), Ok(Level::High));

        sim.set_input_level(22, Level::Low);
        assert_eq!(sim.read_pin(22), Ok(Level::Low));
    }

    #[test]
    fn test_output_reads_back() {
        let sim = SimDriver::new();
        sim.configure_pin(27, Direction::Output, PullMode::Off).unwrap();
        sim.write_pin(27, Level::High).unwrap();
        assert_eq!(sim.read_pin(27), Ok(Level::High));
        assert_eq!(sim.level(27), Some(Level::High));
    }

    #[test]
    fn test_pwm_lifecycle() {
        let sim = SimDriver::new();
        sim.configure_pin(18, Direction::Output, PullMode::Off).unwrap();

        let mut pwm = sim.create_pwm(18, 1000.0).unwrap();
        assert_eq!(pwm.pin(), 18);
        assert_eq!(sim.pwm(18).map(|s| s.session), Some(pwm.session()));
        assert!(!sim.pwm(18).unwrap().running);

        pwm.start(25.0).unwrap();
        pwm.change_duty_cycle(50.0).unwrap();
        pwm.change_frequency(200.0).unwrap();
        let state = sim.pwm(18).unwrap();
        assert!(state.running);
        assert_eq!(state.duty_percent, 50.0);
        assert_eq!(state.frequency_hz, 200.0);

        // Only one session per pin
        assert_eq!(
            sim.create_pwm(18, 50.0).err(),
            Some(DriverError::PwmInUse(18))
        );

        pwm.stop().unwrap();
        assert!(sim.pwm(18).is_none());
        assert_eq!(pwm.change_duty_cycle(10.0), Err(DriverError::PwmNotStarted));
    }

    #[test]
    fn test_pwm_rejects_bad_duty() {
        let sim = SimDriver::new();
        sim.configure_pin(19, Direction::Output, PullMode::Off).unwrap();
        let mut pwm = sim.create_pwm(19, 100.0).unwrap();

        assert_eq!(pwm.start(150.0), Err(DriverError::InvalidDutyCycle));
        assert!(!sim.pwm(19).unwrap().running);

        pwm.start(100.0).unwrap();
        assert_eq!(pwm.change_duty_cycle(-1.0), Err(DriverError::InvalidDutyCycle));
        assert_eq!(sim.pwm(19).unwrap().duty_percent, 100.0);
    }

    #[test]
    fn test_pwm_needs_output() {
        let sim = SimDriver::new();
        assert_eq!(
            sim.create_pwm(12, 100.0).err(),
            Some(DriverError::NotConfigured(12))
        );

        sim.configure_pin(12, Direction::Input, PullMode::Off).unwrap();
        assert_eq!(
            sim.create_pwm(12, 100.0).err(),
            Some(DriverError::WrongDirection(12))
        );
    }

    #[test]
    fn test_pwm_rejects_bad_frequency() {
        let sim = SimDriver::new();
        sim.configure_pin(13, Direction::Output, PullMode::Off).unwrap();
        assert_eq!(
            sim.create_pwm(13, 0.0).err(),
            Some(DriverError::InvalidFrequency)
        );
    }

    #[test]
    fn test_call_log() {
        let sim = SimDriver::new();
        sim.set_mode(NumberingScheme::Bcm).unwrap();
        sim.set_warnings(false);
        sim.configure_pin(2, Direction::Input, PullMode::Off).unwrap();
        sim.release_pin(2).unwrap();

        assert_eq!(
            sim.calls(),
            [
                SimCall::SetMode(NumberingScheme::Bcm),
                SimCall::SetWarnings(false),
                SimCall::Configure {
                    pin: 2,
                    direction: Direction::Input,
                    pull: PullMode::Off,
                },
                SimCall::Release { pin: 2 },
            ]
        );
        assert!(!sim.warnings());

        sim.clear_calls();
        assert!(sim.calls().is_empty());
    }
}
