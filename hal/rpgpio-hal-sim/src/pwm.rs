//! Simulated PWM session

use alloc::rc::Rc;
use core::cell::RefCell;

use rpgpio_hal::driver::check_frequency;
use rpgpio_hal::{DriverError, PwmChannel};

use crate::bus::{SimBus, SimCall};

/// PWM session on a simulated pin
pub struct SimPwm {
    bus: Rc<RefCell<SimBus>>,
    pin: u8,
    session: u32,
}

impl SimPwm {
    pub(crate) fn new(bus: Rc<RefCell<SimBus>>, pin: u8, session: u32) -> Self {
        Self { bus, pin, session }
    }

    /// Pin this session drives
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Driver-unique session id, as recorded in the call log
    pub fn session(&self) -> u32 {
        self.session
    }
}

impl PwmChannel for SimPwm {
    fn start(&mut self, duty_percent: f32) -> Result<(), DriverError> {
        let mut bus = self.bus.borrow_mut();
        bus.record(SimCall::PwmStart {
            session: self.session,
            duty_percent,
        });
        SimBus::check_duty(duty_percent)?;
        let state = bus.session_mut(self.session)?;
        state.duty_percent = duty_percent;
        state.running = true;
        Ok(())
    }

    fn change_frequency(&mut self, frequency_hz: f32) -> Result<(), DriverError> {
        let mut bus = self.bus.borrow_mut();
        bus.record(SimCall::PwmChangeFrequency {
            session: self.session,
            frequency_hz,
        });
        check_frequency(frequency_hz)?;
        bus.session_mut(self.session)?.frequency_hz = frequency_hz;
        Ok(())
    }

    fn change_duty_cycle(&mut self, duty_percent: f32) -> Result<(), DriverError> {
        let mut bus = self.bus.borrow_mut();
        bus.record(SimCall::PwmChangeDutyCycle {
            session: self.session,
            duty_percent,
        });
        SimBus::check_duty(duty_percent)?;
        bus.session_mut(self.session)?.duty_percent = duty_percent;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DriverError> {
        let mut bus = self.bus.borrow_mut();
        bus.record(SimCall::PwmStop {
            session: self.session,
        });
        if let Ok(pin) = bus.claimed_mut(self.pin) {
            if pin.pwm.map(|s| s.session) == Some(self.session) {
                pin.pwm = None;
            }
        }
        Ok(())
    }
}
