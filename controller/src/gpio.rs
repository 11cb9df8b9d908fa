use std::error::Error as StdError;

use rppal::gpio::{Gpio, OutputPin};
use tracing::info;

use fanctl_common::{ActuatorError, FanActuator};

pub struct GpioFan {
    pin: OutputPin,
    line: u32,
}

impl GpioFan {
    /// `line` is a BCM pin number. The pin comes up as an output driven low.
    pub fn open(line: u32) -> Result<Self, ActuatorError> {
        let bcm = bcm_pin(line)?;
        let pin = Gpio::new()
            .and_then(|gpio| gpio.get(bcm))
            .map_err(|err| fault(line, err))?
            .into_output_low();

        info!(line, "fan output ready");
        Ok(Self { pin, line })
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Drives the pin low; dropping the pin restores its previous mode.
    pub fn release(mut self) {
        self.pin.set_low();
    }
}

impl FanActuator for GpioFan {
    fn turn_on(&mut self) -> Result<(), ActuatorError> {
        if !self.pin.is_set_high() {
            self.pin.set_high();
        }
        Ok(())
    }

    fn turn_off(&mut self) -> Result<(), ActuatorError> {
        if self.pin.is_set_high() {
            self.pin.set_low();
        }
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.pin.is_set_high()
    }
}

fn bcm_pin(line: u32) -> Result<u8, ActuatorError> {
    u8::try_from(line).map_err(|err| fault(line, err))
}

fn fault(line: u32, err: impl StdError + Send + Sync + 'static) -> ActuatorError {
    ActuatorError::Fault {
        line,
        source: Box::new(err),
    }
}
