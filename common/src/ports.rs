use std::{future::Future, time::Duration};

use crate::error::{ActuatorError, SensorError};

pub trait TemperatureSource {
    fn read(&mut self) -> Result<f32, SensorError>;
}

/// `turn_on` while already on (and `turn_off` while already off) must be a
/// no-op that succeeds.
pub trait FanActuator {
    fn turn_on(&mut self) -> Result<(), ActuatorError>;

    fn turn_off(&mut self) -> Result<(), ActuatorError>;

    fn is_on(&self) -> bool;
}

pub trait Clock {
    fn now_ms(&self) -> u64;

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}
