pub mod config;
pub mod control;
pub mod error;
pub mod fan;
pub mod ports;
pub mod types;

pub use config::{FanConfig, HardwareConfig, RuntimeConfig};
pub use control::{ControlLoop, StepOutcome};
pub use error::{ActuatorError, ConfigError, ControlError, SensorError};
pub use fan::FanEngine;
pub use ports::{Clock, FanActuator, TemperatureSource};
pub use types::{EngineAction, FanState};
