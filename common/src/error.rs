use std::{error::Error as StdError, io, num::ParseIntError, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("off threshold ({off}°C) must be below on threshold ({on}°C)")]
    ThresholdOrder { on: f32, off: f32 },
    #[error("thresholds must be finite (on: {on}, off: {off})")]
    NonFiniteThreshold { on: f32, off: f32 },
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,
}

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("temperature source {path} is unavailable: {source}")]
    Unavailable { path: PathBuf, source: io::Error },
    #[error("could not parse temperature reading {raw:?}: {source}")]
    Malformed { raw: String, source: ParseIntError },
}

#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("failed to drive fan output on line {line}: {source}")]
    Fault {
        line: u32,
        source: Box<dyn StdError + Send + Sync>,
    },
}

#[derive(Debug, Error)]
pub enum ControlError {
    #[error(transparent)]
    Sensor(#[from] SensorError),
    #[error(transparent)]
    Actuator(#[from] ActuatorError),
}
