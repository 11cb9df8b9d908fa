use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    pub on_threshold_c: f32,
    pub off_threshold_c: f32,
    pub poll_interval_ms: u64,
    pub min_fan_on_ms: u64,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            on_threshold_c: 65.0,
            off_threshold_c: 55.0,
            poll_interval_ms: 30_000,
            min_fan_on_ms: 600_000,
        }
    }
}

impl FanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.on_threshold_c.is_finite() || !self.off_threshold_c.is_finite() {
            return Err(ConfigError::NonFiniteThreshold {
                on: self.on_threshold_c,
                off: self.off_threshold_c,
            });
        }
        if self.off_threshold_c >= self.on_threshold_c {
            return Err(ConfigError::ThresholdOrder {
                on: self.on_threshold_c,
                off: self.off_threshold_c,
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn min_fan_on_time(&self) -> Duration {
        Duration::from_millis(self.min_fan_on_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    pub sensor_path: String,
    pub fan_line: u32,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            sensor_path: "/sys/class/thermal/thermal_zone0/temp".to_string(),
            fan_line: 17,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub fan: FanConfig,
    #[serde(default)]
    pub hardware: HardwareConfig,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.min_fan_on_time(), Duration::from_secs(600));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let config = FanConfig {
            on_threshold_c: 50.0,
            off_threshold_c: 60.0,
            ..FanConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOrder { on, off }) if on == 50.0 && off == 60.0
        ));
    }

    #[test]
    fn equal_thresholds_are_rejected() {
        let config = FanConfig {
            on_threshold_c: 60.0,
            off_threshold_c: 60.0,
            ..FanConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let config = FanConfig {
            on_threshold_c: f32::NAN,
            ..FanConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteThreshold { .. })
        ));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let config = FanConfig {
            poll_interval_ms: 0,
            ..FanConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroPollInterval)
        ));
    }

    #[test]
    fn partial_runtime_config_fills_defaults() {
        let raw = r#"{ "fan": { "on_threshold_c": 70.0 }, "hardware": { "fan_line": 18 } }"#;
        let runtime: RuntimeConfig = serde_json::from_str(raw).unwrap();

        assert_eq!(
            runtime.fan,
            FanConfig {
                on_threshold_c: 70.0,
                ..FanConfig::default()
            }
        );
        assert_eq!(runtime.hardware.fan_line, 18);
        assert_eq!(
            runtime.hardware.sensor_path,
            "/sys/class/thermal/thermal_zone0/temp"
        );
    }
}
