use std::{fs, path::PathBuf};

use fanctl_common::{SensorError, TemperatureSource};

/// Reads a thermal zone `temp` attribute (millidegrees Celsius).
#[derive(Debug, Clone)]
pub struct ThermalZoneSensor {
    path: PathBuf,
}

impl ThermalZoneSensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemperatureSource for ThermalZoneSensor {
    fn read(&mut self) -> Result<f32, SensorError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| SensorError::Unavailable {
            path: self.path.clone(),
            source,
        })?;
        parse_millidegrees(&raw)
    }
}

pub fn parse_millidegrees(raw: &str) -> Result<f32, SensorError> {
    let trimmed = raw.trim();
    let millidegrees: i64 = trimmed.parse().map_err(|source| SensorError::Malformed {
        raw: trimmed.to_string(),
        source,
    })?;
    Ok(millidegrees as f32 / 1000.0)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn parses_millidegrees() {
        assert_eq!(parse_millidegrees("48312\n").unwrap(), 48.312);
        assert_eq!(parse_millidegrees("  65000  ").unwrap(), 65.0);
        assert_eq!(parse_millidegrees("-5000").unwrap(), -5.0);
    }

    #[test]
    fn rejects_non_integer_readings() {
        for raw in ["", "abc", "48.5", "4 8"] {
            assert!(
                matches!(
                    parse_millidegrees(raw),
                    Err(SensorError::Malformed { .. })
                ),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn sensor_reads_fresh_value_each_call() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("temp");
        fs::write(&path, "50000\n").unwrap();
        let mut sensor = ThermalZoneSensor::new(&path);

        assert_eq!(sensor.read().unwrap(), 50.0);

        fs::write(&path, "70500\n").unwrap();
        assert_eq!(sensor.read().unwrap(), 70.5);
    }

    #[test]
    fn missing_sensor_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let mut sensor = ThermalZoneSensor::new(dir.path().join("missing"));

        assert!(matches!(
            sensor.read(),
            Err(SensorError::Unavailable { .. })
        ));
    }

    #[test]
    fn garbage_sensor_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("temp");
        fs::write(&path, "N/A\n").unwrap();

        let err = ThermalZoneSensor::new(&path).read().unwrap_err();

        assert!(matches!(err, SensorError::Malformed { ref raw, .. } if raw == "N/A"));
    }
}
