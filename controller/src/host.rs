use std::{
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use tokio::{
    signal::unix::{signal, SignalKind},
    time::Instant,
};
use tracing::{info, warn};

use fanctl_common::{Clock, ControlLoop, RuntimeConfig};

use crate::{gpio::GpioFan, thermal::ThermalZoneSensor};

const DEFAULT_CONFIG_PATH: &str = "/etc/fanctl/config.json";

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = config_path();
    let runtime = load_runtime_config(&config_path).await?;
    info!(path = %config_path.display(), "configuration loaded");

    let (sensor, fan) = open_hardware(&runtime)?;
    let mut control = ControlLoop::new(runtime.fan, sensor, fan, TokioClock::new())
        .context("invalid fan configuration")?;

    tokio::select! {
        result = control.run() => match result {
            Ok(never) => match never {},
            Err(err) => return Err(err).context("control loop failed"),
        },
        signal = shutdown_signal() => match signal {
            Ok(signal) => info!(signal, "shutdown requested"),
            Err(err) => warn!("signal handling failed, shutting down: {err:#}"),
        },
    }

    if let Err(err) = control.shutdown() {
        warn!("failed to turn fan off on shutdown: {err}");
    }
    let (_, fan, _) = control.into_parts();
    fan.release();

    info!("fan controller stopped");
    Ok(())
}

// Config is validated before the fan line is touched.
fn open_hardware(runtime: &RuntimeConfig) -> anyhow::Result<(ThermalZoneSensor, GpioFan)> {
    runtime
        .fan
        .validate()
        .context("invalid fan configuration")?;

    let sensor = ThermalZoneSensor::new(&runtime.hardware.sensor_path);
    let fan = GpioFan::open(runtime.hardware.fan_line)
        .with_context(|| format!("failed to open fan line {}", runtime.hardware.fan_line))?;
    info!(line = fan.line(), sensor = %runtime.hardware.sensor_path, "hardware opened");

    Ok((sensor, fan))
}

struct TokioClock {
    start: Instant,
}

impl TokioClock {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now_ms(&self) -> u64 {
        self.start
            .elapsed()
            .as_millis()
            .try_into()
            .unwrap_or(u64::MAX)
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}

async fn shutdown_signal() -> anyhow::Result<&'static str> {
    let mut terminate =
        signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for SIGINT")?;
            Ok("SIGINT")
        }
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

fn config_path() -> PathBuf {
    std::env::var("FANCTL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

async fn load_runtime_config(path: &Path) -> anyhow::Result<RuntimeConfig> {
    match tokio::fs::read(path).await {
        Ok(raw) => serde_json::from_slice::<RuntimeConfig>(&raw)
            .with_context(|| format!("failed to parse config {}", path.display())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(RuntimeConfig::default()),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    }
}
