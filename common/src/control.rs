use std::convert::Infallible;

use tracing::{debug, info};

use crate::{
    config::FanConfig,
    error::{ActuatorError, ConfigError, ControlError},
    fan::FanEngine,
    ports::{Clock, FanActuator, TemperatureSource},
    types::{EngineAction, FanState},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub temperature_c: f32,
    pub transition: Option<EngineAction>,
}

pub struct ControlLoop<S, F, C> {
    engine: FanEngine,
    source: S,
    fan: F,
    clock: C,
}

impl<S, F, C> ControlLoop<S, F, C>
where
    S: TemperatureSource,
    F: FanActuator,
    C: Clock,
{
    /// A fan that already reports On is adopted as On from `now`, so the
    /// minimum runtime starts counting at startup.
    pub fn new(config: FanConfig, source: S, fan: F, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut engine = FanEngine::new(config);
        if fan.is_on() {
            let now_ms = clock.now_ms();
            engine.apply(EngineAction::TurnOn, now_ms);
            info!(now_ms, "fan already on at startup");
        }

        Ok(Self {
            engine,
            source,
            fan,
            clock,
        })
    }

    pub fn fan_state(&self) -> FanState {
        self.engine.state()
    }

    pub fn fan(&self) -> &F {
        &self.fan
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_parts(self) -> (S, F, C) {
        (self.source, self.fan, self.clock)
    }

    pub fn step(&mut self) -> Result<StepOutcome, ControlError> {
        let temperature_c = self.source.read()?;
        let now_ms = self.clock.now_ms();
        let transition = self.engine.evaluate(temperature_c, now_ms);

        debug!(
            temperature_c,
            fan_on = self.engine.is_fan_on(),
            "temperature sampled"
        );

        if let Some(action) = transition {
            let runtime_ms = self.engine.runtime_ms(now_ms);
            match action {
                EngineAction::TurnOn => self.fan.turn_on()?,
                EngineAction::TurnOff => self.fan.turn_off()?,
            }
            self.engine.apply(action, now_ms);

            info!(
                temperature_c,
                fan = action.as_str(),
                runtime_s = runtime_ms / 1_000,
                "fan switched"
            );
        }

        Ok(StepOutcome {
            temperature_c,
            transition,
        })
    }

    /// The only await point is the poll sleep; dropping this future there
    /// leaves the fan state matching the hardware.
    pub async fn run(&mut self) -> Result<Infallible, ControlError> {
        let interval = self.engine.config().poll_interval();
        info!(
            on_threshold_c = self.engine.config().on_threshold_c,
            off_threshold_c = self.engine.config().off_threshold_c,
            poll_interval_s = interval.as_secs(),
            min_fan_on_s = self.engine.config().min_fan_on_time().as_secs(),
            "control loop started"
        );

        loop {
            self.step()?;
            self.clock.sleep(interval).await;
        }
    }

    pub fn shutdown(&mut self) -> Result<(), ActuatorError> {
        self.fan.turn_off()?;
        if self.engine.is_fan_on() {
            self.engine.apply(EngineAction::TurnOff, self.clock.now_ms());
            info!("fan switched OFF for shutdown");
        }
        Ok(())
    }
}
