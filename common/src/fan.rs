use crate::{
    config::FanConfig,
    types::{EngineAction, FanState},
};

#[derive(Debug, Clone)]
pub struct FanEngine {
    config: FanConfig,
    state: FanState,
}

impl FanEngine {
    pub fn new(config: FanConfig) -> Self {
        Self {
            config,
            state: FanState::off(),
        }
    }

    pub fn config(&self) -> &FanConfig {
        &self.config
    }

    pub fn state(&self) -> FanState {
        self.state
    }

    pub fn is_fan_on(&self) -> bool {
        self.state.is_on
    }

    pub fn runtime_ms(&self, now_ms: u64) -> u64 {
        match self.state.turned_on_at_ms {
            Some(start) if self.state.is_on => now_ms.saturating_sub(start),
            _ => 0,
        }
    }

    pub fn evaluate(&self, temp_c: f32, now_ms: u64) -> Option<EngineAction> {
        if !self.state.is_on {
            return (temp_c > self.config.on_threshold_c).then_some(EngineAction::TurnOn);
        }

        if temp_c < self.config.off_threshold_c && self.min_runtime_elapsed(now_ms) {
            Some(EngineAction::TurnOff)
        } else {
            None
        }
    }

    pub fn apply(&mut self, action: EngineAction, now_ms: u64) {
        self.state = match action {
            EngineAction::TurnOn => FanState::on_since(now_ms),
            EngineAction::TurnOff => FanState::off(),
        };
    }

    fn min_runtime_elapsed(&self, now_ms: u64) -> bool {
        match self.state.turned_on_at_ms {
            Some(start) => now_ms.saturating_sub(start) > self.config.min_fan_on_ms,
            None => true,
        }
    }
}
