// `turned_on_at_ms` is `Some` exactly when `is_on` is true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanState {
    pub is_on: bool,
    pub turned_on_at_ms: Option<u64>,
}

impl FanState {
    pub fn off() -> Self {
        Self::default()
    }

    pub fn on_since(now_ms: u64) -> Self {
        Self {
            is_on: true,
            turned_on_at_ms: Some(now_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineAction {
    TurnOn,
    TurnOff,
}

impl EngineAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TurnOn => "ON",
            Self::TurnOff => "OFF",
        }
    }
}
