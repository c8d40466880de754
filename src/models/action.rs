use serde_json::json;

use crate::error::AppError;
use crate::models::params::{Brightness, ColorTemp, Hue, Saturation};

/// An action as requested on the command line, before range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Status,
    On,
    Off,
    Toggle,
    Brightness { level: i64 },
    ColorTemp { kelvin: i64 },
    Color { hue: i64, saturation: i64 },
}

/// A validated action. Parameters are guaranteed to be in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Status,
    On,
    Off,
    Toggle,
    SetBrightness(Brightness),
    SetColorTemp(ColorTemp),
    SetColor { hue: Hue, saturation: Saturation },
}

impl TryFrom<Request> for Action {
    type Error = AppError;

    fn try_from(request: Request) -> Result<Self, Self::Error> {
        Ok(match request {
            Request::Status => Action::Status,
            Request::On => Action::On,
            Request::Off => Action::Off,
            Request::Toggle => Action::Toggle,
            Request::Brightness { level } => Action::SetBrightness(level.try_into()?),
            Request::ColorTemp { kelvin } => Action::SetColorTemp(kelvin.try_into()?),
            Request::Color { hue, saturation } => {
                let hue: Hue = hue.try_into()?;
                let saturation: Saturation = saturation.try_into()?;
                Action::SetColor { hue, saturation }
            }
        })
    }
}

impl Action {
    /// Name reported in the `action` field of a success record.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Status => "getDeviceInfo",
            Action::On => "turnOn",
            Action::Off => "turnOff",
            Action::Toggle => "toggle",
            Action::SetBrightness(_) => "setBrightness",
            Action::SetColorTemp(_) => "setColorTemp",
            Action::SetColor { .. } => "setColor",
        }
    }

    /// Action-specific fields merged into a success record.
    pub fn params(&self) -> serde_json::Map<String, serde_json::Value> {
        let value = match self {
            Action::SetBrightness(level) => json!({"brightness": level.get()}),
            Action::SetColorTemp(kelvin) => json!({"colorTemp": kelvin.get()}),
            Action::SetColor { hue, saturation } => {
                json!({"hue": hue.get(), "saturation": saturation.get()})
            }
            _ => json!({}),
        };
        match value {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        }
    }
}
