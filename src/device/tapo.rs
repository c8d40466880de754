use async_trait::async_trait;
use tapo::{ApiClient, ColorLightHandler, PlugHandler, TapoResponseError};

use super::{Connector, SmartDevice};
use crate::config::{DeviceConfig, DeviceKind};
use crate::error::AppError;

/// Errors raised while connecting: rejected credentials (or a device that
/// refuses third-party clients) are reported as `Auth`, everything else as
/// `Connection`.
fn connect_error(err: tapo::Error) -> AppError {
    if matches!(
        err,
        tapo::Error::Tapo(
            TapoResponseError::Unauthorized { .. } | TapoResponseError::Forbidden { .. }
        )
    ) {
        AppError::Auth(err.to_string())
    } else {
        AppError::Connection(err.to_string())
    }
}

fn command_error(err: tapo::Error) -> AppError {
    AppError::Command(err.to_string())
}

pub struct TapoPlug {
    handler: PlugHandler,
}

#[async_trait]
impl SmartDevice for TapoPlug {
    async fn get_device_info(&self) -> Result<serde_json::Value, AppError> {
        self.handler
            .get_device_info_json()
            .await
            .map_err(command_error)
    }

    async fn turn_on(&self) -> Result<(), AppError> {
        self.handler.on().await.map_err(command_error)
    }

    async fn turn_off(&self) -> Result<(), AppError> {
        self.handler.off().await.map_err(command_error)
    }

    fn model_name(&self) -> &'static str {
        "P100"
    }
}

/// Bulb handle. Uses the color-bulb handler so hue/saturation can be sent;
/// on white-only bulbs those calls are accepted but have no visible effect.
pub struct TapoBulb {
    handler: ColorLightHandler,
}

#[async_trait]
impl SmartDevice for TapoBulb {
    async fn get_device_info(&self) -> Result<serde_json::Value, AppError> {
        self.handler
            .get_device_info_json()
            .await
            .map_err(command_error)
    }

    async fn turn_on(&self) -> Result<(), AppError> {
        self.handler.on().await.map_err(command_error)
    }

    async fn turn_off(&self) -> Result<(), AppError> {
        self.handler.off().await.map_err(command_error)
    }

    async fn set_brightness(&self, level: u8) -> Result<(), AppError> {
        self.handler
            .set_brightness(level)
            .await
            .map_err(command_error)
    }

    async fn set_color_temp(&self, kelvin: u16) -> Result<(), AppError> {
        self.handler
            .set_color_temperature(kelvin)
            .await
            .map_err(command_error)
    }

    async fn set_color(&self, hue: u16, saturation: u8) -> Result<(), AppError> {
        self.handler
            .set_hue_saturation(hue, saturation)
            .await
            .map_err(command_error)
    }

    fn model_name(&self) -> &'static str {
        "L530"
    }
}

/// Connects to a device on the local network through the `tapo` client.
pub struct TapoConnector {
    kind: DeviceKind,
}

impl TapoConnector {
    pub fn new(kind: DeviceKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl Connector for TapoConnector {
    async fn connect(&self, config: &DeviceConfig) -> Result<Box<dyn SmartDevice>, AppError> {
        tracing::debug!(
            address = %config.address,
            profile = self.kind.profile(),
            "handshake and login"
        );
        let client = ApiClient::new(config.account.clone(), config.secret.clone())
            .with_timeout(config.timeout);

        let device: Box<dyn SmartDevice> = match self.kind {
            DeviceKind::Plug => {
                let handler = client
                    .p100(config.address.clone())
                    .await
                    .map_err(connect_error)?;
                Box::new(TapoPlug { handler })
            }
            DeviceKind::Bulb => {
                let handler = client
                    .l530(config.address.clone())
                    .await
                    .map_err(connect_error)?;
                Box::new(TapoBulb { handler })
            }
        };

        tracing::debug!(address = %config.address, "connected");
        Ok(device)
    }
}
