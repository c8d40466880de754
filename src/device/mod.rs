pub mod tapo;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::config::DeviceConfig;
use crate::error::AppError;

/// An authenticated session with one device.
///
/// Every method is a single request/response round-trip. Light operations
/// have default implementations that reject the call, so plug handles only
/// implement the power and status methods.
#[async_trait]
pub trait SmartDevice: Send + Sync {
    /// Flat device-info map as reported by the device.
    async fn get_device_info(&self) -> Result<serde_json::Value, AppError>;

    async fn turn_on(&self) -> Result<(), AppError>;

    async fn turn_off(&self) -> Result<(), AppError>;

    async fn set_brightness(&self, _level: u8) -> Result<(), AppError> {
        Err(AppError::UnsupportedOperation(format!(
            "{} has no brightness control",
            self.model_name()
        )))
    }

    async fn set_color_temp(&self, _kelvin: u16) -> Result<(), AppError> {
        Err(AppError::UnsupportedOperation(format!(
            "{} has no color temperature control",
            self.model_name()
        )))
    }

    async fn set_color(&self, _hue: u16, _saturation: u8) -> Result<(), AppError> {
        Err(AppError::UnsupportedOperation(format!(
            "{} has no color control",
            self.model_name()
        )))
    }

    fn model_name(&self) -> &'static str;
}

/// Performs handshake and login, producing a device handle.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, config: &DeviceConfig) -> Result<Box<dyn SmartDevice>, AppError>;
}
