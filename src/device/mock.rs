use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use super::{Connector, SmartDevice};
use crate::config::DeviceConfig;
use crate::error::AppError;

/// Records every call made against it; optionally fails all commands.
#[derive(Clone)]
pub struct MockDevice {
    pub calls: Arc<Mutex<Vec<String>>>,
    info: serde_json::Value,
    fail_with: Option<String>,
    light: bool,
}

impl MockDevice {
    pub fn plug(info: serde_json::Value) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            info,
            fail_with: None,
            light: false,
        }
    }

    pub fn bulb(info: serde_json::Value) -> Self {
        Self {
            light: true,
            ..Self::plug(info)
        }
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(message) => Err(AppError::Command(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SmartDevice for MockDevice {
    async fn get_device_info(&self) -> Result<serde_json::Value, AppError> {
        self.record("get_device_info".into())?;
        Ok(self.info.clone())
    }

    async fn turn_on(&self) -> Result<(), AppError> {
        self.record("turn_on".into())
    }

    async fn turn_off(&self) -> Result<(), AppError> {
        self.record("turn_off".into())
    }

    async fn set_brightness(&self, level: u8) -> Result<(), AppError> {
        if !self.light {
            return Err(AppError::UnsupportedOperation("mock plug".into()));
        }
        self.record(format!("set_brightness({})", level))
    }

    async fn set_color_temp(&self, kelvin: u16) -> Result<(), AppError> {
        if !self.light {
            return Err(AppError::UnsupportedOperation("mock plug".into()));
        }
        self.record(format!("set_color_temp({})", kelvin))
    }

    async fn set_color(&self, hue: u16, saturation: u8) -> Result<(), AppError> {
        if !self.light {
            return Err(AppError::UnsupportedOperation("mock plug".into()));
        }
        self.record(format!("set_color({}, {})", hue, saturation))
    }

    fn model_name(&self) -> &'static str {
        "Mock"
    }
}

/// Hands out clones of one `MockDevice`, or fails every connection.
pub struct MockConnector {
    pub device: MockDevice,
    pub connects: Arc<AtomicUsize>,
    refuse: Option<String>,
}

impl MockConnector {
    pub fn new(device: MockDevice) -> Self {
        Self {
            device,
            connects: Arc::new(AtomicUsize::new(0)),
            refuse: None,
        }
    }

    pub fn refusing(message: &str) -> Self {
        Self {
            refuse: Some(message.to_string()),
            ..Self::new(MockDevice::plug(json!({})))
        }
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, _config: &DeviceConfig) -> Result<Box<dyn SmartDevice>, AppError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        match &self.refuse {
            Some(message) => Err(AppError::Connection(message.clone())),
            None => Ok(Box::new(self.device.clone())),
        }
    }
}

pub fn test_config() -> DeviceConfig {
    DeviceConfig {
        address: "192.0.2.10".into(),
        account: "me@example.com".into(),
        secret: "secret".into(),
        timeout: std::time::Duration::from_secs(1),
    }
}
