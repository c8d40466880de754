/// The device-info fields the compact rendering shows, read out of the flat
/// status map returned by the device. Values that are missing, of the wrong
/// type or out of range for the field read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceStatus {
    pub device_on: Option<bool>,
    pub brightness: Option<u8>,
    pub color_temp: Option<u16>,
    pub hue: Option<u16>,
    pub saturation: Option<u8>,
}

fn field<T: TryFrom<u64>>(data: &serde_json::Value, key: &str) -> Option<T> {
    data.get(key)
        .and_then(|v| v.as_u64())
        .and_then(|v| T::try_from(v).ok())
}

impl DeviceStatus {
    pub fn from_json(data: &serde_json::Value) -> Self {
        Self {
            device_on: data.get("device_on").and_then(|v| v.as_bool()),
            brightness: field(data, "brightness"),
            color_temp: field(data, "color_temp"),
            hue: field(data, "hue"),
            saturation: field(data, "saturation"),
        }
    }

    pub fn power_label(&self) -> &'static str {
        if self.device_on == Some(true) {
            "ON"
        } else {
            "OFF"
        }
    }

    /// Light state as shown after the power label, e.g. `40%, 2700K` or
    /// `80%, hue 120, saturation 100`. A bulb in color mode reports a color
    /// temperature of 0. `None` for devices without a brightness.
    pub fn light_summary(&self) -> Option<String> {
        let brightness = self.brightness?;
        let mut parts = vec![format!("{}%", brightness)];
        match (self.color_temp, self.hue, self.saturation) {
            (Some(kelvin), _, _) if kelvin > 0 => parts.push(format!("{}K", kelvin)),
            (_, Some(hue), Some(saturation)) => {
                parts.push(format!("hue {}, saturation {}", hue, saturation))
            }
            _ => {}
        }
        Some(parts.join(", "))
    }
}
