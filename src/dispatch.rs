use crate::config::DeviceConfig;
use crate::device::{Connector, SmartDevice};
use crate::error::AppError;
use crate::models::action::{Action, Request};
use crate::models::device_status::DeviceStatus;
use crate::models::result::ActionResult;

fn failure(action: &str, err: AppError) -> ActionResult {
    tracing::error!(action, kind = err.error_type(), "{}", err);
    ActionResult::Failure(err)
}

/// Run one validated action against an already connected device.
pub async fn execute(device: &dyn SmartDevice, action: Action) -> ActionResult {
    tracing::debug!(action = action.name(), "dispatching");

    let outcome = match action {
        Action::Status => match device.get_device_info().await {
            Ok(info) => return ActionResult::status(info),
            Err(e) => Err(e),
        },
        Action::On => device.turn_on().await,
        Action::Off => device.turn_off().await,
        Action::Toggle => return toggle(device).await,
        Action::SetBrightness(level) => device.set_brightness(level.get()).await,
        Action::SetColorTemp(kelvin) => device.set_color_temp(kelvin.get()).await,
        Action::SetColor { hue, saturation } => {
            device.set_color(hue.get(), saturation.get()).await
        }
    };

    match outcome {
        Ok(()) => ActionResult::success(action),
        Err(e) => failure(action.name(), e),
    }
}

/// Read the power state and invoke the opposite power call. The result is
/// the record of that call (`turnOn` or `turnOff`).
async fn toggle(device: &dyn SmartDevice) -> ActionResult {
    let info = match device.get_device_info().await {
        Ok(info) => info,
        Err(e) => return failure(Action::Toggle.name(), e),
    };

    let next = match DeviceStatus::from_json(&info).device_on {
        Some(true) => Action::Off,
        Some(false) => Action::On,
        None => {
            return failure(
                Action::Toggle.name(),
                AppError::Command("device status did not report a power state".into()),
            )
        }
    };

    let outcome = if next == Action::Off {
        device.turn_off().await
    } else {
        device.turn_on().await
    };

    match outcome {
        Ok(()) => ActionResult::success(next),
        Err(e) => failure(next.name(), e),
    }
}

/// Range-check a request. Out-of-range parameters become a failure result
/// before anything touches the network.
pub fn validate(request: Request) -> Result<Action, ActionResult> {
    Action::try_from(request).map_err(|e| failure("validate", e))
}

/// Connect once and execute. A connection failure is returned as-is and
/// never retried.
pub async fn run_action(
    connector: &dyn Connector,
    config: &DeviceConfig,
    action: Action,
) -> ActionResult {
    let device = match connector.connect(config).await {
        Ok(device) => device,
        Err(e) => return failure("connect", e),
    };

    execute(device.as_ref(), action).await
}
