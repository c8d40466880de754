//! Guided walk through every bulb action, pausing between steps so the
//! effect can be checked by eye.

use std::io::Write;

use dialoguer::{Confirm, Input};

use crate::device::SmartDevice;
use crate::dispatch;
use crate::error::AppError;
use crate::models::action::{Action, Request};
use crate::models::result::ActionResult;

pub trait Prompter {
    /// Block until the user is ready for the next step.
    fn pause(&mut self) -> Result<(), AppError>;

    fn confirm(&mut self, prompt: &str) -> Result<bool, AppError>;
}

pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn pause(&mut self) -> Result<(), AppError> {
        Input::<String>::new()
            .with_prompt("  Press Enter to continue")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        Ok(())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, AppError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| AppError::InvalidInput(e.to_string()))
    }
}

struct Step {
    label: &'static str,
    request: Request,
    pause: bool,
}

const fn step(label: &'static str, request: Request, pause: bool) -> Step {
    Step {
        label,
        request,
        pause,
    }
}

const WHITE_STEPS: &[Step] = &[
    step("2. Turn on", Request::On, false),
    step("3.1 Brightness 25%", Request::Brightness { level: 25 }, true),
    step("3.2 Brightness 100%", Request::Brightness { level: 100 }, true),
    step("4.1 Warm white (2700K)", Request::ColorTemp { kelvin: 2700 }, true),
    step("4.2 Neutral white (4000K)", Request::ColorTemp { kelvin: 4000 }, true),
    step("4.3 Cool white (6500K)", Request::ColorTemp { kelvin: 6500 }, true),
];

const COLOR_STEPS: &[Step] = &[
    step(
        "5.1 Red",
        Request::Color {
            hue: 0,
            saturation: 100,
        },
        true,
    ),
    step(
        "5.2 Green",
        Request::Color {
            hue: 120,
            saturation: 100,
        },
        true,
    ),
    step(
        "5.3 Blue",
        Request::Color {
            hue: 240,
            saturation: 100,
        },
        true,
    ),
];

async fn run_step<W: Write>(
    device: &dyn SmartDevice,
    out: &mut W,
    label: &str,
    request: Request,
) -> Result<ActionResult, AppError> {
    writeln!(out, "\n{}:", label)?;
    let result = match Action::try_from(request) {
        Ok(action) => dispatch::execute(device, action).await,
        Err(e) => ActionResult::Failure(e),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&result.to_json())?)?;
    Ok(result)
}

async fn run_steps<W: Write>(
    device: &dyn SmartDevice,
    prompter: &mut dyn Prompter,
    out: &mut W,
    steps: &[Step],
    results: &mut Vec<ActionResult>,
) -> Result<(), AppError> {
    for step in steps {
        results.push(run_step(device, out, step.label, step.request).await?);
        if step.pause {
            prompter.pause()?;
        }
    }
    Ok(())
}

/// Run the whole sequence on one connected bulb. Step failures are printed
/// and the demo carries on; only prompt or output errors abort it.
pub async fn run<W: Write>(
    device: &dyn SmartDevice,
    prompter: &mut dyn Prompter,
    out: &mut W,
) -> Result<Vec<ActionResult>, AppError> {
    let mut results = Vec::new();
    writeln!(out, "=== Tapo bulb interactive demo ===")?;

    results.push(run_step(device, out, "1. Initial status", Request::Status).await?);
    run_steps(device, prompter, out, WHITE_STEPS, &mut results).await?;

    writeln!(out, "\n5. Color (color bulbs only; white bulbs accept but ignore it)")?;
    if prompter.confirm("  Is this a color-capable bulb?")? {
        run_steps(device, prompter, out, COLOR_STEPS, &mut results).await?;
    }

    results.push(run_step(device, out, "6. Final status", Request::Status).await?);
    results.push(run_step(device, out, "7. Turn off", Request::Off).await?);

    writeln!(out, "\n=== Demo complete ===")?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mock::MockDevice;
    use serde_json::json;

    struct Scripted {
        color: bool,
        pauses: usize,
    }

    impl Prompter for Scripted {
        fn pause(&mut self) -> Result<(), AppError> {
            self.pauses += 1;
            Ok(())
        }

        fn confirm(&mut self, _prompt: &str) -> Result<bool, AppError> {
            Ok(self.color)
        }
    }

    #[tokio::test]
    async fn test_white_bulb_sequence() {
        let device = MockDevice::bulb(json!({"device_on": false, "model": "L510"}));
        let mut prompter = Scripted {
            color: false,
            pauses: 0,
        };
        let mut out = Vec::new();

        let results = run(&device, &mut prompter, &mut out).await.unwrap();

        assert_eq!(
            device.calls(),
            vec![
                "get_device_info",
                "turn_on",
                "set_brightness(25)",
                "set_brightness(100)",
                "set_color_temp(2700)",
                "set_color_temp(4000)",
                "set_color_temp(6500)",
                "get_device_info",
                "turn_off",
            ]
        );
        assert_eq!(prompter.pauses, 5);
        assert!(results.iter().all(|r| !r.is_failure()));

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Initial status"));
        assert!(printed.contains("\"setColorTemp\""));
        assert!(printed.ends_with("=== Demo complete ===\n"));
    }

    #[tokio::test]
    async fn test_color_bulb_sequence_includes_colors() {
        let device = MockDevice::bulb(json!({"device_on": true}));
        let mut prompter = Scripted {
            color: true,
            pauses: 0,
        };
        let mut out = Vec::new();

        run(&device, &mut prompter, &mut out).await.unwrap();

        let calls = device.calls();
        assert!(calls.contains(&"set_color(0, 100)".to_string()));
        assert!(calls.contains(&"set_color(120, 100)".to_string()));
        assert!(calls.contains(&"set_color(240, 100)".to_string()));
        assert_eq!(calls.last().map(String::as_str), Some("turn_off"));
        assert_eq!(prompter.pauses, 8);
    }

    #[tokio::test]
    async fn test_failing_steps_do_not_abort() {
        let device = MockDevice::bulb(json!({})).failing("bulb unreachable");
        let mut prompter = Scripted {
            color: false,
            pauses: 0,
        };
        let mut out = Vec::new();

        let results = run(&device, &mut prompter, &mut out).await.unwrap();
        assert_eq!(results.len(), 9);
        assert!(results.iter().all(|r| r.is_failure()));
    }
}
