use clap::{Parser, ValueEnum};

use super::{DeviceArgs, OutputArgs};
use crate::models::action::Request;

#[derive(Parser)]
#[command(name = "tapo-plug", version, about = "Control a Tapo smart plug")]
pub struct PlugCli {
    /// Action to perform
    #[arg(value_enum)]
    pub action: PlugAction,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlugAction {
    /// Turn the plug on
    On,
    /// Turn the plug off
    Off,
    /// Show device status
    Status,
    /// Switch to the opposite power state
    Toggle,
}

impl From<PlugAction> for Request {
    fn from(action: PlugAction) -> Self {
        match action {
            PlugAction::On => Request::On,
            PlugAction::Off => Request::Off,
            PlugAction::Status => Request::Status,
            PlugAction::Toggle => Request::Toggle,
        }
    }
}
