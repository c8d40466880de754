use clap::{Parser, Subcommand};

use super::{DeviceArgs, OutputArgs};
use crate::models::action::Request;

#[derive(Parser)]
#[command(
    name = "tapo-bulb",
    version,
    about = "Control a Tapo smart bulb (runs an interactive demo when no command is given)"
)]
pub struct BulbCli {
    #[command(subcommand)]
    pub command: Option<BulbCommand>,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulbCommand {
    /// Show bulb status
    Status,

    /// Turn the bulb on
    On,

    /// Turn the bulb off
    Off,

    /// Set brightness (1-100)
    Brightness {
        /// Brightness level in percent
        #[arg(allow_negative_numbers = true)]
        level: i64,
    },

    /// Set color temperature (2500-6500K)
    #[command(name = "colortemp")]
    ColorTemp {
        /// Color temperature in Kelvin
        #[arg(allow_negative_numbers = true)]
        temp: i64,
    },

    /// Set color by hue and saturation (color bulbs only)
    Color {
        /// Hue (0-360)
        #[arg(allow_negative_numbers = true)]
        hue: i64,
        /// Saturation (0-100)
        #[arg(allow_negative_numbers = true)]
        saturation: i64,
    },
}

impl From<BulbCommand> for Request {
    fn from(command: BulbCommand) -> Self {
        match command {
            BulbCommand::Status => Request::Status,
            BulbCommand::On => Request::On,
            BulbCommand::Off => Request::Off,
            BulbCommand::Brightness { level } => Request::Brightness { level },
            BulbCommand::ColorTemp { temp } => Request::ColorTemp { kelvin: temp },
            BulbCommand::Color { hue, saturation } => Request::Color { hue, saturation },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_demo() {
        let cli = BulbCli::try_parse_from(["tapo-bulb"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_numeric_subcommands() {
        let cli = BulbCli::try_parse_from(["tapo-bulb", "colortemp", "4000"]).unwrap();
        assert_eq!(
            Request::from(cli.command.unwrap()),
            Request::ColorTemp { kelvin: 4000 }
        );

        let cli = BulbCli::try_parse_from(["tapo-bulb", "color", "240", "100"]).unwrap();
        assert_eq!(
            Request::from(cli.command.unwrap()),
            Request::Color {
                hue: 240,
                saturation: 100
            }
        );
    }

    #[test]
    fn test_out_of_range_values_reach_validation() {
        let cli = BulbCli::try_parse_from(["tapo-bulb", "brightness", "150"]).unwrap();
        assert_eq!(
            cli.command,
            Some(BulbCommand::Brightness { level: 150 })
        );
        let cli = BulbCli::try_parse_from(["tapo-bulb", "brightness", "-5"]).unwrap();
        assert_eq!(cli.command, Some(BulbCommand::Brightness { level: -5 }));
    }

    #[test]
    fn test_missing_or_non_numeric_arguments_rejected() {
        assert!(BulbCli::try_parse_from(["tapo-bulb", "brightness"]).is_err());
        assert!(BulbCli::try_parse_from(["tapo-bulb", "brightness", "bright"]).is_err());
        assert!(BulbCli::try_parse_from(["tapo-bulb", "color", "120"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            BulbCli::try_parse_from(["tapo-bulb", "on", "-c", "--address", "192.168.0.20"])
                .unwrap();
        assert!(cli.output.compact);
        assert_eq!(cli.device.address.as_deref(), Some("192.168.0.20"));
    }
}
