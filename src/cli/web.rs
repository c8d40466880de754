use clap::Parser;

use super::DeviceArgs;

#[derive(Parser)]
#[command(
    name = "tapo-web",
    version,
    about = "HTTP controller for a Tapo smart plug"
)]
pub struct WebCli {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// Verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub device: DeviceArgs,
}

impl WebCli {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
