pub mod cli;
pub mod config;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod web;

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::bulb::BulbCli;
use crate::cli::output::print_result;
use crate::cli::plug::PlugCli;
use crate::cli::web::WebCli;
use crate::config::{DeviceKind, RuntimeConfig};
use crate::device::tapo::TapoConnector;
use crate::device::Connector;
use crate::error::AppError;
use crate::models::action::Request;
use crate::models::result::ActionResult;

/// Log to stderr. `RUST_LOG` wins over the default level.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Render a result and turn it into the process exit code.
fn finish(result: &ActionResult, config: &RuntimeConfig) -> i32 {
    print_result(result, config.output_mode);
    result.exit_code()
}

/// Validate, then resolve configuration, then connect and run. Validation
/// comes first so bad parameters are reported even without a configured
/// device.
async fn run_request(
    request: Request,
    kind: DeviceKind,
    device_args: &cli::DeviceArgs,
    config: &RuntimeConfig,
) -> i32 {
    let action = match dispatch::validate(request) {
        Ok(action) => action,
        Err(result) => return finish(&result, config),
    };

    let device_config = match device_args.resolve(kind) {
        Ok(device_config) => device_config,
        Err(err) => {
            tracing::error!(kind = err.error_type(), "{}", err);
            return finish(&ActionResult::Failure(err), config);
        }
    };

    let connector = TapoConnector::new(kind);
    let result = dispatch::run_action(&connector, &device_config, action).await;
    finish(&result, config)
}

pub async fn run_plug(cli_args: PlugCli) -> i32 {
    let config = cli_args.output.runtime();
    init_tracing(log_level(config.verbose));

    run_request(
        cli_args.action.into(),
        DeviceKind::Plug,
        &cli_args.device,
        &config,
    )
    .await
}

pub async fn run_bulb(cli_args: BulbCli) -> i32 {
    let config = cli_args.output.runtime();
    init_tracing(log_level(config.verbose));

    match cli_args.command {
        Some(command) => {
            run_request(command.into(), DeviceKind::Bulb, &cli_args.device, &config).await
        }
        None => run_demo(&cli_args.device, &config).await,
    }
}

async fn run_demo(device_args: &cli::DeviceArgs, config: &RuntimeConfig) -> i32 {
    let device_config = match device_args.resolve(DeviceKind::Bulb) {
        Ok(device_config) => device_config,
        Err(err) => {
            tracing::error!(kind = err.error_type(), "{}", err);
            return finish(&ActionResult::Failure(err), config);
        }
    };

    println!("Connecting to bulb at {}...", device_config.address);
    let device = match TapoConnector::new(DeviceKind::Bulb)
        .connect(&device_config)
        .await
    {
        Ok(device) => device,
        Err(err) => {
            tracing::error!(kind = err.error_type(), "{}", err);
            return finish(&ActionResult::Failure(err), config);
        }
    };

    let mut prompter = cli::demo::TerminalPrompter;
    let mut stdout = std::io::stdout();
    match cli::demo::run(device.as_ref(), &mut prompter, &mut stdout).await {
        Ok(_) => 0,
        Err(err) => {
            tracing::error!(kind = err.error_type(), "{}", err);
            err.exit_code()
        }
    }
}

pub async fn run_web(cli_args: WebCli) -> i32 {
    init_tracing(if cli_args.verbose { "debug" } else { "info" });

    let device_config = match cli_args.device.resolve(DeviceKind::Plug) {
        Ok(device_config) => device_config,
        Err(err) => {
            tracing::error!(kind = err.error_type(), "{}", err);
            return err.exit_code();
        }
    };

    let state = Arc::new(web::AppState {
        connector: Arc::new(TapoConnector::new(DeviceKind::Plug)),
        config: device_config,
    });
    let app = web::router(state);

    let addr = cli_args.listen_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind {}: {}", addr, err);
            return AppError::from(err).exit_code();
        }
    };

    tracing::info!("listening on http://{}", addr);
    tracing::info!("endpoints: POST /turnOn, POST /turnOff, GET /status");

    match axum::serve(listener, app).await {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("server error: {}", err);
            1
        }
    }
}
