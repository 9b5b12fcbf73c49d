use program_copier::config::app_config::AppConfig;
use program_copier::ports::command_handler::CommandHandler;
use program_copier::prettyprint::PrettyFormatter;
use std::env;
use std::process::ExitCode;
use tracing::{error, info, instrument};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

mod cli_adapter;
mod service_factory;

use cli_adapter::CliAdapter;
use service_factory::ServiceFactory;

const LOG_FILE: &str = "program_copier.log";

// Every remote call is awaited before the next one starts; one thread is all it takes.
#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> ExitCode {
    if let Err(e) = setup_tracing() {
        eprintln!("Failed to set up logging: {}", e);
        return ExitCode::FAILURE;
    }
    setup_panic_hook();

    let args: Vec<String> = env::args().collect();

    info!("Starting program-copier");

    let command = match CliAdapter::parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(report) => {
            error!("[CONFIG ERROR] {:?}", report);
            return ExitCode::FAILURE;
        }
    };

    let service = match ServiceFactory::create(&config).await {
        Ok(service) => service,
        Err(report) => {
            error!("Google Sheets authentication failed: {:?}", report);
            return ExitCode::FAILURE;
        }
    };

    let cli_adapter = CliAdapter::new(service, &*config.program.name);

    match cli_adapter.handle(command).await {
        Ok(output) => {
            println!("{}", output);
            info!("Command completed successfully");
            ExitCode::SUCCESS
        }
        Err(report) => {
            error!("Command failed: {:?}", report);
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let indicatif_layer = IndicatifLayer::new();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(indicatif_layer.get_stderr_writer());

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::fs::File::create(LOG_FILE)?)
        .with_ansi(false);

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("program_copier", tracing::Level::DEBUG)
                .with_target("yup_oauth2", tracing::Level::INFO),
        )
        .with(indicatif_layer)
        .with(log_file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
