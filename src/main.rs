use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

use wifi_env_header::constants::{OUTPUT_PATH, VERSION};
use wifi_env_header::{config, generate, Error, Precedence};

fn init_logger() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), Error> {
    let config = config::load_from_current_dir(Precedence::Process)?;
    generate(&config, Path::new(OUTPUT_PATH))
}

fn main() -> ExitCode {
    init_logger();
    log::debug!("wifi-env-header v{}", VERSION);

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
