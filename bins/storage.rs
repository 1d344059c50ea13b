use std::process::ExitCode;

use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use models::ObjectStore;
use service::FileStorage;
use tracing::{error, info};

/// Crates whose events are shown at `info` when `RUST_LOG` is unset.
const LOG_CRATES: &[&str] = &[env!("CARGO_CRATE_NAME"), service::CRATE_NAME, common::CRATE_NAME];

fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => common::utils::logging::init_logging_default(LOG_CRATES),
        LogFormat::Json => common::utils::logging::init_logging_json(LOG_CRATES),
    }
    info!(service = "storage", event = "logger_init", "tracing subscriber initialized");
}

fn run(cfg: &AppConfig) -> anyhow::Result<()> {
    let storage = FileStorage::from_config(&cfg.storage)?;
    info!(
        service = "storage",
        event = "opened",
        path = %storage.path().display(),
        count = storage.len(),
        "storage file loaded"
    );
    for obj in storage.all().values() {
        println!("{}", &*obj.borrow());
    }
    Ok(())
}

fn main() -> ExitCode {
    // 提前加载 .env，使得 RUST_LOG / HBNB_FILE_PATH 等环境变量生效
    dotenv().ok();

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            init_logging(LogFormat::Compact);
            error!(service = "storage", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    init_logging(cfg.logging.format);

    match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "storage", event = "run_failed", error = %e, "storage inspection failed");
            ExitCode::FAILURE
        }
    }
}
