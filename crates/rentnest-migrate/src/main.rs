use std::process::ExitCode;

use tracing::{error, info};

use rentnest_migrate::Config;

fn main() -> ExitCode {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rentnest_migrate=info,rentnest_db=info".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match rentnest_migrate::run(&config) {
        Ok(reports) => {
            let updated: usize = reports.iter().map(|r| r.updated).sum();
            if reports.iter().all(|r| r.is_success()) {
                info!("All migrations complete, {} records updated", updated);
                ExitCode::SUCCESS
            } else {
                let failed: usize = reports.iter().map(|r| r.failures.len()).sum();
                error!(
                    "Migrations finished with {} failed updates ({} records updated); rerun to retry",
                    failed, updated
                );
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            for report in e.completed() {
                info!("Completed before abort: {}", report);
            }
            error!("Migration aborted, no records written by the failing step: {:#}", anyhow::Error::from(e));
            ExitCode::FAILURE
        }
    }
}
