// src/main.rs
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::path::Path;
use vodlist::cli::Args;
use vodlist::config::{self, Config};
use vodlist::data_fetcher::api::create_http_client_with_timeout;
use vodlist::data_fetcher::generate_game_list;
use vodlist::data_fetcher::models::GameInfo;
use vodlist::error::AppError;
use vodlist::logging;
use vodlist::report::RunReport;

/// Writes the assembled game list as pretty-printed JSON, creating parent
/// directories as needed. A failure here is fatal: a run that computed a
/// game list but could not deliver it has not done its job.
async fn write_output(path: &str, games: &[GameInfo]) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(games)
        .map_err(|e| AppError::output_write(path, e.to_string()))?;
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::output_write(path, e.to_string()))?;
    }
    tokio::fs::write(path, json)
        .await
        .map_err(|e| AppError::output_write(path, e.to_string()))?;
    Ok(())
}

fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if !args.leagues.is_empty() {
        config.league_slugs = args.leagues.clone();
    }
    if let Some(days) = args.retention_days {
        config.retention_days = days;
    }
    if let Some(path) = &args.cache_file {
        config.cache_file_path = path.clone();
    }
    if let Some(path) = &args.output {
        config.output_file_path = path.clone();
    }
    if let Some(path) = &args.log_file {
        config.log_file_path = Some(path.clone());
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Handle version flag first
    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load config first to fail early if there's an issue
    let mut config = Config::load().await?;
    apply_cli_overrides(&mut config, &args);
    config::validate_config(&config)?;

    if args.list_config {
        println!("{}", config.display());
        return Ok(());
    }

    let (log_file_path, _guard) = logging::setup_logging(&args, &config).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
    let mut report = RunReport::new();
    let mut rng = SmallRng::from_os_rng();

    match generate_game_list(&client, &config, &mut report, &mut rng).await {
        Ok(games) => {
            if let Err(e) = write_output(&config.output_file_path, &games).await {
                report.error(format!("{e}"));
                print!("{}", report.render());
                return Err(e);
            }
            report.info(format!(
                "Wrote {} games to {}",
                games.len(),
                config.output_file_path
            ));
            print!("{}", report.render());
            Ok(())
        }
        Err(e) => {
            // Dump the partial report so the failure context is not lost
            // inside the log file.
            report.error(format!("{e}"));
            print!("{}", report.render());
            Err(e)
        }
    }
}
