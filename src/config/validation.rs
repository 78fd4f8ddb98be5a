use crate::config::Config;
use crate::error::AppError;

/// Validates the configuration settings.
///
/// Rules:
/// - at least one league slug, none of them empty
/// - retention window must be positive
/// - all API bases must be http(s) URLs
/// - the game stats base must use https, because the stats endpoint only
///   answers over encrypted transport
/// - cache and output paths must not be empty
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.league_slugs.is_empty() {
        return Err(AppError::config_error("At least one league slug is required"));
    }
    if config.league_slugs.iter().any(|slug| slug.trim().is_empty()) {
        return Err(AppError::config_error("League slugs cannot be empty"));
    }

    if config.retention_days <= 0 {
        return Err(AppError::config_error(
            "Retention window must be a positive number of days",
        ));
    }

    for (name, base) in [
        ("league_api_base", &config.league_api_base),
        ("match_details_api_base", &config.match_details_api_base),
        ("game_stats_api_base", &config.game_stats_api_base),
    ] {
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(AppError::config_error(format!(
                "{name} must be an http(s) URL, got '{base}'"
            )));
        }
    }

    if !config.game_stats_api_base.starts_with("https://") {
        return Err(AppError::config_error(
            "game_stats_api_base must use https; the stats endpoint rejects plain http",
        ));
    }

    if config.cache_file_path.is_empty() {
        return Err(AppError::config_error("Cache file path cannot be empty"));
    }
    if config.output_file_path.is_empty() {
        return Err(AppError::config_error("Output file path cannot be empty"));
    }

    Ok(())
}
