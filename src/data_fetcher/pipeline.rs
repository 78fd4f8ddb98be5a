//! End-to-end orchestration of one pipeline run.

use chrono::Utc;
use rand::rngs::SmallRng;
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

use crate::config::Config;
use crate::constants::MILLIS_PER_DAY;
use crate::data_fetcher::api::enrichment::enrich_matches;
use crate::data_fetcher::api::fetch_utils::fetch;
use crate::data_fetcher::api::urls::build_league_url;
use crate::data_fetcher::cache::{self, MatchMap};
use crate::data_fetcher::game_list::assemble;
use crate::data_fetcher::models::GameInfo;
use crate::data_fetcher::parsers::matches_from_league;
use crate::error::AppError;
use crate::report::RunReport;

/// Runs the full pipeline: load cache, fetch and parse the configured
/// leagues, reconcile against the retention window, enrich the uncached
/// matches, persist the merged cache and assemble the ordered game list.
///
/// Per-league and per-match failures are reported and isolated; only a
/// cache write failure is fatal.
#[instrument(skip_all)]
pub async fn generate_game_list(
    client: &Client,
    config: &Config,
    report: &mut RunReport,
    rng: &mut SmallRng,
) -> Result<Vec<GameInfo>, AppError> {
    let cached = cache::load_cache(&config.cache_file_path, report).await;

    report.info(format!(
        "Fetching matches for leagues {:?}",
        config.league_slugs
    ));

    let mut fresh = MatchMap::new();
    for slug in &config.league_slugs {
        let url = build_league_url(&config.league_api_base, slug);
        match fetch::<Value>(client, &url).await {
            Ok(doc) => {
                let matches = matches_from_league(&doc, report);
                report.info(format!("League {slug}: {} resolved matches", matches.len()));
                fresh.extend(matches);
            }
            Err(e) => {
                // One unreachable league must not cost the others.
                report.error(format!("Failed to fetch league {slug}: {e}"));
            }
        }
    }

    report.info(format!("Filtering {} matches by timestamp", fresh.len()));

    let cutoff = Utc::now().timestamp_millis() - config.retention_days * MILLIS_PER_DAY;
    let recent_fresh = cache::filter_recent(fresh, cutoff);
    let recent_cached = cache::filter_recent(cached, cutoff);

    let mut uncached = cache::split_uncached(recent_fresh, &recent_cached);
    report.info(format!(
        "Getting info for {} uncached matches",
        uncached.len()
    ));

    enrich_matches(client, config, &mut uncached, report, rng).await;

    let updated = cache::merge(recent_cached, uncached);

    report.info(format!(
        "Writing {} matches to cache at {}",
        updated.len(),
        config.cache_file_path
    ));
    cache::write_cache(&config.cache_file_path, &updated).await?;

    Ok(assemble(&updated, report))
}
