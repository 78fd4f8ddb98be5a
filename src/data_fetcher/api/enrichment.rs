//! Detail and stats enrichment for uncached matches.
//!
//! For every match that is new this run, fetch its match details (game
//! hashes, rosters, VOD links), then fetch per-game stats for each surviving
//! game. Failures are isolated: a failed detail fetch leaves that one match
//! unenriched, a failed stats fetch drops that one game, and neither stops
//! the batch.
//!
//! Matches are processed as independent futures joined at the end, so one
//! match's stats fetches overlap another match's detail fetch. Each future
//! works on an owned [`MatchInfo`] and returns it together with its own
//! report fragment; nothing is aliased or mutated across matches.

use futures::future::join_all;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

use crate::config::Config;
use crate::data_fetcher::api::fetch_utils::fetch;
use crate::data_fetcher::api::urls::{build_game_stats_url, build_match_details_url};
use crate::data_fetcher::cache::MatchMap;
use crate::data_fetcher::models::MatchInfo;
use crate::data_fetcher::parsers::{game_stats_from_response, games_from_match_details};
use crate::report::RunReport;

/// Enriches every match in `matches` in place (by replacement), merging the
/// per-match log fragments back into `report`.
///
/// The RNG drives the team-stats order shuffle; passing a seeded RNG makes
/// a run reproducible.
#[instrument(skip_all, fields(matches = matches.len()))]
pub async fn enrich_matches(
    client: &Client,
    config: &Config,
    matches: &mut MatchMap,
    report: &mut RunReport,
    rng: &mut SmallRng,
) {
    // Each future gets its own derived RNG so the join order cannot change
    // which games are swapped for a given seed.
    let work: Vec<_> = std::mem::take(matches)
        .into_values()
        .map(|m| {
            let seed: u64 = rng.random();
            enrich_single_match(client, config, m, SmallRng::seed_from_u64(seed))
        })
        .collect();

    for (enriched, fragment) in join_all(work).await {
        report.merge(fragment);
        matches.insert(enriched.id.clone(), enriched);
    }
}

/// Fetches details and stats for one match, returning the enriched match and
/// the log entries produced along the way.
async fn enrich_single_match(
    client: &Client,
    config: &Config,
    mut m: MatchInfo,
    mut rng: SmallRng,
) -> (MatchInfo, RunReport) {
    let mut report = RunReport::new();

    let details_url =
        build_match_details_url(&config.match_details_api_base, &m.tournament_id, &m.id);
    let details = match fetch::<Value>(client, &details_url).await {
        Ok(doc) => games_from_match_details(&doc, &mut report),
        Err(e) => {
            report.error(format!(
                "Failed to fetch match details for match {}: {e}",
                m.id
            ));
            None
        }
    };

    // Without details the games stay unenriched; the next run will retry
    // because the match never becomes cached as complete data anyway.
    let Some(details) = details else {
        return (m, report);
    };

    // Drop games the details endpoint does not know about, attach
    // hash/roster/videos to the rest.
    m.games.retain(|game_id, game| match details.get(game_id) {
        Some(extra) => {
            game.game_hash = Some(extra.game_hash.clone());
            game.teams = extra.teams.clone();
            game.videos = extra.videos.clone();
            true
        }
        None => {
            report.error(format!(
                "Dropping game {game_id} of match {} missing from match details",
                m.id
            ));
            false
        }
    });

    // Stats fetches are sequenced after the detail fetch by necessity: the
    // game hash is only known now.
    let mut without_stats = Vec::new();
    for game in m.games.values_mut() {
        let Some(game_hash) = game.game_hash.as_deref() else {
            continue;
        };
        let stats_url = build_game_stats_url(
            &config.game_stats_api_base,
            &game.game_realm,
            &game.game_id,
            game_hash,
        );
        let stats = match fetch::<Value>(client, &stats_url).await {
            Ok(doc) => game_stats_from_response(&doc, &mut report),
            Err(e) => {
                report.error(format!(
                    "Failed to fetch stats for game {}: {e}",
                    game.id
                ));
                None
            }
        };
        match stats {
            Some(mut stats) => {
                // Swap the stats pair half the time so the left/right
                // position never gives away the winner before the VOD.
                // The roster order is left alone.
                if stats.team_stats.len() == 2 && rng.random_bool(0.5) {
                    stats.team_stats.swap(0, 1);
                }
                game.stats = Some(stats);
            }
            None => {
                // A game we cannot get stats for is unusable downstream.
                report.error(format!(
                    "Dropping game {} of match {}: no usable stats",
                    game.id, m.id
                ));
                without_stats.push(game.id.clone());
            }
        }
    }
    for game_id in without_stats {
        m.games.remove(&game_id);
    }

    (m, report)
}
