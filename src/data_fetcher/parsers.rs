//! Parsers turning validated upstream JSON into typed domain records.
//!
//! Each entry point validates before it extracts, and an invalid node drops
//! only its own subtree: one broken tournament, bracket, match or game never
//! discards its siblings. Nothing downstream of this module touches raw
//! `serde_json::Value` again.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::data_fetcher::models::{GameInfo, GameStats, MatchInfo, TeamInfo, TeamStats};
use crate::data_fetcher::validation::{
    validate_bracket, validate_game, validate_game_stats, validate_league, validate_match,
    validate_match_details, validate_tournament,
};
use crate::report::RunReport;

/// Enrichment payload extracted from a match details document for one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameDetails {
    pub game_hash: String,
    pub teams: Vec<TeamInfo>,
    pub videos: BTreeMap<String, String>,
}

/// Extracts all resolved matches from a league document
/// (`{league_api_base}?slug={slug}`), keyed by match identifier.
///
/// Walks tournaments, brackets and matches top-down, validating each level.
/// Invalid nodes and unresolved matches are reported and skipped; every
/// surviving match carries one [`GameInfo`] per game that passed validation,
/// populated with only the fields the league listing knows
/// (`id`/`gameId`/`gameRealm`).
pub fn matches_from_league(doc: &Value, report: &mut RunReport) -> BTreeMap<String, MatchInfo> {
    let mut matches = BTreeMap::new();

    let league_check = validate_league(doc);
    if !league_check.is_valid() {
        report.error(format!(
            "Dropping invalid league: {}",
            league_check.describe()
        ));
        return matches;
    }

    // Presence and types below are guaranteed by the validators; the
    // unwrap_or fallbacks are unreachable but keep this module panic-free.
    let tournaments = doc["highlanderTournaments"].as_array();
    for tournament in tournaments.into_iter().flatten() {
        let tournament_check = validate_tournament(tournament);
        if !tournament_check.is_valid() {
            report.error(format!(
                "Dropping invalid tournament: {}",
                tournament_check.describe()
            ));
            continue;
        }
        let tournament_id = tournament["id"].as_str().unwrap_or_default();

        let brackets = tournament["brackets"].as_object();
        for bracket in brackets.into_iter().flat_map(|map| map.values()) {
            let bracket_check = validate_bracket(bracket);
            if !bracket_check.is_valid() {
                report.error(format!(
                    "Dropping invalid bracket: {}",
                    bracket_check.describe()
                ));
                continue;
            }

            let bracket_matches = bracket["matches"].as_object();
            for m in bracket_matches.into_iter().flat_map(|map| map.values()) {
                let match_check = validate_match(m);
                if !match_check.is_valid() {
                    report.error(format!(
                        "Dropping invalid match: {}",
                        match_check.describe()
                    ));
                    continue;
                }

                let match_id = m["id"].as_str().unwrap_or_default().to_string();
                let state = m["state"].as_str().unwrap_or_default();
                if state != "resolved" {
                    // Only finished matches carry complete game data.
                    report.info(format!(
                        "Dropping unfinished match {match_id} (state '{state}')"
                    ));
                    continue;
                }

                let mut games = BTreeMap::new();
                for game in m["games"].as_object().into_iter().flat_map(|map| map.values()) {
                    let game_check = validate_game(game);
                    if !game_check.is_valid() {
                        report.error(format!(
                            "Dropping invalid game in match {match_id}: {}",
                            game_check.describe()
                        ));
                        continue;
                    }
                    let game_id = game["id"].as_str().unwrap_or_default().to_string();
                    games.insert(
                        game_id.clone(),
                        GameInfo::from_league_listing(
                            game_id,
                            game["gameId"].as_str().unwrap_or_default().to_string(),
                            game["gameRealm"].as_str().unwrap_or_default().to_string(),
                        ),
                    );
                }

                matches.insert(
                    match_id.clone(),
                    MatchInfo {
                        id: match_id,
                        tournament_id: tournament_id.to_string(),
                        timestamp: m["standings"]["timestamp"].as_i64().unwrap_or_default(),
                        games,
                    },
                );
            }
        }
    }

    matches
}

/// Extracts per-game enrichment data from a match details document
/// (`{match_details_api_base}?tournamentId=..&matchId=..`), keyed by game
/// identifier.
///
/// Returns `None` when the document fails validation so the caller can leave
/// the affected match unenriched rather than emptying it. The two-team
/// roster is identical for every game of the match. Videos referencing a
/// game absent from `gameIdMappings` are reported and discarded.
pub fn games_from_match_details(
    doc: &Value,
    report: &mut RunReport,
) -> Option<BTreeMap<String, GameDetails>> {
    let details_check = validate_match_details(doc);
    if !details_check.is_valid() {
        report.error(format!(
            "Dropping invalid match details: {}",
            details_check.describe()
        ));
        return None;
    }

    // The roster is shared by every game of the match.
    let teams: Vec<TeamInfo> = doc["teams"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|team| TeamInfo {
            id: team["id"].as_i64().unwrap_or_default(),
            acronym: team["acronym"].as_str().unwrap_or_default().to_string(),
            name: team["name"].as_str().unwrap_or_default().to_string(),
            logo_url: team["logoUrl"].as_str().unwrap_or_default().to_string(),
            thumbnail: None,
        })
        .collect();

    let mut games: BTreeMap<String, GameDetails> = BTreeMap::new();
    for mapping in doc["gameIdMappings"].as_array().into_iter().flatten() {
        games.insert(
            mapping["id"].as_str().unwrap_or_default().to_string(),
            GameDetails {
                game_hash: mapping["gameHash"].as_str().unwrap_or_default().to_string(),
                teams: teams.clone(),
                videos: BTreeMap::new(),
            },
        );
    }

    for video in doc["videos"].as_array().into_iter().flatten() {
        let game_id = video["game"].as_str().unwrap_or_default();
        let locale = video["locale"].as_str().unwrap_or_default().to_string();
        let source = video["source"].as_str().unwrap_or_default().to_string();
        match games.get_mut(game_id) {
            Some(game) => {
                game.videos.insert(locale, source);
            }
            None => {
                report.error(format!(
                    "Found video for game {game_id} missing from gameIdMappings (locale '{locale}')"
                ));
            }
        }
    }

    Some(games)
}

/// Reads one numeric stat field, saturating at `u32::MAX` instead of
/// truncating so an absurd upstream value shows up as an absurd total, not a
/// small one. Non-integer numbers count as zero.
fn stat_value(stats: &Value, field: &str) -> u32 {
    stats[field]
        .as_u64()
        .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Extracts aggregate team stats from a game stats document
/// (`{game_stats_api_base}/{realm}/{gameId}?gameHash=..`).
///
/// Participants are grouped by first-seen `teamId` and their kills, deaths,
/// assists and gold summed per team. The resulting order follows participant
/// order, not the match details roster order; the two are aligned
/// positionally on a best-effort basis only, and enrichment later shuffles
/// the pair anyway to keep the winner unguessable from position.
pub fn game_stats_from_response(doc: &Value, report: &mut RunReport) -> Option<GameStats> {
    let stats_check = validate_game_stats(doc);
    if !stats_check.is_valid() {
        report.error(format!(
            "Dropping invalid game stats: {}",
            stats_check.describe()
        ));
        return None;
    }

    // Insertion-ordered grouping by teamId.
    let mut team_order: Vec<i64> = Vec::new();
    let mut totals: BTreeMap<i64, TeamStats> = BTreeMap::new();

    for participant in doc["participants"].as_array().into_iter().flatten() {
        let team_id = participant["teamId"].as_i64().unwrap_or_default();
        let entry = totals.entry(team_id).or_insert_with(|| {
            team_order.push(team_id);
            TeamStats {
                kills: 0,
                deaths: 0,
                assists: 0,
                gold: 0,
            }
        });
        let stats = &participant["stats"];
        entry.kills = entry.kills.saturating_add(stat_value(stats, "kills"));
        entry.deaths = entry.deaths.saturating_add(stat_value(stats, "deaths"));
        entry.assists = entry.assists.saturating_add(stat_value(stats, "assists"));
        entry.gold = entry.gold.saturating_add(stat_value(stats, "goldEarned"));
    }

    Some(GameStats {
        start_time: doc["gameCreation"].as_i64().unwrap_or_default(),
        duration_seconds: doc["gameDuration"].as_i64().unwrap_or_default(),
        team_stats: team_order
            .into_iter()
            .filter_map(|team_id| totals.remove(&team_id))
            .collect(),
    })
}
