//! Flattening the reconciled match map into the final ordered game list.

use crate::data_fetcher::cache::MatchMap;
use crate::data_fetcher::models::GameInfo;
use crate::report::RunReport;

/// Flattens all games of all matches into one list sorted by most recent
/// start time first.
///
/// Enrichment drops games it cannot get stats for, so in a fully successful
/// run every game here carries stats. A match whose detail fetch failed can
/// still leave stat-less games in the cache; those have no defined position
/// in the list, so they are excluded and each exclusion is recorded as an
/// error rather than silently sorted.
pub fn assemble(matches: &MatchMap, report: &mut RunReport) -> Vec<GameInfo> {
    let mut games: Vec<GameInfo> = Vec::new();
    let mut skipped = 0usize;

    for m in matches.values() {
        for game in m.games.values() {
            if game.stats.is_some() {
                games.push(game.clone());
            } else {
                skipped += 1;
                report.error(format!(
                    "Excluding game {} of match {} from the game list: no stats",
                    game.id, m.id
                ));
            }
        }
    }

    report.info(format!(
        "Collected {} games from {} matches{}",
        games.len(),
        matches.len(),
        if skipped > 0 {
            format!(" ({skipped} excluded without stats)")
        } else {
            String::new()
        }
    ));

    games.sort_by(|a, b| {
        let a_start = a.stats.as_ref().map(|s| s.start_time).unwrap_or_default();
        let b_start = b.stats.as_ref().map(|s| s.start_time).unwrap_or_default();
        b_start.cmp(&a_start)
    });

    games
}
