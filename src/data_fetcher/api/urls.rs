//! URL building utilities for the three upstream endpoints

/// Builds the league listing URL for a league slug.
///
/// # Example
/// ```
/// use vodlist::data_fetcher::api::build_league_url;
///
/// let url = build_league_url("http://api.example.com/api/v1/leagues", "na-lcs");
/// assert_eq!(url, "http://api.example.com/api/v1/leagues?slug=na-lcs");
/// ```
pub fn build_league_url(league_api_base: &str, slug: &str) -> String {
    format!("{league_api_base}?slug={slug}")
}

/// Builds the match details URL for a tournament/match pair.
///
/// # Example
/// ```
/// use vodlist::data_fetcher::api::build_match_details_url;
///
/// let url = build_match_details_url(
///     "http://api.example.com/api/v2/highlanderMatchDetails",
///     "ee1fd023-5cbd-49ea-9717-dca6fae9cf69",
///     "2bfd7d81-2cf9-4106-8ebe-a7b3465c3a62",
/// );
/// assert_eq!(
///     url,
///     "http://api.example.com/api/v2/highlanderMatchDetails?tournamentId=ee1fd023-5cbd-49ea-9717-dca6fae9cf69&matchId=2bfd7d81-2cf9-4106-8ebe-a7b3465c3a62"
/// );
/// ```
pub fn build_match_details_url(
    match_details_api_base: &str,
    tournament_id: &str,
    match_id: &str,
) -> String {
    format!("{match_details_api_base}?tournamentId={tournament_id}&matchId={match_id}")
}

/// Builds the per-game stats URL. The stats endpoint only answers over
/// HTTPS; config validation guarantees the base carries the right scheme.
///
/// # Example
/// ```
/// use vodlist::data_fetcher::api::build_game_stats_url;
///
/// let url = build_game_stats_url(
///     "https://stats.example.com/v1/stats/game",
///     "TRLH3",
///     "1002440062",
///     "fa4e2fc1f2a93041",
/// );
/// assert_eq!(
///     url,
///     "https://stats.example.com/v1/stats/game/TRLH3/1002440062?gameHash=fa4e2fc1f2a93041"
/// );
/// ```
pub fn build_game_stats_url(
    game_stats_api_base: &str,
    game_realm: &str,
    game_id: &str,
    game_hash: &str,
) -> String {
    format!("{game_stats_api_base}/{game_realm}/{game_id}?gameHash={game_hash}")
}
