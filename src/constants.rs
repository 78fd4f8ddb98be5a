//! Application-wide constants and configuration defaults
//!
//! This module centralizes magic numbers and default endpoint locations so
//! they are defined in exactly one place.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Default base URL for the league listing endpoint (`?slug=` is appended)
pub const DEFAULT_LEAGUE_API_BASE: &str = "http://api.lolesports.com/api/v1/leagues";

/// Default base URL for the match details endpoint
pub const DEFAULT_MATCH_DETAILS_API_BASE: &str =
    "http://api.lolesports.com/api/v2/highlanderMatchDetails";

/// Default base URL for the per-game stats endpoint.
/// This endpoint only answers over HTTPS; config validation enforces the scheme.
pub const DEFAULT_GAME_STATS_API_BASE: &str = "https://acs.leagueoflegends.com/v1/stats/game";

/// Leagues collected when the config does not name any
pub const DEFAULT_LEAGUE_SLUGS: &[&str] = &["na-lcs", "eu-lcs"];

/// Matches older than this many days are evicted from the cache at write time
pub const DEFAULT_RETENTION_DAYS: i64 = 14;

/// File name of the persisted match cache (under the platform cache dir)
pub const CACHE_FILE_NAME: &str = "cached-matches.json";

/// File name of the assembled game list written for the renderer
pub const OUTPUT_FILE_NAME: &str = "game-list.json";

/// Retry tuning for transient HTTP failures
pub mod retry {
    /// Maximum number of retries for a single fetch
    pub const MAX_RETRIES: u32 = 3;

    /// Initial backoff before the first retry; doubles per attempt
    pub const INITIAL_BACKOFF_MS: u64 = 250;
}

/// Milliseconds in one day, for retention window arithmetic
pub const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;
