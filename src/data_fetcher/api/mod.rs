//! HTTP access to the three upstream endpoints and the enrichment pipeline.

pub mod enrichment;
pub(crate) mod fetch_utils;
pub mod http_client;
pub mod urls;

pub use enrichment::enrich_matches;
pub use http_client::create_http_client_with_timeout;
pub use urls::{build_game_stats_url, build_league_url, build_match_details_url};
