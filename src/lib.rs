//! Esports VOD List Generator Library
//!
//! This library fetches League of Legends esports match schedules, reconciles
//! them with a locally cached set of recent matches, enriches new matches
//! with per-game statistics and produces a chronologically ordered game list
//! suitable for a spoiler-free VOD viewer.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use vodlist::config::Config;
//! use vodlist::data_fetcher::api::create_http_client_with_timeout;
//! use vodlist::data_fetcher::generate_game_list;
//! use vodlist::error::AppError;
//! use vodlist::report::RunReport;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
//!     let mut report = RunReport::new();
//!     let mut rng = SmallRng::seed_from_u64(42);
//!
//!     let games = generate_game_list(&client, &config, &mut report, &mut rng).await?;
//!     println!("{} games collected", games.len());
//!     print!("{}", report.render());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod logging;
pub mod report;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::generate_game_list;
pub use data_fetcher::models::{GameInfo, GameStats, MatchInfo, TeamInfo, TeamStats};
pub use error::AppError;
pub use report::RunReport;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
