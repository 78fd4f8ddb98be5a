//! Fetching, validation, parsing, caching and assembly of match data.

pub mod api;
pub mod cache;
pub mod game_list;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod validation;

pub use game_list::assemble;
pub use models::{GameInfo, GameStats, MatchInfo, TeamInfo, TeamStats};
pub use pipeline::generate_game_list;
