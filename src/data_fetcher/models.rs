//! Domain records for matches, games, teams and per-game stats.
//!
//! Field names keep the upstream camelCase spellings on the wire so the
//! persisted cache file stays compatible with the original cached-matches
//! shape. Everything that reaches the cache file uses `BTreeMap` so the
//! serialized form is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A resolved best-of-N match, keyed in the cache by its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub id: String,
    #[serde(rename = "tournamentId")]
    pub tournament_id: String,
    /// Epoch milliseconds, taken from the match's standings data.
    pub timestamp: i64,
    pub games: BTreeMap<String, GameInfo>,
}

/// One played game within a match.
///
/// Straight out of the league listing only `id`, `gameId` and `gameRealm`
/// are known; `gameHash`, `teams` and `videos` arrive with match details and
/// `stats` with the per-game stats fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: String,
    #[serde(rename = "gameId")]
    pub game_id: String,
    #[serde(rename = "gameRealm")]
    pub game_realm: String,
    #[serde(rename = "gameHash", default, skip_serializing_if = "Option::is_none")]
    pub game_hash: Option<String>,
    /// Maps video locale to VOD URL.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub videos: BTreeMap<String, String>,
    /// Either empty (unenriched) or exactly the two sides of the match, in
    /// the order the match details endpoint reports them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<TeamInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<GameStats>,
}

impl GameInfo {
    /// A minimal game record as parsed from the league listing.
    pub fn from_league_listing(id: String, game_id: String, game_realm: String) -> Self {
        GameInfo {
            id,
            game_id,
            game_realm,
            game_hash: None,
            videos: BTreeMap::new(),
            teams: Vec::new(),
            stats: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub id: i64,
    pub acronym: String,
    pub name: String,
    #[serde(rename = "logoUrl")]
    pub logo_url: String,
    /// Filled in by the downstream thumbnailing step, never by the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ThumbnailInfo>,
}

/// Descriptor of a resized team logo, owned by the excluded thumbnail step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailInfo {
    pub file: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    /// Epoch milliseconds.
    #[serde(rename = "startTime")]
    pub start_time: i64,
    #[serde(rename = "durationSeconds")]
    pub duration_seconds: i64,
    /// Exactly two entries. Positionally aligned with `GameInfo::teams` on a
    /// best-effort basis only, and deliberately swapped with probability 1/2
    /// during enrichment so the side ordering never spoils the winner.
    #[serde(rename = "teamStats")]
    pub team_stats: Vec<TeamStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub gold: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match() -> MatchInfo {
        let game = GameInfo {
            id: "6647a2f2-0b9c-47b7-b1a8-97b3a1a3d6cb".to_string(),
            game_id: "1002440062".to_string(),
            game_realm: "TRLH3".to_string(),
            game_hash: Some("fa4e2fc1f2a93041".to_string()),
            videos: BTreeMap::from([(
                "en".to_string(),
                "https://www.youtube.com/watch?v=abc123".to_string(),
            )]),
            teams: vec![
                TeamInfo {
                    id: 1,
                    acronym: "TSM".to_string(),
                    name: "Team SoloMid".to_string(),
                    logo_url: "http://assets.example.com/tsm.png".to_string(),
                    thumbnail: None,
                },
                TeamInfo {
                    id: 2,
                    acronym: "C9".to_string(),
                    name: "Cloud9".to_string(),
                    logo_url: "http://assets.example.com/c9.png".to_string(),
                    thumbnail: None,
                },
            ],
            stats: Some(GameStats {
                start_time: 1_496_452_800_000,
                duration_seconds: 2175,
                team_stats: vec![
                    TeamStats {
                        kills: 13,
                        deaths: 7,
                        assists: 30,
                        gold: 61_000,
                    },
                    TeamStats {
                        kills: 7,
                        deaths: 13,
                        assists: 15,
                        gold: 55_000,
                    },
                ],
            }),
        };
        MatchInfo {
            id: "2bfd7d81-2cf9-4106-8ebe-a7b3465c3a62".to_string(),
            tournament_id: "ee1fd023-5cbd-49ea-9717-dca6fae9cf69".to_string(),
            timestamp: 1_496_452_800_000,
            games: BTreeMap::from([(game.id.clone(), game)]),
        }
    }

    fn sample_round_trip(m: &MatchInfo) -> MatchInfo {
        let json = serde_json::to_string(m).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_match_serializes_with_camel_case_keys() {
        let m = sample_match();
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"tournamentId\""));
        assert!(json.contains("\"gameRealm\""));
        assert!(json.contains("\"gameHash\""));
        assert!(json.contains("\"logoUrl\""));
        assert!(json.contains("\"startTime\""));
        assert!(json.contains("\"teamStats\""));
        assert!(!json.contains("\"game_realm\""));
    }

    #[test]
    fn test_match_round_trip_preserves_content() {
        let m = sample_match();
        assert_eq!(sample_round_trip(&m), m);
    }

    #[test]
    fn test_unenriched_game_omits_optional_fields() {
        let game = GameInfo::from_league_listing(
            "6647a2f2-0b9c-47b7-b1a8-97b3a1a3d6cb".to_string(),
            "1002440062".to_string(),
            "TRLH3".to_string(),
        );
        let json = serde_json::to_string(&game).unwrap();
        assert!(!json.contains("gameHash"));
        assert!(!json.contains("videos"));
        assert!(!json.contains("teams"));
        assert!(!json.contains("stats"));

        // and the omitted fields come back as defaults
        let parsed: GameInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.game_hash, None);
        assert!(parsed.videos.is_empty());
        assert!(parsed.teams.is_empty());
        assert!(parsed.stats.is_none());
    }

    #[test]
    fn test_cache_shape_compatibility() {
        // A record in the shape the original cache file used must load.
        let json = r#"{
            "id": "2bfd7d81-2cf9-4106-8ebe-a7b3465c3a62",
            "tournamentId": "ee1fd023-5cbd-49ea-9717-dca6fae9cf69",
            "timestamp": 1496452800000,
            "games": {
                "6647a2f2-0b9c-47b7-b1a8-97b3a1a3d6cb": {
                    "id": "6647a2f2-0b9c-47b7-b1a8-97b3a1a3d6cb",
                    "gameId": "1002440062",
                    "gameRealm": "TRLH3",
                    "gameHash": "fa4e2fc1f2a93041",
                    "videos": {"en": "https://www.youtube.com/watch?v=abc123"},
                    "teams": [
                        {"id": 1, "acronym": "TSM", "name": "Team SoloMid",
                         "logoUrl": "http://assets.example.com/tsm.png"},
                        {"id": 2, "acronym": "C9", "name": "Cloud9",
                         "logoUrl": "http://assets.example.com/c9.png"}
                    ],
                    "stats": {
                        "startTime": 1496452800000,
                        "durationSeconds": 2175,
                        "teamStats": [
                            {"kills": 13, "deaths": 7, "assists": 30, "gold": 61000},
                            {"kills": 7, "deaths": 13, "assists": 15, "gold": 55000}
                        ]
                    }
                }
            }
        }"#;

        let m: MatchInfo = serde_json::from_str(json).unwrap();
        assert_eq!(m.games.len(), 1);
        let game = m.games.values().next().unwrap();
        assert_eq!(game.teams.len(), 2);
        let stats = game.stats.as_ref().unwrap();
        assert_eq!(stats.team_stats.len(), 2);
        assert_eq!(stats.team_stats[0].gold, 61_000);
    }
}
