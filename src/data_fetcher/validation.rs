//! Structural validation of upstream JSON documents.
//!
//! Each validator checks one document shape (league, tournament, bracket,
//! match, game, match details, game stats) and returns the list of problems
//! it found. Validators never panic and never return `Result`; callers
//! branch on [`Validation::is_valid`] and decide how much of the document to
//! drop. Checks are purely structural: required fields, primitive types,
//! identifier and URI patterns, and cardinality bounds. Unknown extra
//! properties are allowed everywhere except in the map-shaped members whose
//! keys must themselves be identifiers.

use serde_json::Value;

/// One problem found in a document: where, and what was wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub reason: String,
}

/// Outcome of validating a document.
#[derive(Debug, Default)]
pub struct Validation {
    issues: Vec<ValidationIssue>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// One-line summary of all issues, for log messages.
    pub fn describe(&self) -> String {
        self.issues
            .iter()
            .map(|issue| format!("{}: {}", issue.path, issue.reason))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn push(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.into(),
            reason: reason.into(),
        });
    }
}

/// Checks the 8-4-4-4-12 lowercase hex identifier shape
/// (e.g. `e4e64922-2172-4099-b5b7-80dca6b47159`). RFC 4122 version and
/// variant bits are not required.
pub fn is_identifier(s: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];
    let mut parts = s.split('-');
    for expected_len in GROUPS {
        match parts.next() {
            Some(part)
                if part.len() == expected_len
                    && part.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()) => {}
            _ => return false,
        }
    }
    parts.next().is_none()
}

/// Loose URI shape check, enough to reject obviously broken logo/video URLs.
fn is_uri(s: &str) -> bool {
    (s.starts_with("http://") || s.starts_with("https://")) && s.len() > 8
}

fn require_object<'a>(v: &mut Validation, value: &'a Value, path: &str) -> Option<&'a serde_json::Map<String, Value>> {
    match value.as_object() {
        Some(map) => Some(map),
        None => {
            v.push(path, "expected an object");
            None
        }
    }
}

fn require_string_field(v: &mut Validation, obj: &serde_json::Map<String, Value>, path: &str, field: &str) -> bool {
    match obj.get(field) {
        Some(Value::String(_)) => true,
        Some(_) => {
            v.push(format!("{path}.{field}"), "expected a string");
            false
        }
        None => {
            v.push(format!("{path}.{field}"), "required field is missing");
            false
        }
    }
}

fn require_number_field(v: &mut Validation, obj: &serde_json::Map<String, Value>, path: &str, field: &str) -> bool {
    match obj.get(field) {
        Some(Value::Number(_)) => true,
        Some(_) => {
            v.push(format!("{path}.{field}"), "expected a number");
            false
        }
        None => {
            v.push(format!("{path}.{field}"), "required field is missing");
            false
        }
    }
}

fn require_identifier_field(v: &mut Validation, obj: &serde_json::Map<String, Value>, path: &str, field: &str) {
    if require_string_field(v, obj, path, field) {
        let s = obj[field].as_str().unwrap_or_default();
        if !is_identifier(s) {
            v.push(
                format!("{path}.{field}"),
                format!("'{s}' does not match the identifier pattern"),
            );
        }
    }
}

fn require_uri_field(v: &mut Validation, obj: &serde_json::Map<String, Value>, path: &str, field: &str) {
    if require_string_field(v, obj, path, field) {
        let s = obj[field].as_str().unwrap_or_default();
        if !is_uri(s) {
            v.push(format!("{path}.{field}"), format!("'{s}' is not a valid URI"));
        }
    }
}

/// Checks a map-shaped member whose keys must all be identifiers and whose
/// values must all be objects.
fn require_identifier_keyed_map(
    v: &mut Validation,
    obj: &serde_json::Map<String, Value>,
    path: &str,
    field: &str,
) {
    let Some(member) = obj.get(field) else {
        v.push(format!("{path}.{field}"), "required field is missing");
        return;
    };
    let Some(map) = member.as_object() else {
        v.push(format!("{path}.{field}"), "expected an object");
        return;
    };
    for (key, value) in map {
        if !is_identifier(key) {
            v.push(
                format!("{path}.{field}"),
                format!("key '{key}' does not match the identifier pattern"),
            );
        }
        if !value.is_object() {
            v.push(format!("{path}.{field}.{key}"), "expected an object");
        }
    }
}

/// Validates a league document: must carry a non-empty
/// `highlanderTournaments` array of objects.
pub fn validate_league(doc: &Value) -> Validation {
    let mut v = Validation::default();
    let Some(obj) = require_object(&mut v, doc, "league") else {
        return v;
    };
    match obj.get("highlanderTournaments") {
        Some(Value::Array(items)) => {
            if items.is_empty() {
                v.push("league.highlanderTournaments", "expected at least 1 item");
            }
            for (i, item) in items.iter().enumerate() {
                if !item.is_object() {
                    v.push(
                        format!("league.highlanderTournaments[{i}]"),
                        "expected an object",
                    );
                }
            }
        }
        Some(_) => v.push("league.highlanderTournaments", "expected an array"),
        None => v.push("league.highlanderTournaments", "required field is missing"),
    }
    v
}

/// Validates a tournament node: identifier `id` plus a `brackets` map keyed
/// by identifiers.
pub fn validate_tournament(doc: &Value) -> Validation {
    let mut v = Validation::default();
    let Some(obj) = require_object(&mut v, doc, "tournament") else {
        return v;
    };
    require_identifier_field(&mut v, obj, "tournament", "id");
    require_identifier_keyed_map(&mut v, obj, "tournament", "brackets");
    v
}

/// Validates a bracket node: a `matches` map keyed by identifiers.
pub fn validate_bracket(doc: &Value) -> Validation {
    let mut v = Validation::default();
    let Some(obj) = require_object(&mut v, doc, "bracket") else {
        return v;
    };
    require_identifier_keyed_map(&mut v, obj, "bracket", "matches");
    v
}

/// Validates a match node: identifier `id`, identifier-keyed `games` map,
/// `standings.timestamp` number, and a string `state`.
pub fn validate_match(doc: &Value) -> Validation {
    let mut v = Validation::default();
    let Some(obj) = require_object(&mut v, doc, "match") else {
        return v;
    };
    require_identifier_field(&mut v, obj, "match", "id");
    require_identifier_keyed_map(&mut v, obj, "match", "games");
    require_string_field(&mut v, obj, "match", "state");
    match obj.get("standings") {
        Some(standings) => {
            if let Some(standings_obj) = standings.as_object() {
                require_number_field(&mut v, standings_obj, "match.standings", "timestamp");
            } else {
                v.push("match.standings", "expected an object");
            }
        }
        None => v.push("match.standings", "required field is missing"),
    }
    v
}

/// Validates a game node within a match's `games` map: identifier `id` plus
/// the `gameId`/`gameRealm` strings needed to address the stats endpoint.
pub fn validate_game(doc: &Value) -> Validation {
    let mut v = Validation::default();
    let Some(obj) = require_object(&mut v, doc, "game") else {
        return v;
    };
    require_identifier_field(&mut v, obj, "game", "id");
    require_string_field(&mut v, obj, "game", "gameId");
    require_string_field(&mut v, obj, "game", "gameRealm");
    v
}

/// Validates a match details document: at least one `gameIdMappings` entry,
/// exactly two `teams`, at least one video.
pub fn validate_match_details(doc: &Value) -> Validation {
    let mut v = Validation::default();
    let Some(obj) = require_object(&mut v, doc, "matchDetails") else {
        return v;
    };

    match obj.get("gameIdMappings") {
        Some(Value::Array(items)) => {
            if items.is_empty() {
                v.push("matchDetails.gameIdMappings", "expected at least 1 item");
            }
            for (i, item) in items.iter().enumerate() {
                let path = format!("matchDetails.gameIdMappings[{i}]");
                let Some(mapping) = item.as_object() else {
                    v.push(path, "expected an object");
                    continue;
                };
                require_identifier_field(&mut v, mapping, &path, "id");
                require_string_field(&mut v, mapping, &path, "gameHash");
            }
        }
        Some(_) => v.push("matchDetails.gameIdMappings", "expected an array"),
        None => v.push("matchDetails.gameIdMappings", "required field is missing"),
    }

    match obj.get("teams") {
        Some(Value::Array(items)) => {
            if items.len() != 2 {
                v.push(
                    "matchDetails.teams",
                    format!("expected exactly 2 teams, found {}", items.len()),
                );
            }
            for (i, item) in items.iter().enumerate() {
                let path = format!("matchDetails.teams[{i}]");
                let Some(team) = item.as_object() else {
                    v.push(path, "expected an object");
                    continue;
                };
                require_number_field(&mut v, team, &path, "id");
                require_string_field(&mut v, team, &path, "acronym");
                require_string_field(&mut v, team, &path, "name");
                require_uri_field(&mut v, team, &path, "logoUrl");
            }
        }
        Some(_) => v.push("matchDetails.teams", "expected an array"),
        None => v.push("matchDetails.teams", "required field is missing"),
    }

    match obj.get("videos") {
        Some(Value::Array(items)) => {
            if items.is_empty() {
                v.push("matchDetails.videos", "expected at least 1 item");
            }
            for (i, item) in items.iter().enumerate() {
                let path = format!("matchDetails.videos[{i}]");
                let Some(video) = item.as_object() else {
                    v.push(path, "expected an object");
                    continue;
                };
                require_identifier_field(&mut v, video, &path, "game");
                require_string_field(&mut v, video, &path, "locale");
                require_uri_field(&mut v, video, &path, "source");
            }
        }
        Some(_) => v.push("matchDetails.videos", "expected an array"),
        None => v.push("matchDetails.videos", "required field is missing"),
    }

    v
}

/// Validates a game stats document: `gameDuration`/`gameCreation` numbers
/// plus at least one participant carrying a `teamId` and a full kda/gold
/// stats block.
pub fn validate_game_stats(doc: &Value) -> Validation {
    let mut v = Validation::default();
    let Some(obj) = require_object(&mut v, doc, "gameStats") else {
        return v;
    };
    require_number_field(&mut v, obj, "gameStats", "gameDuration");
    require_number_field(&mut v, obj, "gameStats", "gameCreation");

    match obj.get("participants") {
        Some(Value::Array(items)) => {
            if items.is_empty() {
                v.push("gameStats.participants", "expected at least 1 item");
            }
            for (i, item) in items.iter().enumerate() {
                let path = format!("gameStats.participants[{i}]");
                let Some(participant) = item.as_object() else {
                    v.push(path, "expected an object");
                    continue;
                };
                require_number_field(&mut v, participant, &path, "teamId");
                match participant.get("stats") {
                    Some(stats) => {
                        if let Some(stats_obj) = stats.as_object() {
                            let stats_path = format!("{path}.stats");
                            require_number_field(&mut v, stats_obj, &stats_path, "kills");
                            require_number_field(&mut v, stats_obj, &stats_path, "deaths");
                            require_number_field(&mut v, stats_obj, &stats_path, "assists");
                            require_number_field(&mut v, stats_obj, &stats_path, "goldEarned");
                        } else {
                            v.push(format!("{path}.stats"), "expected an object");
                        }
                    }
                    None => v.push(format!("{path}.stats"), "required field is missing"),
                }
            }
        }
        Some(_) => v.push("gameStats.participants", "expected an array"),
        None => v.push("gameStats.participants", "required field is missing"),
    }

    v
}
