//! Persisted match cache and reconciliation primitives.
//!
//! The cache is a single JSON object mapping match identifiers to
//! [`MatchInfo`] records, replaced wholesale at the end of every run.
//! Reading tolerates a missing or corrupt file (cold start); writing does
//! not tolerate failure, since that would silently discard the run's work.

use std::collections::BTreeMap;
use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::data_fetcher::models::MatchInfo;
use crate::error::AppError;
use crate::report::RunReport;

pub type MatchMap = BTreeMap<String, MatchInfo>;

/// Loads the cached match map from `path`.
///
/// A missing or unparseable cache file is reported and treated as an empty
/// cache; this is the deliberate bootstrap/recovery path, not an error the
/// run should die on.
pub async fn load_cache(path: &str, report: &mut RunReport) -> MatchMap {
    report.info(format!("Reading match cache from {path}"));
    match fs::read_to_string(path).await {
        Ok(content) => match serde_json::from_str::<MatchMap>(&content) {
            Ok(matches) => {
                report.info(format!("Loaded {} cached matches", matches.len()));
                matches
            }
            Err(e) => {
                report.error(format!(
                    "Cached matches file is unparseable, starting from an empty cache: {e}"
                ));
                MatchMap::new()
            }
        },
        Err(e) => {
            report.error(format!(
                "Error reading cached matches file, starting from an empty cache: {e}"
            ));
            MatchMap::new()
        }
    }
}

/// Writes the match map to `path`, replacing any previous content.
/// Creates the parent directory if needed. Any failure here is fatal for
/// the run.
pub async fn write_cache(path: &str, matches: &MatchMap) -> Result<(), AppError> {
    let content =
        serde_json::to_string(matches).map_err(|e| AppError::cache_write(path, e.to_string()))?;

    if let Some(parent) = Path::new(path).parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::cache_write(path, e.to_string()))?;
    }

    let mut file = fs::File::create(path)
        .await
        .map_err(|e| AppError::cache_write(path, e.to_string()))?;
    file.write_all(content.as_bytes())
        .await
        .map_err(|e| AppError::cache_write(path, e.to_string()))?;
    file.flush()
        .await
        .map_err(|e| AppError::cache_write(path, e.to_string()))?;
    Ok(())
}

/// Keeps only matches newer than `cutoff_ms` (strict comparison).
pub fn filter_recent(matches: MatchMap, cutoff_ms: i64) -> MatchMap {
    matches
        .into_iter()
        .filter(|(_, m)| m.timestamp > cutoff_ms)
        .collect()
}

/// Returns the fresh matches that are absent from the cached map, by key.
/// These are the matches that still need enrichment.
pub fn split_uncached(fresh: MatchMap, cached: &MatchMap) -> MatchMap {
    fresh
        .into_iter()
        .filter(|(id, _)| !cached.contains_key(id))
        .collect()
}

/// Union of cached and uncached matches; uncached entries win on key
/// collision. Collisions are empty by construction of [`split_uncached`],
/// but the precedence still matters if the cache file changed underneath us.
pub fn merge(cached: MatchMap, uncached: MatchMap) -> MatchMap {
    let mut merged = cached;
    merged.extend(uncached);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn match_with(id: &str, timestamp: i64) -> MatchInfo {
        MatchInfo {
            id: id.to_string(),
            tournament_id: "ee1fd023-5cbd-49ea-9717-dca6fae9cf69".to_string(),
            timestamp,
            games: BTreeMap::new(),
        }
    }

    const DAY_MS: i64 = 1000 * 60 * 60 * 24;

    #[test]
    fn test_filter_recent_applies_retention_window() {
        let now = 1_700_000_000_000i64;
        let matches: MatchMap = [
            ("a".to_string(), match_with("a", now - 20 * DAY_MS)),
            ("b".to_string(), match_with("b", now - 10 * DAY_MS)),
            ("c".to_string(), match_with("c", now - DAY_MS)),
        ]
        .into();

        let recent = filter_recent(matches, now - 14 * DAY_MS);
        assert_eq!(recent.len(), 2);
        assert!(!recent.contains_key("a"));
        assert!(recent.contains_key("b"));
        assert!(recent.contains_key("c"));
    }

    #[test]
    fn test_filter_recent_cutoff_is_strict() {
        let cutoff = 1_000;
        let matches: MatchMap = [
            ("at".to_string(), match_with("at", cutoff)),
            ("after".to_string(), match_with("after", cutoff + 1)),
        ]
        .into();
        let recent = filter_recent(matches, cutoff);
        assert_eq!(recent.len(), 1);
        assert!(recent.contains_key("after"));
    }

    #[test]
    fn test_split_uncached() {
        let fresh: MatchMap = [
            ("a".to_string(), match_with("a", 1)),
            ("b".to_string(), match_with("b", 2)),
        ]
        .into();
        let cached: MatchMap = [("a".to_string(), match_with("a", 1))].into();

        let uncached = split_uncached(fresh, &cached);
        assert_eq!(uncached.len(), 1);
        assert!(uncached.contains_key("b"));
    }

    #[test]
    fn test_merge_uncached_wins_on_collision() {
        let cached: MatchMap = [("a".to_string(), match_with("a", 1))].into();
        let uncached: MatchMap = [("a".to_string(), match_with("a", 999))].into();

        let merged = merge(cached, uncached);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged["a"].timestamp, 999);
    }

    #[tokio::test]
    async fn test_load_cache_missing_file_is_empty() {
        let mut report = RunReport::new();
        let matches = load_cache("/nonexistent/dir/cached-matches.json", &mut report).await;
        assert!(matches.is_empty());
        assert_eq!(report.error_count(), 1);
    }

    #[tokio::test]
    async fn test_load_cache_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cached-matches.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let mut report = RunReport::new();
        let matches = load_cache(&path.to_string_lossy(), &mut report).await;
        assert!(matches.is_empty());
        assert_eq!(report.error_count(), 1);
    }

    #[tokio::test]
    async fn test_write_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache").join("cached-matches.json");
        let path_str = path.to_string_lossy().to_string();

        let matches: MatchMap = [
            ("b".to_string(), match_with("b", 2)),
            ("a".to_string(), match_with("a", 1)),
        ]
        .into();
        write_cache(&path_str, &matches).await.unwrap();

        let mut report = RunReport::new();
        let loaded = load_cache(&path_str, &mut report).await;
        assert_eq!(loaded, matches);
        assert_eq!(report.error_count(), 0);
    }

    #[tokio::test]
    async fn test_write_cache_is_deterministic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cached-matches.json");
        let path_str = path.to_string_lossy().to_string();

        let matches: MatchMap = [
            ("z".to_string(), match_with("z", 3)),
            ("a".to_string(), match_with("a", 1)),
            ("m".to_string(), match_with("m", 2)),
        ]
        .into();

        write_cache(&path_str, &matches).await.unwrap();
        let first = tokio::fs::read(&path).await.unwrap();
        write_cache(&path_str, &matches).await.unwrap();
        let second = tokio::fs::read(&path).await.unwrap();
        assert_eq!(first, second);

        // BTreeMap serialization is key-ordered
        let text = String::from_utf8(first).unwrap();
        let pos_a = text.find("\"a\"").unwrap();
        let pos_m = text.find("\"m\"").unwrap();
        let pos_z = text.find("\"z\"").unwrap();
        assert!(pos_a < pos_m && pos_m < pos_z);
    }

    #[tokio::test]
    async fn test_write_cache_unwritable_path_errors() {
        let result = write_cache("/proc/definitely/not/writable.json", &MatchMap::new()).await;
        assert!(matches!(result, Err(AppError::CacheWrite { .. })));
    }
}
