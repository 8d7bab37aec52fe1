//! Application configuration constants.
//!
//! This module centralizes the scheduling constants and the configurable
//! study values so they are not scattered through the codebase.

use serde::Deserialize;
use std::path::Path;

// ==================== SRS Configuration ====================

/// Starting ease factor for a freshly created card
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Hard floor for the ease factor; no review can push it lower
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Interval after a failed review or the first successful one, in days
pub const FIRST_INTERVAL_DAYS: i64 = 1;

/// Interval after the second consecutive successful review, in days
pub const SECOND_INTERVAL_DAYS: i64 = 6;

// ==================== Study Configuration ====================

/// Default cap on the due-card queue handed to a study session
pub const DEFAULT_DUE_LIMIT: usize = 50;

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    study: Option<StudyConfig>,
}

#[derive(Debug, Deserialize)]
struct StudyConfig {
    due_limit: Option<usize>,
}

/// Load the due-queue limit with priority: config.toml > .env > default
pub fn load_due_limit() -> usize {
    // Load .env file if present
    let _ = dotenvy::dotenv();
    let env_limit = std::env::var("DUE_LIMIT").ok();
    resolve_due_limit(Path::new("config.toml"), env_limit.as_deref())
}

/// Priority chain behind `load_due_limit`, with both sources as parameters
fn resolve_due_limit(config_path: &Path, env_limit: Option<&str>) -> usize {
    // Priority 1: config.toml
    if let Some(limit) = due_limit_from_file(config_path) {
        return limit;
    }

    // Priority 2: .env DUE_LIMIT
    if let Some(raw) = env_limit {
        if let Ok(limit) = raw.parse::<usize>() {
            tracing::info!("Using due limit from DUE_LIMIT env: {}", limit);
            return limit;
        }
        tracing::warn!("Ignoring unparseable DUE_LIMIT env value: {}", raw);
    }

    // Default
    tracing::info!("Using default due limit: {}", DEFAULT_DUE_LIMIT);
    DEFAULT_DUE_LIMIT
}

/// Read the `[study] due_limit` value from a TOML config file, if present
pub fn due_limit_from_file(path: &Path) -> Option<usize> {
    let contents = std::fs::read_to_string(path).ok()?;
    let config = toml::from_str::<AppConfig>(&contents).ok()?;
    let limit = config.study?.due_limit?;
    tracing::info!("Using due limit from {}: {}", path.display(), limit);
    Some(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_due_limit_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[study]\ndue_limit = 25").unwrap();

        assert_eq!(due_limit_from_file(&path), Some(25));
    }

    #[test]
    fn test_due_limit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert_eq!(due_limit_from_file(&path), None);
    }

    #[test]
    fn test_due_limit_missing_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[other]\nvalue = 1\n").unwrap();

        assert_eq!(due_limit_from_file(&path), None);
    }

    #[test]
    fn test_env_limit_used_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");

        assert_eq!(resolve_due_limit(&missing, Some("30")), 30);
    }

    #[test]
    fn test_unparseable_env_limit_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");

        assert_eq!(resolve_due_limit(&missing, Some("plenty")), DEFAULT_DUE_LIMIT);
    }

    #[test]
    fn test_config_file_beats_env_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[study]\ndue_limit = 10\n").unwrap();

        assert_eq!(resolve_due_limit(&path, Some("30")), 10);
    }

    #[test]
    fn test_default_without_any_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");

        assert_eq!(resolve_due_limit(&missing, None), DEFAULT_DUE_LIMIT);
    }

    #[test]
    fn test_constants_are_consistent() {
        assert!(INITIAL_EASE_FACTOR >= MIN_EASE_FACTOR);
        assert!(SECOND_INTERVAL_DAYS > FIRST_INTERVAL_DAYS);
    }
}
