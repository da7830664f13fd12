use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration as StdDuration,
};

use chrono::Duration;

use crate::service::cache::DEFAULT_TTL_HOURS;

pub const DEFAULT_REGIONAL_HOST: &str = "europe";
pub const DEFAULT_PLATFORM_HOST: &str = "euw1";
pub const DEFAULT_TAG_LINE: &str = "EUW";
pub const DEFAULT_ENTRY_DELAY: StdDuration = StdDuration::from_millis(500);
pub const DEFAULT_REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// A tracked player as written in the roster, `name` or `name#tag`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RosterEntry {
    pub game_name: String,
    pub tag_line: String,
}

impl RosterEntry {
    /// Returns `None` for blank lines. A missing or empty tag gets `default_tag_line`.
    /// Only the first two `#` segments count, `a#b#c` is `a#b`.
    pub fn parse(raw: &str, default_tag_line: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let mut parts = raw.split('#').map(str::trim);
        let game_name = parts.next().unwrap_or_default();
        let tag_line = parts.next().filter(|tag| !tag.is_empty()).unwrap_or(default_tag_line);
        if game_name.is_empty() {
            return None;
        }

        Some(Self {
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
        })
    }
}

impl fmt::Display for RosterEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

/// How ranked placements expand into leaderboard rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum QueueMode {
    /// One row per ranked queue; accounts without placements produce no rows.
    #[default]
    #[value(name = "multi")]
    MultiQueue,
    /// Exactly one row per account, from its solo/duo placement or unranked.
    #[value(name = "solo")]
    SoloQueue,
}

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub roster: Vec<RosterEntry>,
    pub regional_host: String,
    pub platform_host: String,
    pub default_tag_line: String,
    pub cache_ttl: Duration,
    pub entry_delay: StdDuration,
    pub request_timeout: StdDuration,
    pub queue_mode: QueueMode,
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            roster: Vec::new(),
            regional_host: DEFAULT_REGIONAL_HOST.to_string(),
            platform_host: DEFAULT_PLATFORM_HOST.to_string(),
            default_tag_line: DEFAULT_TAG_LINE.to_string(),
            cache_ttl: Duration::hours(DEFAULT_TTL_HOURS),
            entry_delay: DEFAULT_ENTRY_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            queue_mode: QueueMode::default(),
            snapshot_path: None,
        }
    }
}

impl Config {
    pub fn with_roster<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.roster = parse_roster(names, &self.default_tag_line);
        self
    }

    /// The configured key, treating a blank value as absent.
    pub fn api_key(&self) -> Result<&str, MissingCredentialError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(MissingCredentialError)
    }
}

pub fn parse_roster<I, S>(names: I, default_tag_line: &str) -> Vec<RosterEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| RosterEntry::parse(name.as_ref(), default_tag_line))
        .collect()
}

/// Reads a JSON array of roster names, e.g. `["Teserhela", "Rubitativo#EUW"]`.
pub fn load_roster(path: &Path, default_tag_line: &str) -> Result<Vec<RosterEntry>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::RosterUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let names: Vec<String> = serde_json::from_str(&raw).map_err(|source| ConfigError::RosterInvalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_roster(names, default_tag_line))
}

/// Development keys look like `RGAPI-xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
pub fn looks_like_api_key(key: &str) -> bool {
    key.starts_with("RGAPI-") && key.len() > 30
}

#[derive(Debug, thiserror::Error)]
#[error("no Riot API key configured, set RIOT_API_KEY or pass --api-key")]
pub struct MissingCredentialError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read roster file {}: {source}", .path.display())]
    RosterUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("roster file {} is not a JSON list of names: {source}", .path.display())]
    RosterInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn roster_entry_defaults_tag_line() {
        let entry = RosterEntry::parse("  Teserhela ", "EUW").unwrap();
        assert_eq!(entry.game_name, "Teserhela");
        assert_eq!(entry.tag_line, "EUW");
        assert_eq!(entry.to_string(), "Teserhela#EUW");
    }

    #[test]
    fn roster_entry_keeps_first_two_segments() {
        let entry = RosterEntry::parse("Rubi#1234#x", "EUW").unwrap();
        assert_eq!(entry.game_name, "Rubi");
        assert_eq!(entry.tag_line, "1234");

        let spaced = RosterEntry::parse(" Rubi # NA1 ", "EUW").unwrap();
        assert_eq!(spaced.to_string(), "Rubi#NA1");

        let empty_tag = RosterEntry::parse("Rubi#", "EUW").unwrap();
        assert_eq!(empty_tag.tag_line, "EUW");
    }

    #[test]
    fn blank_roster_lines_are_ignored() {
        assert_eq!(RosterEntry::parse("   ", "EUW"), None);
        assert_eq!(RosterEntry::parse("#EUW", "EUW"), None);
        assert_eq!(parse_roster(["a", "", "b#NA1"], "EUW").len(), 2);
    }

    #[test]
    fn blank_api_key_is_missing() {
        let mut config = Config::default();
        assert!(config.api_key().is_err());

        config.api_key = Some("   ".into());
        assert!(config.api_key().is_err());

        config.api_key = Some("RGAPI-abc".into());
        assert_eq!(config.api_key().unwrap(), "RGAPI-abc");
    }

    #[test]
    fn api_key_sanity_check() {
        assert!(looks_like_api_key("RGAPI-12345678-1234-1234-1234-123456789012"));
        assert!(!looks_like_api_key("RGAPI-short"));
        assert!(!looks_like_api_key("12345678-1234-1234-1234-123456789012-RGAPI"));
    }

    #[test]
    fn loads_roster_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["Teserhela", "Fartinete#EUW", "Rubitativo#NA1", ""]"#).unwrap();

        let roster = load_roster(file.path(), "EUW").unwrap();
        let ids: Vec<String> = roster.iter().map(ToString::to_string).collect();
        assert_eq!(ids, ["Teserhela#EUW", "Fartinete#EUW", "Rubitativo#NA1"]);
    }

    #[test]
    fn malformed_roster_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"friends": []}}"#).unwrap();

        let err = load_roster(file.path(), "EUW").unwrap_err();
        assert!(matches!(err, ConfigError::RosterInvalid { .. }));
    }
}
