use crate::state::session_store::default_session_path;
use log::LevelFilter;
use scorecast_api::client::DEFAULT_API_URL;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub api_url: String,
    pub session_file: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            api_url: DEFAULT_API_URL.to_string(),
            session_file: default_session_path(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            full_screen: false,
            log_level: var("SCORECAST_LOG").and_then(|v| v.trim().parse::<LevelFilter>().ok()),
            api_url: var("SCORECAST_API_URL").unwrap_or(defaults.api_url),
            session_file: var("SCORECAST_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = settings(&[]);
        assert_eq!(s.api_url, DEFAULT_API_URL);
        assert_eq!(s.log_level, None);
    }

    #[test]
    fn env_overrides_are_read() {
        let s = settings(&[
            ("SCORECAST_API_URL", "https://bets.example.com"),
            ("SCORECAST_LOG", "debug"),
            ("SCORECAST_SESSION_FILE", "/tmp/s.json"),
        ]);
        assert_eq!(s.api_url, "https://bets.example.com");
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
        assert_eq!(s.session_file, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn blank_or_invalid_values_are_ignored() {
        let s = settings(&[("SCORECAST_API_URL", "  "), ("SCORECAST_LOG", "loud")]);
        assert_eq!(s.api_url, DEFAULT_API_URL);
        assert_eq!(s.log_level, None);
    }
}
