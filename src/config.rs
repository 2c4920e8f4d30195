use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::watch::{Result, WatchError};

pub const DEFAULT_TARGET_URL: &str =
    "https://www.canva.com/design/DAGS1jbtVUs/ZtauRcJI71IwuK5Afkb8fQ/view";
// Canva renders plain HTML tables for table elements; override if the design changes.
pub const DEFAULT_TABLE_SELECTOR: &str = "table";
pub const DEFAULT_LANGUAGE: &str = "FRANCÉS";
pub const DEFAULT_GROUP_FRAGMENT: &str = "A1";
pub const DEFAULT_STORE_PATH: &str = "data/past_entries.json";
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org/";

/// chromiumoxide gives every page navigation a fixed 30s deadline; a longer
/// bound here would never be reached.
pub const MAX_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
const NAVIGATION_TIMEOUT: Duration = MAX_NAVIGATION_TIMEOUT;
const SELECTOR_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone, Debug)]
pub struct TelegramConfig {
    pub api_base: String,
    pub bot_token: String,
    pub chat_id: String,
}

/// Everything a run needs, resolved once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub target_url: String,
    pub table_selector: String,
    pub language: String,
    pub group_fragment: String,
    pub store_path: PathBuf,
    pub navigation_timeout: Duration,
    pub selector_timeout: Duration,
    pub telegram: TelegramConfig,
}

impl Config {
    /// Compiled-in defaults with the given bot credentials.
    pub fn with_credentials(bot_token: &str, chat_id: &str) -> Self {
        Config {
            target_url: DEFAULT_TARGET_URL.to_string(),
            table_selector: DEFAULT_TABLE_SELECTOR.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            group_fragment: DEFAULT_GROUP_FRAGMENT.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            navigation_timeout: NAVIGATION_TIMEOUT,
            selector_timeout: SELECTOR_TIMEOUT,
            telegram: TelegramConfig {
                api_base: DEFAULT_TELEGRAM_API.to_string(),
                bot_token: bot_token.to_string(),
                chat_id: chat_id.to_string(),
            },
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .ok_or_else(|| WatchError::Config("TELEGRAM_BOT_TOKEN is not set".into()))?;
        let chat_id = lookup("TELEGRAM_CHAT_ID")
            .ok_or_else(|| WatchError::Config("TELEGRAM_CHAT_ID is not set".into()))?;

        let mut config = Config::with_credentials(bot_token.trim(), chat_id.trim());
        if let Some(url) = lookup("CANVA_TARGET_URL") {
            config.target_url = url.trim().to_string();
        }
        if let Some(selector) = lookup("CANVA_TABLE_SELECTOR") {
            config.table_selector = selector.trim().to_string();
        }
        if let Some(path) = lookup("CANVA_STORE_PATH") {
            config.store_path = PathBuf::from(path.trim());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.target_url)
            .map_err(|e| WatchError::Config(format!("invalid target url `{}`: {}", self.target_url, e)))?;
        Url::parse(&self.telegram.api_base).map_err(|e| {
            WatchError::Config(format!(
                "invalid Telegram API base `{}`: {}",
                self.telegram.api_base, e
            ))
        })?;

        if self.navigation_timeout.is_zero() || self.navigation_timeout > MAX_NAVIGATION_TIMEOUT {
            return Err(WatchError::Config(format!(
                "navigation timeout must be between 1s and {}s, got {:?}",
                MAX_NAVIGATION_TIMEOUT.as_secs(),
                self.navigation_timeout
            )));
        }

        let required = [
            ("table selector", &self.table_selector),
            ("language filter", &self.language),
            ("group filter", &self.group_fragment),
            ("bot token", &self.telegram.bot_token),
            ("chat id", &self.telegram.chat_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(WatchError::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let config = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "-1001"),
        ]))
        .unwrap();

        assert_eq!(config.target_url, DEFAULT_TARGET_URL);
        assert_eq!(config.table_selector, "table");
        assert_eq!(config.language, "FRANCÉS");
        assert_eq!(config.group_fragment, "A1");
        assert_eq!(config.navigation_timeout, Duration::from_secs(30));
        assert_eq!(config.selector_timeout, Duration::from_secs(15));
        assert_eq!(config.telegram.chat_id, "-1001");
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "42"),
            ("CANVA_TABLE_SELECTOR", "div.grid"),
            ("CANVA_STORE_PATH", "/tmp/seen.json"),
        ]))
        .unwrap();

        assert_eq!(config.table_selector, "div.grid");
        assert_eq!(config.store_path, PathBuf::from("/tmp/seen.json"));
    }

    #[test]
    fn missing_credentials_are_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[("TELEGRAM_CHAT_ID", "42")])).unwrap_err();
        assert!(matches!(err, WatchError::Config(msg) if msg.contains("TELEGRAM_BOT_TOKEN")));
    }

    #[test]
    fn navigation_bound_cannot_exceed_the_browser_deadline() {
        let mut config = Config::with_credentials("123:abc", "42");
        assert!(config.validate().is_ok());

        config.navigation_timeout = Duration::from_secs(60);
        assert!(matches!(config.validate(), Err(WatchError::Config(msg)) if msg.contains("30s")));

        config.navigation_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_values_and_bad_urls_are_rejected() {
        let blank = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "   "),
        ]));
        assert!(matches!(blank, Err(WatchError::Config(_))));

        let bad_url = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "42"),
            ("CANVA_TARGET_URL", "not a url"),
        ]));
        assert!(matches!(bad_url, Err(WatchError::Config(_))));
    }
}
