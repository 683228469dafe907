/// Runtime configuration, resolved once at startup and passed in explicitly.
/// Presence of `news_api_key` is what toggles the live news source on.
#[derive(Debug, Clone, Default)]
pub struct ScrapeConfig {
    pub persistence_url: Option<String>,
    pub persistence_key: Option<String>,
    pub news_api_key: Option<String>,
}

impl ScrapeConfig {
    pub fn from_env() -> Self {
        Self {
            persistence_url: read_env("PERSISTENCE_URL"),
            persistence_key: read_env("PERSISTENCE_KEY"),
            news_api_key: read_env("NEWS_API_KEY"),
        }
    }

    pub fn live_source_enabled(&self) -> bool {
        self.news_api_key.is_some()
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_source_follows_key_presence() {
        let mut config = ScrapeConfig::default();
        assert!(!config.live_source_enabled());

        config.news_api_key = Some("k".to_string());
        assert!(config.live_source_enabled());
    }
}
