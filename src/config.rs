use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Scraper configuration. An immutable value handed to the fetcher and
/// collector at construction time; nothing in the crate holds global state.
#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    /// Recipe page endpoint; the recipe id is appended as `?rid={id}`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User-agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Pause between page fetches in milliseconds. Zero disables the
    /// delay; set it when running against the real site.
    #[serde(default)]
    pub request_delay_ms: u64,
}

fn default_base_url() -> String {
    "https://www.russianfood.com/recipes/recipe.php".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout: default_timeout(),
            request_delay_ms: 0,
        }
    }
}

impl ScraperConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with SCRAPER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: SCRAPER__BASE_URL, SCRAPER__REQUEST_DELAY_MS
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("SCRAPER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ScraperConfig::default();
        assert_eq!(config.base_url, "https://www.russianfood.com/recipes/recipe.php");
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.timeout, 30);
        assert_eq!(config.request_delay_ms, 0);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ScraperConfig =
            serde_json::from_str(r#"{"base_url": "http://localhost:8080/recipe.php"}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/recipe.php");
        assert_eq!(config.timeout, 30);
    }
}
