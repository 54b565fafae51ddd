/// Environment variable naming the Gateway base URL.
const API_URL_ENV: &str = "LOLA_API_URL";

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Runtime configuration for the client core.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Gateway backend.
    pub api_base_url: String,
}

impl Config {
    /// Read configuration from the environment, falling back to the local
    /// development backend.
    pub fn from_env() -> Self {
        let api_base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self { api_base_url }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
    }
}
