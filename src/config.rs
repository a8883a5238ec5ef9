use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Fixed seed for the recommendation scorer; entropy-seeded when unset
    #[serde(default)]
    pub recommendation_seed: Option<u64>,

    /// Allow cross-origin requests from any origin (browser UI in development)
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_permissive() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_unset() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.recommendation_seed, None);
        assert!(config.cors_permissive);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides_from_environment() {
        let vars = vec![
            ("HOST".to_string(), "0.0.0.0".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("RECOMMENDATION_SEED".to_string(), "42".to_string()),
            ("CORS_PERMISSIVE".to_string(), "false".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.recommendation_seed, Some(42));
        assert!(!config.cors_permissive);
    }
}
