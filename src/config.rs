use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Purchase history table (needs `Item Purchased`, `Color`, `Season`)
    #[serde(default = "default_purchases_path")]
    pub purchases_path: PathBuf,

    /// Image lookup table (needs `Item`, `Color`, `URL`)
    #[serde(default = "default_images_path")]
    pub images_path: PathBuf,

    /// Number of ranked entries kept per season
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_purchases_path() -> PathBuf {
    PathBuf::from("output_w_prod_cluster.csv")
}

fn default_images_path() -> PathBuf {
    PathBuf::from("item_color_combinations.csv")
}

fn default_top_n() -> usize {
    3
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.top_n == 0 {
            anyhow::bail!("TOP_N must be at least 1");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
