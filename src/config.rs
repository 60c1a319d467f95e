use std::env;

use url::Url;

pub struct Config {
    pub port: u16,
    pub calculator_url: Url,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("Invalid PORT value"))?;

        let calculator_url = env::var("CALCULATOR_URL")
            .map_err(|_| anyhow::anyhow!("CALCULATOR_URL environment variable not set"))?
            .parse::<Url>()
            .map_err(|_| anyhow::anyhow!("Invalid CALCULATOR_URL value"))?;

        Ok(Config {
            port,
            calculator_url,
        })
    }
}
