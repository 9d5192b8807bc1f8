use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub stripe: StripeConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub publishable_key: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    pub success_url: String,
    pub cancel_url: String,
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

fn default_api_base() -> String {
    "https://api.stripe.com".to_string()
}

fn default_currency() -> String {
    "usd".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
    pub admin_username: String,
    pub admin_password: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of STOREFRONT)
            // E.g. `STOREFRONT__SERVER__PORT=8080` would set server.port
            .add_source(config::Environment::with_prefix("STOREFRONT").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripe_defaults_fill_in() {
        let cfg: StripeConfig = serde_json::from_value(serde_json::json!({
            "secret_key": "sk_test_123",
            "publishable_key": "pk_test_123",
            "success_url": "https://example.com/success",
            "cancel_url": "https://example.com/cancel",
        }))
        .unwrap();
        assert_eq!(cfg.api_base, "https://api.stripe.com");
        assert_eq!(cfg.default_currency, "usd");
    }
}
