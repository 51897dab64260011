use std::time::Duration;

use clap::Parser;

use gemini_relay_core::config::{resolve_base_url, Credential, GatewayConfig};

#[derive(Parser, Debug)]
#[command(
    name = "gemini-relay",
    about = "Gemini Relay - keeps the Gemini API key on the server",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, help = "Upstream API key")]
    pub api_key: Option<String>,

    #[arg(long, env = "RELAY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(short, long, env = "RELAY_PORT", default_value = "8045")]
    pub port: u16,

    #[arg(long, env = "GEMINI_UPSTREAM_URL", help = "Override the Generative Language API base URL")]
    pub upstream_url: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = gemini_relay_core::config::DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "RELAY_TIMEOUT_SECS", default_value = "30", help = "Upstream call deadline")]
    pub timeout_secs: u64,

    #[arg(
        long = "allow-origin",
        env = "RELAY_ALLOWED_ORIGINS",
        value_delimiter = ',',
        help = "Extra browser origins allowed by CORS"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// The key is read once here; a missing key is reported per request, not at startup.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            credential: self.api_key.clone().and_then(Credential::new),
            base_url: resolve_base_url(self.upstream_url.as_deref()),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_flags_map_to_gateway_config() {
        let cli = Cli::try_parse_from([
            "gemini-relay",
            "--api-key",
            "abc",
            "--upstream-url",
            "http://127.0.0.1:9999/v1beta/",
            "--model",
            "gemini-pro",
            "--timeout-secs",
            "5",
        ])
        .expect("parse");
        let config = cli.gateway_config();

        assert_eq!(config.credential.as_ref().map(Credential::expose), Some("abc"));
        assert_eq!(config.endpoint_url(), "http://127.0.0.1:9999/v1beta/models/gemini-pro:generateContent");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_empty_api_key_is_missing() {
        let cli = Cli::try_parse_from(["gemini-relay", "--api-key", ""]).expect("parse");
        assert!(cli.gateway_config().credential.is_none());
    }

    #[test]
    fn test_allowed_origins_are_comma_separated() {
        let cli = Cli::try_parse_from([
            "gemini-relay",
            "--allow-origin",
            "https://a.example,https://b.example",
        ])
        .expect("parse");
        assert_eq!(cli.allowed_origins, vec!["https://a.example", "https://b.example"]);
    }
}
