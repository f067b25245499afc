//! Handles settings for the application, read once at startup.
//!
//! Sources, lowest priority first:
//! - built-in defaults;
//! - `config/line_ledger.toml`, or the file given with `--config`;
//! - environment variables such as `LINE_LEDGER__NOTION__SECRET`.
//!
//! See `config/line_ledger.example.toml` for every key.
use std::collections::HashMap;

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use server::BatchPolicy;

const DEFAULT_CONFIG_PATH: &str = "config/line_ledger";
const ENV_PREFIX: &str = "LINE_LEDGER";

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Line {
    pub channel_secret: String,
    pub channel_access_token: String,
    pub api_base: String,
    /// JSON reply template; the built-in bubble is used when unset.
    pub template_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Notion {
    pub secret: String,
    pub api_base: String,
    /// Database ids by name. `main` is required.
    pub databases: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct Webhook {
    pub on_parse_error: BatchPolicy,
    pub reply_on_error: bool,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub line: Line,
    pub notion: Notion,
    pub webhook: Webhook,
}

#[derive(Debug, Parser)]
#[command(name = "line_ledger", version)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long, env = "LINE_LEDGER_CONFIG")]
    config: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        Self::load(path, environment())
    }

    fn load(path: &str, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("line.api_base", line_bot::DEFAULT_API_BASE)?
            .set_default("notion.api_base", notion::DEFAULT_API_BASE)?
            .set_default("webhook.on_parse_error", "abort")?
            .set_default("webhook.reply_on_error", false)?
            .add_source(File::with_name(path).required(false))
            .add_source(env)
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Environment {
        let source = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        environment().source(Some(source))
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("LINE_LEDGER__LINE__CHANNEL_SECRET", "secret"),
        ("LINE_LEDGER__LINE__CHANNEL_ACCESS_TOKEN", "token"),
        ("LINE_LEDGER__NOTION__SECRET", "notion-secret"),
        ("LINE_LEDGER__NOTION__DATABASES__MAIN", "db-main"),
    ];

    #[test]
    fn defaults_fill_optional_keys() {
        let settings = Settings::load("does/not/exist", env(&REQUIRED)).unwrap();

        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.bind, "127.0.0.1");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.line.api_base, line_bot::DEFAULT_API_BASE);
        assert_eq!(settings.line.template_path, None);
        assert_eq!(settings.notion.databases["main"], "db-main");
        assert_eq!(settings.webhook.on_parse_error, BatchPolicy::Abort);
        assert!(!settings.webhook.reply_on_error);
    }

    #[test]
    fn environment_overrides_defaults() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("LINE_LEDGER__SERVER__PORT", "8080"),
            ("LINE_LEDGER__WEBHOOK__ON_PARSE_ERROR", "skip"),
            ("LINE_LEDGER__WEBHOOK__REPLY_ON_ERROR", "true"),
            ("LINE_LEDGER__NOTION__DATABASES__WEI", "db-wei"),
        ]);

        let settings = Settings::load("does/not/exist", env(&pairs)).unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.webhook.on_parse_error, BatchPolicy::Skip);
        assert!(settings.webhook.reply_on_error);
        assert_eq!(settings.notion.databases["wei"], "db-wei");
    }

    #[test]
    fn secrets_are_required() {
        assert!(Settings::load("does/not/exist", env(&[])).is_err());
    }
}
