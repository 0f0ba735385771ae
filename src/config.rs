use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Host to bind
    #[arg(long, env = "BIND_HOST")]
    pub host: Option<String>,

    /// Enable rate limiting
    #[arg(long, env = "RATE_LIMIT_ENABLED")]
    pub rate_limit_enabled: Option<bool>,

    /// Disable timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,

    /// Mark cookies as Secure
    #[arg(long, env = "SECURE_COOKIES")]
    pub secure_cookies: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
    pub cookies: CookieConfig,
    pub resilience: ResilienceConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Full name of the person the assistant talks about.
    pub owner_name: String,
    /// Directory served for every path the router does not handle.
    pub public_dir: String,
}

impl SiteConfig {
    /// First word of the owner's name, used in conversational copy.
    #[must_use]
    pub fn owner_first_name(&self) -> &str {
        self.owner_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.owner_name)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub idle_timeout_secs: u64,
    pub empty_session_ttl_secs: u64,
    pub cleanup_interval_secs: u64,
    pub max_message_chars: usize,
}

impl SessionConfig {
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    #[must_use]
    pub fn empty_session_ttl(&self) -> Duration {
        Duration::from_secs(self.empty_session_ttl_secs)
    }

    #[must_use]
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Sidebar state when the browser has no `sidebar_state` cookie yet.
    pub sidebar_default_open: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CookieConfig {
    pub secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResilienceConfig {
    pub rate_limit_enabled: bool,
    pub timeout_disabled: bool,
    pub requests_per_second: u32,
    pub burst_size: u32,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub json: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("site.owner_name", "Tirth Bhatt")?
            .set_default("site.public_dir", "public")?
            .set_default("session.idle_timeout_secs", 24 * 60 * 60)?
            .set_default("session.empty_session_ttl_secs", 60 * 60)?
            .set_default("session.cleanup_interval_secs", 5 * 60)?
            .set_default("session.max_message_chars", 4000)?
            .set_default("ui.sidebar_default_open", true)?
            .set_default("cookies.secure", false)?
            .set_default("resilience.rate_limit_enabled", true)?
            .set_default("resilience.timeout_disabled", false)?
            .set_default("resilience.requests_per_second", 5)?
            .set_default("resilience.burst_size", 10)?
            .set_default("resilience.request_timeout_secs", 30)?
            .set_default("log.json", false)?;

        // Explicit file wins over ./config.yaml, which is optional.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // E.g. PORTFOLIO_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("PORTFOLIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Priority: CLI flag > CLI env var > PORTFOLIO_ env > config file > defaults.
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(rl) = cli.rate_limit_enabled {
            builder = builder.set_override("resilience.rate_limit_enabled", rl)?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("resilience.timeout_disabled", td)?;
        }
        if let Some(secure) = cli.secure_cookies {
            builder = builder.set_override("cookies.secure", secure)?;
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_first_name() {
        let site = SiteConfig {
            owner_name: "Tirth Bhatt".to_string(),
            public_dir: "public".to_string(),
        };
        assert_eq!(site.owner_first_name(), "Tirth");

        let site = SiteConfig {
            owner_name: "Cher".to_string(),
            public_dir: "public".to_string(),
        };
        assert_eq!(site.owner_first_name(), "Cher");
    }

    #[test]
    fn test_cleanup_interval_never_zero() {
        let session = SessionConfig {
            idle_timeout_secs: 10,
            empty_session_ttl_secs: 5,
            cleanup_interval_secs: 0,
            max_message_chars: 10,
        };
        assert_eq!(session.cleanup_interval(), Duration::from_secs(1));
    }
}
