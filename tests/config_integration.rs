use portfolio_chat::config::AppConfig;
use serial_test::serial;
use std::env;
use std::io::Write;

const BIN: &str = "portfolio-chat";

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        for var in [
            "PORTFOLIO_SERVER__PORT",
            "PORTFOLIO_SITE__OWNER_NAME",
            "PORTFOLIO_SESSION__MAX_MESSAGE_CHARS",
            "PORTFOLIO_RESILIENCE__RATE_LIMIT_ENABLED",
            "CONFIG_FILE",
            "PORT",
            "BIND_HOST",
            "RATE_LIMIT_ENABLED",
            "TIMEOUT_DISABLED",
            "SECURE_COOKIES",
        ] {
            env::remove_var(var);
        }
    }
}

fn yaml_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp config");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp config");
    file
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load defaults");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.site.owner_name, "Tirth Bhatt");
    assert!(config.ui.sidebar_default_open);
    assert!(!config.cookies.secure);
    assert!(config.resilience.rate_limit_enabled);
    assert_eq!(config.session.max_message_chars, 4000);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("PORTFOLIO_SERVER__PORT", "9090");
        env::set_var("PORTFOLIO_SITE__OWNER_NAME", "Ada Lovelace");
        env::set_var("PORTFOLIO_RESILIENCE__RATE_LIMIT_ENABLED", "false");
    }

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.site.owner_first_name(), "Ada");
    assert!(!config.resilience.rate_limit_enabled);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let file = yaml_file(
        r"
server:
  port: 7070
session:
  max_message_chars: 500
ui:
  sidebar_default_open: false
",
    );
    let path = file.path().to_string_lossy().to_string();

    let config = AppConfig::load_from_args([BIN, "--config", &path])
        .expect("Failed to load config from file");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.session.max_message_chars, 500);
    assert!(!config.ui.sidebar_default_open);
    // Untouched keys keep their defaults.
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args([BIN, "--config", "/nonexistent/portfolio.yaml"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_precedence() {
    clear_env_vars();

    let file = yaml_file(
        r"
server:
  port: 7070
cookies:
  secure: false
",
    );
    let path = file.path().to_string_lossy().to_string();
    unsafe {
        env::set_var("PORTFOLIO_SERVER__PORT", "8080");
    }

    // Env beats file.
    let config = AppConfig::load_from_args([BIN, "--config", &path]).expect("env over file");
    assert_eq!(config.server.port, 8080);

    // CLI beats env.
    let config = AppConfig::load_from_args([
        BIN,
        "--config",
        &path,
        "--port",
        "6060",
        "--secure-cookies",
        "true",
    ])
    .expect("cli over env");
    assert_eq!(config.server.port, 6060);
    assert!(config.cookies.secure);

    clear_env_vars();
}

#[test]
#[serial]
fn test_invalid_cli_flag_is_reported() {
    clear_env_vars();

    let result = AppConfig::load_from_args([BIN, "--port", "not-a-port"]);
    assert!(result.is_err());
}
