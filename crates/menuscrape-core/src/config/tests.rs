use std::io::Write;
use std::path::PathBuf;

use serial_test::serial;

use super::*;

const ENV_KEYS: [&str; 9] = [
    "MENUSCRAPE_TARGET_DOMAIN",
    "MENUSCRAPE_TIMEOUT",
    "MENUSCRAPE_CONNECT_TIMEOUT",
    "MENUSCRAPE_MAX_BODY_BYTES",
    "MENUSCRAPE_MAX_RETRIES",
    "MENUSCRAPE_MAX_RETRY_DELAY",
    "MENUSCRAPE_USER_AGENT",
    "MENUSCRAPE_OUTPUT_DIR",
    "MENUSCRAPE_SAVE_FORMAT",
];

fn clear_env() {
    for key in ENV_KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("menuscrape.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(f, "{body}").unwrap();
    path
}

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.target_domain, "zomato.com");
    assert_eq!(config.fetch.timeout, 20);
    assert_eq!(config.output.dir, PathBuf::from("menus"));
    assert_eq!(config.output.format, SaveFormat::Csv);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn missing_file_falls_back_to_defaults() {
    clear_env();
    let config = Config::load(std::path::Path::new("/nonexistent/menuscrape.toml")).unwrap();
    assert_eq!(config.target_domain, "zomato.com");
    assert_eq!(config.fetch.max_retries, 2);
}

#[test]
#[serial]
fn parse_valid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
target_domain = "zomato.test"

[fetch]
timeout = 7
user_agent = "Mozilla/5.0"

[output]
dir = "./out"
format = "json"
"#,
    );

    clear_env();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.target_domain, "zomato.test");
    assert_eq!(config.fetch.timeout, 7);
    assert_eq!(config.fetch.connect_timeout, 10);
    assert_eq!(config.fetch.user_agent, "Mozilla/5.0");
    assert_eq!(config.output.dir, PathBuf::from("./out"));
    assert_eq!(config.output.format, SaveFormat::Json);
}

#[test]
#[serial]
fn malformed_toml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[fetch\ntimeout = ");
    clear_env();
    let err = Config::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse config file"));
}

#[test]
#[serial]
fn env_overrides_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[fetch]\ntimeout = 7\n");

    clear_env();
    unsafe {
        std::env::set_var("MENUSCRAPE_TIMEOUT", "3");
        std::env::set_var("MENUSCRAPE_CONNECT_TIMEOUT", "1");
        std::env::set_var("MENUSCRAPE_MAX_BODY_BYTES", "1024");
        std::env::set_var("MENUSCRAPE_MAX_RETRIES", "0");
        std::env::set_var("MENUSCRAPE_MAX_RETRY_DELAY", "4");
        std::env::set_var("MENUSCRAPE_USER_AGENT", "test-agent");
        std::env::set_var("MENUSCRAPE_OUTPUT_DIR", "/tmp/menus");
        std::env::set_var("MENUSCRAPE_TARGET_DOMAIN", "example.org");
        std::env::set_var("MENUSCRAPE_SAVE_FORMAT", "JSON");
    };

    let config = Config::load(&path).unwrap();
    clear_env();

    assert_eq!(config.fetch.timeout, 3);
    assert_eq!(config.fetch.connect_timeout, 1);
    assert_eq!(config.fetch.max_body_bytes, 1024);
    assert_eq!(config.fetch.max_retries, 0);
    assert_eq!(config.fetch.max_retry_delay, 4);
    assert_eq!(config.fetch.user_agent, "test-agent");
    assert_eq!(config.output.dir, PathBuf::from("/tmp/menus"));
    assert_eq!(config.target_domain, "example.org");
    assert_eq!(config.output.format, SaveFormat::Json);
}

#[test]
#[serial]
fn invalid_env_values_are_ignored() {
    clear_env();
    unsafe {
        std::env::set_var("MENUSCRAPE_TIMEOUT", "not-a-number");
        std::env::set_var("MENUSCRAPE_SAVE_FORMAT", "xml");
    };

    let mut config = Config::default();
    config.apply_env_overrides();
    clear_env();

    assert_eq!(config.fetch.timeout, 20);
    assert_eq!(config.output.format, SaveFormat::Csv);
}

#[test]
fn validate_rejects_zero_timeouts_and_empty_domain() {
    let mut config = Config::default();
    config.fetch.timeout = 0;
    assert!(config.validate().unwrap_err().to_string().contains("fetch.timeout"));

    let mut config = Config::default();
    config.fetch.connect_timeout = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.target_domain = "  ".into();
    assert!(config.validate().unwrap_err().to_string().contains("target_domain"));
}

#[test]
fn save_format_parses_case_insensitively() {
    assert_eq!("CSV".parse::<SaveFormat>(), Ok(SaveFormat::Csv));
    assert_eq!(" json ".parse::<SaveFormat>(), Ok(SaveFormat::Json));
    assert!("xml".parse::<SaveFormat>().is_err());
    assert_eq!(SaveFormat::Json.to_string(), "json");
}
