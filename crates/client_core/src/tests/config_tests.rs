use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_dir(label: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("commitment_analyzer_{label}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    dir
}

#[test]
fn api_root_defaults_to_server_origin() {
    let settings = ClientSettings::default();
    assert_eq!(settings.api_root(), "http://127.0.0.1:8000");
}

#[test]
fn api_base_url_takes_precedence_and_drops_trailing_slash() {
    let settings = ClientSettings {
        api_base_url: "https://billing.example.com/analyzer/".to_string(),
        ..ClientSettings::default()
    };
    assert_eq!(settings.api_root(), "https://billing.example.com/analyzer");
}

#[test]
fn blank_api_base_url_falls_back_to_server_url() {
    let settings = ClientSettings {
        server_url: "http://localhost:9000/".to_string(),
        api_base_url: "   ".to_string(),
        ..ClientSettings::default()
    };
    assert_eq!(settings.api_root(), "http://localhost:9000");
}

#[test]
fn missing_settings_file_yields_defaults() {
    let dir = temp_dir("missing");
    let settings = read_settings_file(&dir.join("absent.toml")).expect("defaults");
    assert_eq!(settings, ClientSettings::default());
    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn settings_file_overrides_only_given_keys() {
    let dir = temp_dir("partial");
    let path = dir.join(SETTINGS_FILE);
    fs::write(&path, "api_base_url = \"http://10.0.0.5:8000\"\n").expect("write");

    let settings = read_settings_file(&path).expect("parse");
    assert_eq!(settings.api_base_url, "http://10.0.0.5:8000");
    assert_eq!(settings.server_url, ClientSettings::default().server_url);
    assert_eq!(settings.log_filter, "info");

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn malformed_settings_file_is_reported() {
    let dir = temp_dir("malformed");
    let path = dir.join(SETTINGS_FILE);
    fs::write(&path, "server_url = [unterminated").expect("write");

    let err = read_settings_file(&path).expect_err("must fail");
    assert!(matches!(err, SettingsError::Parse { .. }), "unexpected error: {err}");

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn app_prefixed_env_vars_win_over_plain_ones() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("COMMITMENTS_SERVER_URL", "http://plain:1"),
        ("APP__SERVER_URL", "http://prefixed:2"),
        ("COMMITMENTS_API_BASE_URL", "http://gateway/api-proxy"),
        ("RUST_LOG", "debug"),
    ]);
    let mut settings = ClientSettings::default();
    apply_env_overrides(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.server_url, "http://prefixed:2");
    assert_eq!(settings.api_base_url, "http://gateway/api-proxy");
    assert_eq!(settings.log_filter, "debug");
}
