use super::*;

use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("nyaya_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(SETTINGS_FILE);
    fs::write(&path, contents).expect("write settings");
    path
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings =
        load_settings_from(Path::new("/nonexistent/nyaya.toml"), env_from(&[])).expect("load");
    assert_eq!(settings, ClientSettings::default());
    assert_eq!(settings.request_timeout(), Duration::from_secs(30));
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        "api_base_url = \"https://nyaya.example.org/\"\nrequest_timeout_secs = 5\n",
    );
    let settings = load_settings_from(&path, env_from(&[])).expect("load");
    assert_eq!(settings.api_base_url, "https://nyaya.example.org");
    assert_eq!(settings.request_timeout_secs, 5);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let path = temp_settings_file("api_base_url = \"http://from-file:8000\"\n");
    let settings = load_settings_from(
        &path,
        env_from(&[
            ("NYAYA_API_BASE_URL", "http://from-env:8000"),
            ("APP__API_BASE_URL", "http://from-app-env:9000/"),
            ("APP__REQUEST_TIMEOUT_SECS", "12"),
        ]),
    )
    .expect("load");
    assert_eq!(settings.api_base_url, "http://from-app-env:9000");
    assert_eq!(settings.request_timeout_secs, 12);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn unparseable_timeout_and_blank_env_are_ignored() {
    let settings = load_settings_from(
        Path::new("/nonexistent/nyaya.toml"),
        env_from(&[
            ("APP__REQUEST_TIMEOUT_SECS", "soon"),
            ("NYAYA_API_BASE_URL", "   "),
        ]),
    )
    .expect("load");
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn zero_timeout_is_ignored_from_file_and_env() {
    let path = temp_settings_file("request_timeout_secs = 0\n");
    let from_file = load_settings_from(&path, env_from(&[])).expect("load");
    assert_eq!(from_file.request_timeout_secs, 30);

    let from_env = load_settings_from(&path, env_from(&[("APP__REQUEST_TIMEOUT_SECS", "0")]))
        .expect("load");
    assert_eq!(from_env.request_timeout(), Duration::from_secs(30));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn broken_settings_file_falls_back_to_defaults() {
    let path = temp_settings_file("api_base_url = [unterminated");
    let settings = load_settings_from(&path, env_from(&[])).expect("load");
    assert_eq!(settings, ClientSettings::default());
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn rejects_invalid_or_non_http_base_urls() {
    assert!(matches!(
        normalize_base_url("not a url"),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        normalize_base_url("ftp://example.org"),
        Err(ConfigError::UnsupportedScheme { .. })
    ));
    assert!(load_settings_from(
        Path::new("/nonexistent/nyaya.toml"),
        env_from(&[("NYAYA_API_BASE_URL", "localhost-without-scheme")]),
    )
    .is_err());
}

#[test]
fn with_api_base_url_validates_and_trims() {
    let settings = ClientSettings::default()
        .with_api_base_url(" http://10.0.0.2:8000/// ")
        .expect("override");
    assert_eq!(settings.api_base_url, "http://10.0.0.2:8000");
}
