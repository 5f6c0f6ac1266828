// tests/config_load.rs
use social_mood_dashboard::config::dashboard::{
    DashboardConfig, ENV_DASHBOARD_CONFIG_PATH, ENV_OTHER_THRESHOLD,
};
use std::{env, fs};

#[test]
fn parse_toml_and_json_paths() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("dashboard.toml");
    fs::write(
        &p_toml,
        r#"
other_threshold = 0.1
result_limit = 9
"#,
    )
    .unwrap();
    let c = DashboardConfig::load_from(&p_toml).unwrap();
    assert_eq!(c.other_threshold, 0.1);
    assert_eq!(c.result_limit, 9);
    assert_eq!(c.max_posts, 200);

    let p_json = dir.path().join("dashboard.json");
    fs::write(&p_json, r#"{"no_data_label":"n/a","other_threshold":1.5}"#).unwrap();
    let cj = DashboardConfig::load_from(&p_json).unwrap();
    assert_eq!(cj.no_data_label, "n/a");
    // out of range resets to the default
    assert_eq!(cj.other_threshold, 0.05);
}

#[test]
fn broken_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("dashboard.toml");
    fs::write(&p, "other_threshold = [").unwrap();
    let err = DashboardConfig::load_from(&p).unwrap_err();
    assert!(format!("{err:#}").contains("dashboard.toml"));
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so the repo's own config/ is not read
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    env::remove_var(ENV_DASHBOARD_CONFIG_PATH);
    env::remove_var(ENV_OTHER_THRESHOLD);

    // 1) Nothing on disk → defaults
    assert_eq!(
        DashboardConfig::load_default().unwrap(),
        DashboardConfig::default()
    );

    // 2) Fallback TOML in ./config/
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("dashboard.toml"), "max_posts = 50").unwrap();
    assert_eq!(DashboardConfig::load_default().unwrap().max_posts, 50);

    // 3) Env path wins
    let p_env = tmp.path().join("custom.json");
    fs::write(&p_env, r#"{"max_posts": 7}"#).unwrap();
    env::set_var(ENV_DASHBOARD_CONFIG_PATH, p_env.display().to_string());
    assert_eq!(DashboardConfig::load_default().unwrap().max_posts, 7);

    // 4) Threshold override is clamped
    env::set_var(ENV_OTHER_THRESHOLD, "0.25");
    assert_eq!(DashboardConfig::load_default().unwrap().other_threshold, 0.25);
    env::set_var(ENV_OTHER_THRESHOLD, "3");
    assert_eq!(DashboardConfig::load_default().unwrap().other_threshold, 1.0);
    env::remove_var(ENV_OTHER_THRESHOLD);

    // 5) Env path to a missing file is an error
    env::set_var(ENV_DASHBOARD_CONFIG_PATH, tmp.path().join("nope.toml"));
    assert!(DashboardConfig::load_default().is_err());
    env::remove_var(ENV_DASHBOARD_CONFIG_PATH);

    env::set_current_dir(&old).unwrap();
}
