mod support;

use std::fs;
use std::time::Duration;

use irrigation_grid::config::{CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use irrigation_grid::services::TimeFormat;
use irrigation_grid::{GridConfig, GridError};
use support::with_scoped_env;

#[test]
fn test_no_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = with_scoped_env(&[(CONFIG_ENV_VAR, None)], || {
        GridConfig::from_directory(dir.path()).unwrap()
    });
    assert_eq!(config, GridConfig::default());
}

#[test]
fn test_file_in_directory_is_found() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[display]\ntime_format = \"12h\"\n",
    )
    .unwrap();

    let config = with_scoped_env(&[(CONFIG_ENV_VAR, None)], || {
        GridConfig::from_directory(dir.path()).unwrap()
    });
    assert_eq!(config.display.time_format, TimeFormat::TwelveHour);
}

#[test]
fn test_config_subdirectory_is_searched() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config").join(CONFIG_FILE_NAME),
        "[polling]\nschedule_refresh_secs = 15\n",
    )
    .unwrap();

    let config = with_scoped_env(&[(CONFIG_ENV_VAR, None)], || {
        GridConfig::from_directory(dir.path()).unwrap()
    });
    assert_eq!(config.schedule_refresh(), Duration::from_secs(15));
}

#[test]
fn test_env_var_takes_precedence() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "[polling]\nstatus_slow_ms = 1111\n").unwrap();
    let explicit = dir.path().join("explicit.toml");
    fs::write(&explicit, "[polling]\nstatus_slow_ms = 2222\n").unwrap();
    let explicit = explicit.to_string_lossy().into_owned();

    let config = with_scoped_env(&[(CONFIG_ENV_VAR, Some(explicit.as_str()))], || {
        GridConfig::from_directory(dir.path()).unwrap()
    });
    assert_eq!(config.cadence().slow, Duration::from_millis(2222));
}

#[test]
fn test_env_var_pointing_nowhere_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    let missing = missing.to_string_lossy().into_owned();

    let result = with_scoped_env(&[(CONFIG_ENV_VAR, Some(missing.as_str()))], || {
        GridConfig::from_directory(dir.path())
    });
    assert!(matches!(result, Err(GridError::Configuration { .. })));
}

#[test]
fn test_blank_env_var_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let config = with_scoped_env(&[(CONFIG_ENV_VAR, Some("  "))], || {
        GridConfig::from_directory(dir.path()).unwrap()
    });
    assert_eq!(config, GridConfig::default());
}
