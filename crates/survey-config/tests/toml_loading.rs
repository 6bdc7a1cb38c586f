//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and cwd manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use survey_config::SyncConfig;

#[test]
fn loads_api_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
token = "tok"
token_secret = "sec"
base_url = "https://api.example.test/v5/"
requests_per_minute = 12
days_back = 7
"#,
        )?;

        let config: SyncConfig = Figment::from(Serialized::defaults(SyncConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.token, "tok");
        assert_eq!(config.api.token_secret, "sec");
        assert_eq!(config.api.trimmed_base_url(), "https://api.example.test/v5");
        assert_eq!(config.api.effective_requests_per_minute(), 12);
        assert_eq!(config.api.days_back, 7);
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.is_configured());
        Ok(())
    });
}

#[test]
fn loads_surveys_with_mapping_matrix() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[[surveys]]
survey_id = "42"
completion_attribute = "SurveyDone"

[[surveys.question_mapping]]
question_id = 7
attribute = "FavoriteColor"

[[surveys.question_mapping]]
question_id = 8
attribute = "Allergies"

[[surveys]]
survey_id = "not-a-number"
"#,
        )?;

        let config: SyncConfig = Figment::from(Serialized::defaults(SyncConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.surveys.len(), 2);
        let first = config.surveys[0].resolve().expect("first survey resolves");
        assert_eq!(first.survey_id, 42);
        assert_eq!(first.completion_attribute_key.as_deref(), Some("SurveyDone"));
        assert_eq!(first.question_mapping.len(), 2);
        assert_eq!(first.question_mapping[1].target_attribute_key, "Allergies");

        assert!(config.surveys[1].completion_attribute.is_none());
        assert!(config.surveys[1].resolve().is_err());
        Ok(())
    });
}

#[test]
fn project_config_is_discovered_under_project_dir() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir(".survey-sync")?;
        jail.create_file(
            ".survey-sync/config.toml",
            r#"
[sync]
max_pages_per_survey = 5

[store]
path = "people.json"
"#,
        )?;

        let config = SyncConfig::load(None).expect("config loads");
        assert_eq!(config.sync.max_pages_per_survey, 5);
        assert_eq!(config.store.path, std::path::PathBuf::from("people.json"));
        Ok(())
    });
}

#[test]
fn invalid_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir(".survey-sync")?;
        jail.create_file(
            ".survey-sync/config.toml",
            r#"
[api]
days_back = "yesterday"
"#,
        )?;

        let err = SyncConfig::load(None).unwrap_err();
        assert!(matches!(err, survey_config::ConfigError::Figment(_)));
        Ok(())
    });
}

#[cfg(target_os = "linux")]
#[test]
fn user_config_is_layered_under_project_config() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir("xdg/survey-sync")?;
        jail.create_file(
            "xdg/survey-sync/config.toml",
            r#"
[api]
token = "user-token"
days_back = 4
"#,
        )?;
        jail.create_dir(".survey-sync")?;
        jail.create_file(
            ".survey-sync/config.toml",
            r#"
[api]
days_back = 9
"#,
        )?;

        let config = SyncConfig::load(None).expect("config loads");
        assert_eq!(config.api.token, "user-token");
        assert_eq!(config.api.days_back, 9);
        Ok(())
    });
}
