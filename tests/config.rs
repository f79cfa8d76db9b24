#[cfg(test)]
mod tests {
    use paylog::libs::config::{Config, DefaultsConfig, ProfileConfig, DEFAULT_USER};
    use paylog::libs::currency::Currency;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_config_falls_back_to_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();

        assert!(config.profile.is_none());
        assert!(config.defaults.is_none());
        assert_eq!(config.user(), DEFAULT_USER);

        let defaults = config.entry_defaults();
        assert_eq!(defaults.hourly_rate, 0.0);
        assert_eq!(defaults.currency, Currency::Usd);
        assert_eq!(defaults.break_minutes, 0);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_round_trip(_ctx: &mut ConfigTestContext) {
        let config = Config {
            profile: Some(ProfileConfig { user: "mira".to_string() }),
            defaults: Some(DefaultsConfig {
                hourly_rate: 42.5,
                currency: Currency::Sgd,
                break_minutes: 45,
            }),
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded.user(), "mira");

        let defaults = loaded.entry_defaults();
        assert_eq!(defaults.hourly_rate, 42.5);
        assert_eq!(defaults.currency, Currency::Sgd);
        assert_eq!(defaults.break_minutes, 45);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_delete_resets_configuration(_ctx: &mut ConfigTestContext) {
        let config = Config {
            profile: Some(ProfileConfig { user: "gone".to_string() }),
            defaults: None,
        };
        config.save().unwrap();

        Config::delete().unwrap();
        // Deleting twice is fine.
        Config::delete().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded.user(), DEFAULT_USER);
    }
}
