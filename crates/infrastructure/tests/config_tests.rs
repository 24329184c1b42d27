#[cfg(test)]
mod tests {
    use domain::config::*;
    use infrastructure::config::{ConfigLoader, ConfigSource, ConfigValidator};
    use serial_test::serial;
    use std::env;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tokio::fs;

    const ENV_VARS: [&str; 4] = [
        "STOREFRONT_ENV",
        "STOREFRONT_SEARCH_INDEX",
        "STOREFRONT_LOG_LEVEL",
        "STOREFRONT_LOG_JSON",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    fn isolated_loader(paths: Vec<PathBuf>) -> ConfigLoader {
        ConfigLoader::new().with_paths(paths)
    }

    #[tokio::test]
    #[serial]
    async fn test_defaults_without_files_or_env() -> anyhow::Result<()> {
        clear_env();

        let (config, source) = isolated_loader(vec![]).load_with_source().await?;

        assert_eq!(config, FacadeConfig::default());
        assert_eq!(source, ConfigSource::Default);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_config_loader_from_toml() -> anyhow::Result<()> {
        clear_env();
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("storefront.toml");

        let toml_content = r#"
[search]
index = "catalog"

[logging]
level = "debug"
"#;
        fs::write(&config_path, toml_content).await?;

        let loader = isolated_loader(vec![config_path.clone()]);
        let (config, source) = loader.load_with_source().await?;

        assert_eq!(config.search.index, "catalog");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.color_output);
        assert_eq!(source, ConfigSource::File(config_path));
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_config_loader_from_json() -> anyhow::Result<()> {
        clear_env();
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("storefront.json");

        let json_content = r#"{
  "profile": "prod",
  "search": { "index": "shop-eu" }
}"#;
        fs::write(&config_path, json_content).await?;

        let config = isolated_loader(vec![config_path]).load().await?;

        assert_eq!(config.profile, Profile::Prod);
        assert_eq!(config.search.index, "shop-eu");
        // Production profile turns JSON logging on
        assert!(config.logging.json_output);
        assert!(!config.logging.color_output);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_broken_file_is_skipped_for_next_candidate() -> anyhow::Result<()> {
        clear_env();
        let temp_dir = TempDir::new()?;
        let broken = temp_dir.path().join("broken.toml");
        let valid = temp_dir.path().join("valid.json");

        fs::write(&broken, "search = [not toml").await?;
        fs::write(&valid, r#"{"search": {"index": "fallback"}}"#).await?;

        let (config, source) = isolated_loader(vec![broken, valid.clone()])
            .load_with_source()
            .await?;

        assert_eq!(config.search.index, "fallback");
        assert_eq!(source, ConfigSource::File(valid));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_from_file_reports_parse_errors() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "{ not json").await?;

        let err = ConfigLoader::new().load_from_file(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON config"));
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_env_override() -> anyhow::Result<()> {
        clear_env();
        env::set_var("STOREFRONT_SEARCH_INDEX", "from-env");
        env::set_var("STOREFRONT_LOG_LEVEL", "trace");
        env::set_var("STOREFRONT_LOG_JSON", "yes");

        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("storefront.toml");
        fs::write(&config_path, "[search]\nindex = \"from-file\"\n").await?;

        let result = isolated_loader(vec![config_path]).load_with_source().await;
        clear_env();
        let (config, source) = result?;

        assert_eq!(config.search.index, "from-env");
        assert_eq!(config.logging.level, "trace");
        assert!(config.logging.json_output);
        assert_eq!(source, ConfigSource::Environment);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_profile_from_env() -> anyhow::Result<()> {
        clear_env();
        env::set_var("STOREFRONT_ENV", "production");

        let loader = isolated_loader(vec![]);
        assert_eq!(loader.detect_profile(), Some(Profile::Prod));
        let result = loader.load().await;
        clear_env();

        assert!(result?.logging.json_output);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_custom_profile_file_keeps_its_settings() -> anyhow::Result<()> {
        clear_env();
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("storefront.toml");
        fs::write(
            &config_path,
            "profile = \"staging\"\n\n[search]\nindex = \"shop-eu\"\n",
        )
        .await?;

        let (config, source) = isolated_loader(vec![config_path.clone()])
            .load_with_source()
            .await?;

        assert_eq!(config.profile, Profile::Custom("staging".to_string()));
        assert_eq!(config.search.index, "shop-eu");
        assert_eq!(source, ConfigSource::File(config_path));
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_env_log_json_beats_prod_profile() -> anyhow::Result<()> {
        clear_env();
        env::set_var("STOREFRONT_ENV", "prod");
        env::set_var("STOREFRONT_LOG_JSON", "false");

        let result = isolated_loader(vec![]).load().await;
        clear_env();
        let config = result?;

        assert_eq!(config.profile, Profile::Prod);
        assert!(!config.logging.json_output);
        assert!(!config.logging.color_output);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_file_setting_beats_prod_profile() -> anyhow::Result<()> {
        clear_env();
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("storefront.json");
        fs::write(
            &config_path,
            r#"{"profile": "prod", "logging": {"json_output": false}}"#,
        )
        .await?;

        let config = isolated_loader(vec![config_path]).load().await?;

        assert!(!config.logging.json_output);
        assert!(!config.logging.color_output);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_env_profile_supplies_defaults_under_file() -> anyhow::Result<()> {
        clear_env();
        env::set_var("STOREFRONT_ENV", "production");

        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("storefront.toml");
        fs::write(&config_path, "[search]\nindex = \"catalog\"\n").await?;

        let result = isolated_loader(vec![config_path]).load().await;
        clear_env();
        let config = result?;

        assert_eq!(config.profile, Profile::Prod);
        assert_eq!(config.search.index, "catalog");
        assert!(config.logging.json_output);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_wrong_value_type_is_rejected() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("typed.json");
        fs::write(&path, r#"{"logging": {"json_output": "maybe"}}"#).await?;

        assert!(ConfigLoader::new().load_from_file(&path).await.is_err());
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_custom_env_prefix() -> anyhow::Result<()> {
        clear_env();
        env::set_var("SHOP_SEARCH_INDEX", "prefixed");

        let result = isolated_loader(vec![])
            .with_env_prefix("SHOP_".to_string())
            .load()
            .await;
        env::remove_var("SHOP_SEARCH_INDEX");

        assert_eq!(result?.search.index, "prefixed");
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_save_and_reload_config() -> anyhow::Result<()> {
        clear_env();
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = FacadeConfig::for_profile(Profile::Custom("qa".to_string()));
        config.search.index = "saved".to_string();
        config.logging.include_line_numbers = true;

        let loader = isolated_loader(vec![path.clone()]);
        loader.save_config(&config, &path).await?;

        assert_eq!(loader.load().await?, config);
        Ok(())
    }

    #[test]
    fn test_example_config_is_valid() -> anyhow::Result<()> {
        let example = ConfigLoader::generate_example_config();
        let config: FacadeConfig = toml::from_str(&example)?;

        assert_eq!(config.search.index, DEFAULT_SEARCH_INDEX);
        ConfigValidator::new().validate(&config)?;
        Ok(())
    }

    #[test]
    fn test_validator_accepts_defaults() {
        assert!(ConfigValidator::new()
            .validate(&FacadeConfig::default())
            .is_ok());
    }

    #[test]
    fn test_validator_rejects_bad_index_names() {
        let validator = ConfigValidator::new();

        for index in ["", "   ", "my index", "shop/eu"] {
            let mut config = FacadeConfig::default();
            config.search.index = index.to_string();
            assert!(
                validator.validate(&config).is_err(),
                "index {index:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validator_checks_log_directives() {
        let validator = ConfigValidator::new();
        let mut config = FacadeConfig::default();

        config.logging.level = "info,application=debug".to_string();
        assert!(validator.validate(&config).is_ok());

        config.logging.level = "application=loud".to_string();
        let err = validator.validate(&config).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }
}
