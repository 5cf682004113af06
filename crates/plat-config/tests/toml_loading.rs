use figment::Jail;
use plat_config::PlatConfig;
use pretty_assertions::assert_eq;

#[test]
fn project_local_toml_is_read() {
    Jail::expect_with(|jail| {
        jail.create_dir(".plat")?;
        jail.create_file(
            ".plat/config.toml",
            r#"
[provider]
api_key = "key_from_toml"
timeout_secs = 30

[map]
fit_padding_px = 64
"#,
        )?;

        let config: PlatConfig = PlatConfig::figment().extract()?;
        assert_eq!(config.provider.api_key, "key_from_toml");
        assert_eq!(config.provider.timeout_secs, 30);
        assert_eq!(config.map.fit_padding_px, 64);
        // Untouched sections keep their defaults.
        assert_eq!(config.provider.page_size, 50);
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".plat")?;
        jail.create_file(".plat/config.toml", "[provider]\napi_key = \"from_toml\"\n")?;
        jail.set_env("PLAT_PROVIDER__API_KEY", "from_env");

        let config: PlatConfig = PlatConfig::figment().extract()?;
        assert_eq!(config.provider.api_key, "from_env");
        Ok(())
    });
}
