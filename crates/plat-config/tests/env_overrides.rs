use figment::Jail;
use plat_config::PlatConfig;
use pretty_assertions::assert_eq;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("PLAT_PROVIDER__API_KEY", "key_from_env");
        jail.set_env("PLAT_PROVIDER__PAGE_SIZE", "25");
        jail.set_env("PLAT_MAP__CLICK_ZOOM", "15.5");

        let config: PlatConfig = PlatConfig::figment().extract()?;
        assert_eq!(config.provider.api_key, "key_from_env");
        assert_eq!(config.provider.page_size, 25);
        assert!((config.map.click_zoom - 15.5).abs() < f64::EPSILON);
        assert!(config.provider.is_configured());
        Ok(())
    });
}

#[test]
fn nested_separator_is_double_underscore() {
    Jail::expect_with(|jail| {
        jail.set_env("PLAT_GEOCODER__USER_AGENT", "plat-tests/1.0");

        let config: PlatConfig = PlatConfig::figment().extract()?;
        assert_eq!(config.geocoder.user_agent, "plat-tests/1.0");
        Ok(())
    });
}
