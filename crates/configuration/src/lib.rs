// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::Settings;

/// Loads the application configuration from the process environment.
///
/// This function is the primary entry point for this crate. It seeds the
/// builder with the documented defaults, overlays the environment variables,
/// and deserializes the result into our strongly-typed `Settings` struct.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_from(config::Environment::default())
}

fn load_from(env: config::Environment) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("port", 3000_i64)?
        .set_default("app_version", "1.0.0")?
        .set_default("db_host", "localhost")?
        .set_default("db_port", 5432_i64)?
        .set_default("db_name", "appdb")?
        .set_default("db_user", "dbadmin")?
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;

    fn load_from_map(vars: &[(&str, &str)]) -> Settings {
        let mut map = Map::new();
        for (key, value) in vars {
            map.insert((*key).to_string(), (*value).to_string());
        }
        // `.source(Some(map))` replaces the process environment with the
        // given map, which keeps these tests hermetic.
        load_from(config::Environment::default().source(Some(map)))
            .expect("settings should load")
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = load_from_map(&[]);

        assert_eq!(settings.port, 3000);
        assert_eq!(settings.app_version, "1.0.0");
        assert_eq!(settings.db_host, "localhost");
        assert_eq!(settings.db_port, 5432);
        assert_eq!(settings.db_name, "appdb");
        assert_eq!(settings.db_user, "dbadmin");
        assert_eq!(settings.db_password, None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = load_from_map(&[
            ("PORT", "8080"),
            ("APP_VERSION", "2.3.1"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_NAME", "warehouse"),
            ("DB_USER", "svc"),
            ("DB_PASSWORD", "hunter2"),
        ]);

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.app_version, "2.3.1");
        assert_eq!(settings.db_host, "db.internal");
        assert_eq!(settings.db_port, 6543);
        assert_eq!(settings.db_name, "warehouse");
        assert_eq!(settings.db_user, "svc");
        assert_eq!(settings.db_password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn bind_addr_listens_on_all_interfaces() {
        let settings = load_from_map(&[("PORT", "9000")]);

        assert_eq!(settings.bind_addr().to_string(), "0.0.0.0:9000");
    }
}
