/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` (field names are matched against
/// upper-cased env var names) and call `Config::from_env()` at startup.
/// Use `#[serde(default = "...")]` for optional settings.
///
/// # Panics
///
/// Panics if a required env var is missing or cannot be deserialized.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Self {
        match envy::from_env::<Self>() {
            Ok(config) => config,
            Err(e) => panic!("failed to load config from environment: {e}"),
        }
    }

    /// Load from an explicit key/value iterator. Used by tests.
    fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
