use anyhow::{Context, Result};

/// Environment variable consulted by `EnvKeyProvider::default()`
pub const ACCESS_KEY_ENV: &str = "RACINGLINE_ACCESS_KEY";

/// Source of the data bin access key.
pub trait KeyProvider: Send + Sync {
    fn access_key(&self) -> Result<String>;
}

/// A fixed key, for tests and for keys passed on the command line.
pub struct StaticKey(String);

impl StaticKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl KeyProvider for StaticKey {
    fn access_key(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Reads the key from an environment variable on every refresh.
pub struct EnvKeyProvider {
    var: String,
}

impl EnvKeyProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn is_set(&self) -> bool {
        std::env::var(&self.var).map(|v| !v.is_empty()).unwrap_or(false)
    }
}

impl Default for EnvKeyProvider {
    fn default() -> Self {
        Self::new(ACCESS_KEY_ENV)
    }
}

impl KeyProvider for EnvKeyProvider {
    fn access_key(&self) -> Result<String> {
        let key = std::env::var(&self.var)
            .with_context(|| format!("Environment variable {} is not set", self.var))?;
        if key.is_empty() {
            anyhow::bail!("Environment variable {} is empty", self.var);
        }
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_key() {
        let provider = StaticKey::new("abc");
        assert_eq!(provider.access_key().unwrap(), "abc");
    }

    #[test]
    fn test_env_key_provider_missing_var() {
        let provider = EnvKeyProvider::new("RACINGLINE_TEST_KEY_THAT_IS_NEVER_SET");
        assert!(!provider.is_set());
        let err = provider.access_key().unwrap_err();
        assert!(err.to_string().contains("RACINGLINE_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
