use thiserror::Error;

const KEYRING_SERVICE: &str = "com.rehber.client";
pub const KEYRING_USER_ACCESS_TOKEN: &str = "access_token";
pub const KEYRING_USER_REFRESH_TOKEN: &str = "refresh_token";

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("OS keychain/secret service is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write secret: {0}")]
    Write(String),
}

/// One keyring entry for the Rehber client.
#[derive(Debug, Clone)]
pub struct SecretManager {
    user: &'static str,
}

impl SecretManager {
    pub fn new(user: &'static str) -> Self {
        Self { user }
    }

    fn entry(&self) -> Result<keyring::Entry, keyring::Error> {
        keyring::Entry::new(KEYRING_SERVICE, self.user)
    }

    pub fn is_available(&self) -> bool {
        let Ok(entry) = self.entry() else {
            return false;
        };

        match entry.get_password() {
            Ok(_) => true,
            Err(keyring::Error::NoEntry) => true,
            Err(keyring::Error::BadEncoding(_)) => true,
            Err(keyring::Error::Ambiguous(_)) => true,
            Err(keyring::Error::NoStorageAccess(_)) => false,
            Err(keyring::Error::PlatformFailure(_)) => false,
            Err(_) => false,
        }
    }

    pub fn get(&self) -> Result<Option<String>, SecretError> {
        let entry = self
            .entry()
            .map_err(|e| SecretError::Unavailable(e.to_string()))?;

        match entry.get_password() {
            Ok(value) => {
                let trimmed = value.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e @ keyring::Error::NoStorageAccess(_)) => Err(SecretError::Unavailable(e.to_string())),
            Err(e @ keyring::Error::PlatformFailure(_)) => Err(SecretError::Unavailable(e.to_string())),
            Err(_) => Ok(None),
        }
    }

    pub fn set(&self, value: &str) -> Result<(), SecretError> {
        let entry = self
            .entry()
            .map_err(|e| SecretError::Unavailable(e.to_string()))?;
        entry
            .set_password(value)
            .map_err(|e| SecretError::Write(e.to_string()))
    }

    pub fn delete(&self) {
        if let Ok(entry) = self.entry() {
            let _ = entry.delete_credential();
        }
    }
}
