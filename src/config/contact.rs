//! `[contact]` section: messaging hand-off target.
//!
//! ```toml
//! [contact]
//! phone = "5492914441533"   # digits only, with country prefix
//! base_url = "https://wa.me"
//! ```

use serde::{Deserialize, Serialize};

use super::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub phone: String,
    pub base_url: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone: "5492914441533".into(),
            base_url: "https://wa.me".into(),
        }
    }
}

impl ContactConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.phone.is_empty() || !self.phone.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::validation(
                "contact.phone",
                format!("`{}` must contain only digits", self.phone),
            ));
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(ConfigError::validation(
                "contact.base_url",
                format!("`{}` is not an absolute URL", self.base_url),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ContactConfig::default().validate().is_ok());
    }

    #[test]
    fn test_phone_must_be_digits() {
        for phone in ["", "+54 9 291", "549-291"] {
            let config = ContactConfig {
                phone: phone.into(),
                ..ContactConfig::default()
            };
            assert!(config.validate().is_err(), "accepted {phone:?}");
        }
    }

    #[test]
    fn test_base_url_must_be_absolute() {
        let config = ContactConfig {
            base_url: "wa.me".into(),
            ..ContactConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
