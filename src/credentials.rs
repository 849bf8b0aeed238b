use crate::config::EnvConfig;
use crate::constants::{WIFI_PASSWORD, WIFI_SSID};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("required variable {0} is not set")]
    Unset(&'static str),
    #[error("required variable {0} is empty")]
    Empty(&'static str),
    #[error("required variable {0} is not valid UTF-8")]
    NotUnicode(&'static str),
}

/// Wi-Fi credentials compiled into the firmware.
///
/// `Debug` is implemented by hand so the password never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    // Wi-Fi SSID to connect to
    pub ssid: String,

    // Wi-Fi pre-shared key (password)
    pub password: String,
}

impl WifiCredentials {
    /// Resolves both credentials before anything is written. `WIFI_SSID` is
    /// checked first, so the same incomplete configuration always fails on
    /// the same key.
    pub fn from_config(config: &EnvConfig) -> Result<Self, Error> {
        let ssid = required(config, WIFI_SSID)?;
        let password = required(config, WIFI_PASSWORD)?;

        Ok(Self {
            ssid: ssid.to_owned(),
            password: password.to_owned(),
        })
    }
}

impl core::fmt::Debug for WifiCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn required<'a>(config: &'a EnvConfig, key: &'static str) -> Result<&'a str, Error> {
    match config.get(key) {
        None if config.is_not_unicode(key) => Err(Error::NotUnicode(key)),
        None => Err(Error::Unset(key)),
        Some("") => Err(Error::Empty(key)),
        Some(value) => Ok(value),
    }
}
