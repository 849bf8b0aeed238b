//! Generates `include/env.h` for the firmware build from `WIFI_SSID` and
//! `WIFI_PASSWORD`, taken from the process environment and the nearest `.env`.

use std::path::Path;

pub mod config;
pub mod constants;
pub mod credentials;
pub mod header;

pub use config::{EnvConfig, Precedence};
pub use credentials::WifiCredentials;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::Error),
    #[error(transparent)]
    Credentials(#[from] credentials::Error),
    #[error(transparent)]
    Header(#[from] header::Error),
}

/// Writes the header for `config` to `output`.
///
/// Both credentials are resolved before the file is touched: on error the
/// previous header, if any, is left as it was.
pub fn generate(config: &EnvConfig, output: &Path) -> Result<(), Error> {
    let credentials = WifiCredentials::from_config(config)?;
    log::debug!("Resolved credentials for SSID {:?}", credentials.ssid);

    header::write(output, &header::render(&credentials))?;
    Ok(())
}
