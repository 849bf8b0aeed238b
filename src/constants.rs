/// Current generator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the environment-definition file searched for from the working directory upwards
pub const ENV_FILE_NAME: &str = ".env";

/// Relative path of the generated header consumed by the firmware build
pub const OUTPUT_PATH: &str = "include/env.h";

/// Wi-Fi network name macro and environment variable
pub const WIFI_SSID: &str = "WIFI_SSID";
/// Wi-Fi pre-shared key macro and environment variable
pub const WIFI_PASSWORD: &str = "WIFI_PASSWORD";
