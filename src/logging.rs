//! Logger installation
//!
//! The library only emits through the `log` facade. Which backend receives
//! the records depends on the platform: logcat via `android_logger` inside
//! the app, `env_logger` (honouring `RUST_LOG`) everywhere else.
//! Installing twice is a no-op.

use crate::config::LoggingConfig;
use crate::error::Result;

#[cfg(target_os = "android")]
pub fn init(config: &LoggingConfig) -> Result<()> {
    let level = config.level_filter()?;

    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(level)
            .with_tag(config.tag.as_str()),
    );

    Ok(())
}

#[cfg(not(target_os = "android"))]
pub fn init(config: &LoggingConfig) -> Result<()> {
    let level = config.level_filter()?;

    // A logger installed earlier (tests, an embedding host) wins
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();

    Ok(())
}
