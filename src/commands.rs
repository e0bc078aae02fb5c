//! Command implementations for the greeting-bridge CLI

use log::{debug, info};

use esp32_ble_interface_android::{
    resolve_binding, verify_exports, BridgeConfig, GreetingValue, NativeMethod, Result,
    EXPORTED_SYMBOLS,
};

pub fn greet_command() -> Result<String> {
    let greeting = GreetingValue::new();
    let native = greeting.to_c_string()?;

    Ok(format!(
        "{}\n{} bytes: {}",
        greeting,
        greeting.as_bytes().len(),
        hex::encode(native.as_bytes_with_nul())
    ))
}

pub fn mangle_command(class: &str, method: &str, signature: Option<&str>) -> Result<String> {
    let mut native = NativeMethod::from_qualified(class, method)?;
    if let Some(signature) = signature {
        native = native.with_signature(signature)?;
    }

    debug!("Mangling {}", native);
    Ok(native.symbol())
}

/// Fails if any export drifted from its derived name or the configured
/// declaration has no export
pub fn check_command(config: &BridgeConfig) -> Result<String> {
    verify_exports()?;
    info!("{} export(s) match their derived names", EXPORTED_SYMBOLS.len());

    let export = resolve_binding(&config.binding)?;
    let method = export.native_method()?;

    Ok(format!("OK {} -> {}", method, export.name))
}

pub fn config_command(config: &BridgeConfig) -> Result<String> {
    config.to_toml()
}
