//! Native library for the ESP32 BLE interface Android app
//!
//! The app declares
//!
//! ```java
//! package com.example.esp32_ble_interface_android;
//! class MainActivity { public native String stringFromJNI(); }
//! ```
//!
//! and loads this library with
//! `System.loadLibrary("esp32_ble_interface_android")`. The call returns a
//! fresh `java.lang.String` holding `Hello from C++`.
//!
//! - greeting: the value handed across the boundary
//! - symbol: JNI name mangling, so export names are derived rather than typed
//! - bridge: the `#[no_mangle]` exports and their symbol table
//! - config / logging: embedded configuration and platform logger setup

pub mod bridge;
pub mod config;
pub mod error;
pub mod greeting;
pub mod logging;
pub mod symbol;

pub use bridge::{new_greeting, resolve_binding, verify_exports, ExportedSymbol, EXPORTED_SYMBOLS};
pub use config::{BindingConfig, BridgeConfig, LoggingConfig};
pub use error::{Error, Result};
pub use greeting::{GreetingValue, GREETING};
pub use symbol::{mangle, NativeMethod};
