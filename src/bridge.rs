//! JNI exports
//!
//! Everything the JVM resolves by name lives here. Exports never unwind or
//! return `Result` across the boundary: on failure they log and return `null`,
//! leaving the JVM's pending exception (if any) to surface in the caller.

use std::ffi::c_void;
use std::ptr;

use jni::objects::{JObject, JString};
use jni::strings::JNIString;
use jni::sys::{jint, jstring, JNI_ERR, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};

use crate::config::{BindingConfig, BridgeConfig};
use crate::error::{Error, Result};
use crate::greeting::GreetingValue;
use crate::logging;
use crate::symbol::NativeMethod;

/// An exported native method together with the managed declaration it serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportedSymbol {
    pub name: &'static str,
    pub package: &'static str,
    pub class: &'static str,
    pub method: &'static str,
}

impl ExportedSymbol {
    pub fn native_method(&self) -> Result<NativeMethod> {
        NativeMethod::new(self.package, self.class, self.method)
    }

    /// Fail unless `name` is exactly what the JVM will look up
    pub fn verify(&self) -> Result<()> {
        let expected = self.native_method()?.symbol();
        if expected != self.name {
            return Err(Error::SymbolMismatch {
                expected,
                exported: self.name.to_string(),
            });
        }
        Ok(())
    }
}

/// Declare JNI exports.
///
/// The symbol literal of each entry is both the function's `export_name` and
/// its row in `EXPORTED_SYMBOLS`, so the table cannot drift from what the
/// library actually exports. `verify_exports` then checks the literal against
/// the name derived from the managed declaration.
macro_rules! jni_exports {
    ($(
        #[jni(
            $symbol:literal,
            package = $package:literal,
            class = $class:literal,
            method = $method:literal
        )]
        $(#[doc = $doc:literal])*
        fn $name:ident<$lt:lifetime>($($params:tt)*) -> $ret:ty $body:block
    )+) => {
        $(
            $(#[doc = $doc])*
            #[export_name = $symbol]
            pub extern "system" fn $name<$lt>($($params)*) -> $ret $body
        )+

        /// Every statically bound native method in this library
        pub const EXPORTED_SYMBOLS: &[ExportedSymbol] = &[$(
            ExportedSymbol {
                name: $symbol,
                package: $package,
                class: $class,
                method: $method,
            },
        )+];
    };
}

pub fn verify_exports() -> Result<()> {
    EXPORTED_SYMBOLS.iter().try_for_each(ExportedSymbol::verify)
}

/// Find the export that satisfies `binding`.
///
/// A declaration with no matching export is what the JVM reports as
/// `UnsatisfiedLinkError`; the error carries the closest export for comparison.
pub fn resolve_binding(binding: &BindingConfig) -> Result<&'static ExportedSymbol> {
    let expected = binding.native_method()?.symbol();

    EXPORTED_SYMBOLS
        .iter()
        .find(|export| export.name == expected)
        .ok_or_else(|| Error::SymbolMismatch {
            exported: EXPORTED_SYMBOLS
                .iter()
                .find(|export| export.method == binding.method)
                .or_else(|| EXPORTED_SYMBOLS.first())
                .map(|export| export.name.to_string())
                .unwrap_or_default(),
            expected,
        })
}

/// Allocate the greeting as a new `java.lang.String` owned by the caller.
///
/// The null-terminated modified-UTF-8 buffer handed to `NewStringUTF` is
/// released when this returns; the local reference is not.
pub fn new_greeting<'local>(env: &mut JNIEnv<'local>) -> Result<JString<'local>> {
    let greeting = GreetingValue::new();
    let native = JNIString::from(greeting.as_str());
    Ok(env.new_string(native)?)
}

jni_exports! {
    #[jni(
        "Java_com_example_esp32_1ble_1interface_1android_MainActivity_stringFromJNI",
        package = "com.example.esp32_ble_interface_android",
        class = "MainActivity",
        method = "stringFromJNI"
    )]
    /// `MainActivity.stringFromJNI()`
    fn string_from_jni<'local>(mut env: JNIEnv<'local>, _this: JObject<'local>) -> jstring {
        match new_greeting(&mut env) {
            Ok(greeting) => greeting.into_raw(),
            Err(e) => {
                log::error!("stringFromJNI: could not allocate greeting: {}", e);
                ptr::null_mut()
            }
        }
    }
}

/// Called by the JVM from `System.loadLibrary`
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn JNI_OnLoad(vm: JavaVM, _reserved: *mut c_void) -> jint {
    let (config, load_error) = match BridgeConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (BridgeConfig::default(), Some(e)),
    };

    // Fails only on an invalid level, which load() already rejected
    let _ = logging::init(&config.logging);

    if let Some(e) = load_error {
        log::warn!("Falling back to default bridge configuration: {}", e);
    }

    match vm.get_env().and_then(|env| env.get_version()) {
        Ok(version) => {
            log::info!(
                "Native greeting bridge loaded ({} exports, JNI {:?})",
                EXPORTED_SYMBOLS.len(),
                version
            );
            JNI_VERSION_1_6
        }
        Err(e) => {
            log::error!("JNI_OnLoad: no usable JNIEnv: {}", e);
            JNI_ERR
        }
    }
}
