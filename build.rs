use std::env;

fn main() {
    // android_logger writes through liblog
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() == "android" {
        println!("cargo:rustc-link-lib=log");
    }

    // The default configuration is embedded with include_str!
    println!("cargo:rerun-if-changed=bridge.toml");
    println!("cargo:rerun-if-changed=build.rs");
}
