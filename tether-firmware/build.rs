//! Build script for tether-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Must match `tether_core::config::MAX_USERNAME_LEN`
const MAX_USERNAME_LEN: usize = 32;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml at compile time
///
/// The firmware parses the same file at boot and falls back to defaults on
/// error; failing here keeps a broken file from ever being flashed.
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a device.toml configuration file.         ║\n\
            ║  Please create one in the tether-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: device.toml is not valid TOML                            ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n\
                {}\n",
                e
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_device(&config, &mut errors);
    validate_indicator(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid device configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Only `[device]` and `[indicator]` tables are allowed
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };
    for (name, value) in table {
        match (name.as_str(), value) {
            ("device" | "indicator", toml::Value::Table(_)) => {}
            ("device" | "indicator", _) => errors.push(format!("[{}] must be a table", name)),
            _ => errors.push(format!("unknown section or key '{}'", name)),
        }
    }
}

fn validate_device(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(device) = config.get("device").and_then(|d| d.as_table()) else {
        return;
    };

    for key in device.keys() {
        if !matches!(key.as_str(), "username" | "baud_rate" | "telemetry_interval_ms") {
            errors.push(format!("[device] unknown key '{}'", key));
        }
    }

    match device.get("username") {
        Some(toml::Value::String(name)) => {
            if name.is_empty() {
                errors.push("[device] username cannot be empty".to_string());
            } else if name.trim() != name {
                errors.push("[device] username has leading/trailing whitespace".to_string());
            } else if name.contains(['\n', '\r']) {
                errors.push("[device] username cannot contain line breaks".to_string());
            } else if name.len() > MAX_USERNAME_LEN {
                errors.push(format!(
                    "[device] username longer than {} bytes",
                    MAX_USERNAME_LEN
                ));
            }
        }
        Some(_) => errors.push("[device] username must be a string".to_string()),
        None => {}
    }

    check_positive_u32(device, "device", "baud_rate", errors);
    check_positive_u32(device, "device", "telemetry_interval_ms", errors);
}

fn validate_indicator(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(indicator) = config.get("indicator").and_then(|i| i.as_table()) else {
        return;
    };

    for key in indicator.keys() {
        if !matches!(key.as_str(), "pulses" | "phase_ms" | "inverted") {
            errors.push(format!("[indicator] unknown key '{}'", key));
        }
    }

    match indicator.get("pulses") {
        Some(toml::Value::Integer(n)) if !(1..=255).contains(n) => {
            errors.push("[indicator] pulses must be 1-255".to_string());
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push("[indicator] pulses must be an integer".to_string()),
    }

    check_positive_u32(indicator, "indicator", "phase_ms", errors);

    if let Some(value) = indicator.get("inverted") {
        if !value.is_bool() {
            errors.push("[indicator] inverted must be true or false".to_string());
        }
    }
}

fn check_positive_u32(table: &toml::Table, section: &str, key: &str, errors: &mut Vec<String>) {
    match table.get(key) {
        Some(toml::Value::Integer(n)) if *n <= 0 || *n > u32::MAX as i64 => {
            errors.push(format!("[{}] {} must be 1-{}", section, key, u32::MAX));
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}
