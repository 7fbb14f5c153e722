//! Build script for skyticker-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Hard limit on the ticker message length (characters)
const MAX_CAPACITY: i64 = 511;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds device.toml as its fallback configuration.  ║\n\
            ║  Please create one in the skyticker-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
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

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_required_sections(&config);

    validate_choices(&config);
    validate_refresh(&config);
    validate_ticker(&config);
    validate_display(&config);

    println!("cargo:warning=device.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with a boxed list of errors, if any
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Integer at `[section] key`, if present
fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// String at `[section] key`, if present
fn string<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a str> {
    config.get(section)?.get(key)?.as_str()
}

/// Validate that required sections exist
fn validate_required_sections(config: &toml::Value) {
    let mut errors = Vec::new();

    for section in ["weather", "network", "time", "refresh", "ticker", "display"] {
        match config.get(section) {
            Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("Missing [{}] section", section)),
        }
    }

    report("Missing required sections in device.toml", &errors);
}

/// Validate enumerated string values
fn validate_choices(config: &toml::Value) {
    let mut errors = Vec::new();

    if let Some(units) = string(config, "weather", "units") {
        if !["metric", "imperial"].contains(&units) {
            errors.push("[weather] units must be 'metric' or 'imperial'".to_string());
        }
    }

    if let Some(dst) = string(config, "time", "dst") {
        if !["none", "north_america", "europe"].contains(&dst) {
            errors.push("[time] dst must be 'none', 'north_america' or 'europe'".to_string());
        }
    }

    if let Some(offset) = int(config, "time", "utc_offset_s") {
        if !(-14 * 3600..=14 * 3600).contains(&offset) {
            errors.push("[time] utc_offset_s must be within +/-50400".to_string());
        }
    }

    report("Invalid setting in device.toml", &errors);
}

/// Validate refresh timing
fn validate_refresh(config: &toml::Value) {
    let mut errors = Vec::new();

    for key in [
        "interval_ms",
        "resync_every",
        "max_attempts",
        "fetch_timeout_ms",
        "resync_attempts",
        "sync_timeout_ms",
    ] {
        if int(config, "refresh", key) == Some(0) {
            errors.push(format!("[refresh] {} must be non-zero", key));
        }
    }

    for key in ["resync_every", "max_attempts", "resync_attempts"] {
        if let Some(value) = int(config, "refresh", key) {
            if !(0..=255).contains(&value) {
                errors.push(format!("[refresh] {} must be 0-255", key));
            }
        }
    }

    // Same bound the firmware enforces at boot: a cycle that fails every
    // attempt must end before the next one is due.
    let setting = |key: &str, default: i64| int(config, "refresh", key).unwrap_or(default);
    let attempts = setting("max_attempts", 3);
    let worst_case = attempts * setting("fetch_timeout_ms", 10_000)
        + (attempts - 1).max(0) * setting("backoff_ms", 5_000)
        + setting("resync_attempts", 10) * setting("sync_timeout_ms", 1_000);
    let interval = setting("interval_ms", 180_000);
    if worst_case >= interval {
        errors.push(format!(
            "[refresh] worst-case cycle of {} ms must be shorter than interval_ms ({})",
            worst_case, interval
        ));
    }

    report("Invalid refresh configuration", &errors);
}

/// Validate ticker geometry
fn validate_ticker(config: &toml::Value) {
    let mut errors = Vec::new();

    let step = int(config, "ticker", "step").unwrap_or(2);
    let viewport = int(config, "ticker", "viewport_width").unwrap_or(164);
    let spacing = int(config, "ticker", "spacing").unwrap_or(170);

    if int(config, "ticker", "tick_ms") == Some(0) {
        errors.push("[ticker] tick_ms must be non-zero".to_string());
    }
    if step == 0 {
        errors.push("[ticker] step must be non-zero".to_string());
    }
    if let Some(capacity) = int(config, "ticker", "capacity") {
        if capacity == 0 || capacity > MAX_CAPACITY {
            errors.push(format!("[ticker] capacity must be 1-{}", MAX_CAPACITY));
        }
    }
    if spacing < viewport + step {
        errors.push(format!(
            "[ticker] spacing must be >= viewport_width + step ({})",
            viewport + step
        ));
    }

    report("Invalid ticker configuration", &errors);
}

/// Validate backlight bounds
fn validate_display(config: &toml::Value) {
    let mut errors = Vec::new();

    let level = int(config, "display", "brightness").unwrap_or(215);
    let min = int(config, "display", "min_brightness").unwrap_or(10);
    let max = int(config, "display", "max_brightness").unwrap_or(255);

    for (key, value) in [("brightness", level), ("min_brightness", min), ("max_brightness", max)] {
        if !(0..=255).contains(&value) {
            errors.push(format!("[display] {} must be 0-255", key));
        }
    }
    if min > max {
        errors.push("[display] min_brightness must not exceed max_brightness".to_string());
    } else if !(min..=max).contains(&level) {
        errors.push("[display] brightness must be within min/max".to_string());
    }

    report("Invalid display configuration", &errors);
}
