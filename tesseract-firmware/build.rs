//! Build script for tesseract-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates visualizer.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Known sections and their keys; `true` marks integer-only keys
const SCHEMA: &[(&str, &[(&str, bool)])] = &[
    ("camera", &[("distance", false)]),
    (
        "viewport",
        &[
            ("center_x", true),
            ("center_y", true),
            ("scale", false),
            ("width", true),
            ("height", true),
        ],
    ),
    (
        "particles",
        &[
            ("spawn_extent", false),
            ("respawn_extent", false),
            ("max_speed", false),
            ("life_min", true),
            ("life_max", true),
            ("bound", false),
        ],
    ),
    (
        "animation",
        &[("angle_step", false), ("frame_interval_ms", true)],
    ),
    (
        "glitch",
        &[("probability", false), ("segments", true), ("max_length", true)],
    ),
    ("overlay", &[("fps_x", true), ("fps_y", true)]),
];

/// Must match MAX_GLITCH_SEGMENTS in tesseract-core
const MAX_GLITCH_SEGMENTS: i64 = 16;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Inner width of the error box
const BOX_WIDTH: usize = 66;

/// Validate visualizer.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=visualizer.toml");

    let path = Path::new("visualizer.toml");
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => fail(
            "cannot read tesseract-firmware/visualizer.toml",
            &[
                e.to_string(),
                "The hypercube settings are compiled into the image.".to_string(),
                "Restore the file; an empty one selects the defaults.".to_string(),
            ],
        ),
    };

    let config: toml::Value = match toml::from_str(&source) {
        Ok(value) => value,
        Err(e) => fail(
            "visualizer.toml is not valid TOML",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    for (title, errors) in [
        ("malformed setting in visualizer.toml", validate_schema(&config)),
        ("out-of-range setting in visualizer.toml", validate_ranges(&config)),
    ] {
        if !errors.is_empty() {
            fail(title, &errors);
        }
    }

    println!("cargo:warning=visualizer.toml validated successfully");
}

/// Abort the build with a framed message
fn fail(title: &str, lines: &[String]) -> ! {
    let rule = "═".repeat(BOX_WIDTH);
    let header = boxed_line(&format!("tesseract: {title}"));
    let mut out = format!("\n╔{rule}╗\n{header}\n╠{rule}╣\n");
    for line in lines {
        out.push_str(&boxed_line(line));
        out.push('\n');
    }
    out.push_str(&format!("╚{rule}╝\n"));
    panic!("{}", out);
}

/// Pad or cut one line to the box width
fn boxed_line(text: &str) -> String {
    let inner = BOX_WIDTH - 4;
    let text: String = if text.chars().count() > inner {
        text.chars().take(inner - 3).chain("...".chars()).collect()
    } else {
        text.to_string()
    };
    format!("║  {:<inner$}  ║", text)
}

/// Check that every section and key is known and has a numeric value
fn validate_schema(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return vec!["top level must be a table".to_string()],
    };

    for (section, value) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let table = match value.as_table() {
            Some(t) => t,
            None => {
                errors.push(format!("[{}] must be a table", section));
                continue;
            }
        };

        for (key, value) in table {
            match keys.iter().find(|(name, _)| *name == key.as_str()) {
                None => errors.push(format!("[{}] unknown key '{}'", section, key)),
                Some((_, true)) if !value.is_integer() => {
                    errors.push(format!("[{}] '{}' must be an integer", section, key))
                }
                Some((_, false)) if !value.is_integer() && !value.is_float() => {
                    errors.push(format!("[{}] '{}' must be a number", section, key))
                }
                Some(_) => {}
            }
        }
    }

    errors
}

fn number(config: &toml::Value, section: &str, key: &str) -> Option<f64> {
    match config.get(section)?.get(key)? {
        toml::Value::Integer(i) => Some(*i as f64),
        toml::Value::Float(f) => Some(*f),
        _ => None,
    }
}

/// Check value ranges for keys that are present
fn validate_ranges(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();
    let get = |section: &str, key: &str| number(config, section, key);

    if let Some(d) = get("camera", "distance") {
        if d <= 0.0 {
            errors.push("[camera] distance must be positive".to_string());
        }
    }

    if let Some(s) = get("viewport", "scale") {
        if s <= 0.0 {
            errors.push("[viewport] scale must be positive".to_string());
        }
    }
    for key in ["width", "height"] {
        if let Some(v) = get("viewport", key) {
            if v < 1.0 {
                errors.push(format!("[viewport] {} must be at least 1", key));
            }
        }
    }

    for key in ["spawn_extent", "respawn_extent"] {
        if let Some(v) = get("particles", key) {
            if v <= 0.0 {
                errors.push(format!("[particles] {} must be positive", key));
            }
        }
    }
    let respawn = get("particles", "respawn_extent").unwrap_or(1.0);
    let bound = get("particles", "bound").unwrap_or(3.0);
    if bound <= respawn {
        errors.push("[particles] bound must exceed respawn_extent".to_string());
    }
    let life_min = get("particles", "life_min").unwrap_or(50.0);
    let life_max = get("particles", "life_max").unwrap_or(200.0);
    if life_min < 1.0 {
        errors.push("[particles] life_min must be at least 1".to_string());
    }
    if life_max < life_min {
        errors.push("[particles] life_max must not be below life_min".to_string());
    }

    if let Some(ms) = get("animation", "frame_interval_ms") {
        if ms < 1.0 {
            errors.push("[animation] frame_interval_ms must be at least 1".to_string());
        }
    }

    if let Some(p) = get("glitch", "probability") {
        if !(0.0..=1.0).contains(&p) {
            errors.push("[glitch] probability must be 0.0-1.0".to_string());
        }
    }
    if let Some(n) = get("glitch", "segments") {
        if n < 0.0 || n > MAX_GLITCH_SEGMENTS as f64 {
            errors.push(format!(
                "[glitch] segments must be 0-{}",
                MAX_GLITCH_SEGMENTS
            ));
        }
    }
    if let Some(n) = get("glitch", "max_length") {
        if !(1.0..=255.0).contains(&n) {
            errors.push("[glitch] max_length must be 1-255".to_string());
        }
    }

    errors
}
