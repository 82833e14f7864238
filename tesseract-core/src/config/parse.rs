//! Minimal TOML parser for visualizer configuration
//!
//! Handles only the subset used by `visualizer.toml`. It does NOT
//! support the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (float, integer)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! Keys that are not present keep their default value. The result is
//! validated before it is returned.

use super::types::{ConfigError, VisualizerConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not recognised in its section
    UnknownKey,
    /// Value could not be parsed
    InvalidValue,
    /// Line is neither a section header nor `key = value`
    InvalidLine,
    /// Parsed values failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Camera,
    Viewport,
    Particles,
    Animation,
    Glitch,
    Overlay,
}

/// Parse TOML configuration on top of the defaults
pub fn parse_config(input: &str) -> Result<VisualizerConfig, ParseError> {
    let mut config = VisualizerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line);
            if !header.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&header[1..header.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "camera" => Ok(Section::Camera),
        "viewport" => Ok(Section::Viewport),
        "particles" => Ok(Section::Particles),
        "animation" => Ok(Section::Animation),
        "glitch" => Ok(Section::Glitch),
        "overlay" => Ok(Section::Overlay),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing comment unless the `#` sits inside a string
fn strip_comment(text: &str) -> &str {
    match text.find('#') {
        Some(hash_pos) if text[..hash_pos].matches('"').count() % 2 == 0 => {
            text[..hash_pos].trim()
        }
        _ => text,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_float(value: &str) -> Result<f32, ParseError> {
    let parsed: f32 = value.parse().map_err(|_| ParseError::InvalidValue)?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(ParseError::InvalidValue)
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut VisualizerConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Camera, "distance") => config.camera_distance = parse_float(value)?,

        (Section::Viewport, "center_x") => config.viewport.center_x = parse_int(value)?,
        (Section::Viewport, "center_y") => config.viewport.center_y = parse_int(value)?,
        (Section::Viewport, "scale") => config.viewport.scale = parse_float(value)?,
        (Section::Viewport, "width") => config.viewport.width = parse_int(value)?,
        (Section::Viewport, "height") => config.viewport.height = parse_int(value)?,

        (Section::Particles, "spawn_extent") => {
            config.particles.spawn_extent = parse_float(value)?
        }
        (Section::Particles, "respawn_extent") => {
            config.particles.respawn_extent = parse_float(value)?
        }
        (Section::Particles, "max_speed") => config.particles.max_speed = parse_float(value)?,
        (Section::Particles, "life_min") => config.particles.life_min = parse_int(value)?,
        (Section::Particles, "life_max") => config.particles.life_max = parse_int(value)?,
        (Section::Particles, "bound") => config.particles.bound = parse_float(value)?,

        (Section::Animation, "angle_step") => config.angle_step = parse_float(value)?,
        (Section::Animation, "frame_interval_ms") => {
            config.frame_interval_ms = parse_int(value)?
        }

        (Section::Glitch, "probability") => config.glitch.probability = parse_float(value)?,
        (Section::Glitch, "segments") => config.glitch.segments = parse_int(value)?,
        (Section::Glitch, "max_length") => config.glitch.max_length = parse_int(value)?,

        (Section::Overlay, "fps_x") => config.fps_position.0 = parse_int(value)?,
        (Section::Overlay, "fps_y") => config.fps_position.1 = parse_int(value)?,

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config(""), Ok(VisualizerConfig::default()));
        assert_eq!(
            parse_config("# just a comment\n\n"),
            Ok(VisualizerConfig::default())
        );
    }

    #[test]
    fn test_parse_full_config() {
        let input = r#"
# Hypercube visualizer
[camera]
distance = 4.5

[viewport]
center_x = 60
center_y = 30   # slightly up
scale = 25

[particles]
life_min = 20
life_max = 80
bound = 2.5

[animation]
angle_step = 0.03
frame_interval_ms = 16

[glitch]
probability = 0.1
segments = 4
max_length = 3

[overlay]
fps_x = 2
fps_y = 54
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.camera_distance, 4.5);
        assert_eq!(config.viewport.center_x, 60);
        assert_eq!(config.viewport.center_y, 30);
        assert_eq!(config.viewport.scale, 25.0);
        assert_eq!(config.viewport.width, 128);
        assert_eq!(config.particles.life_min, 20);
        assert_eq!(config.particles.life_max, 80);
        assert_eq!(config.particles.bound, 2.5);
        assert_eq!(config.particles.respawn_extent, 1.0);
        assert_eq!(config.angle_step, 0.03);
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.glitch.probability, 0.1);
        assert_eq!(config.glitch.segments, 4);
        assert_eq!(config.glitch.max_length, 3);
        assert_eq!(config.fps_position, (2, 54));
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[lighting]\n"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(parse_config("[camera\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_config("[camera]\nfov = 90\n"),
            Err(ParseError::UnknownKey)
        );
        // Keys outside any section are not accepted either
        assert_eq!(parse_config("distance = 3\n"), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_invalid_value() {
        assert_eq!(
            parse_config("[camera]\ndistance = far\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[viewport]\nwidth = -1\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[camera]\ndistance = inf\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_malformed_line() {
        assert_eq!(
            parse_config("[camera]\ndistance\n"),
            Err(ParseError::InvalidLine)
        );
    }

    #[test]
    fn test_validation_applies() {
        assert_eq!(
            parse_config("[camera]\ndistance = 0\n"),
            Err(ParseError::Invalid(ConfigError::InvalidCameraDistance))
        );
    }

    #[test]
    fn test_section_header_comment() {
        let config = parse_config("[glitch] # overlay noise\nprobability = 0\n").unwrap();
        assert_eq!(config.glitch.probability, 0.0);
    }
}
