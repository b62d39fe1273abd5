//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use aura_config::{ConfigError, Preset};
use aura_reverb::{ParamId, ReverbParams, RoomType};

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("Invalid parameter format: '{}' (expected key=value)", s)),
    }
}

/// Parse an output bit depth for clap's `value_parser`.
pub fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("Unsupported bit depth '{}' (expected 16, 24 or 32)", s)),
    }
}

/// Load a preset by factory name, file path or user preset name.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    match aura_config::load_preset(name) {
        Ok(preset) => {
            tracing::info!(preset = %preset.name, "preset loaded");
            Ok(preset)
        }
        Err(ConfigError::PresetNotFound(_)) => anyhow::bail!(
            "Preset '{}' not found. Use 'aura presets list' to see available presets.",
            name
        ),
        Err(e) => Err(e).with_context(|| format!("failed to load preset '{}'", name)),
    }
}

/// Parse one command-line override into a parameter and value.
///
/// Room type also accepts its name (`--param room_type=hall`).
pub fn parse_override(key: &str, value: &str) -> anyhow::Result<(ParamId, f32)> {
    let id = ParamId::from_key(key).with_context(|| {
        format!("Unknown parameter '{}'. Use 'aura params' to list parameters.", key)
    })?;

    if id == ParamId::RoomType
        && let Some(room) = RoomType::from_name(value)
    {
        return Ok((id, room.index() as f32));
    }

    let parsed: f32 = value
        .parse()
        .with_context(|| format!("Invalid value '{}' for parameter '{}'", value, key))?;
    if !parsed.is_finite() {
        anyhow::bail!("Invalid value '{}' for parameter '{}'", value, key);
    }
    Ok((id, parsed))
}

/// Builds parameters from an optional preset plus `key=value` overrides.
///
/// Overrides are applied after the preset and clamped like every other
/// write; a warning is logged when clamping changes a value.
pub fn build_params(preset: Option<&str>, overrides: &[(String, String)]) -> anyhow::Result<ReverbParams> {
    let mut params = match preset {
        Some(name) => load_preset(name)?
            .to_params()
            .with_context(|| format!("preset '{}' is invalid", name))?,
        None => ReverbParams::default(),
    };

    for (key, value) in overrides {
        let (id, v) = parse_override(key, value)?;
        params.set(id, v);
        let stored = params.get(id);
        if stored != v {
            tracing::warn!(param = %id, requested = v, applied = stored, "value clamped");
        }
    }

    Ok(params)
}

/// Prints every parameter value with its unit.
pub fn print_params(params: &ReverbParams) {
    for id in ParamId::ALL {
        if id == ParamId::RoomType {
            println!("  {:16} {}", id.key(), params.room_type);
        } else {
            println!("  {:16} {}{}", id.key(), params.get(id), id.unit().suffix());
        }
    }
}
