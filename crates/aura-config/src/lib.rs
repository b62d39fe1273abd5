//! Preset management for the aura reverb.
//!
//! Presets are small TOML files naming a subset of the reverb's parameters.
//! They drive the engine only through [`ReverbParams`](aura_reverb::ReverbParams)
//! and [`SharedParams`](aura_reverb::SharedParams); the DSP crates know
//! nothing about files.
//!
//! # Features
//!
//! - **Preset files**: load, save, validate and apply TOML presets
//! - **Factory presets**: ten built-in rooms, halls and creative spaces
//! - **Paths**: platform-specific user preset directory
//!
//! # Example
//!
//! ```rust,no_run
//! use aura_config::{Preset, get_factory_preset, user_presets_dir};
//! use aura_reverb::SharedParams;
//!
//! let shared = SharedParams::new();
//! get_factory_preset("cathedral").unwrap().apply_shared(&shared).unwrap();
//!
//! let mine = Preset::from_params("My Cathedral", &shared.snapshot())
//!     .with_description("Cathedral, a little darker");
//! mine.save(user_presets_dir().join("my_cathedral.toml")).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific preset directories.
pub mod paths;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    delete_user_preset, ensure_user_presets_dir, find_preset, list_user_presets,
    preset_name_from_path, user_presets_dir,
};
pub use preset::Preset;

/// Resolves a preset by factory name, file path or user preset name.
///
/// Factory presets win over user files of the same name.
pub fn load_preset(name: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    match find_preset(name) {
        Some(path) => Preset::load(path),
        None => Err(ConfigError::PresetNotFound(name.to_string())),
    }
}
