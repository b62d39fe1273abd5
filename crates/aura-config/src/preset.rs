//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use aura_reverb::{ParamId, ReverbParams, SharedParams};

use crate::error::ConfigError;

/// A named set of reverb parameter values.
///
/// Only the parameters listed in `params` are stored; everything else takes
/// its default when the preset is turned into a [`ReverbParams`]. Keys are
/// the stable [`ParamId::key`] strings and values are in each parameter's
/// natural unit (seconds, milliseconds, Hz, dB or `0..=1`).
///
/// # TOML Format
///
/// ```toml
/// name = "Concert Hall"
/// description = "Large, smooth hall"
/// category = "Halls"
///
/// [params]
/// room_type = 2
/// size = 0.75
/// decay = 2.5
/// pre_delay = 35.0
/// high_cut = 12000.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional browser category ("Rooms", "Halls", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Parameter overrides by key.
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

/// Widens an `f32` through its shortest decimal form so files read `0.3`
/// rather than `0.30000001192092896`.
fn file_value(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}

impl Preset {
    /// Create a new preset with no overrides.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            category: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Create a preset with a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add or replace one parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: f64) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Capture every parameter of `params`.
    pub fn from_params(name: impl Into<String>, params: &ReverbParams) -> Self {
        let mut preset = Self::new(name);
        for (id, value) in params.values() {
            preset.params.insert(id.key().to_string(), file_value(value));
        }
        preset
    }

    /// Stored value for `id`, if the preset overrides it.
    pub fn get(&self, id: ParamId) -> Option<f64> {
        self.params
            .iter()
            .find(|(key, _)| ParamId::from_key(key) == Some(id))
            .map(|(_, &v)| v)
    }

    /// Number of stored overrides.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True when the preset stores no overrides.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Resolves every key, rejecting unknown keys and non-finite values.
    fn resolved(&self) -> Result<Vec<(ParamId, f64)>, ConfigError> {
        self.params
            .iter()
            .map(|(key, &value)| {
                let id = ParamId::from_key(key)
                    .ok_or_else(|| ConfigError::UnknownParameter(key.clone()))?;
                if !value.is_finite() {
                    return Err(ConfigError::invalid_value(key.as_str(), value, "not a finite number"));
                }
                Ok((id, value))
            })
            .collect()
    }

    /// Checks every key is known and every value lies inside its range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, value) in self.resolved()? {
            let (min, max) = id.range();
            if value < f64::from(min) || value > f64::from(max) {
                return Err(ConfigError::invalid_value(
                    id.key(),
                    value,
                    format!("outside {}..={}", min, max),
                ));
            }
        }
        Ok(())
    }

    /// Writes the stored overrides into `params`, clamping each value.
    /// Parameters the preset does not mention are left untouched.
    pub fn apply_to(&self, params: &mut ReverbParams) -> Result<(), ConfigError> {
        for (id, value) in self.resolved()? {
            params.set(id, value as f32);
        }
        Ok(())
    }

    /// Defaults with this preset's overrides applied.
    ///
    /// ```rust
    /// use aura_config::Preset;
    ///
    /// let params = Preset::new("Long").with_param("decay", 6.0).to_params().unwrap();
    /// assert_eq!(params.decay, 6.0);
    /// assert_eq!(params.mix, 0.3);
    /// ```
    pub fn to_params(&self) -> Result<ReverbParams, ConfigError> {
        let mut params = ReverbParams::default();
        self.apply_to(&mut params)?;
        Ok(params)
    }

    /// Resets `shared` to defaults, then stores this preset's values.
    ///
    /// Nothing is written when the preset fails to resolve.
    pub fn apply_shared(&self, shared: &SharedParams) -> Result<(), ConfigError> {
        let params = self.to_params()?;
        shared.store_all(&params);
        tracing::debug!(preset = %self.name, "preset applied to shared parameters");
        Ok(())
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "preset loaded");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "preset saved");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
