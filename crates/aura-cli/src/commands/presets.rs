//! Preset management commands.
//!
//! Provides commands to list, show, save and delete reverb presets.

use super::common::{build_params, load_preset, parse_key_val, print_params};
use anyhow::Context;
use aura_config::{
    ConfigError, Preset, delete_user_preset, ensure_user_presets_dir, factory_presets,
    is_factory_preset, list_user_presets, paths::preset_file_name, preset_name_from_path,
    user_presets_dir,
};
use aura_reverb::ParamId;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long, conflicts_with = "user")]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show every parameter of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a parameter set as a user preset
    Save {
        /// Name for the new preset
        name: String,

        /// Preset to start from (defaults to init)
        #[arg(short, long)]
        preset: Option<String>,

        /// Parameter override (e.g. "decay=3.5"); repeatable
        #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
        param: Vec<(String, String)>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Browser category of the preset
        #[arg(short, long)]
        category: Option<String>,

        /// Overwrite if preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a user preset
    Delete {
        /// Preset name to delete
        name: String,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save {
            name,
            preset,
            param,
            description,
            category,
            force,
        } => {
            let preset = build_user_preset(
                &name,
                preset.as_deref(),
                &param,
                description.as_deref(),
                category.as_deref(),
            )?;
            save_preset(&name, &preset, force)
        }
        PresetsCommand::Delete { name } => delete_preset(&name),
        PresetsCommand::Paths => show_paths(),
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let category = preset.category.as_deref().unwrap_or("");
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:16} {:10} - {}", preset.name, category, desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: aura presets save <name> --param decay=3\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match Preset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {:20} - {}", name, desc);
                    }
                    Err(e) => {
                        tracing::debug!(path = %path.display(), error = %e, "unreadable preset");
                        println!("  {:20} - (error loading)", name);
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    let params = preset
        .to_params()
        .with_context(|| format!("preset '{}' is invalid", name))?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();
    if let Some(category) = &preset.category {
        println!("Category:    {}", category);
    }
    if let Some(desc) = &preset.description {
        println!("Description: {}", desc);
    }
    println!();

    let overridden: Vec<&str> = ParamId::ALL
        .into_iter()
        .filter(|&id| preset.get(id).is_some())
        .map(ParamId::key)
        .collect();
    println!("Parameters ({} set, rest default):", overridden.len());
    print_params(&params);
    if !overridden.is_empty() {
        println!();
        println!("Set by preset: {}", overridden.join(", "));
    }

    Ok(())
}

/// Builds a preset capturing every parameter of `base` plus `overrides`.
fn build_user_preset(
    name: &str,
    base: Option<&str>,
    overrides: &[(String, String)],
    description: Option<&str>,
    category: Option<&str>,
) -> anyhow::Result<Preset> {
    if name.trim().is_empty() {
        anyhow::bail!("Preset name must not be empty");
    }
    if is_factory_preset(name) {
        anyhow::bail!("'{}' is a factory preset name. Choose a different name.", name);
    }

    let params = build_params(base, overrides)?;
    let mut preset = Preset::from_params(name, &params);
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }
    if let Some(category) = category {
        preset = preset.with_category(category);
    }
    Ok(preset)
}

fn save_preset(name: &str, preset: &Preset, force: bool) -> anyhow::Result<()> {
    let preset_path = ensure_user_presets_dir()?.join(preset_file_name(name));

    if preset_path.exists() && !force {
        anyhow::bail!("Preset '{}' already exists. Use --force to overwrite.", name);
    }

    preset.save(&preset_path)?;
    println!("Saved preset '{}' to {}", name, preset_path.display());
    Ok(())
}

fn delete_preset(name: &str) -> anyhow::Result<()> {
    if is_factory_preset(name) {
        anyhow::bail!("Cannot delete factory preset '{}'. Factory presets are built-in.", name);
    }

    match delete_user_preset(name) {
        Ok(path) => {
            println!("Deleted preset '{}' ({}).", name, path.display());
            Ok(())
        }
        Err(ConfigError::PresetNotFound(_)) => anyhow::bail!("User preset '{}' not found.", name),
        Err(e) => Err(e.into()),
    }
}

fn show_paths() -> anyhow::Result<()> {
    println!("Preset Directories:");
    println!("===================");
    println!();
    println!("User presets: {}", user_presets_dir().display());
    Ok(())
}
