//! Integration tests for aura-config.
//!
//! Presets are driven end to end into the reverb router.

use aura_config::{ConfigError, Preset, factory_presets, get_factory_preset, load_preset};
use aura_core::{AudioBlock, BlockProcessor};
use aura_reverb::{ParamId, SharedParams, SignalRouter};
use tempfile::TempDir;

fn render_impulse(router: &mut SignalRouter, shared: &SharedParams) -> Vec<f32> {
    let mut left = vec![0.0f32; 2048];
    let mut right = vec![0.0f32; 2048];
    left[0] = 1.0;
    right[0] = 1.0;
    router.process_shared(shared, &mut AudioBlock::stereo(&mut left, &mut right));
    left
}

/// Every factory preset drives the router to finite, non-silent output.
#[test]
fn test_factory_presets_process() {
    for preset in factory_presets() {
        let shared = SharedParams::new();
        preset.apply_shared(&shared).unwrap();

        let mut router = SignalRouter::new();
        router.prepare(48000.0, 2048);
        let out = render_impulse(&mut router, &shared);

        assert!(
            out.iter().all(|s| s.is_finite()),
            "'{}' produced non-finite output",
            preset.name
        );
        assert!(out.iter().any(|&s| s != 0.0), "'{}' produced silence", preset.name);
    }
}

/// Presets with different rooms produce different impulse responses.
#[test]
fn test_presets_sound_different() {
    let render = |name: &str| {
        let shared = SharedParams::new();
        get_factory_preset(name).unwrap().apply_shared(&shared).unwrap();
        let mut router = SignalRouter::new();
        router.prepare(48000.0, 2048);
        render_impulse(&mut router, &shared)
    };
    assert_ne!(render("vocal_booth"), render("cathedral"));
}

/// A snapshot saved as a user preset loads back to the same parameters.
#[test]
fn test_user_preset_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mine.toml");

    let shared = SharedParams::new();
    shared.set(ParamId::Decay, 3.7);
    shared.set(ParamId::Width, 0.35);
    shared.set(ParamId::RoomType, 2.0);
    let saved = Preset::from_params("Mine", &shared.snapshot());
    saved.save(&path).unwrap();

    let loaded = load_preset(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded.to_params().unwrap(), shared.snapshot());
}

#[test]
fn test_load_preset_prefers_factory() {
    let preset = load_preset("Warm Room").unwrap();
    assert_eq!(preset.category.as_deref(), Some("Rooms"));
}

#[test]
fn test_load_preset_not_found() {
    assert!(matches!(
        load_preset("no_such_preset_98765"),
        Err(ConfigError::PresetNotFound(_))
    ));
}
