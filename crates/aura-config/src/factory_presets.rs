//! Factory presets bundled with aura.
//!
//! Embedded as TOML at compile time so they are always available. Loading a
//! factory preset starts from defaults and applies only the values listed,
//! so `Init` is simply the default state.

use crate::Preset;

/// Identifiers of every factory preset, in browser order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "vocal_booth",
    "warm_room",
    "live_room",
    "concert_hall",
    "cathedral",
    "ambient_pad",
    "drum_room",
    "snare_plate",
    "dark_chamber",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("vocal_booth", VOCAL_BOOTH_PRESET),
    ("warm_room", WARM_ROOM_PRESET),
    ("live_room", LIVE_ROOM_PRESET),
    ("concert_hall", CONCERT_HALL_PRESET),
    ("cathedral", CATHEDRAL_PRESET),
    ("ambient_pad", AMBIENT_PAD_PRESET),
    ("drum_room", DRUM_ROOM_PRESET),
    ("snare_plate", SNARE_PLATE_PRESET),
    ("dark_chamber", DARK_CHAMBER_PRESET),
];

const INIT_PRESET: &str = r#"
name = "Init"
description = "Default settings"
category = "Default"
"#;

const VOCAL_BOOTH_PRESET: &str = r#"
name = "Vocal Booth"
description = "Tight, intimate space"
category = "Vocals"

[params]
room_type = 0
size = 0.3
decay = 0.5
damping = 0.6
pre_delay = 5.0
width = 0.8
mix = 0.2
er_level = 0.7
er_size = 0.4
high_cut = 8000.0
low_cut = 150.0
"#;

const WARM_ROOM_PRESET: &str = r#"
name = "Warm Room"
description = "Natural room sound"
category = "Rooms"

[params]
room_type = 1
size = 0.5
decay = 1.2
damping = 0.55
pre_delay = 15.0
width = 1.0
mix = 0.3
er_level = 0.5
er_size = 0.5
high_cut = 10000.0
low_cut = 100.0
"#;

const LIVE_ROOM_PRESET: &str = r#"
name = "Live Room"
description = "Bright, lively space"
category = "Rooms"

[params]
room_type = 1
size = 0.65
decay = 1.8
damping = 0.3
pre_delay = 20.0
width = 1.0
mix = 0.35
er_level = 0.6
er_size = 0.55
high_cut = 14000.0
low_cut = 80.0
"#;

const CONCERT_HALL_PRESET: &str = r#"
name = "Concert Hall"
description = "Large, smooth hall"
category = "Halls"

[params]
room_type = 2
size = 0.75
decay = 2.5
damping = 0.45
pre_delay = 35.0
width = 1.0
mix = 0.4
er_level = 0.45
er_size = 0.7
high_cut = 12000.0
low_cut = 60.0
"#;

const CATHEDRAL_PRESET: &str = r#"
name = "Cathedral"
description = "Massive, ethereal space"
category = "Large Spaces"

[params]
room_type = 3
size = 0.9
decay = 4.5
damping = 0.4
pre_delay = 50.0
width = 1.0
mix = 0.45
er_level = 0.35
er_size = 0.85
high_cut = 10000.0
low_cut = 50.0
"#;

const AMBIENT_PAD_PRESET: &str = r#"
name = "Ambient Pad"
description = "Long, lush tail for pads"
category = "Creative"

[params]
room_type = 3
size = 1.0
decay = 7.0
damping = 0.65
pre_delay = 80.0
width = 1.0
mix = 0.6
er_level = 0.2
er_size = 0.9
high_cut = 8000.0
low_cut = 100.0
"#;

const DRUM_ROOM_PRESET: &str = r#"
name = "Drum Room"
description = "Punchy room for drums"
category = "Drums"

[params]
room_type = 1
size = 0.55
decay = 0.8
damping = 0.5
pre_delay = 0.0
width = 0.9
mix = 0.25
er_level = 0.8
er_size = 0.45
high_cut = 12000.0
low_cut = 120.0
"#;

const SNARE_PLATE_PRESET: &str = r#"
name = "Snare Plate"
description = "Bright, short plate-like"
category = "Drums"

[params]
room_type = 0
size = 0.4
decay = 1.5
damping = 0.25
pre_delay = 0.0
width = 0.7
mix = 0.3
er_level = 0.3
er_size = 0.3
high_cut = 16000.0
low_cut = 200.0
"#;

const DARK_CHAMBER_PRESET: &str = r#"
name = "Dark Chamber"
description = "Moody, dark reverb"
category = "Creative"

[params]
room_type = 2
size = 0.7
decay = 3.0
damping = 0.8
pre_delay = 40.0
width = 1.0
mix = 0.35
er_level = 0.4
er_size = 0.6
high_cut = 4000.0
low_cut = 80.0
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use aura_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{} ({})", preset.name, preset.category.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name, case-insensitive.
///
/// ```rust
/// use aura_config::get_factory_preset;
///
/// assert!(get_factory_preset("concert_hall").is_some());
/// assert!(get_factory_preset("Concert Hall").is_some());
/// assert!(get_factory_preset("plate_2").is_none());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let wanted = name.trim().to_lowercase();

    for (id, toml) in FACTORY_PRESETS_TOML {
        if *id == wanted {
            return Preset::from_toml(toml).ok();
        }
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == wanted)
}

/// Get the identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// True when `name` matches a factory preset by identifier or display name.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
