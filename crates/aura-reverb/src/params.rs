//! Parameter model: identifiers, descriptors, room types and the per-block
//! parameter snapshot.
//!
//! Every user-facing control is a [`ParamId`]. Each id carries a static
//! [`ParamDescriptor`] (stable key, display name, unit, range, default) that
//! the preset layer, the lock-free [`SharedParams`](crate::SharedParams)
//! store and the CLI all share. Values are always expressed in the
//! descriptor's unit: seconds for decay, milliseconds for pre-delay, Hz for
//! filter cutoffs, dB for trims, and `0..=1` for normalized controls.
//!
//! | Key | Range | Default | Unit |
//! |-----|-------|---------|------|
//! | `room_type` | 0–3 | 1 (Room) | index |
//! | `size` | 0–1 | 0.5 | |
//! | `decay` | 0.1–10 | 2.0 | s |
//! | `damping` | 0–1 | 0.5 | |
//! | `pre_delay` | 0–200 | 10 | ms |
//! | `width` | 0–1 | 1.0 | |
//! | `mix` | 0–1 | 0.3 | |
//! | `er_level` | 0–1 | 0.5 | |
//! | `er_size` | 0–1 | 0.5 | |
//! | `high_cut` | 1000–20000 | 12000 | Hz |
//! | `low_cut` | 20–500 | 80 | Hz |
//! | `input_gain` | −24–12 | 0 | dB |
//! | `output_gain` | −24–12 | 0 | dB |
//! | `mod_depth` | 0–1 | 0.3 | |
//! | `mod_rate` | 0–2 | 1.0 | × |
//! | `low_decay` | 0.5–2 | 1.0 | × |
//! | `mid_decay` | 0.5–2 | 1.0 | × |
//! | `high_decay` | 0.5–2 | 1.0 | × |
//! | `crossover_low` | 80–400 | 200 | Hz |
//! | `crossover_high` | 2000–8000 | 4000 | Hz |

use core::fmt;

/// Unit of a parameter value, used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// Decibels
    Decibels,
    /// Hertz
    Hertz,
    /// Milliseconds
    Milliseconds,
    /// Seconds
    Seconds,
    /// Multiplier of a base rate or time
    Multiplier,
    /// Discrete choice index
    Choice,
    /// Normalized `0..=1`
    None,
}

impl ParamUnit {
    /// Suffix for display.
    ///
    /// ```rust
    /// use aura_reverb::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Seconds.suffix(), " s");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Seconds => " s",
            ParamUnit::Multiplier => "x",
            ParamUnit::Choice | ParamUnit::None => "",
        }
    }
}

/// Static metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Stable snake_case key used in preset files and on the command line.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Unit of the value.
    pub unit: ParamUnit,
    /// Smallest accepted value.
    pub min: f32,
    /// Largest accepted value.
    pub max: f32,
    /// Initial value.
    pub default: f32,
    /// Suggested increment for encoders and sliders.
    pub step: f32,
}

/// Identifier for every controllable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ParamId {
    /// Room character; scales size and decay.
    RoomType = 0,
    /// Room size.
    Size,
    /// Decay time (RT60-like) in seconds.
    Decay,
    /// High-frequency absorption.
    Damping,
    /// Pre-delay in milliseconds.
    PreDelay,
    /// Stereo width of the tail.
    Width,
    /// Wet/dry balance.
    Mix,
    /// Early reflection level.
    ErLevel,
    /// Early reflection spacing.
    ErSize,
    /// Output lowpass cutoff.
    HighCut,
    /// Output highpass cutoff.
    LowCut,
    /// Input trim.
    InputGain,
    /// Output trim.
    OutputGain,
    /// Comb modulation depth.
    ModDepth,
    /// Comb modulation rate multiplier.
    ModRate,
    /// Low-band decay multiplier.
    LowDecay,
    /// Mid-band decay multiplier.
    MidDecay,
    /// High-band decay multiplier.
    HighDecay,
    /// Low/mid crossover.
    CrossoverLow,
    /// Mid/high crossover.
    CrossoverHigh,
}

const fn desc(
    key: &'static str,
    name: &'static str,
    unit: ParamUnit,
    min: f32,
    max: f32,
    default: f32,
    step: f32,
) -> ParamDescriptor {
    ParamDescriptor {
        key,
        name,
        unit,
        min,
        max,
        default,
        step,
    }
}

static DESCRIPTORS: [ParamDescriptor; ParamId::COUNT] = [
    desc("room_type", "Room Type", ParamUnit::Choice, 0.0, 3.0, 1.0, 1.0),
    desc("size", "Size", ParamUnit::None, 0.0, 1.0, 0.5, 0.01),
    desc("decay", "Decay", ParamUnit::Seconds, 0.1, 10.0, 2.0, 0.01),
    desc("damping", "Damping", ParamUnit::None, 0.0, 1.0, 0.5, 0.01),
    desc("pre_delay", "Pre-Delay", ParamUnit::Milliseconds, 0.0, 200.0, 10.0, 0.1),
    desc("width", "Width", ParamUnit::None, 0.0, 1.0, 1.0, 0.01),
    desc("mix", "Mix", ParamUnit::None, 0.0, 1.0, 0.3, 0.01),
    desc("er_level", "ER Level", ParamUnit::None, 0.0, 1.0, 0.5, 0.01),
    desc("er_size", "ER Size", ParamUnit::None, 0.0, 1.0, 0.5, 0.01),
    desc("high_cut", "High Cut", ParamUnit::Hertz, 1000.0, 20000.0, 12000.0, 1.0),
    desc("low_cut", "Low Cut", ParamUnit::Hertz, 20.0, 500.0, 80.0, 1.0),
    desc("input_gain", "Input Gain", ParamUnit::Decibels, -24.0, 12.0, 0.0, 0.1),
    desc("output_gain", "Output Gain", ParamUnit::Decibels, -24.0, 12.0, 0.0, 0.1),
    desc("mod_depth", "Mod Depth", ParamUnit::None, 0.0, 1.0, 0.3, 0.01),
    desc("mod_rate", "Mod Rate", ParamUnit::Multiplier, 0.0, 2.0, 1.0, 0.01),
    desc("low_decay", "Low Decay", ParamUnit::Multiplier, 0.5, 2.0, 1.0, 0.01),
    desc("mid_decay", "Mid Decay", ParamUnit::Multiplier, 0.5, 2.0, 1.0, 0.01),
    desc("high_decay", "High Decay", ParamUnit::Multiplier, 0.5, 2.0, 1.0, 0.01),
    desc("crossover_low", "Low Crossover", ParamUnit::Hertz, 80.0, 400.0, 200.0, 1.0),
    desc("crossover_high", "High Crossover", ParamUnit::Hertz, 2000.0, 8000.0, 4000.0, 10.0),
];

impl ParamId {
    /// Number of parameters.
    pub const COUNT: usize = 20;

    /// Every parameter in index order.
    pub const ALL: [ParamId; Self::COUNT] = [
        ParamId::RoomType,
        ParamId::Size,
        ParamId::Decay,
        ParamId::Damping,
        ParamId::PreDelay,
        ParamId::Width,
        ParamId::Mix,
        ParamId::ErLevel,
        ParamId::ErSize,
        ParamId::HighCut,
        ParamId::LowCut,
        ParamId::InputGain,
        ParamId::OutputGain,
        ParamId::ModDepth,
        ParamId::ModRate,
        ParamId::LowDecay,
        ParamId::MidDecay,
        ParamId::HighDecay,
        ParamId::CrossoverLow,
        ParamId::CrossoverHigh,
    ];

    /// Position in [`ParamId::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Static metadata.
    #[inline]
    pub fn descriptor(self) -> &'static ParamDescriptor {
        &DESCRIPTORS[self.index()]
    }

    /// Stable snake_case key.
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Value unit.
    pub fn unit(self) -> ParamUnit {
        self.descriptor().unit
    }

    /// `(min, max)`.
    pub fn range(self) -> (f32, f32) {
        let d = self.descriptor();
        (d.min, d.max)
    }

    /// Initial value.
    pub fn default_value(self) -> f32 {
        self.descriptor().default
    }

    /// Looks up a parameter by key. Hyphens are accepted in place of
    /// underscores and case is ignored.
    ///
    /// ```rust
    /// use aura_reverb::ParamId;
    ///
    /// assert_eq!(ParamId::from_key("pre_delay"), Some(ParamId::PreDelay));
    /// assert_eq!(ParamId::from_key("High-Cut"), Some(ParamId::HighCut));
    /// assert_eq!(ParamId::from_key("feedback"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|id| {
            let k = id.key();
            k.len() == key.len()
                && k.bytes().zip(key.bytes()).all(|(a, b)| {
                    let b = if b == b'-' { b'_' } else { b.to_ascii_lowercase() };
                    a == b
                })
        })
    }

    /// Clamps `value` into range. Non-finite values fall back to the
    /// default; room type is rounded to the nearest index.
    pub fn clamp(self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.default_value();
        }
        let (min, max) = self.range();
        let value = value.clamp(min, max);
        if self == ParamId::RoomType {
            libm::roundf(value)
        } else {
            value
        }
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Room character. Scales size and decay before they reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoomType {
    /// Small, dry booth.
    Booth,
    /// Ordinary room.
    #[default]
    Room,
    /// Concert hall.
    Hall,
    /// Very large, long space.
    Cathedral,
}

impl RoomType {
    /// All room types by index.
    pub const ALL: [RoomType; 4] = [
        RoomType::Booth,
        RoomType::Room,
        RoomType::Hall,
        RoomType::Cathedral,
    ];

    /// Room type for `index`, or `None` past the end.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Room type from a (possibly fractional) parameter value, rounded and
    /// clamped.
    pub fn from_value(value: f32) -> Self {
        let idx = ParamId::RoomType.clamp(value) as usize;
        Self::from_index(idx).unwrap_or_default()
    }

    /// Case-insensitive name lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Position in [`RoomType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            RoomType::Booth => "Booth",
            RoomType::Room => "Room",
            RoomType::Hall => "Hall",
            RoomType::Cathedral => "Cathedral",
        }
    }

    /// Factor applied to `size` and `er_size`.
    pub fn size_multiplier(self) -> f32 {
        match self {
            RoomType::Booth => 0.2,
            RoomType::Room => 0.5,
            RoomType::Hall => 0.8,
            RoomType::Cathedral => 1.0,
        }
    }

    /// Factor applied to `decay`.
    pub fn decay_multiplier(self) -> f32 {
        match self {
            RoomType::Booth => 0.3,
            RoomType::Room => 0.5,
            RoomType::Hall => 0.75,
            RoomType::Cathedral => 1.0,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Plain snapshot of every parameter, in descriptor units.
///
/// All writes through [`set`](Self::set) are clamped, so a `ReverbParams`
/// built that way is always in range.
///
/// # Example
///
/// ```rust
/// use aura_reverb::{ParamId, ReverbParams, RoomType};
///
/// let mut params = ReverbParams::default();
/// params.set(ParamId::Decay, 42.0);
/// assert_eq!(params.decay, 10.0);
///
/// params.set(ParamId::RoomType, 2.0);
/// assert_eq!(params.room_type, RoomType::Hall);
/// assert!((params.effective_decay() - 7.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParams {
    /// Room character.
    pub room_type: RoomType,
    /// Room size, 0–1.
    pub size: f32,
    /// Decay in seconds.
    pub decay: f32,
    /// Damping, 0–1.
    pub damping: f32,
    /// Pre-delay in ms.
    pub pre_delay_ms: f32,
    /// Stereo width, 0–1.
    pub width: f32,
    /// Wet/dry mix, 0–1.
    pub mix: f32,
    /// Early reflection level, 0–1.
    pub er_level: f32,
    /// Early reflection size, 0–1.
    pub er_size: f32,
    /// High cut in Hz.
    pub high_cut: f32,
    /// Low cut in Hz.
    pub low_cut: f32,
    /// Input trim in dB.
    pub input_gain_db: f32,
    /// Output trim in dB.
    pub output_gain_db: f32,
    /// Modulation depth, 0–1.
    pub mod_depth: f32,
    /// Modulation rate multiplier, 0–2.
    pub mod_rate: f32,
    /// Low-band decay multiplier.
    pub low_decay: f32,
    /// Mid-band decay multiplier.
    pub mid_decay: f32,
    /// High-band decay multiplier.
    pub high_decay: f32,
    /// Low crossover in Hz.
    pub crossover_low: f32,
    /// High crossover in Hz.
    pub crossover_high: f32,
}

impl Default for ReverbParams {
    fn default() -> Self {
        let mut params = Self {
            room_type: RoomType::default(),
            size: 0.0,
            decay: 0.0,
            damping: 0.0,
            pre_delay_ms: 0.0,
            width: 0.0,
            mix: 0.0,
            er_level: 0.0,
            er_size: 0.0,
            high_cut: 0.0,
            low_cut: 0.0,
            input_gain_db: 0.0,
            output_gain_db: 0.0,
            mod_depth: 0.0,
            mod_rate: 0.0,
            low_decay: 0.0,
            mid_decay: 0.0,
            high_decay: 0.0,
            crossover_low: 0.0,
            crossover_high: 0.0,
        };
        for id in ParamId::ALL {
            params.set(id, id.default_value());
        }
        params
    }
}

impl ReverbParams {
    /// Value of `id` in descriptor units.
    pub fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::RoomType => self.room_type.index() as f32,
            ParamId::Size => self.size,
            ParamId::Decay => self.decay,
            ParamId::Damping => self.damping,
            ParamId::PreDelay => self.pre_delay_ms,
            ParamId::Width => self.width,
            ParamId::Mix => self.mix,
            ParamId::ErLevel => self.er_level,
            ParamId::ErSize => self.er_size,
            ParamId::HighCut => self.high_cut,
            ParamId::LowCut => self.low_cut,
            ParamId::InputGain => self.input_gain_db,
            ParamId::OutputGain => self.output_gain_db,
            ParamId::ModDepth => self.mod_depth,
            ParamId::ModRate => self.mod_rate,
            ParamId::LowDecay => self.low_decay,
            ParamId::MidDecay => self.mid_decay,
            ParamId::HighDecay => self.high_decay,
            ParamId::CrossoverLow => self.crossover_low,
            ParamId::CrossoverHigh => self.crossover_high,
        }
    }

    /// Sets `id`, clamped into range.
    pub fn set(&mut self, id: ParamId, value: f32) {
        let v = id.clamp(value);
        match id {
            ParamId::RoomType => self.room_type = RoomType::from_value(v),
            ParamId::Size => self.size = v,
            ParamId::Decay => self.decay = v,
            ParamId::Damping => self.damping = v,
            ParamId::PreDelay => self.pre_delay_ms = v,
            ParamId::Width => self.width = v,
            ParamId::Mix => self.mix = v,
            ParamId::ErLevel => self.er_level = v,
            ParamId::ErSize => self.er_size = v,
            ParamId::HighCut => self.high_cut = v,
            ParamId::LowCut => self.low_cut = v,
            ParamId::InputGain => self.input_gain_db = v,
            ParamId::OutputGain => self.output_gain_db = v,
            ParamId::ModDepth => self.mod_depth = v,
            ParamId::ModRate => self.mod_rate = v,
            ParamId::LowDecay => self.low_decay = v,
            ParamId::MidDecay => self.mid_decay = v,
            ParamId::HighDecay => self.high_decay = v,
            ParamId::CrossoverLow => self.crossover_low = v,
            ParamId::CrossoverHigh => self.crossover_high = v,
        }
    }

    /// Copy with every field passed through [`set`](Self::set), for
    /// snapshots whose public fields were written directly.
    ///
    /// ```rust
    /// use aura_reverb::ReverbParams;
    ///
    /// let mut params = ReverbParams::default();
    /// params.mix = f32::NAN;
    /// params.width = 3.0;
    /// let clean = params.sanitized();
    /// assert_eq!(clean.mix, 0.3);
    /// assert_eq!(clean.width, 1.0);
    /// ```
    pub fn sanitized(&self) -> Self {
        let mut clean = *self;
        for (id, value) in self.values() {
            clean.set(id, value);
        }
        clean
    }

    /// `(id, value)` for every parameter in index order.
    pub fn values(&self) -> [(ParamId, f32); ParamId::COUNT] {
        ParamId::ALL.map(|id| (id, self.get(id)))
    }

    /// Size after the room-type multiplier.
    pub fn effective_size(&self) -> f32 {
        self.size * self.room_type.size_multiplier()
    }

    /// Decay after the room-type multiplier.
    pub fn effective_decay(&self) -> f32 {
        self.decay * self.room_type.decay_multiplier()
    }

    /// Early reflection size after the room-type multiplier.
    pub fn effective_er_size(&self) -> f32 {
        self.er_size * self.room_type.size_multiplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_matches_ids() {
        assert_eq!(ParamId::ALL.len(), ParamId::COUNT);
        for (i, id) in ParamId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            let (min, max) = id.range();
            assert!(min < max, "{} has empty range", id);
            let d = id.default_value();
            assert!(d >= min && d <= max, "{} default {} outside range", id, d);
        }
    }

    #[test]
    fn test_keys_unique_and_round_trip() {
        for id in ParamId::ALL {
            assert_eq!(ParamId::from_key(id.key()), Some(id));
            let dupes = ParamId::ALL.iter().filter(|o| o.key() == id.key()).count();
            assert_eq!(dupes, 1, "Duplicate key {}", id.key());
        }
    }

    #[test]
    fn test_defaults() {
        let p = ReverbParams::default();
        assert_eq!(p.room_type, RoomType::Room);
        assert_eq!(p.size, 0.5);
        assert_eq!(p.decay, 2.0);
        assert_eq!(p.damping, 0.5);
        assert_eq!(p.pre_delay_ms, 10.0);
        assert_eq!(p.width, 1.0);
        assert_eq!(p.mix, 0.3);
        assert_eq!(p.er_level, 0.5);
        assert_eq!(p.er_size, 0.5);
        assert_eq!(p.high_cut, 12000.0);
        assert_eq!(p.low_cut, 80.0);
        assert_eq!(p.input_gain_db, 0.0);
        assert_eq!(p.output_gain_db, 0.0);
        assert_eq!(p.mod_depth, 0.3);
        assert_eq!(p.mod_rate, 1.0);
        assert_eq!(p.low_decay, 1.0);
        assert_eq!(p.crossover_low, 200.0);
        assert_eq!(p.crossover_high, 4000.0);
    }

    #[test]
    fn test_set_clamps() {
        let mut p = ReverbParams::default();
        p.set(ParamId::Size, 3.0);
        assert_eq!(p.size, 1.0);
        p.set(ParamId::HighCut, 50.0);
        assert_eq!(p.high_cut, 1000.0);
        p.set(ParamId::LowDecay, 0.0);
        assert_eq!(p.low_decay, 0.5);
        p.set(ParamId::Mix, f32::NAN);
        assert_eq!(p.mix, 0.3);
        p.set(ParamId::RoomType, 17.0);
        assert_eq!(p.room_type, RoomType::Cathedral);
        p.set(ParamId::RoomType, 0.4);
        assert_eq!(p.room_type, RoomType::Booth);
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut p = ReverbParams::default();
        for id in ParamId::ALL {
            let (min, max) = id.range();
            let v = id.clamp(min + (max - min) * 0.75);
            p.set(id, v);
            assert_eq!(p.get(id), v, "{} did not round-trip", id);
        }
    }

    #[test]
    fn test_room_type_multipliers() {
        let expected = [(0.2, 0.3), (0.5, 0.5), (0.8, 0.75), (1.0, 1.0)];
        for (room, (s, d)) in RoomType::ALL.into_iter().zip(expected) {
            assert_eq!(room.size_multiplier(), s);
            assert_eq!(room.decay_multiplier(), d);
            assert_eq!(RoomType::from_index(room.index()), Some(room));
            assert_eq!(RoomType::from_name(&room.name().to_ascii_uppercase()), Some(room));
        }
        assert_eq!(RoomType::from_index(4), None);
    }

    #[test]
    fn test_effective_values() {
        let mut p = ReverbParams::default();
        p.room_type = RoomType::Booth;
        p.size = 0.5;
        p.er_size = 1.0;
        p.decay = 2.0;
        assert!((p.effective_size() - 0.1).abs() < 1e-6);
        assert!((p.effective_er_size() - 0.2).abs() < 1e-6);
        assert!((p.effective_decay() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_unit_suffixes() {
        assert_eq!(ParamId::Decay.unit().suffix(), " s");
        assert_eq!(ParamId::HighCut.unit().suffix(), " Hz");
        assert_eq!(ParamId::InputGain.unit().suffix(), " dB");
        assert_eq!(ParamId::PreDelay.unit().suffix(), " ms");
    }
}
