//! Parameter reference listing.

use aura_reverb::{ParamId, ParamUnit, RoomType};
use clap::Args;

#[derive(Args)]
pub struct ParamsArgs {
    /// Print only parameter keys, one per line
    #[arg(long)]
    pub keys: bool,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if args.keys {
        for id in ParamId::ALL {
            println!("{}", id.key());
        }
        return Ok(());
    }

    println!("{:16} {:16} {:>18} {:>10}", "KEY", "NAME", "RANGE", "DEFAULT");
    println!("{}", "-".repeat(63));
    for id in ParamId::ALL {
        println!(
            "{:16} {:16} {:>18} {:>10}",
            id.key(),
            id.name(),
            format_range(id),
            format_default(id)
        );
    }
    println!();
    println!(
        "Room types: {}",
        RoomType::ALL.map(|r| format!("{}={}", r.index(), r.name())).join(", ")
    );
    println!("Set values with --param key=value, e.g. --param room_type=hall --param decay=3.5");
    Ok(())
}

fn format_range(id: ParamId) -> String {
    let (min, max) = id.range();
    format!("{}..{}{}", min, max, id.unit().suffix())
}

fn format_default(id: ParamId) -> String {
    match id.unit() {
        ParamUnit::Choice => RoomType::from_value(id.default_value()).to_string(),
        unit => format!("{}{}", id.default_value(), unit.suffix()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(ParamId::Decay), "0.1..10 s");
        assert_eq!(format_range(ParamId::InputGain), "-24..12 dB");
        assert_eq!(format_range(ParamId::Mix), "0..1");
    }

    #[test]
    fn test_format_default() {
        assert_eq!(format_default(ParamId::RoomType), "Room");
        assert_eq!(format_default(ParamId::HighCut), "12000 Hz");
        assert_eq!(format_default(ParamId::ModRate), "1x");
    }
}
