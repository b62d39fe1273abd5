//! Aura CLI - Offline rendering and preset management for the aura reverb.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aura")]
#[command(author, version, about = "Aura algorithmic reverb CLI", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a WAV file through the reverb
    Process(commands::process::ProcessArgs),

    /// Render the reverb's impulse response to a WAV file
    Impulse(commands::impulse::ImpulseArgs),

    /// List, show, save and delete presets
    Presets(commands::presets::PresetsArgs),

    /// List every reverb parameter with its range and default
    Params(commands::params::ParamsArgs),
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into())
    } else {
        fallback.into()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Impulse(args) => commands::impulse::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Params(args) => commands::params::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process() {
        let cli = Cli::try_parse_from([
            "aura",
            "process",
            "in.wav",
            "out.wav",
            "--preset",
            "cathedral",
            "--param",
            "mix=0.5",
            "--param",
            "decay=4",
            "--block-size",
            "256",
        ])
        .unwrap();
        let Commands::Process(args) = cli.command else {
            panic!("expected process command");
        };
        assert_eq!(args.preset.as_deref(), Some("cathedral"));
        assert_eq!(args.param.len(), 2);
        assert_eq!(args.param[1], ("decay".to_string(), "4".to_string()));
        assert_eq!(args.block_size, 256);
        assert_eq!(args.bit_depth, 24);
    }

    #[test]
    fn test_parse_rejects_bad_param() {
        let result = Cli::try_parse_from(["aura", "process", "in.wav", "out.wav", "--param", "mix"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_bad_bit_depth() {
        let result = Cli::try_parse_from(["aura", "process", "a.wav", "b.wav", "--bit-depth", "12"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_impulse_defaults() {
        let cli = Cli::try_parse_from(["aura", "impulse", "ir.wav"]).unwrap();
        let Commands::Impulse(args) = cli.command else {
            panic!("expected impulse command");
        };
        assert_eq!(args.sample_rate, 48000);
        assert_eq!(args.seconds, 4.0);
        assert!(!args.normalize);
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["aura", "presets", "list", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
